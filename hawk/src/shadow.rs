//! Patterns with meta-variables.
//!
//! A shadow term is a term whose variables and type variables are
//! either *plain* (standing for themselves),
//! *fixed* (standing for a value that has already been assigned), or
//! *unfixed* (standing for a value to be assigned by matching).
//! Strategies describe goals and proof steps by shadow sequents,
//! which are converted to conjectures once their meta-variables are assigned.
//!
//! ~~~
//! # use hawk::kernel::{Conjecture, Kernel, Type};
//! # use hawk::shadow::{MetaSubst, ShadowTheorem};
//! # use hawk::matching::Matches;
//! let k = Kernel::new();
//! let (p, q) = (k.make_var("p", Type::bool()), k.make_var("q", Type::bool()));
//! let pattern = ShadowTheorem::from_conjecture(&Conjecture::new([], p.clone()));
//! assert_eq!(pattern.to_string(), "⊢ ?p");
//!
//! let goal = Conjecture::new([], k.make_eq(q.clone(), q)?);
//! let subst: MetaSubst = Matches::new(&pattern, &goal, MetaSubst::new(), true, false)
//!     .next()
//!     .unwrap();
//! assert_eq!(pattern.instantiate(&subst, &[], &k)?, goal);
//! # Ok::<_, hawk::Error>(())
//! ~~~

use crate::free::Variable;
use crate::kernel::{self, Conjecture, Kernel};
use crate::matching::{Leaf, Role};
use crate::{Free, Sequent, Stack, Subst, Symbol, Term, Type};
use alloc::{format, vec::Vec};
use core::fmt::{self, Display};

/// Leaf of a shadow term or type.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Meta<T> {
    Plain(T),
    Fixed(T),
    Unfixed(T),
}

impl<T> Meta<T> {
    pub fn inner(&self) -> &T {
        match self {
            Self::Plain(x) | Self::Fixed(x) | Self::Unfixed(x) => x,
        }
    }

    /// Turn an unfixed meta-variable into a fixed one.
    pub fn fix(self) -> Self {
        match self {
            Self::Unfixed(x) => Self::Fixed(x),
            m => m,
        }
    }

    pub fn is_meta(&self) -> bool {
        !matches!(self, Self::Plain(_))
    }
}

/// Type with meta-variables.
pub type ShadowType = Type<Meta<Symbol>>;
/// Variable of a shadow term, carrying a shadow type.
pub type ShadowVar = Free<ShadowType>;
/// Term with meta-variables.
pub type ShadowTerm = Term<Meta<ShadowVar>, ShadowType>;
/// Sequent with meta-variables.
pub type ShadowTheorem = Sequent<ShadowTerm>;

/// Assignment of meta-variables, keyed by their names.
pub type MetaSubst = Subst<Symbol, kernel::Term, kernel::Type>;

#[derive(Debug)]
pub enum Error {
    /// meta-variable without assigned value
    Unassigned(Symbol),
    /// bound variable without binder
    LooseBound,
    /// meta-variable used as binder is assigned a non-variable
    NotAVariable(Symbol),
    Kernel(kernel::Error),
}

impl From<kernel::Error> for Error {
    fn from(e: kernel::Error) -> Self {
        Self::Kernel(e)
    }
}

impl Leaf for Meta<Symbol> {
    type Inner = Symbol;
    type Key = Symbol;

    fn role(&self) -> Role<'_, Symbol> {
        match self {
            Self::Plain(x) => Role::Rigid(x),
            Self::Fixed(x) => Role::Fixed(x),
            Self::Unfixed(x) => Role::Unfixed(x),
        }
    }

    fn rigid(&self) -> Option<&Symbol> {
        match self {
            Self::Plain(x) => Some(x),
            _ => None,
        }
    }

    fn key(&self) -> Symbol {
        self.inner().clone()
    }
}

impl<Ty> Leaf for Meta<Free<Ty>> {
    type Inner = Free<Ty>;
    type Key = Symbol;

    fn role(&self) -> Role<'_, Free<Ty>> {
        match self {
            Self::Plain(x) => Role::Rigid(x),
            Self::Fixed(x) => Role::Fixed(x),
            Self::Unfixed(x) => Role::Unfixed(x),
        }
    }

    fn rigid(&self) -> Option<&Free<Ty>> {
        match self {
            Self::Plain(x) => Some(x),
            _ => None,
        }
    }

    fn key(&self) -> Symbol {
        self.inner().name.clone()
    }
}

impl<Ty> Variable for Meta<Free<Ty>> {
    type Ty = Ty;

    fn name(&self) -> &Symbol {
        &self.inner().name
    }

    fn ty(&self) -> &Ty {
        &self.inner().ty
    }
}

impl<T: Display> Display for Meta<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Plain(x) => x.fmt(f),
            Self::Fixed(x) => write!(f, "!{}", x),
            Self::Unfixed(x) => write!(f, "?{}", x),
        }
    }
}

fn meta<T>(x: T, fixed: bool) -> Meta<T> {
    if fixed {
        Meta::Fixed(x)
    } else {
        Meta::Unfixed(x)
    }
}

/// Names of meta-variables that are fixed.
#[derive(Clone, Debug, Default)]
pub struct Fixed<'a> {
    pub terms: &'a [Symbol],
    pub types: &'a [Symbol],
}

/// Turn all type variables into meta-variables.
pub fn shadow_type(ty: &kernel::Type, fixed: &[Symbol]) -> ShadowType {
    ty.map(&mut |v| Type::Var(meta(v.clone(), fixed.contains(v))))
}

pub fn shadow_var(v: &kernel::Var, fixed: &Fixed) -> Meta<ShadowVar> {
    let var = Free::new(v.name.clone(), shadow_type(&v.ty, fixed.types));
    meta(var, fixed.terms.contains(&v.name))
}

/// Turn all variables and type variables into meta-variables.
pub fn shadow_term(tm: &kernel::Term, fixed: &Fixed) -> ShadowTerm {
    let mut ft = |ty: &kernel::Type| shadow_type(ty, fixed.types);
    tm.map(&mut |v| Term::Var(shadow_var(v, fixed)), &mut ft)
}

/// Fix all unfixed meta-variables of a type whose names are given.
fn fix_type(ty: &ShadowType, names: &[Symbol]) -> ShadowType {
    ty.map(&mut |m| match m {
        Meta::Unfixed(v) if names.contains(v) => Type::Var(m.clone().fix()),
        _ => Type::Var(m.clone()),
    })
}

impl ShadowTheorem {
    /// Turn all variables of a conjecture into unfixed meta-variables.
    pub fn from_conjecture(conj: &Conjecture) -> Self {
        conj.map(|tm| shadow_term(tm, &Fixed::default()))
    }

    /// Turn all variables of a conjecture into meta-variables,
    /// where the meta-variables with the given names are fixed.
    pub fn with_fixed(conj: &Conjecture, fixed: &Fixed) -> Self {
        Self::from_conjecture(conj).fix_names(fixed)
    }

    /// Fix all unfixed meta-variables with the given names.
    pub fn fix_names(&self, fixed: &Fixed) -> Self {
        let mut fv = |m: &Meta<ShadowVar>| {
            let var = Free::new(m.inner().name.clone(), fix_type(&m.inner().ty, fixed.types));
            Term::Var(match m {
                Meta::Plain(_) => Meta::Plain(var),
                Meta::Fixed(_) => Meta::Fixed(var),
                Meta::Unfixed(_) => meta(var, fixed.terms.contains(&m.inner().name)),
            })
        };
        self.map(|tm| tm.map(&mut fv, &mut |ty| fix_type(ty, fixed.types)))
    }

    /// Names of all meta-variables and type meta-variables.
    pub fn meta_names(&self, terms: &mut Vec<Symbol>, types: &mut Vec<Symbol>) {
        for tm in self.premises().iter().chain([self.conclusion()]) {
            meta_names(tm, terms, types)
        }
    }

    /// Replace all meta-variables by their assigned values,
    /// adding the given extra premises.
    pub fn instantiate(
        &self,
        subst: &MetaSubst,
        extra: &[kernel::Term],
        kernel: &Kernel,
    ) -> Result<Conjecture, Error> {
        let inst = Instantiate::new(subst, kernel);
        let mut premises = Vec::with_capacity(self.premises().len() + extra.len());
        for p in self.premises() {
            premises.push(inst.term(p)?);
        }
        premises.extend(extra.iter().cloned());
        Ok(Conjecture::new(premises, inst.term(self.conclusion())?))
    }
}

/// Collect the names of meta-variables in a shadow term.
pub fn meta_names(tm: &ShadowTerm, terms: &mut Vec<Symbol>, types: &mut Vec<Symbol>) {
    let mut vars = Vec::new();
    tm.vars(&mut vars);
    for v in vars.into_iter().filter(|v| v.is_meta()) {
        if !terms.contains(v.name()) {
            terms.push(v.name().clone())
        }
    }
    let mut tyvars = Vec::new();
    tm.for_each_type(&mut |ty| ty.vars(&mut tyvars));
    for v in tyvars.into_iter().filter(|v| v.is_meta()) {
        if !types.contains(v.inner()) {
            types.push(v.inner().clone())
        }
    }
}

/// Conversion of shadow terms to concrete terms.
///
/// Types and terms are reconstructed via the kernel factories,
/// so the result is well-typed if conversion succeeds.
pub struct Instantiate<'a> {
    subst: &'a MetaSubst,
    kernel: &'a Kernel,
    /// names that binders must not take
    avoid: Vec<Symbol>,
}

impl<'a> Instantiate<'a> {
    pub fn new(subst: &'a MetaSubst, kernel: &'a Kernel) -> Self {
        let mut avoid = Vec::new();
        for tm in subst.terms.values() {
            let mut vars = Vec::new();
            tm.vars(&mut vars);
            avoid.extend(vars.into_iter().map(|v| v.name.clone()));
        }
        Self {
            subst,
            kernel,
            avoid,
        }
    }

    pub fn ty(&self, ty: &ShadowType) -> Result<kernel::Type, Error> {
        match ty {
            Type::App(name, args) => {
                let args = args.iter().map(|a| self.ty(a)).collect::<Result<Vec<_>, _>>()?;
                Ok(self.kernel.make_type(name.clone(), args)?)
            }
            Type::Var(Meta::Plain(v)) => Ok(self.kernel.make_tyvar(v.clone())),
            Type::Var(Meta::Fixed(v) | Meta::Unfixed(v)) => {
                let ty = self.subst.types.get(v).cloned();
                ty.ok_or_else(|| Error::Unassigned(v.clone()))
            }
        }
    }

    /// Convert a shadow variable, which must be assigned a variable.
    pub fn var(&self, v: &Meta<ShadowVar>) -> Result<kernel::Var, Error> {
        match v {
            Meta::Plain(v) => Ok(kernel::Var::new(v.name.clone(), self.ty(&v.ty)?)),
            Meta::Fixed(v) | Meta::Unfixed(v) => match self.subst.terms.get(&v.name) {
                Some(Term::Var(x)) => Ok(x.clone()),
                Some(_) => Err(Error::NotAVariable(v.name.clone())),
                None => Err(Error::Unassigned(v.name.clone())),
            },
        }
    }

    pub fn term(&self, tm: &ShadowTerm) -> Result<kernel::Term, Error> {
        let mut vars = Vec::new();
        tm.vars(&mut vars);
        let mut avoid = self.avoid.clone();
        avoid.extend(vars.into_iter().filter(|v| !v.is_meta()).map(|v| v.name().clone()));
        self.convert(tm, &mut Stack::new(), &avoid)
    }

    fn convert(
        &self,
        tm: &ShadowTerm,
        binders: &mut Stack<kernel::Var>,
        avoid: &[Symbol],
    ) -> Result<kernel::Term, Error> {
        match tm {
            Term::Abs(ty, body) => {
                let x = kernel::Var::new(fresh(binders, avoid), self.ty(ty)?);
                let body = binders.with_pushed(x.clone(), |b| self.convert(body, b, avoid))?;
                Ok(self.kernel.make_abs(&x, body))
            }
            Term::App(f, x) => {
                let f = self.convert(f, binders, avoid)?;
                let x = self.convert(x, binders, avoid)?;
                Ok(self.kernel.make_app(f, x)?)
            }
            Term::Const(c, ty) => Ok(self.kernel.make_const_at(c.clone(), self.ty(ty)?)?),
            Term::Var(Meta::Plain(v)) => Ok(self.kernel.make_var(v.name.clone(), self.ty(&v.ty)?)),
            Term::Var(Meta::Fixed(v) | Meta::Unfixed(v)) => {
                let tm = self.subst.terms.get(&v.name).cloned();
                tm.ok_or_else(|| Error::Unassigned(v.name.clone()))
            }
            Term::Bound(i, _) => binders.get(*i).cloned().map(Term::Var).ok_or(Error::LooseBound),
        }
    }
}

/// Name for a binder that differs from all enclosing binders and all avoided names.
fn fresh(binders: &Stack<kernel::Var>, avoid: &[Symbol]) -> Symbol {
    let taken = |name: &str| {
        binders.iter().any(|b| b.name == *name) || avoid.iter().any(|a| a == name)
    };
    let mut i = binders.len();
    loop {
        let name = format!("x{}", i);
        if !taken(&name) {
            return Symbol::from(name);
        }
        i += 1;
    }
}
