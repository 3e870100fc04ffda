//! The trusted kernel, the only producer of theorems.
//!
//! The kernel keeps track of the arities of type constructors and
//! the types of constants.
//! Its factory functions construct types and terms,
//! checking that they are well-formed.
//! Its inference rules are the only functions that construct [`Theorem`]s,
//! so every theorem is derivable from axioms and definitions.
//! Because terms can also be built without the factory functions,
//! the rules check every term they receive, see [`Kernel::check_term`].
//!
//! ~~~
//! # use hawk::kernel::{Kernel, Type};
//! let kernel = Kernel::new();
//! let p = kernel.make_var("p", Type::bool());
//! let thm = kernel.reflexivity(&p)?;
//! assert!(thm.premises().is_empty());
//! assert_eq!(thm.to_string(), "⊢ (p = p)");
//! # Ok::<_, hawk::kernel::Error>(())
//! ~~~

mod check;
mod define;
mod rules;
mod theorem;

pub use theorem::Theorem;

use crate::subst::FnvHashMap;
use crate::{ty, Symbol};
use alloc::vec::Vec;

/// Concrete type, with named type variables.
pub type Type = crate::Type<Symbol>;
/// Concrete free variable.
pub type Var = crate::Free<Type>;
/// Concrete term.
pub type Term = crate::Term<Var, Type>;
/// Unproven goal.
pub type Conjecture = crate::Sequent<Term>;
/// Instantiation of free variables and type variables of a theorem.
pub type Subst = crate::Subst<Var, Term, Type>;

#[derive(Debug)]
pub enum Error {
    Reintroduction(Symbol),
    UnknownType(Symbol),
    UnknownConst(Symbol),
    /// type constructor applied to wrong number of arguments
    Arity(Symbol),
    /// constant used at a type that is not an instance of its declared type
    ConstType(Symbol),
    NotAFunction,
    TypeMismatch,
    NotBool,
    NotAnEquation,
    /// abstracted variable occurs in a premise
    Capture(Var),
    /// left-hand side of major premise differs from minor premise
    PremiseMismatch,
    FreeVariables,
    /// type variables occur in a definition, but not in its type
    HiddenTypeVariables,
    LooseBound,
}

/// Registry of type constructors and constants,
/// together with the theorems that introduced them.
#[derive(Clone, Debug)]
pub struct Kernel {
    types: FnvHashMap<Symbol, usize>,
    consts: FnvHashMap<Symbol, Type>,
    axioms: Vec<Theorem>,
    definitions: FnvHashMap<Symbol, Theorem>,
    constructors: FnvHashMap<Symbol, Theorem>,
    destructors: FnvHashMap<Symbol, Theorem>,
}

impl Default for Kernel {
    fn default() -> Self {
        let a = Type::Var(Symbol::from("a"));
        let eq = Type::fun(a.clone(), Type::fun(a, Type::bool()));
        let mut types = FnvHashMap::default();
        types.insert(Symbol::from(ty::FUN), 2);
        types.insert(Symbol::from(ty::BOOL), 0);
        let mut consts = FnvHashMap::default();
        consts.insert(Symbol::from(crate::term::EQ), eq);
        Self {
            types,
            consts,
            axioms: Vec::new(),
            definitions: FnvHashMap::default(),
            constructors: FnvHashMap::default(),
            destructors: FnvHashMap::default(),
        }
    }
}

impl Kernel {
    /// Construct a kernel that knows only functions, propositions, and equality.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the arity of a type constructor.
    pub fn type_arity(&self, name: &str) -> Option<usize> {
        self.types.get(name).copied()
    }

    /// Return the declared type of a constant.
    pub fn const_type(&self, name: &str) -> Option<&Type> {
        self.consts.get(name)
    }

    /// Theorems accepted without proof, in the order they were accepted.
    pub fn axioms(&self) -> &[Theorem] {
        &self.axioms
    }

    /// Return the theorem `⊢ c = t` that defined the constant `c`.
    pub fn definition(&self, name: &str) -> Option<&Theorem> {
        self.definitions.get(name)
    }

    /// Return the theorem `⊢ ctor (dtor a) = a` about a type constructor `ctor`.
    pub fn constructor(&self, name: &str) -> Option<&Theorem> {
        self.constructors.get(name)
    }

    /// Return the theorem `⊢ P r = (dtor (ctor r) = r)` about a type destructor `dtor`.
    pub fn destructor(&self, name: &str) -> Option<&Theorem> {
        self.destructors.get(name)
    }

    /// Introduce a new type constructor with the given number of arguments.
    pub fn define_type(&mut self, name: impl Into<Symbol>, arity: usize) -> Result<(), Error> {
        let name = name.into();
        if self.types.contains_key(&name) {
            return Err(Error::Reintroduction(name));
        }
        debug!("new type {} of arity {}", name, arity);
        self.types.insert(name, arity);
        Ok(())
    }

    /// Introduce a new constant of the given type.
    pub fn declare_const(&mut self, name: impl Into<Symbol>, ty: Type) -> Result<(), Error> {
        let name = name.into();
        if self.consts.contains_key(&name) {
            return Err(Error::Reintroduction(name));
        }
        debug!("new constant {} : {}", name, ty);
        self.consts.insert(name, ty);
        Ok(())
    }

    /// Apply a type constructor to arguments.
    pub fn make_type(&self, name: impl Into<Symbol>, args: Vec<Type>) -> Result<Type, Error> {
        let name = name.into();
        match self.type_arity(&name) {
            None => Err(Error::UnknownType(name)),
            Some(arity) if arity != args.len() => Err(Error::Arity(name)),
            Some(_) => {
                args.iter().try_for_each(|a| self.check_type(a))?;
                Ok(Type::app(name, args))
            }
        }
    }

    pub fn make_tyvar(&self, name: impl Into<Symbol>) -> Type {
        Type::Var(name.into())
    }

    pub fn make_fun(&self, a: Type, b: Type) -> Type {
        Type::fun(a, b)
    }

    pub fn make_bool(&self) -> Type {
        Type::bool()
    }

    pub fn make_var(&self, name: impl Into<Symbol>, ty: Type) -> Term {
        Term::Var(Var::new(name, ty))
    }

    /// Construct a constant, instantiating the type variables of its declared type.
    ///
    /// Type variables that are not instantiated remain unchanged.
    pub fn make_const(
        &self,
        name: impl Into<Symbol>,
        tymap: &FnvHashMap<Symbol, Type>,
    ) -> Result<Term, Error> {
        let name = name.into();
        let ty = self.const_type(&name).ok_or_else(|| Error::UnknownConst(name.clone()))?;
        let ty = ty.map(&mut |v| tymap.get(v).cloned().unwrap_or_else(|| Type::Var(v.clone())));
        Ok(Term::Const(name, ty))
    }

    /// Construct a constant at a given instance of its declared type.
    pub fn make_const_at(&self, name: impl Into<Symbol>, ty: Type) -> Result<Term, Error> {
        let name = name.into();
        self.check_type(&ty)?;
        let declared = self.const_type(&name).ok_or_else(|| Error::UnknownConst(name.clone()))?;
        if !Subst::new().match_type(declared, &ty) {
            return Err(Error::ConstType(name));
        }
        Ok(Term::Const(name, ty))
    }

    /// Construct the application `f x`.
    pub fn make_app(&self, f: Term, x: Term) -> Result<Term, Error> {
        let fty = f.type_of().ok_or(Error::NotAFunction)?;
        let (dom, _) = fty.dest_fun().ok_or(Error::NotAFunction)?;
        if x.type_of().as_ref() != Some(dom) {
            return Err(Error::TypeMismatch);
        }
        Ok(Term::app(f, x))
    }

    /// Construct the abstraction `λ var. body`.
    pub fn make_abs(&self, var: &Var, body: Term) -> Term {
        Term::abs(var.ty.clone(), body.bind(var, 0))
    }

    /// Construct the equation `l = r`.
    pub fn make_eq(&self, l: Term, r: Term) -> Result<Term, Error> {
        let ty = l.type_of().ok_or(Error::NotAFunction)?;
        if r.type_of().as_ref() != Some(&ty) {
            return Err(Error::TypeMismatch);
        }
        let eq_ty = Type::fun(ty.clone(), Type::fun(ty, Type::bool()));
        let eq = Term::Const(Symbol::from(crate::term::EQ), eq_ty);
        Ok(Term::app(Term::app(eq, l), r))
    }
}
