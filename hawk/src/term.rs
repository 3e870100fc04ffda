//! Terms of higher-order logic with de Bruijn indices.

use crate::free::Variable;
use crate::{Symbol, Type};
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::convert::Infallible;
use core::fmt::{self, Display};

/// De Bruijn variable.
pub type DeBruijn = usize;

/// Name of the equality constant.
pub const EQ: &str = "=";

/// Term with variables of type `V` and types of type `Ty`.
///
/// Bound variables carry their types, so
/// the type of every term can be read off without a context.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Term<V, Ty> {
    /// abstraction over a variable of the given type
    Abs(Ty, Rc<Self>),
    App(Rc<Self>, Rc<Self>),
    Const(Symbol, Ty),
    Var(V),
    Bound(DeBruijn, Ty),
}

impl<V, Ty> Term<V, Ty> {
    pub(crate) fn abs(ty: Ty, body: Self) -> Self {
        Self::Abs(ty, Rc::new(body))
    }

    pub(crate) fn app(f: Self, x: Self) -> Self {
        Self::App(Rc::new(f), Rc::new(x))
    }

    /// For an application `f x`, return `f` and `x`.
    pub fn dest_app(&self) -> Option<(&Self, &Self)> {
        match self {
            Self::App(f, x) => Some((f, x)),
            _ => None,
        }
    }

    /// For an equation `l = r`, return `l` and `r`.
    pub fn dest_eq(&self) -> Option<(&Self, &Self)> {
        let (eq_l, r) = self.dest_app()?;
        match eq_l.dest_app()? {
            (Self::Const(c, _), l) if c == EQ => Some((l, r)),
            _ => None,
        }
    }

    /// Replace variables by terms and types by types,
    /// failing if any replacement fails.
    ///
    /// The terms that variables are replaced with should not
    /// contain loose bound variables, because they are not shifted.
    pub fn try_map<W, U, E, FV, FT>(&self, fv: &mut FV, ft: &mut FT) -> Result<Term<W, U>, E>
    where
        FV: FnMut(&V) -> Result<Term<W, U>, E>,
        FT: FnMut(&Ty) -> Result<U, E>,
    {
        Ok(match self {
            Self::Abs(ty, body) => Term::abs(ft(ty)?, body.try_map(fv, ft)?),
            Self::App(f, x) => Term::app(f.try_map(fv, ft)?, x.try_map(fv, ft)?),
            Self::Const(c, ty) => Term::Const(c.clone(), ft(ty)?),
            Self::Var(v) => fv(v)?,
            Self::Bound(i, ty) => Term::Bound(*i, ft(ty)?),
        })
    }

    /// Replace variables by terms and types by types.
    pub fn map<W, U, FV, FT>(&self, fv: &mut FV, ft: &mut FT) -> Term<W, U>
    where
        FV: FnMut(&V) -> Term<W, U>,
        FT: FnMut(&Ty) -> U,
    {
        let fv = &mut |v: &V| Ok::<_, Infallible>(fv(v));
        let ft = &mut |ty: &Ty| Ok::<_, Infallible>(ft(ty));
        match self.try_map(fv, ft) {
            Ok(tm) => tm,
            Err(e) => match e {},
        }
    }

    /// Call a function on every type annotation in the term.
    pub fn for_each_type<'a, F: FnMut(&'a Ty)>(&'a self, f: &mut F)
    where
        V: Variable<Ty = Ty>,
    {
        match self {
            Self::Abs(ty, body) => {
                f(ty);
                body.for_each_type(f)
            }
            Self::App(l, r) => {
                l.for_each_type(f);
                r.for_each_type(f)
            }
            Self::Const(_, ty) | Self::Bound(_, ty) => f(ty),
            Self::Var(v) => f(v.ty()),
        }
    }

    /// Return true if the variable occurs in the term.
    pub fn contains(&self, var: &V) -> bool
    where
        V: PartialEq,
    {
        match self {
            Self::Abs(_, body) => body.contains(var),
            Self::App(f, x) => f.contains(var) || x.contains(var),
            Self::Var(v) => v == var,
            Self::Const(..) | Self::Bound(..) => false,
        }
    }

    /// Return true if any variable occurs in the term.
    pub fn has_vars(&self) -> bool {
        match self {
            Self::Abs(_, body) => body.has_vars(),
            Self::App(f, x) => f.has_vars() || x.has_vars(),
            Self::Var(_) => true,
            Self::Const(..) | Self::Bound(..) => false,
        }
    }

    /// Collect the variables of the term in order of their first occurrence.
    pub fn vars<'a>(&'a self, acc: &mut Vec<&'a V>)
    where
        V: PartialEq,
    {
        match self {
            Self::Abs(_, body) => body.vars(acc),
            Self::App(f, x) => {
                f.vars(acc);
                x.vars(acc)
            }
            Self::Var(v) if !acc.contains(&v) => acc.push(v),
            Self::Var(_) | Self::Const(..) | Self::Bound(..) => (),
        }
    }

    /// Return true if the term refers to a binder
    /// that lies outside of it when entered at the given depth.
    ///
    /// For a term that was reached by descending through `depth` abstractions,
    /// this decides whether the term depends on those abstractions.
    pub fn has_loose_bound(&self, depth: DeBruijn) -> bool {
        match self {
            Self::Abs(_, body) => body.has_loose_bound(depth + 1),
            Self::App(f, x) => f.has_loose_bound(depth) || x.has_loose_bound(depth),
            Self::Bound(i, _) => *i >= depth,
            Self::Const(..) | Self::Var(_) => false,
        }
    }

    /// Replace all occurrences of the variable by the bound variable
    /// pointing to the abstraction `depth` levels above.
    ///
    /// This is used to close an abstraction over a variable:
    /// the body of `λ x. t` is `t.bind(x, 0)`.
    pub fn bind(&self, var: &V, depth: DeBruijn) -> Self
    where
        V: Clone + PartialEq + Variable<Ty = Ty>,
        Ty: Clone,
    {
        match self {
            Self::Abs(ty, body) => Self::abs(ty.clone(), body.bind(var, depth + 1)),
            Self::App(f, x) => Self::app(f.bind(var, depth), x.bind(var, depth)),
            Self::Var(v) if v == var => Self::Bound(depth, v.ty().clone()),
            _ => self.clone(),
        }
    }

    /// Replace the bound variable pointing to the abstraction
    /// `depth` levels above by the given variable.
    ///
    /// This is the inverse of [`Term::bind`], used to open an abstraction:
    /// for an abstraction `λ. t` and a fresh variable `x`,
    /// `t.open(x, 0)` is its body.
    pub fn open(&self, var: &V, depth: DeBruijn) -> Self
    where
        V: Clone,
        Ty: Clone,
    {
        match self {
            Self::Abs(ty, body) => Self::abs(ty.clone(), body.open(var, depth + 1)),
            Self::App(f, x) => Self::app(f.open(var, depth), x.open(var, depth)),
            Self::Bound(i, _) if *i == depth => Self::Var(var.clone()),
            _ => self.clone(),
        }
    }
}

impl<V, L> Term<V, Type<L>>
where
    V: Variable<Ty = Type<L>>,
    L: Clone,
{
    /// Derive the type of a term.
    ///
    /// This fails only if the term applies a non-function,
    /// which cannot happen for terms built by the kernel.
    pub fn type_of(&self) -> Option<Type<L>> {
        match self {
            Self::Abs(ty, body) => Some(Type::fun(ty.clone(), body.type_of()?)),
            Self::App(f, _) => Some(f.type_of()?.dest_fun()?.1.clone()),
            Self::Const(_, ty) | Self::Bound(_, ty) => Some(ty.clone()),
            Self::Var(v) => Some(v.ty().clone()),
        }
    }

    /// Collect the type variables of the term in order of their first occurrence.
    pub fn type_vars<'a>(&'a self, acc: &mut Vec<&'a L>)
    where
        L: PartialEq,
    {
        self.for_each_type(&mut |ty| ty.vars(acc))
    }
}

impl<V: Display, Ty: Display> Display for Term<V, Ty> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if let Some((l, r)) = self.dest_eq() {
            return write!(f, "({} = {})", l, r);
        }
        match self {
            Self::Abs(ty, body) => write!(f, "(λ {}. {})", ty, body),
            Self::App(l, r) => write!(f, "({} {})", l, r),
            Self::Const(c, _) => c.fmt(f),
            Self::Var(v) => v.fmt(f),
            Self::Bound(i, _) => write!(f, "β{}", i),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Free;
    use alloc::string::ToString;

    type Ty = Type<Symbol>;
    type Tm = Term<Free<Ty>, Ty>;

    fn a() -> Ty {
        Type::Var(Symbol::from("a"))
    }

    fn free(name: &str) -> Free<Ty> {
        Free::new(name, a())
    }

    #[test]
    fn bind_open() {
        let x = free("x");
        let f = Tm::Var(Free::new("f", Ty::fun(a(), a())));
        let body = Tm::app(f.clone(), Tm::Var(x.clone()));

        let bound = body.bind(&x, 0);
        assert_eq!(bound, Tm::app(f.clone(), Tm::Bound(0, a())));
        assert!(bound.has_loose_bound(0));
        assert!(!Tm::abs(a(), bound.clone()).has_loose_bound(0));
        assert!(!bound.contains(&x));
        assert_eq!(bound.open(&x, 0), body);
    }

    #[test]
    fn bind_under_binder() {
        let x = free("x");
        // λ y. x
        let tm = Tm::abs(a(), Tm::Var(x.clone()));
        assert_eq!(tm.bind(&x, 0), Tm::abs(a(), Tm::Bound(1, a())));
    }

    #[test]
    fn types() {
        let x = free("x");
        let id = Tm::abs(a(), Tm::Bound(0, a()));
        assert_eq!(id.type_of(), Some(Ty::fun(a(), a())));
        let app = Tm::app(id.clone(), Tm::Var(x.clone()));
        assert_eq!(app.type_of(), Some(a()));
        assert_eq!(Tm::app(Tm::Var(x.clone()), Tm::Var(x)).type_of(), None);
    }

    #[test]
    fn vars() {
        let (x, y) = (free("x"), free("y"));
        let tm = Tm::app(Tm::app(Tm::Var(y.clone()), Tm::Var(x.clone())), Tm::Var(y.clone()));
        let mut acc = Vec::new();
        tm.vars(&mut acc);
        assert_eq!(acc, [&y, &x]);
        assert!(tm.has_vars());
        assert!(!Tm::Const("c".into(), a()).has_vars());
    }

    #[test]
    fn display() {
        let eq_ty = Ty::fun(a(), Ty::fun(a(), Ty::bool()));
        let eq = Tm::Const(Symbol::from(EQ), eq_ty);
        let x = Tm::Var(free("x"));
        let tm = Tm::app(Tm::app(eq, x.clone()), Tm::abs(a(), Tm::Bound(0, a())));
        assert_eq!(tm.to_string(), "(x = (λ a. β0))");
    }
}
