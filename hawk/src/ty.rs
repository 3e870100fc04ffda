//! Types of higher-order logic, parametrised by their variables.

use crate::Symbol;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::convert::Infallible;
use core::fmt::{self, Display};

/// Name of the function type constructor.
pub const FUN: &str = "fun";
/// Name of the type of propositions.
pub const BOOL: &str = "bool";

/// Type with variables of type `V`.
///
/// Concrete types use plain names as variables,
/// whereas shadow types use meta-variables.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Type<V> {
    /// type constructor applied to arguments, such as `fun<a, bool>`
    App(Symbol, Rc<[Type<V>]>),
    Var(V),
}

impl<V> Type<V> {
    /// Apply a type constructor to arguments, without checking its arity.
    pub fn app(name: Symbol, args: Vec<Self>) -> Self {
        Self::App(name, Rc::from(args))
    }

    /// Construct the function type `a -> b`.
    pub fn fun(a: Self, b: Self) -> Self {
        Self::app(Symbol::from(FUN), Vec::from([a, b]))
    }

    /// Construct the type of propositions.
    pub fn bool() -> Self {
        Self::app(Symbol::from(BOOL), Vec::new())
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, Self::App(name, args) if name == BOOL && args.is_empty())
    }

    /// For a function type `a -> b`, return `a` and `b`.
    pub fn dest_fun(&self) -> Option<(&Self, &Self)> {
        match self {
            Self::App(name, args) if name == FUN => match &**args {
                [a, b] => Some((a, b)),
                _ => None,
            },
            _ => None,
        }
    }

    /// Replace all variables by types, failing if any replacement fails.
    pub fn try_map<W, E, F>(&self, f: &mut F) -> Result<Type<W>, E>
    where
        F: FnMut(&V) -> Result<Type<W>, E>,
    {
        match self {
            Self::App(name, args) => {
                let args = args.iter().map(|a| a.try_map(f)).collect::<Result<_, _>>()?;
                Ok(Type::app(name.clone(), args))
            }
            Self::Var(v) => f(v),
        }
    }

    /// Replace all variables by types.
    pub fn map<W, F>(&self, f: &mut F) -> Type<W>
    where
        F: FnMut(&V) -> Type<W>,
    {
        match self.try_map(&mut |v| Ok::<_, Infallible>(f(v))) {
            Ok(ty) => ty,
            Err(e) => match e {},
        }
    }

    /// Collect the type variables in order of their first occurrence.
    pub fn vars<'a>(&'a self, acc: &mut Vec<&'a V>)
    where
        V: PartialEq,
    {
        match self {
            Self::App(_, args) => args.iter().for_each(|a| a.vars(acc)),
            Self::Var(v) if !acc.contains(&v) => acc.push(v),
            Self::Var(_) => (),
        }
    }

    /// Return true if the type variable occurs in the type.
    pub fn contains(&self, var: &V) -> bool
    where
        V: PartialEq,
    {
        match self {
            Self::App(_, args) => args.iter().any(|a| a.contains(var)),
            Self::Var(v) => v == var,
        }
    }
}

impl<V: Display> Display for Type<V> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if let Some((a, b)) = self.dest_fun() {
            return write!(f, "({} -> {})", a, b);
        }
        match self {
            Self::Var(v) => v.fmt(f),
            Self::App(name, args) if args.is_empty() => name.fmt(f),
            Self::App(name, args) => {
                write!(f, "{}<", name)?;
                for (i, a) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    a.fmt(f)?;
                }
                write!(f, ">")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    type Ty = Type<Symbol>;

    fn var(s: &str) -> Ty {
        Type::Var(Symbol::from(s))
    }

    #[test]
    fn fun_parts() {
        let ty = Ty::fun(var("a"), Ty::bool());
        let (a, b) = ty.dest_fun().unwrap();
        assert_eq!(a, &var("a"));
        assert!(b.is_bool());
        assert!(var("a").dest_fun().is_none());
    }

    #[test]
    fn vars_in_order() {
        let ty = Ty::fun(var("b"), Ty::fun(var("a"), var("b")));
        let mut vars = Vec::new();
        ty.vars(&mut vars);
        assert_eq!(vars, [&Symbol::from("b"), &Symbol::from("a")]);
        assert!(ty.contains(&Symbol::from("a")));
    }

    #[test]
    fn map_vars() {
        let ty = Ty::fun(var("a"), var("a"));
        let inst = ty.map(&mut |_| Ty::bool());
        assert_eq!(inst, Ty::fun(Ty::bool(), Ty::bool()));
        assert_eq!(ty.to_string(), "(a -> a)");
        assert_eq!(Ty::app("pair".into(), [var("a"), Ty::bool()].into()).to_string(), "pair<a, bool>");
    }
}
