//! Well-formedness of types and terms that enter the kernel.
//!
//! Terms can be built by anyone from the constructors of [`Term`],
//! so every term that a rule turns into a theorem is checked first.

use super::{Error, Kernel, Subst, Term, Type};
use crate::Stack;

impl Kernel {
    /// Succeed if every type constructor in the type is declared with its arity.
    pub fn check_type(&self, ty: &Type) -> Result<(), Error> {
        match ty {
            Type::Var(_) => Ok(()),
            Type::App(name, args) => match self.type_arity(name) {
                None => Err(Error::UnknownType(name.clone())),
                Some(arity) if arity != args.len() => Err(Error::Arity(name.clone())),
                Some(_) => args.iter().try_for_each(|a| self.check_type(a)),
            },
        }
    }

    /// Return the type of a well-formed term.
    ///
    /// A term is well-formed if
    /// its bound variables refer to enclosing abstractions of the same type,
    /// its constants are declared and used at instances of their declared types,
    /// its types are well-formed, and
    /// it applies only functions to arguments of their input type.
    ///
    /// ~~~
    /// # use hawk::kernel::{Error, Kernel, Term, Type};
    /// let k = Kernel::new();
    /// let x = k.make_var("x", Type::bool());
    /// assert_eq!(k.check_term(&x)?, Type::bool());
    /// let loose = Term::Bound(0, Type::bool());
    /// assert!(matches!(k.check_term(&loose), Err(Error::LooseBound)));
    /// # Ok::<_, Error>(())
    /// ~~~
    pub fn check_term(&self, tm: &Term) -> Result<Type, Error> {
        self.check_under(tm, &mut Stack::new())
    }

    fn check_under<'a>(&self, tm: &'a Term, binders: &mut Stack<&'a Type>) -> Result<Type, Error> {
        match tm {
            Term::Abs(ty, body) => {
                self.check_type(ty)?;
                let body_ty = binders.with_pushed(ty, |b| self.check_under(body, b))?;
                Ok(Type::fun(ty.clone(), body_ty))
            }
            Term::App(f, x) => {
                let fty = self.check_under(f, binders)?;
                let xty = self.check_under(x, binders)?;
                let (dom, cod) = fty.dest_fun().ok_or(Error::NotAFunction)?;
                if *dom != xty {
                    return Err(Error::TypeMismatch);
                }
                Ok(cod.clone())
            }
            Term::Const(c, ty) => {
                self.check_type(ty)?;
                let declared = self.const_type(c).ok_or_else(|| Error::UnknownConst(c.clone()))?;
                if !Subst::new().match_type(declared, ty) {
                    return Err(Error::ConstType(c.clone()));
                }
                Ok(ty.clone())
            }
            Term::Var(v) => {
                self.check_type(&v.ty)?;
                Ok(v.ty.clone())
            }
            Term::Bound(i, ty) => match binders.get(*i) {
                None => Err(Error::LooseBound),
                Some(binder) if *binder != ty => Err(Error::TypeMismatch),
                Some(_) => Ok(ty.clone()),
            },
        }
    }

    /// Succeed if the term is well-formed and a proposition.
    pub(super) fn check_prop(&self, tm: &Term) -> Result<(), Error> {
        if self.check_term(tm)?.is_bool() {
            Ok(())
        } else {
            Err(Error::NotBool)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::Var;
    use alloc::vec::Vec;

    #[test]
    fn ill_formed() {
        let k = Kernel::new();
        let b = Type::bool();
        let nosuch = Type::app("nosuch".into(), Vec::new());
        assert!(matches!(k.check_type(&nosuch), Err(Error::UnknownType(_))));
        let bad_bool = Type::app("bool".into(), Vec::from([b.clone()]));
        assert!(matches!(k.check_type(&bad_bool), Err(Error::Arity(_))));

        let c = Term::Const("undeclared".into(), b.clone());
        assert!(matches!(k.check_term(&c), Err(Error::UnknownConst(_))));
        let eq = Term::Const("=".into(), b.clone());
        assert!(matches!(k.check_term(&eq), Err(Error::ConstType(_))));

        let x = Var::new("x", nosuch);
        assert!(matches!(k.check_term(&Term::Var(x)), Err(Error::UnknownType(_))));

        // binder of type bool -> bool, but bound variable of type bool
        let fty = Type::fun(b.clone(), b.clone());
        let wrong = Term::abs(fty, Term::Bound(0, b.clone()));
        assert!(matches!(k.check_term(&wrong), Err(Error::TypeMismatch)));

        let p = Term::Var(Var::new("p", b.clone()));
        let pp = Term::app(p.clone(), p);
        assert!(matches!(k.check_term(&pp), Err(Error::NotAFunction)));
    }

    #[test]
    fn well_formed() -> Result<(), Error> {
        let k = Kernel::new();
        let a = k.make_tyvar("a");
        let x = Var::new("x", a.clone());
        // λ x. λ y. x
        let inner = k.make_abs(&Var::new("y", Type::bool()), Term::Var(x.clone()));
        let konst = k.make_abs(&x, inner);
        assert!(matches!(konst, Term::Abs(..)));
        let ty = k.check_term(&konst)?;
        assert_eq!(ty, Type::fun(a.clone(), Type::fun(Type::bool(), a)));
        Ok(())
    }
}
