//! Definitions of new constants and types.

use super::{Error, Kernel, Term, Theorem, Type, Var};
use crate::Symbol;
use alloc::vec::Vec;

impl Kernel {
    /// Define a new constant `c` equal to a closed term `t`, yielding `⊢ c = t`.
    ///
    /// All type variables of `t` must occur in the type of `t`.
    /// The theorem is recorded as [`Kernel::definition`] of `c`.
    pub fn new_basic_definition(
        &mut self,
        name: impl Into<Symbol>,
        term: &Term,
    ) -> Result<Theorem, Error> {
        let name = name.into();
        if term.has_vars() {
            return Err(Error::FreeVariables);
        }
        let ty = self.check_term(term)?;
        let mut tyvars = Vec::new();
        term.type_vars(&mut tyvars);
        if tyvars.iter().any(|v| !ty.contains(v)) {
            return Err(Error::HiddenTypeVariables);
        }

        self.declare_const(name.clone(), ty.clone())?;
        let c = Term::Const(name.clone(), ty);
        let thm = Theorem::new([], self.make_eq(c, term.clone())?);
        self.definitions.insert(name, thm.clone());
        Ok(thm)
    }

    /// Define a new type from a predicate `P : r -> bool` on an existing type `r`.
    ///
    /// The new type `ty` takes as arguments the type variables of `P`.
    /// It comes with a constructor `ctor : r -> ty` and a destructor `dtor : ty -> r`,
    /// characterised by the returned theorems
    /// `⊢ ctor (dtor a) = a` and `⊢ P r = (dtor (ctor r) = r)`.
    pub fn new_basic_type_definition(
        &mut self,
        name: impl Into<Symbol>,
        ctor: impl Into<Symbol>,
        dtor: impl Into<Symbol>,
        pred: &Term,
    ) -> Result<(Theorem, Theorem), Error> {
        let (name, ctor, dtor) = (name.into(), ctor.into(), dtor.into());
        if self.type_arity(&name).is_some() {
            return Err(Error::Reintroduction(name));
        }
        if let Some(c) = [&ctor, &dtor].into_iter().find(|c| self.const_type(c).is_some()) {
            return Err(Error::Reintroduction(c.clone()));
        }
        if ctor == dtor {
            return Err(Error::Reintroduction(dtor));
        }
        if pred.has_vars() {
            return Err(Error::FreeVariables);
        }
        let pred_ty = self.check_term(pred)?;
        let (rty, b) = pred_ty.dest_fun().ok_or(Error::NotAFunction)?;
        if !b.is_bool() {
            return Err(Error::NotBool);
        }

        let mut tyvars = Vec::new();
        pred.type_vars(&mut tyvars);
        let args: Vec<_> = tyvars.into_iter().map(|v| Type::Var(v.clone())).collect();
        self.define_type(name.clone(), args.len())?;
        let aty = Type::app(name, args);

        let ctor_ty = Type::fun(rty.clone(), aty.clone());
        let dtor_ty = Type::fun(aty.clone(), rty.clone());
        self.declare_const(ctor.clone(), ctor_ty.clone())?;
        self.declare_const(dtor.clone(), dtor_ty.clone())?;
        let (ctor_name, dtor_name) = (ctor.clone(), dtor.clone());
        let ctor = Term::Const(ctor, ctor_ty);
        let dtor = Term::Const(dtor, dtor_ty);

        let a = Term::Var(Var::new("a", aty));
        let r = Term::Var(Var::new("r", rty.clone()));

        let ctor_dtor = self.make_app(ctor.clone(), self.make_app(dtor.clone(), a.clone())?)?;
        let ctor_thm = Theorem::new([], self.make_eq(ctor_dtor, a)?);

        let dtor_ctor = self.make_app(dtor, self.make_app(ctor, r.clone())?)?;
        let lhs = self.make_app(pred.clone(), r.clone())?;
        let dtor_thm = Theorem::new([], self.make_eq(lhs, self.make_eq(dtor_ctor, r)?)?);

        self.constructors.insert(ctor_name, ctor_thm.clone());
        self.destructors.insert(dtor_name, dtor_thm.clone());
        Ok((ctor_thm, dtor_thm))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn basic_definition() -> Result<(), Error> {
        let mut k = Kernel::new();
        let x = Var::new("x", Type::bool());
        let id = k.make_abs(&x, Term::Var(x.clone()));
        let thm = k.new_basic_definition("id", &id)?;
        assert_eq!(thm.to_string(), "⊢ (id = (λ bool. β0))");
        assert_eq!(k.const_type("id"), Some(&Type::fun(Type::bool(), Type::bool())));
        assert_eq!(k.definition("id"), Some(&thm));

        assert!(matches!(k.new_basic_definition("id", &id), Err(Error::Reintroduction(_))));
        let free = Term::Var(x);
        assert!(matches!(k.new_basic_definition("c", &free), Err(Error::FreeVariables)));
        assert!(k.definition("c").is_none());
        Ok(())
    }

    #[test]
    fn hidden_type_variables() -> Result<(), Error> {
        let mut k = Kernel::new();
        // (λ y : a. y) = (λ y : a. y) has type bool, but mentions a
        let a = k.make_tyvar("a");
        let y = Var::new("y", a);
        let id = k.make_abs(&y, Term::Var(y.clone()));
        let tm = k.make_eq(id.clone(), id)?;
        assert!(matches!(k.new_basic_definition("c", &tm), Err(Error::HiddenTypeVariables)));
        Ok(())
    }

    #[test]
    fn basic_type_definition() -> Result<(), Error> {
        let mut k = Kernel::new();
        let a = k.make_tyvar("a");
        // λ x : a. x = x
        let x = Var::new("x", a.clone());
        let pred = k.make_abs(&x, k.make_eq(Term::Var(x.clone()), Term::Var(x.clone()))?);
        let (ctor_thm, dtor_thm) = k.new_basic_type_definition("wrap", "mk", "get", &pred)?;

        assert_eq!(k.type_arity("wrap"), Some(1));
        let wrap = k.make_type("wrap", Vec::from([a.clone()]))?;
        assert_eq!(k.const_type("mk"), Some(&Type::fun(a.clone(), wrap.clone())));
        assert_eq!(ctor_thm.to_string(), "⊢ ((mk (get a)) = a)");
        let (l, r) = dtor_thm.conclusion().dest_eq().unwrap();
        assert_eq!(l.dest_app().unwrap().0, &pred);
        assert_eq!(r.to_string(), "((get (mk r)) = r)");
        assert_eq!(k.constructor("mk"), Some(&ctor_thm));
        assert_eq!(k.destructor("get"), Some(&dtor_thm));
        assert!(k.constructor("get").is_none());

        let res = k.new_basic_type_definition("other", "mk", "get2", &pred);
        assert!(matches!(res, Err(Error::Reintroduction(_))));
        let res = k.new_basic_type_definition("other", "mk2", "get2", &Term::Var(x));
        assert!(matches!(res, Err(Error::FreeVariables)));
        Ok(())
    }
}
