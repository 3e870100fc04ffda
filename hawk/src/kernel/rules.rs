//! Primitive inference rules.

use super::{Conjecture, Error, Kernel, Subst, Term, Theorem, Type, Var};

/// Premises of two theorems.
fn union<'a>(l: &'a Theorem, r: &'a Theorem) -> impl Iterator<Item = Term> + 'a {
    l.premises().iter().chain(r.premises()).cloned()
}

fn dest_eq(thm: &Theorem) -> Result<(&Term, &Term), Error> {
    thm.conclusion().dest_eq().ok_or(Error::NotAnEquation)
}

impl Kernel {
    /// `⊢ t = t`
    pub fn reflexivity(&self, t: &Term) -> Result<Theorem, Error> {
        trace!("reflexivity: {}", t);
        self.check_term(t)?;
        Ok(Theorem::new([], self.make_eq(t.clone(), t.clone())?))
    }

    /// From `⊢ f = g` and `⊢ x = y`, derive `⊢ f x = g y`.
    pub fn congruence(&self, fg: &Theorem, xy: &Theorem) -> Result<Theorem, Error> {
        trace!("congruence: {} and {}", fg, xy);
        let (f, g) = dest_eq(fg)?;
        let (x, y) = dest_eq(xy)?;
        let fx = self.make_app(f.clone(), x.clone())?;
        let gy = self.make_app(g.clone(), y.clone())?;
        Ok(Theorem::new(union(fg, xy), self.make_eq(fx, gy)?))
    }

    /// From `⊢ p = q`, derive `⊢ (λ v. p) = (λ v. q)`.
    ///
    /// Fails if `v` occurs in any premise.
    pub fn abstraction(&self, v: &Var, thm: &Theorem) -> Result<Theorem, Error> {
        trace!("abstraction over {}: {}", v, thm);
        self.check_type(&v.ty)?;
        if thm.premises().iter().any(|p| p.contains(v)) {
            return Err(Error::Capture(v.clone()));
        }
        let (p, q) = dest_eq(thm)?;
        let (p, q) = (self.make_abs(v, p.clone()), self.make_abs(v, q.clone()));
        Ok(Theorem::new(thm.premises().iter().cloned(), self.make_eq(p, q)?))
    }

    /// From `⊢ p = q`, derive `⊢ (λ ty. p) = (λ ty. q)`,
    /// where the abstraction binds no variable.
    pub fn type_abstraction(&self, ty: &Type, thm: &Theorem) -> Result<Theorem, Error> {
        trace!("abstraction over type {}: {}", ty, thm);
        self.check_type(ty)?;
        let (p, q) = dest_eq(thm)?;
        let p = Term::abs(ty.clone(), p.clone());
        let q = Term::abs(ty.clone(), q.clone());
        Ok(Theorem::new(thm.premises().iter().cloned(), self.make_eq(p, q)?))
    }

    /// `⊢ (λ v. body) v = body`
    pub fn beta_reduction(&self, v: &Var, body: &Term) -> Result<Theorem, Error> {
        trace!("beta reduction: {} in {}", v, body);
        self.check_type(&v.ty)?;
        self.check_term(body)?;
        let redex = self.make_app(self.make_abs(v, body.clone()), Term::Var(v.clone()))?;
        Ok(Theorem::new([], self.make_eq(redex, body.clone())?))
    }

    /// `p ⊢ p`
    pub fn assume(&self, p: &Term) -> Result<Theorem, Error> {
        trace!("assume: {}", p);
        self.check_prop(p)?;
        Ok(Theorem::new([p.clone()], p.clone()))
    }

    /// From `⊢ p = q` and `⊢ p`, derive `⊢ q`.
    pub fn eq_modus_ponens(&self, major: &Theorem, minor: &Theorem) -> Result<Theorem, Error> {
        trace!("modus ponens: {} and {}", major, minor);
        let (p, q) = dest_eq(major)?;
        if p != minor.conclusion() {
            return Err(Error::PremiseMismatch);
        }
        Ok(Theorem::new(union(major, minor), q.clone()))
    }

    /// From `q ⊢ p` and `p ⊢ q`, derive `⊢ p = q`.
    ///
    /// The conclusion of each theorem is discharged from the premises of the other.
    pub fn antisymmetry(&self, left: &Theorem, right: &Theorem) -> Result<Theorem, Error> {
        trace!("antisymmetry: {} and {}", left, right);
        let (p, q) = (left.conclusion(), right.conclusion());
        let lp = left.premises().iter().filter(|x| *x != q);
        let rp = right.premises().iter().filter(|x| *x != p);
        let conclusion = self.make_eq(p.clone(), q.clone())?;
        Ok(Theorem::new(lp.chain(rp).cloned(), conclusion))
    }

    /// Simultaneously instantiate the free variables and type variables of a theorem.
    ///
    /// The variables in the substitution refer to
    /// the variables of the theorem *before* type instantiation.
    /// Each replacing term must have the instantiated type of its variable.
    pub fn instantiate(&self, thm: &Theorem, subst: &Subst) -> Result<Theorem, Error> {
        subst.types.values().try_for_each(|ty| self.check_type(ty))?;
        let inst_ty = |ty: &Type| {
            ty.map(&mut |v| subst.types.get(v).cloned().unwrap_or_else(|| Type::Var(v.clone())))
        };
        let mut fv = |v: &Var| -> Result<Term, Error> {
            let ty = inst_ty(&v.ty);
            match subst.terms.get(v) {
                None => Ok(Term::Var(Var::new(v.name.clone(), ty))),
                Some(tm) => {
                    if self.check_term(tm)? != ty {
                        return Err(Error::TypeMismatch);
                    }
                    Ok(tm.clone())
                }
            }
        };
        let mut ft = |ty: &Type| Ok(inst_ty(ty));
        let sequent = thm.try_map(|tm| tm.try_map(&mut fv, &mut ft))?;
        Ok(Theorem::from_sequent(sequent))
    }

    /// Accept a sequent as a theorem without proof.
    ///
    /// The axiom is recorded in [`Kernel::axioms`].
    pub fn new_axiom(&mut self, conj: &Conjecture) -> Result<Theorem, Error> {
        conj.premises().iter().try_for_each(|p| self.check_prop(p))?;
        self.check_prop(conj.conclusion())?;
        debug!("new axiom: {}", conj);
        let thm = Theorem::from_sequent(conj.clone());
        self.axioms.push(thm.clone());
        Ok(thm)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    fn bool_var(k: &Kernel, name: &str) -> Term {
        k.make_var(name, Type::bool())
    }

    #[test]
    fn reflexivity() -> Result<(), Error> {
        let k = Kernel::new();
        let p = bool_var(&k, "p");
        let thm = k.reflexivity(&p)?;
        assert!(thm.premises().is_empty());
        assert_eq!(thm.conclusion(), &k.make_eq(p.clone(), p)?);
        Ok(())
    }

    #[test]
    fn congruence() -> Result<(), Error> {
        let k = Kernel::new();
        let a = k.make_tyvar("a");
        let fty = Type::fun(a.clone(), a.clone());
        let (f, g) = (k.make_var("f", fty.clone()), k.make_var("g", fty));
        let (x, y) = (k.make_var("x", a.clone()), k.make_var("y", a));

        let fg = k.assume(&k.make_eq(f, g)?)?;
        let xy = k.assume(&k.make_eq(x, y)?)?;
        let thm = k.congruence(&fg, &xy)?;
        assert_eq!(thm.to_string(), "(f = g), (x = y) ⊢ ((f x) = (g y))");

        // the argument theorem must equate arguments of the function's input type
        let pq = k.assume(&k.make_eq(bool_var(&k, "p"), bool_var(&k, "q"))?)?;
        assert!(matches!(k.congruence(&fg, &pq), Err(Error::TypeMismatch)));
        assert!(matches!(k.congruence(&fg, &k.assume(&bool_var(&k, "p"))?), Err(Error::NotAnEquation)));
        Ok(())
    }

    #[test]
    fn abstraction() -> Result<(), Error> {
        let k = Kernel::new();
        let a = k.make_tyvar("a");
        let x = Var::new("x", a.clone());
        let y = k.make_var("y", a.clone());
        let refl = k.reflexivity(&Term::Var(x.clone()))?;
        let thm = k.abstraction(&x, &refl)?;
        let id = Term::abs(a.clone(), Term::Bound(0, a.clone()));
        assert_eq!(thm.conclusion(), &k.make_eq(id.clone(), id)?);

        let hyp = k.assume(&k.make_eq(Term::Var(x.clone()), y)?)?;
        assert!(matches!(k.abstraction(&x, &hyp), Err(Error::Capture(_))));

        // abstraction over type binds nothing
        let thm = k.type_abstraction(&a, &hyp)?;
        let (l, _) = thm.conclusion().dest_eq().unwrap();
        assert_eq!(l, &Term::abs(a.clone(), Term::Var(x)));
        assert_eq!(thm.premises(), hyp.premises());
        Ok(())
    }

    #[test]
    fn beta_reduction() -> Result<(), Error> {
        let k = Kernel::new();
        let x = Var::new("x", Type::bool());
        let body = k.make_eq(Term::Var(x.clone()), bool_var(&k, "q"))?;
        let thm = k.beta_reduction(&x, &body)?;
        let (redex, reduct) = thm.conclusion().dest_eq().unwrap();
        assert_eq!(reduct, &body);
        assert_eq!(redex.dest_app().unwrap().1, &Term::Var(x));
        Ok(())
    }

    #[test]
    fn assume() -> Result<(), Error> {
        let k = Kernel::new();
        let p = bool_var(&k, "p");
        let thm = k.assume(&p)?;
        assert_eq!(thm.premises(), [p.clone()]);
        assert_eq!(thm.conclusion(), &p);
        let x = k.make_var("x", k.make_tyvar("a"));
        assert!(matches!(k.assume(&x), Err(Error::NotBool)));
        Ok(())
    }

    #[test]
    fn eq_modus_ponens() -> Result<(), Error> {
        let k = Kernel::new();
        let (p, q) = (bool_var(&k, "p"), bool_var(&k, "q"));
        let pq = k.assume(&k.make_eq(p.clone(), q.clone())?)?;
        let thm = k.eq_modus_ponens(&pq, &k.assume(&p)?)?;
        assert_eq!(thm.conclusion(), &q);
        assert_eq!(thm.premises().len(), 2);
        assert!(matches!(k.eq_modus_ponens(&pq, &k.assume(&q)?), Err(Error::PremiseMismatch)));
        Ok(())
    }

    #[test]
    fn antisymmetry() -> Result<(), Error> {
        let mut k = Kernel::new();
        let (p, q, r) = (bool_var(&k, "p"), bool_var(&k, "q"), bool_var(&k, "r"));
        // q, r ⊢ p  and  p ⊢ q
        let left = k.new_axiom(&Conjecture::new([q.clone(), r.clone()], p.clone()))?;
        let right = k.new_axiom(&Conjecture::new([p.clone()], q.clone()))?;
        let thm = k.antisymmetry(&left, &right)?;
        assert_eq!(thm.sequent(), &Conjecture::new([r], k.make_eq(p, q)?));
        assert_eq!(k.axioms(), [left, right]);
        Ok(())
    }

    #[test]
    fn unchecked_terms() {
        let mut k = Kernel::new();
        let b = Type::bool();
        let v = Var::new("v", b.clone());
        let loose = Term::Bound(0, b.clone());
        assert!(matches!(k.beta_reduction(&v, &loose), Err(Error::LooseBound)));
        assert!(matches!(k.reflexivity(&loose), Err(Error::LooseBound)));
        assert!(matches!(k.new_axiom(&Conjecture::new([], loose)), Err(Error::LooseBound)));
        assert!(k.axioms().is_empty());

        let nosuch = Type::app("nosuchtype".into(), alloc::vec::Vec::new());
        let c = Term::Const("undeclared".into(), nosuch.clone());
        assert!(matches!(k.reflexivity(&c), Err(Error::UnknownType(_))));
        let c = Term::Const("undeclared".into(), b.clone());
        assert!(matches!(k.assume(&c), Err(Error::UnknownConst(_))));
        let w = Var::new("w", nosuch);
        let refl = k.reflexivity(&Term::Var(v)).unwrap();
        assert!(matches!(k.abstraction(&w, &refl), Err(Error::UnknownType(_))));

        // p applied to itself is not a function application
        let p = Term::Var(Var::new("p", b));
        let pp = Term::app(p.clone(), p);
        assert!(matches!(k.assume(&pp), Err(Error::NotAFunction)));
    }

    #[test]
    fn instantiate() -> Result<(), Error> {
        let k = Kernel::new();
        let a = k.make_tyvar("a");
        let x = Var::new("x", a.clone());
        let thm = k.reflexivity(&Term::Var(x.clone()))?;

        let mut subst = Subst::new();
        subst.types.insert("a".into(), Type::bool());
        subst.terms.insert(x.clone(), bool_var(&k, "p"));
        let inst = k.instantiate(&thm, &subst)?;
        assert_eq!(inst.to_string(), "⊢ (p = p)");

        // only types
        subst.terms.clear();
        let inst = k.instantiate(&thm, &subst)?;
        assert_eq!(inst.conclusion(), &k.make_eq(bool_var(&k, "x"), bool_var(&k, "x"))?);

        // replacement must have the instantiated type
        subst.types.clear();
        subst.terms.insert(x, bool_var(&k, "p"));
        assert!(matches!(k.instantiate(&thm, &subst), Err(Error::TypeMismatch)));
        Ok(())
    }
}
