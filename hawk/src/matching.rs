//! Matching of patterns against terms and sequents.
//!
//! A pattern is a term whose variables may be instantiated
//! in order to make the pattern equal to a target term.
//! The same matching code serves to decide whether
//! a theorem instantiates to a goal (where all variables of the theorem are
//! instantiable) and whether a strategy pattern applies to a goal
//! (where only unfixed meta-variables are instantiable).
//!
//! Sequents are matched by first matching their conclusions and then
//! searching for an assignment of pattern premises to target premises,
//! backtracking whenever a premise pair does not match.
//!
//! ~~~
//! # use hawk::kernel::{Conjecture, Kernel, Type};
//! # use hawk::matching::instance;
//! let k = Kernel::new();
//! let (x, p) = (k.make_var("x", k.make_tyvar("a")), k.make_var("p", Type::bool()));
//! let refl = k.reflexivity(&x)?;
//! let goal = Conjecture::new([], k.make_eq(p.clone(), p)?);
//! let thm = instance(&refl, &goal, &k).unwrap();
//! assert_eq!(thm.sequent(), &goal);
//! # Ok::<_, hawk::kernel::Error>(())
//! ~~~

use crate::free::Variable;
use crate::kernel::{self, Conjecture, Kernel, Theorem};
use crate::{Free, Sequent, Subst, Symbol, Term, Type};
use alloc::vec::Vec;
use core::hash::Hash;

/// Behaviour of a pattern leaf during matching.
#[derive(Debug)]
pub enum Role<'a, T> {
    /// matches only an equal leaf of the target
    Rigid(&'a T),
    /// matches only the value already assigned to it
    Fixed(&'a T),
    /// matches anything, and is assigned the matched value
    Unfixed(&'a T),
}

/// Leaf of a term or type that can occur in patterns and targets.
pub trait Leaf {
    type Inner;
    /// Key under which the value of the leaf is stored in substitutions.
    type Key: Clone + Eq + Hash;

    /// Behaviour of the leaf on the pattern side.
    fn role(&self) -> Role<'_, Self::Inner>;
    /// The leaf on the target side, if it can be matched by a rigid leaf.
    fn rigid(&self) -> Option<&Self::Inner>;
    fn key(&self) -> Self::Key;
}

/// Type variables of concrete types are instantiable in patterns.
impl Leaf for Symbol {
    type Inner = Symbol;
    type Key = Symbol;

    fn role(&self) -> Role<'_, Symbol> {
        Role::Unfixed(self)
    }

    fn rigid(&self) -> Option<&Symbol> {
        Some(self)
    }

    fn key(&self) -> Symbol {
        self.clone()
    }
}

/// Free variables of concrete terms are instantiable in patterns.
impl<L: Clone + Eq + Hash> Leaf for Free<Type<L>> {
    type Inner = Self;
    type Key = Self;

    fn role(&self) -> Role<'_, Self> {
        Role::Unfixed(self)
    }

    fn rigid(&self) -> Option<&Self> {
        Some(self)
    }

    fn key(&self) -> Self {
        self.clone()
    }
}

/// Structural matching of patterns of type `P` against targets of type `T`.
pub trait Match<P, T> {
    /// Extend the substitution such that the pattern matches the target.
    ///
    /// If this returns false, the substitution may have been partially extended,
    /// so it should be discarded.
    fn match_term(&mut self, pat: &P, tgt: &T) -> bool;
}

impl<K, V, TL> Subst<K, Term<V, Type<TL>>, Type<TL>>
where
    K: Clone + Eq + Hash,
    V: Clone + Eq + Leaf<Inner = Free<Type<TL>>> + Variable<Ty = Type<TL>>,
    TL: Clone + Eq + Hash + Leaf<Inner = Symbol>,
{
    /// Extend the substitution such that the pattern type matches the target type.
    pub fn match_type<PL>(&mut self, pat: &Type<PL>, tgt: &Type<TL>) -> bool
    where
        PL: Leaf<Inner = Symbol, Key = Symbol>,
    {
        match (pat, tgt) {
            (Type::App(n1, a1), Type::App(n2, a2)) => {
                n1 == n2
                    && a1.len() == a2.len()
                    && a1.iter().zip(a2.iter()).all(|(p, t)| self.match_type(p, t))
            }
            (Type::Var(v), _) => match v.role() {
                Role::Rigid(name) => matches!(tgt, Type::Var(w) if w.rigid() == Some(name)),
                Role::Fixed(_) => self.types.get(&v.key()) == Some(tgt),
                Role::Unfixed(_) => match self.types.get(&v.key()) {
                    Some(ty) => ty == tgt,
                    None => {
                        self.types.insert(v.key(), tgt.clone());
                        true
                    }
                },
            },
            (Type::App(..), Type::Var(_)) => false,
        }
    }

    /// Assign a target term to a pattern variable of the given type.
    fn capture<PL>(&mut self, key: K, ty: &Type<PL>, tgt: &Term<V, Type<TL>>) -> bool
    where
        PL: Leaf<Inner = Symbol, Key = Symbol>,
    {
        if let Some(assigned) = self.terms.get(&key) {
            return assigned == tgt;
        }
        // the target must not depend on binders that the pattern variable cannot see
        if tgt.has_loose_bound(0) {
            return false;
        }
        match tgt.type_of() {
            Some(tgt_ty) if self.match_type(ty, &tgt_ty) => {
                self.terms.insert(key, tgt.clone());
                true
            }
            _ => false,
        }
    }
}

impl<K, V, TL, P, PL> Match<Term<P, Type<PL>>, Term<V, Type<TL>>>
    for Subst<K, Term<V, Type<TL>>, Type<TL>>
where
    K: Clone + Eq + Hash,
    V: Clone + Eq + Leaf<Inner = Free<Type<TL>>> + Variable<Ty = Type<TL>>,
    TL: Clone + Eq + Hash + Leaf<Inner = Symbol>,
    P: Leaf<Inner = Free<Type<PL>>, Key = K>,
    PL: Leaf<Inner = Symbol, Key = Symbol>,
{
    fn match_term(&mut self, pat: &Term<P, Type<PL>>, tgt: &Term<V, Type<TL>>) -> bool {
        match (pat, tgt) {
            (Term::Abs(pty, pb), Term::Abs(tty, tb)) => {
                self.match_type(pty, tty) && self.match_term(&**pb, &**tb)
            }
            (Term::App(pf, px), Term::App(tf, tx)) => {
                self.match_term(&**pf, &**tf) && self.match_term(&**px, &**tx)
            }
            (Term::Const(c1, pty), Term::Const(c2, tty)) => c1 == c2 && self.match_type(pty, tty),
            (Term::Bound(i, pty), Term::Bound(j, tty)) => i == j && self.match_type(pty, tty),
            (Term::Var(v), _) => match v.role() {
                Role::Rigid(pv) => match tgt {
                    Term::Var(w) => match w.rigid() {
                        Some(tv) => pv.name == tv.name && self.match_type(&pv.ty, &tv.ty),
                        None => false,
                    },
                    _ => false,
                },
                Role::Fixed(_) => self.terms.get(&v.key()) == Some(tgt),
                Role::Unfixed(pv) => self.capture(v.key(), &pv.ty, tgt),
            },
            _ => false,
        }
    }
}

/// Injective assignments of positions `0..len` to values `0..max`,
/// built up one position at a time.
///
/// ~~~
/// # use hawk::matching::Permutation;
/// let mut perm = Permutation::new(2, 3);
/// assert_eq!(perm.push_from(0), Some(0));
/// // 0 is taken, so the next position gets 1
/// assert_eq!(perm.push_from(0), Some(1));
/// assert!(perm.is_complete());
/// assert_eq!(perm.pop(), Some(1));
/// assert_eq!(perm.push_from(2), Some(2));
/// assert_eq!(perm.values(), [0, 2]);
/// ~~~
#[derive(Clone, Debug)]
pub struct Permutation {
    values: Vec<usize>,
    used: Vec<bool>,
    len: usize,
}

impl Permutation {
    pub fn new(len: usize, max: usize) -> Self {
        Self {
            values: Vec::with_capacity(len),
            used: (0..max).map(|_| false).collect(),
            len,
        }
    }

    /// Return true if all positions have been assigned.
    pub fn is_complete(&self) -> bool {
        self.values.len() == self.len
    }

    /// Values assigned to the positions so far.
    pub fn values(&self) -> &[usize] {
        &self.values
    }

    /// Assign the next position to the smallest unused value not below `from`.
    pub fn push_from(&mut self, from: usize) -> Option<usize> {
        if self.is_complete() {
            return None;
        }
        let v = (from..self.used.len()).find(|v| !self.used[*v])?;
        self.used[v] = true;
        self.values.push(v);
        Some(v)
    }

    /// Unassign the last assigned position, returning its value.
    pub fn pop(&mut self) -> Option<usize> {
        let v = self.values.pop()?;
        self.used[v] = false;
        Some(v)
    }
}

/// Lazy sequence of all substitutions that make a pattern sequent match a target sequent.
///
/// Every yielded substitution extends the initial substitution.
/// Cloning the iterator yields an independent search
/// that continues from the same point.
#[derive(Clone)]
pub struct Matches<'a, P, T, S> {
    pattern: &'a Sequent<P>,
    target: &'a Sequent<T>,
    /// true if positions are pattern premises and values are target premises
    forward: bool,
    perm: Permutation,
    /// substitution after matching the conclusions and the assigned premise pairs
    snapshots: Vec<S>,
    /// smallest value to try for the next position, or `None` if exhausted
    resume: Option<usize>,
}

impl<'a, P, T, S: Match<P, T> + Clone> Matches<'a, P, T, S> {
    /// Prepare the search for matches.
    ///
    /// If `allow_extras` is set, the target may have premises that
    /// no premise of the pattern is matched with.
    /// If `allow_missing` is set, the pattern may have premises that
    /// are not matched with any premise of the target.
    pub fn new(
        pattern: &'a Sequent<P>,
        target: &'a Sequent<T>,
        mut subst: S,
        allow_extras: bool,
        allow_missing: bool,
    ) -> Self {
        let np = pattern.premises().len();
        let nt = target.premises().len();
        let feasible = (allow_extras || nt <= np) && (allow_missing || np <= nt);
        let resume = if feasible && subst.match_term(pattern.conclusion(), target.conclusion()) {
            Some(0)
        } else {
            None
        };
        let forward = np <= nt;
        let perm = if forward {
            Permutation::new(np, nt)
        } else {
            Permutation::new(nt, np)
        };
        Self {
            pattern,
            target,
            forward,
            perm,
            snapshots: Vec::from([subst]),
            resume,
        }
    }

    fn pair(&self, position: usize, value: usize) -> (&'a P, &'a T) {
        let (p, t) = if self.forward {
            (position, value)
        } else {
            (value, position)
        };
        (&self.pattern.premises()[p], &self.target.premises()[t])
    }
}

impl<'a, P, T, S: Match<P, T> + Clone> Iterator for Matches<'a, P, T, S> {
    type Item = S;

    fn next(&mut self) -> Option<S> {
        let mut from = self.resume.take()?;
        loop {
            if self.perm.is_complete() {
                let subst = self.snapshots.last()?.clone();
                // continue with the next value for the last position
                if let Some(v) = self.perm.pop() {
                    self.snapshots.pop();
                    self.resume = Some(v + 1);
                }
                return Some(subst);
            }
            match self.perm.push_from(from) {
                Some(v) => {
                    let (p, t) = self.pair(self.perm.values().len() - 1, v);
                    let mut subst = self.snapshots.last()?.clone();
                    if subst.match_term(p, t) {
                        self.snapshots.push(subst);
                        from = 0;
                    } else {
                        self.perm.pop();
                        from = v + 1;
                    }
                }
                // no value left for this position, so backtrack
                None => {
                    let v = self.perm.pop()?;
                    self.snapshots.pop();
                    from = v + 1;
                }
            }
        }
    }
}

/// If the theorem instantiates to the goal,
/// return the instantiated theorem.
///
/// The instantiated theorem has the same conclusion as the goal and
/// a subset of its premises.
pub fn instance(thm: &Theorem, goal: &Conjecture, kernel: &Kernel) -> Option<Theorem> {
    let mut matches = Matches::new(thm.sequent(), goal, kernel::Subst::new(), true, false);
    let subst = matches.next()?;
    match kernel.instantiate(thm, &subst) {
        Ok(inst) => {
            trace!("{} is an instance of {}", goal, thm);
            Some(inst)
        }
        Err(e) => {
            debug!("instantiation of {} failed: {:?}", thm, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::{Term, Type};

    fn setup() -> (Kernel, impl Fn(&str) -> Term) {
        let k = Kernel::new();
        let var = |name: &str| Term::Var(Free::new(name, Type::bool()));
        (k, var)
    }

    #[test]
    fn permutation_exhausts() {
        let mut perm = Permutation::new(2, 2);
        let mut all = Vec::new();
        let mut from = 0;
        loop {
            match perm.push_from(from) {
                Some(_) if perm.is_complete() => {
                    all.push(Vec::from(perm.values()));
                    from = perm.pop().unwrap() + 1;
                }
                Some(_) => from = 0,
                None => match perm.pop() {
                    Some(v) => from = v + 1,
                    None => break,
                },
            }
        }
        assert_eq!(all, [[0, 1], [1, 0]]);
    }

    #[test]
    fn instance_of_itself() {
        let (mut k, var) = setup();
        let (p, q) = (var("p"), var("q"));
        let pq = k.make_eq(p.clone(), q.clone()).unwrap();
        let thm = k.new_axiom(&Conjecture::new([pq, q.clone()], p)).unwrap();
        let inst = instance(&thm, thm.sequent(), &k).unwrap();
        assert_eq!(inst, thm);
    }

    #[test]
    fn permuted_premises() {
        let (mut k, var) = setup();
        let eq = |k: &Kernel, l: &str, r: &str| k.make_eq(var(l), var(r)).unwrap();
        // x = y, z ⊢ w
        let xy = eq(&k, "x", "y");
        let thm = k.new_axiom(&Conjecture::new([xy, var("z")], var("w"))).unwrap();
        // goal premises in the other order: only x ↔ (a = b) and z ↔ c unify
        let ab = eq(&k, "a", "b");
        let goal = Conjecture::new([var("c"), ab.clone()], var("d"));
        let inst = instance(&thm, &goal, &k).unwrap();
        assert_eq!(inst.sequent(), &goal);

        // extra goal premises are fine
        let goal = Conjecture::new([var("e"), var("c"), ab.clone()], var("d"));
        let inst = instance(&thm, &goal, &k).unwrap();
        assert_eq!(inst.premises().len(), 2);
        assert!(inst.premises_within(&goal));

        // missing goal premises are not
        let goal = Conjecture::new([ab], var("d"));
        assert!(instance(&thm, &goal, &k).is_none());
    }

    #[test]
    fn backtrack_premises() {
        let (mut k, var) = setup();
        let eq = |k: &Kernel, l: Term, r: Term| k.make_eq(l, r).unwrap();
        // u, u = v ⊢ w
        let thm = Conjecture::new([var("u"), eq(&k, var("u"), var("v"))], var("w"));
        let thm = k.new_axiom(&thm).unwrap();
        // u first matches a, but then u = v cannot be matched,
        // so u has to be matched with b
        let goal = Conjecture::new([var("a"), var("b"), eq(&k, var("b"), var("c"))], var("d"));
        let inst = instance(&thm, &goal, &k).unwrap();
        assert!(inst.premises().contains(&var("b")));
        let goal = Conjecture::new([var("a"), var("b"), eq(&k, var("c"), var("d"))], var("e"));
        assert!(instance(&thm, &goal, &k).is_none());
    }

    #[test]
    fn consistent_types() {
        let k = Kernel::new();
        let a = Type::Var("a".into());
        let x = Term::Var(Free::new("x", a.clone()));
        let refl = k.reflexivity(&x).unwrap();
        let p = Term::Var(Free::new("p", Type::bool()));
        let n = Term::Var(Free::new("n", Type::Var("b".into())));
        let goal = Conjecture::new([], k.make_eq(p.clone(), p.clone()).unwrap());
        assert!(instance(&refl, &goal, &k).is_some());
        let goal = Conjecture::new([], k.make_eq(n.clone(), n).unwrap());
        assert!(instance(&refl, &goal, &k).is_some());
        // x cannot be matched with two different terms
        let q = Term::Var(Free::new("q", Type::bool()));
        let goal = Conjecture::new([], k.make_eq(p, q).unwrap());
        assert!(instance(&refl, &goal, &k).is_none());
    }

    #[test]
    fn no_escaping_bound() {
        let k = Kernel::new();
        let b = Type::bool();
        let x = Free::new("x", b.clone());
        let y = Free::new("y", b.clone());
        // ⊢ (λ x. y) = (λ x. y)
        let lam_y = k.make_abs(&x, Term::Var(y.clone()));
        let thm = k.reflexivity(&lam_y).unwrap();
        // y cannot be instantiated with the bound x
        let lam_x = k.make_abs(&x, Term::Var(x.clone()));
        let goal = Conjecture::new([], k.make_eq(lam_x.clone(), lam_x).unwrap());
        assert!(instance(&thm, &goal, &k).is_none());
        // but with a term that does not depend on x
        let z = Term::Var(Free::new("z", b.clone()));
        let lam_z = k.make_abs(&x, z);
        let goal = Conjecture::new([], k.make_eq(lam_z.clone(), lam_z).unwrap());
        assert!(instance(&thm, &goal, &k).is_some());
    }

    #[test]
    fn all_matches() {
        let (mut k, var) = setup();
        let thm = k.new_axiom(&Conjecture::new([var("x")], var("w"))).unwrap();
        let goal = Conjecture::new([var("a"), var("b"), var("c")], var("d"));
        let subst = kernel::Subst::new();
        let matches = Matches::new(thm.sequent(), &goal, subst, true, false);
        let xs: Vec<_> = matches
            .map(|s| s.terms.get(&Free::new("x", Type::bool())).cloned())
            .collect();
        assert_eq!(xs, [Some(var("a")), Some(var("b")), Some(var("c"))]);

        let subst = kernel::Subst::new();
        let mut matches = Matches::new(thm.sequent(), &goal, subst, false, false);
        assert!(matches.next().is_none());
    }
}
