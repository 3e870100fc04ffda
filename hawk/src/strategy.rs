//! Strategies, reusable proof patterns that close goals of a certain shape.
//!
//! A strategy consists of a pattern and a list of instructions.
//! When a goal matches the pattern, the instructions are executed one after
//! the other, each producing a theorem that is kept as local theorem for
//! the following instructions.
//! As soon as a produced theorem is an instance of the goal, the search ends.
//! If an instruction fails, execution backtracks to the most recent point
//! where a different choice could have been made, namely
//! the matching of the pattern against the goal and
//! the matching of `prove_local` patterns against known theorems.
//!
//! ~~~
//! # use hawk::kernel::{Conjecture, Type};
//! # use hawk::{Strategy, Visibility, Workspace};
//! let mut ws = Workspace::new();
//! let p = ws.kernel.make_var("p", Type::bool());
//! let pp = Conjecture::new([p.clone()], p.clone());
//! let assume = Strategy::builder("Assume", &pp).assume(&p).build();
//! ws.add_strategy(assume, Visibility::Global);
//!
//! let q = ws.kernel.make_var("q", Type::bool());
//! let goal = Conjecture::new([q.clone(), p], q);
//! let thm = ws.prove(&goal).unwrap();
//! assert_eq!(thm.to_string(), "q ⊢ q");
//! ~~~

use crate::kernel::{Conjecture, Term, Theorem, Type, Var};
use crate::matching::{instance, Matches};
use crate::shadow::{self, Fixed, Instantiate, Meta, MetaSubst, ShadowTerm, ShadowTheorem};
use crate::shadow::{ShadowType, ShadowVar};
use crate::{Stack, Symbol, Workspace};
use alloc::vec::Vec;
use core::fmt::{self, Debug, Display};

/// Step of a strategy.
///
/// All operands that are sequents are extended with
/// the premises of the goal before being proved.
#[derive(Clone, Debug)]
pub enum Instruction {
    /// prove a sequent from local theorems or by the workspace
    Prove(ShadowTheorem),
    /// match a sequent against local theorems and theorems in scope
    ProveLocal(ShadowTheorem),
    /// prove a sequent by a strategy of the given name
    ProveBy(Symbol, ShadowTheorem),
    Refl(ShadowTerm),
    Cong(ShadowTheorem, ShadowTheorem),
    Abs(Meta<ShadowVar>, ShadowTheorem),
    TypeAbs(ShadowType, ShadowTheorem),
    Beta(Meta<ShadowVar>, ShadowTerm),
    Assume(ShadowTerm),
    EqMp(ShadowTheorem, ShadowTheorem),
    Antisym(ShadowTheorem, ShadowTheorem),
}

impl Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Prove(s) => write!(f, "prove {}", s),
            Self::ProveLocal(s) => write!(f, "prove_local {}", s),
            Self::ProveBy(name, s) => write!(f, "prove_by {} {}", name, s),
            Self::Refl(tm) => write!(f, "refl {}", tm),
            Self::Cong(l, r) => write!(f, "cong [{}] [{}]", l, r),
            Self::Abs(v, s) => write!(f, "abs {} [{}]", v, s),
            Self::TypeAbs(ty, s) => write!(f, "type_abs {} [{}]", ty, s),
            Self::Beta(v, tm) => write!(f, "beta {} {}", v, tm),
            Self::Assume(tm) => write!(f, "assume {}", tm),
            Self::EqMp(l, r) => write!(f, "eq_mp [{}] [{}]", l, r),
            Self::Antisym(l, r) => write!(f, "antisym [{}] [{}]", l, r),
        }
    }
}

/// Named proof pattern.
#[derive(Clone, Debug)]
pub struct Strategy {
    name: Symbol,
    pattern: ShadowTheorem,
    instructions: Vec<Instruction>,
}

impl Strategy {
    /// Start building a strategy for goals of the shape of `pattern`.
    ///
    /// All variables of the pattern are meta-variables.
    /// In the instructions given to the builder,
    /// variables that occur in the pattern or in a previous instruction
    /// refer to the values they were matched with;
    /// all other variables are matched anew.
    pub fn builder(name: impl Into<Symbol>, pattern: &Conjecture) -> Builder {
        let pattern = ShadowTheorem::from_conjecture(pattern);
        let (mut terms, mut types) = (Vec::new(), Vec::new());
        pattern.meta_names(&mut terms, &mut types);
        Builder {
            strategy: Strategy {
                name: name.into(),
                pattern,
                instructions: Vec::new(),
            },
            terms,
            types,
        }
    }

    pub fn name(&self) -> &Symbol {
        &self.name
    }

    pub fn pattern(&self) -> &ShadowTheorem {
        &self.pattern
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Try to prove the goal by executing the instructions
    /// for every match of the pattern with the goal.
    pub fn apply(&self, goal: &Conjecture, ws: &mut Workspace) -> Option<Theorem> {
        debug!("apply {} to {}", self.name, goal);
        let run = Run {
            strategy: self,
            goal,
        };
        let matches = Matches::new(&self.pattern, goal, MetaSubst::new(), true, false);
        for subst in matches {
            if let Some(thm) = run.step(0, &subst, &mut Stack::new(), ws) {
                debug!("{} proved {}", self.name, thm);
                return Some(thm);
            }
        }
        None
    }
}

impl Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} [{}]", self.name, self.pattern)?;
        for i in &self.instructions {
            write!(f, "; {}", i)?;
        }
        Ok(())
    }
}

/// Construction of a strategy, one instruction at a time.
pub struct Builder {
    strategy: Strategy,
    /// names of meta-variables seen so far
    terms: Vec<Symbol>,
    types: Vec<Symbol>,
}

impl Builder {
    fn fixed(&self) -> Fixed<'_> {
        Fixed {
            terms: &self.terms,
            types: &self.types,
        }
    }

    fn see_type(&mut self, ty: &Type) {
        let mut vars = Vec::new();
        ty.vars(&mut vars);
        for v in vars {
            if !self.types.contains(v) {
                self.types.push(v.clone())
            }
        }
    }

    fn sequent(&mut self, conj: &Conjecture) -> ShadowTheorem {
        let shadow = ShadowTheorem::with_fixed(conj, &self.fixed());
        shadow.meta_names(&mut self.terms, &mut self.types);
        shadow
    }

    fn term(&mut self, tm: &Term) -> ShadowTerm {
        let shadow = shadow::shadow_term(tm, &self.fixed());
        shadow::meta_names(&shadow, &mut self.terms, &mut self.types);
        shadow
    }

    fn var(&mut self, v: &Var) -> Meta<ShadowVar> {
        let shadow = shadow::shadow_var(v, &self.fixed());
        self.see_type(&v.ty);
        if !self.terms.contains(&v.name) {
            self.terms.push(v.name.clone())
        }
        shadow
    }

    fn ty(&mut self, ty: &Type) -> ShadowType {
        let shadow = shadow::shadow_type(ty, &self.types);
        self.see_type(ty);
        shadow
    }

    fn push(mut self, i: Instruction) -> Self {
        self.strategy.instructions.push(i);
        self
    }

    pub fn prove(mut self, conj: &Conjecture) -> Self {
        let s = self.sequent(conj);
        self.push(Instruction::Prove(s))
    }

    pub fn prove_local(mut self, conj: &Conjecture) -> Self {
        let s = self.sequent(conj);
        self.push(Instruction::ProveLocal(s))
    }

    pub fn prove_by(mut self, strategy: impl Into<Symbol>, conj: &Conjecture) -> Self {
        let s = self.sequent(conj);
        self.push(Instruction::ProveBy(strategy.into(), s))
    }

    pub fn refl(mut self, tm: &Term) -> Self {
        let tm = self.term(tm);
        self.push(Instruction::Refl(tm))
    }

    pub fn cong(mut self, fg: &Conjecture, xy: &Conjecture) -> Self {
        let (fg, xy) = (self.sequent(fg), self.sequent(xy));
        self.push(Instruction::Cong(fg, xy))
    }

    pub fn abs(mut self, v: &Var, pq: &Conjecture) -> Self {
        let (v, pq) = (self.var(v), self.sequent(pq));
        self.push(Instruction::Abs(v, pq))
    }

    pub fn type_abs(mut self, ty: &Type, pq: &Conjecture) -> Self {
        let (ty, pq) = (self.ty(ty), self.sequent(pq));
        self.push(Instruction::TypeAbs(ty, pq))
    }

    pub fn beta(mut self, v: &Var, body: &Term) -> Self {
        let (v, body) = (self.var(v), self.term(body));
        self.push(Instruction::Beta(v, body))
    }

    pub fn assume(mut self, p: &Term) -> Self {
        let p = self.term(p);
        self.push(Instruction::Assume(p))
    }

    pub fn eq_mp(mut self, major: &Conjecture, minor: &Conjecture) -> Self {
        let (major, minor) = (self.sequent(major), self.sequent(minor));
        self.push(Instruction::EqMp(major, minor))
    }

    pub fn antisym(mut self, left: &Conjecture, right: &Conjecture) -> Self {
        let (left, right) = (self.sequent(left), self.sequent(right));
        self.push(Instruction::Antisym(left, right))
    }

    pub fn build(self) -> Strategy {
        self.strategy
    }
}

/// Turn a failed rule application into a failed instruction.
fn ok<T, E: Debug>(r: Result<T, E>) -> Option<T> {
    r.map_err(|e| trace!("instruction failed: {:?}", e)).ok()
}

/// Execution of a strategy on a goal.
struct Run<'a> {
    strategy: &'a Strategy,
    goal: &'a Conjecture,
}

impl<'a> Run<'a> {
    /// Execute the instructions starting from the `i`-th one.
    fn step(
        &self,
        i: usize,
        subst: &MetaSubst,
        local: &mut Stack<Theorem>,
        ws: &mut Workspace,
    ) -> Option<Theorem> {
        let instruction = self.strategy.instructions.get(i)?;
        trace!("{} #{}: {}", self.strategy.name, i, instruction);
        use Instruction::*;
        let thm = match instruction {
            Prove(s) => return self.prove_next(i, s, subst, local, ws),
            ProveLocal(s) => return self.prove_local(i, s, subst, local, ws),
            ProveBy(name, s) => {
                let goal = self.conjecture(s, subst, ws)?;
                let strategy = ok(ws.strategy(name))?;
                strategy.apply(&goal, ws)?
            }
            Refl(tm) => {
                let tm = ok(Instantiate::new(subst, &ws.kernel).term(tm))?;
                ok(ws.kernel.reflexivity(&tm))?
            }
            Cong(fg, xy) => {
                let (fg, xy) = self.prove_both(fg, xy, subst, local, ws)?;
                ok(ws.kernel.congruence(&fg, &xy))?
            }
            Abs(v, pq) => {
                let v = ok(Instantiate::new(subst, &ws.kernel).var(v))?;
                let pq = self.prove(pq, subst, local, ws)?;
                ok(ws.kernel.abstraction(&v, &pq))?
            }
            TypeAbs(ty, pq) => {
                let ty = ok(Instantiate::new(subst, &ws.kernel).ty(ty))?;
                let pq = self.prove(pq, subst, local, ws)?;
                ok(ws.kernel.type_abstraction(&ty, &pq))?
            }
            Beta(v, body) => {
                let inst = Instantiate::new(subst, &ws.kernel);
                let (v, body) = (ok(inst.var(v))?, ok(inst.term(body))?);
                ok(ws.kernel.beta_reduction(&v, &body))?
            }
            Assume(p) => {
                let p = ok(Instantiate::new(subst, &ws.kernel).term(p))?;
                ok(ws.kernel.assume(&p))?
            }
            EqMp(major, minor) => {
                let (major, minor) = self.prove_both(major, minor, subst, local, ws)?;
                ok(ws.kernel.eq_modus_ponens(&major, &minor))?
            }
            Antisym(l, r) => {
                let (l, r) = self.prove_both(l, r, subst, local, ws)?;
                ok(ws.kernel.antisymmetry(&l, &r))?
            }
        };
        self.try_theorem(i, thm, subst, local, ws)
    }

    /// Return the theorem if it proves the goal,
    /// otherwise continue with it as local theorem.
    fn try_theorem(
        &self,
        i: usize,
        thm: Theorem,
        subst: &MetaSubst,
        local: &mut Stack<Theorem>,
        ws: &mut Workspace,
    ) -> Option<Theorem> {
        if let Some(thm) = instance(&thm, self.goal, &ws.kernel) {
            return Some(thm);
        }
        local.with_pushed(thm, |local| self.step(i + 1, subst, local, ws))
    }

    fn conjecture(&self, s: &ShadowTheorem, subst: &MetaSubst, ws: &Workspace) -> Option<Conjecture> {
        ok(s.instantiate(subst, self.goal.premises(), &ws.kernel))
    }

    /// Prove a sequent from local theorems or by the workspace.
    fn prove(
        &self,
        s: &ShadowTheorem,
        subst: &MetaSubst,
        local: &Stack<Theorem>,
        ws: &mut Workspace,
    ) -> Option<Theorem> {
        let goal = self.conjecture(s, subst, ws)?;
        let found = local.iter().find_map(|thm| instance(thm, &goal, &ws.kernel));
        found.or_else(|| ws.prove(&goal))
    }

    fn prove_both(
        &self,
        l: &ShadowTheorem,
        r: &ShadowTheorem,
        subst: &MetaSubst,
        local: &Stack<Theorem>,
        ws: &mut Workspace,
    ) -> Option<(Theorem, Theorem)> {
        let l = self.prove(l, subst, local, ws)?;
        let r = self.prove(r, subst, local, ws)?;
        Some((l, r))
    }

    /// Prove a sequent and continue with the next instruction,
    /// trying every local theorem that proves the sequent.
    fn prove_next(
        &self,
        i: usize,
        s: &ShadowTheorem,
        subst: &MetaSubst,
        local: &mut Stack<Theorem>,
        ws: &mut Workspace,
    ) -> Option<Theorem> {
        let goal = self.conjecture(s, subst, ws)?;
        let found: Vec<_> = local.iter().filter_map(|thm| instance(thm, &goal, &ws.kernel)).collect();
        for thm in found {
            if let Some(thm) = self.try_theorem(i, thm, subst, local, ws) {
                return Some(thm);
            }
        }
        let thm = ws.prove(&goal)?;
        self.try_theorem(i, thm, subst, local, ws)
    }

    /// Continue with the next instruction for every match of the sequent
    /// with a local theorem or a theorem in scope.
    fn prove_local(
        &self,
        i: usize,
        s: &ShadowTheorem,
        subst: &MetaSubst,
        local: &mut Stack<Theorem>,
        ws: &mut Workspace,
    ) -> Option<Theorem> {
        let theorems: Vec<Theorem> = local.iter().chain(ws.theorems()).cloned().collect();
        for thm in &theorems {
            for subst in Matches::new(s, thm.sequent(), subst.clone(), true, false) {
                if let Some(thm) = self.step(i + 1, &subst, local, ws) {
                    return Some(thm);
                }
            }
        }
        None
    }
}
