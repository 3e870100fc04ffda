//! Proof sessions with nested scopes of theorems and strategies.

use crate::kernel::{self, Conjecture, Kernel, Term, Theorem};
use crate::matching::instance;
use crate::subst::FnvHashMap;
use crate::{Stack, Strategy, Symbol};
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::iter;

#[derive(Debug)]
pub enum Error {
    /// no theorem or strategy proves the goal
    Unproved(Conjecture),
    /// goal is already being proved
    Cycle(Conjecture),
    NoStrategy(Symbol),
    NoTheorem(Symbol),
    /// attempt to end the base scope
    BaseScope,
    Kernel(kernel::Error),
}

impl From<kernel::Error> for Error {
    fn from(e: kernel::Error) -> Self {
        Self::Kernel(e)
    }
}

/// Where a theorem or strategy is made available.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Visibility {
    /// in the base scope and by name
    Global,
    /// in the current scope until it ends
    Local,
    /// only by name, never tried automatically
    Explicit,
}

/// Theorems and strategies that are tried automatically.
#[derive(Clone, Debug, Default)]
pub struct Scope {
    theorems: Vec<Theorem>,
    strategies: Vec<Rc<Strategy>>,
    /// strategies that local strategies replaced by name
    shadowed: Vec<(Symbol, Option<Rc<Strategy>>)>,
}

/// Proof session.
///
/// Goals are proved by searching the theorems and strategies
/// of the current scope and all its enclosing scopes,
/// starting from the current scope.
/// Within one scope, theorems and strategies are tried in the order
/// in which they were added.
pub struct Workspace {
    pub kernel: Kernel,
    base: Scope,
    scopes: Stack<Scope>,
    theorems: FnvHashMap<Symbol, Theorem>,
    strategies: FnvHashMap<Symbol, Rc<Strategy>>,
    /// goals currently being proved
    goals: Stack<Conjecture>,
    /// maximal number of goals being proved at the same time
    pub max_depth: Option<usize>,
}

impl Default for Workspace {
    fn default() -> Self {
        Self::with_kernel(Kernel::new())
    }
}

/// Proof step in a [`Workspace::prove_block`].
#[derive(Clone, Debug)]
pub enum Step {
    /// prove by searching theorems and strategies
    Prove(Conjecture),
    /// prove by the strategy of the given name
    By(Symbol, Conjecture),
}

impl Workspace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_kernel(kernel: Kernel) -> Self {
        Self {
            kernel,
            base: Scope::default(),
            scopes: Stack::new(),
            theorems: Default::default(),
            strategies: Default::default(),
            goals: Stack::new(),
            max_depth: None,
        }
    }

    /// Nesting depth of the current scope, where the base scope has depth 0.
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    pub fn new_scope(&mut self) {
        self.scopes.push(Scope::default())
    }

    /// Leave the current scope, forgetting its local theorems and strategies.
    ///
    /// Names of local strategies refer again to
    /// what they referred to before the scope.
    pub fn end_scope(&mut self) -> Result<(), Error> {
        let scope = self.scopes.pop().ok_or(Error::BaseScope)?;
        for (name, old) in scope.shadowed.into_iter().rev() {
            match old {
                Some(s) => self.strategies.insert(name, s),
                None => self.strategies.remove(&name),
            };
        }
        Ok(())
    }

    fn current(&mut self) -> &mut Scope {
        self.scopes.top_mut().unwrap_or(&mut self.base)
    }

    /// Scopes from the current one to the base.
    fn visible(&self) -> impl Iterator<Item = &Scope> {
        self.scopes.iter().chain(iter::once(&self.base))
    }

    /// Theorems that are tried automatically.
    pub fn theorems(&self) -> impl Iterator<Item = &Theorem> {
        self.visible().flat_map(|s| s.theorems.iter())
    }

    /// Strategies that are tried automatically.
    pub fn strategies(&self) -> impl Iterator<Item = &Rc<Strategy>> {
        self.visible().flat_map(|s| s.strategies.iter())
    }

    pub fn add_theorem(&mut self, name: impl Into<Symbol>, thm: Theorem, vis: Visibility) {
        let name = name.into();
        debug!("add theorem {}: {}", name, thm);
        match vis {
            Visibility::Global => {
                self.base.theorems.push(thm.clone());
                self.theorems.insert(name, thm);
            }
            Visibility::Local => self.current().theorems.push(thm),
            Visibility::Explicit => {
                self.theorems.insert(name, thm);
            }
        }
    }

    pub fn add_strategy(&mut self, strategy: Strategy, vis: Visibility) {
        debug!("add strategy {}", strategy);
        let name = strategy.name().clone();
        let strategy = Rc::new(strategy);
        match vis {
            Visibility::Global => {
                self.base.strategies.push(strategy.clone());
                self.strategies.insert(name, strategy);
            }
            Visibility::Local => {
                let old = self.strategies.insert(name.clone(), strategy.clone());
                let scope = self.current();
                scope.strategies.push(strategy);
                scope.shadowed.push((name, old));
            }
            Visibility::Explicit => {
                self.strategies.insert(name, strategy);
            }
        }
    }

    pub fn theorem(&self, name: &str) -> Result<&Theorem, Error> {
        self.theorems.get(name).ok_or_else(|| Error::NoTheorem(name.into()))
    }

    pub fn strategy(&self, name: &str) -> Result<Rc<Strategy>, Error> {
        let strategy = self.strategies.get(name).cloned();
        strategy.ok_or_else(|| Error::NoStrategy(name.into()))
    }

    /// Search for a proof of the goal.
    ///
    /// This first checks whether the goal is an instance of
    /// a visible theorem, then tries all visible strategies.
    /// The search fails without trying anything if the goal is
    /// already being proved, which prevents strategies from
    /// indefinitely posing the same goal again.
    pub fn prove(&mut self, goal: &Conjecture) -> Option<Theorem> {
        if self.goals.iter().any(|g| g == goal) {
            debug!("cycle: {}", goal);
            return None;
        }
        if self.max_depth.map_or(false, |max| self.goals.len() >= max) {
            debug!("maximal depth reached: {}", goal);
            return None;
        }
        debug!("prove {}", goal);
        self.goals.push(goal.clone());
        let thm = self.search(goal);
        self.goals.pop();
        thm
    }

    fn search(&mut self, goal: &Conjecture) -> Option<Theorem> {
        if let Some(thm) = self.theorems().find_map(|thm| instance(thm, goal, &self.kernel)) {
            return Some(thm);
        }
        let strategies: Vec<_> = self.strategies().cloned().collect();
        strategies.iter().find_map(|s| s.apply(goal, self))
    }

    /// Prove a goal, failing with an error if no proof was found.
    pub fn try_prove(&mut self, goal: &Conjecture) -> Result<Theorem, Error> {
        if self.goals.iter().any(|g| g == goal) {
            return Err(Error::Cycle(goal.clone()));
        }
        self.prove(goal).ok_or_else(|| Error::Unproved(goal.clone()))
    }

    /// Prove a goal by the strategy of the given name.
    pub fn prove_by(&mut self, strategy: &str, goal: &Conjecture) -> Result<Theorem, Error> {
        let strategy = self.strategy(strategy)?;
        strategy.apply(goal, self).ok_or_else(|| Error::Unproved(goal.clone()))
    }

    /// Prove a goal via intermediate steps in a new scope.
    ///
    /// Every proved step is available to the following steps.
    /// If the last step is the goal, it is returned,
    /// otherwise the goal is proved with all steps available.
    pub fn prove_block(&mut self, goal: &Conjecture, steps: &[Step]) -> Result<Theorem, Error> {
        debug!("proof block for {}", goal);
        self.new_scope();
        let thm = self.prove_steps(goal, steps);
        self.end_scope()?;
        thm
    }

    fn prove_steps(&mut self, goal: &Conjecture, steps: &[Step]) -> Result<Theorem, Error> {
        let mut last = None;
        for step in steps {
            let thm = match step {
                Step::Prove(c) => self.try_prove(c)?,
                Step::By(name, c) => self.prove_by(name, c)?,
            };
            self.current().theorems.push(thm.clone());
            last = Some(thm);
        }
        match last {
            Some(thm) if thm.sequent() == goal => Ok(thm),
            _ => self.try_prove(goal),
        }
    }

    /// Define a constant, making its defining theorem available globally.
    pub fn define(&mut self, name: impl Into<Symbol>, tm: &Term) -> Result<Theorem, Error> {
        let name = name.into();
        let thm = self.kernel.new_basic_definition(name.clone(), tm)?;
        self.add_theorem(name, thm.clone(), Visibility::Global);
        Ok(thm)
    }

    /// Define a type from a predicate, making the theorems about
    /// its constructor and destructor available globally by their names.
    pub fn define_type(
        &mut self,
        name: impl Into<Symbol>,
        ctor: impl Into<Symbol>,
        dtor: impl Into<Symbol>,
        pred: &Term,
    ) -> Result<(Theorem, Theorem), Error> {
        let (ctor, dtor) = (ctor.into(), dtor.into());
        let k = &mut self.kernel;
        let (ctor_dtor, dtor_ctor) = k.new_basic_type_definition(name, ctor.clone(), dtor.clone(), pred)?;
        self.add_theorem(ctor, ctor_dtor.clone(), Visibility::Global);
        self.add_theorem(dtor, dtor_ctor.clone(), Visibility::Global);
        Ok((ctor_dtor, dtor_ctor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::Type;

    fn goal(ws: &Workspace, name: &str) -> Conjecture {
        let p = ws.kernel.make_var(name, Type::bool());
        Conjecture::new([], p)
    }

    #[test]
    fn scopes() {
        let mut ws = Workspace::new();
        let g = goal(&ws, "p");
        let thm = ws.kernel.new_axiom(&g).unwrap();
        assert!(matches!(ws.end_scope(), Err(Error::BaseScope)));

        ws.new_scope();
        ws.add_theorem("ax", thm.clone(), Visibility::Local);
        assert!(ws.prove(&g).is_some());
        assert!(matches!(ws.theorem("ax"), Err(Error::NoTheorem(_))));
        ws.end_scope().unwrap();
        assert!(ws.prove(&g).is_none());

        ws.add_theorem("ax", thm.clone(), Visibility::Explicit);
        assert!(ws.prove(&g).is_none());
        assert_eq!(ws.theorem("ax").unwrap(), &thm);

        ws.new_scope();
        ws.add_theorem("ax", thm, Visibility::Global);
        ws.end_scope().unwrap();
        assert!(ws.prove(&g).is_some());
        assert_eq!(ws.depth(), 0);
    }

    #[test]
    fn local_strategy_by_name() {
        let mut ws = Workspace::new();
        let g = goal(&ws, "q");
        let q = g.conclusion().clone();
        let hyp = Conjecture::new([q.clone()], q.clone());
        let assume = || Strategy::builder("LocalAssume", &g).assume(&q).build();

        ws.new_scope();
        ws.add_strategy(assume(), Visibility::Local);
        assert!(ws.prove_by("LocalAssume", &hyp).is_ok());
        ws.end_scope().unwrap();
        assert!(matches!(ws.prove_by("LocalAssume", &hyp), Err(Error::NoStrategy(_))));

        // a local strategy shadows an explicit one only until its scope ends
        let never = Strategy::builder("LocalAssume", &g).build();
        ws.add_strategy(never, Visibility::Explicit);
        ws.new_scope();
        ws.add_strategy(assume(), Visibility::Local);
        assert!(ws.prove_by("LocalAssume", &hyp).is_ok());
        ws.end_scope().unwrap();
        assert!(matches!(ws.prove_by("LocalAssume", &hyp), Err(Error::Unproved(_))));
    }

    #[test]
    fn cycle() {
        // ⊢ p is proved by proving ⊢ p
        let mut ws = Workspace::new();
        let g = goal(&ws, "p");
        let p = g.conclusion().clone();
        let again = Strategy::builder("Again", &g).prove(&g).build();
        ws.add_strategy(again, Visibility::Global);
        assert!(ws.prove(&g).is_none());
        assert!(matches!(ws.try_prove(&g), Err(Error::Unproved(_))));

        // other strategies are still tried after the cycle was cut
        ws.add_strategy(Strategy::builder("Assume", &g).assume(&p).build(), Visibility::Global);
        let hyp = Conjecture::new([p.clone()], p);
        assert!(ws.prove(&hyp).is_some());
    }

    #[test]
    fn max_depth() {
        // ⊢ p is proved by proving some ⊢ q in scope, which is an axiom
        let mut ws = Workspace::new();
        let (p, q) = (goal(&ws, "p"), goal(&ws, "q"));
        let thm = ws.kernel.new_axiom(&q).unwrap();
        ws.add_theorem("q", thm, Visibility::Global);
        let p_by_q = Strategy::builder("PbyQ", &p).prove_local(&q).prove(&q).build();
        ws.add_strategy(p_by_q, Visibility::Explicit);

        ws.max_depth = Some(0);
        assert!(ws.prove(&q).is_none());
        assert!(ws.prove_by("PbyQ", &p).is_err());
        ws.max_depth = Some(1);
        assert!(ws.prove_by("PbyQ", &p).is_ok());
        assert!(matches!(ws.prove_by("Missing", &p), Err(Error::NoStrategy(_))));
    }

    #[test]
    fn definitions() -> Result<(), Error> {
        let mut ws = Workspace::new();
        let b = Type::bool();
        let x = kernel::Var::new("x", b.clone());
        let id = ws.kernel.make_abs(&x, Term::Var(x.clone()));
        let def = ws.define("id", &id)?;
        assert_eq!(ws.theorem("id")?, &def);
        assert_eq!(ws.kernel.definition("id"), Some(&def));
        assert!(ws.prove(def.sequent()).is_some());

        let t = ws.kernel.make_var("t", b);
        assert!(matches!(ws.define("t", &t), Err(Error::Kernel(_))));
        Ok(())
    }
}
