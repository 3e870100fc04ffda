//! Proof sessions replayed by the checker.
//!
//! Every session first prepares a workspace with strategies and lemmas,
//! then proves its goal in a proof block.

use crate::Error;
use hawk::kernel::{Conjecture, Term, Theorem, Type, Var};
use hawk::{Step, Strategy, Symbol, Visibility, Workspace};

type Prepare = fn(&mut Workspace) -> Result<(), Error>;
type Plan = fn(&Workspace) -> Result<(Conjecture, Vec<Step>), Error>;

/// Named goal together with the steps that prove it.
pub struct Session {
    pub name: &'static str,
    /// add the strategies and lemmas that the steps rely on
    prepare: Prepare,
    /// construct the goal and the steps without proving anything
    plan: Plan,
}

/// All known sessions, in the order in which they are replayed.
pub static SESSIONS: [Session; 5] = [
    Session {
        name: "symmetry",
        prepare: basic_strategies,
        plan: symmetry,
    },
    Session {
        name: "transitivity",
        prepare: basic_strategies,
        plan: transitivity,
    },
    Session {
        name: "chain",
        prepare: prepare_chain,
        plan: chain,
    },
    Session {
        name: "elimination",
        prepare: prepare_elimination,
        plan: elimination,
    },
    Session {
        name: "commutativity",
        prepare: prepare_commutativity,
        plan: commutativity,
    },
];

impl Session {
    pub fn find(name: &str) -> Result<&'static Session, Error> {
        SESSIONS
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| Error::NoSession(name.to_string()))
    }

    /// Return the goal of the session.
    pub fn goal(&self, ws: &Workspace) -> Result<Conjecture, Error> {
        Ok((self.plan)(ws)?.0)
    }

    /// Prepare the workspace and prove the goal of the session.
    pub fn run(&self, ws: &mut Workspace) -> Result<Theorem, Error> {
        (self.prepare)(ws)?;
        let (goal, steps) = (self.plan)(ws)?;
        log::info!("Session {}: {}", self.name, goal);
        for step in &steps {
            match step {
                Step::Prove(c) => log::info!("Step {}", c),
                Step::By(name, c) => log::info!("Step {} by {}", c, name),
            }
        }
        Ok(ws.prove_block(&goal, &steps)?)
    }
}

fn var(ws: &Workspace, name: &str) -> Term {
    ws.kernel.make_var(name, Type::bool())
}

fn eq(ws: &Workspace, l: &Term, r: &Term) -> Result<Term, Error> {
    Ok(ws.kernel.make_eq(l.clone(), r.clone())?)
}

/// Add the strategies `Assume`, `Reflexivity`, `Congruence`, and `EqModusPonens`.
fn basic_strategies(ws: &mut Workspace) -> Result<(), Error> {
    let k = &ws.kernel;
    let (a, b) = (k.make_tyvar("a"), k.make_tyvar("b"));
    let (p, q) = (var(ws, "p"), var(ws, "q"));
    let (x, y) = (k.make_var("x", a.clone()), k.make_var("y", a.clone()));
    let f = k.make_var("f", Type::fun(a.clone(), b.clone()));
    let g = k.make_var("g", Type::fun(a, b));
    let fx = k.make_app(f.clone(), x.clone())?;
    let gy = k.make_app(g.clone(), y.clone())?;
    let thm = |tm| Conjecture::new([], tm);

    let strategies = [
        Strategy::builder("Assume", &Conjecture::new([p.clone()], p.clone()))
            .assume(&p)
            .build(),
        Strategy::builder("Reflexivity", &thm(eq(ws, &x, &x)?))
            .refl(&x)
            .build(),
        Strategy::builder("Congruence", &thm(eq(ws, &fx, &gy)?))
            .cong(&thm(eq(ws, &f, &g)?), &thm(eq(ws, &x, &y)?))
            .build(),
        Strategy::builder("EqModusPonens", &thm(p.clone()))
            .prove_local(&thm(eq(ws, &q, &p)?))
            .eq_mp(&thm(eq(ws, &q, &p)?), &thm(q))
            .build(),
    ];
    for s in strategies {
        ws.add_strategy(s, Visibility::Global)
    }
    Ok(())
}

/// `p = q ⊢ q = p` for `p` and `q` of the given type
fn symmetric(ws: &Workspace, ty: Type) -> Result<(Conjecture, Vec<Step>), Error> {
    let k = &ws.kernel;
    let (p, q) = (k.make_var("p", ty.clone()), k.make_var("q", ty));
    let pq = eq(ws, &p, &q)?;
    let goal = Conjecture::new([pq.clone()], eq(ws, &q, &p)?);
    let step = Conjecture::new([pq], eq(ws, &eq(ws, &p, &p)?, &eq(ws, &q, &p)?)?);
    Ok((goal.clone(), Vec::from([Step::Prove(step), Step::Prove(goal)])))
}

/// `p = q ⊢ q = p`
fn symmetry(ws: &Workspace) -> Result<(Conjecture, Vec<Step>), Error> {
    symmetric(ws, Type::bool())
}

/// `p = q, q = r ⊢ p = r`
fn transitivity(ws: &Workspace) -> Result<(Conjecture, Vec<Step>), Error> {
    let (p, q, r) = (var(ws, "p"), var(ws, "q"), var(ws, "r"));
    let (pq, qr, pr) = (eq(ws, &p, &q)?, eq(ws, &q, &r)?, eq(ws, &p, &r)?);
    let goal = Conjecture::new([pq.clone(), qr.clone()], pr.clone());
    let step = Conjecture::new([qr], eq(ws, &pq, &pr)?);
    Ok((goal.clone(), Vec::from([Step::Prove(step), Step::Prove(goal)])))
}

/// Prove the transitivity lemma and add the strategy `Transitivity` that uses it.
fn prepare_chain(ws: &mut Workspace) -> Result<(), Error> {
    basic_strategies(ws)?;
    let (lemma, steps) = transitivity(ws)?;
    let thm = ws.prove_block(&lemma, &steps)?;
    ws.add_theorem("trans", thm, Visibility::Global);

    let (p, q, r) = (var(ws, "p"), var(ws, "q"), var(ws, "r"));
    let pr = Conjecture::new([], eq(ws, &p, &r)?);
    let strategy = Strategy::builder("Transitivity", &pr)
        .prove_local(&Conjecture::new([], eq(ws, &p, &q)?))
        .prove_local(&Conjecture::new([], eq(ws, &q, &r)?))
        .prove(&lemma)
        .prove(&pr)
        .build();
    ws.add_strategy(strategy, Visibility::Global);
    Ok(())
}

/// `a = b, b = c ⊢ a = c` from the hypotheses in scope
fn chain(ws: &Workspace) -> Result<(Conjecture, Vec<Step>), Error> {
    let (a, b, c) = (var(ws, "a"), var(ws, "b"), var(ws, "c"));
    let (ab, bc) = (eq(ws, &a, &b)?, eq(ws, &b, &c)?);
    let goal = Conjecture::new([ab.clone(), bc.clone()], eq(ws, &a, &c)?);
    let steps = [
        Step::Prove(Conjecture::new([ab.clone()], ab)),
        Step::Prove(Conjecture::new([bc.clone()], bc)),
        Step::Prove(goal.clone()),
    ];
    Ok((goal, Vec::from(steps)))
}

/// The identity on propositions and the constant `c` that is defined as it.
///
/// The constant is declared only when the session is prepared.
fn identity(ws: &Workspace) -> (Term, Term) {
    let b = Type::bool();
    let x = Var::new("x", b.clone());
    let id = ws.kernel.make_abs(&x, Term::Var(x.clone()));
    (id, Term::Const(Symbol::from("c"), Type::fun(b.clone(), b)))
}

/// Prove symmetry for all types and define `c`.
fn prepare_identity(ws: &mut Workspace) -> Result<(), Error> {
    basic_strategies(ws)?;
    let a = ws.kernel.make_tyvar("a");
    let (lemma, steps) = symmetric(ws, a)?;
    let thm = ws.prove_block(&lemma, &steps)?;
    ws.add_theorem("sym", thm, Visibility::Global);
    let (id, _) = identity(ws);
    ws.define("c", &id)?;
    Ok(())
}

/// Add the strategy `Elimination` that discharges a premise `q` of `q ⊢ p` by `⊢ q`.
fn prepare_elimination(ws: &mut Workspace) -> Result<(), Error> {
    prepare_identity(ws)?;
    let (p, q) = (var(ws, "p"), var(ws, "q"));
    let (q_p, just_q) = (Conjecture::new([q.clone()], p.clone()), Conjecture::new([], q.clone()));
    let strategy = Strategy::builder("Elimination", &Conjecture::new([], p.clone()))
        .prove_local(&q_p)
        .prove_local(&just_q)
        .antisym(&just_q, &q_p)
        .eq_mp(&Conjecture::new([], eq(ws, &q, &p)?), &just_q)
        .build();
    ws.add_strategy(strategy, Visibility::Global);
    Ok(())
}

/// `⊢ (λ x. x) = c` from the symmetry lemma and the definition of `c`
fn elimination(ws: &Workspace) -> Result<(Conjecture, Vec<Step>), Error> {
    let (id, c) = identity(ws);
    let goal = Conjecture::new([], eq(ws, &id, &c)?);
    let step = Conjecture::new([eq(ws, &c, &id)?], eq(ws, &id, &c)?);
    Ok((goal.clone(), Vec::from([Step::Prove(step), Step::Prove(goal)])))
}

/// Add the strategy `Commutativity` that turns `⊢ q = p` into `⊢ p = q`.
fn prepare_commutativity(ws: &mut Workspace) -> Result<(), Error> {
    prepare_identity(ws)?;
    let a = ws.kernel.make_tyvar("a");
    let (p, q) = (ws.kernel.make_var("p", a.clone()), ws.kernel.make_var("q", a));
    let (pq, qp) = (eq(ws, &p, &q)?, eq(ws, &q, &p)?);
    let just_qp = Conjecture::new([], qp.clone());
    let qp_pq = Conjecture::new([qp.clone()], pq.clone());
    let strategy = Strategy::builder("Commutativity", &Conjecture::new([], pq.clone()))
        .prove(&just_qp)
        .prove(&qp_pq)
        .antisym(&just_qp, &qp_pq)
        .eq_mp(&Conjecture::new([], eq(ws, &qp, &pq)?), &just_qp)
        .build();
    ws.add_strategy(strategy, Visibility::Global);
    Ok(())
}

/// `⊢ (λ x. x) = c`, found by the strategy `Commutativity`
fn commutativity(ws: &Workspace) -> Result<(Conjecture, Vec<Step>), Error> {
    let (id, c) = identity(ws);
    let goal = Conjecture::new([], eq(ws, &id, &c)?);
    Ok((goal.clone(), Vec::from([Step::Prove(goal)])))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sessions() {
        for session in &SESSIONS {
            let mut ws = Workspace::new();
            let thm = session.run(&mut ws).unwrap();
            let goal = session.goal(&Workspace::new()).unwrap();
            assert_eq!(thm.sequent(), &goal, "{}", session.name);
        }
    }

    #[test]
    fn goal_proves_nothing() {
        for session in &SESSIONS {
            let ws = Workspace::new();
            session.goal(&ws).unwrap();
            assert_eq!(ws.theorems().count(), 0, "{}", session.name);
            assert_eq!(ws.strategies().count(), 0, "{}", session.name);
            assert!(ws.kernel.axioms().is_empty());
            assert!(ws.kernel.definition("c").is_none());
        }
    }

    #[test]
    fn strategies_are_needed() {
        // without their strategies, the definition alone proves neither goal
        for session in [Session::find("elimination"), Session::find("commutativity")] {
            let session = session.unwrap();
            let mut ws = Workspace::new();
            prepare_identity(&mut ws).unwrap();
            let goal = session.goal(&ws).unwrap();
            assert!(ws.prove(&goal).is_none(), "{}", session.name);
        }
        let mut ws = Workspace::new();
        prepare_commutativity(&mut ws).unwrap();
        assert!(ws.strategy("Commutativity").is_ok());
        assert!(matches!(ws.strategy("Elimination"), Err(hawk::workspace::Error::NoStrategy(_))));
    }

    #[test]
    fn unknown() {
        assert!(Session::find("chain").is_ok());
        assert!(matches!(Session::find("nope"), Err(Error::NoSession(_))));
    }
}
