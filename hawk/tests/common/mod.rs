use hawk::kernel::{Conjecture, Term, Type};
use hawk::{Strategy, Visibility, Workspace};

pub fn var(ws: &Workspace, name: &str) -> Term {
    ws.kernel.make_var(name, Type::bool())
}

pub fn eq(ws: &Workspace, l: &Term, r: &Term) -> Term {
    ws.kernel.make_eq(l.clone(), r.clone()).unwrap()
}

pub fn seq(premises: &[Term], conclusion: Term) -> Conjecture {
    Conjecture::new(premises.iter().cloned(), conclusion)
}

/// Add the strategies `Assume`, `Reflexivity`, `Congruence`, and `EqModusPonens`.
pub fn add_basic_strategies(ws: &mut Workspace) {
    let k = &ws.kernel;
    let (a, b) = (k.make_tyvar("a"), k.make_tyvar("b"));
    let (p, q) = (var(ws, "p"), var(ws, "q"));
    let (x, y) = (k.make_var("x", a.clone()), k.make_var("y", a.clone()));
    let f = k.make_var("f", Type::fun(a.clone(), b.clone()));
    let g = k.make_var("g", Type::fun(a, b));
    let fx = k.make_app(f.clone(), x.clone()).unwrap();
    let gy = k.make_app(g.clone(), y.clone()).unwrap();

    let strategies = [
        Strategy::builder("Assume", &seq(&[p.clone()], p.clone()))
            .assume(&p)
            .build(),
        Strategy::builder("Reflexivity", &seq(&[], eq(ws, &x, &x)))
            .refl(&x)
            .build(),
        Strategy::builder("Congruence", &seq(&[], eq(ws, &fx, &gy)))
            .cong(&seq(&[], eq(ws, &f, &g)), &seq(&[], eq(ws, &x, &y)))
            .build(),
        Strategy::builder("EqModusPonens", &seq(&[], p.clone()))
            .prove_local(&seq(&[], eq(ws, &q, &p)))
            .eq_mp(&seq(&[], eq(ws, &q, &p)), &seq(&[], q.clone()))
            .build(),
    ];
    for s in strategies {
        ws.add_strategy(s, Visibility::Global)
    }
}
