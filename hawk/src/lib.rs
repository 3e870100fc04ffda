#![no_std]
#![forbid(unsafe_code)]

//! Logic kernel and strategy-based proof search for higher-order logic.
//!
//! This is the library underlying the `hawkcheck` proof checker.
//!
//! # Usage
//!
//! The state of a proof session is a [`Workspace`].
//! It contains a [`kernel::Kernel`], keeping track of all type constructors and constants,
//! as well as the theorems and [`Strategy`]s that are available to prove goals.
//!
//! How is a goal proved?
//! A goal is a [`kernel::Conjecture`], consisting of premises and a conclusion.
//! The workspace first checks whether the goal is an instance of
//! a theorem that it knows, see [`matching::instance`].
//! If not, it tries every strategy whose pattern matches the goal.
//! A strategy executes a sequence of instructions, where every instruction
//! produces a theorem by a rule of the kernel or by proving a subgoal.
//! Because theorems can only be produced by the kernel,
//! every proof found by the search is correct
//! regardless of how the strategies are written.
//!
//! The following example proves the symmetry of equality
//! from a few basic strategies.
//! (By the way, this example, just as all other code examples in this library,
//! can be executed by running `cargo test`.)
//!
//! ~~~
//! # use hawk::kernel::{Conjecture, Term, Type};
//! # use hawk::{Error, Step, Strategy, Visibility, Workspace};
//! let mut ws = Workspace::new();
//! let k = &ws.kernel;
//! let (a, b, c) = (k.make_tyvar("a"), Type::bool(), k.make_tyvar("b"));
//! let (p, q) = (k.make_var("p", b.clone()), k.make_var("q", b));
//! let (x, y) = (k.make_var("x", a.clone()), k.make_var("y", a.clone()));
//! let f = k.make_var("f", Type::fun(a.clone(), c.clone()));
//! let g = k.make_var("g", Type::fun(a, c));
//! let eq = |l: &Term, r: &Term| k.make_eq(l.clone(), r.clone());
//! let fx_gy = eq(&k.make_app(f.clone(), x.clone())?, &k.make_app(g.clone(), y.clone())?)?;
//!
//! let strategies = [
//!     Strategy::builder("Assume", &Conjecture::new([p.clone()], p.clone()))
//!         .assume(&p)
//!         .build(),
//!     Strategy::builder("Reflexivity", &Conjecture::new([], eq(&x, &x)?))
//!         .refl(&x)
//!         .build(),
//!     Strategy::builder("Congruence", &Conjecture::new([], fx_gy))
//!         .cong(&Conjecture::new([], eq(&f, &g)?), &Conjecture::new([], eq(&x, &y)?))
//!         .build(),
//!     Strategy::builder("EqModusPonens", &Conjecture::new([], p.clone()))
//!         .prove_local(&Conjecture::new([], eq(&q, &p)?))
//!         .eq_mp(&Conjecture::new([], eq(&q, &p)?), &Conjecture::new([], q.clone()))
//!         .build(),
//! ];
//!
//! // p = q ⊢ q = p
//! let pq = eq(&p, &q)?;
//! let goal = Conjecture::new([pq.clone()], eq(&q, &p)?);
//! let steps = [
//!     Step::Prove(Conjecture::new([pq], eq(&eq(&p, &p)?, &eq(&q, &p)?)?)),
//!     Step::Prove(goal.clone()),
//! ];
//!
//! for s in strategies {
//!     ws.add_strategy(s, Visibility::Global);
//! }
//! let thm = ws.prove_block(&goal, &steps)?;
//! assert_eq!(thm.to_string(), "(p = q) ⊢ (q = p)");
//! # Ok::<_, Error>(())
//! ~~~
//!
//! # Organisation
//!
//! Terms and types are generic over their leaves:
//! the same [`Term`] and [`Type`] trees are used for
//! concrete terms, whose leaves are variables, and
//! shadow terms, whose leaves are meta-variables.
//! Concrete terms are defined in the [`kernel`] module,
//! which is the only module that can construct theorems,
//! and shadow terms are defined in the [`shadow`] module.
//! The [`matching`] module matches both kinds of terms against concrete terms.

extern crate alloc;
#[macro_use]
extern crate log;

pub mod error;
pub mod kernel;
pub mod matching;
pub mod shadow;
pub mod strategy;
pub mod workspace;

mod free;
mod sequent;
mod stack;
mod subst;
mod symbol;
pub mod term;
pub mod ty;

pub use error::Error;
pub use free::{Free, Variable};
pub use sequent::Sequent;
pub use stack::Stack;
pub use strategy::Strategy;
pub use subst::{FnvHashMap, Subst};
pub use symbol::Symbol;
pub use term::Term;
pub use ty::Type;
pub use workspace::{Step, Visibility, Workspace};
