use super::{Conjecture, Term};
use core::fmt;
use core::ops::Deref;

/// Sequent that was derived by the kernel.
///
/// There is no public way to construct a theorem
/// other than by the inference rules of the [`Kernel`](super::Kernel).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Theorem(Conjecture);

impl Theorem {
    pub(super) fn new(premises: impl IntoIterator<Item = Term>, conclusion: Term) -> Self {
        Self(Conjecture::new(premises, conclusion))
    }

    pub(super) fn from_sequent(sequent: Conjecture) -> Self {
        Self(sequent)
    }

    /// Return the statement of the theorem.
    pub fn sequent(&self) -> &Conjecture {
        &self.0
    }
}

impl Deref for Theorem {
    type Target = Conjecture;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl fmt::Display for Theorem {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.0.fmt(f)
    }
}
