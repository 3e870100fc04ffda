//! Premises and conclusion, compared as sets of premises.

use alloc::vec::Vec;
use core::fmt::{self, Display};
use core::hash::{Hash, Hasher};
use fnv::FnvHasher;

/// Sequent `p1, ..., pn ⊢ c`.
///
/// Premises are de-duplicated on construction, and
/// two sequents are equal if their conclusions are equal and
/// their premises are equal when considered as sets:
///
/// ~~~
/// # use hawk::Sequent;
/// let s1 = Sequent::new(["a", "b", "a"], "c");
/// let s2 = Sequent::new(["b", "a"], "c");
/// assert_eq!(s1, s2);
/// assert_eq!(s1.premises().len(), 2);
/// assert_ne!(s1, Sequent::new(["a"], "c"));
/// assert_eq!(s1.to_string(), "a, b ⊢ c");
/// ~~~
#[derive(Clone, Debug)]
pub struct Sequent<Tm> {
    premises: Vec<Tm>,
    conclusion: Tm,
}

impl<Tm: PartialEq> Sequent<Tm> {
    pub fn new(premises: impl IntoIterator<Item = Tm>, conclusion: Tm) -> Self {
        let mut ps = Vec::new();
        for p in premises {
            if !ps.contains(&p) {
                ps.push(p)
            }
        }
        Self {
            premises: ps,
            conclusion,
        }
    }

    /// Return true if every premise of `self` is a premise of `other`.
    pub fn premises_within(&self, other: &Self) -> bool {
        self.premises.iter().all(|p| other.premises.contains(p))
    }
}

impl<Tm> Sequent<Tm> {
    pub fn premises(&self) -> &[Tm] {
        &self.premises
    }

    pub fn conclusion(&self) -> &Tm {
        &self.conclusion
    }

    /// Apply a function to all premises and the conclusion.
    pub fn map<U: PartialEq, F>(&self, mut f: F) -> Sequent<U>
    where
        F: FnMut(&Tm) -> U,
    {
        let premises: Vec<U> = self.premises.iter().map(&mut f).collect();
        Sequent::new(premises, f(&self.conclusion))
    }

    /// Apply a fallible function to all premises and the conclusion.
    pub fn try_map<U: PartialEq, E, F>(&self, mut f: F) -> Result<Sequent<U>, E>
    where
        F: FnMut(&Tm) -> Result<U, E>,
    {
        let premises = self.premises.iter().map(&mut f).collect::<Result<Vec<_>, _>>()?;
        Ok(Sequent::new(premises, f(&self.conclusion)?))
    }
}

impl<Tm: PartialEq> PartialEq for Sequent<Tm> {
    fn eq(&self, other: &Self) -> bool {
        self.conclusion == other.conclusion
            && self.premises.len() == other.premises.len()
            && self.premises_within(other)
    }
}

impl<Tm: Eq> Eq for Sequent<Tm> {}

impl<Tm: Hash> Hash for Sequent<Tm> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // combine premise hashes independently of their order
        let premises = self.premises.iter().fold(0, |acc, p| {
            let mut hasher = FnvHasher::default();
            p.hash(&mut hasher);
            acc ^ hasher.finish()
        });
        premises.hash(state);
        self.conclusion.hash(state)
    }
}

impl<Tm: Display> Display for Sequent<Tm> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, p) in self.premises.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            p.fmt(f)?;
        }
        if !self.premises.is_empty() {
            write!(f, " ")?;
        }
        write!(f, "⊢ {}", self.conclusion)
    }
}

#[test]
fn set_semantics() {
    use core::hash::BuildHasher;
    let build = fnv::FnvBuildHasher::default();
    let hash = |s: &Sequent<u8>| {
        let mut hasher = build.build_hasher();
        s.hash(&mut hasher);
        hasher.finish()
    };

    let s1 = Sequent::new([1, 2, 3, 2], 0);
    let s2 = Sequent::new([3, 1, 2], 0);
    assert_eq!(s1, s2);
    assert_eq!(hash(&s1), hash(&s2));

    assert_ne!(s1, Sequent::new([1, 2], 0));
    assert_ne!(s1, Sequent::new([1, 2, 3], 1));
    assert!(Sequent::new([2], 0).premises_within(&s1));

    // premises that coincide after mapping are merged
    let halved = s1.map(|x| x / 2);
    assert_eq!(halved, Sequent::new([0, 1], 0));
    assert_eq!(halved.premises().len(), 2);
}
