//! Substitutions of variables by terms and type variables by types.

use crate::Symbol;
use core::fmt;
use core::hash::Hash;

/// Immutable HashMap for fast cloning of substitutions.
pub type FnvHashMap<K, V> = im::hashmap::HashMap<K, V, fnv::FnvBuildHasher>;

/// Map from variables to terms and from type variables to types.
///
/// Substitutions are cloned whenever matching
/// needs to remember a state to backtrack to,
/// which is cheap thanks to the structure sharing of immutable maps.
#[derive(Clone)]
pub struct Subst<K, Tm, Ty> {
    pub terms: FnvHashMap<K, Tm>,
    pub types: FnvHashMap<Symbol, Ty>,
}

impl<K, Tm, Ty> Default for Subst<K, Tm, Ty> {
    fn default() -> Self {
        Self {
            terms: Default::default(),
            types: Default::default(),
        }
    }
}

impl<K: Eq + Hash + fmt::Debug, Tm: fmt::Debug, Ty: fmt::Debug> fmt::Debug for Subst<K, Tm, Ty> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Subst")
            .field("terms", &self.terms)
            .field("types", &self.types)
            .finish()
    }
}

impl<K, Tm, Ty> Subst<K, Tm, Ty> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty() && self.types.is_empty()
    }
}

#[test]
fn debug_lists_both_maps() {
    use alloc::format;
    let mut s: Subst<Symbol, u8, u8> = Subst::new();
    assert!(s.is_empty());
    s.terms.insert(Symbol::from("x"), 1);
    let shown = format!("{:?}", s);
    assert!(shown.starts_with("Subst { terms: "));
    assert!(shown.contains("types: {}"));
}
