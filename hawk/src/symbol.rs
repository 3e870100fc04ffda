//! Shared names with fast cloning.

use alloc::rc::Rc;
use core::borrow::Borrow;
use core::fmt;

/// Shared name of a constant, type constructor, or variable.
///
/// This is implemented using a reference-counted pointer,
/// making cloning a constant-time operation.
/// In contrast to pointer-based symbol tables,
/// equality and hashing are performed on the contents, so
/// two symbols created from equivalent strings are equal:
///
/// ~~~
/// # use hawk::Symbol;
/// let s1 = Symbol::from("p");
/// let s2 = Symbol::from(String::from("p"));
/// assert_eq!(s1, s2);
/// assert_ne!(s1, Symbol::from("q"));
/// assert_eq!(s1.to_string(), "p");
/// ~~~
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol(Rc<str>);

impl Symbol {
    pub fn new(s: &str) -> Self {
        Self(Rc::from(s))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Symbol {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<alloc::string::String> for Symbol {
    fn from(s: alloc::string::String) -> Self {
        Self(Rc::from(s))
    }
}

impl core::ops::Deref for Symbol {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Symbol {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Symbol {
    fn eq(&self, other: &str) -> bool {
        &*self.0 == other
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.0.fmt(f)
    }
}
