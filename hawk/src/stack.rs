//! Last-in first-out sequences with scoped pushes.

use alloc::vec::Vec;

/// A `Vec` whose elements are visited from the most recently pushed one.
///
/// The stack holds binder types during instantiation (where index 0 is
/// the innermost binder), the theorems proved so far by a strategy,
/// the nested scopes of a workspace, and the goals being proved.
///
/// ~~~
/// # use hawk::Stack;
/// let mut s = Stack::new();
/// s.push(1);
/// s.push(2);
/// let inner = s.with_pushed(3, |s| s.iter().copied().collect::<Vec<_>>());
/// assert_eq!(inner, [3, 2, 1]);
/// assert_eq!(s.get(0), Some(&2));
/// assert_eq!(s.len(), 2);
/// ~~~
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Stack<A>(Vec<A>);

impl<A> Stack<A> {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn push(&mut self, x: A) {
        self.0.push(x)
    }

    pub fn pop(&mut self) -> Option<A> {
        self.0.pop()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Element pushed `n` pushes before the most recent one.
    pub fn get(&self, n: usize) -> Option<&A> {
        self.iter().nth(n)
    }

    pub fn top_mut(&mut self) -> Option<&mut A> {
        self.0.last_mut()
    }

    /// Run `f` with `x` on top of the stack.
    ///
    /// `x` is removed again however `f` returns,
    /// so the stack afterwards has the same elements as before.
    pub fn with_pushed<F, Y>(&mut self, x: A, f: F) -> Y
    where
        F: FnOnce(&mut Stack<A>) -> Y,
    {
        self.0.push(x);
        let y = f(self);
        self.0.pop();
        y
    }

    /// Iterate from the most recently pushed element.
    pub fn iter(&self) -> impl Iterator<Item = &A> + Clone {
        self.0.iter().rev()
    }
}

impl<A> Default for Stack<A> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

#[test]
fn pushed_is_popped() {
    let mut s: Stack<u8> = Stack::new();
    let found: Option<u8> = s.with_pushed(1, |s| s.with_pushed(2, |s| s.get(1).copied()));
    assert_eq!(found, Some(1));
    assert!(s.is_empty());

    let none: Option<()> = s.with_pushed(3, |_| None);
    assert_eq!(none, None);
    assert!(s.is_empty());
}
