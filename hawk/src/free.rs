use crate::Symbol;
use core::fmt;

/// Free variable, such as the `x` in `λ y. f x y`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Free<Ty> {
    pub name: Symbol,
    pub ty: Ty,
}

/// Named and typed leaf of a term.
pub trait Variable {
    type Ty;
    fn name(&self) -> &Symbol;
    fn ty(&self) -> &Self::Ty;
}

impl<Ty> Free<Ty> {
    pub fn new(name: impl Into<Symbol>, ty: Ty) -> Self {
        let name = name.into();
        Self { name, ty }
    }

    pub fn map_ty<F, U>(self, f: F) -> Free<U>
    where
        F: FnOnce(Ty) -> U,
    {
        let ty = f(self.ty);
        Free { name: self.name, ty }
    }

    pub fn try_map_ty<F, U, E>(&self, f: F) -> Result<Free<U>, E>
    where
        F: FnOnce(&Ty) -> Result<U, E>,
    {
        let ty = f(&self.ty)?;
        Ok(Free { name: self.name.clone(), ty })
    }
}

impl<Ty> Variable for Free<Ty> {
    type Ty = Ty;

    fn name(&self) -> &Symbol {
        &self.name
    }

    fn ty(&self) -> &Ty {
        &self.ty
    }
}

impl<Ty> fmt::Display for Free<Ty> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.name.fmt(f)
    }
}
