//! Common error type.

use crate::kernel::Error as KernelError;
use crate::shadow::Error as ShadowError;
use crate::workspace::Error as WorkspaceError;

/// Common error type.
#[derive(Debug)]
pub enum Error {
    Kernel(KernelError),
    Shadow(ShadowError),
    Workspace(WorkspaceError),
}

impl From<KernelError> for Error {
    fn from(err: KernelError) -> Self {
        Self::Kernel(err)
    }
}

impl From<ShadowError> for Error {
    fn from(err: ShadowError) -> Self {
        Self::Shadow(err)
    }
}

impl From<WorkspaceError> for Error {
    fn from(err: WorkspaceError) -> Self {
        Self::Workspace(err)
    }
}
