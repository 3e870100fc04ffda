/// Central error type.
#[derive(Debug)]
pub enum Error {
    /// no session of the given name
    NoSession(String),
    Hawk(hawk::Error),
}

impl From<hawk::Error> for Error {
    fn from(err: hawk::Error) -> Self {
        Self::Hawk(err)
    }
}

impl From<hawk::workspace::Error> for Error {
    fn from(err: hawk::workspace::Error) -> Self {
        Self::Hawk(err.into())
    }
}

impl From<hawk::kernel::Error> for Error {
    fn from(err: hawk::kernel::Error) -> Self {
        Self::Hawk(err.into())
    }
}
