mod error;
mod opt;
pub mod session;

pub use error::Error;
pub use opt::Opt;
pub use session::Session;
