pub mod env;
pub mod error;
pub mod quote;
pub mod subprocess;

// Re-export core types at crate root for convenience
pub use bstr::{BStr, BString, ByteSlice, ByteVec};
pub use env::EnvOverlay;
pub use error::UtilError;
pub use subprocess::{ProcessCommand, ProcessResult};

pub type Result<T> = std::result::Result<T, UtilError>;
