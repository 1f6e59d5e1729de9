//! Golden snapshot files.
//!
//! A snapshot is recorded the first time it is seen and compared
//! byte-for-byte on every later run. There is no update mode: deleting the
//! file asks for it to be recorded again.

mod compare;
mod error;

pub use compare::{Comparator, DiffRenderer, GitWordDiff, Outcome, Verdict};
pub use error::SnapshotError;

pub type Result<T> = std::result::Result<T, SnapshotError>;
