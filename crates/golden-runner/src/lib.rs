//! Golden-file regression runner for a history-rewriting git tool.
//!
//! For every case under `<root>/tests/` the runner resets a cached checkout
//! of a fixture repository, applies a patch, invokes the tool under test with
//! pinned committer metadata and a scripted editor, then compares command
//! output, history before and after, the difference between the two and the
//! remaining worktree and index changes against recorded snapshots.

pub mod artifact;
pub mod case;
pub mod config;
pub mod declaration;
pub mod environment;
pub mod error;
pub mod helper;
pub mod logging;
pub mod settings;
pub mod suite;

pub use artifact::Artifact;
pub use case::{CaseReport, CaseRunner, TestCase};
pub use config::{RunnerConfig, SuiteLayout, ToolCommand};
pub use declaration::Declaration;
pub use environment::{DeterministicEnv, EditorHelper};
pub use error::{CaseError, ConfigError, SuiteError};
pub use suite::{Suite, SuiteReport};
