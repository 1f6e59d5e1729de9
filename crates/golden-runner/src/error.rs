use std::ffi::OsString;
use std::path::PathBuf;

use bstr::BString;
use golden_snapshot::SnapshotError;
use golden_utils::UtilError;
use golden_vcs::VcsError;

/// Errors that abort a single test case.
#[derive(Debug, thiserror::Error)]
pub enum CaseError {
    #[error("unable to read declaration '{path}': {source}")]
    ReadDeclaration {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid declaration '{path}': {source}")]
    ParseDeclaration {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Vcs(#[from] VcsError),

    #[error(transparent)]
    Process(#[from] UtilError),

    #[error(transparent)]
    Snapshot(#[from] SnapshotError),

    #[error("unable to write progress: {0}")]
    Output(#[from] std::io::Error),
}

/// Errors that stop the whole suite.
#[derive(Debug, thiserror::Error)]
pub enum SuiteError {
    #[error("unable to list test cases in '{path}': {source}")]
    Discover {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("test \"{case}\" failed: {source}")]
    Case {
        case: String,
        #[source]
        source: CaseError,
    },

    #[error("unable to write progress: {0}")]
    Output(#[from] std::io::Error),
}

impl SuiteError {
    /// The failing case, artifact label and rendered diff, if the suite
    /// stopped on a snapshot mismatch.
    pub fn mismatch(&self) -> Option<(&str, &str, &BString)> {
        match self {
            SuiteError::Case {
                case,
                source: CaseError::Snapshot(SnapshotError::Mismatch { label, diff, .. }),
            } => Some((case.as_str(), label.as_str(), diff)),
            _ => None,
        }
    }
}

/// Errors building the runner configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("unable to resolve path '{path}': {source}")]
    Resolve {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("editor helper path is not valid UTF-8: {0:?}")]
    NonUtf8Helper(OsString),
}
