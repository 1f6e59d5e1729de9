use std::path::PathBuf;

use bstr::BString;

/// Errors from comparing or recording a snapshot.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    /// The recorded snapshot differs from the fresh output.
    #[error("{label} does not match expected output")]
    Mismatch {
        label: String,
        path: PathBuf,
        /// Rendered, human-readable difference.
        diff: BString,
    },

    #[error("unable to read expected {label} output '{path}': {source}")]
    Read {
        label: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unable to write expected {label} output '{path}': {source}")]
    Write {
        label: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unable to render {label} difference: {source}")]
    Render {
        label: String,
        #[source]
        source: golden_vcs::VcsError,
    },
}

impl SnapshotError {
    /// True for a content mismatch, as opposed to an I/O or rendering failure.
    pub fn is_mismatch(&self) -> bool {
        matches!(self, SnapshotError::Mismatch { .. })
    }
}
