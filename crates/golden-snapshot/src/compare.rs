use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use bstr::BString;
use golden_vcs::{Git, VcsError};

use crate::error::SnapshotError;
use crate::Result;

/// What to do with a fresh artifact given the recorded one, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Nothing recorded yet.
    Record,
    /// Recorded content is identical.
    Match,
    /// Recorded content differs.
    Mismatch,
}

impl Verdict {
    pub fn decide(expected: Option<&[u8]>, actual: &[u8]) -> Self {
        match expected {
            None => Verdict::Record,
            Some(expected) if expected == actual => Verdict::Match,
            Some(_) => Verdict::Mismatch,
        }
    }
}

/// Successful comparison result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The snapshot did not exist and has been written.
    Recorded,
    /// The snapshot exists and matches.
    Matched,
}

/// Renders the difference between a recorded snapshot and fresh output.
pub trait DiffRenderer {
    fn render(&self, expected: &Path, actual: &[u8]) -> std::result::Result<BString, VcsError>;
}

/// Word-level colorized diff through `git diff --no-index`.
#[derive(Debug, Clone)]
pub struct GitWordDiff {
    git: Git,
}

impl GitWordDiff {
    pub fn new(git: Git) -> Self {
        Self { git }
    }
}

impl DiffRenderer for GitWordDiff {
    fn render(&self, expected: &Path, actual: &[u8]) -> std::result::Result<BString, VcsError> {
        let cwd = expected
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        self.git.word_diff_stdin(cwd, expected, actual)
    }
}

/// Records or verifies snapshot files.
pub struct Comparator<R> {
    renderer: R,
}

impl<R: DiffRenderer> Comparator<R> {
    pub fn new(renderer: R) -> Self {
        Self { renderer }
    }

    /// Compare `actual` with the snapshot at `expected_path`.
    ///
    /// A missing snapshot is written verbatim. A differing snapshot is left
    /// untouched and reported as [`SnapshotError::Mismatch`] with a rendered
    /// diff.
    pub fn compare(&self, label: &str, expected_path: &Path, actual: &[u8]) -> Result<Outcome> {
        let expected = read_optional(expected_path).map_err(|source| SnapshotError::Read {
            label: label.to_string(),
            path: expected_path.to_path_buf(),
            source,
        })?;

        match Verdict::decide(expected.as_deref(), actual) {
            Verdict::Match => {
                tracing::trace!(label, path = %expected_path.display(), "snapshot matched");
                Ok(Outcome::Matched)
            }
            Verdict::Record => {
                fs::write(expected_path, actual).map_err(|source| SnapshotError::Write {
                    label: label.to_string(),
                    path: expected_path.to_path_buf(),
                    source,
                })?;
                tracing::debug!(label, path = %expected_path.display(), "snapshot recorded");
                Ok(Outcome::Recorded)
            }
            Verdict::Mismatch => {
                let diff = self
                    .renderer
                    .render(expected_path, actual)
                    .map_err(|source| SnapshotError::Render {
                        label: label.to_string(),
                        source,
                    })?;
                Err(SnapshotError::Mismatch {
                    label: label.to_string(),
                    path: expected_path.to_path_buf(),
                    diff,
                })
            }
        }
    }
}

fn read_optional(path: &Path) -> std::io::Result<Option<Vec<u8>>> {
    match fs::read(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}
