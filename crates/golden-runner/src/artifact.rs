//! Observable artifacts of a case, in the order they are checked.

use bstr::{BString, ByteSlice};

/// Number of header lines (`diff --git`, `index`, `---`, `+++`) in a
/// no-index diff of two files.
const DIFF_HEADER_LINES: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Artifact {
    CommandOutput,
    OldLog,
    NewLog,
    LogDiff,
    Changes,
    Staged,
}

impl Artifact {
    /// Check order. Later artifacts are not produced once one mismatches.
    pub const ORDER: [Artifact; 6] = [
        Artifact::CommandOutput,
        Artifact::OldLog,
        Artifact::NewLog,
        Artifact::LogDiff,
        Artifact::Changes,
        Artifact::Staged,
    ];

    /// Name used in progress and failure messages.
    pub fn label(self) -> &'static str {
        match self {
            Artifact::CommandOutput => "command output",
            Artifact::OldLog => "old log",
            Artifact::NewLog => "new log",
            Artifact::LogDiff => "log diff",
            Artifact::Changes => "changes",
            Artifact::Staged => "staged",
        }
    }

    /// Expected-output file inside the case directory.
    pub fn file_name(self) -> &'static str {
        match self {
            Artifact::CommandOutput => "out.txt",
            Artifact::OldLog => "log_old.txt",
            Artifact::NewLog => "log_new.txt",
            Artifact::LogDiff => "log.diff",
            Artifact::Changes => "diff.txt",
            Artifact::Staged => "diff_staged.txt",
        }
    }

    /// Normalize raw captured bytes into the form that is recorded.
    pub fn normalize(self, raw: &[u8]) -> BString {
        match self {
            Artifact::CommandOutput | Artifact::OldLog | Artifact::NewLog => trim(raw),
            Artifact::LogDiff => strip_diff_header(raw),
            Artifact::Changes | Artifact::Staged => BString::from(raw),
        }
    }
}

/// Drop leading and trailing whitespace.
pub fn trim(raw: &[u8]) -> BString {
    BString::from(raw.trim())
}

/// Drop the file header of a two-file diff and rejoin the remaining lines
/// with `\n`, without a trailing newline.
pub fn strip_diff_header(raw: &[u8]) -> BString {
    let body: Vec<&[u8]> = raw.lines().skip(DIFF_HEADER_LINES).collect();
    BString::from(bstr::join(b"\n", body))
}
