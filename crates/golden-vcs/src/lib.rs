//! Named git operations for preparing and inspecting test checkouts.
//!
//! Every operation is `git <operation> <args...>` run through
//! [`ProcessCommand`]. Setup operations inherit the terminal so their output
//! is visible live; inspection operations capture combined output. No
//! operation treats a non-zero exit as an error: callers decide which results
//! matter.

use std::ffi::{OsStr, OsString};
use std::path::Path;

use bstr::BString;
use golden_utils::{ProcessCommand, ProcessResult, UtilError};

/// Arguments of the history view recorded for every case: full patches with
/// zero context, graph-annotated, fuller metadata, author-date order and
/// separate diffs for merge parents.
pub const LOG_ARGS: &[&str] = &[
    "log",
    "-p",
    "-U0",
    "--diff-merges=separate",
    "--author-date-order",
    "--graph",
    "--format=fuller",
];

/// Errors from running git.
#[derive(Debug, thiserror::Error)]
pub enum VcsError {
    #[error(transparent)]
    Process(#[from] UtilError),
}

pub type Result<T> = std::result::Result<T, VcsError>;

/// Driver for the git command-line tool.
#[derive(Debug, Clone)]
pub struct Git {
    program: OsString,
}

impl Default for Git {
    fn default() -> Self {
        Self::new("git")
    }
}

impl Git {
    /// Create a driver that runs the given git executable.
    pub fn new(program: impl AsRef<OsStr>) -> Self {
        Self {
            program: program.as_ref().to_os_string(),
        }
    }

    /// The git executable this driver runs.
    pub fn program(&self) -> &OsStr {
        &self.program
    }

    fn command(&self, cwd: &Path) -> ProcessCommand {
        ProcessCommand::new(&self.program).working_dir(cwd)
    }

    fn run(&self, cwd: &Path, args: &[&OsStr]) -> Result<ProcessResult> {
        Ok(self.command(cwd).args(args).run()?)
    }

    fn capture(&self, cwd: &Path, args: &[&OsStr]) -> Result<BString> {
        Ok(self.command(cwd).args(args).capture(true).run()?.into_output())
    }

    /// `git clone <bundle> <name>` inside `cwd`. Fails harmlessly when the
    /// clone already exists.
    pub fn clone_bundle(&self, cwd: &Path, bundle: &Path, name: &str) -> Result<ProcessResult> {
        self.run(
            cwd,
            &[OsStr::new("clone"), bundle.as_os_str(), OsStr::new(name)],
        )
    }

    /// `git config <key> <value>`.
    pub fn set_config(&self, repo: &Path, key: &str, value: &str) -> Result<ProcessResult> {
        self.run(repo, &[OsStr::new("config"), OsStr::new(key), OsStr::new(value)])
    }

    /// `git rebase --abort`. Fails harmlessly when no rebase is in progress.
    pub fn rebase_abort(&self, repo: &Path) -> Result<ProcessResult> {
        self.run(repo, &[OsStr::new("rebase"), OsStr::new("--abort")])
    }

    /// `git checkout <branch>`.
    pub fn checkout(&self, repo: &Path, branch: &str) -> Result<ProcessResult> {
        self.run(repo, &[OsStr::new("checkout"), OsStr::new(branch)])
    }

    /// `git reset --hard <rev>`.
    pub fn reset_hard(&self, repo: &Path, rev: &str) -> Result<ProcessResult> {
        self.run(repo, &[OsStr::new("reset"), OsStr::new("--hard"), OsStr::new(rev)])
    }

    /// `git apply <patch>`.
    pub fn apply(&self, repo: &Path, patch: &Path) -> Result<ProcessResult> {
        self.run(repo, &[OsStr::new("apply"), patch.as_os_str()])
    }

    /// `git add .`.
    pub fn add_all(&self, repo: &Path) -> Result<ProcessResult> {
        self.run(repo, &[OsStr::new("add"), OsStr::new(".")])
    }

    /// History with patch bodies in the fixed [`LOG_ARGS`] format, starting
    /// at `rev` or at `HEAD` when `rev` is `None`.
    pub fn log_patches(&self, repo: &Path, rev: Option<&str>) -> Result<BString> {
        let mut args: Vec<&OsStr> = LOG_ARGS.iter().map(OsStr::new).collect();
        if let Some(rev) = rev {
            args.push(OsStr::new(rev));
        }
        self.capture(repo, &args)
    }

    /// `git diff`: unstaged working-tree changes.
    pub fn diff_worktree(&self, repo: &Path) -> Result<BString> {
        self.capture(repo, &[OsStr::new("diff")])
    }

    /// `git diff --staged`.
    pub fn diff_staged(&self, repo: &Path) -> Result<BString> {
        self.capture(repo, &[OsStr::new("diff"), OsStr::new("--staged")])
    }

    /// `git diff --no-index -U1 <old> <new>`, run in `cwd` so relative paths
    /// appear in the header as given.
    pub fn diff_files(&self, cwd: &Path, old: &Path, new: &Path) -> Result<BString> {
        self.capture(
            cwd,
            &[
                OsStr::new("diff"),
                OsStr::new("--no-index"),
                OsStr::new("-U1"),
                old.as_os_str(),
                new.as_os_str(),
            ],
        )
    }

    /// Word-level colorized diff between `expected` on disk and `actual`,
    /// which is fed to git through stdin.
    pub fn word_diff_stdin(&self, cwd: &Path, expected: &Path, actual: &[u8]) -> Result<BString> {
        let result = self
            .command(cwd)
            .args([
                OsStr::new("diff"),
                OsStr::new("--no-index"),
                OsStr::new("--word-diff=color"),
                expected.as_os_str(),
                OsStr::new("-"),
            ])
            .stdin_text(actual)
            .capture(true)
            .run()?;
        Ok(result.into_output())
    }
}
