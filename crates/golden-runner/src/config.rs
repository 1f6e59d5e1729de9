//! Runner configuration and the on-disk layout of a suite.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use golden_vcs::Git;

use crate::environment::EditorHelper;
use crate::error::ConfigError;

/// Directory layout under the suite root:
///
/// ```text
/// <root>/tests/<case>/test.json   declarations and expected outputs
/// <root>/repos/<repo>.bundle      fixture repositories
/// <root>/repos/<repo>/            cached checkouts
/// <root>/patches/<patch>          patches applied before the tool runs
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuiteLayout {
    root: PathBuf,
}

impl SuiteLayout {
    /// Anchor the layout at `root`, made absolute so that paths stay valid
    /// from any working directory.
    pub fn new(root: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let root = root.as_ref();
        let root = std::path::absolute(root).map_err(|source| ConfigError::Resolve {
            path: root.to_path_buf(),
            source,
        })?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn tests_dir(&self) -> PathBuf {
        self.root.join("tests")
    }

    pub fn repos_dir(&self) -> PathBuf {
        self.root.join("repos")
    }

    pub fn patches_dir(&self) -> PathBuf {
        self.root.join("patches")
    }

    pub fn bundle(&self, repo: &str) -> PathBuf {
        self.repos_dir().join(format!("{repo}.bundle"))
    }

    pub fn checkout(&self, repo: &str) -> PathBuf {
        self.repos_dir().join(repo)
    }

    pub fn patch(&self, name: &str) -> PathBuf {
        self.patches_dir().join(name)
    }
}

/// The tool under test: a program plus leading arguments placed before the
/// case's subcommand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    pub program: OsString,
    pub args: Vec<OsString>,
}

impl ToolCommand {
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn with_args<I, A>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Resolve a program given as a relative path against the current
    /// directory. Bare names are left for `PATH` lookup.
    pub fn resolve(mut self) -> Result<Self, ConfigError> {
        let program = Path::new(&self.program);
        if program.components().count() > 1 && program.is_relative() {
            let resolved = std::path::absolute(program).map_err(|source| ConfigError::Resolve {
                path: program.to_path_buf(),
                source,
            })?;
            self.program = resolved.into_os_string();
        }
        Ok(self)
    }
}

/// Everything a suite run needs.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    pub layout: SuiteLayout,
    pub tool: ToolCommand,
    pub git: Git,
    pub helper: EditorHelper,
}

impl RunnerConfig {
    pub fn new(layout: SuiteLayout, tool: ToolCommand, git: Git, helper: EditorHelper) -> Self {
        Self {
            layout,
            tool,
            git,
            helper,
        }
    }
}
