//! The pinned identity, dates and editor every tool invocation runs under.

use std::path::{Path, PathBuf};

use golden_utils::quote::shell_command;
use golden_utils::EnvOverlay;

use crate::error::ConfigError;

pub const IDENTITY_NAME: &str = "Tester";
pub const IDENTITY_EMAIL: &str = "test@invalid";
pub const COMMITTER_DATE: &str = "2026-01-01 12:00:00 +0000";

/// Line the editor appends to every commit message it is asked to edit.
pub const REWORD_LINE: &str = "LINE ADDED BY REWORD";

/// Subcommand of the runner binary that implements the editor.
pub const APPEND_LINE_COMMAND: &str = "append-line";

/// Non-interactive editor: `<program> append-line <LINE> <FILE>` appends
/// `LINE` to `FILE`. Git appends the file name when it runs the command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorHelper {
    program: String,
}

impl EditorHelper {
    /// Use `program` as the helper. The path ends up in git config values, so
    /// it must be valid UTF-8.
    pub fn new(program: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let program = program.into();
        let program = program
            .into_os_string()
            .into_string()
            .map_err(ConfigError::NonUtf8Helper)?;
        Ok(Self { program })
    }

    pub fn program(&self) -> &Path {
        Path::new(&self.program)
    }

    /// Shell command that appends `line` to the file git passes after it.
    pub fn command(&self, line: &str) -> String {
        // Quoted words of valid UTF-8 stay valid UTF-8.
        shell_command([self.program.as_str(), APPEND_LINE_COMMAND, line])
            .to_string()
    }
}

/// Environment overlay that makes committer metadata and message editing
/// reproducible.
#[derive(Debug, Clone)]
pub struct DeterministicEnv {
    editor: String,
}

impl DeterministicEnv {
    pub fn new(helper: &EditorHelper) -> Self {
        Self {
            editor: helper.command(REWORD_LINE),
        }
    }

    pub fn editor(&self) -> &str {
        &self.editor
    }

    pub fn overlay(&self) -> EnvOverlay {
        EnvOverlay::new()
            .set("GIT_COMMITTER_NAME", IDENTITY_NAME)
            .set("GIT_COMMITTER_EMAIL", IDENTITY_EMAIL)
            .set("GIT_COMMITTER_DATE", COMMITTER_DATE)
            .set("GIT_EDITOR", &self.editor)
    }
}
