use std::ffi::{OsStr, OsString};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

use bstr::BString;

use crate::env::EnvOverlay;
use crate::error::UtilError;
use crate::Result;

/// Result of running a subprocess.
///
/// A non-zero exit is not an error; callers inspect `status`.
#[derive(Debug)]
pub struct ProcessResult {
    /// The exit status.
    pub status: ExitStatus,
    /// Interleaved stdout and stderr, if capture was requested.
    pub output: Option<BString>,
}

impl ProcessResult {
    /// Returns true if the process exited successfully.
    pub fn success(&self) -> bool {
        self.status.success()
    }

    /// The exit code, or `None` if the process was killed by a signal.
    pub fn code(&self) -> Option<i32> {
        self.status.code()
    }

    /// Captured output, empty if the command was not captured.
    pub fn output(&self) -> &[u8] {
        self.output.as_ref().map(|o| o.as_slice()).unwrap_or_default()
    }

    /// Take ownership of the captured output.
    pub fn into_output(self) -> BString {
        self.output.unwrap_or_default()
    }
}

/// Builder for subprocess execution.
///
/// Wraps `std::process::Command` with a fluent API. The child always starts
/// from the inherited environment plus an [`EnvOverlay`]. Without capture the
/// child shares this process's stdout and stderr; with capture both streams go
/// into one pipe so the result holds them in the order they were written.
pub struct ProcessCommand {
    program: OsString,
    args: Vec<OsString>,
    overlay: EnvOverlay,
    stdin_text: Option<BString>,
    capture: bool,
    working_dir: Option<PathBuf>,
}

impl ProcessCommand {
    /// Create a new command builder for the given program.
    pub fn new(program: impl AsRef<OsStr>) -> Self {
        Self {
            program: program.as_ref().to_os_string(),
            args: Vec::new(),
            overlay: EnvOverlay::new(),
            stdin_text: None,
            capture: false,
            working_dir: None,
        }
    }

    /// Add an argument.
    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    /// Add multiple arguments.
    pub fn args(mut self, args: impl IntoIterator<Item = impl AsRef<OsStr>>) -> Self {
        for arg in args {
            self.args.push(arg.as_ref().to_os_string());
        }
        self
    }

    /// Layer an environment overlay on top of the inherited environment.
    pub fn overlay(mut self, overlay: &EnvOverlay) -> Self {
        for (key, val) in overlay.iter() {
            self.overlay = self.overlay.set(key, val);
        }
        self
    }

    /// Feed text to the child's stdin. Without this stdin is inherited.
    pub fn stdin_text(mut self, text: impl Into<BString>) -> Self {
        self.stdin_text = Some(text.into());
        self
    }

    /// Capture combined stdout and stderr instead of inheriting them.
    pub fn capture(mut self, capture: bool) -> Self {
        self.capture = capture;
        self
    }

    /// Set the working directory.
    pub fn working_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.working_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Build the underlying `std::process::Command`, without stdout/stderr.
    fn build_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        for (key, val) in self.overlay.iter() {
            cmd.env(key, val);
        }
        cmd.stdin(if self.stdin_text.is_some() {
            Stdio::piped()
        } else {
            Stdio::inherit()
        });
        if let Some(ref dir) = self.working_dir {
            cmd.current_dir(dir);
        }
        cmd
    }

    /// Get the command string for error messages.
    fn command_string(&self) -> String {
        let mut s = self.program.to_string_lossy().to_string();
        for arg in &self.args {
            s.push(' ');
            s.push_str(&arg.to_string_lossy());
        }
        s
    }

    /// Run the command and wait for it to complete.
    pub fn run(&self) -> Result<ProcessResult> {
        let cmd_str = self.command_string();
        let subprocess_err = |source: std::io::Error| UtilError::Subprocess {
            command: cmd_str.clone(),
            source,
        };

        tracing::debug!(
            command = %cmd_str,
            cwd = ?self.working_dir,
            capture = self.capture,
            "running subprocess"
        );

        let mut cmd = self.build_command();
        let reader = if self.capture {
            let (reader, writer) = std::io::pipe().map_err(subprocess_err)?;
            let err_writer = writer.try_clone().map_err(subprocess_err)?;
            cmd.stdout(writer);
            cmd.stderr(err_writer);
            Some(reader)
        } else {
            cmd.stdout(Stdio::inherit());
            cmd.stderr(Stdio::inherit());
            None
        };

        let mut child = cmd.spawn().map_err(subprocess_err)?;
        // The command still owns the write ends of the pipe; the reader only
        // sees EOF once every copy is closed.
        drop(cmd);

        let stdin = child.stdin.take();
        let output = std::thread::scope(|scope| -> std::io::Result<Option<BString>> {
            if let (Some(mut pipe), Some(text)) = (stdin, self.stdin_text.as_ref()) {
                scope.spawn(move || {
                    // The child may exit without reading all of its input.
                    let _ = pipe.write_all(text);
                });
            }
            match reader {
                Some(mut reader) => {
                    let mut buf = Vec::new();
                    reader.read_to_end(&mut buf)?;
                    Ok(Some(BString::from(buf)))
                }
                None => Ok(None),
            }
        })
        .map_err(subprocess_err)?;

        let status = child.wait().map_err(subprocess_err)?;
        tracing::trace!(command = %cmd_str, %status, "subprocess finished");

        Ok(ProcessResult { status, output })
    }
}
