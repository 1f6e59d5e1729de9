//! Shared harness for golden-runner integration tests.
//!
//! Builds a throwaway suite root with a fixture repository bundle, a patch
//! and test case declarations. Fixture history is created with pinned
//! identities and dates so every fixture has the same commit ids.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use golden_runner::{
    EditorHelper, RunnerConfig, Suite, SuiteError, SuiteLayout, SuiteReport, ToolCommand,
};
use golden_vcs::Git;
use tempfile::TempDir;

// ──────────────────────────── Binary Discovery ────────────────────────────

/// The compiled runner, which is also the editor helper.
pub fn runner_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_golden-run"))
}

// ──────────────────────────── Process Runners ────────────────────────────

/// Apply the pinned environment to a `Command`.
pub fn pin_env(cmd: &mut Command, home: &Path) {
    cmd.env("GIT_AUTHOR_NAME", "Test Author")
        .env("GIT_AUTHOR_EMAIL", "test@example.com")
        .env("GIT_AUTHOR_DATE", "1234567890 +0000")
        .env("GIT_COMMITTER_NAME", "Test Committer")
        .env("GIT_COMMITTER_EMAIL", "test@example.com")
        .env("GIT_COMMITTER_DATE", "1234567890 +0000")
        .env("TZ", "UTC")
        .env("LC_ALL", "C")
        .env("LANG", "C")
        .env("GIT_CONFIG_NOSYSTEM", "1")
        .env("HOME", home);
}

/// Run git in `dir`, panicking on failure. Returns stdout.
pub fn git(dir: &Path, args: &[&str]) -> String {
    let mut cmd = Command::new("git");
    cmd.args(args).current_dir(dir);
    pin_env(&mut cmd, dir);
    let output = cmd.output().expect("failed to run git");
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).to_string()
}

// ──────────────────────────── Suite Fixture ────────────────────────────

pub const REPO: &str = "linear";
pub const PATCH: &str = "edit.patch";

/// Declaration that amends HEAD through the scripted editor.
pub const REWORD_CASE: &str = r#"{
    "repo": "linear",
    "patch": "edit.patch",
    "type": "commit",
    "args": ["--amend"]
}"#;

/// A suite root laid out as `tests/`, `repos/` and `patches/`.
pub struct Fixture {
    dir: TempDir,
}

impl Fixture {
    /// Two-commit upstream on `main`, bundled as `repos/linear.bundle`, plus
    /// a patch that edits a tracked file.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        for sub in ["tests", "repos", "patches"] {
            fs::create_dir(root.join(sub)).unwrap();
        }

        let upstream = root.join("upstream");
        fs::create_dir(&upstream).unwrap();
        git(&upstream, &["init", "-q", "-b", "main"]);
        git(&upstream, &["config", "commit.gpgsign", "false"]);
        fs::write(upstream.join("file.txt"), "one\ntwo\n").unwrap();
        git(&upstream, &["add", "file.txt"]);
        git(&upstream, &["commit", "-q", "-m", "initial"]);
        fs::write(upstream.join("notes.txt"), "note\n").unwrap();
        git(&upstream, &["add", "notes.txt"]);
        git(&upstream, &["commit", "-q", "-m", "add notes"]);

        let bundle = root.join("repos").join(format!("{REPO}.bundle"));
        git(
            &upstream,
            &["bundle", "create", bundle.to_str().unwrap(), "HEAD", "main"],
        );

        fs::write(
            root.join("patches").join(PATCH),
            "diff --git a/file.txt b/file.txt\n\
             --- a/file.txt\n\
             +++ b/file.txt\n\
             @@ -1,2 +1,2 @@\n \
             one\n\
             -two\n\
             +patched\n",
        )
        .unwrap();

        Self { dir }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn upstream(&self) -> PathBuf {
        self.root().join("upstream")
    }

    pub fn checkout(&self) -> PathBuf {
        self.root().join("repos").join(REPO)
    }

    pub fn case_dir(&self, name: &str) -> PathBuf {
        self.root().join("tests").join(name)
    }

    /// Create a case directory with the given declaration.
    pub fn add_case(&self, name: &str, declaration: &str) -> PathBuf {
        let dir = self.case_dir(name);
        fs::create_dir(&dir).unwrap();
        fs::write(dir.join("test.json"), declaration).unwrap();
        dir
    }

    pub fn expected(&self, case: &str, file: &str) -> Option<String> {
        fs::read_to_string(self.case_dir(case).join(file)).ok()
    }

    /// Runner configuration using plain `git` as the tool under test.
    pub fn config(&self) -> RunnerConfig {
        RunnerConfig::new(
            SuiteLayout::new(self.root()).unwrap(),
            ToolCommand::new("git"),
            Git::default(),
            EditorHelper::new(runner_bin()).unwrap(),
        )
    }

    /// Run the suite in-process, returning the result and printed progress.
    pub fn run(&self) -> (Result<SuiteReport, SuiteError>, String) {
        let config = self.config();
        let mut out = Vec::new();
        let result = Suite::new(&config).run(&mut out);
        (result, String::from_utf8(out).unwrap())
    }
}
