//! Running a single test case.

use std::io::Write;
use std::path::{Path, PathBuf};

use bstr::BString;
use golden_snapshot::{Comparator, GitWordDiff, Outcome};
use golden_utils::{ProcessCommand, ProcessResult};

use crate::artifact::Artifact;
use crate::config::RunnerConfig;
use crate::declaration::{Declaration, DECLARATION_FILE};
use crate::environment::DeterministicEnv;
use crate::error::CaseError;
use crate::settings;

/// Branch every checkout is reset onto.
pub const MAIN_BRANCH: &str = "main";
/// Upstream head the checkout is reset to.
pub const UPSTREAM_HEAD: &str = "origin/HEAD";

/// A discovered case: display name plus its directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCase {
    pub name: String,
    pub dir: PathBuf,
}

impl TestCase {
    pub fn new(name: impl Into<String>, dir: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            dir: dir.into(),
        }
    }

    pub fn declaration_path(&self) -> PathBuf {
        self.dir.join(DECLARATION_FILE)
    }

    pub fn expected_path(&self, artifact: Artifact) -> PathBuf {
        self.dir.join(artifact.file_name())
    }
}

/// Per-artifact results of a passing case, in check order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaseReport {
    pub outcomes: Vec<(Artifact, Outcome)>,
}

impl CaseReport {
    pub fn recorded(&self) -> impl Iterator<Item = Artifact> + '_ {
        self.outcomes
            .iter()
            .filter(|(_, o)| *o == Outcome::Recorded)
            .map(|(a, _)| *a)
    }
}

/// Prepares a checkout, runs the tool and checks every artifact.
pub struct CaseRunner<'a> {
    config: &'a RunnerConfig,
    env: DeterministicEnv,
    comparator: Comparator<GitWordDiff>,
}

impl<'a> CaseRunner<'a> {
    pub fn new(config: &'a RunnerConfig) -> Self {
        Self {
            config,
            env: DeterministicEnv::new(&config.helper),
            comparator: Comparator::new(GitWordDiff::new(config.git.clone())),
        }
    }

    /// Run `case`, printing a notice to `out` for each recorded snapshot.
    ///
    /// Stops at the first artifact that does not match; later artifacts are
    /// neither produced nor recorded.
    pub fn run(&self, case: &TestCase, out: &mut dyn Write) -> Result<CaseReport, CaseError> {
        let decl = Declaration::load(&case.declaration_path())?;
        tracing::debug!(case = %case.name, repo = %decl.repo, kind = %decl.kind, "loaded declaration");

        let checkout = self.materialize(&decl)?;
        self.configure(&checkout, &decl)?;
        self.reset(&checkout)?;
        self.apply_patch(&checkout, &decl)?;
        let tool_output = self.invoke_tool(&checkout, &decl)?;

        let mut report = CaseReport::default();
        for artifact in Artifact::ORDER {
            let Some(raw) = self.produce(artifact, case, &checkout, tool_output.as_ref())? else {
                continue;
            };
            let outcome = self.check(case, artifact, &raw, out)?;
            report.outcomes.push((artifact, outcome));
        }
        Ok(report)
    }

    fn materialize(&self, decl: &Declaration) -> Result<PathBuf, CaseError> {
        let layout = &self.config.layout;
        let result = self.config.git.clone_bundle(
            &layout.repos_dir(),
            &layout.bundle(&decl.repo),
            &decl.repo,
        )?;
        if !result.success() {
            tracing::debug!(repo = %decl.repo, "clone failed; reusing existing checkout");
        }
        Ok(layout.checkout(&decl.repo))
    }

    fn configure(&self, checkout: &Path, decl: &Declaration) -> Result<(), CaseError> {
        for (key, value) in settings::resolve(&decl.config, &self.config.helper) {
            let result = self.config.git.set_config(checkout, &key, &value)?;
            warn_on_failure(&result, "config", &key);
        }
        Ok(())
    }

    fn reset(&self, checkout: &Path) -> Result<(), CaseError> {
        let git = &self.config.git;
        let abort = git.rebase_abort(checkout)?;
        if !abort.success() {
            tracing::trace!("no rebase in progress");
        }
        warn_on_failure(&git.checkout(checkout, MAIN_BRANCH)?, "checkout", MAIN_BRANCH);
        warn_on_failure(&git.reset_hard(checkout, UPSTREAM_HEAD)?, "reset", UPSTREAM_HEAD);
        Ok(())
    }

    fn apply_patch(&self, checkout: &Path, decl: &Declaration) -> Result<(), CaseError> {
        let git = &self.config.git;
        warn_on_failure(
            &git.apply(checkout, &self.config.layout.patch(&decl.patch))?,
            "apply",
            &decl.patch,
        );
        warn_on_failure(&git.add_all(checkout)?, "add", ".");
        Ok(())
    }

    /// Run the tool in the checkout. Its output is returned only when the
    /// declaration asks for it to be recorded.
    fn invoke_tool(&self, checkout: &Path, decl: &Declaration) -> Result<Option<BString>, CaseError> {
        let tool = &self.config.tool;
        let result = ProcessCommand::new(&tool.program)
            .args(&tool.args)
            .arg(&decl.kind)
            .args(&decl.args)
            .working_dir(checkout)
            .overlay(&self.env.overlay())
            .capture(decl.test_out)
            .run()?;
        tracing::debug!(kind = %decl.kind, code = ?result.code(), "tool finished");
        Ok(result.output)
    }

    /// Capture the raw bytes of one artifact. Command output exists only if
    /// the tool was captured.
    fn produce(
        &self,
        artifact: Artifact,
        case: &TestCase,
        checkout: &Path,
        tool_output: Option<&BString>,
    ) -> Result<Option<BString>, CaseError> {
        let git = &self.config.git;
        let raw = match artifact {
            Artifact::CommandOutput => return Ok(tool_output.cloned()),
            Artifact::OldLog => git.log_patches(checkout, Some(UPSTREAM_HEAD))?,
            Artifact::NewLog => git.log_patches(checkout, None)?,
            Artifact::LogDiff => git.diff_files(
                &case.dir,
                Path::new(Artifact::OldLog.file_name()),
                Path::new(Artifact::NewLog.file_name()),
            )?,
            Artifact::Changes => git.diff_worktree(checkout)?,
            Artifact::Staged => git.diff_staged(checkout)?,
        };
        Ok(Some(raw))
    }

    fn check(
        &self,
        case: &TestCase,
        artifact: Artifact,
        raw: &[u8],
        out: &mut dyn Write,
    ) -> Result<Outcome, CaseError> {
        let actual = artifact.normalize(raw);
        let outcome =
            self.comparator
                .compare(artifact.label(), &case.expected_path(artifact), &actual)?;
        if outcome == Outcome::Recorded {
            writeln!(
                out,
                "Test \"{}\": created expected {} output.",
                case.name,
                artifact.label()
            )?;
        }
        Ok(outcome)
    }
}

fn warn_on_failure(result: &ProcessResult, operation: &str, subject: &str) {
    if !result.success() {
        tracing::warn!(operation, subject, code = ?result.code(), "git step failed; continuing");
    }
}
