//! Discovering and running every case of a suite.

use std::fs;
use std::io::Write;
use std::path::Path;

use crate::case::{CaseReport, CaseRunner, TestCase};
use crate::config::RunnerConfig;
use crate::error::SuiteError;

/// List the immediate subdirectories of `tests_dir`, sorted by name.
pub fn discover(tests_dir: &Path) -> Result<Vec<TestCase>, SuiteError> {
    let discover_err = |source: std::io::Error| SuiteError::Discover {
        path: tests_dir.to_path_buf(),
        source,
    };

    let mut cases = Vec::new();
    for entry in fs::read_dir(tests_dir).map_err(discover_err)? {
        let entry = entry.map_err(discover_err)?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        cases.push(TestCase::new(name, path));
    }
    cases.sort_by(|a, b| a.dir.cmp(&b.dir));
    Ok(cases)
}

/// Reports of the cases that passed, in run order.
#[derive(Debug, Default)]
pub struct SuiteReport {
    pub cases: Vec<(TestCase, CaseReport)>,
}

pub struct Suite<'a> {
    config: &'a RunnerConfig,
}

impl<'a> Suite<'a> {
    pub fn new(config: &'a RunnerConfig) -> Self {
        Self { config }
    }

    /// Run each case in order and stop at the first failure.
    pub fn run(&self, out: &mut dyn Write) -> Result<SuiteReport, SuiteError> {
        let cases = discover(&self.config.layout.tests_dir())?;
        tracing::info!(count = cases.len(), "discovered test cases");

        let runner = CaseRunner::new(self.config);
        let mut report = SuiteReport::default();
        for case in cases {
            writeln!(out, "\n** {} **", case.name)?;
            let result = runner.run(&case, out).map_err(|source| SuiteError::Case {
                case: case.name.clone(),
                source,
            })?;
            writeln!(out, "Test \"{}\" passed.", case.name)?;
            report.cases.push((case, result));
        }
        Ok(report)
    }
}
