//! Smoke mode: run pre-built executables and show what they did
//!
//! There is no pass/fail judgement here. Each executable is launched with no arguments and its exit code and stdout
//! are printed for a human to read. A test that cannot be launched is reported and the run moves on to the next one.

use std::path::Path;

use super::case::TestCase;
use super::config::SmokeConfig;
use super::error::HarnessError;
use super::process::{LaunchError, ProcessOutput, ProcessRunner, local_program};
use super::report::Reporter;

/// What happened when a smoke test was launched
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SmokeOutcome {
    /// The executable ran to completion
    Completed { code: i32, stdout: String },
    /// The process layer refused to start it (permissions, bad format, ...)
    LaunchFailure(String),
    /// No executable at the expected path
    NotFound,
}

impl SmokeOutcome {
    pub fn from_invocation(result: Result<ProcessOutput, LaunchError>) -> Self {
        match result {
            Ok(output) => SmokeOutcome::Completed {
                code: output.exit_code,
                stdout: output.stdout_lossy(),
            },
            Err(LaunchError::NotFound { .. }) => SmokeOutcome::NotFound,
            Err(err @ LaunchError::Failed { .. }) => SmokeOutcome::LaunchFailure(err.to_string()),
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, SmokeOutcome::Completed { .. })
    }
}

pub struct SmokeHarness<R: ProcessRunner> {
    config: SmokeConfig,
    runner: R,
}

impl<R: ProcessRunner> SmokeHarness<R> {
    pub fn new(config: SmokeConfig, runner: R) -> Self {
        Self { config, runner }
    }

    /// Launch every test in order and report each outcome.
    ///
    /// Launch failures never stop the run. The only error is a failure to write the report.
    pub fn run(&self, tests: &[TestCase], reporter: &mut impl Reporter) -> Result<Vec<SmokeOutcome>, HarnessError> {
        let mut outcomes = Vec::with_capacity(tests.len());

        for test in tests {
            let outcome = self.run_case(test);
            reporter.on_smoke_outcome(test, &outcome)?;
            outcomes.push(outcome);
        }

        Ok(outcomes)
    }

    #[tracing::instrument(skip_all, fields(test = %test))]
    pub fn run_case(&self, test: &TestCase) -> SmokeOutcome {
        let executable = local_program(&test.executable_in(&self.config.dir));
        let outcome = SmokeOutcome::from_invocation(self.runner.run(&executable, &[]));
        log_outcome(&executable, &outcome);
        outcome
    }
}

fn log_outcome(executable: &Path, outcome: &SmokeOutcome) {
    match outcome {
        SmokeOutcome::Completed { code, .. } => tracing::info!(code, "smoke test completed"),
        SmokeOutcome::LaunchFailure(detail) => {
            tracing::warn!(executable = %executable.display(), %detail, "could not launch smoke test")
        }
        SmokeOutcome::NotFound => tracing::warn!(executable = %executable.display(), "smoke test executable missing"),
    }
}
