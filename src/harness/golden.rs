//! Golden mode: build, run, compare
//!
//! For every test, in list order:
//!
//! 1. `<cc> [prefix...] <test> -o <artifact>`. A non-zero exit aborts the whole run.
//! 2. Run `<artifact>` (from the working directory when it is a bare name) with no arguments and capture stdout. Its exit status is ignored.
//! 3. Read `<test>.expected`. A missing fixture aborts the whole run.
//! 4. Compare byte-for-byte and report `OK:` or `FAIL:`.
//!
//! A mismatch is a verdict, not an error. Nothing is normalized, so a missing trailing newline is a failure.

use std::fs;

use super::case::TestCase;
use super::config::GoldenConfig;
use super::error::HarnessError;
use super::process::{ProcessRunner, local_program};
use super::report::Reporter;

/// Outcome of comparing one test's output against its fixture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Pass,
    Fail,
}

impl Verdict {
    pub fn from_match(matched: bool) -> Self {
        if matched { Verdict::Pass } else { Verdict::Fail }
    }

    pub fn passed(self) -> bool {
        self == Verdict::Pass
    }
}

/// Counts for a completed golden run.
///
/// Only returned to callers; the console output has no summary line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GoldenSummary {
    pub passed: usize,
    pub failed: usize,
}

impl GoldenSummary {
    pub fn total(&self) -> usize {
        self.passed + self.failed
    }

    fn record(&mut self, verdict: Verdict) {
        match verdict {
            Verdict::Pass => self.passed += 1,
            Verdict::Fail => self.failed += 1,
        }
    }
}

/// Exact comparison of captured stdout against fixture content.
pub fn matches_fixture(actual: &[u8], expected: &[u8]) -> bool {
    actual == expected
}

/// Builds each test with the configured compiler and checks the artifact's stdout.
pub struct GoldenHarness<R: ProcessRunner> {
    config: GoldenConfig,
    runner: R,
}

impl<R: ProcessRunner> GoldenHarness<R> {
    pub fn new(config: GoldenConfig, runner: R) -> Self {
        Self { config, runner }
    }

    pub fn config(&self) -> &GoldenConfig {
        &self.config
    }

    /// Run every test in order, reporting each verdict as it is reached.
    ///
    /// Stops at the first fatal error; lines already reported stay reported. An empty list does nothing.
    pub fn run(&self, tests: &[TestCase], reporter: &mut impl Reporter) -> Result<GoldenSummary, HarnessError> {
        let mut summary = GoldenSummary::default();

        for test in tests {
            let verdict = self.run_case(test)?;
            reporter.on_verdict(test, verdict)?;
            summary.record(verdict);
        }

        tracing::info!(passed = summary.passed, failed = summary.failed, "golden run complete");
        Ok(summary)
    }

    /// Build, execute and compare a single test.
    #[tracing::instrument(skip_all, fields(test = %test))]
    pub fn run_case(&self, test: &TestCase) -> Result<Verdict, HarnessError> {
        self.build(test)?;

        let output = self
            .runner
            .run(&local_program(&self.config.artifact), &[])
            .map_err(|source| HarnessError::ArtifactLaunch {
                test: test.id().to_string(),
                source,
            })?;
        if !output.success() {
            tracing::debug!(exit_code = output.exit_code, "artifact exited non-zero; status ignored");
        }

        let fixture_path = test.fixture_path();
        let expected = fs::read(&fixture_path).map_err(|source| HarnessError::Fixture {
            path: fixture_path.clone(),
            source,
        })?;

        let verdict = Verdict::from_match(matches_fixture(&output.stdout, &expected));
        tracing::info!(?verdict, "compared against {}", fixture_path.display());
        Ok(verdict)
    }

    fn build(&self, test: &TestCase) -> Result<(), HarnessError> {
        let args = self.config.build_args(test.source_path());
        tracing::debug!(compiler = %self.config.compiler.display(), "building");

        let output = self
            .runner
            .run(&self.config.compiler, &args)
            .map_err(|source| HarnessError::CompilerLaunch {
                test: test.id().to_string(),
                source,
            })?;

        if output.success() {
            Ok(())
        } else {
            Err(HarnessError::BuildFailed {
                test: test.id().to_string(),
                compiler: self.config.compiler.clone(),
                status: output.exit_code,
            })
        }
    }
}
