//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::path::PathBuf;

use crate::harness::{
    ConsoleReporter, GoldenConfig, GoldenHarness, SmokeConfig, SmokeHarness, SystemRunner, TestCase, load_manifest,
};

use super::{CliError, CliResult, ExitCode, TestSelection};

/// Resolve the full test list: positional tests first, then each list file in order.
///
/// ## Errors
///
/// Returns an error if any list file cannot be read. Nothing has run at that point.
pub fn collect_tests(selection: &TestSelection) -> CliResult<Vec<TestCase>> {
    let mut tests: Vec<TestCase> = selection.tests.iter().map(|t| TestCase::new(t.as_str())).collect();

    for list in &selection.lists {
        let cases = load_manifest(list).map_err(CliError::from_diagnostic)?;
        tests.extend(cases);
    }

    tracing::debug!(count = tests.len(), "collected tests");
    Ok(tests)
}

/// Golden mode: build, run and compare every test.
///
/// Verdicts never affect the exit code; only a fatal harness error does.
pub fn run_golden(
    selection: &TestSelection,
    compiler: Option<PathBuf>,
    compiler_args: Vec<String>,
    output_flag: String,
    artifact: PathBuf,
) -> CliResult<ExitCode> {
    let tests = collect_tests(selection)?;

    let mut config = GoldenConfig::from_env()
        .with_output_flag(output_flag)
        .with_artifact(artifact);
    if let Some(compiler) = compiler {
        config = config.with_compiler(compiler);
    }
    for arg in compiler_args {
        config = config.with_compiler_arg(arg);
    }

    let harness = GoldenHarness::new(config, SystemRunner::new());
    let mut reporter = ConsoleReporter::stdout();
    harness.run(&tests, &mut reporter).map_err(|err| {
        if let Some(test) = err.test() {
            tracing::error!(test, "golden run aborted");
        }
        CliError::from_diagnostic(err)
    })?;

    Ok(ExitCode::SUCCESS)
}

/// Smoke mode: run every pre-built executable and print what it did.
pub fn run_smoke(selection: &TestSelection, dir: PathBuf) -> CliResult<ExitCode> {
    let tests = collect_tests(selection)?;

    let harness = SmokeHarness::new(SmokeConfig::new().with_dir(dir), SystemRunner::new());
    let mut reporter = ConsoleReporter::stdout();
    harness
        .run(&tests, &mut reporter)
        .map_err(CliError::from_diagnostic)?;

    Ok(ExitCode::SUCCESS)
}
