//! Fatal harness errors
//!
//! Anything in here aborts the run. Recoverable smoke-mode conditions are not errors; they are
//! [`SmokeOutcome`](super::SmokeOutcome) variants.

use std::io;
use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

use super::process::LaunchError;

#[derive(Debug, Error, Diagnostic)]
pub enum HarnessError {
    #[error("build failed for {test}: {} exited with status {status}", .compiler.display())]
    #[diagnostic(
        code(harness::golden::build_failed),
        help("the compiler must exit 0 for the test to be run; remaining tests were skipped")
    )]
    BuildFailed {
        test: String,
        compiler: PathBuf,
        status: i32,
    },

    #[error("could not start compiler for {test}")]
    #[diagnostic(code(harness::golden::compiler_launch), help("set --cc or GOLDEN_HARNESS_CC to the compiler path"))]
    CompilerLaunch {
        test: String,
        #[source]
        source: LaunchError,
    },

    #[error("could not run built artifact for {test}")]
    #[diagnostic(code(harness::golden::artifact_launch))]
    ArtifactLaunch {
        test: String,
        #[source]
        source: LaunchError,
    },

    #[error("cannot read fixture '{}'", .path.display())]
    #[diagnostic(
        code(harness::golden::fixture),
        help("each golden test needs a <test>.expected file holding its exact stdout")
    )]
    Fixture {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write report: {0}")]
    #[diagnostic(code(harness::report))]
    Report(#[from] io::Error),
}

impl HarnessError {
    /// The test the error belongs to, when it belongs to one.
    pub fn test(&self) -> Option<&str> {
        match self {
            HarnessError::BuildFailed { test, .. }
            | HarnessError::CompilerLaunch { test, .. }
            | HarnessError::ArtifactLaunch { test, .. } => Some(test),
            HarnessError::Fixture { .. } | HarnessError::Report(_) => None,
        }
    }
}
