//! CLI module for the golden harness
//!
//! ## Commands
//!
//! - `golden [TEST]...` - Build each test with the compiler and compare against `<test>.expected`
//! - `smoke [TEST]...` - Run pre-built executables and print exit code and stdout
//!
//! Tests come from positional arguments and from `--list` files (one test per line).
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};

use crate::harness::config::DEFAULT_ARTIFACT;
use crate::version::HARNESS_VERSION;

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    /// Create a new CLI error with a message and exit code.
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }

    /// Create a failure error rendered from a diagnostic.
    pub fn from_diagnostic(diagnostic: impl miette::Diagnostic + Send + Sync + 'static) -> Self {
        Self::failure(format!("{:?}", miette::Report::new(diagnostic)))
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Golden-output test harness for externally built compilers
#[derive(Parser, Debug)]
#[command(name = "golden-harness")]
#[command(version = HARNESS_VERSION)]
#[command(about = "Run compiled test programs and check what they print", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Where the test list comes from
#[derive(Args, Debug, Clone, Default)]
pub struct TestSelection {
    /// Test identifiers, in run order
    #[arg(value_name = "TEST")]
    pub tests: Vec<String>,

    /// File listing one test per line ('#' comments); may be repeated
    #[arg(short = 'l', long = "list", value_name = "FILE")]
    pub lists: Vec<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build each test with the compiler and compare its output to <TEST>.expected
    Golden {
        #[command(flatten)]
        selection: TestSelection,
        /// Compiler executable [env: GOLDEN_HARNESS_CC] [default: scc]
        #[arg(long = "cc", value_name = "PROGRAM")]
        compiler: Option<PathBuf>,
        /// Extra argument passed to the compiler before the source file; may be repeated
        #[arg(long = "cc-arg", value_name = "ARG", allow_hyphen_values = true)]
        compiler_args: Vec<String>,
        /// Compiler flag that introduces the output path
        #[arg(long, value_name = "FLAG", default_value = "-o", allow_hyphen_values = true)]
        output_flag: String,
        /// Path the compiler writes the test program to
        #[arg(long, value_name = "PATH", default_value = DEFAULT_ARTIFACT)]
        artifact: PathBuf,
    },

    /// Run pre-built test executables and print their exit code and stdout
    Smoke {
        #[command(flatten)]
        selection: TestSelection,
        /// Directory containing the test executables
        #[arg(long, value_name = "DIR", default_value = ".")]
        dir: PathBuf,
    },
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
pub fn execute(cli: Cli) -> CliResult<ExitCode> {
    match cli.command {
        Command::Golden {
            selection,
            compiler,
            compiler_args,
            output_flag,
            artifact,
        } => commands::run_golden(&selection, compiler, compiler_args, output_flag, artifact),
        Command::Smoke { selection, dir } => commands::run_smoke(&selection, dir),
    }
}

// ============================================================================
// Tests
// ============================================================================
