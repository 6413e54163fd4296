//! Harness runner for golden-output and smoke tests
//!
//! ## Modules
//!
//! - `case` - Test case identifiers and list manifests
//! - `config` - Per-mode configuration
//! - `error` - Fatal harness errors
//! - `golden` - Build, run and compare against `<test>.expected`
//! - `process` - External process execution boundary
//! - `report` - Console reporting of verdicts and smoke outcomes
//! - `smoke` - Run pre-built executables and print what they did
//!
//! ## Design
//!
//! Tests run one at a time in list order. Every child process is awaited and its output fully drained before the next
//! one starts. All process spawning goes through [`ProcessRunner`] so the comparison and reporting logic can be tested
//! with a scripted runner.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod case;
pub mod config;
pub mod error;
pub mod golden;
pub mod process;
pub mod report;
pub mod smoke;

pub use case::{ManifestError, TestCase, load_manifest, parse_manifest};
pub use config::{GoldenConfig, SmokeConfig};
pub use error::HarnessError;
pub use golden::{GoldenHarness, GoldenSummary, Verdict};
pub use process::{LaunchError, ProcessOutput, ProcessRunner, SystemRunner, local_program};
pub use report::{ConsoleReporter, Reporter};
pub use smoke::{SmokeHarness, SmokeOutcome};
