#![forbid(unsafe_code)]
//! Golden-output test harness
//!
//! Runs artifacts produced by an external compiler and checks what they print.
//! The compiler and the artifacts are opaque executables; this crate only
//! launches them, captures their output and reports on it.
//!
//! ## Modes
//!
//! - **Golden** ([`harness::GoldenHarness`]): build each test source with the compiler, run the artifact and compare
//!   its stdout byte-for-byte against `<test>.expected`. Prints `OK:` / `FAIL:` per test.
//! - **Smoke** ([`harness::SmokeHarness`]): run a pre-built executable per test and print its exit code and stdout.
//!
//! ## Panic Policy
//!
//! - **Production code**: Use `Result` with `?` / `map_err`. The `cli` and `harness` modules enforce
//!   `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.

pub mod cli;
pub mod harness;
pub mod version;

pub use harness::{
    GoldenConfig, GoldenHarness, HarnessError, ProcessOutput, ProcessRunner, SmokeConfig, SmokeHarness, SmokeOutcome,
    SystemRunner, TestCase,
};
