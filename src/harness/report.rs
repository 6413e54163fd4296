//! Console reporting
//!
//! The harnesses hand every result to a [`Reporter`]. [`ConsoleReporter`] writes the stable line formats that
//! downstream tooling greps for:
//!
//! ```text
//! OK: <test>
//! FAIL: <test>
//! code: <exit code>
//! stdout: <captured stdout>
//! Error running test: <details>
//! Executable for test not found.
//! ```
//!
//! No summary line is written.

use std::io::{self, Write};

use super::case::TestCase;
use super::golden::Verdict;
use super::smoke::SmokeOutcome;

/// Trait for reporting harness results.
///
/// Implement this trait to redirect or reformat output.
pub trait Reporter {
    /// Called once per golden test after its comparison
    fn on_verdict(&mut self, test: &TestCase, verdict: Verdict) -> io::Result<()>;

    /// Called once per smoke test with whatever happened when it was launched
    fn on_smoke_outcome(&mut self, test: &TestCase, outcome: &SmokeOutcome) -> io::Result<()>;
}

impl<R: Reporter + ?Sized> Reporter for &mut R {
    fn on_verdict(&mut self, test: &TestCase, verdict: Verdict) -> io::Result<()> {
        (**self).on_verdict(test, verdict)
    }

    fn on_smoke_outcome(&mut self, test: &TestCase, outcome: &SmokeOutcome) -> io::Result<()> {
        (**self).on_smoke_outcome(test, outcome)
    }
}

/// Plain-text reporter writing one line per event.
pub struct ConsoleReporter<W: Write> {
    out: W,
}

impl ConsoleReporter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    fn on_verdict(&mut self, test: &TestCase, verdict: Verdict) -> io::Result<()> {
        let label = match verdict {
            Verdict::Pass => "OK:",
            Verdict::Fail => "FAIL:",
        };
        writeln!(self.out, "{} {}", label, test)?;
        self.out.flush()
    }

    fn on_smoke_outcome(&mut self, _test: &TestCase, outcome: &SmokeOutcome) -> io::Result<()> {
        match outcome {
            SmokeOutcome::Completed { code, stdout } => {
                writeln!(self.out, "code: {}", code)?;
                // stdout keeps its own trailing newline; the line adds another
                writeln!(self.out, "stdout: {}", stdout)?;
            }
            SmokeOutcome::LaunchFailure(detail) => {
                writeln!(self.out, "Error running test: {}", detail)?;
            }
            SmokeOutcome::NotFound => {
                writeln!(self.out, "Executable for test not found.")?;
            }
        }
        self.out.flush()
    }
}
