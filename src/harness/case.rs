//! Test case identifiers and list manifests

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use miette::Diagnostic;
use thiserror::Error;

/// Suffix appended to a test identifier to locate its expected-output fixture.
pub const FIXTURE_SUFFIX: &str = ".expected";

/// A single named test.
///
/// The identifier is used verbatim: as the source path handed to the compiler, as the prefix of the fixture path, as
/// the executable name in smoke mode, and in every report line.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TestCase {
    id: String,
}

impl TestCase {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Path of the test's source file (the identifier itself).
    pub fn source_path(&self) -> &Path {
        Path::new(&self.id)
    }

    /// `<id>.expected`, by plain string concatenation (`a.c` -> `a.c.expected`).
    pub fn fixture_path(&self) -> PathBuf {
        PathBuf::from(format!("{}{}", self.id, FIXTURE_SUFFIX))
    }

    /// Pre-built executable for this test inside `dir` (`./<id>` for the current directory).
    pub fn executable_in(&self, dir: &Path) -> PathBuf {
        dir.join(&self.id)
    }
}

impl fmt::Display for TestCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}

impl From<&str> for TestCase {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for TestCase {
    fn from(id: String) -> Self {
        Self::new(id)
    }
}

/// A test list file could not be read.
#[derive(Debug, Error, Diagnostic)]
#[error("cannot read test list '{}': {source}", .path.display())]
#[diagnostic(
    code(harness::manifest::read),
    help("a test list holds one test per line; '#' starts a comment line")
)]
pub struct ManifestError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

/// Parse a test list: one identifier per line, blank lines and `#` comments skipped.
pub fn parse_manifest(text: &str) -> Vec<TestCase> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(TestCase::new)
        .collect()
}

/// Read and parse a test list file.
pub fn load_manifest(path: &Path) -> Result<Vec<TestCase>, ManifestError> {
    let text = fs::read_to_string(path).map_err(|source| ManifestError {
        path: path.to_path_buf(),
        source,
    })?;
    let cases = parse_manifest(&text);
    tracing::debug!(path = %path.display(), count = cases.len(), "loaded test list");
    Ok(cases)
}
