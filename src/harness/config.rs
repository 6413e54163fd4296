//! Harness configuration
//!
//! Plain structs with defaults and builder methods. The CLI fills them from arguments; library users build them
//! directly.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Environment variable naming the compiler used in golden mode.
pub const COMPILER_ENV: &str = "GOLDEN_HARNESS_CC";

/// Compiler used when neither `--cc` nor [`COMPILER_ENV`] is given.
pub const DEFAULT_COMPILER: &str = "scc";

/// Artifact every golden test is built into (and then executed from).
pub const DEFAULT_ARTIFACT: &str = "./main";

/// Golden mode configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoldenConfig {
    /// Compiler executable
    pub compiler: PathBuf,
    /// Arguments placed before the test source
    pub compiler_args: Vec<OsString>,
    /// Flag introducing the output path
    pub output_flag: OsString,
    /// Output artifact, shared by every test of a run
    pub artifact: PathBuf,
}

impl Default for GoldenConfig {
    fn default() -> Self {
        Self {
            compiler: PathBuf::from(DEFAULT_COMPILER),
            compiler_args: Vec::new(),
            output_flag: OsString::from("-o"),
            artifact: PathBuf::from(DEFAULT_ARTIFACT),
        }
    }
}

impl GoldenConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults, with the compiler taken from `GOLDEN_HARNESS_CC` when it is set and non-empty.
    pub fn from_env() -> Self {
        Self::new().with_compiler_override(std::env::var_os(COMPILER_ENV))
    }

    pub fn with_compiler(mut self, compiler: impl Into<PathBuf>) -> Self {
        self.compiler = compiler.into();
        self
    }

    /// Use `compiler` if present and non-empty, otherwise keep the current one.
    pub fn with_compiler_override(self, compiler: Option<OsString>) -> Self {
        match compiler {
            Some(c) if !c.is_empty() => self.with_compiler(c),
            _ => self,
        }
    }

    pub fn with_compiler_arg(mut self, arg: impl Into<OsString>) -> Self {
        self.compiler_args.push(arg.into());
        self
    }

    pub fn with_output_flag(mut self, flag: impl Into<OsString>) -> Self {
        self.output_flag = flag.into();
        self
    }

    pub fn with_artifact(mut self, artifact: impl Into<PathBuf>) -> Self {
        self.artifact = artifact.into();
        self
    }

    /// Full compiler argument list for one source file: `[prefix...] <source> <flag> <artifact>`.
    pub fn build_args(&self, source: &Path) -> Vec<OsString> {
        let mut args = self.compiler_args.clone();
        args.push(source.as_os_str().to_os_string());
        args.push(self.output_flag.clone());
        args.push(self.artifact.as_os_str().to_os_string());
        args
    }
}

/// Smoke mode configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmokeConfig {
    /// Directory holding the pre-built test executables
    pub dir: PathBuf,
}

impl Default for SmokeConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
        }
    }
}

impl SmokeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dir = dir.into();
        self
    }
}
