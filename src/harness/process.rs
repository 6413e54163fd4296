//! External process execution boundary
//!
//! The harness never calls `std::process::Command` directly. It goes through [`ProcessRunner`], which lets tests swap
//! in a runner that replays scripted outputs instead of spawning anything.

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

use miette::Diagnostic;
use thiserror::Error;

/// Captured result of a child process that ran to completion.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProcessOutput {
    /// Raw bytes written to standard output
    pub stdout: Vec<u8>,
    /// Raw bytes written to standard error
    pub stderr: Vec<u8>,
    /// Exit code. A child killed by a signal reports the negated signal number.
    pub exit_code: i32,
}

impl ProcessOutput {
    pub fn new(stdout: impl Into<Vec<u8>>, exit_code: i32) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: Vec::new(),
            exit_code,
        }
    }

    pub fn with_stderr(mut self, stderr: impl Into<Vec<u8>>) -> Self {
        self.stderr = stderr.into();
        self
    }

    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Stdout decoded as UTF-8, with invalid sequences replaced.
    pub fn stdout_lossy(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }
}

/// The child process could not be started at all.
///
/// This is distinct from a child that started and then exited non-zero; that case is a normal [`ProcessOutput`].
#[derive(Debug, Error, Diagnostic)]
pub enum LaunchError {
    #[error("program not found: {}", .program.display())]
    #[diagnostic(code(harness::process::not_found))]
    NotFound { program: PathBuf },

    #[error("failed to launch {}: {source}", .program.display())]
    #[diagnostic(code(harness::process::launch))]
    Failed {
        program: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl LaunchError {
    /// Classify a spawn error for `program`.
    pub fn from_io(program: &Path, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            LaunchError::NotFound {
                program: program.to_path_buf(),
            }
        } else {
            LaunchError::Failed {
                program: program.to_path_buf(),
                source,
            }
        }
    }
}

/// Runs an external program to completion and captures its output.
pub trait ProcessRunner {
    /// Run `program` with `args`, blocking until it exits.
    fn run(&self, program: &Path, args: &[OsString]) -> Result<ProcessOutput, LaunchError>;
}

impl<R: ProcessRunner + ?Sized> ProcessRunner for &R {
    fn run(&self, program: &Path, args: &[OsString]) -> Result<ProcessOutput, LaunchError> {
        (**self).run(program, args)
    }
}

/// Spawns real child processes with `std::process::Command`.
#[derive(Debug, Clone, Default)]
pub struct SystemRunner {
    /// Working directory for children (inherits the harness's when `None`)
    current_dir: Option<PathBuf>,
}

impl SystemRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run children in `dir` instead of the harness's working directory.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            current_dir: Some(dir.as_ref().to_path_buf()),
        }
    }
}

impl ProcessRunner for SystemRunner {
    #[tracing::instrument(skip_all, fields(program = %program.display(), argc = args.len()))]
    fn run(&self, program: &Path, args: &[OsString]) -> Result<ProcessOutput, LaunchError> {
        let mut command = Command::new(program);
        command.args(args.iter().map(OsString::as_os_str));
        if let Some(dir) = &self.current_dir {
            command.current_dir(dir);
        }

        let output = command.output().map_err(|e| LaunchError::from_io(program, e))?;
        let exit_code = exit_code_of(output.status);
        tracing::debug!(exit_code, stdout_len = output.stdout.len(), "child exited");

        Ok(ProcessOutput {
            stdout: output.stdout,
            stderr: output.stderr,
            exit_code,
        })
    }
}

/// Path to launch for a program living in the working directory.
///
/// A bare name like `main` would be searched on `PATH` by the OS, so it becomes `./main`. Paths that already name a
/// directory (`./main`, `build/main`, `/tmp/main`) are returned unchanged.
pub fn local_program(path: &Path) -> PathBuf {
    let bare = path.is_relative() && path.parent().is_none_or(|p| p.as_os_str().is_empty());
    if bare && !path.as_os_str().is_empty() {
        Path::new(".").join(path)
    } else {
        path.to_path_buf()
    }
}

#[cfg(unix)]
fn exit_code_of(status: ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;

    match status.code() {
        Some(code) => code,
        None => status.signal().map(|sig| -sig).unwrap_or(-1),
    }
}

#[cfg(not(unix))]
fn exit_code_of(status: ExitStatus) -> i32 {
    status.code().unwrap_or(-1)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::ffi::OsStr;

    use super::*;

    fn os_args<I, S>(args: I) -> Vec<OsString>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        args.into_iter().map(|a| a.as_ref().to_os_string()).collect()
    }

    #[test]
    fn test_launch_error_not_found_kind() {
        let err = LaunchError::from_io(Path::new("./missing"), io::Error::from(io::ErrorKind::NotFound));
        assert!(matches!(err, LaunchError::NotFound { .. }));
        assert_eq!(err.to_string(), "program not found: ./missing");
    }

    #[test]
    fn test_launch_error_other_kind() {
        let err = LaunchError::from_io(
            Path::new("./prog"),
            io::Error::new(io::ErrorKind::PermissionDenied, "Permission denied"),
        );
        assert!(matches!(err, LaunchError::Failed { .. }));
        assert!(err.to_string().starts_with("failed to launch ./prog"));
    }

    #[test]
    fn test_process_output_builders() {
        let out = ProcessOutput::new("hi\n", 3).with_stderr("oops");
        assert_eq!(out.stdout_lossy(), "hi\n");
        assert_eq!(out.stderr, b"oops");
        assert!(!out.success());
        assert!(ProcessOutput::new("", 0).success());
    }

    #[test]
    fn test_local_program_prefixes_bare_names() {
        assert_eq!(local_program(Path::new("main")), PathBuf::from("./main"));
        assert_eq!(local_program(Path::new("a.out")), PathBuf::from("./a.out"));
    }

    #[test]
    fn test_local_program_keeps_paths_with_a_directory() {
        assert_eq!(local_program(Path::new("./main")), PathBuf::from("./main"));
        assert_eq!(local_program(Path::new("build/main")), PathBuf::from("build/main"));
        assert_eq!(local_program(Path::new("/tmp/main")), PathBuf::from("/tmp/main"));
        assert_eq!(local_program(Path::new("")), PathBuf::new());
    }

    #[cfg(unix)]
    #[test]
    fn test_system_runner_captures_stdout_and_code() {
        let out = SystemRunner::new()
            .run(Path::new("/bin/sh"), &os_args(["-c", "printf 'hello\\n'; exit 4"]))
            .unwrap();
        assert_eq!(out.stdout, b"hello\n");
        assert_eq!(out.exit_code, 4);
    }

    #[cfg(unix)]
    #[test]
    fn test_system_runner_reports_signal_as_negative_code() {
        let out = SystemRunner::new()
            .run(Path::new("/bin/sh"), &os_args(["-c", "kill -9 $$"]))
            .unwrap();
        assert_eq!(out.exit_code, -9);
    }

    #[cfg(unix)]
    #[test]
    fn test_system_runner_in_dir() {
        let out = SystemRunner::in_dir("/")
            .run(Path::new("/bin/sh"), &os_args(["-c", "pwd"]))
            .unwrap();
        assert_eq!(out.stdout_lossy(), "/\n");
    }

    #[test]
    fn test_system_runner_missing_program() {
        let err = SystemRunner::new()
            .run(Path::new("./definitely-not-a-real-program-xyz"), &[])
            .unwrap_err();
        assert!(matches!(err, LaunchError::NotFound { .. }));
    }
}
