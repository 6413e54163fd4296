//! Shared helpers for integration tests
//!
//! Test programs are `/bin/sh` scripts. The fake compiler "builds" a test by copying its source to the artifact path
//! and marking it executable, or fails when the source contains `COMPILE_ERROR`.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

pub const FAKE_CC: &str = r#"#!/bin/sh
# usage: fake_cc.sh <source> -o <artifact>
if grep -q COMPILE_ERROR "$1"; then
    echo "fake_cc: error in $1" >&2
    exit 1
fi
cp "$1" "$3" && chmod +x "$3"
"#;

/// Scratch directory removed on drop.
pub struct Workspace {
    root: PathBuf,
}

impl Workspace {
    pub fn new(name: &str) -> Self {
        let root = std::env::temp_dir().join(format!("golden_harness_it_{}_{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&root);
        fs::create_dir_all(&root).unwrap();
        Self { root }
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    pub fn join(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// Write a plain file and return its path.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    /// Write the fake compiler script (run through `/bin/sh`, never executed directly).
    pub fn fake_cc(&self) -> PathBuf {
        self.write("fake_cc.sh", FAKE_CC)
    }

    /// Golden test source plus its fixture; returns the test identifier.
    pub fn golden_test(&self, name: &str, script_body: &str, expected: &str) -> String {
        let source = self.write(name, &format!("#!/bin/sh\n{}\n", script_body));
        let id = source.to_string_lossy().into_owned();
        fs::write(format!("{}.expected", id), expected).unwrap();
        id
    }

    /// Install an executable script named `name`.
    ///
    /// The copy happens in a child process so no writable descriptor to the executable is ever open in the test
    /// process when it gets exec'd.
    pub fn install_executable(&self, name: &str, script_body: &str) -> PathBuf {
        let staging = self.write(&format!("{}.src", name), &format!("#!/bin/sh\n{}\n", script_body));
        let target = self.join(name);
        let status = Command::new("/bin/sh")
            .arg("-c")
            .arg(r#"cp "$0" "$1" && chmod +x "$1""#)
            .arg(&staging)
            .arg(&target)
            .status()
            .unwrap();
        assert!(status.success(), "failed to install {}", name);
        target
    }
}

impl Drop for Workspace {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.root);
    }
}
