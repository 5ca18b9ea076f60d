#![allow(dead_code)]

use std::fmt::Write;
use std::fs;
use std::path::Path;
use std::process::Command;

use sha2::{Digest, Sha256};
use tempfile::TempDir;

/// Creates an `assert_cmd` Command for the coverage-guard binary.
#[macro_export]
macro_rules! coverage_guard {
    () => {
        assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("coverage-guard"))
    };
}

/// A throwaway git repository for driving the binary end to end.
pub struct GitFixture {
    pub dir: TempDir,
}

impl GitFixture {
    /// Creates an initialized repository with a committer identity.
    pub fn new() -> Self {
        let fixture = Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        };
        fixture.git(&["init", "--quiet"]);
        fixture.git(&["config", "user.email", "test@example.com"]);
        fixture.git(&["config", "user.name", "Test"]);
        fixture
    }

    /// Runs git in the repository, panicking on failure.
    pub fn git(&self, args: &[&str]) {
        let output = Command::new("git")
            .args(args)
            .current_dir(self.dir.path())
            .output()
            .expect("Failed to run git");
        assert!(
            output.status.success(),
            "git {args:?} failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn create_file(&self, relative_path: &str, content: &str) {
        let path = self.dir.path().join(relative_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        fs::write(&path, content).expect("Failed to write file");
    }

    /// Creates a file and stages it.
    pub fn stage_file(&self, relative_path: &str, content: &str) {
        self.create_file(relative_path, content);
        self.git(&["add", relative_path]);
    }

    pub fn commit(&self, message: &str) {
        self.git(&["commit", "--quiet", "-m", message]);
    }

    /// Writes `sha256sums.txt` recording the current content of `paths`.
    pub fn record(&self, paths: &[&str]) {
        self.record_as("sha256sums.txt", paths);
    }

    pub fn record_as(&self, manifest: &str, paths: &[&str]) {
        let mut content = String::new();
        for path in paths {
            let bytes = fs::read(self.dir.path().join(path)).expect("Failed to read file");
            let _ = writeln!(content, "{}\t{path}", sha256_hex(&bytes));
        }
        self.create_file(manifest, &content);
    }

    pub fn create_config(&self, content: &str) {
        self.create_file(".coverage-guard.toml", content);
    }
}

pub fn sha256_hex(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    digest.iter().fold(String::new(), |mut out, b| {
        let _ = write!(out, "{b:02x}");
        out
    })
}

pub const MISSING_HEADER: &str =
    "Error: The following files are missing from the coverage report or have mismatched filenames:";
