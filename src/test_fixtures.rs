//! Shared test fixtures for manifest, config and verification tests.

use std::collections::HashMap;
use std::io::{Error, ErrorKind};
use std::path::{Path, PathBuf};

use crate::config::FileSystem;
use crate::manifest::ChecksumManifest;
use crate::{CoverageGuardError, Result};

pub const EMPTY_SHA: &str = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";
pub const FILE3_SHA: &str = "9d5e3ecdeb89fbb6de1f2b1aebc3c6a2f4c8e9348d7d3e0c5e5b9eb7b8b1a8f9";
pub const UNKNOWN_SHA: &str = "0000000000000000000000000000000000000000000000000000000000000000";

/// Manifest with file1/file2 sharing the empty-file checksum and file3 on its own.
pub fn fixture_manifest() -> ChecksumManifest {
    [
        (EMPTY_SHA, "path/to/file1.txt"),
        (EMPTY_SHA, "path/to/file2.txt"),
        (FILE3_SHA, "path/to/file3.txt"),
    ]
    .into_iter()
    .collect()
}

/// Checksum lookup table standing in for real file hashing.
pub fn fixture_checksummer(path: &str) -> Result<String> {
    let sum = match path {
        "path/to/file1.txt" | "path/to/file2.txt" | "path/to/new_file.txt" => EMPTY_SHA,
        "path/to/file3.txt" => FILE3_SHA,
        "path/to/file_unknown.txt" | "path/to/changed_file.txt" => UNKNOWN_SHA,
        _ => {
            return Err(CoverageGuardError::FileRead {
                path: PathBuf::from(path),
                source: Error::new(ErrorKind::NotFound, "no fixture checksum"),
            });
        }
    };
    Ok(sum.to_string())
}

/// In-memory filesystem keyed by exact path.
#[derive(Default)]
pub struct MockFileSystem {
    files: HashMap<PathBuf, std::result::Result<String, ErrorKind>>,
}

impl MockFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>, content: &str) -> Self {
        self.files.insert(path.into(), Ok(content.to_string()));
        self
    }

    /// A path that exists but fails to read with `kind`.
    pub fn with_unreadable(mut self, path: impl Into<PathBuf>, kind: ErrorKind) -> Self {
        self.files.insert(path.into(), Err(kind));
        self
    }
}

impl FileSystem for MockFileSystem {
    fn read_to_string(&self, path: &Path) -> std::io::Result<String> {
        match self.files.get(path) {
            Some(Ok(content)) => Ok(content.clone()),
            Some(Err(kind)) => Err(Error::new(*kind, "mock read failure")),
            None => Err(Error::new(ErrorKind::NotFound, "file not found")),
        }
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }
}

/// Command runner that answers every call with the same name-status text,
/// or fails like an unusable git binary when built with `failing`.
pub struct StaticRunner {
    output: Option<String>,
    calls: std::cell::Cell<usize>,
}

impl StaticRunner {
    pub fn new(output: &str) -> Self {
        Self {
            output: Some(output.to_string()),
            calls: std::cell::Cell::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            output: None,
            calls: std::cell::Cell::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl crate::git::CommandRunner for StaticRunner {
    fn run(&self, program: &str, _args: &[&str], _cwd: &Path) -> Result<String> {
        self.calls.set(self.calls.get() + 1);
        self.output.clone().ok_or_else(|| CoverageGuardError::CommandFailed {
            command: program.to_string(),
            status: "exit status: 128".to_string(),
            stderr: "fatal: bad revision".to_string(),
        })
    }
}
