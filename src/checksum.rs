//! Content checksums for staged files.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

use crate::{CoverageGuardError, Result};

/// Computes the checksum recorded in the manifest for a repository path.
///
/// Implementations must produce the same encoding as the tool that wrote the
/// manifest, otherwise every entry mismatches.
pub trait Checksummer {
    /// # Errors
    /// Returns an error if the file cannot be read.
    fn compute(&self, path: &str) -> Result<String>;
}

impl<F> Checksummer for F
where
    F: Fn(&str) -> Result<String>,
{
    fn compute(&self, path: &str) -> Result<String> {
        self(path)
    }
}

/// SHA-256 over the full file content, rendered as lowercase hex.
#[derive(Debug, Clone)]
pub struct Sha256Checksummer {
    root: PathBuf,
}

impl Sha256Checksummer {
    /// Resolve paths against `root`, normally the repository working tree.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl Checksummer for Sha256Checksummer {
    fn compute(&self, path: &str) -> Result<String> {
        compute_file_hash(&self.root.join(path))
    }
}

/// Compute SHA-256 hash of file content.
///
/// # Errors
/// Returns an error if the file cannot be read.
pub fn compute_file_hash(path: &Path) -> Result<String> {
    let read_error = |source| CoverageGuardError::FileRead {
        path: path.to_path_buf(),
        source,
    };
    let mut file = fs::File::open(path).map_err(read_error)?;
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; 8192];
    loop {
        let n = file.read(&mut buffer).map_err(read_error)?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }
    Ok(format!("{:x}", hasher.finalize()))
}

/// Compute SHA-256 hash from bytes.
#[cfg(test)]
#[must_use]
pub fn compute_hash_from_bytes(content: &[u8]) -> String {
    format!("{:x}", Sha256::digest(content))
}

#[cfg(test)]
#[path = "checksum_tests.rs"]
mod tests;
