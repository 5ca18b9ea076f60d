//! Checksum manifest: which file contents a coverage run has exercised.
//!
//! The manifest is plain text with one `<checksum><whitespace><path>` record
//! per line, conventionally stored as `sha256sums.txt` at the repository root.

mod generate;

pub use generate::{CoverProfile, ManifestEntry, generate_manifest, parse_cover_profile};

use std::collections::HashMap;
use std::path::Path;

use crate::config::FileSystem;
use crate::{CoverageGuardError, Result};

/// Default manifest file name, relative to the repository root.
pub const DEFAULT_MANIFEST_FILE: &str = "sha256sums.txt";

/// Index from checksum to every filename recorded under it.
///
/// Neither direction is unique: a checksum may list many filenames and a
/// filename may appear under several checksums or repeat under one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChecksumManifest {
    entries: HashMap<String, Vec<String>>,
    records: usize,
}

impl ChecksumManifest {
    /// Build an index from manifest text.
    ///
    /// Lines that do not split into exactly two whitespace-separated tokens are
    /// skipped without error.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        text.lines()
            .filter_map(|line| {
                let mut tokens = line.split_whitespace();
                match (tokens.next(), tokens.next(), tokens.next()) {
                    (Some(checksum), Some(filename), None) => Some((checksum, filename)),
                    _ => None,
                }
            })
            .collect()
    }

    /// Read and parse the manifest at `path`.
    ///
    /// # Errors
    /// Returns `ManifestNotFound` if the file does not exist, or `ManifestRead`
    /// if it exists but cannot be read.
    pub fn load(fs: &dyn FileSystem, path: &Path) -> Result<Self> {
        if !fs.exists(path) {
            return Err(CoverageGuardError::ManifestNotFound {
                path: path.to_path_buf(),
            });
        }
        let text = fs
            .read_to_string(path)
            .map_err(|source| CoverageGuardError::ManifestRead {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self::parse(&text))
    }

    /// Record one association.
    pub fn insert(&mut self, checksum: impl Into<String>, filename: impl Into<String>) {
        self.entries
            .entry(checksum.into())
            .or_default()
            .push(filename.into());
        self.records += 1;
    }

    /// Filenames recorded under `checksum`, or `None` if the checksum is unknown.
    #[must_use]
    pub fn filenames(&self, checksum: &str) -> Option<&[String]> {
        self.entries.get(checksum).map(Vec::as_slice)
    }

    /// True if `filename` is recorded under `checksum`.
    #[must_use]
    pub fn contains(&self, checksum: &str, filename: &str) -> bool {
        self.filenames(checksum)
            .is_some_and(|names| names.iter().any(|n| n == filename))
    }

    /// Number of distinct checksums.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of (checksum, filename) records, duplicates included.
    #[must_use]
    pub const fn record_count(&self) -> usize {
        self.records
    }
}

impl<C: Into<String>, F: Into<String>> FromIterator<(C, F)> for ChecksumManifest {
    fn from_iter<I: IntoIterator<Item = (C, F)>>(iter: I) -> Self {
        let mut manifest = Self::default();
        for (checksum, filename) in iter {
            manifest.insert(checksum, filename);
        }
        manifest
    }
}

#[cfg(test)]
#[path = "manifest_tests.rs"]
mod tests;
