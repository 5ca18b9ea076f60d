use globset::{Glob, GlobSet, GlobSetBuilder};

use crate::error::{CoverageGuardError, Result};
use crate::git::StagedFile;

/// Staged paths matching any exclude pattern are not verified.
#[derive(Debug)]
pub struct GlobFilter {
    exclude_patterns: GlobSet,
    exact_paths: Vec<String>,
}

impl GlobFilter {
    /// Compile the exclude patterns.
    ///
    /// # Errors
    /// Returns an error if any exclude pattern is invalid.
    pub fn new(exclude_patterns: &[String]) -> Result<Self> {
        let mut builder = GlobSetBuilder::new();
        for pattern in exclude_patterns {
            let glob = Glob::new(pattern).map_err(|e| CoverageGuardError::InvalidPattern {
                pattern: pattern.clone(),
                source: e,
            })?;
            builder.add(glob);
        }
        let exclude_patterns = builder
            .build()
            .map_err(|e| CoverageGuardError::InvalidPattern {
                pattern: "combined patterns".to_string(),
                source: e,
            })?;

        Ok(Self {
            exclude_patterns,
            exact_paths: Vec::new(),
        })
    }

    /// Also exclude `path`, compared literally rather than as a glob.
    #[must_use]
    pub fn with_exact_path(mut self, path: impl Into<String>) -> Self {
        self.exact_paths.push(path.into());
        self
    }

    #[must_use]
    pub fn is_excluded(&self, path: &str) -> bool {
        self.exact_paths.iter().any(|p| p == path) || self.exclude_patterns.is_match(path)
    }

    /// Split staged files into (kept, excluded), both in staged order.
    #[must_use]
    pub fn partition(&self, staged: Vec<StagedFile>) -> (Vec<StagedFile>, Vec<StagedFile>) {
        staged.into_iter().partition(|path| !self.is_excluded(path))
    }
}
