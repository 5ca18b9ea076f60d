use std::path::{Path, PathBuf};

use crate::{CoverageGuardError, Result};

/// Location of the repository whose staging area is being checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitRepo {
    workdir: PathBuf,
}

impl GitRepo {
    /// Find the repository containing `path` and record its working tree root.
    ///
    /// # Errors
    /// Returns an error if no git repository is found or it is bare.
    pub fn discover(path: &Path) -> Result<Self> {
        let repo = gix::discover(path).map_err(|e| {
            CoverageGuardError::Git(format!("Failed to discover git repository: {e}"))
        })?;
        let workdir = repo
            .workdir()
            .ok_or_else(|| CoverageGuardError::Git("Repository has no working directory".into()))?
            .to_path_buf();
        Ok(Self { workdir })
    }

    /// Root of the working tree. Status paths and manifest paths are relative to it.
    #[must_use]
    pub fn workdir(&self) -> &Path {
        &self.workdir
    }
}
