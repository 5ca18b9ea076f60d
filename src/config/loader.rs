use std::path::{Path, PathBuf};

use crate::error::{CoverageGuardError, Result};

use super::{Config, FileSystem, RealFileSystem};

/// Name of the project config file, looked up in the repository root.
pub const LOCAL_CONFIG_NAME: &str = ".coverage-guard.toml";

/// Trait for loading configuration from various sources.
pub trait ConfigLoader {
    /// Load `.coverage-guard.toml` from `root`, or defaults if it is absent.
    ///
    /// # Errors
    /// Returns an error if the config file exists but cannot be read or parsed.
    fn load(&self, root: &Path) -> Result<Config>;

    /// Load configuration from a specific path, which must exist.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    fn load_from_path(&self, path: &Path) -> Result<Config>;
}

/// Loads configuration from the filesystem.
#[derive(Debug)]
pub struct FileConfigLoader<F: FileSystem = RealFileSystem> {
    fs: F,
}

impl Default for FileConfigLoader<RealFileSystem> {
    fn default() -> Self {
        Self::new()
    }
}

impl FileConfigLoader<RealFileSystem> {
    #[must_use]
    pub const fn new() -> Self {
        Self { fs: RealFileSystem }
    }
}

impl<F: FileSystem> FileConfigLoader<F> {
    #[must_use]
    pub const fn with_fs(fs: F) -> Self {
        Self { fs }
    }

    fn local_config_path(root: &Path) -> PathBuf {
        root.join(LOCAL_CONFIG_NAME)
    }

    fn parse_config(content: &str) -> Result<Config> {
        let config: Config = toml::from_str(content)?;
        if config.git.program.trim().is_empty() {
            return Err(CoverageGuardError::Config(
                "[git] program must not be empty".to_string(),
            ));
        }
        if config.manifest.as_os_str().is_empty() {
            return Err(CoverageGuardError::Config(
                "manifest path must not be empty".to_string(),
            ));
        }
        Ok(config)
    }

    fn read(&self, path: &Path) -> Result<Config> {
        let content = self.fs.read_to_string(path).map_err(|e| {
            CoverageGuardError::Config(format!(
                "Failed to read config file {}: {e}",
                path.display()
            ))
        })?;
        Self::parse_config(&content)
    }
}

impl<F: FileSystem> ConfigLoader for FileConfigLoader<F> {
    fn load(&self, root: &Path) -> Result<Config> {
        let path = Self::local_config_path(root);
        if self.fs.exists(&path) {
            self.read(&path)
        } else {
            Ok(Config::default())
        }
    }

    fn load_from_path(&self, path: &Path) -> Result<Config> {
        if !self.fs.exists(path) {
            return Err(CoverageGuardError::Config(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        self.read(path)
    }
}
