use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::manifest::DEFAULT_MANIFEST_FILE;

/// Executable used when no `[git] program` is configured.
pub const DEFAULT_GIT_PROGRAM: &str = "git";

/// Contents of `.coverage-guard.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Manifest path. Relative paths resolve against the repository root.
    #[serde(default = "default_manifest")]
    pub manifest: PathBuf,

    /// Hash staged files on the rayon thread pool.
    #[serde(default)]
    pub parallel: bool,

    /// Glob patterns for staged paths that are never verified.
    #[serde(default)]
    pub exclude: Vec<String>,

    #[serde(default)]
    pub git: GitConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            manifest: default_manifest(),
            parallel: false,
            exclude: Vec::new(),
            git: GitConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct GitConfig {
    /// Git executable name or path.
    #[serde(default = "default_git_program")]
    pub program: String,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            program: default_git_program(),
        }
    }
}

fn default_manifest() -> PathBuf {
    PathBuf::from(DEFAULT_MANIFEST_FILE)
}

fn default_git_program() -> String {
    DEFAULT_GIT_PROGRAM.to_string()
}
