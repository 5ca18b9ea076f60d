use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoverageGuardError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Manifest file not found: {}", path.display())]
    ManifestNotFound { path: PathBuf },

    #[error("Failed to read manifest: {}", path.display())]
    ManifestRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A staged file could not be read for hashing.
    #[error("Failed to read file: {}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A path that would not survive a round trip through the manifest format.
    #[error("Path cannot be recorded in the manifest: {path}")]
    UnrecordablePath { path: String },

    #[error("Invalid glob pattern: {pattern}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON serialization error: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    #[error("Git error: {0}")]
    Git(String),

    #[error("Command `{command}` exited with {status}")]
    CommandFailed {
        command: String,
        status: String,
        stderr: String,
    },

    /// One or more staged files are absent from the manifest.
    #[error("Found staged files not tested")]
    NotCovered { files: Vec<String> },
}

impl CoverageGuardError {
    /// Short category label used as the error headline.
    #[must_use]
    pub const fn error_type(&self) -> &'static str {
        match self {
            Self::Config(_) | Self::ManifestNotFound { .. } => "Config",
            Self::ManifestRead { .. } | Self::FileRead { .. } => "FileRead",
            Self::UnrecordablePath { .. } => "Manifest",
            Self::InvalidPattern { .. } => "Pattern",
            Self::Io(_) => "IO",
            Self::TomlParse(_) => "TOML",
            Self::JsonSerialize(_) => "JSON",
            Self::Git(_) | Self::CommandFailed { .. } => "Git",
            Self::NotCovered { .. } => "Coverage",
        }
    }

    /// The primary message without the category prefix.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Config(msg) | Self::Git(msg) => msg.clone(),
            Self::ManifestNotFound { path } => format!("{} file not found", path.display()),
            Self::ManifestRead { path, .. } | Self::FileRead { path, .. } => {
                path.display().to_string()
            }
            Self::UnrecordablePath { path } => format!("{path}: path contains whitespace"),
            Self::InvalidPattern { pattern, .. } => pattern.clone(),
            Self::Io(e) => e.to_string(),
            Self::TomlParse(e) => e.message().to_string(),
            Self::JsonSerialize(e) => e.to_string(),
            Self::CommandFailed {
                command, status, ..
            } => format!("`{command}` exited with {status}"),
            Self::NotCovered { files } => {
                format!("{} staged file(s) not covered", files.len())
            }
        }
    }

    /// Underlying cause, if any.
    #[must_use]
    pub fn detail(&self) -> Option<String> {
        match self {
            Self::ManifestRead { source, .. } | Self::FileRead { source, .. } => {
                Some(source.to_string())
            }
            Self::InvalidPattern { source, .. } => Some(source.to_string()),
            Self::CommandFailed { stderr, .. } if !stderr.trim().is_empty() => {
                Some(stderr.trim().to_string())
            }
            _ => None,
        }
    }

    /// Actionable hint for the user, if one applies.
    #[must_use]
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::Config(_) | Self::TomlParse(_) => {
                Some("Check the config file format and TOML syntax")
            }
            Self::ManifestNotFound { .. } => Some(
                "Run the coverage job and generate the manifest with `coverage-guard generate`",
            ),
            Self::ManifestRead { source, .. } | Self::FileRead { source, .. } | Self::Io(source) => {
                io_suggestion(source)
            }
            Self::UnrecordablePath { .. } => {
                Some("Rename the file so its path contains no whitespace")
            }
            Self::InvalidPattern { .. } => Some("Check the glob pattern syntax"),
            Self::Git(_) | Self::CommandFailed { .. } => {
                Some("Ensure git is installed and the path is inside a git repository")
            }
            Self::JsonSerialize(_) | Self::NotCovered { .. } => None,
        }
    }
}

fn io_suggestion(source: &std::io::Error) -> Option<&'static str> {
    match source.kind() {
        std::io::ErrorKind::NotFound => Some("Check that the file path exists"),
        std::io::ErrorKind::PermissionDenied => Some("Check file permissions"),
        _ => None,
    }
}

pub type Result<T> = std::result::Result<T, CoverageGuardError>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
