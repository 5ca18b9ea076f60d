mod error_output;
mod json;
mod text;

pub use error_output::ErrorOutput;
pub use json::JsonFormatter;
pub use text::TextFormatter;

use crate::error::Result;
use crate::verify::{Coverage, VerificationReport};

/// Color output mode for terminal display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// Auto-detect: use colors if the stream is a TTY and `NO_COLOR` is not set
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// ANSI color codes
pub(crate) mod ansi {
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const CYAN: &str = "\x1b[36m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const RESET: &str = "\x1b[0m";
}

/// Why a staged file failed verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingReason {
    UnknownChecksum,
    NameMismatch,
}

impl MissingReason {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UnknownChecksum => "unknown checksum",
            Self::NameMismatch => "recorded under other names",
        }
    }
}

/// A staged file that is not covered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingFile {
    pub path: String,
    pub reason: MissingReason,
    /// Names the manifest records for this content, if any.
    pub recorded_as: Vec<String>,
}

/// Result of one `check` run, ready for formatting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckSummary {
    pub manifest: String,
    pub staged: usize,
    pub excluded: usize,
    pub missing: Vec<MissingFile>,
}

impl CheckSummary {
    #[must_use]
    pub fn from_report(manifest: &str, report: &VerificationReport, excluded: usize) -> Self {
        let missing = report
            .findings()
            .iter()
            .filter_map(|finding| {
                let (reason, recorded_as) = match &finding.coverage {
                    Coverage::Covered => return None,
                    Coverage::UnknownChecksum => (MissingReason::UnknownChecksum, Vec::new()),
                    Coverage::NameMismatch { recorded } => {
                        (MissingReason::NameMismatch, recorded.clone())
                    }
                };
                Some(MissingFile {
                    path: finding.path.clone(),
                    reason,
                    recorded_as,
                })
            })
            .collect();

        Self {
            manifest: manifest.to_string(),
            staged: report.findings().len(),
            excluded,
            missing,
        }
    }

    #[must_use]
    pub fn is_covered(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Trait for rendering a check summary.
pub trait OutputFormatter {
    /// Format the summary into a string.
    ///
    /// # Errors
    /// Returns an error if the formatting fails.
    fn format(&self, summary: &CheckSummary) -> Result<String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown output format: {s}")),
        }
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
