use std::fmt::Write;

use crate::error::Result;

use super::{CheckSummary, ColorMode, MissingFile, MissingReason, OutputFormatter, ansi};

const MISSING_HEADER: &str = "Error: The following files are missing from the coverage report or have mismatched filenames:";
const MISSING_FOOTER: &str = "Commit failed. Ensure these files are included in the coverage report with the correct filenames.";

pub struct TextFormatter {
    use_colors: bool,
    verbose: u8,
}

impl TextFormatter {
    /// Non-verbose formatter (for testing).
    #[cfg(test)]
    #[must_use]
    pub fn new(mode: ColorMode) -> Self {
        Self::with_verbose(mode, 0)
    }

    #[must_use]
    pub fn with_verbose(mode: ColorMode, verbose: u8) -> Self {
        Self {
            use_colors: Self::should_use_colors(mode),
            verbose,
        }
    }

    fn should_use_colors(mode: ColorMode) -> bool {
        match mode {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => {
                // Respect NO_COLOR environment variable
                if std::env::var("NO_COLOR").is_ok() {
                    return false;
                }
                std::io::IsTerminal::is_terminal(&std::io::stdout())
            }
        }
    }

    fn paint(&self, text: &str, color: &str) -> String {
        if self.use_colors {
            format!("{color}{text}{}", ansi::RESET)
        } else {
            text.to_string()
        }
    }

    fn reason_suffix(&self, missing: &MissingFile) -> String {
        if self.verbose == 0 {
            return String::new();
        }
        let reason = missing.reason.as_str();
        let text = match missing.reason {
            MissingReason::UnknownChecksum => format!(" ({reason})"),
            MissingReason::NameMismatch => {
                format!(" ({reason}: {})", missing.recorded_as.join(", "))
            }
        };
        self.paint(&text, ansi::YELLOW)
    }

    fn format_missing(&self, summary: &CheckSummary, out: &mut String) {
        writeln!(out, "{}", self.paint(MISSING_HEADER, ansi::RED)).ok();
        for missing in &summary.missing {
            writeln!(out, "  - {}{}", missing.path, self.reason_suffix(missing)).ok();
        }
        writeln!(out, "{}", self.paint(MISSING_FOOTER, ansi::RED)).ok();
    }

    fn format_covered(&self, summary: &CheckSummary, out: &mut String) {
        let mut line = format!(
            "✓ All {} staged file(s) are covered by {}",
            summary.staged, summary.manifest
        );
        if summary.excluded > 0 {
            write!(line, " ({} excluded)", summary.excluded).ok();
        }
        writeln!(out, "{}", self.paint(&line, ansi::GREEN)).ok();
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, summary: &CheckSummary) -> Result<String> {
        let mut out = String::new();
        if summary.is_covered() {
            self.format_covered(summary, &mut out);
        } else {
            self.format_missing(summary, &mut out);
        }
        Ok(out)
    }
}

#[cfg(test)]
#[path = "text_tests.rs"]
mod tests;
