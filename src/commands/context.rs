use std::path::Path;

use crate::cli::{Cli, ColorChoice};
use crate::config::{Config, ConfigLoader, FileConfigLoader};
use crate::output::{ColorMode, ErrorOutput};
use crate::{CoverageGuardError, EXIT_ERROR};

#[must_use]
pub const fn color_choice_to_mode(choice: ColorChoice) -> ColorMode {
    match choice {
        ColorChoice::Auto => ColorMode::Auto,
        ColorChoice::Always => ColorMode::Always,
        ColorChoice::Never => ColorMode::Never,
    }
}

/// Load the config for the repository at `root`, honoring `--config` and `--no-config`.
///
/// # Errors
/// Returns an error if a config file is present but invalid, or an explicit
/// `--config` path does not exist.
pub fn load_config(
    config_path: Option<&Path>,
    no_config: bool,
    root: &Path,
) -> crate::Result<Config> {
    if no_config {
        return Ok(Config::default());
    }

    let loader = FileConfigLoader::new();
    config_path.map_or_else(|| loader.load(root), |path| loader.load_from_path(path))
}

/// Verbosity-aware stderr reporting shared by the commands.
pub struct Diagnostics {
    out: ErrorOutput,
    verbose: u8,
    quiet: bool,
}

impl Diagnostics {
    #[must_use]
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            out: ErrorOutput::new(color_choice_to_mode(cli.color)),
            verbose: cli.verbose,
            quiet: cli.quiet,
        }
    }

    /// Print a progress note at `-v` and above.
    pub fn note(&self, message: &str) {
        if self.verbose > 0 && !self.quiet {
            self.out.print_note(message);
        }
    }

    /// Print a note only at `-vv` and above.
    pub fn trace(&self, message: &str) {
        if self.verbose > 1 && !self.quiet {
            self.out.print_note(message);
        }
    }

    pub fn warn(&self, message: &str, detail: Option<&str>) {
        if !self.quiet {
            self.out.print_warning(message, detail);
        }
    }

    /// Report a fatal error and return the matching exit code.
    #[must_use]
    pub fn fail(&self, err: &CoverageGuardError) -> i32 {
        self.out.print_crate_error(err);
        EXIT_ERROR
    }

    #[must_use]
    pub const fn is_quiet(&self) -> bool {
        self.quiet
    }
}
