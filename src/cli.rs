use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::output::OutputFormat;

/// Color output control
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Auto-detect terminal capability
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

#[derive(Parser, Debug)]
#[command(name = "coverage-guard")]
#[command(
    author,
    version,
    about = "Reject commits whose staged files are missing from the coverage checksum manifest"
)]
#[command(long_about = "A pre-commit gate that checks every staged file against a checksum \
    manifest produced by a coverage run.\n\n\
    Exit codes:\n  \
    0 - All staged files are covered\n  \
    1 - Files not covered, or a configuration, git or I/O error")]
pub struct Cli {
    /// Increase output verbosity (-v, -vv for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Control color output
    #[arg(long, value_enum, default_value = "auto", global = true)]
    pub color: ColorChoice,

    /// Skip loading configuration file
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Path to configuration file (default: .coverage-guard.toml in the repository root)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Verify staged files against the checksum manifest
    Check(CheckArgs),

    /// Write a checksum manifest from a Go cover profile
    Generate(GenerateArgs),
}

#[derive(Parser, Debug, Default)]
pub struct CheckArgs {
    /// Repository to check (default: the repository containing the current directory)
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Manifest file, relative to the repository root (overrides config)
    #[arg(short, long)]
    pub manifest: Option<PathBuf>,

    /// Output format [possible values: text, json]
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// Compute checksums in parallel (overrides config)
    #[arg(long)]
    pub parallel: bool,

    /// Skip staged paths matching this glob (can be specified multiple times)
    #[arg(long, short = 'x')]
    pub exclude: Vec<String>,
}

#[derive(Parser, Debug)]
pub struct GenerateArgs {
    /// Cover profile to read
    #[arg(long, default_value = "cover.out")]
    pub coverfile: PathBuf,

    /// Module path stripped from profile entries to make them repository-relative
    #[arg(long, default_value = "")]
    pub module: String,

    /// Repository root the relative paths are hashed from
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Write the manifest to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
