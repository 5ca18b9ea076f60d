pub mod checksum;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod filter;
pub mod git;
pub mod manifest;
pub mod output;
pub mod verify;

#[cfg(test)]
mod test_fixtures;

pub use error::{CoverageGuardError, Result};

pub const EXIT_SUCCESS: i32 = 0;
/// One or more staged files are missing from the manifest.
pub const EXIT_NOT_COVERED: i32 = 1;
/// Configuration, git or I/O failure. Shares the code of a coverage failure
/// so that any problem blocks the commit.
pub const EXIT_ERROR: i32 = 1;

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
