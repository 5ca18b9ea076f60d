use std::path::Path;
use std::process::Command;

use crate::{CoverageGuardError, Result};

/// Runs an external program and captures its standard output as text.
pub trait CommandRunner {
    /// Run `program` with `args` inside `cwd`.
    ///
    /// # Errors
    /// Returns an error if the program cannot be started or exits unsuccessfully.
    fn run(&self, program: &str, args: &[&str], cwd: &Path) -> Result<String>;
}

/// Runner backed by `std::process::Command`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[&str], cwd: &Path) -> Result<String> {
        let command_line = std::iter::once(program)
            .chain(args.iter().copied())
            .collect::<Vec<_>>()
            .join(" ");

        let output = Command::new(program)
            .args(args)
            .current_dir(cwd)
            .output()
            .map_err(|e| CoverageGuardError::Git(format!("Failed to run `{command_line}`: {e}")))?;

        if !output.status.success() {
            return Err(CoverageGuardError::CommandFailed {
                command: command_line,
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
