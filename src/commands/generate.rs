use std::fmt::Write as _;
use std::fs;

use crate::checksum::Sha256Checksummer;
use crate::cli::{Cli, GenerateArgs};
use crate::manifest::{generate_manifest, parse_cover_profile};
use crate::{CoverageGuardError, EXIT_SUCCESS};

use super::context::Diagnostics;

#[must_use]
pub fn run_generate(args: &GenerateArgs, cli: &Cli) -> i32 {
    let diagnostics = Diagnostics::from_cli(cli);
    match run_generate_impl(args, &diagnostics) {
        Ok(manifest) => match write_manifest(args, &manifest) {
            Ok(()) => EXIT_SUCCESS,
            Err(e) => diagnostics.fail(&e),
        },
        Err(e) => diagnostics.fail(&e),
    }
}

/// Build manifest text from the cover profile named in `args`.
///
/// Files outside the module and files that cannot be hashed are skipped with
/// a warning.
///
/// # Errors
/// Returns an error if the cover profile cannot be read.
pub fn run_generate_impl(args: &GenerateArgs, diagnostics: &Diagnostics) -> crate::Result<String> {
    let profile_text =
        fs::read_to_string(&args.coverfile).map_err(|source| CoverageGuardError::FileRead {
            path: args.coverfile.clone(),
            source,
        })?;

    let profile = parse_cover_profile(&profile_text, &args.module);
    for path in &profile.outside_module {
        diagnostics.warn(
            &format!("Skipping {path}: not under module '{}'", args.module),
            None,
        );
    }
    diagnostics.note(&format!(
        "{} source file(s) in {}",
        profile.paths.len(),
        args.coverfile.display()
    ));

    let checksummer = Sha256Checksummer::new(&args.root);
    let (entries, failures) = generate_manifest(&profile.paths, &checksummer);
    for err in &failures {
        let detail = err.detail();
        diagnostics.warn(&format!("Skipping {}", err.message()), detail.as_deref());
    }

    let mut manifest = String::new();
    for entry in &entries {
        writeln!(manifest, "{entry}").ok();
    }
    Ok(manifest)
}

fn write_manifest(args: &GenerateArgs, manifest: &str) -> crate::Result<()> {
    match &args.output {
        Some(path) => fs::write(path, manifest).map_err(CoverageGuardError::from),
        None => {
            print!("{manifest}");
            Ok(())
        }
    }
}

#[cfg(test)]
#[path = "generate_tests.rs"]
mod tests;
