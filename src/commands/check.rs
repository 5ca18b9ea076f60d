use std::path::{Path, PathBuf};

use crate::checksum::Sha256Checksummer;
use crate::cli::{CheckArgs, Cli};
use crate::config::{Config, RealFileSystem};
use crate::filter::GlobFilter;
use crate::git::{CommandRunner, GitRepo, SystemRunner, staged_files};
use crate::manifest::ChecksumManifest;
use crate::output::{CheckSummary, JsonFormatter, OutputFormat, OutputFormatter, TextFormatter};
use crate::verify::{Coverage, VerificationReport, inspect, inspect_parallel};
use crate::{EXIT_NOT_COVERED, EXIT_SUCCESS};

use super::context::{Diagnostics, color_choice_to_mode, load_config};

#[must_use]
pub fn run_check(args: &CheckArgs, cli: &Cli) -> i32 {
    let diagnostics = Diagnostics::from_cli(cli);
    match run_check_impl(args, cli, &SystemRunner, &diagnostics) {
        Ok(exit_code) => exit_code,
        Err(e) => diagnostics.fail(&e),
    }
}

/// Run the commit gate and return its exit code.
///
/// # Errors
/// Returns configuration, git and checksum errors. Uncovered files are not
/// an error here; they yield `EXIT_NOT_COVERED`.
pub fn run_check_impl(
    args: &CheckArgs,
    cli: &Cli,
    runner: &dyn CommandRunner,
    diagnostics: &Diagnostics,
) -> crate::Result<i32> {
    // 1. Locate the repository
    let repo = GitRepo::discover(args.root.as_deref().unwrap_or_else(|| Path::new(".")))?;
    let workdir = repo.workdir();
    diagnostics.note(&format!("Repository root: {}", workdir.display()));

    // 2. Load configuration and apply CLI overrides
    let mut config = load_config(cli.config.as_deref(), cli.no_config, workdir)?;
    apply_cli_overrides(&mut config, args);
    let manifest_path = resolve_manifest_path(workdir, &config.manifest);

    // The manifest cannot record its own checksum, so it is never verified.
    let mut filter = GlobFilter::new(&config.exclude)?;
    if let Some(staged_manifest) = repo_relative_path(workdir, &manifest_path) {
        filter = filter.with_exact_path(staged_manifest);
    }

    // 3. Load the manifest before asking git for anything
    let manifest = ChecksumManifest::load(&RealFileSystem, &manifest_path)?;
    diagnostics.note(&format!(
        "Manifest {}: {} checksum(s), {} record(s)",
        manifest_path.display(),
        manifest.len(),
        manifest.record_count()
    ));

    // 4. Collect staged files
    let staged = staged_files(runner, &config.git.program, workdir)?;
    let (staged, excluded) = filter.partition(staged);
    for path in &excluded {
        diagnostics.trace(&format!("Excluded: {path}"));
    }
    diagnostics.note(&format!(
        "{} staged file(s) to verify, {} excluded",
        staged.len(),
        excluded.len()
    ));

    // 5. Verify
    let checksummer = Sha256Checksummer::new(workdir);
    let report = if config.parallel {
        inspect_parallel(&manifest, &staged, &checksummer)?
    } else {
        inspect(&manifest, &staged, &checksummer)?
    };
    trace_findings(&report, diagnostics);

    // 6. Report
    let summary = CheckSummary::from_report(
        &config.manifest.display().to_string(),
        &report,
        excluded.len(),
    );
    let output = format_output(args.format, &summary, cli)?;
    if !summary.is_covered() || !diagnostics.is_quiet() {
        print!("{output}");
    }

    match report.into_result() {
        Ok(()) => Ok(EXIT_SUCCESS),
        Err(crate::CoverageGuardError::NotCovered { .. }) => Ok(EXIT_NOT_COVERED),
        Err(e) => Err(e),
    }
}

fn apply_cli_overrides(config: &mut Config, args: &CheckArgs) {
    if let Some(manifest) = &args.manifest {
        config.manifest.clone_from(manifest);
    }
    if args.parallel {
        config.parallel = true;
    }
    config.exclude.extend(args.exclude.iter().cloned());
}

fn resolve_manifest_path(workdir: &Path, manifest: &Path) -> PathBuf {
    // Absolute paths replace the root on join.
    workdir.join(manifest)
}

/// `path` as git names it in status output: relative to `workdir`, `/`-separated.
fn repo_relative_path(workdir: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(workdir).ok()?;
    let parts = relative
        .components()
        .map(|c| c.as_os_str().to_str())
        .collect::<Option<Vec<_>>>()?;
    Some(parts.join("/"))
}

fn trace_findings(report: &VerificationReport, diagnostics: &Diagnostics) {
    for finding in report.findings() {
        let state = match &finding.coverage {
            Coverage::Covered => "covered",
            Coverage::UnknownChecksum => "unknown checksum",
            Coverage::NameMismatch { .. } => "name mismatch",
        };
        diagnostics.trace(&format!("{} {} ({state})", finding.checksum, finding.path));
    }
}

fn format_output(format: OutputFormat, summary: &CheckSummary, cli: &Cli) -> crate::Result<String> {
    match format {
        OutputFormat::Text => {
            TextFormatter::with_verbose(color_choice_to_mode(cli.color), cli.verbose)
                .format(summary)
        }
        OutputFormat::Json => JsonFormatter.format(summary),
    }
}

#[cfg(test)]
#[path = "check_tests.rs"]
mod tests;
