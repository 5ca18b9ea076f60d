//! Membership check of staged files against the checksum manifest.
//!
//! Every staged file is examined before a verdict is reached, so a failing
//! commit reports all uncovered files at once. A file that cannot be hashed is
//! an environment fault and aborts verification immediately instead.

use rayon::prelude::*;

use crate::checksum::Checksummer;
use crate::git::StagedFile;
use crate::manifest::ChecksumManifest;
use crate::{CoverageGuardError, Result};

/// How a single staged file relates to the manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Coverage {
    Covered,
    /// No manifest record carries this content.
    UnknownChecksum,
    /// The content is recorded, but only under other filenames.
    NameMismatch { recorded: Vec<String> },
}

impl Coverage {
    #[must_use]
    pub const fn is_covered(&self) -> bool {
        matches!(self, Self::Covered)
    }
}

/// Classify `path` whose current content hashes to `checksum`.
#[must_use]
pub fn classify(manifest: &ChecksumManifest, path: &str, checksum: &str) -> Coverage {
    if manifest.contains(checksum, path) {
        return Coverage::Covered;
    }
    match manifest.filenames(checksum) {
        None => Coverage::UnknownChecksum,
        Some(names) => Coverage::NameMismatch {
            recorded: names.to_vec(),
        },
    }
}

/// Outcome for one staged file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub path: StagedFile,
    pub checksum: String,
    pub coverage: Coverage,
}

/// Per-file findings in staged order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerificationReport {
    findings: Vec<Finding>,
}

impl VerificationReport {
    #[must_use]
    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    /// Uncovered paths, in staged order, duplicates kept.
    #[must_use]
    pub fn missing_files(&self) -> Vec<String> {
        self.findings
            .iter()
            .filter(|f| !f.coverage.is_covered())
            .map(|f| f.path.clone())
            .collect()
    }

    #[must_use]
    pub fn is_covered(&self) -> bool {
        self.findings.iter().all(|f| f.coverage.is_covered())
    }

    /// Collapse the report into success or a single `NotCovered` error.
    ///
    /// # Errors
    /// Returns `NotCovered` listing every missing file.
    pub fn into_result(self) -> Result<()> {
        let files = self.missing_files();
        if files.is_empty() {
            Ok(())
        } else {
            Err(CoverageGuardError::NotCovered { files })
        }
    }
}

fn finding_for<C>(manifest: &ChecksumManifest, checksummer: &C, path: &str) -> Result<Finding>
where
    C: Checksummer + ?Sized,
{
    let checksum = checksummer.compute(path)?;
    let coverage = classify(manifest, path, &checksum);
    Ok(Finding {
        path: path.to_string(),
        checksum,
        coverage,
    })
}

/// Hash each staged file in turn and classify it.
///
/// # Errors
/// Returns the first checksum error; no report is produced in that case.
pub fn inspect<C>(
    manifest: &ChecksumManifest,
    staged: &[StagedFile],
    checksummer: &C,
) -> Result<VerificationReport>
where
    C: Checksummer + ?Sized,
{
    let findings = staged
        .iter()
        .map(|path| finding_for(manifest, checksummer, path))
        .collect::<Result<Vec<_>>>()?;
    Ok(VerificationReport { findings })
}

/// Like [`inspect`], hashing files on the rayon pool.
///
/// Findings keep staged order, and when several files fail to hash the error
/// for the earliest one in staged order is returned.
///
/// # Errors
/// Returns the first checksum error in staged order.
pub fn inspect_parallel<C>(
    manifest: &ChecksumManifest,
    staged: &[StagedFile],
    checksummer: &C,
) -> Result<VerificationReport>
where
    C: Checksummer + Sync + ?Sized,
{
    let outcomes: Vec<Result<Finding>> = staged
        .par_iter()
        .map(|path| finding_for(manifest, checksummer, path))
        .collect();
    let findings = outcomes.into_iter().collect::<Result<Vec<_>>>()?;
    Ok(VerificationReport { findings })
}

/// Check that every staged file is recorded in the manifest under its own name.
///
/// # Errors
/// Returns `NotCovered` with all missing files, or the checksum error that
/// stopped verification.
pub fn verify<C>(manifest: &ChecksumManifest, staged: &[StagedFile], checksummer: &C) -> Result<()>
where
    C: Checksummer + ?Sized,
{
    inspect(manifest, staged, checksummer)?.into_result()
}

#[cfg(test)]
#[path = "verify_tests.rs"]
mod tests;
