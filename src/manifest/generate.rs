//! Building a manifest from a Go cover profile.

use std::fmt;

use indexmap::IndexSet;

use crate::CoverageGuardError;
use crate::checksum::Checksummer;

/// Header line that opens every cover profile (`mode: set`, `mode: atomic`, ...).
const MODE_PREFIX: &str = "mode";

/// Repository-relative source paths referenced by a cover profile.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoverProfile {
    /// Distinct paths in first-seen order.
    pub paths: IndexSet<String>,
    /// Paths that are not under the module prefix.
    pub outside_module: Vec<String>,
}

/// Extract the set of source files from cover profile text.
///
/// Each record is `<import-path>:<block data>`. The import path is made
/// relative by stripping `module/`; an empty module keeps paths unchanged.
#[must_use]
pub fn parse_cover_profile(text: &str, module: &str) -> CoverProfile {
    let module = module.trim_end_matches('/');
    let mut profile = CoverProfile::default();

    for line in text.lines() {
        let full_path = line.split(':').next().unwrap_or_default().trim();
        if full_path.is_empty() || full_path == MODE_PREFIX {
            continue;
        }
        match relative_to_module(full_path, module) {
            Some(relative) => {
                profile.paths.insert(relative.to_string());
            }
            None => profile.outside_module.push(full_path.to_string()),
        }
    }

    profile
}

fn relative_to_module<'a>(path: &'a str, module: &str) -> Option<&'a str> {
    if module.is_empty() {
        return Some(path);
    }
    path.strip_prefix(module)?
        .strip_prefix('/')
        .filter(|rest| !rest.is_empty())
}

/// One manifest record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    pub checksum: String,
    pub path: String,
}

impl fmt::Display for ManifestEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}", self.checksum, self.path)
    }
}

/// Hash every path and pair it with its checksum.
///
/// Unreadable files and paths containing whitespace do not stop generation;
/// they are returned alongside the entries so the caller can warn about them.
/// A whitespace path would split into extra tokens and be dropped when the
/// manifest is read back.
pub fn generate_manifest<'a, I>(
    paths: I,
    checksummer: &dyn Checksummer,
) -> (Vec<ManifestEntry>, Vec<CoverageGuardError>)
where
    I: IntoIterator<Item = &'a String>,
{
    let mut entries = Vec::new();
    let mut failures = Vec::new();

    for path in paths {
        if path.contains(char::is_whitespace) {
            failures.push(CoverageGuardError::UnrecordablePath { path: path.clone() });
            continue;
        }
        match checksummer.compute(path) {
            Ok(checksum) => entries.push(ManifestEntry {
                checksum,
                path: path.clone(),
            }),
            Err(e) => failures.push(e),
        }
    }

    (entries, failures)
}

#[cfg(test)]
#[path = "generate_tests.rs"]
mod tests;
