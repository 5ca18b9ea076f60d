//! Parsing of `git diff --cached --name-status` output.

use std::path::Path;

use crate::Result;

use super::CommandRunner;

/// Arguments passed to git to list the staging area.
pub const STAGED_STATUS_ARGS: [&str; 3] = ["diff", "--cached", "--name-status"];

/// A path, relative to the repository root, whose content must be covered.
pub type StagedFile = String;

/// Change kind reported by the first character of a name-status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeStatus {
    Added,
    Modified,
    Copied,
    Renamed,
    Deleted,
    TypeChanged,
    Unmerged,
    Unknown(char),
}

impl ChangeStatus {
    /// Map a status code to its kind. Only the first character counts, so
    /// `R100` and `C075` carry their similarity score without affecting the kind.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        let first = code.chars().next()?;
        Some(match first {
            'A' => Self::Added,
            'M' => Self::Modified,
            'C' => Self::Copied,
            'R' => Self::Renamed,
            'D' => Self::Deleted,
            'T' => Self::TypeChanged,
            'U' => Self::Unmerged,
            other => Self::Unknown(other),
        })
    }

    /// Whether files with this status take part in verification.
    #[must_use]
    pub const fn is_verified(self) -> bool {
        matches!(
            self,
            Self::Added | Self::Modified | Self::Copied | Self::Renamed
        )
    }
}

/// One line of name-status output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusEntry {
    pub status: ChangeStatus,
    /// Destination path for renames, the first path otherwise.
    pub path: String,
    pub old_path: Option<String>,
}

/// Parse name-status text into entries, in input order.
///
/// Lines with fewer than two whitespace-separated tokens are skipped, as are
/// renames without a destination path. Copies report the path in the first
/// column. Tokens are split on any whitespace, so a path containing spaces is
/// cut at the first space.
#[must_use]
pub fn parse_name_status(text: &str) -> Vec<StatusEntry> {
    text.lines().filter_map(parse_line).collect()
}

fn parse_line(line: &str) -> Option<StatusEntry> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() < 2 {
        return None;
    }
    let status = ChangeStatus::from_code(tokens[0])?;

    match (status, tokens.get(2)) {
        (ChangeStatus::Renamed, None) => None,
        (ChangeStatus::Renamed, Some(dest)) => Some(StatusEntry {
            status,
            path: (*dest).to_string(),
            old_path: Some(tokens[1].to_string()),
        }),
        _ => Some(StatusEntry {
            status,
            path: tokens[1].to_string(),
            old_path: None,
        }),
    }
}

/// Paths subject to verification: added, modified and copied files plus
/// rename destinations, in input order and without de-duplication. Deletions
/// never appear.
#[must_use]
pub fn parse_staged_files(text: &str) -> Vec<StagedFile> {
    parse_name_status(text)
        .into_iter()
        .filter(|entry| entry.status.is_verified())
        .map(|entry| entry.path)
        .collect()
}

/// Ask git for the staging area of the repository at `workdir` and parse it.
///
/// # Errors
/// Returns the runner's error unchanged if git cannot be run or fails.
pub fn staged_files(
    runner: &dyn CommandRunner,
    git_program: &str,
    workdir: &Path,
) -> Result<Vec<StagedFile>> {
    let text = runner.run(git_program, &STAGED_STATUS_ARGS, workdir)?;
    Ok(parse_staged_files(&text))
}
