//! Session-wide totals

use crate::diff::{validate_files, DiffError, FileDiff};
use serde::Serialize;
use std::fmt;

/// Aggregate statistics over all files of a session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DiffSummary {
    pub total_additions: usize,
    pub total_deletions: usize,
    /// Every included file counts, even one with no changes
    pub files_changed: usize,
}

impl DiffSummary {
    /// Sum the declared per-file counts
    pub fn from_files(files: &[FileDiff]) -> Self {
        files.iter().fold(
            Self {
                files_changed: files.len(),
                ..Self::default()
            },
            |acc, file| Self {
                total_additions: acc.total_additions + file.additions,
                total_deletions: acc.total_deletions + file.deletions,
                ..acc
            },
        )
    }

    /// Validate every file, then sum
    pub fn checked(files: &[FileDiff]) -> Result<Self, DiffError> {
        validate_files(files)?;
        Ok(Self::from_files(files))
    }
}

impl fmt::Display for DiffSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let noun = if self.files_changed == 1 { "file" } else { "files" };
        write!(
            f,
            "{} {} changed, +{} -{}",
            self.files_changed, noun, self.total_additions, self.total_deletions
        )
    }
}
