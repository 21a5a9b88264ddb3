//! Per-file change sets and their validation

use crate::change::{Change, ChangeKind};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DiffError {
    #[error("File diff has an empty path")]
    EmptyPath,
    #[error("{path}: change {index} ({kind}) has line numbers that do not fit its kind")]
    InvalidLineNumbers {
        path: String,
        index: usize,
        kind: ChangeKind,
    },
    #[error("{path}: declared {field} = {declared}, but the change list has {actual}")]
    CountMismatch {
        path: String,
        field: CountField,
        declared: usize,
        actual: usize,
    },
    #[error("Failed to parse run diff: {0}")]
    Parse(#[from] serde_json::Error),
}

impl DiffError {
    /// True for errors raised because a diff breaks the change-model invariants
    pub fn is_invariant_violation(&self) -> bool {
        matches!(
            self,
            DiffError::EmptyPath
                | DiffError::InvalidLineNumbers { .. }
                | DiffError::CountMismatch { .. }
        )
    }
}

/// Which aggregate count disagreed with the change list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountField {
    Additions,
    Deletions,
}

impl fmt::Display for CountField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CountField::Additions => write!(f, "additions"),
            CountField::Deletions => write!(f, "deletions"),
        }
    }
}

/// A diff for a single file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileDiff {
    /// Repository-relative path, used as the display and copy key
    pub path: String,
    /// All changes in diff order
    #[serde(default)]
    pub changes: Vec<Change>,
    /// Number of added lines as declared by the producer
    #[serde(default)]
    pub additions: usize,
    /// Number of removed lines as declared by the producer
    #[serde(default)]
    pub deletions: usize,
}

impl FileDiff {
    /// Build a file diff whose counts are derived from `changes`
    pub fn from_changes(path: impl Into<String>, changes: Vec<Change>) -> Self {
        let (additions, deletions) = count_changes(&changes);
        Self {
            path: path.into(),
            changes,
            additions,
            deletions,
        }
    }

    /// Check if the file has no changes at all
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Check the path, every change's line numbers and the declared counts.
    ///
    /// Nothing is corrected: the first problem found is returned.
    pub fn validate(&self) -> Result<(), DiffError> {
        if self.path.is_empty() {
            return Err(DiffError::EmptyPath);
        }

        if let Some((index, change)) = self
            .changes
            .iter()
            .enumerate()
            .find(|(_, c)| !c.has_valid_lines())
        {
            return Err(DiffError::InvalidLineNumbers {
                path: self.path.clone(),
                index,
                kind: change.kind,
            });
        }

        let (additions, deletions) = count_changes(&self.changes);
        if additions != self.additions {
            return Err(DiffError::CountMismatch {
                path: self.path.clone(),
                field: CountField::Additions,
                declared: self.additions,
                actual: additions,
            });
        }
        if deletions != self.deletions {
            return Err(DiffError::CountMismatch {
                path: self.path.clone(),
                field: CountField::Deletions,
                declared: self.deletions,
                actual: deletions,
            });
        }

        Ok(())
    }
}

/// Validate files in order, stopping at the first violation
pub fn validate_files(files: &[FileDiff]) -> Result<(), DiffError> {
    files.iter().try_for_each(FileDiff::validate)
}

/// Count (additions, deletions) in a change list
pub fn count_changes(changes: &[Change]) -> (usize, usize) {
    changes
        .iter()
        .fold((0, 0), |(adds, dels), change| match change.kind {
            ChangeKind::Add => (adds + 1, dels),
            ChangeKind::Remove => (adds, dels + 1),
            ChangeKind::Context => (adds, dels),
        })
}
