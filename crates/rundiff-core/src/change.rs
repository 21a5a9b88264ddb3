//! Line-level change representation

use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of change a single diff line carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    /// Line exists only in the new revision
    Add,
    /// Line exists only in the old revision
    Remove,
    /// Line is unchanged (context)
    Context,
}

impl ChangeKind {
    /// One-character marker shown before the line content
    pub fn prefix(self) -> char {
        match self {
            ChangeKind::Add => '+',
            ChangeKind::Remove => '-',
            ChangeKind::Context => ' ',
        }
    }

    /// Whether a change of this kind must carry an old-side line number
    pub fn has_old_line(self) -> bool {
        matches!(self, ChangeKind::Remove | ChangeKind::Context)
    }

    /// Whether a change of this kind must carry a new-side line number
    pub fn has_new_line(self) -> bool {
        matches!(self, ChangeKind::Add | ChangeKind::Context)
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChangeKind::Add => write!(f, "add"),
            ChangeKind::Remove => write!(f, "remove"),
            ChangeKind::Context => write!(f, "context"),
        }
    }
}

/// One line of a file diff
///
/// Field names follow the dashboard wire format (`type`, `oldLineNumber`,
/// `newLineNumber`, `lineNumber`). Line numbers are not checked on
/// construction; use [`Change::has_valid_lines`] or
/// [`FileDiff::validate`](crate::diff::FileDiff::validate).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Change {
    #[serde(rename = "type")]
    pub kind: ChangeKind,
    /// Literal line text, whitespace preserved
    pub content: String,
    /// Line number in the old file (remove and context only)
    #[serde(
        rename = "oldLineNumber",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub old_line: Option<usize>,
    /// Line number in the new file (add and context only)
    #[serde(
        rename = "newLineNumber",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub new_line: Option<usize>,
    /// Position of the line inside the displayed hunk, if the producer sent one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_number: Option<usize>,
}

impl Change {
    pub fn new(kind: ChangeKind, content: impl Into<String>) -> Self {
        Self {
            kind,
            content: content.into(),
            old_line: None,
            new_line: None,
            line_number: None,
        }
    }

    pub fn add(new_line: usize, content: impl Into<String>) -> Self {
        Self::new(ChangeKind::Add, content)
            .with_lines(None, Some(new_line))
    }

    pub fn remove(old_line: usize, content: impl Into<String>) -> Self {
        Self::new(ChangeKind::Remove, content)
            .with_lines(Some(old_line), None)
    }

    pub fn context(old_line: usize, new_line: usize, content: impl Into<String>) -> Self {
        Self::new(ChangeKind::Context, content)
            .with_lines(Some(old_line), Some(new_line))
    }

    pub fn with_lines(mut self, old_line: Option<usize>, new_line: Option<usize>) -> Self {
        self.old_line = old_line;
        self.new_line = new_line;
        self
    }

    pub fn with_line_number(mut self, line_number: usize) -> Self {
        self.line_number = Some(line_number);
        self
    }

    /// Check if this is an actual change (not just context)
    pub fn is_change(&self) -> bool {
        self.kind != ChangeKind::Context
    }

    /// Check that the line numbers present match the kind and are 1-based
    pub fn has_valid_lines(&self) -> bool {
        fn fits(required: bool, line: Option<usize>) -> bool {
            match line {
                Some(n) => required && n >= 1,
                None => !required,
            }
        }
        fits(self.kind.has_old_line(), self.old_line)
            && fits(self.kind.has_new_line(), self.new_line)
    }
}
