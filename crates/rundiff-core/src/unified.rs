//! Unified (single column) projection of a change list

use crate::change::{Change, ChangeKind};
use std::iter::FusedIterator;
use std::slice;

/// Width reserved for one line number in the gutter
pub const GUTTER_DIGITS: usize = 4;

/// One display row of the unified view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnifiedRow<'a> {
    pub change: &'a Change,
}

impl<'a> UnifiedRow<'a> {
    pub fn kind(&self) -> ChangeKind {
        self.change.kind
    }

    /// `+`, `-` or a space, decided by the kind alone
    pub fn prefix(&self) -> char {
        self.change.kind.prefix()
    }

    pub fn content(&self) -> &'a str {
        &self.change.content
    }

    /// Line number shown in the margin: old for removals, new for additions
    pub fn line_number(&self) -> Option<usize> {
        match self.change.kind {
            ChangeKind::Remove => self.change.old_line,
            ChangeKind::Add | ChangeKind::Context => self.change.new_line,
        }
    }

    /// Margin text with an old and a new column.
    ///
    /// Removals fill only the old column, additions only the new one and
    /// context lines both.
    pub fn gutter(&self) -> String {
        let old = match self.change.kind {
            ChangeKind::Remove | ChangeKind::Context => self.change.old_line,
            ChangeKind::Add => None,
        };
        let new = match self.change.kind {
            ChangeKind::Add | ChangeKind::Context => self.change.new_line,
            ChangeKind::Remove => None,
        };
        format!("{} {}", gutter_cell(old), gutter_cell(new))
    }
}

/// Right-align a line number in a fixed-width cell, blank when absent
pub fn gutter_cell(line: Option<usize>) -> String {
    match line {
        Some(n) => format!("{:>width$}", n, width = GUTTER_DIGITS),
        None => " ".repeat(GUTTER_DIGITS),
    }
}

/// Lazy iterator over unified rows; clone it to start over
#[derive(Debug, Clone)]
pub struct UnifiedRows<'a> {
    inner: slice::Iter<'a, Change>,
}

impl<'a> Iterator for UnifiedRows<'a> {
    type Item = UnifiedRow<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|change| UnifiedRow { change })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for UnifiedRows<'_> {}
impl FusedIterator for UnifiedRows<'_> {}

/// Project a change list into one row per change, in input order
pub fn unified_rows(changes: &[Change]) -> UnifiedRows<'_> {
    UnifiedRows {
        inner: changes.iter(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario() -> Vec<Change> {
        vec![
            Change::context(1, 1, "a"),
            Change::remove(2, "b"),
            Change::add(2, "c"),
            Change::context(3, 3, "d"),
        ]
    }

    #[test]
    fn test_one_row_per_change_in_order() {
        let changes = scenario();
        let rows: Vec<_> = unified_rows(&changes).collect();

        assert_eq!(rows.len(), changes.len());
        let contents: Vec<&str> = rows.iter().map(|r| r.content()).collect();
        assert_eq!(contents, vec!["a", "b", "c", "d"]);
        let prefixes: String = rows.iter().map(|r| r.prefix()).collect();
        assert_eq!(prefixes, " -+ ");
    }

    #[test]
    fn test_empty_input_yields_no_rows() {
        let rows = unified_rows(&[]);
        assert_eq!(rows.len(), 0);
        assert_eq!(rows.count(), 0);
    }

    #[test]
    fn test_rows_are_restartable() {
        let changes = scenario();
        let rows = unified_rows(&changes);
        let first: Vec<_> = rows.clone().collect();
        let second: Vec<_> = rows.collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_gutter_columns() {
        let changes = vec![
            Change::remove(12, "x"),
            Change::add(13, "y"),
            Change::context(20, 21, "z"),
        ];
        let gutters: Vec<String> = unified_rows(&changes).map(|r| r.gutter()).collect();

        assert_eq!(gutters[0], "  12     ");
        assert_eq!(gutters[1], "       13");
        assert_eq!(gutters[2], "  20   21");
    }

    #[test]
    fn test_line_number_follows_kind() {
        let changes = scenario();
        let numbers: Vec<_> = unified_rows(&changes).map(|r| r.line_number()).collect();
        assert_eq!(numbers, vec![Some(1), Some(2), Some(2), Some(3)]);
    }

    #[test]
    fn test_content_is_not_normalized() {
        let changes = vec![Change::add(1, "\tindented  trailing  ")];
        let row = unified_rows(&changes).next().unwrap();
        assert_eq!(row.content(), "\tindented  trailing  ");
    }
}
