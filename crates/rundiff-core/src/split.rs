//! Side-by-side alignment of a change list
//!
//! Pairing is greedy with a single lookahead: a removal immediately followed
//! by an addition shares one row, everything else gets its own row. Runs of
//! several removals and additions are not balanced against each other, so
//! `[-a, -b, -c, +x, +y]` yields `-a`, `-b`, `-c|+x`, `+y`.

use crate::change::{Change, ChangeKind};
use std::iter::FusedIterator;

/// One aligned row of the split view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowPair<'a> {
    /// Old side
    pub left: Option<&'a Change>,
    /// New side
    pub right: Option<&'a Change>,
}

impl<'a> RowPair<'a> {
    /// A removal and an addition sharing the row
    pub fn is_paired(&self) -> bool {
        matches!(
            (self.left, self.right),
            (Some(l), Some(r)) if l.kind == ChangeKind::Remove && r.kind == ChangeKind::Add
        )
    }

    /// The same context line shown on both sides
    pub fn is_context(&self) -> bool {
        matches!(self.left, Some(c) if c.kind == ChangeKind::Context)
    }

    /// Number of input changes this row consumed
    pub fn width(&self) -> usize {
        match (self.left, self.right) {
            (Some(l), Some(r)) if std::ptr::eq(l, r) => 1,
            (Some(_), Some(_)) => 2,
            (None, None) => 0,
            _ => 1,
        }
    }
}

/// Lazy iterator over split rows; clone it to start over
#[derive(Debug, Clone)]
pub struct SplitRows<'a> {
    changes: &'a [Change],
    cursor: usize,
}

impl<'a> Iterator for SplitRows<'a> {
    type Item = RowPair<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.changes.get(self.cursor)?;
        let pair = match current.kind {
            ChangeKind::Context => {
                self.cursor += 1;
                RowPair {
                    left: Some(current),
                    right: Some(current),
                }
            }
            ChangeKind::Remove => match self.changes.get(self.cursor + 1) {
                Some(next) if next.kind == ChangeKind::Add => {
                    self.cursor += 2;
                    RowPair {
                        left: Some(current),
                        right: Some(next),
                    }
                }
                _ => {
                    self.cursor += 1;
                    RowPair {
                        left: Some(current),
                        right: None,
                    }
                }
            },
            ChangeKind::Add => {
                self.cursor += 1;
                RowPair {
                    left: None,
                    right: Some(current),
                }
            }
        };
        Some(pair)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.changes.len() - self.cursor;
        (remaining.div_ceil(2), Some(remaining))
    }
}

impl FusedIterator for SplitRows<'_> {}

/// Align a change list into side-by-side rows
pub fn align(changes: &[Change]) -> SplitRows<'_> {
    SplitRows { changes, cursor: 0 }
}

/// Number of rows [`align`] emits for `changes`, without walking the pairs
pub fn split_row_count(changes: &[Change]) -> usize {
    let replaced = changes
        .windows(2)
        .filter(|w| w[0].kind == ChangeKind::Remove && w[1].kind == ChangeKind::Add)
        .count();
    changes.len() - replaced
}
