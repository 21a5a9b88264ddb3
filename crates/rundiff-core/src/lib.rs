//! Rundiff Core - change model and diff layouts for agent run reviews
//!
//! This library validates already-computed line-level change lists and lays
//! them out either as a single unified column or as aligned side-by-side rows.

pub mod change;
pub mod diff;
pub mod payload;
pub mod session;
pub mod split;
pub mod summary;
pub mod unified;

pub use change::{Change, ChangeKind};
pub use diff::{count_changes, validate_files, CountField, DiffError, FileDiff};
pub use payload::{RunDiff, RunId};
pub use session::{DiffSession, FileView, ViewMode};
pub use split::{align, split_row_count, RowPair, SplitRows};
pub use summary::DiffSummary;
pub use unified::{gutter_cell, unified_rows, UnifiedRow, UnifiedRows, GUTTER_DIGITS};
