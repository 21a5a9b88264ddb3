//! Per-viewer session state: view mode, expanded files and the copied path

use crate::diff::{validate_files, DiffError, FileDiff};
use crate::payload::RunId;
use crate::split::{align, SplitRows};
use crate::summary::DiffSummary;
use crate::unified::{unified_rows, UnifiedRows};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use tracing::{debug, warn};

/// How a file's changes are laid out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// One column, changes in diff order
    #[default]
    Unified,
    /// Old on the left, new on the right
    Split,
}

impl ViewMode {
    /// The other mode
    pub fn toggle(self) -> Self {
        match self {
            ViewMode::Unified => ViewMode::Split,
            ViewMode::Split => ViewMode::Unified,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ViewMode::Unified => "unified",
            ViewMode::Split => "split",
        }
    }
}

/// Rows of one file in the session's current view mode
#[derive(Debug, Clone)]
pub enum FileView<'a> {
    Unified(UnifiedRows<'a>),
    Split(SplitRows<'a>),
}

/// All file diffs of one run plus the UI state of the viewer showing them.
///
/// A run may list the same path more than once (one entry per recorded
/// edit), so expand state is kept per file entry. The path-based operations
/// act on every entry with that path.
#[derive(Debug, Clone)]
pub struct DiffSession {
    run_id: RunId,
    note: Option<String>,
    files: Vec<FileDiff>,
    view_mode: ViewMode,
    /// Indices into `files`
    expanded: BTreeSet<usize>,
    copied_path: Option<String>,
}

impl DiffSession {
    /// Build a session, rejecting files that break the change-model invariants
    pub fn new(run_id: impl Into<RunId>, files: Vec<FileDiff>) -> Result<Self, DiffError> {
        let run_id = run_id.into();
        if let Err(err) = validate_files(&files) {
            warn!(run = %run_id, error = %err, "rejecting run diff");
            return Err(err);
        }

        let mut seen = HashSet::with_capacity(files.len());
        for file in &files {
            if !seen.insert(file.path.as_str()) {
                warn!(run = %run_id, path = %file.path, "path repeated in run diff");
            }
        }

        debug!(run = %run_id, files = files.len(), "opened diff session");
        Ok(Self {
            run_id,
            note: None,
            files,
            view_mode: ViewMode::default(),
            expanded: BTreeSet::new(),
            copied_path: None,
        })
    }

    pub fn with_note(mut self, note: Option<String>) -> Self {
        self.note = note;
        self
    }

    pub fn run_id(&self) -> &RunId {
        &self.run_id
    }

    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }

    pub fn files(&self) -> &[FileDiff] {
        &self.files
    }

    /// First file entry with `path`
    pub fn file(&self, path: &str) -> Option<&FileDiff> {
        self.files.iter().find(|f| f.path == path)
    }

    pub fn summary(&self) -> DiffSummary {
        DiffSummary::from_files(&self.files)
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        if self.view_mode != mode {
            debug!(mode = mode.label(), "view mode changed");
        }
        self.view_mode = mode;
    }

    pub fn toggle_view_mode(&mut self) {
        self.set_view_mode(self.view_mode.toggle());
    }

    fn indices_of<'a>(&'a self, path: &'a str) -> impl Iterator<Item = usize> + 'a {
        self.files
            .iter()
            .enumerate()
            .filter(move |(_, f)| f.path == path)
            .map(|(idx, _)| idx)
    }

    /// True when any entry with `path` is expanded
    pub fn is_expanded(&self, path: &str) -> bool {
        self.indices_of(path).any(|idx| self.expanded.contains(&idx))
    }

    pub fn is_expanded_at(&self, index: usize) -> bool {
        self.expanded.contains(&index)
    }

    /// Paths of expanded entries in file order
    pub fn expanded_paths(&self) -> impl Iterator<Item = &str> {
        self.expanded
            .iter()
            .filter_map(|&idx| self.files.get(idx))
            .map(|f| f.path.as_str())
    }

    /// Flip every entry with `path` between expanded and collapsed.
    ///
    /// Returns the new expanded state; unknown paths are ignored and stay
    /// collapsed.
    pub fn toggle_file(&mut self, path: &str) -> bool {
        let indices: Vec<usize> = self.indices_of(path).collect();
        if indices.is_empty() {
            debug!(path, "toggle for unknown file ignored");
            return false;
        }
        let expand = !indices.iter().any(|idx| self.expanded.contains(idx));
        for idx in indices {
            if expand {
                self.expanded.insert(idx);
            } else {
                self.expanded.remove(&idx);
            }
        }
        expand
    }

    /// Flip the single entry at `index`; out-of-range indices are ignored
    pub fn toggle_file_at(&mut self, index: usize) -> bool {
        if index >= self.files.len() {
            debug!(index, "toggle for unknown file ignored");
            return false;
        }
        if self.expanded.remove(&index) {
            false
        } else {
            self.expanded.insert(index);
            true
        }
    }

    pub fn expand_all(&mut self) {
        self.expanded = (0..self.files.len()).collect();
    }

    pub fn collapse_all(&mut self) {
        self.expanded.clear();
    }

    /// Remember `path` as the most recently copied one.
    ///
    /// Handing the text to a clipboard is up to the caller.
    pub fn copy_path<'a>(&mut self, path: &'a str) -> &'a str {
        self.copied_path = Some(path.to_string());
        path
    }

    pub fn copied_path(&self) -> Option<&str> {
        self.copied_path.as_deref()
    }

    /// Rows for the first entry with `path` in the current view mode
    pub fn render(&self, path: &str) -> Option<FileView<'_>> {
        let index = self.indices_of(path).next()?;
        self.render_at(index)
    }

    /// Rows for the entry at `index` in the current view mode
    pub fn render_at(&self, index: usize) -> Option<FileView<'_>> {
        let file = self.files.get(index)?;
        Some(match self.view_mode {
            ViewMode::Unified => FileView::Unified(unified_rows(&file.changes)),
            ViewMode::Split => FileView::Split(align(&file.changes)),
        })
    }
}
