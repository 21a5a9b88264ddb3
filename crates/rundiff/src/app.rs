//! Application state and logic

use crate::config::Theme;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rundiff_core::{DiffSession, ViewMode};
use tracing::debug;

/// The main application state
pub struct App {
    /// Diff session being viewed; owns view mode, expand and copy state
    pub session: DiffSession,
    /// Index of the selected file
    pub selected: usize,
    /// First visible line of the diff panel
    pub scroll_offset: usize,
    /// Whether to quit
    pub should_quit: bool,
    /// Show the key help line
    pub show_help: bool,
    pub theme: Theme,
    /// Scroll so the selected file header is visible on the next draw
    needs_scroll_to_selected: bool,
}

impl App {
    pub fn new(session: DiffSession, theme: Theme) -> Self {
        Self {
            session,
            selected: 0,
            scroll_offset: 0,
            should_quit: false,
            show_help: false,
            theme,
            needs_scroll_to_selected: true,
        }
    }

    pub fn file_count(&self) -> usize {
        self.session.files().len()
    }

    /// Path of the selected file, if the session has any files
    pub fn selected_path(&self) -> Option<&str> {
        self.session
            .files()
            .get(self.selected)
            .map(|f| f.path.as_str())
    }

    pub fn next_file(&mut self) {
        if self.selected + 1 < self.file_count() {
            self.selected += 1;
            self.needs_scroll_to_selected = true;
        }
    }

    pub fn prev_file(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
            self.needs_scroll_to_selected = true;
        }
    }

    pub fn toggle_selected(&mut self) {
        if self.selected < self.file_count() {
            self.session.toggle_file_at(self.selected);
            self.needs_scroll_to_selected = true;
        }
    }

    pub fn expand_all(&mut self) {
        self.session.expand_all();
        self.needs_scroll_to_selected = true;
    }

    pub fn collapse_all(&mut self) {
        self.session.collapse_all();
        self.needs_scroll_to_selected = true;
    }

    pub fn toggle_view_mode(&mut self) {
        self.session.toggle_view_mode();
        self.needs_scroll_to_selected = true;
    }

    pub fn copy_selected_path(&mut self) {
        if let Some(path) = self.selected_path().map(str::to_owned) {
            self.session.copy_path(&path);
            debug!(path = %path, "copied path");
        }
    }

    pub fn scroll_up(&mut self, lines: usize) {
        self.scroll_offset = self.scroll_offset.saturating_sub(lines);
    }

    pub fn scroll_down(&mut self, lines: usize) {
        self.scroll_offset = self.scroll_offset.saturating_add(lines);
    }

    /// Keep the scroll offset inside the content, and bring the selected
    /// header into view when a navigation action asked for it
    pub fn clamp_scroll(
        &mut self,
        total_lines: usize,
        viewport_height: usize,
        selected_line: usize,
    ) {
        if self.needs_scroll_to_selected && viewport_height > 0 {
            if selected_line < self.scroll_offset {
                self.scroll_offset = selected_line;
            } else if selected_line >= self.scroll_offset + viewport_height {
                self.scroll_offset = selected_line + 1 - viewport_height;
            }
            self.needs_scroll_to_selected = false;
        }
        self.scroll_offset = self
            .scroll_offset
            .min(max_scroll(total_lines, viewport_height));
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true
            }
            KeyCode::Char('j') | KeyCode::Down => self.next_file(),
            KeyCode::Char('k') | KeyCode::Up => self.prev_file(),
            KeyCode::Enter | KeyCode::Char(' ') => self.toggle_selected(),
            KeyCode::Char('e') => self.expand_all(),
            KeyCode::Char('c') => self.collapse_all(),
            KeyCode::Char('v') => self.toggle_view_mode(),
            KeyCode::Char('s') => self.session.set_view_mode(ViewMode::Split),
            KeyCode::Char('u') => self.session.set_view_mode(ViewMode::Unified),
            KeyCode::Char('y') => self.copy_selected_path(),
            KeyCode::Char('?') => self.show_help = !self.show_help,
            KeyCode::PageDown => self.scroll_down(10),
            KeyCode::PageUp => self.scroll_up(10),
            KeyCode::Char('J') => self.scroll_down(1),
            KeyCode::Char('K') => self.scroll_up(1),
            _ => {}
        }
    }
}

fn max_scroll(total_lines: usize, viewport_height: usize) -> usize {
    total_lines.saturating_sub(viewport_height)
}
