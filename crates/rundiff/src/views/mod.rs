//! View rendering modules

mod side_by_side;
mod unified;

pub use side_by_side::split_lines;
pub use unified::unified_lines;

use crate::app::App;
use crate::config::Theme;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use rundiff_core::{ChangeKind, FileView};

/// Foreground style for a change kind
pub fn change_style(kind: ChangeKind, theme: &Theme) -> Style {
    match kind {
        ChangeKind::Add => Style::default().fg(theme.added),
        ChangeKind::Remove => Style::default().fg(theme.removed),
        ChangeKind::Context => Style::default().fg(theme.context),
    }
}

/// Draw the whole viewer: header, diff panel and key line
pub fn render(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);
    render_diff(frame, app, chunks[1]);
    render_help(frame, app, chunks[2]);
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let accent = Style::default()
        .fg(app.theme.accent)
        .add_modifier(Modifier::BOLD);
    let summary = app.session.summary();
    let title = Line::from(vec![
        Span::styled(format!("run {}", app.session.run_id()), accent),
        Span::raw("  "),
        Span::raw(format!("{} files ", summary.files_changed)),
        Span::styled(
            format!("+{}", summary.total_additions),
            Style::default().fg(app.theme.added),
        ),
        Span::raw(" "),
        Span::styled(
            format!("-{}", summary.total_deletions),
            Style::default().fg(app.theme.removed),
        ),
        Span::raw("  "),
        Span::styled(
            format!("[{}]", app.session.view_mode().label()),
            Style::default().fg(app.theme.line_number),
        ),
    ]);
    let note = Line::styled(
        app.session.note().unwrap_or_default().to_string(),
        Style::default()
            .fg(app.theme.line_number)
            .add_modifier(Modifier::ITALIC),
    );
    frame.render_widget(Paragraph::new(vec![title, note]), area);
}

fn render_diff(frame: &mut Frame, app: &mut App, area: Rect) {
    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(Style::default().fg(app.theme.line_number));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if app.file_count() == 0 {
        render_empty_state(
            frame,
            inner,
            &app.theme,
            "No file changes recorded for this run",
        );
        return;
    }

    let (lines, header_offsets) = build_lines(app, inner.width as usize);
    let selected_line = header_offsets.get(app.selected).copied().unwrap_or(0);
    app.clamp_scroll(lines.len(), inner.height as usize, selected_line);

    let visible: Vec<Line> = lines
        .into_iter()
        .skip(app.scroll_offset)
        .take(inner.height as usize)
        .collect();
    frame.render_widget(Paragraph::new(visible), inner);
}

/// All diff panel lines plus the line index of each file header
pub fn build_lines(app: &App, width: usize) -> (Vec<Line<'static>>, Vec<usize>) {
    let theme = &app.theme;
    let session = &app.session;
    let mut lines = Vec::new();
    let mut header_offsets = Vec::with_capacity(session.files().len());

    for (idx, file) in session.files().iter().enumerate() {
        header_offsets.push(lines.len());
        let expanded = session.is_expanded_at(idx);
        let selected = idx == app.selected;

        let marker = if expanded { "▾ " } else { "▸ " };
        let path_style = if selected {
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };
        let mut header = vec![
            Span::styled(marker, Style::default().fg(theme.accent)),
            Span::styled(file.path.clone(), path_style),
            Span::raw(" "),
            Span::styled(
                format!("+{}", file.additions),
                Style::default().fg(theme.added),
            ),
            Span::raw(" "),
            Span::styled(
                format!("-{}", file.deletions),
                Style::default().fg(theme.removed),
            ),
        ];
        if session.copied_path() == Some(file.path.as_str()) {
            header.push(Span::styled("  copied", Style::default().fg(theme.accent)));
        }
        lines.push(Line::from(header));

        if !expanded {
            continue;
        }
        if file.is_empty() {
            lines.push(Line::styled(
                "  (no changes)",
                Style::default().fg(theme.line_number),
            ));
            continue;
        }
        match session.render_at(idx) {
            Some(FileView::Unified(rows)) => lines.extend(unified_lines(rows, theme)),
            Some(FileView::Split(rows)) => {
                let side_width = width.saturating_sub(1) / 2;
                lines.extend(split_lines(rows, theme, side_width));
            }
            None => {}
        }
    }

    (lines, header_offsets)
}

fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let text = if app.show_help {
        "j/k select  enter toggle  e expand all  c collapse all  v unified/split  y copy path  PgUp/PgDn scroll  q quit"
    } else {
        "? help  q quit"
    };
    frame.render_widget(
        Paragraph::new(Line::styled(
            text,
            Style::default().fg(app.theme.line_number),
        )),
        area,
    );
}

pub fn render_empty_state(frame: &mut Frame, area: Rect, theme: &Theme, message: &str) {
    let paragraph = Paragraph::new(Line::styled(
        message.to_string(),
        Style::default().fg(theme.line_number),
    ))
    .centered();
    frame.render_widget(paragraph, area);
}
