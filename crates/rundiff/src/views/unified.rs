//! Unified view - one column, changes in diff order

use super::change_style;
use crate::config::Theme;
use crate::print::display_text;
use ratatui::{
    style::Style,
    text::{Line, Span},
};
use rundiff_core::UnifiedRows;

/// One styled line per change: `old new ±content`
pub fn unified_lines(rows: UnifiedRows<'_>, theme: &Theme) -> Vec<Line<'static>> {
    rows.map(|row| {
        let style = change_style(row.kind(), theme);
        Line::from(vec![
            Span::styled(row.gutter(), Style::default().fg(theme.line_number)),
            Span::raw(" "),
            Span::styled(row.prefix().to_string(), style),
            Span::styled(display_text(row.content()).into_owned(), style),
        ])
    })
    .collect()
}
