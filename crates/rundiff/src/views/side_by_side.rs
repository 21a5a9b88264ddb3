//! Side-by-side view - old on the left, new on the right

use super::change_style;
use crate::config::Theme;
use crate::print::{fit_width, CELL_CHROME};
use ratatui::{
    style::Style,
    text::{Line, Span},
};
use rundiff_core::{gutter_cell, Change, SplitRows};

/// One styled line per row pair, each side `side_width` columns wide
pub fn split_lines(
    rows: SplitRows<'_>,
    theme: &Theme,
    side_width: usize,
) -> Vec<Line<'static>> {
    rows.map(|pair| {
        let mut spans = side_spans(pair.left, |c| c.old_line, theme, side_width);
        spans.push(Span::styled("│", Style::default().fg(theme.line_number)));
        spans.extend(side_spans(pair.right, |c| c.new_line, theme, side_width));
        Line::from(spans)
    })
    .collect()
}

fn side_spans(
    change: Option<&Change>,
    line: fn(&Change) -> Option<usize>,
    theme: &Theme,
    side_width: usize,
) -> Vec<Span<'static>> {
    let Some(change) = change else {
        return vec![Span::raw(" ".repeat(side_width))];
    };
    let style = change_style(change.kind, theme);
    if side_width < CELL_CHROME {
        let prefix = change.kind.prefix().to_string();
        return vec![Span::styled(fit_width(&prefix, side_width), style)];
    }
    vec![
        Span::styled(
            gutter_cell(line(change)),
            Style::default().fg(theme.line_number),
        ),
        Span::raw(" "),
        Span::styled(change.kind.prefix().to_string(), style),
        Span::styled(fit_width(&change.content, side_width - CELL_CHROME), style),
    ]
}
