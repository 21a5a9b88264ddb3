//! Plain text output for pipes and `--print`

use rundiff_core::{gutter_cell, Change, DiffSession, FileView, RowPair, GUTTER_DIGITS};
use std::borrow::Cow;
use std::io::{self, Write};
use unicode_width::UnicodeWidthChar;

/// Columns between tab stops when tabs are expanded for display
pub const TAB_WIDTH: usize = 4;

/// Columns taken by the gutter, its trailing space and the prefix
pub const CELL_CHROME: usize = GUTTER_DIGITS + 2;

/// Write the session header, then every file with the rows of expanded files
pub fn write_session(
    out: &mut impl Write,
    session: &DiffSession,
    width: usize,
) -> io::Result<()> {
    writeln!(out, "run {}", session.run_id())?;
    writeln!(out, "{}", session.summary())?;
    if let Some(note) = session.note() {
        writeln!(out, "note: {}", note)?;
    }

    for (idx, file) in session.files().iter().enumerate() {
        writeln!(out)?;
        writeln!(out, "{} (+{} -{})", file.path, file.additions, file.deletions)?;
        if !session.is_expanded_at(idx) {
            continue;
        }
        match session.render_at(idx) {
            Some(FileView::Unified(rows)) => {
                if rows.len() == 0 {
                    writeln!(out, "  (no changes)")?;
                }
                for row in rows {
                    let content = display_text(row.content());
                    writeln!(out, "{} {}{}", row.gutter(), row.prefix(), content)?;
                }
            }
            Some(FileView::Split(rows)) => {
                let mut empty = true;
                for pair in rows {
                    empty = false;
                    writeln!(out, "{}", split_line(&pair, width))?;
                }
                if empty {
                    writeln!(out, "  (no changes)")?;
                }
            }
            None => {}
        }
    }
    Ok(())
}

fn split_line(pair: &RowPair<'_>, width: usize) -> String {
    let left = side_cell(pair.left, |c| c.old_line, width);
    let right = side_cell(pair.right, |c| c.new_line, width);
    format!("{} | {}", left, right).trim_end().to_string()
}

/// `gutter prefix content`, clipped and padded to `width` columns.
///
/// Too narrow for the gutter, a present change still shows its prefix.
fn side_cell(
    change: Option<&Change>,
    line: fn(&Change) -> Option<usize>,
    width: usize,
) -> String {
    let Some(c) = change else {
        return fit_width("", width);
    };
    if width < CELL_CHROME {
        return fit_width(&c.kind.prefix().to_string(), width);
    }
    format!(
        "{} {}{}",
        gutter_cell(line(c)),
        c.kind.prefix(),
        fit_width(&c.content, width - CELL_CHROME)
    )
}

/// Expand tabs to the next tab stop and drop other control characters, so
/// the text takes the columns it is measured at
pub fn display_text(text: &str) -> Cow<'_, str> {
    if !text.chars().any(char::is_control) {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len() + TAB_WIDTH);
    let mut col = 0;
    for ch in text.chars() {
        if ch == '\t' {
            let pad = TAB_WIDTH - col % TAB_WIDTH;
            out.extend(std::iter::repeat(' ').take(pad));
            col += pad;
        } else if !ch.is_control() {
            col += ch.width().unwrap_or(0);
            out.push(ch);
        }
    }
    Cow::Owned(out)
}

/// Clip to `width` display columns and pad with spaces up to it
pub fn fit_width(text: &str, width: usize) -> String {
    let mut out = String::new();
    let mut used = 0;
    for ch in display_text(text).chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        out.push(ch);
    }
    out.extend(std::iter::repeat(' ').take(width - used));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rundiff_core::{FileDiff, ViewMode};

    fn session() -> DiffSession {
        let files = vec![
            FileDiff::from_changes(
                "config.py",
                vec![
                    Change::context(1, 1, "a"),
                    Change::remove(2, "b"),
                    Change::add(2, "c"),
                    Change::context(3, 3, "d"),
                ],
            ),
            FileDiff::from_changes("empty.md", Vec::new()),
        ];
        DiffSession::new(45_i64, files).unwrap()
    }

    fn render(session: &DiffSession, width: usize) -> String {
        let mut buf = Vec::new();
        write_session(&mut buf, session, width).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_collapsed_files_show_headers_only() {
        let text = render(&session(), 20);
        assert_eq!(
            text,
            "run 45\n2 files changed, +1 -1\n\nconfig.py (+1 -1)\n\nempty.md (+0 -0)\n"
        );
    }

    #[test]
    fn test_unified_rows() {
        let mut s = session();
        s.toggle_file("config.py");
        let text = render(&s, 20);

        assert!(text.contains("   1    1  a\n"));
        assert!(text.contains("   2      -b\n"));
        assert!(text.contains("        2 +c\n"));
        assert!(text.contains("   3    3  d\n"));
    }

    #[test]
    fn test_split_rows() {
        let mut s = session();
        s.toggle_file("config.py");
        s.set_view_mode(ViewMode::Split);
        let text = render(&s, 10);

        let rows: Vec<&str> = text
            .lines()
            .skip_while(|l| !l.starts_with("config.py"))
            .skip(1)
            .take(3)
            .collect();
        assert_eq!(
            rows,
            vec![
                "   1  a    |    1  a",
                "   2 -b    |    2 +c",
                "   3  d    |    3  d",
            ]
        );
    }

    #[test]
    fn test_expanded_empty_file() {
        let mut s = session();
        s.expand_all();
        let text = render(&s, 20);
        assert!(text.ends_with("empty.md (+0 -0)\n  (no changes)\n"));
    }

    #[test]
    fn test_fit_width() {
        assert_eq!(fit_width("abc", 5), "abc  ");
        assert_eq!(fit_width("abcdef", 3), "abc");
        // wide characters take two columns
        assert_eq!(fit_width("日本語", 5), "日本 ");
    }

    #[test]
    fn test_fit_width_expands_tabs() {
        assert_eq!(fit_width("\tx", 8), "    x   ");
        assert_eq!(fit_width("ab\tc", 6), "ab  c ");
        assert_eq!(fit_width("\t\tx", 6), "      ");
        assert_eq!(fit_width("a\rb", 3), "ab ");
    }

    #[test]
    fn test_display_text_leaves_plain_text_borrowed() {
        assert!(matches!(display_text("plain"), Cow::Borrowed("plain")));
        assert_eq!(display_text("\tx"), "    x");
    }

    #[test]
    fn test_split_rows_with_tab_indented_content() {
        let files = vec![FileDiff::from_changes(
            "main.go",
            vec![
                Change::context(1, 1, "func main() {"),
                Change::remove(2, "\treturn"),
                Change::add(2, "\tos.Exit(1)"),
            ],
        )];
        let mut s = DiffSession::new(3_i64, files).unwrap();
        s.expand_all();
        s.set_view_mode(ViewMode::Split);
        let text = render(&s, 14);

        let rows: Vec<&str> = text
            .lines()
            .skip_while(|l| !l.starts_with("main.go"))
            .skip(1)
            .collect();
        assert_eq!(
            rows,
            vec![
                "   1  func mai |    1  func mai",
                "   2 -    retu |    2 +    os.E",
            ]
        );
        assert!(rows.iter().all(|r| r.find('|') == Some(15)));
    }

    #[test]
    fn test_narrow_split_keeps_prefix() {
        let mut s = session();
        s.expand_all();
        s.set_view_mode(ViewMode::Split);
        let text = render(&s, 3);
        assert!(text.contains("-   | +\n"));
    }
}
