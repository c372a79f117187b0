//! Aligned plain-text rendering of tables for terminal output.

use std::borrow::Cow;
use std::fmt::Write as _;

use crate::table::{Cell, Table};

pub const MISSING_PLACEHOLDER: &str = "<NA>";

pub fn render(table: &Table, limit: Option<usize>) -> String {
    let shown = limit.unwrap_or(table.len()).min(table.len());
    let rows = &table.rows()[..shown];

    let mut widths = table
        .headers()
        .iter()
        .map(|header| display_width(header).max(1))
        .collect::<Vec<_>>();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(display_width(&cell_text(cell)));
        }
    }

    let mut output = String::new();
    let header_cells = table
        .headers()
        .iter()
        .map(|header| Cow::Borrowed(header.as_str()))
        .collect::<Vec<_>>();
    let _ = writeln!(output, "{}", format_row(&header_cells, &widths));

    let separator_widths = widths.iter().map(|w| (*w).max(3)).collect::<Vec<_>>();
    let separator_cells = separator_widths
        .iter()
        .map(|w| Cow::Owned("-".repeat(*w)))
        .collect::<Vec<_>>();
    let _ = writeln!(output, "{}", format_row(&separator_cells, &separator_widths));

    for row in rows {
        let cells = row.iter().map(cell_text).collect::<Vec<_>>();
        let _ = writeln!(output, "{}", format_row(&cells, &widths));
    }
    if shown < table.len() {
        let _ = writeln!(output, "... {} more row(s)", table.len() - shown);
    }
    output
}

pub fn print(table: &Table, limit: Option<usize>) {
    print!("{}", render(table, limit));
}

fn cell_text(cell: &Cell) -> Cow<'_, str> {
    match cell {
        Cell::Text(value) => sanitize_cell(value),
        Cell::Missing => Cow::Borrowed(MISSING_PLACEHOLDER),
    }
}

fn format_row(values: &[Cow<'_, str>], widths: &[usize]) -> String {
    let mut line = values
        .iter()
        .zip(widths)
        .map(|(value, width)| {
            let padding = width.saturating_sub(display_width(value));
            format!("{value}{}", " ".repeat(padding))
        })
        .collect::<Vec<_>>()
        .join("  ");
    while line.ends_with(' ') {
        line.pop();
    }
    line
}

fn display_width(value: &str) -> usize {
    let mut width = 0usize;
    let mut chars = value.chars();
    while let Some(ch) = chars.next() {
        if ch == '\u{1b}' {
            // ANSI escape sequence, e.g. \x1b[31m
            for next in chars.by_ref() {
                if next == 'm' {
                    break;
                }
            }
        } else {
            width += 1;
        }
    }
    width
}

fn sanitize_cell(value: &str) -> Cow<'_, str> {
    if value.contains(['\n', '\r', '\t']) {
        Cow::Owned(value.replace(['\n', '\r', '\t'], " "))
    } else {
        Cow::Borrowed(value)
    }
}
