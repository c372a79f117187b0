//! Cell cleaning applied to every loaded table before comparison.

use crate::table::{Cell, Table};

/// Tokens that stand for "no value" once surrounding whitespace is removed.
pub const NULL_TOKENS: [&str; 4] = ["", "nan", "None", "NaN"];

/// Returns a copy of `table` with every cell trimmed and null-like tokens
/// replaced by [`Cell::Missing`]. Applying it twice yields the same table.
pub fn normalize(table: &Table) -> Table {
    table.map_cells(normalize_cell)
}

pub fn normalize_cell(cell: &Cell) -> Cell {
    match cell {
        Cell::Missing => Cell::Missing,
        Cell::Text(raw) => {
            let trimmed = raw.trim();
            if NULL_TOKENS.contains(&trimmed) {
                Cell::Missing
            } else {
                Cell::text(trimmed)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_tokens_become_missing() {
        for raw in ["", "   ", " nan ", "None", "\tNaN\n"] {
            assert_eq!(normalize_cell(&Cell::text(raw)), Cell::Missing, "{raw:?}");
        }
    }

    #[test]
    fn other_text_is_trimmed_only() {
        assert_eq!(normalize_cell(&Cell::text("  007 ")), Cell::text("007"));
        assert_eq!(normalize_cell(&Cell::text("NULL")), Cell::text("NULL"));
        assert_eq!(normalize_cell(&Cell::text("nan value")), Cell::text("nan value"));
    }
}
