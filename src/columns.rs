//! Column listing for a single input file.
//!
//! Shows each column's position and how many of its cells hold a value after
//! normalization, which helps pick the comparison columns.

use anyhow::Result;
use log::info;

use crate::{
    cli::ColumnsArgs,
    inputs::{self, Source},
    normalize::normalize,
    render,
    table::{Cell, Table},
};

pub fn execute(args: &ColumnsArgs) -> Result<()> {
    let table = inputs::load_side(
        "input",
        Source {
            path: &args.input,
            sheet: args.sheet.as_deref(),
            delimiter: args.delimiter,
            encoding: args.input_encoding.as_deref(),
        },
    )?;
    let table = normalize(&table);

    if table.width() == 0 {
        info!("{:?} does not define any columns", args.input);
        return Ok(());
    }

    render::print(&column_summary(&table), None);
    info!(
        "Listed {} column(s) from {:?}",
        table.width(),
        args.input
    );
    Ok(())
}

/// One row per column: position, name, filled cells, missing cells.
pub fn column_summary(table: &Table) -> Table {
    let headers = ["#", "name", "values", "missing"]
        .iter()
        .map(|h| h.to_string())
        .collect();
    let rows = table
        .headers()
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            let present = table.present_count(idx);
            vec![
                Cell::text((idx + 1).to_string()),
                Cell::text(name.as_str()),
                Cell::text(present.to_string()),
                Cell::text((table.len() - present).to_string()),
            ]
        })
        .collect();
    Table::new(headers, rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_counts_missing_cells() {
        let table = Table::new(
            vec!["id".into(), "name".into()],
            vec![
                vec![Cell::text("1"), Cell::Missing],
                vec![Cell::text("2"), Cell::text("Ann")],
            ],
        );
        let summary = column_summary(&table);
        assert_eq!(
            summary.rows()[1],
            vec![
                Cell::text("2"),
                Cell::text("name"),
                Cell::text("1"),
                Cell::text("1"),
            ]
        );
    }
}
