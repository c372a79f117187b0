//! `search`: exact-value occurrence counts in both files.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use log::info;
use serde::Serialize;

use crate::{
    cli::{InputArgs, OutputArgs, OutputFormat, SearchArgs},
    compare::{self, Occurrences, SearchOutcome},
    export::{self, Side},
    inputs, io_utils, render,
    table::Table,
};

pub fn execute(args: &SearchArgs) -> Result<()> {
    run(&args.inputs, &args.value, &args.output)
}

pub fn run(inputs: &InputArgs, value: &str, output: &OutputArgs) -> Result<()> {
    if value.trim().is_empty() {
        bail!("Search value cannot be blank; use `duplicates` to compare whole columns");
    }
    info!(
        "Searching for '{}' in P1 column '{}' and P2 column '{}'",
        value, inputs.left_column, inputs.right_column
    );
    let (left, right) = inputs::load_pair(inputs)?;
    let outcome = compare::search(
        &left,
        &inputs.left_column,
        &right,
        &inputs.right_column,
        value,
    )
    .context("Searching selected columns")?;

    let left_report = export_side(Side::P1, &outcome.left, value, output)?;
    let right_report = export_side(Side::P2, &outcome.right, value, output)?;

    match output.format {
        OutputFormat::Text => {
            print_text(value, &outcome, [&left_report, &right_report], output);
        }
        OutputFormat::Json => {
            let summary = SearchSummary {
                mode: "search",
                value,
                p1: SideSummary::new(&inputs.left_column, &outcome.left, &left_report),
                p2: SideSummary::new(&inputs.right_column, &outcome.right, &right_report),
            };
            let rendered =
                serde_json::to_string_pretty(&summary).context("Serializing search summary")?;
            println!("{rendered}");
        }
    }
    Ok(())
}

/// Writes the matching rows of one side unless exports are disabled or
/// nothing matched.
fn export_side(
    side: Side,
    occurrences: &Occurrences,
    value: &str,
    output: &OutputArgs,
) -> Result<Option<PathBuf>> {
    if output.no_export || occurrences.count == 0 {
        return Ok(None);
    }
    let bytes = export::to_xlsx_bytes(&occurrences.rows, &side.sheet_name())
        .with_context(|| format!("Encoding {} results", side.label()))?;
    let path = io_utils::write_report(&output.output_dir, &side.search_report_name(value), &bytes)?;
    info!("{} results written to {:?}", side.label(), path);
    Ok(Some(path))
}

fn print_text(
    value: &str,
    outcome: &SearchOutcome,
    reports: [&Option<PathBuf>; 2],
    output: &OutputArgs,
) {
    println!("Result for value: {value}");
    println!("Occurrences in P1: {}", outcome.left.count);
    println!("Occurrences in P2: {}", outcome.right.count);
    if !outcome.found_anywhere() {
        println!("Value not found in either file.");
        return;
    }
    let sides = [(Side::P1, &outcome.left), (Side::P2, &outcome.right)];
    for ((side, occurrences), report) in sides.into_iter().zip(reports) {
        if occurrences.count == 0 {
            println!("Not found in {}", side.label());
            continue;
        }
        if output.table {
            println!();
            println!("{} matches:", side.label());
            render::print(&occurrences.rows, output.table_limit());
        }
        if let Some(path) = report {
            println!("{} report: {}", side.label(), path.display());
        }
    }
}

#[derive(Serialize)]
struct SearchSummary<'a> {
    mode: &'static str,
    value: &'a str,
    p1: SideSummary<'a>,
    p2: SideSummary<'a>,
}

#[derive(Serialize)]
struct SideSummary<'a> {
    column: &'a str,
    occurrences: usize,
    rows: &'a Table,
    report: Option<&'a Path>,
}

impl<'a> SideSummary<'a> {
    fn new(column: &'a str, occurrences: &'a Occurrences, report: &'a Option<PathBuf>) -> Self {
        Self {
            column,
            occurrences: occurrences.count,
            rows: &occurrences.rows,
            report: report.as_deref(),
        }
    }
}
