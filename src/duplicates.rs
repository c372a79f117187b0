//! `duplicates`: shared values between two columns and fully identical rows.

use std::path::Path;

use anyhow::{Context, Result};
use itertools::Itertools;
use log::info;
use serde::Serialize;

use crate::{
    cli::{DuplicatesArgs, InputArgs, OutputArgs, OutputFormat},
    compare::{self, DuplicateReport, MatchSummary},
    export::{self, IDENTICAL_ROWS_REPORT, IDENTICAL_ROWS_SHEET},
    inputs, io_utils, render,
};

pub fn execute(args: &DuplicatesArgs) -> Result<()> {
    run(&args.inputs, &args.output)
}

pub fn run(inputs: &InputArgs, output: &OutputArgs) -> Result<()> {
    info!(
        "Comparing P1 column '{}' with P2 column '{}'",
        inputs.left_column, inputs.right_column
    );
    let (left, right) = inputs::load_pair(inputs)?;
    let report = compare::find_duplicates(
        &left,
        &inputs.left_column,
        &right,
        &inputs.right_column,
    )
    .context("Comparing selected columns")?;

    let exported = match &report {
        DuplicateReport::IdenticalRows { rows, .. } if !output.no_export => {
            let bytes = export::to_xlsx_bytes(rows, IDENTICAL_ROWS_SHEET)
                .context("Encoding identical rows report")?;
            let path = io_utils::write_report(&output.output_dir, IDENTICAL_ROWS_REPORT, &bytes)?;
            info!("Identical rows report written to {:?}", path);
            Some(path)
        }
        _ => None,
    };

    match output.format {
        OutputFormat::Text => print_text(&report, exported.as_deref(), output),
        OutputFormat::Json => {
            let summary = DuplicatesSummary {
                mode: "duplicates",
                left_column: &inputs.left_column,
                right_column: &inputs.right_column,
                report: &report,
                export: exported.as_deref(),
            };
            let rendered = serde_json::to_string_pretty(&summary)
                .context("Serializing duplicate summary")?;
            println!("{rendered}");
        }
    }
    Ok(())
}

fn print_text(report: &DuplicateReport, exported: Option<&Path>, output: &OutputArgs) {
    let summary = match report {
        DuplicateReport::NoDuplicates => {
            println!("No duplicates found between the selected columns.");
            return;
        }
        DuplicateReport::RowsDiverge { summary } | DuplicateReport::IdenticalRows { summary, .. } => {
            summary
        }
    };
    print_summary(summary, output.table_limit());

    match report {
        DuplicateReport::RowsDiverge { .. } => {
            println!(
                "Values exist in both files, but the remaining columns of those rows differ."
            );
        }
        DuplicateReport::IdenticalRows { rows, .. } => {
            println!("Identical rows: {}", rows.len());
            if output.table {
                println!();
                render::print(rows, output.table_limit());
            }
            if let Some(path) = exported {
                println!("Report: {}", path.display());
            }
        }
        DuplicateReport::NoDuplicates => {}
    }
}

fn print_summary(summary: &MatchSummary, limit: Option<usize>) {
    let total = summary.matches.len();
    println!("Found {total} duplicate value(s) between the files.");
    println!("Total duplicates: {total}");
    println!("Total rows P1: {}", summary.left_rows);
    println!("Total rows P2: {}", summary.right_rows);
    let shown = limit.unwrap_or(total).min(total);
    let listed = summary.matches.iter().take(shown).join(", ");
    if shown < total {
        println!("Shared values: {listed}, ... ({} more)", total - shown);
    } else {
        println!("Shared values: {listed}");
    }
}

#[derive(Serialize)]
struct DuplicatesSummary<'a> {
    mode: &'static str,
    left_column: &'a str,
    right_column: &'a str,
    #[serde(flatten)]
    report: &'a DuplicateReport,
    export: Option<&'a Path>,
}
