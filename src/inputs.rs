//! Loading and cleaning of the two files a comparison runs on.

use std::path::Path;

use anyhow::{Context, Result, anyhow};
use log::{error, info};

use crate::{
    cli::InputArgs,
    export::Side,
    io_utils,
    loader::{self, LoadOptions},
    normalize::normalize,
    table::Table,
};

/// Where one input file lives and how to read it.
#[derive(Debug, Clone, Copy)]
pub struct Source<'a> {
    pub path: &'a Path,
    pub sheet: Option<&'a str>,
    pub delimiter: Option<u8>,
    pub encoding: Option<&'a str>,
}

/// Loads and normalizes both inputs. Each file is attempted even when the
/// other one fails, so every load error is reported before bailing out.
pub fn load_pair(args: &InputArgs) -> Result<(Table, Table)> {
    let left = load_side(
        Side::P1.label(),
        Source {
            path: &args.left,
            sheet: args.left_sheet.as_deref(),
            delimiter: args.left_delimiter(),
            encoding: args.left_encoding.as_deref(),
        },
    );
    let right = load_side(
        Side::P2.label(),
        Source {
            path: &args.right,
            sheet: args.right_sheet.as_deref(),
            delimiter: args.right_delimiter(),
            encoding: args.right_encoding.as_deref(),
        },
    );
    match (left, right) {
        (Ok(left), Ok(right)) => Ok((normalize(&left), normalize(&right))),
        (left, right) => {
            let failures = [(Side::P1, left.err()), (Side::P2, right.err())]
                .into_iter()
                .filter_map(|(side, err)| err.map(|err| (side.label(), format!("{err:#}"))))
                .collect::<Vec<_>>();
            let labels = failures
                .iter()
                .map(|(label, _)| *label)
                .collect::<Vec<_>>()
                .join(", ");
            let details = failures
                .iter()
                .map(|(_, detail)| detail.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            Err(anyhow!("{details}").context(format!("Could not load input file(s): {labels}")))
        }
    }
}

/// Loads a single file and logs the outcome under `label`.
pub fn load_side(label: &str, source: Source<'_>) -> Result<Table> {
    let path = source.path;
    let result = io_utils::resolve_encoding(source.encoding)
        .and_then(|encoding| {
            let options = LoadOptions {
                delimiter: source.delimiter,
                encoding,
                sheet: source.sheet,
            };
            loader::load_table(path, &options)
        })
        .with_context(|| format!("Loading {label} {path:?}"));
    match &result {
        Ok(table) => info!(
            "{label}: loaded {} row(s) across {} column(s) from {path:?}",
            table.len(),
            table.width(),
        ),
        Err(err) => error!("{err:#}"),
    }
    result
}
