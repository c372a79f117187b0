//! Typed failures raised by the loading, comparison, and export layers.
//!
//! Command handlers wrap these in `anyhow` with context; library callers can
//! match on the variants directly.

use std::{io, path::PathBuf};

use thiserror::Error;

/// A file could not be read into a [`crate::table::Table`].
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Opening input file {path:?}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Reading delimited text from {path:?}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("Failed to decode line {line} of {path:?} with encoding {encoding}")]
    Decode {
        path: PathBuf,
        line: u64,
        encoding: &'static str,
    },
    #[error("Line {line} of {path:?} has {found} field(s) but the header declares {expected}")]
    RaggedRow {
        path: PathBuf,
        line: u64,
        expected: usize,
        found: usize,
    },
    #[error("{path:?} does not contain a header row")]
    Empty { path: PathBuf },
    #[error("Reading spreadsheet {path:?}")]
    Spreadsheet {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },
    #[error("Sheet '{sheet}' not found in {path:?}")]
    Sheet { path: PathBuf, sheet: String },
    #[error("Unknown encoding '{0}'")]
    UnknownEncoding(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CompareError {
    #[error("Column '{column}' not found (available: {available})")]
    MissingColumn { column: String, available: String },
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Writing spreadsheet")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
    #[error("Table has {0} column(s), more than a worksheet can hold")]
    TooWide(usize),
    #[error("Table has {0} row(s), more than a worksheet can hold")]
    TooLong(usize),
}
