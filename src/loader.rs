//! Reads delimited text or spreadsheet files into a [`Table`] of text cells.
//!
//! No type inference happens here: numeric-looking values keep their exact
//! textual form (leading zeros included). Cleaning is left to
//! [`crate::normalize`].

use std::{
    collections::HashSet,
    fs::File,
    io::BufReader,
    path::Path,
};

use calamine::{Data, DataType, Range, Reader, Sheets, open_workbook_auto};
use chrono::NaiveDateTime;
use encoding_rs::{Encoding, UTF_8};
use log::debug;

use crate::{
    error::LoadError,
    io_utils::{self, SourceFormat},
    table::{Cell, Table},
};

#[derive(Debug, Clone, Copy)]
pub struct LoadOptions<'a> {
    /// Overrides the extension-based delimiter for delimited text.
    pub delimiter: Option<u8>,
    /// Encoding of delimited text input.
    pub encoding: &'static Encoding,
    /// Sheet name or 0-based index for spreadsheet input.
    pub sheet: Option<&'a str>,
}

impl Default for LoadOptions<'_> {
    fn default() -> Self {
        Self {
            delimiter: None,
            encoding: UTF_8,
            sheet: None,
        }
    }
}

pub fn load_table(path: &Path, options: &LoadOptions<'_>) -> Result<Table, LoadError> {
    let format = SourceFormat::from_path(path);
    debug!("Loading {path:?} as {format:?}");
    match format {
        SourceFormat::Delimited => load_delimited(path, options),
        SourceFormat::Spreadsheet => load_spreadsheet(path, options.sheet),
    }
}

fn load_delimited(path: &Path, options: &LoadOptions<'_>) -> Result<Table, LoadError> {
    let delimiter = io_utils::resolve_input_delimiter(path, options.delimiter);
    let encoding = options.encoding;
    debug!(
        "Reading {path:?} with delimiter '{}' and encoding {}",
        crate::printable_delimiter(delimiter),
        encoding.name()
    );
    let mut reader = io_utils::open_csv_reader_from_path(path, delimiter)?;
    let header_record = reader
        .byte_headers()
        .map_err(|source| csv_error(path, source))?
        .clone();
    if header_record.is_empty() {
        return Err(LoadError::Empty {
            path: path.to_path_buf(),
        });
    }
    let raw_headers =
        io_utils::decode_record(&header_record, encoding).ok_or_else(|| LoadError::Decode {
            path: path.to_path_buf(),
            line: 1,
            encoding: encoding.name(),
        })?;
    let headers = unique_headers(raw_headers);
    let width = headers.len();

    let mut rows = Vec::new();
    for (row_idx, record) in reader.byte_records().enumerate() {
        let record = record.map_err(|source| csv_error(path, source))?;
        let line = record
            .position()
            .map(|pos| pos.line())
            .unwrap_or(row_idx as u64 + 2);
        if record.len() > width {
            return Err(LoadError::RaggedRow {
                path: path.to_path_buf(),
                line,
                expected: width,
                found: record.len(),
            });
        }
        let decoded =
            io_utils::decode_record(&record, encoding).ok_or_else(|| LoadError::Decode {
                path: path.to_path_buf(),
                line,
                encoding: encoding.name(),
            })?;
        rows.push(decoded.into_iter().map(Cell::Text).collect());
    }
    Ok(Table::new(headers, rows))
}

fn csv_error(path: &Path, source: csv::Error) -> LoadError {
    LoadError::Csv {
        path: path.to_path_buf(),
        source,
    }
}

fn load_spreadsheet(path: &Path, sheet: Option<&str>) -> Result<Table, LoadError> {
    let mut workbook = open_workbook_auto(path).map_err(|source| LoadError::Spreadsheet {
        path: path.to_path_buf(),
        source,
    })?;
    let range = select_sheet(&mut workbook, path, sheet)?;
    let mut rows = range.rows();
    let Some(header_row) = rows.next() else {
        return Err(LoadError::Empty {
            path: path.to_path_buf(),
        });
    };
    let headers = unique_headers(
        header_row
            .iter()
            .map(|cell| cell_text(cell).unwrap_or_default())
            .collect(),
    );
    let body = rows
        .map(|row| {
            row.iter()
                .map(|cell| cell_text(cell).map_or(Cell::Missing, Cell::Text))
                .collect()
        })
        .collect();
    Ok(Table::new(headers, body))
}

fn select_sheet(
    workbook: &mut Sheets<BufReader<File>>,
    path: &Path,
    selector: Option<&str>,
) -> Result<Range<Data>, LoadError> {
    let names = workbook.sheet_names();
    let chosen = match selector {
        None => names.first().cloned(),
        Some(wanted) if names.iter().any(|name| name == wanted) => Some(wanted.to_string()),
        Some(wanted) => wanted
            .parse::<usize>()
            .ok()
            .and_then(|idx| names.get(idx).cloned()),
    };
    let name = chosen.ok_or_else(|| LoadError::Sheet {
        path: path.to_path_buf(),
        sheet: selector.unwrap_or("0").to_string(),
    })?;
    debug!("Reading sheet '{name}' from {path:?}");
    workbook
        .worksheet_range(&name)
        .map_err(|source| LoadError::Spreadsheet {
            path: path.to_path_buf(),
            source,
        })
}

/// Text form of a spreadsheet cell; `None` for empty and error cells.
fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(value) => Some(value.clone()),
        Data::Int(value) => Some(value.to_string()),
        Data::Float(value) => Some(format_float(*value)),
        Data::Bool(value) => Some(if *value { "True" } else { "False" }.to_string()),
        Data::DateTime(_) => Some(
            cell.as_datetime()
                .map(format_datetime)
                .unwrap_or_else(|| cell.to_string()),
        ),
        Data::DateTimeIso(value) | Data::DurationIso(value) => Some(value.clone()),
    }
}

fn format_float(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}

fn format_datetime(value: NaiveDateTime) -> String {
    value.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Blank names become `Unnamed: <idx>`; repeats get `.1`, `.2`, ... suffixes.
fn unique_headers(raw: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::with_capacity(raw.len());
    raw.into_iter()
        .enumerate()
        .map(|(idx, name)| {
            let base = if name.trim().is_empty() {
                format!("Unnamed: {idx}")
            } else {
                name
            };
            let mut candidate = base.clone();
            let mut counter = 1usize;
            while seen.contains(&candidate) {
                candidate = format!("{base}.{counter}");
                counter += 1;
            }
            seen.insert(candidate.clone());
            candidate
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn unique_headers_names_blanks_and_repeats() {
        let headers = unique_headers(strings(&["id", "", "id", "id", " "]));
        assert_eq!(
            headers,
            strings(&["id", "Unnamed: 1", "id.1", "id.2", "Unnamed: 4"])
        );
    }

    #[test]
    fn whole_floats_drop_their_fraction() {
        assert_eq!(cell_text(&Data::Float(9202793806.0)).as_deref(), Some("9202793806"));
        assert_eq!(cell_text(&Data::Float(2.5)).as_deref(), Some("2.5"));
        assert_eq!(cell_text(&Data::Int(-4)).as_deref(), Some("-4"));
        assert_eq!(
            cell_text(&Data::Float(1e20)).as_deref(),
            Some("100000000000000000000")
        );
    }

    #[test]
    fn booleans_and_blanks() {
        assert_eq!(cell_text(&Data::Bool(true)).as_deref(), Some("True"));
        assert_eq!(cell_text(&Data::Empty), None);
        assert_eq!(
            cell_text(&Data::String("  007 ".into())).as_deref(),
            Some("  007 ")
        );
    }
}
