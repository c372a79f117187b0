//! In-memory tabular data where every cell is text or explicitly missing.
//!
//! Cells never carry numeric or typed values: comparisons across files are
//! purely textual, so `"007"` and `"7"` stay distinct.

use serde::{Serialize, Serializer, ser::SerializeMap};

use crate::error::CompareError;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Cell {
    Text(String),
    Missing,
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Cell::Missing)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(value) => Some(value.as_str()),
            Cell::Missing => None,
        }
    }
}

impl Serialize for Cell {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Cell::Text(value) => serializer.serialize_str(value),
            Cell::Missing => serializer.serialize_none(),
        }
    }
}

/// Ordered, uniquely named columns with row-aligned cells.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    /// Builds a table, padding short rows with [`Cell::Missing`] and
    /// truncating rows wider than the header.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, Cell::Missing);
                row
            })
            .collect();
        Self { headers, rows }
    }

    pub fn empty(headers: Vec<String>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn width(&self) -> usize {
        self.headers.len()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == name)
    }

    pub fn require_column(&self, name: &str) -> Result<usize, CompareError> {
        self.column_index(name)
            .ok_or_else(|| CompareError::MissingColumn {
                column: name.to_string(),
                available: self.headers.join(", "),
            })
    }

    pub fn column_values(&self, index: usize) -> impl Iterator<Item = &Cell> {
        self.rows.iter().map(move |row| &row[index])
    }

    /// Returns a new table holding the rows accepted by `keep`, in order.
    pub fn filter_rows<F>(&self, mut keep: F) -> Table
    where
        F: FnMut(&[Cell]) -> bool,
    {
        Table {
            headers: self.headers.clone(),
            rows: self
                .rows
                .iter()
                .filter(|row| keep(row))
                .cloned()
                .collect(),
        }
    }

    pub fn map_cells<F>(&self, mut map: F) -> Table
    where
        F: FnMut(&Cell) -> Cell,
    {
        Table {
            headers: self.headers.clone(),
            rows: self
                .rows
                .iter()
                .map(|row| row.iter().map(&mut map).collect())
                .collect(),
        }
    }

    pub fn rename_column(&mut self, from: &str, to: &str) -> Result<(), CompareError> {
        let index = self.require_column(from)?;
        self.headers[index] = to.to_string();
        Ok(())
    }

    /// Number of non-missing cells in the given column.
    pub fn present_count(&self, index: usize) -> usize {
        self.column_values(index)
            .filter(|cell| !cell.is_missing())
            .count()
    }
}

/// Serializes as `{"columns": [...], "rows": [{column: value-or-null}, ...]}`.
impl Serialize for Table {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let records = self
            .rows
            .iter()
            .map(|row| Record {
                headers: &self.headers,
                cells: row,
            })
            .collect::<Vec<_>>();
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("columns", &self.headers)?;
        map.serialize_entry("rows", &records)?;
        map.end()
    }
}

struct Record<'a> {
    headers: &'a [String],
    cells: &'a [Cell],
}

impl Serialize for Record<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.headers.len()))?;
        for (header, cell) in self.headers.iter().zip(self.cells) {
            map.serialize_entry(header, cell)?;
        }
        map.end()
    }
}
