//! Value search and duplicate analysis across two normalized tables.
//!
//! Both operations expect tables that already went through
//! [`crate::normalize::normalize`]; rows whose comparison column is missing
//! never take part in a match.

use std::collections::{BTreeSet, HashMap, HashSet};

use log::debug;
use serde::Serialize;

use crate::{
    error::CompareError,
    table::{Cell, Table},
};

const RENAMED_SUFFIX: &str = ".right";

/// Rows of one table whose comparison column equals the search value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Occurrences {
    pub count: usize,
    pub rows: Table,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchOutcome {
    pub left: Occurrences,
    pub right: Occurrences,
}

impl SearchOutcome {
    pub fn found_anywhere(&self) -> bool {
        self.left.count > 0 || self.right.count > 0
    }
}

/// Values shared by both comparison columns and how many rows carry them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchSummary {
    pub matches: BTreeSet<String>,
    pub left_rows: usize,
    pub right_rows: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DuplicateReport {
    /// The comparison columns share no value.
    NoDuplicates,
    /// Some values are shared, but no row is identical on every shared column.
    RowsDiverge { summary: MatchSummary },
    IdenticalRows { summary: MatchSummary, rows: Table },
}

impl DuplicateReport {
    pub fn summary(&self) -> Option<&MatchSummary> {
        match self {
            DuplicateReport::NoDuplicates => None,
            DuplicateReport::RowsDiverge { summary }
            | DuplicateReport::IdenticalRows { summary, .. } => Some(summary),
        }
    }
}

pub fn drop_missing(table: &Table, column: &str) -> Result<Table, CompareError> {
    let index = table.require_column(column)?;
    Ok(table.filter_rows(|row| !row[index].is_missing()))
}

/// Counts rows whose `column` equals `value` exactly (case-sensitive).
pub fn count_occurrences(
    table: &Table,
    column: &str,
    value: &str,
) -> Result<Occurrences, CompareError> {
    let index = table.require_column(column)?;
    // Missing cells never compare equal to text, so they drop out here.
    let rows = table.filter_rows(|row| row[index].as_text() == Some(value));
    Ok(Occurrences {
        count: rows.len(),
        rows,
    })
}

pub fn search(
    left: &Table,
    left_column: &str,
    right: &Table,
    right_column: &str,
    value: &str,
) -> Result<SearchOutcome, CompareError> {
    let left = count_occurrences(left, left_column, value)?;
    let right = count_occurrences(right, right_column, value)?;
    debug!(
        "Search for '{value}': {} row(s) in P1, {} row(s) in P2",
        left.count, right.count
    );
    Ok(SearchOutcome { left, right })
}

/// Intersects the distinct values of the two comparison columns and reports
/// rows that are identical across every column the two tables share once the
/// right comparison column is renamed after the left one.
pub fn find_duplicates(
    left: &Table,
    left_column: &str,
    right: &Table,
    right_column: &str,
) -> Result<DuplicateReport, CompareError> {
    let left = drop_missing(left, left_column)?;
    let right = drop_missing(right, right_column)?;
    let left_index = left.require_column(left_column)?;
    let right_index = right.require_column(right_column)?;

    let left_values = distinct_values(&left, left_index);
    let right_values = distinct_values(&right, right_index);
    let matches = left_values
        .intersection(&right_values)
        .map(|value| value.to_string())
        .collect::<BTreeSet<_>>();
    debug!(
        "{} distinct value(s) in P1, {} in P2, {} shared",
        left_values.len(),
        right_values.len(),
        matches.len()
    );
    if matches.is_empty() {
        return Ok(DuplicateReport::NoDuplicates);
    }

    let summary = MatchSummary {
        left_rows: count_members(&left, left_index, &matches),
        right_rows: count_members(&right, right_index, &matches),
        matches,
    };

    let right = align_comparison_column(right, right_column, left_column)?;
    let shared = shared_columns(&left, &right);
    debug!("Joining on shared column(s): {}", shared.join(", "));
    let rows = inner_join(&left, &right, &shared)?;
    if rows.is_empty() {
        Ok(DuplicateReport::RowsDiverge { summary })
    } else {
        Ok(DuplicateReport::IdenticalRows { summary, rows })
    }
}

fn distinct_values(table: &Table, index: usize) -> BTreeSet<&str> {
    table.column_values(index).filter_map(Cell::as_text).collect()
}

fn count_members(table: &Table, index: usize, members: &BTreeSet<String>) -> usize {
    table
        .column_values(index)
        .filter_map(Cell::as_text)
        .filter(|value| members.contains(*value))
        .count()
}

/// Renames `from` to `to` in `table`. A different column already called `to`
/// is moved aside to `<to>.right` first so column names stay unique.
fn align_comparison_column(mut table: Table, from: &str, to: &str) -> Result<Table, CompareError> {
    if from == to {
        return Ok(table);
    }
    if table.column_index(to).is_some() {
        let mut aside = format!("{to}{RENAMED_SUFFIX}");
        while table.column_index(&aside).is_some() {
            aside.push_str(RENAMED_SUFFIX);
        }
        table.rename_column(to, &aside)?;
    }
    table.rename_column(from, to)?;
    Ok(table)
}

/// Column names present in both tables, in the left table's order.
pub fn shared_columns(left: &Table, right: &Table) -> Vec<String> {
    let right_names = right.headers().iter().collect::<HashSet<_>>();
    left.headers()
        .iter()
        .filter(|name| right_names.contains(name))
        .cloned()
        .collect()
}

/// Inner equi-join on the `on` columns, which must exist in both tables.
///
/// Output holds every left column followed by the right columns not in `on`;
/// a right column whose name clashes with a left one is emitted as
/// `right_<name>`. Rows follow left order, then right order within a key.
/// [`Cell::Missing`] is equal to itself for key purposes.
pub fn inner_join(left: &Table, right: &Table, on: &[String]) -> Result<Table, CompareError> {
    let left_keys = on
        .iter()
        .map(|name| left.require_column(name))
        .collect::<Result<Vec<_>, _>>()?;
    let right_keys = on
        .iter()
        .map(|name| right.require_column(name))
        .collect::<Result<Vec<_>, _>>()?;

    let mut lookup: HashMap<Vec<&Cell>, Vec<usize>> = HashMap::new();
    for (row_idx, row) in right.rows().iter().enumerate() {
        let key = right_keys.iter().map(|idx| &row[*idx]).collect::<Vec<_>>();
        lookup.entry(key).or_default().push(row_idx);
    }

    let (headers, right_columns) = build_output_headers(left.headers(), right.headers(), &right_keys);
    let mut rows = Vec::new();
    for left_row in left.rows() {
        let key = left_keys.iter().map(|idx| &left_row[*idx]).collect::<Vec<_>>();
        let Some(bucket) = lookup.get(&key) else {
            continue;
        };
        for right_idx in bucket {
            let right_row = &right.rows()[*right_idx];
            let mut combined = left_row.clone();
            combined.extend(right_columns.iter().map(|idx| right_row[*idx].clone()));
            rows.push(combined);
        }
    }
    Ok(Table::new(headers, rows))
}

fn build_output_headers(
    left_headers: &[String],
    right_headers: &[String],
    right_key_indices: &[usize],
) -> (Vec<String>, Vec<usize>) {
    let mut headers = left_headers.to_vec();
    let mut seen: HashSet<String> = headers.iter().cloned().collect();
    let mut right_columns = Vec::new();

    for (idx, name) in right_headers.iter().enumerate() {
        if right_key_indices.contains(&idx) {
            continue;
        }
        let mut candidate = name.clone();
        if seen.contains(&candidate) {
            let mut counter = 1usize;
            candidate = format!("right_{name}");
            while seen.contains(&candidate) {
                candidate = format!("right_{name}_{counter}");
                counter += 1;
            }
        }
        seen.insert(candidate.clone());
        headers.push(candidate);
        right_columns.push(idx);
    }

    (headers, right_columns)
}
