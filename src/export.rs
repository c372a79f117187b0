//! Single-sheet `.xlsx` encoding of result tables.

use rust_xlsxwriter::{ColNum, Format, RowNum, Workbook};

use crate::{
    error::ExportError,
    io_utils,
    table::{Cell, Table},
};

pub const IDENTICAL_ROWS_REPORT: &str = "identical_rows_report.xlsx";
pub const IDENTICAL_ROWS_SHEET: &str = "Identical_Rows";

/// Which input file a result belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    P1,
    P2,
}

impl Side {
    pub fn label(self) -> &'static str {
        match self {
            Side::P1 => "P1",
            Side::P2 => "P2",
        }
    }

    pub fn sheet_name(self) -> String {
        format!("Result_{}", self.label())
    }

    /// `result_<side>_<value>.xlsx`, with unsafe file-name characters replaced.
    pub fn search_report_name(self, value: &str) -> String {
        format!(
            "result_{}_{}.xlsx",
            self.label(),
            io_utils::sanitize_file_component(value)
        )
    }
}

/// Encodes `table` as a workbook holding one sheet named `sheet`, with a bold
/// header row followed by one row per record. Missing cells stay blank.
pub fn to_xlsx_bytes(table: &Table, sheet: &str) -> Result<Vec<u8>, ExportError> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet)?;

    for (col_idx, name) in table.headers().iter().enumerate() {
        worksheet.write_string_with_format(0, col_num(col_idx)?, name, &header_format)?;
    }
    for (row_idx, row) in table.rows().iter().enumerate() {
        let row_num = RowNum::try_from(row_idx + 1).map_err(|_| ExportError::TooLong(table.len()))?;
        for (col_idx, cell) in row.iter().enumerate() {
            if let Cell::Text(value) = cell {
                worksheet.write_string(row_num, col_num(col_idx)?, value)?;
            }
        }
    }
    Ok(workbook.save_to_buffer()?)
}

fn col_num(index: usize) -> Result<ColNum, ExportError> {
    ColNum::try_from(index).map_err(|_| ExportError::TooWide(index + 1))
}
