//! Spreadsheet export of report tables

use crate::error::{ReportError, ReportResult};
use crate::models::{CellValue, ReportTable};
use rust_xlsxwriter::{Format, Workbook};
use std::path::Path;

/// MIME type offered with downloadable exports
pub const XLSX_MIME_TYPE: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

pub const EXPORT_SHEET_NAME: &str = "Delta Report";

fn row_index(idx: usize) -> ReportResult<u32> {
    u32::try_from(idx).map_err(|_| ReportError::Export(format!("row {} out of range", idx)))
}

fn column_index(idx: usize) -> ReportResult<u16> {
    u16::try_from(idx).map_err(|_| ReportError::Export(format!("column {} out of range", idx)))
}

/// Encode a table as xlsx: bold frozen header row, then every cell verbatim.
pub fn to_xlsx_bytes(table: &ReportTable) -> ReportResult<Vec<u8>> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();
    let datetime_format = Format::new().set_num_format("yyyy-mm-dd hh:mm:ss");

    let sheet = workbook.add_worksheet();
    sheet.set_name(EXPORT_SHEET_NAME)?;

    for (col, name) in table.columns.iter().enumerate() {
        sheet.write_string_with_format(0, column_index(col)?, name, &header_format)?;
    }

    for (idx, row) in table.rows.iter().enumerate() {
        let r = row_index(idx + 1)?;
        for (col, cell) in row.cells.iter().enumerate() {
            let c = column_index(col)?;
            match cell {
                CellValue::Empty => {}
                CellValue::Text(s) => {
                    sheet.write_string(r, c, s)?;
                }
                CellValue::Number(n) => {
                    sheet.write_number(r, c, *n)?;
                }
                CellValue::Bool(b) => {
                    sheet.write_boolean(r, c, *b)?;
                }
                CellValue::DateTime(dt) => {
                    sheet.write_datetime_with_format(r, c, dt, &datetime_format)?;
                }
            }
        }
    }

    let width = table
        .rows
        .iter()
        .map(|r| r.cells.len())
        .chain(std::iter::once(table.columns.len()))
        .max()
        .unwrap_or(0);
    if width > 0 {
        sheet.set_freeze_panes(1, 0)?;
        sheet.autofilter(0, 0, row_index(table.len())?, column_index(width - 1)?)?;
    }

    Ok(workbook.save_to_buffer()?)
}

/// Write the xlsx export of `table` to `path`
pub fn write_xlsx(table: &ReportTable, path: &Path) -> ReportResult<()> {
    let bytes = to_xlsx_bytes(table)?;
    std::fs::write(path, bytes)
        .map_err(|e| ReportError::Export(format!("failed to write {}: {}", path.display(), e)))
}
