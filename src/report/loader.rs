//! Spreadsheet loading

use crate::error::{ReportError, ReportResult};
use crate::models::{CellValue, ReportFile, ReportTable};
use calamine::{Data, Reader, Xlsx};
use log::debug;
use std::io::Cursor;
use std::path::Path;

/// Load a discovered report.
pub fn load(file: &ReportFile, preferred_sheets: &[String]) -> ReportResult<ReportTable> {
    load_path(&file.path, preferred_sheets)
}

/// Load any xlsx file as a report table.
///
/// The file is read into memory in full and closed before parsing.
pub fn load_path(path: &Path, preferred_sheets: &[String]) -> ReportResult<ReportTable> {
    let parse_error = |message: String| ReportError::FileParseError {
        path: path.to_path_buf(),
        message,
    };

    let bytes = std::fs::read(path).map_err(|e| parse_error(e.to_string()))?;
    let table = parse_xlsx(bytes, preferred_sheets).map_err(parse_error)?;
    debug!(
        "Loaded {} row(s), {} column(s) from {}",
        table.len(),
        table.columns.len(),
        path.display()
    );
    Ok(table)
}

/// Parse xlsx bytes. The first row of the chosen sheet is the header.
pub fn parse_xlsx(bytes: Vec<u8>, preferred_sheets: &[String]) -> Result<ReportTable, String> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes)).map_err(|e| e.to_string())?;

    let names = workbook.sheet_names();
    let sheet = preferred_sheets
        .iter()
        .find(|p| names.contains(p))
        .or_else(|| names.first())
        .cloned()
        .ok_or_else(|| "workbook has no sheets".to_string())?;

    let range = workbook.worksheet_range(&sheet).map_err(|e| e.to_string())?;
    let mut rows = range.rows();

    let columns: Vec<String> = match rows.next() {
        Some(header) => header.iter().map(|c| cell_value(c).to_string()).collect(),
        None => return Ok(ReportTable::default()),
    };
    let raw_rows = rows.map(|row| row.iter().map(cell_value).collect()).collect();

    Ok(ReportTable::from_raw(columns, raw_rows))
}

fn cell_value(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Empty,
        Data::String(s) if s.is_empty() => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(CellValue::DateTime)
            .unwrap_or(CellValue::Number(dt.as_f64())),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(e) => CellValue::Text(e.to_string()),
    }
}
