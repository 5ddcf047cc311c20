//! CSV export of table rows.

use serde_json::json;

use super::column::Column;
use super::row::{CellValue, TableRow};
use crate::error::AppError;

/// Writes `rows` as CSV with one column per entry of `columns`, headed by labels.
///
/// Text cells starting with `=`, `+`, `-` or `@` are prefixed with `'` so
/// spreadsheets do not evaluate them.
///
/// # Errors
///
/// Returns [`AppError::Internal`] if the CSV writer fails.
pub fn to_csv<R: TableRow>(columns: &[&Column], rows: &[&R]) -> Result<String, AppError> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer
        .write_record(columns.iter().map(|c| c.label))
        .map_err(csv_error)?;

    for row in rows {
        let record: Vec<String> = columns.iter().map(|c| export_cell(&row.cell(c.key))).collect();
        writer.write_record(&record).map_err(csv_error)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| AppError::internal("CSV export failed", json!({ "reason": e.to_string() })))?;

    String::from_utf8(bytes)
        .map_err(|e| AppError::internal("CSV export failed", json!({ "reason": e.to_string() })))
}

fn export_cell(value: &CellValue) -> String {
    match value {
        CellValue::Text(s) if s.starts_with(['=', '+', '-', '@']) => format!("'{}", s),
        other => other.to_string(),
    }
}

fn csv_error(e: csv::Error) -> AppError {
    AppError::internal("CSV export failed", json!({ "reason": e.to_string() }))
}
