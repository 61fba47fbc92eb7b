//! Workbook loading
//!
//! Reads the first sheet of any workbook calamine understands. Row 1 is the
//! header row; blank header cells get pandas-style `Unnamed: N` names and
//! rows with no values at all are dropped.

use crate::error::{PurgoError, Result};
use calamine::{open_workbook_auto, Data, Reader};
use purgo_common::{Cell, Dataset, Sheet};
use std::path::Path;
use tracing::debug;

pub fn read_first_sheet(path: &Path) -> Result<Dataset> {
    if !path.exists() {
        return Err(PurgoError::FileNotFound(path.display().to_string()));
    }

    let read_error = |message: String| PurgoError::WorkbookRead {
        path: path.display().to_string(),
        message,
    };

    let mut workbook = open_workbook_auto(path).map_err(|e| read_error(e.to_string()))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| read_error("workbook has no sheets".to_string()))?
        .map_err(|e| read_error(e.to_string()))?;

    let mut rows = range.rows();
    let headers: Vec<String> = match rows.next() {
        Some(header_row) => header_row
            .iter()
            .enumerate()
            .map(|(idx, data)| match to_cell(data).to_key() {
                name if name.trim().is_empty() => format!("Unnamed: {}", idx),
                name => name,
            })
            .collect(),
        None => Vec::new(),
    };

    let body: Vec<Vec<Cell>> = rows
        .map(|row| row.iter().map(to_cell).collect::<Vec<_>>())
        .filter(|row| row.iter().any(|cell| !cell.is_blank()))
        .collect();

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());

    debug!(file = %file_name, columns = headers.len(), rows = body.len(), "workbook loaded");

    Ok(Dataset::new(file_name, Sheet::new(headers, body)))
}

fn to_cell(data: &Data) -> Cell {
    match data {
        Data::Empty | Data::Error(_) => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Float(f) => Cell::Number(*f),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Bool(b) => Cell::Bool(*b),
        Data::DateTime(dt) => Cell::Number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
    }
}
