//! Excel generation (shared library)
//!
//! Writes a `Sheet` as a single worksheet: bold header row, then one row per
//! record with each cell written at its native type.

use crate::types::{Cell, Sheet};
use rust_xlsxwriter::*;

/// Generate an xlsx workbook buffer holding `sheet`
///
/// # Arguments
/// * `sheet` - header row and data rows
/// * `sheet_name` - worksheet tab name
pub fn generate_sheet_buffer(sheet: &Sheet, sheet_name: &str) -> Result<Vec<u8>, String> {
    let mut workbook = Workbook::new();

    let header_format = Format::new()
        .set_bold()
        .set_background_color(Color::RGB(0xF5F5F5))
        .set_border(FormatBorder::Thin)
        .set_border_color(Color::RGB(0xAAAAAA));

    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name(sheet_name)
        .map_err(|e| format!("sheet name error: {}", e))?;

    for (col, header) in sheet.headers.iter().enumerate() {
        let col = column_number(col)?;
        worksheet
            .write_string_with_format(0, col, header, &header_format)
            .map_err(|e| format!("header write error: {}", e))?;
    }

    for (row_idx, row) in sheet.rows.iter().enumerate() {
        let row_num = u32::try_from(row_idx + 1).map_err(|_| "too many rows".to_string())?;
        for (col, cell) in row.iter().enumerate() {
            let col = column_number(col)?;
            let written = match cell {
                Cell::Empty => continue,
                Cell::Text(s) => worksheet.write_string(row_num, col, s),
                Cell::Number(n) => worksheet.write_number(row_num, col, *n),
                Cell::Bool(b) => worksheet.write_boolean(row_num, col, *b),
            };
            written.map_err(|e| format!("cell write error (row {}, col {}): {}", row_num, col, e))?;
        }
    }

    worksheet
        .set_freeze_panes(1, 0)
        .map_err(|e| format!("freeze panes error: {}", e))?;
    worksheet.autofit();

    workbook
        .save_to_buffer()
        .map_err(|e| format!("Excel save error: {}", e))
}

fn column_number(col: usize) -> Result<u16, String> {
    u16::try_from(col).map_err(|_| format!("too many columns: {}", col + 1))
}
