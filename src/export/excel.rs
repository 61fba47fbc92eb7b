//! Excel output (CLI)
//!
//! Workbook layout lives in `purgo_common::export::excel_core`; this writes
//! the buffer to disk.

use crate::error::{PurgoError, Result};
use purgo_common::export::excel_core::generate_sheet_buffer;
use purgo_common::Sheet;
use std::path::Path;

pub fn write_workbook(sheet: &Sheet, sheet_name: &str, output_path: &Path) -> Result<()> {
    let buffer = generate_sheet_buffer(sheet, sheet_name).map_err(PurgoError::ExcelGeneration)?;

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(output_path, buffer)?;
    Ok(())
}
