pub mod excel;

use std::path::{Path, PathBuf};

/// Output workbook names used when `--output` is omitted or is a directory
pub const CHECK_OUTPUT_NAME: &str = "Updated_Check_File.xlsx";
pub const CHECK_SHEET_NAME: &str = "Updated Check";
pub const MASTER_SHEET_NAME: &str = "Master Results";
pub const STATUS_SHEET_NAME: &str = "Status";

/// Resolves where to write: an explicit file, a file inside an explicit
/// directory, or `default_name` next to `input`.
pub fn output_path(output: Option<&Path>, input: &Path, default_name: &str) -> PathBuf {
    match output {
        Some(out) if out.is_dir() || out.extension().is_none() => out.join(default_name),
        Some(out) => out.to_path_buf(),
        None => input
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join(default_name),
    }
}

/// `Updated_<master file name>`, so the original master is never overwritten.
pub fn updated_master_name(master: &Path) -> String {
    let name = master
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "master.xlsx".to_string());
    let stem = Path::new(&name)
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or(name);
    format!("Updated_{}.xlsx", stem)
}

/// `<input stem>_status.xlsx`
pub fn status_output_name(input: &Path) -> String {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "companies".to_string());
    format!("{}_status.xlsx", stem)
}
