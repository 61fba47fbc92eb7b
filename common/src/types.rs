//! Tabular data model
//!
//! - `Cell` / `Sheet`: raw first-sheet contents. The sheet is kept as-is so the
//!   output workbook carries every original column.
//! - `CompanyRecord`: typed projection of one row, identified by its position.
//! - `Verdict`: outcome of one join against the master set.

use crate::error::{Error, Result};
use std::fmt;

/// Column names shared by the input and output workbooks.
pub mod columns {
    pub const NAME: &str = "Name";
    pub const REGISTRATION_NUMBER: &str = "Company Registration Number";
    pub const ACCOUNT_PARTNER: &str = "Account Partner";

    pub const CLEANED_NAME: &str = "Cleaned Name";
    pub const NAME_VERDICT: &str = "Updated Column B";
    pub const REGISTRATION_VERDICT: &str = "Reg Compare";
    pub const COMBINED_STATUS: &str = "Combined Status";
    pub const COMPANY_STATUS: &str = "Company Status";
}

/// Sentinel verdict meaning "no match in the master set".
pub const SAFE: &str = "Safe";

/// A single spreadsheet value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
}

static EMPTY_CELL: Cell = Cell::Empty;

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    /// Text content, `None` for numbers, booleans and blanks.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            _ => None,
        }
    }

    /// True for a blank cell or an empty string.
    pub fn is_blank(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    /// String form used as a join key.
    ///
    /// Integral numbers drop the fractional part (`1234567.0` -> `"1234567"`),
    /// so a registration number typed as a number still matches its text form.
    pub fn to_key(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text(s) => s.clone(),
            Cell::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{}", *n as i64)
                } else {
                    n.to_string()
                }
            }
            Cell::Bool(true) => "True".to_string(),
            Cell::Bool(false) => "False".to_string(),
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Number(value)
    }
}

/// First sheet of a workbook: header row plus data rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sheet {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl Sheet {
    /// Headers are trimmed and every row is padded to the header width.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        let headers: Vec<String> = headers.into_iter().map(|h| h.trim().to_string()).collect();
        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                if row.len() < width {
                    row.resize(width, Cell::Empty);
                }
                row
            })
            .collect();
        Self { headers, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn cell(&self, row: usize, col: usize) -> &Cell {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&EMPTY_CELL)
    }

    /// Columns from `required` that this sheet lacks, in the order given.
    pub fn missing_columns(&self, required: &[&str]) -> Vec<String> {
        required
            .iter()
            .filter(|col| self.column_index(col).is_none())
            .map(|col| col.to_string())
            .collect()
    }

    /// Replaces the named column, or appends it when absent.
    ///
    /// `values` shorter than the sheet leave the remaining rows blank.
    pub fn set_column(&mut self, name: &str, values: Vec<Cell>) {
        let col = match self.column_index(name) {
            Some(col) => col,
            None => {
                self.headers.push(name.to_string());
                for row in &mut self.rows {
                    row.resize(self.headers.len(), Cell::Empty);
                }
                self.headers.len() - 1
            }
        };

        let mut values = values.into_iter();
        for row in &mut self.rows {
            if row.len() <= col {
                row.resize(col + 1, Cell::Empty);
            }
            row[col] = values.next().unwrap_or_default();
        }
    }

    /// Appends the rows of `other` below this sheet.
    ///
    /// Columns are the union of both header rows: this sheet's first, then any
    /// column only `other` has. Cells a row has no column for stay blank.
    pub fn append(&mut self, other: &Sheet) {
        for header in &other.headers {
            if self.column_index(header).is_none() {
                self.headers.push(header.clone());
            }
        }
        let width = self.headers.len();
        for row in &mut self.rows {
            row.resize(width, Cell::Empty);
        }

        let mapping: Vec<Option<usize>> = self
            .headers
            .iter()
            .map(|h| other.column_index(h))
            .collect();

        for row_idx in 0..other.rows.len() {
            let row = mapping
                .iter()
                .map(|src| match src {
                    Some(col) => other.cell(row_idx, *col).clone(),
                    None => Cell::Empty,
                })
                .collect();
            self.rows.push(row);
        }
    }

    /// Typed view of every row, `None` without a `Name` column.
    ///
    /// The name cell is kept twice: as text only for the name join, and
    /// stringified for registry searches. The registration number is
    /// stringified and is empty when the column is absent; the account partner is only read when the sheet has that column.
    pub fn company_records(&self) -> Option<Vec<CompanyRecord>> {
        let name_col = self.column_index(columns::NAME)?;
        let reg_col = self.column_index(columns::REGISTRATION_NUMBER);
        let partner_col = self.column_index(columns::ACCOUNT_PARTNER);

        let records = (0..self.rows.len())
            .map(|row| CompanyRecord {
                row,
                name: self.cell(row, name_col).as_text().map(str::to_string),
                search_name: self.cell(row, name_col).to_key(),
                registration_number: reg_col
                    .map(|col| self.cell(row, col).to_key())
                    .unwrap_or_default(),
                account_partner: partner_col.map(|col| self.cell(row, col).to_key()),
            })
            .collect();

        Some(records)
    }
}

/// A sheet together with the file it came from, for error messages.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub file_name: String,
    pub sheet: Sheet,
}

impl Dataset {
    pub fn new(file_name: impl Into<String>, sheet: Sheet) -> Self {
        Self {
            file_name: file_name.into(),
            sheet,
        }
    }

    pub fn require_columns(&self, required: &[&str]) -> Result<()> {
        match self.missing_columns_error(required) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn missing_columns_error(&self, required: &[&str]) -> Option<Error> {
        let missing = self.sheet.missing_columns(required);
        if missing.is_empty() {
            None
        } else {
            Some(Error::MissingColumns {
                file: self.file_name.clone(),
                columns: missing,
            })
        }
    }

    pub fn company_records(&self) -> Result<Vec<CompanyRecord>> {
        self.require_columns(&[columns::NAME])?;
        Ok(self.sheet.company_records().unwrap_or_default())
    }
}

/// Validates every `(dataset, required columns)` pair before failing.
///
/// A single bad file gives its own `MissingColumns`; more than one gives
/// `Error::Invalid` listing each in input order.
pub fn require_all(checks: &[(&Dataset, &[&str])]) -> Result<()> {
    let mut errors: Vec<Error> = checks
        .iter()
        .filter_map(|(dataset, required)| dataset.missing_columns_error(required))
        .collect();

    match errors.len() {
        0 => Ok(()),
        1 => Err(errors.remove(0)),
        _ => Err(Error::Invalid(errors)),
    }
}

/// One company row. `row` is the position in its source sheet.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompanyRecord {
    pub row: usize,
    /// `None` when the cell is blank or not text.
    pub name: Option<String>,
    /// Name cell as a string whatever its type (`1966.0` -> `"1966"`).
    pub search_name: String,
    pub registration_number: String,
    /// Restriction tag, master side only.
    pub account_partner: Option<String>,
}

impl CompanyRecord {
    pub fn new(row: usize, name: &str, registration_number: &str) -> Self {
        Self {
            row,
            name: Some(name.to_string()),
            search_name: name.to_string(),
            registration_number: registration_number.to_string(),
            account_partner: None,
        }
    }

    pub fn with_partner(mut self, partner: &str) -> Self {
        self.account_partner = Some(partner.to_string());
        self
    }
}

/// Result of one join: no match, or the partner label that restricts contact.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Verdict {
    #[default]
    Safe,
    Restricted(String),
}

impl Verdict {
    /// A master partner of literally "Safe" is not a restriction.
    pub fn from_partner(partner: &str) -> Self {
        if partner == SAFE {
            Verdict::Safe
        } else {
            Verdict::Restricted(partner.to_string())
        }
    }

    pub fn is_safe(&self) -> bool {
        matches!(self, Verdict::Safe)
    }

    pub fn label(&self) -> &str {
        match self {
            Verdict::Safe => SAFE,
            Verdict::Restricted(label) => label,
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
