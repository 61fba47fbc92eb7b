//! End-to-end flows
//!
//! - check: enrich -> reconcile -> combine -> trading status
//! - ingest: enrich new accounts and append them to the master sheet
//! - status: trading status for every value of one column
//!
//! Each flow needs a `Session`, validates the columns of every input file
//! before touching the registry, and returns the sheet to write out.

use crate::enricher::{enrich, EnrichSummary};
use crate::error::Result;
use crate::registry::{CompanyRegistry, FAILED_TO_FETCH};
use crate::session::Session;
use indicatif::{ProgressBar, ProgressStyle};
use purgo_common::{
    columns, reconcile, require_all, Cell, CompanyRecord, Dataset, Reconciliation, Sheet,
};
use tracing::info;

pub const CHECK_COLUMNS: &[&str] = &[columns::NAME, columns::REGISTRATION_NUMBER];
pub const MASTER_COLUMNS: &[&str] = &[
    columns::NAME,
    columns::REGISTRATION_NUMBER,
    columns::ACCOUNT_PARTNER,
];
pub const NEW_ACCOUNT_COLUMNS: &[&str] = &[columns::NAME];
pub const INGEST_MASTER_COLUMNS: &[&str] = &[columns::NAME, columns::REGISTRATION_NUMBER];

pub const DEFAULT_STATUS_COLUMN: &str = "company house reg";
pub const STATUS_OUTPUT_COLUMN: &str = "Status";

/// Per-row progress display
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Progress {
    #[default]
    Hidden,
    Terminal,
}

impl Progress {
    fn bar(self, len: usize, prefix: &'static str) -> ProgressBar {
        let bar = match self {
            Progress::Hidden => ProgressBar::hidden(),
            Progress::Terminal => {
                let style = ProgressStyle::with_template(
                    "{prefix:.bold} [{bar:30.cyan/blue}] {pos}/{len} {wide_msg}",
                )
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=> ");
                ProgressBar::new(len as u64).with_style(style)
            }
        };
        bar.set_length(len as u64);
        bar.set_prefix(prefix);
        bar
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CheckOptions {
    /// Look up blank registration numbers before reconciling
    pub enrich: bool,
    /// Add the live `Company Status` column
    pub fetch_status: bool,
}

impl Default for CheckOptions {
    fn default() -> Self {
        Self {
            enrich: true,
            fetch_status: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CheckReport {
    pub sheet: Sheet,
    pub reconciled: Vec<Reconciliation>,
    pub enrich: Option<EnrichSummary>,
    /// Rows whose combined status is not Safe
    pub restricted: usize,
}

#[derive(Debug, Clone)]
pub struct IngestReport {
    pub sheet: Sheet,
    pub enrich: EnrichSummary,
    pub appended: usize,
}

#[derive(Debug, Clone)]
pub struct StatusReport {
    pub sheet: Sheet,
    pub failed: usize,
}

/// Reconciles `check` against `master` and builds the augmented check sheet.
pub fn run_check(
    session: &Session,
    master: &Dataset,
    check: &Dataset,
    registry: &mut dyn CompanyRegistry,
    options: CheckOptions,
    progress: Progress,
) -> Result<CheckReport> {
    require_all(&[(master, MASTER_COLUMNS), (check, CHECK_COLUMNS)])?;
    info!(
        user = session.username(),
        master = %master.file_name,
        check = %check.file_name,
        "check run started"
    );

    let master_records = master.company_records()?;
    let mut check_records = check.company_records()?;

    let enrich_summary = if options.enrich {
        let bar = progress.bar(check_records.len(), "Company check");
        let summary = enrich(&mut check_records, registry, |record| {
            bar.set_message(record.search_name.clone());
            bar.inc(1);
        })?;
        bar.finish_and_clear();
        info!(?summary, "registration numbers enriched");
        Some(summary)
    } else {
        None
    };

    let reconciled = reconcile(&master_records, &check_records);
    let combined: Vec<_> = reconciled.iter().map(Reconciliation::combined).collect();
    let restricted = combined.iter().filter(|v| !v.is_safe()).count();

    let mut sheet = check.sheet.clone();
    sheet.set_column(columns::REGISTRATION_NUMBER, registration_cells(&check_records));
    sheet.set_column(
        columns::CLEANED_NAME,
        reconciled.iter().map(|r| Cell::text(&r.cleaned_name)).collect(),
    );
    sheet.set_column(
        columns::NAME_VERDICT,
        reconciled.iter().map(|r| Cell::text(r.by_name.label())).collect(),
    );
    sheet.set_column(
        columns::REGISTRATION_VERDICT,
        reconciled.iter().map(|r| Cell::text(r.by_registration.label())).collect(),
    );
    sheet.set_column(
        columns::COMBINED_STATUS,
        combined.iter().map(|v| Cell::text(v.label())).collect(),
    );

    if options.fetch_status {
        let numbers: Vec<String> = check_records
            .iter()
            .map(|r| r.registration_number.clone())
            .collect();
        let (statuses, _) = fetch_statuses(&numbers, registry, progress)?;
        sheet.set_column(columns::COMPANY_STATUS, statuses);
    }

    info!(rows = reconciled.len(), restricted, "check run finished");

    Ok(CheckReport {
        sheet,
        reconciled,
        enrich: enrich_summary,
        restricted,
    })
}

/// Looks up a number for every new account and appends them to the master sheet.
///
/// Existing numbers on the new-accounts sheet are discarded first, so every
/// row is searched. No reconciliation happens here.
pub fn run_ingest(
    session: &Session,
    new_accounts: &Dataset,
    master: &Dataset,
    registry: &mut dyn CompanyRegistry,
    progress: Progress,
) -> Result<IngestReport> {
    require_all(&[
        (new_accounts, NEW_ACCOUNT_COLUMNS),
        (master, INGEST_MASTER_COLUMNS),
    ])?;
    info!(
        user = session.username(),
        new_accounts = %new_accounts.file_name,
        master = %master.file_name,
        "ingest run started"
    );

    let mut records = new_accounts.company_records()?;
    for record in &mut records {
        record.registration_number.clear();
    }

    let bar = progress.bar(records.len(), "New account");
    let summary = enrich(&mut records, registry, |record| {
        bar.set_message(format!(
            "{} {}",
            record.registration_number, record.search_name
        ));
        bar.inc(1);
    })?;
    bar.finish_and_clear();

    let mut new_sheet = new_accounts.sheet.clone();
    new_sheet.set_column(columns::REGISTRATION_NUMBER, registration_cells(&records));

    let mut sheet = master.sheet.clone();
    sheet.append(&new_sheet);

    info!(appended = records.len(), ?summary, "ingest run finished");

    Ok(IngestReport {
        sheet,
        enrich: summary,
        appended: records.len(),
    })
}

/// Adds a `Status` column with the trading status of each number in `column`.
pub fn run_status(
    session: &Session,
    input: &Dataset,
    column: &str,
    registry: &mut dyn CompanyRegistry,
    progress: Progress,
) -> Result<StatusReport> {
    input.require_columns(&[column])?;
    info!(user = session.username(), input = %input.file_name, column, "status run started");

    let col = input.sheet.column_index(column).unwrap_or_default();
    let numbers: Vec<String> = (0..input.sheet.len())
        .map(|row| input.sheet.cell(row, col).to_key())
        .collect();

    let (statuses, failed) = fetch_statuses(&numbers, registry, progress)?;

    let mut sheet = input.sheet.clone();
    sheet.set_column(STATUS_OUTPUT_COLUMN, statuses);

    info!(rows = numbers.len(), failed, "status run finished");
    Ok(StatusReport { sheet, failed })
}

fn registration_cells(records: &[CompanyRecord]) -> Vec<Cell> {
    records
        .iter()
        .map(|r| Cell::text(&r.registration_number))
        .collect()
}

/// Fetches one status per number; also returns how many came back as failures.
fn fetch_statuses(
    numbers: &[String],
    registry: &mut dyn CompanyRegistry,
    progress: Progress,
) -> Result<(Vec<Cell>, usize)> {
    let bar = progress.bar(numbers.len(), "Company Status Check");

    let mut statuses = Vec::with_capacity(numbers.len());
    let mut failed = 0;
    for number in numbers {
        let status = registry.fetch_status(number)?;
        if status == FAILED_TO_FETCH {
            failed += 1;
        }
        bar.set_message(format!("{} {}", number, status));
        bar.inc(1);
        statuses.push(Cell::text(status));
    }

    bar.finish_and_clear();
    Ok((statuses, failed))
}
