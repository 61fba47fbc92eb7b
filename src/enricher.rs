//! Fills missing registration numbers from the registry name search.

use crate::error::Result;
use crate::registry::{CompanyRegistry, SearchOutcome};
use purgo_common::CompanyRecord;
use tracing::debug;

/// Counts from one enrichment pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnrichSummary {
    pub searched: usize,
    pub found: usize,
    pub not_found: usize,
    pub failed: usize,
    /// Rows that already had a number
    pub skipped: usize,
}

/// Searches the registry for every record with a blank registration number.
///
/// The query is the name cell as written, so a numeric name such as `1966`
/// is searched as `"1966"`.
///
/// Whatever the search returns is stored as the number, including the
/// `"Not Found"` and `"Error: ..."` sentinels. `on_row` is called once per
/// record with the value it ends up holding.
pub fn enrich(
    records: &mut [CompanyRecord],
    registry: &mut dyn CompanyRegistry,
    mut on_row: impl FnMut(&CompanyRecord),
) -> Result<EnrichSummary> {
    let mut summary = EnrichSummary::default();

    for record in records.iter_mut() {
        if !record.registration_number.is_empty() {
            summary.skipped += 1;
            on_row(record);
            continue;
        }

        let name = record.search_name.as_str();
        let outcome = registry.search_by_name(name)?;
        summary.searched += 1;
        match &outcome {
            SearchOutcome::Found(_) => summary.found += 1,
            SearchOutcome::NotFound => summary.not_found += 1,
            SearchOutcome::Failed(_) => summary.failed += 1,
        }

        record.registration_number = outcome.into_cell_value();
        debug!(row = record.row, name, number = %record.registration_number, "Company check");
        on_row(record);
    }

    Ok(summary)
}
