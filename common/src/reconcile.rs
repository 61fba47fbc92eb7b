//! Master/check reconciliation
//!
//! Two independent equi-joins of the check set against the master set:
//! 1. normalized name -> account partner
//! 2. registration number -> account partner
//!
//! Duplicate master keys are not an error; the later row overwrites the
//! earlier one. Registration numbers are compared as strings with blanks as
//! `""`, so a blank check number matches a blank master number.

use crate::combine::combine;
use crate::normalize::normalize_name;
use crate::types::{CompanyRecord, Verdict};
use std::collections::HashMap;

/// Lookup tables built from the master set for one reconciliation.
#[derive(Debug, Clone, Default)]
pub struct MasterIndex {
    by_cleaned_name: HashMap<String, String>,
    by_registration_number: HashMap<String, String>,
}

impl MasterIndex {
    pub fn build(master: &[CompanyRecord]) -> Self {
        let mut index = Self::default();

        for record in master {
            let partner = record.account_partner.clone().unwrap_or_default();
            index
                .by_cleaned_name
                .insert(normalize_name(record.name.as_deref()), partner.clone());
            index
                .by_registration_number
                .insert(record.registration_number.clone(), partner);
        }

        index
    }

    pub fn verdict_by_name(&self, cleaned_name: &str) -> Verdict {
        self.by_cleaned_name
            .get(cleaned_name)
            .map(|partner| Verdict::from_partner(partner))
            .unwrap_or_default()
    }

    pub fn verdict_by_registration(&self, registration_number: &str) -> Verdict {
        self.by_registration_number
            .get(registration_number)
            .map(|partner| Verdict::from_partner(partner))
            .unwrap_or_default()
    }
}

/// Both join outcomes for one check row.
#[derive(Debug, Clone, PartialEq)]
pub struct Reconciliation {
    pub row: usize,
    pub cleaned_name: String,
    pub by_name: Verdict,
    pub by_registration: Verdict,
}

impl Reconciliation {
    pub fn combined(&self) -> Verdict {
        combine(&self.by_name, &self.by_registration)
    }
}

/// Joins every check record against the master set, in check order.
pub fn reconcile(master: &[CompanyRecord], check: &[CompanyRecord]) -> Vec<Reconciliation> {
    let index = MasterIndex::build(master);

    check
        .iter()
        .map(|record| {
            let cleaned_name = normalize_name(record.name.as_deref());
            Reconciliation {
                row: record.row,
                by_name: index.verdict_by_name(&cleaned_name),
                by_registration: index.verdict_by_registration(&record.registration_number),
                cleaned_name,
            }
        })
        .collect()
}
