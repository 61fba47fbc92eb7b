//! Purgo Common Library
//!
//! Pure reconciliation core: name normalization, master/check joins and the
//! combined status rule. No I/O besides the optional xlsx writer.

pub mod types;
pub mod error;
pub mod normalize;
pub mod reconcile;
pub mod combine;
pub mod export;

pub use types::{columns, require_all, Cell, CompanyRecord, Dataset, Sheet, Verdict, SAFE};
pub use error::{Error, Result};
pub use normalize::normalize_name;
pub use reconcile::{reconcile, MasterIndex, Reconciliation};
pub use combine::combine;
