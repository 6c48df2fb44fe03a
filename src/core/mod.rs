//! Core data types for CSV reconciliation.
//!
//! - [`Record`]: one parsed data line, keyed by header name
//! - [`ComparisonField`]: the four fields compared per row and their column names
//! - [`ReconciliationResult`]: totals, mismatch details and the full row report
//! - [`ReportFilter`], [`Category`], [`VerdictKind`]: classification types
//!
//! ## Column Mapping
//!
//! | Field    | IT column  | Master column  | Compared as |
//! |----------|------------|----------------|-------------|
//! | Service  | SERVICE    | Service REG    | text        |
//! | Tarif    | TARIF      | Tarif REG      | integer     |
//! | SLA_FORM | SLA_FORM   | sla form REG   | integer     |
//! | SLA_THRU | SLA_THRU   | sla thru REG   | integer     |
//!
//! Rows are joined on `SYS_CODE`.

pub mod field;
pub mod record;
pub mod result;
pub mod types;

pub use field::{ComparisonField, FieldValue};
pub use record::Record;
pub use result::{
    FieldDetail, MismatchEntry, ReconciliationResult, ReportRow, ResultSummary, SideValues,
};
pub use types::{Category, ReportFilter, VerdictKind};
