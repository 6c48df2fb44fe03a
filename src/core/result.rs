use serde::{Deserialize, Serialize};

use crate::core::field::{ComparisonField, FieldValue};
use crate::core::types::{ReportFilter, VerdictKind};

/// Outcome of comparing one field between an IT row and its master row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDetail {
    pub field: ComparisonField,
    pub it_value: FieldValue,
    pub master_value: FieldValue,
    pub is_match: bool,
}

/// A non-matching IT row, keyed by its 1-based position in the IT file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MismatchEntry {
    pub row_id: usize,
    pub kind: VerdictKind,
    pub reasons: Vec<String>,
    /// Empty for rows without a master entry
    pub details: Vec<FieldDetail>,
}

/// The four compared values from one side of a row
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideValues {
    pub service: String,
    pub tarif: FieldValue,
    pub sla_form: FieldValue,
    pub sla_thru: FieldValue,
}

/// One line of the full report, in IT file order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    pub origin: String,
    pub dest: String,
    pub sys_code: String,
    /// Absent when the business key has no master entry
    pub master: Option<SideValues>,
    pub it: SideValues,
    pub keterangan: String,
}

/// Everything one reconciliation run produced
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciliationResult {
    pub total_rows: usize,
    pub matches: usize,
    pub mismatches: Vec<MismatchEntry>,
    pub full_report: Vec<ReportRow>,
}

/// Headline counts of a run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultSummary {
    pub total_rows: usize,
    pub matches: usize,
    pub mismatched: usize,
    pub unmatched: usize,
    pub match_rate: f64,
}

impl ReconciliationResult {
    /// Rows with a master entry but at least one differing field
    #[must_use]
    pub fn mismatch_count(&self) -> usize {
        self.count_kind(VerdictKind::Mismatched)
    }

    /// Rows whose business key is absent from the master data
    #[must_use]
    pub fn unmatched_count(&self) -> usize {
        self.count_kind(VerdictKind::Unmatched)
    }

    /// Fraction of retained rows that matched, 0.0 for an empty run
    #[must_use]
    pub fn match_rate(&self) -> f64 {
        if self.total_rows == 0 {
            return 0.0;
        }
        #[allow(clippy::cast_precision_loss)]
        {
            self.matches as f64 / self.total_rows as f64
        }
    }

    #[must_use]
    pub fn summary(&self) -> ResultSummary {
        ResultSummary {
            total_rows: self.total_rows,
            matches: self.matches,
            mismatched: self.mismatch_count(),
            unmatched: self.unmatched_count(),
            match_rate: self.match_rate(),
        }
    }

    /// Report rows selected by `filter`, in IT file order
    pub fn rows(&self, filter: ReportFilter) -> impl Iterator<Item = &ReportRow> {
        self.full_report
            .iter()
            .filter(move |row| filter.accepts(&row.keterangan))
    }

    fn count_kind(&self, kind: VerdictKind) -> usize {
        self.mismatches.iter().filter(|m| m.kind == kind).count()
    }
}
