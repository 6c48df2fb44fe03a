use crate::core::record::Record;
use crate::core::result::{MismatchEntry, ReconciliationResult, ReportRow};
use crate::master::MasterIndex;
use crate::matching::comparator::RowVerdict;
use crate::parsing::table::{parse_table_text, DEFAULT_DELIMITER};

/// Configuration for a reconciliation run
#[derive(Debug, Clone)]
pub struct ReconcileConfig {
    /// Field delimiter shared by both inputs
    pub delimiter: char,
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
        }
    }
}

/// Reconcile IT text against master text with the default configuration.
#[must_use]
pub fn reconcile(it_text: &str, master_text: &str) -> ReconciliationResult {
    Reconciler::default().reconcile(it_text, master_text)
}

/// Joins IT rows to master rows and classifies every IT row
#[derive(Debug, Clone, Default)]
pub struct Reconciler {
    config: ReconcileConfig,
}

impl Reconciler {
    #[must_use]
    pub fn new(config: ReconcileConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &ReconcileConfig {
        &self.config
    }

    /// Parse both inputs and reconcile them.
    ///
    /// Never fails: unparsable input reconciles as an empty table.
    #[must_use]
    pub fn reconcile(&self, it_text: &str, master_text: &str) -> ReconciliationResult {
        let it_records = parse_table_text(it_text, self.config.delimiter);
        let master_records = parse_table_text(master_text, self.config.delimiter);
        reconcile_records(&it_records, &master_records)
    }
}

/// Reconcile already-parsed records.
///
/// Row ids are 1-based positions in `it_records`. A row with neither a business
/// key nor an origin is skipped and keeps its position unused.
#[must_use]
pub fn reconcile_records(it_records: &[Record], master_records: &[Record]) -> ReconciliationResult {
    let index = MasterIndex::build(master_records);
    let mut result = ReconciliationResult::default();

    for (i, record) in it_records.iter().enumerate() {
        let row_id = i + 1;

        if record.key().is_empty() && record.origin().is_empty() {
            tracing::debug!("skipping blank IT row {}", row_id);
            continue;
        }

        let row = RowVerdict::compare(record, index.get(record.key()));
        result.total_rows += 1;

        if row.is_match() {
            result.matches += 1;
        } else {
            result.mismatches.push(MismatchEntry {
                row_id,
                kind: row.kind(),
                reasons: row.reasons(),
                details: row.details.clone(),
            });
        }

        result.full_report.push(ReportRow {
            origin: record.origin().to_string(),
            dest: record.dest().to_string(),
            sys_code: record.key().to_string(),
            master: row.master_side(),
            it: row.it_side(),
            keterangan: row.label(),
        });
    }

    tracing::info!(
        "reconciled {} rows against {} master keys: {} matched, {} mismatched, {} without master data",
        result.total_rows,
        index.len(),
        result.matches,
        result.mismatch_count(),
        result.unmatched_count()
    );

    result
}
