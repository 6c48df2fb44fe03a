use crate::core::field::{extract_number, ComparisonField};
use crate::core::record::Record;
use crate::core::result::{FieldDetail, SideValues};
use crate::core::types::{
    VerdictKind, LABEL_MASTER_NOT_FOUND, LABEL_MATCHED, LABEL_MISMATCH_PREFIX,
    REASON_MASTER_NOT_FOUND,
};

/// Classification of one IT row against the master data
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// All four fields agree
    Matched,
    /// Business key absent from master data
    Unmatched,
    /// At least one field differs; failing fields in comparison order
    Mismatched { fields: Vec<ComparisonField> },
}

/// Result of comparing one IT record to its master record, if any
#[derive(Debug, Clone)]
pub struct RowVerdict<'a> {
    pub it: &'a Record,
    pub master: Option<&'a Record>,
    pub verdict: Verdict,
    /// One entry per compared field; empty when no master record matched
    pub details: Vec<FieldDetail>,
}

impl<'a> RowVerdict<'a> {
    /// Compare `it` against `master` across every [`ComparisonField`].
    #[must_use]
    pub fn compare(it: &'a Record, master: Option<&'a Record>) -> Self {
        let Some(master_record) = master else {
            return Self {
                it,
                master: None,
                verdict: Verdict::Unmatched,
                details: Vec::new(),
            };
        };

        let details: Vec<FieldDetail> = ComparisonField::ALL
            .iter()
            .map(|&field| {
                let it_value = field.it_value(it);
                let master_value = field.master_value(master_record);
                FieldDetail {
                    field,
                    is_match: it_value == master_value,
                    it_value,
                    master_value,
                }
            })
            .collect();

        let failing: Vec<ComparisonField> = details
            .iter()
            .filter(|d| !d.is_match)
            .map(|d| d.field)
            .collect();

        let verdict = if failing.is_empty() {
            Verdict::Matched
        } else {
            Verdict::Mismatched { fields: failing }
        };

        Self {
            it,
            master,
            verdict,
            details,
        }
    }

    #[must_use]
    pub fn kind(&self) -> VerdictKind {
        match self.verdict {
            Verdict::Matched => VerdictKind::Matched,
            Verdict::Unmatched => VerdictKind::Unmatched,
            Verdict::Mismatched { .. } => VerdictKind::Mismatched,
        }
    }

    #[must_use]
    pub fn is_match(&self) -> bool {
        self.verdict == Verdict::Matched
    }

    /// Failing fields, empty unless mismatched
    #[must_use]
    pub fn failing_fields(&self) -> &[ComparisonField] {
        match &self.verdict {
            Verdict::Mismatched { fields } => fields.as_slice(),
            Verdict::Matched | Verdict::Unmatched => &[],
        }
    }

    /// Human-readable label (Keterangan)
    #[must_use]
    pub fn label(&self) -> String {
        match &self.verdict {
            Verdict::Matched => LABEL_MATCHED.to_string(),
            Verdict::Unmatched => LABEL_MASTER_NOT_FOUND.to_string(),
            Verdict::Mismatched { fields } => {
                let names: Vec<&str> = fields.iter().map(|f| f.name()).collect();
                format!("{LABEL_MISMATCH_PREFIX}{}", names.join(", "))
            }
        }
    }

    /// Reasons listed for this row in the mismatch summary
    #[must_use]
    pub fn reasons(&self) -> Vec<String> {
        match &self.verdict {
            Verdict::Matched => Vec::new(),
            Verdict::Unmatched => vec![REASON_MASTER_NOT_FOUND.to_string()],
            Verdict::Mismatched { fields } => fields
                .iter()
                .map(|f| format!("{} tidak sesuai", f.name()))
                .collect(),
        }
    }

    #[must_use]
    pub fn it_side(&self) -> SideValues {
        side_values(self.it, ComparisonField::it_column)
    }

    #[must_use]
    pub fn master_side(&self) -> Option<SideValues> {
        self.master
            .map(|record| side_values(record, ComparisonField::master_column))
    }
}

fn side_values(record: &Record, column: fn(ComparisonField) -> &'static str) -> SideValues {
    let number = |field: ComparisonField| extract_number(record.get(column(field)));

    SideValues {
        service: record.get(column(ComparisonField::Service)).trim().to_string(),
        tarif: number(ComparisonField::Tarif),
        sla_form: number(ComparisonField::SlaForm),
        sla_thru: number(ComparisonField::SlaThru),
    }
}
