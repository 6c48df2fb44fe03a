use serde::{Deserialize, Serialize};

/// Label attached to a report row whose four fields all agree
pub const LABEL_MATCHED: &str = "Sesuai";

/// Prefix of every non-matching label
pub const LABEL_MISMATCH_PREFIX: &str = "Tidak sesuai : ";

/// Label attached to a report row whose business key has no master entry
pub const LABEL_MASTER_NOT_FOUND: &str = "Tidak sesuai : Data Master tidak ditemukan";

/// Reason recorded for an IT row with no master entry
pub const REASON_MASTER_NOT_FOUND: &str = "Master data not found";

/// Coarse classification of one reconciled row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerdictKind {
    /// All compared fields agree
    Matched,
    /// Master record found, at least one field disagrees
    Mismatched,
    /// No master record shares the business key
    Unmatched,
}

impl std::fmt::Display for VerdictKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Matched => write!(f, "matched"),
            Self::Mismatched => write!(f, "mismatched"),
            Self::Unmatched => write!(f, "unmatched"),
        }
    }
}

/// Which report rows to include in a view or export
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ReportFilter {
    #[default]
    All,
    /// Rows labelled exactly "Sesuai"
    Matched,
    /// Every row not labelled "Sesuai"
    Mismatched,
}

impl ReportFilter {
    /// Parse the filter names used by the web UI and query strings.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "all" | "" => Some(Self::All),
            "matched" | "match" => Some(Self::Matched),
            "mismatched" | "mismatch" => Some(Self::Mismatched),
            _ => None,
        }
    }

    /// Whether a row carrying `label` belongs in this view
    #[must_use]
    pub fn accepts(self, label: &str) -> bool {
        match self {
            Self::All => true,
            Self::Matched => label == LABEL_MATCHED,
            Self::Mismatched => label != LABEL_MATCHED,
        }
    }

    /// Suggested file name for a downloaded report
    #[must_use]
    pub fn file_name(self) -> &'static str {
        match self {
            Self::All => "Laporan_Validasi_Full.csv",
            Self::Matched => "Laporan_Validasi_MATCH.csv",
            Self::Mismatched => "Laporan_Validasi_MISMATCH.csv",
        }
    }
}

/// Data category a reconciliation run was filed under
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    #[default]
    Tarif,
    Biaya,
}

impl Category {
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "tarif" => Some(Self::Tarif),
            "biaya" => Some(Self::Biaya),
            _ => None,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Tarif => write!(f, "TARIF"),
            Self::Biaya => write!(f, "BIAYA"),
        }
    }
}
