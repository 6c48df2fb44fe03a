use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Who is acting on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Requester,
    HeadBranch,
    Department,
}

impl Role {
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().replace([' ', '-'], "_").as_str() {
            "requester" => Some(Self::Requester),
            "head_branch" | "head_cabang" => Some(Self::HeadBranch),
            "department" | "departement" => Some(Self::Department),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Requester => write!(f, "Requester"),
            Self::HeadBranch => write!(f, "Head Cabang"),
            Self::Department => write!(f, "Departement"),
        }
    }
}

/// Kind of branch submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionType {
    HargaJual,
    Biaya,
    Routing,
    DataRequest,
}

impl SubmissionType {
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().replace([' ', '-'], "_").as_str() {
            "harga_jual" => Some(Self::HargaJual),
            "biaya" => Some(Self::Biaya),
            "routing" => Some(Self::Routing),
            "data_request" | "request_data" => Some(Self::DataRequest),
            _ => None,
        }
    }

    /// Whether `details` is the form shape this type collects
    #[must_use]
    pub fn accepts(self, details: &FormDetails) -> bool {
        matches!(
            (self, details),
            (Self::DataRequest, FormDetails::DataRequest { .. })
                | (
                    Self::HargaJual | Self::Biaya | Self::Routing,
                    FormDetails::Adjustment { .. }
                )
        )
    }
}

impl std::fmt::Display for SubmissionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HargaJual => write!(f, "Harga Jual"),
            Self::Biaya => write!(f, "Biaya"),
            Self::Routing => write!(f, "Routing"),
            Self::DataRequest => write!(f, "Request Data"),
        }
    }
}

/// Position of a submission in the approval chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    Open,
    ApprovedByHead,
    /// Approved by the department, waiting for the result
    OnProcess,
    Completed,
}

impl RequestStatus {
    /// Waiting on an approval
    #[must_use]
    pub fn is_pending(self) -> bool {
        matches!(self, Self::Open | Self::ApprovedByHead)
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open => write!(f, "Open"),
            Self::ApprovedByHead => write!(f, "Approved by Head"),
            Self::OnProcess => write!(f, "On Process"),
            Self::Completed => write!(f, "Completed"),
        }
    }
}

/// Form contents, one shape per family of submission types
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "form", rename_all = "snake_case")]
pub enum FormDetails {
    /// Harga Jual, Biaya and Routing adjustments
    Adjustment {
        /// Jenis penyesuaian
        kinds: Vec<String>,
        /// Detil permintaan
        detail: String,
        /// Alasan
        reason: String,
    },
    /// Requests for a data extract
    DataRequest {
        /// Jenis data (Tarif, BT/BP/BD, Product, ...)
        kinds: Vec<String>,
        /// Tujuan penggunaan data
        purpose: String,
    },
}

impl FormDetails {
    #[must_use]
    pub fn kinds(&self) -> &[String] {
        match self {
            Self::Adjustment { kinds, .. } | Self::DataRequest { kinds, .. } => kinds,
        }
    }

    /// Title shown on the board for a submission carrying these details
    #[must_use]
    pub fn title(&self) -> String {
        let kinds = self.kinds();
        if kinds.is_empty() {
            return "Pengajuan Baru".to_string();
        }
        match self {
            Self::Adjustment { .. } => format!("Penyesuaian: {}", kinds.join(", ")),
            Self::DataRequest { .. } => format!("Request Data: {}", kinds.join(", ")),
        }
    }
}

/// One request moving through the approval chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub id: String,
    pub submission_type: SubmissionType,
    pub title: String,
    pub requester_name: String,
    pub date: NaiveDate,
    pub status: RequestStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_link: Option<String>,
    pub details: FormDetails,
}
