//! Branch submission tracking.
//!
//! Branches file adjustment and data requests which then move through a fixed
//! approval chain:
//!
//! ```text
//! Open --Head Cabang--> Approved by Head --Departement--> On Process --result--> Completed
//! ```
//!
//! The board lives in memory for the lifetime of the server.

pub mod board;
pub mod submission;

pub use board::{BoardSummary, Notification, WorkflowBoard, WorkflowError, DEFAULT_RESULT_LINK};
pub use submission::{FormDetails, RequestStatus, Role, Submission, SubmissionType};
