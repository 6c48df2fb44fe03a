use chrono::{NaiveDate, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::workflow::submission::{
    FormDetails, RequestStatus, Role, Submission, SubmissionType,
};

/// Result link recorded when a submission is completed without one
pub const DEFAULT_RESULT_LINK: &str = "File Uploaded";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum WorkflowError {
    #[error("Submission '{0}' not found")]
    NotFound(String),

    #[error("{role} cannot act on a submission that is {status}")]
    NotAllowed { role: Role, status: RequestStatus },

    #[error("{0} submissions do not use this form")]
    WrongForm(SubmissionType),
}

/// Counts shown above the submission table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BoardSummary {
    pub total: usize,
    pub pending_approval: usize,
    pub on_process: usize,
    pub completed: usize,
}

/// Message raised when a submission completes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub submission_id: String,
    pub message: String,
}

/// All submissions of a session, newest first
#[derive(Debug, Default)]
pub struct WorkflowBoard {
    submissions: Vec<Submission>,
    next_id: u64,
}

impl WorkflowBoard {
    #[must_use]
    pub fn new() -> Self {
        Self {
            submissions: Vec::new(),
            next_id: 1,
        }
    }

    /// File a new Open submission dated today.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::WrongForm` if `details` is not the form shape
    /// `submission_type` collects.
    pub fn submit(
        &mut self,
        submission_type: SubmissionType,
        requester_name: &str,
        details: FormDetails,
    ) -> Result<&Submission, WorkflowError> {
        self.submit_on(
            submission_type,
            requester_name,
            details,
            Utc::now().date_naive(),
        )
    }

    /// File a new Open submission with an explicit date.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::WrongForm` if `details` is not the form shape
    /// `submission_type` collects.
    pub fn submit_on(
        &mut self,
        submission_type: SubmissionType,
        requester_name: &str,
        details: FormDetails,
        date: NaiveDate,
    ) -> Result<&Submission, WorkflowError> {
        if !submission_type.accepts(&details) {
            return Err(WorkflowError::WrongForm(submission_type));
        }

        let id = format!("REQ-{:03}", self.next_id.max(1));
        self.next_id = self.next_id.max(1) + 1;

        let submission = Submission {
            id,
            submission_type,
            title: details.title(),
            requester_name: requester_name.to_string(),
            date,
            status: RequestStatus::Open,
            result_link: None,
            details,
        };
        tracing::info!("{} filed {} ({})", requester_name, submission.id, submission_type);

        self.submissions.insert(0, submission);
        Ok(&self.submissions[0])
    }

    /// Move a submission one step along the approval chain.
    ///
    /// Head Cabang approves Open submissions; Departement approves submissions
    /// already approved by the head, which puts them On Process.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::NotFound` for an unknown id, or
    /// `WorkflowError::NotAllowed` if `role` may not approve at the current status.
    pub fn approve(&mut self, id: &str, role: Role) -> Result<&Submission, WorkflowError> {
        let submission = self.find_mut(id)?;

        let next = match (submission.status, role) {
            (RequestStatus::Open, Role::HeadBranch) => RequestStatus::ApprovedByHead,
            (RequestStatus::ApprovedByHead, Role::Department) => RequestStatus::OnProcess,
            (status, role) => return Err(WorkflowError::NotAllowed { role, status }),
        };

        tracing::info!("{} approved {}: {} -> {}", role, id, submission.status, next);
        submission.status = next;
        Ok(&*submission)
    }

    /// Close an On Process submission with its result link.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::NotFound` for an unknown id, or
    /// `WorkflowError::NotAllowed` if the submission is not On Process.
    pub fn complete(
        &mut self,
        id: &str,
        role: Role,
        result_link: &str,
    ) -> Result<Notification, WorkflowError> {
        let submission = self.find_mut(id)?;

        if submission.status != RequestStatus::OnProcess {
            return Err(WorkflowError::NotAllowed {
                role,
                status: submission.status,
            });
        }

        let link = result_link.trim();
        submission.result_link = Some(if link.is_empty() {
            DEFAULT_RESULT_LINK.to_string()
        } else {
            link.to_string()
        });
        submission.status = RequestStatus::Completed;

        Ok(Notification {
            submission_id: submission.id.clone(),
            message: format!("Data Request {} sudah selesai (Completed).", submission.id),
        })
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Submission> {
        self.submissions.iter().find(|s| s.id == id)
    }

    /// Submissions of one type, newest first
    pub fn list(&self, submission_type: SubmissionType) -> impl Iterator<Item = &Submission> {
        self.submissions
            .iter()
            .filter(move |s| s.submission_type == submission_type)
    }

    #[must_use]
    pub fn summary(&self, submission_type: SubmissionType) -> BoardSummary {
        self.list(submission_type)
            .fold(BoardSummary::default(), |mut summary, s| {
                summary.total += 1;
                match s.status {
                    status if status.is_pending() => summary.pending_approval += 1,
                    RequestStatus::OnProcess => summary.on_process += 1,
                    RequestStatus::Completed => summary.completed += 1,
                    _ => {}
                }
                summary
            })
    }

    fn find_mut(&mut self, id: &str) -> Result<&mut Submission, WorkflowError> {
        self.submissions
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| WorkflowError::NotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn adjustment() -> FormDetails {
        FormDetails::Adjustment {
            kinds: vec!["Tarif".to_string()],
            detail: "Update tarif zona A".to_string(),
            reason: "Periodic Update".to_string(),
        }
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 1).unwrap()
    }

    #[test]
    fn test_full_approval_chain() {
        let mut board = WorkflowBoard::new();
        let id = board
            .submit_on(SubmissionType::HargaJual, "John Doe", adjustment(), date())
            .unwrap()
            .id
            .clone();
        assert_eq!(id, "REQ-001");

        let s = board.approve(&id, Role::HeadBranch).unwrap();
        assert_eq!(s.status, RequestStatus::ApprovedByHead);

        let s = board.approve(&id, Role::Department).unwrap();
        assert_eq!(s.status, RequestStatus::OnProcess);

        let note = board.complete(&id, Role::Department, "  ").unwrap();
        assert_eq!(note.message, "Data Request REQ-001 sudah selesai (Completed).");

        let s = board.get(&id).unwrap();
        assert_eq!(s.status, RequestStatus::Completed);
        assert_eq!(s.result_link.as_deref(), Some(DEFAULT_RESULT_LINK));
    }

    #[test]
    fn test_wrong_role_is_rejected() {
        let mut board = WorkflowBoard::new();
        let id = board
            .submit_on(SubmissionType::Biaya, "A", adjustment(), date())
            .unwrap()
            .id
            .clone();

        assert_eq!(
            board.approve(&id, Role::Department).unwrap_err(),
            WorkflowError::NotAllowed {
                role: Role::Department,
                status: RequestStatus::Open
            }
        );
        assert!(board.approve(&id, Role::Requester).is_err());
        assert!(board.complete(&id, Role::Department, "link").is_err());

        board.approve(&id, Role::HeadBranch).unwrap();
        assert!(board.approve(&id, Role::HeadBranch).is_err());
    }

    #[test]
    fn test_completed_is_terminal() {
        let mut board = WorkflowBoard::new();
        let id = board
            .submit_on(SubmissionType::Routing, "A", adjustment(), date())
            .unwrap()
            .id
            .clone();
        board.approve(&id, Role::HeadBranch).unwrap();
        board.approve(&id, Role::Department).unwrap();
        board.complete(&id, Role::Requester, "https://example.com/result").unwrap();

        assert!(board.complete(&id, Role::Department, "again").is_err());
        assert!(board.approve(&id, Role::Department).is_err());
        assert_eq!(
            board.get(&id).unwrap().result_link.as_deref(),
            Some("https://example.com/result")
        );
    }

    #[test]
    fn test_form_must_match_type() {
        let mut board = WorkflowBoard::new();
        let err = board
            .submit_on(SubmissionType::DataRequest, "A", adjustment(), date())
            .unwrap_err();
        assert_eq!(err, WorkflowError::WrongForm(SubmissionType::DataRequest));
    }

    #[test]
    fn test_unknown_id() {
        let mut board = WorkflowBoard::new();
        assert_eq!(
            board.approve("REQ-999", Role::HeadBranch).unwrap_err(),
            WorkflowError::NotFound("REQ-999".to_string())
        );
    }

    #[test]
    fn test_list_and_summary_per_type() {
        let mut board = WorkflowBoard::new();
        let first = board
            .submit_on(SubmissionType::HargaJual, "A", adjustment(), date())
            .unwrap()
            .id
            .clone();
        board
            .submit_on(SubmissionType::HargaJual, "B", adjustment(), date())
            .unwrap();
        board
            .submit_on(
                SubmissionType::DataRequest,
                "C",
                FormDetails::DataRequest {
                    kinds: vec!["Tarif".to_string()],
                    purpose: "Audit".to_string(),
                },
                date(),
            )
            .unwrap();
        board.approve(&first, Role::HeadBranch).unwrap();
        board.approve(&first, Role::Department).unwrap();

        let listed: Vec<&str> = board
            .list(SubmissionType::HargaJual)
            .map(|s| s.id.as_str())
            .collect();
        assert_eq!(listed, vec!["REQ-002", "REQ-001"]);

        let summary = board.summary(SubmissionType::HargaJual);
        assert_eq!(
            summary,
            BoardSummary {
                total: 2,
                pending_approval: 1,
                on_process: 1,
                completed: 0
            }
        );
        assert_eq!(board.summary(SubmissionType::DataRequest).total, 1);
    }
}
