//! Web dashboard for reconciliation and branch submissions.
//!
//! This module provides a single-page interface using Axum. Users upload an IT
//! extract and a master extract, review the verdicts, download filtered
//! reports, and track submissions through the approval chain.
//!
//! ## Starting the Server
//!
//! ```text
//! # Start on default port 8080
//! recon-desk serve
//!
//! # Custom port and auto-open browser
//! recon-desk serve --port 3000 --open
//!
//! # Bind to all interfaces
//! recon-desk serve --address 0.0.0.0
//! ```
//!
//! ## API Endpoints
//!
//! - `GET /` - Dashboard page
//! - `GET /api/template/{kind}` - Blank `it` or `master` template CSV
//! - `POST /api/reconcile` - Reconcile `it_file` against `master_file` (multipart form)
//! - `GET /api/report/{id}?filter=all|matched|mismatched` - Report CSV of a stored run
//! - `GET /api/history` - Runs of this session, newest first
//! - `GET /api/history/{id}` / `DELETE /api/history/{id}` - One stored run
//! - `GET /api/workflow?type=...` - Submissions of one type with counts
//! - `POST /api/workflow` - File a submission
//! - `POST /api/workflow/{id}/approve` - Approve as `head_branch` or `department`
//! - `POST /api/workflow/{id}/complete` - Attach the result and close
//!
//! History and submissions are held in memory and lost when the server stops.

pub mod server;
