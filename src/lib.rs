//! # recon-desk
//!
//! A library for reconciling IT tariff extracts against master data.
//!
//! Branch staff receive two extracts: one from the operational IT system and one
//! from the master tariff table. Both are keyed by `SYS_CODE`, and every IT row
//! should carry the same service code, tariff and SLA range as its master row.
//!
//! `recon-desk` joins the two extracts on the business key and labels every IT
//! row as agreeing with master data, differing in named fields, or missing from
//! master data altogether.
//!
//! ## Features
//!
//! - **Field comparison**: Service by text, Tarif and SLA by their digits
//! - **Labelled report**: one line per IT row with master and IT values side by side
//! - **Filtered export**: full, matched-only or mismatched-only CSV
//! - **History**: past runs kept in memory or in a JSON file
//! - **Workflow**: branch submissions tracked through a two-step approval chain
//!
//! ## Example
//!
//! ```rust
//! use recon_desk::{format_report, reconcile, ReportFilter};
//!
//! let it = "ORIGIN,DEST,SYS_CODE,SERVICE,TARIF,SLA_FORM,SLA_THRU\n\
//!           MES10612,AMI10000,MES10612AMI10000,REG23,59000,3,5\n";
//! let master = "ORIGIN,DEST,SYS_CODE,Service REG,Tarif REG,sla form REG,sla thru REG\n\
//!               MES10612,AMI10000,MES10612AMI10000,REG23,\"59.000\",3,5\n";
//!
//! let result = reconcile(it, master);
//! assert_eq!(result.matches, 1);
//!
//! let csv = format_report(&result, ReportFilter::Mismatched);
//! assert_eq!(csv.lines().count(), 1); // header only
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Records, compared fields and result types
//! - [`parsing`]: Delimited text parser
//! - [`master`]: Business-key index over master records
//! - [`matching`]: Row comparator and reconciliation engine
//! - [`report`]: CSV report export and input templates
//! - [`history`]: Stored reconciliation runs
//! - [`workflow`]: Branch submission approval chain
//! - [`cli`]: Command-line interface implementation
//! - [`web`]: Web server for the browser dashboard

pub mod cli;
pub mod core;
pub mod history;
pub mod master;
pub mod matching;
pub mod parsing;
pub mod report;
pub mod utils;
pub mod web;
pub mod workflow;

// Re-export commonly used types for convenience
pub use crate::core::record::Record;
pub use crate::core::result::ReconciliationResult;
pub use crate::core::types::*;
pub use matching::engine::{reconcile, ReconcileConfig, Reconciler};
pub use report::format::format_report;
