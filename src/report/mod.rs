//! Report export and input templates.
//!
//! - [`format_report`]: render a reconciliation result as a downloadable CSV
//! - [`TemplateKind`]: the blank IT and master templates handed to users
//!
//! ## Report Layout
//!
//! ```text
//! ORIGIN,DEST,SYS_CODE,Service REG,Tarif REG,sla form REG,sla thru REG,SERVICE,TARIF,SLA_FORM,SLA_THRU,Keterangan
//! MES10612,AMI10010,MES10612AMI10010,REG23,60000,3,5,REG23,62000,3,6,"Tidak sesuai : Tarif, SLA_THRU"
//! ```

pub mod format;
pub mod template;

pub use format::{filter_rows, format_report, format_rows, REPORT_HEADER};
pub use template::TemplateKind;
