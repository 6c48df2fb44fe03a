//! Row comparison and the reconciliation driver.
//!
//! - [`RowVerdict`]: one IT row compared against its master row
//! - [`Reconciler`]: parses both inputs, joins on `SYS_CODE`, and builds the result
//!
//! ## Verdicts
//!
//! Each retained IT row ends up in exactly one bucket:
//!
//! 1. **Matched**: Service, Tarif, SLA_FORM and SLA_THRU all agree
//! 2. **Mismatched**: a master row exists but at least one field differs
//! 3. **Unmatched**: no master row carries the business key
//!
//! ## Example
//!
//! ```rust
//! use recon_desk::matching::engine::reconcile;
//!
//! let it = "ORIGIN,DEST,SYS_CODE,SERVICE,TARIF,SLA_FORM,SLA_THRU\n\
//!           MES10612,AMI10010,MES10612AMI10010,REG23,62000,3,6\n";
//! let master = "ORIGIN,DEST,SYS_CODE,Service REG,Tarif REG,sla form REG,sla thru REG\n\
//!               MES10612,AMI10010,MES10612AMI10010,REG23,60000,3,5\n";
//!
//! let result = reconcile(it, master);
//! assert_eq!(result.full_report[0].keterangan, "Tidak sesuai : Tarif, SLA_THRU");
//! ```

pub mod comparator;
pub mod engine;

pub use comparator::{RowVerdict, Verdict};
pub use engine::{reconcile, ReconcileConfig, Reconciler};
