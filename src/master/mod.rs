//! Lookup of master data by business key.
//!
//! The master extract is the authoritative side of a reconciliation. Each IT row
//! is joined to at most one master row through its `SYS_CODE`.
//!
//! ## Duplicate Keys
//!
//! Master extracts occasionally repeat a key. The index keeps the row that
//! appears last in the file and counts the replaced rows.

pub mod index;

pub use index::MasterIndex;
