//! Audit Trail Module
//!
//! Field-level diff computation and the append-only history types embedded
//! in ticket documents.

pub mod diff;
pub mod types;

pub use diff::{ChangeRecord, ChangeValue, compute_changes};
pub use types::{Actor, HistoryEntry};
