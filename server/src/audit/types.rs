//! Audit trail types
//!
//! History entries are append-only: once pushed onto a ticket they are never
//! edited or removed, and insertion order is chronological order.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::diff::ChangeRecord;

/// The principal responsible for an update.
///
/// Attribution is mandatory on every history entry: handlers reject requests
/// that arrive without a full identity rather than defaulting any field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    pub id: String,
    pub email: String,
    pub name: String,
}

/// One immutable audit record of a single update action
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Action label (e.g. "Updated ticket")
    pub action: String,
    /// Field-level changes; never empty for a persisted entry
    pub changes: Vec<ChangeRecord>,
    pub updated_by_id: String,
    pub updated_by_email: String,
    pub updated_by_name: String,
    pub timestamp: DateTime<Utc>,
}

impl HistoryEntry {
    pub fn new(action: impl Into<String>, changes: Vec<ChangeRecord>, actor: &Actor) -> Self {
        Self {
            action: action.into(),
            changes,
            updated_by_id: actor.id.clone(),
            updated_by_email: actor.email.clone(),
            updated_by_name: actor.name.clone(),
            timestamp: Utc::now(),
        }
    }
}
