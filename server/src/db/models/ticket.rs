//! Ticket Model
//!
//! Ticket documents carry their own append-only history list. History is part
//! of the document so a field merge and a history push persist together in a
//! single save.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use crate::audit::HistoryEntry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IssueType {
    Bug,
    Billing,
    #[serde(rename = "Feature Request")]
    FeatureRequest,
    #[serde(rename = "UI Issues")]
    UiIssues,
    Performance,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Department {
    Support,
    Sales,
    Billing,
    Technical,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketPriority {
    Low,
    Medium,
    High,
    Critical,
}

impl TicketPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketPriority::Low => "low",
            TicketPriority::Medium => "medium",
            TicketPriority::High => "high",
            TicketPriority::Critical => "critical",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TicketStatus {
    #[serde(rename = "open")]
    Open,
    #[serde(rename = "in progress")]
    InProgress,
    #[serde(rename = "resolved")]
    Resolved,
    #[serde(rename = "closed")]
    Closed,
}

/// Ticket document
///
/// `ticket_id` is the 6-digit human ID, unique among tickets (checked against
/// the ticket collection's own `ticket_id` field, independent of order IDs).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticket {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub ticket_id: i64,
    pub user_id: RecordId,
    pub issue_type: IssueType,
    pub department: Department,
    pub subject: String,
    pub description: String,
    pub priority: TicketPriority,
    pub status: TicketStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<RecordId>,
    /// Append-only audit trail, insertion order = chronological order
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Ticket creation payload
#[derive(Debug, Clone, Deserialize)]
pub struct TicketCreate {
    pub user_id: String,
    pub issue_type: IssueType,
    pub department: Department,
    pub subject: String,
    pub description: String,
    pub priority: TicketPriority,
}

/// Partial ticket update; omitted fields stay untouched and are not diffed
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TicketUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue_type: Option<IssueType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<Department>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<TicketPriority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TicketStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
}

impl Ticket {
    /// Merge the provided fields of a partial update into this ticket
    pub fn apply(&mut self, update: &TicketUpdate) {
        if let Some(issue_type) = update.issue_type {
            self.issue_type = issue_type;
        }
        if let Some(department) = update.department {
            self.department = department;
        }
        if let Some(ref subject) = update.subject {
            self.subject = subject.clone();
        }
        if let Some(ref description) = update.description {
            self.description = description.clone();
        }
        if let Some(priority) = update.priority {
            self.priority = priority;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(ref assigned_to) = update.assigned_to {
            if let Ok(rid) = assigned_to.parse::<RecordId>() {
                self.assigned_to = Some(rid);
            }
        }
    }
}
