//! Reconciliation Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Monthly financial reconciliation document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reconciliation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    /// Calendar month, 1 through 12
    pub recon_month: i64,
    pub recon_year: i64,
    pub total_income: f64,
    pub total_expenses: f64,
    pub total_reconciled: f64,
    pub created_by: String,
    pub updated_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Reconciliation creation payload
#[derive(Debug, Clone, Deserialize)]
pub struct ReconciliationCreate {
    pub recon_month: i64,
    pub recon_year: i64,
    pub total_income: f64,
    pub total_expenses: f64,
    pub total_reconciled: f64,
}
