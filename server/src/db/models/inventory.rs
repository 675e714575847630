//! Inventory Item Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Inventory item document, referenced by order line items
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub name: String,
    pub price: f64,
    pub quantity: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Inventory item creation payload
#[derive(Debug, Clone, Deserialize)]
pub struct InventoryItemCreate {
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub quantity: i64,
}
