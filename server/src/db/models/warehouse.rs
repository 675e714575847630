//! Warehouse Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WarehouseStatus {
    Active,
    Inactive,
}

impl WarehouseStatus {
    pub const ALL: [WarehouseStatus; 2] = [WarehouseStatus::Active, WarehouseStatus::Inactive];

    pub fn as_str(&self) -> &'static str {
        match self {
            WarehouseStatus::Active => "active",
            WarehouseStatus::Inactive => "inactive",
        }
    }
}

/// Warehouse document
///
/// `warehouse_id` is a caller-supplied business identifier, unique across
/// warehouses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Warehouse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub warehouse_id: String,
    pub name: String,
    pub location: String,
    pub capacity: i64,
    #[serde(default)]
    pub current_stock: i64,
    pub manager_id: RecordId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_number: Option<String>,
    pub status: WarehouseStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Warehouse creation payload
#[derive(Debug, Clone, Deserialize)]
pub struct WarehouseCreate {
    pub warehouse_id: String,
    pub name: String,
    pub location: String,
    pub capacity: i64,
    #[serde(default)]
    pub current_stock: i64,
    pub manager_id: String,
    pub contact_number: Option<String>,
    #[serde(default = "default_status")]
    pub status: WarehouseStatus,
}

fn default_status() -> WarehouseStatus {
    WarehouseStatus::Active
}
