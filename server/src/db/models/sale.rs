//! Sale Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SalePaymentStatus {
    Pending,
    Paid,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SaleOrderStatus {
    Pending,
    Shipped,
    Delivered,
    Cancelled,
}

/// One line item on a sale, with its precomputed line total
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleItem {
    pub product_id: RecordId,
    pub product_name: String,
    pub quantity: i64,
    pub price: f64,
    /// quantity * price
    pub total: f64,
}

/// Sale document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sale {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub order_number: String,
    pub customer_id: RecordId,
    pub items: Vec<SaleItem>,
    /// Sum of all item totals
    pub total_amount: f64,
    pub payment_status: SalePaymentStatus,
    pub order_status: SaleOrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
