//! Order Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Order lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// All valid statuses, in lifecycle order
    pub const ALL: [OrderStatus; 4] = [
        OrderStatus::Pending,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[serde(rename = "credit card")]
    CreditCard,
    #[serde(rename = "paypal")]
    Paypal,
    #[serde(rename = "cash on delivery")]
    CashOnDelivery,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Paid,
    Unpaid,
    Pending,
}

/// One line item on an order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    pub item_id: RecordId,
    pub item_name: String,
    pub quantity: i64,
    pub price: f64,
}

/// Order document
///
/// `order_id` is the caller-facing 6-digit human ID: assigned once at
/// creation, immutable, unique across all orders (enforced by a storage-level
/// unique index, not just the generator's pre-check).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub order_id: i64,
    pub customer_id: RecordId,
    pub order_date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_date: Option<DateTime<Utc>>,
    pub status: OrderStatus,
    pub total_amount: f64,
    pub tax_amount: f64,
    pub net_amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<PaymentMethod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_status: Option<PaymentStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_date: Option<DateTime<Utc>>,
    pub shipping_address: String,
    pub billing_address: String,
    pub items: Vec<OrderItem>,
    pub created_by: String,
    pub updated_by: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Line item as submitted by the order form
#[derive(Debug, Clone, Deserialize)]
pub struct OrderItemCreate {
    pub item_id: String,
    pub item_name: String,
    pub quantity: i64,
    pub price: f64,
}

/// Order creation payload; every business field is required
#[derive(Debug, Clone, Deserialize)]
pub struct OrderCreate {
    pub customer_id: String,
    pub customer_name: String,
    pub customer_number: String,
    pub customer_email: String,
    pub order_date: DateTime<Utc>,
    pub shipping_address: String,
    pub billing_address: String,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    pub items: Vec<OrderItemCreate>,
    pub total_amount: f64,
    pub tax_amount: f64,
    pub net_amount: f64,
}

/// Status transition payload
#[derive(Debug, Clone, Deserialize)]
pub struct StatusUpdate {
    pub status: OrderStatus,
}
