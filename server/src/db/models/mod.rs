//! Entity Models
//!
//! Serde structs matching the SurrealDB collections, plus the Create/Update
//! DTOs the API layer accepts. One collection per entity type; ticket
//! documents embed their history as a nested ordered list (history is never
//! queried independently of its parent ticket).

pub mod customer;
pub mod inventory;
pub mod order;
pub mod reconciliation;
pub mod sale;
pub mod ticket;
pub mod user;
pub mod warehouse;

pub use customer::{Customer, CustomerCreate, CustomerType, CustomerUpdate};
pub use inventory::{InventoryItem, InventoryItemCreate};
pub use order::{
    Order, OrderCreate, OrderItem, OrderStatus, PaymentMethod, PaymentStatus, StatusUpdate,
};
pub use reconciliation::{Reconciliation, ReconciliationCreate};
pub use sale::{Sale, SaleItem, SaleOrderStatus, SalePaymentStatus};
pub use ticket::{
    Department, IssueType, Ticket, TicketCreate, TicketPriority, TicketStatus, TicketUpdate,
};
pub use user::{User, UserCreate, UserPublic, UserRole, UserStatus};
pub use warehouse::{Warehouse, WarehouseCreate, WarehouseStatus};
