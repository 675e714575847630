//! Repository Module
//!
//! Provides CRUD operations over the SurrealDB collections.

pub mod customer;
pub mod inventory;
pub mod order;
pub mod reconciliation;
pub mod sale;
pub mod ticket;
pub mod user;
pub mod warehouse;

// Re-exports
pub use customer::CustomerRepository;
pub use inventory::InventoryRepository;
pub use order::OrderRepository;
pub use reconciliation::ReconciliationRepository;
pub use sale::SaleRepository;
pub use ticket::TicketRepository;
pub use user::UserRepository;
pub use warehouse::WarehouseRepository;

use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;
use thiserror::Error;

use crate::utils::AppError;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Validation error: {0}")]
    Validation(String),

    /// Update produced an empty change set; nothing was persisted
    #[error("No changes made.")]
    NoChanges,

    #[error("Database error: {0}")]
    Database(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        let msg = err.to_string();
        // Unique index violations surface as "... already contains ..."
        if msg.contains("already contains") {
            RepoError::Duplicate(msg)
        } else {
            RepoError::Database(msg)
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::NotFound(msg),
            RepoError::Duplicate(msg) => AppError::Conflict(msg),
            RepoError::Validation(msg) => AppError::Validation(msg),
            RepoError::NoChanges => AppError::NoChanges,
            RepoError::Database(msg) => AppError::Database(msg),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Parse a record id, accepting either the full `table:key` form or a bare
/// key for the given table
pub fn record_id(table: &str, id: &str) -> RepoResult<RecordId> {
    if id.contains(':') {
        id.parse::<RecordId>()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {id}")))
    } else {
        Ok(RecordId::from_table_key(table, id))
    }
}

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}
