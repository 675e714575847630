//! Database Module
//!
//! Embedded SurrealDB storage. One collection per entity type; uniqueness of
//! human-facing identifiers (order/ticket IDs, warehouse IDs, emails) is
//! enforced with storage-level unique indexes; the application-side
//! pre-checks are optimizations, these indexes are the safety net.

pub mod models;
pub mod repository;
pub mod sequence;

use crate::utils::AppError;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem, RocksDb};

const NAMESPACE: &str = "streamline";
const DATABASE: &str = "streamline";

/// Schema definition applied at startup (idempotent)
const SCHEMA: &str = r#"
    DEFINE TABLE IF NOT EXISTS user_data SCHEMALESS;
    DEFINE INDEX IF NOT EXISTS user_email ON TABLE user_data COLUMNS email UNIQUE;

    DEFINE TABLE IF NOT EXISTS customer_data SCHEMALESS;
    DEFINE INDEX IF NOT EXISTS customer_email ON TABLE customer_data COLUMNS email UNIQUE;

    DEFINE TABLE IF NOT EXISTS inventory SCHEMALESS;

    DEFINE TABLE IF NOT EXISTS warehouses SCHEMALESS;
    DEFINE INDEX IF NOT EXISTS warehouse_business_id ON TABLE warehouses COLUMNS warehouse_id UNIQUE;

    DEFINE TABLE IF NOT EXISTS orders SCHEMALESS;
    DEFINE INDEX IF NOT EXISTS order_human_id ON TABLE orders COLUMNS order_id UNIQUE;

    DEFINE TABLE IF NOT EXISTS sales_data SCHEMALESS;
    DEFINE INDEX IF NOT EXISTS sale_order_number ON TABLE sales_data COLUMNS order_number UNIQUE;

    DEFINE TABLE IF NOT EXISTS tickets SCHEMALESS;
    DEFINE INDEX IF NOT EXISTS ticket_human_id ON TABLE tickets COLUMNS ticket_id UNIQUE;

    DEFINE TABLE IF NOT EXISTS reconciliations SCHEMALESS;
"#;

/// Database service owning the embedded SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open (or create) the on-disk database and apply the schema
    pub async fn new(db_path: &str) -> Result<Self, AppError> {
        let db = Surreal::new::<RocksDb>(db_path)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

        Self::prepare(db).await
    }

    /// In-memory database for tests
    pub async fn memory() -> Result<Self, AppError> {
        let db = Surreal::new::<Mem>(())
            .await
            .map_err(|e| AppError::database(format!("Failed to open in-memory database: {e}")))?;

        Self::prepare(db).await
    }

    async fn prepare(db: Surreal<Db>) -> Result<Self, AppError> {
        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        db.query(SCHEMA)
            .await
            .map_err(|e| AppError::database(format!("Failed to apply schema: {e}")))?;

        tracing::info!("Database ready (schema applied)");

        Ok(Self { db })
    }
}
