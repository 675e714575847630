//! Inventory Repository

use chrono::Utc;
use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{InventoryItem, InventoryItemCreate};

const TABLE: &str = "inventory";

/// Reduced shape for the order-form item list
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct InventoryLov {
    pub id: RecordId,
    pub name: String,
    pub price: f64,
}

#[derive(Clone)]
pub struct InventoryRepository {
    base: BaseRepository,
}

impl InventoryRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_all(&self) -> RepoResult<Vec<InventoryItem>> {
        let items: Vec<InventoryItem> = self
            .base
            .db()
            .query("SELECT * FROM inventory ORDER BY name")
            .await?
            .take(0)?;
        Ok(items)
    }

    /// Reduced item list for the order form
    pub async fn find_lov(&self) -> RepoResult<Vec<InventoryLov>> {
        let items: Vec<InventoryLov> = self
            .base
            .db()
            .query("SELECT id, name, price FROM inventory ORDER BY name")
            .await?
            .take(0)?;
        Ok(items)
    }

    pub async fn create(&self, data: InventoryItemCreate) -> RepoResult<InventoryItem> {
        let now = Utc::now();
        let item = InventoryItem {
            id: None,
            name: data.name,
            price: data.price,
            quantity: data.quantity,
            created_at: now,
            updated_at: now,
        };

        let created: Option<InventoryItem> = self.base.db().create(TABLE).content(item).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create inventory item".to_string()))
    }
}
