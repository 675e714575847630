//! Warehouse Repository

use chrono::Utc;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult, record_id};
use crate::db::models::{Warehouse, WarehouseCreate};

const TABLE: &str = "warehouses";
const USER_TABLE: &str = "user_data";

/// Reduced shape for the warehouse-id list of values
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct WarehouseLov {
    pub warehouse_id: String,
}

#[derive(Clone)]
pub struct WarehouseRepository {
    base: BaseRepository,
}

impl WarehouseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_by_warehouse_id(&self, warehouse_id: &str) -> RepoResult<Option<Warehouse>> {
        let id_owned = warehouse_id.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM warehouses WHERE warehouse_id = $warehouse_id LIMIT 1")
            .bind(("warehouse_id", id_owned))
            .await?;
        let warehouses: Vec<Warehouse> = result.take(0)?;
        Ok(warehouses.into_iter().next())
    }

    /// All business identifiers, for select inputs
    pub async fn find_lov(&self) -> RepoResult<Vec<WarehouseLov>> {
        let warehouses: Vec<WarehouseLov> = self
            .base
            .db()
            .query("SELECT warehouse_id FROM warehouses ORDER BY warehouse_id")
            .await?
            .take(0)?;
        Ok(warehouses)
    }

    pub async fn create(&self, data: WarehouseCreate) -> RepoResult<Warehouse> {
        if self.find_by_warehouse_id(&data.warehouse_id).await?.is_some() {
            return Err(RepoError::Duplicate(
                "Warehouse ID already exists.".to_string(),
            ));
        }

        let manager_id = record_id(USER_TABLE, &data.manager_id)?;

        let now = Utc::now();
        let warehouse = Warehouse {
            id: None,
            warehouse_id: data.warehouse_id,
            name: data.name,
            location: data.location,
            capacity: data.capacity,
            current_stock: data.current_stock,
            manager_id,
            contact_number: data.contact_number,
            status: data.status,
            created_at: now,
            updated_at: now,
        };

        let created: Option<Warehouse> = self.base.db().create(TABLE).content(warehouse).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create warehouse".to_string()))
    }
}
