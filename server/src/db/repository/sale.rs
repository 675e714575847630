//! Sale Repository

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::Sale;

const TABLE: &str = "sales_data";

#[derive(Clone)]
pub struct SaleRepository {
    base: BaseRepository,
}

impl SaleRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn create(&self, sale: Sale) -> RepoResult<Sale> {
        let created: Option<Sale> = self.base.db().create(TABLE).content(sale).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create sale".to_string()))
    }
}
