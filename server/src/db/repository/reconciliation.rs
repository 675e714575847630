//! Reconciliation Repository

use chrono::Utc;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{Reconciliation, ReconciliationCreate};

const TABLE: &str = "reconciliations";

#[derive(Clone)]
pub struct ReconciliationRepository {
    base: BaseRepository,
}

impl ReconciliationRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn create(
        &self,
        data: ReconciliationCreate,
        created_by: &str,
    ) -> RepoResult<Reconciliation> {
        if !(1..=12).contains(&data.recon_month) {
            return Err(RepoError::Validation(
                "Reconciliation month must be between 1 and 12.".to_string(),
            ));
        }

        let now = Utc::now();
        let reconciliation = Reconciliation {
            id: None,
            recon_month: data.recon_month,
            recon_year: data.recon_year,
            total_income: data.total_income,
            total_expenses: data.total_expenses,
            total_reconciled: data.total_reconciled,
            created_by: created_by.to_string(),
            updated_by: created_by.to_string(),
            created_at: now,
            updated_at: now,
        };

        let created: Option<Reconciliation> =
            self.base.db().create(TABLE).content(reconciliation).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create reconciliation".to_string()))
    }
}
