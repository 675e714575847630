//! Customer Repository

use chrono::Utc;
use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult, record_id};
use crate::db::models::{Customer, CustomerCreate, CustomerUpdate};

const TABLE: &str = "customer_data";

/// Reduced shape for the order-form customer list
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct CustomerLov {
    pub id: RecordId,
    pub customer_name: String,
    pub email: String,
    pub contact_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

#[derive(Clone)]
pub struct CustomerRepository {
    base: BaseRepository,
}

impl CustomerRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Customer>> {
        let rid = record_id(TABLE, id)?;
        let customer: Option<Customer> = self.base.db().select(rid).await?;
        Ok(customer)
    }

    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<Customer>> {
        let email_owned = email.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM customer_data WHERE email = $email LIMIT 1")
            .bind(("email", email_owned))
            .await?;
        let customers: Vec<Customer> = result.take(0)?;
        Ok(customers.into_iter().next())
    }

    /// Reduced customer list for the order form
    pub async fn find_lov(&self) -> RepoResult<Vec<CustomerLov>> {
        let customers: Vec<CustomerLov> = self
            .base
            .db()
            .query(
                "SELECT id, customer_name, email, contact_number, address \
                 FROM customer_data ORDER BY customer_name",
            )
            .await?
            .take(0)?;
        Ok(customers)
    }

    pub async fn create(&self, data: CustomerCreate) -> RepoResult<Customer> {
        if self.find_by_email(&data.email).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Customer with email '{}' already exists",
                data.email
            )));
        }

        let now = Utc::now();
        let customer = Customer {
            id: None,
            customer_name: data.customer_name,
            contact_number: data.contact_number,
            email: data.email,
            address: data.address,
            city: data.city,
            state: data.state,
            zip_code: data.zip_code,
            country: data.country,
            company_name: data.company_name,
            customer_type: data.customer_type,
            credit_limit: data.credit_limit,
            balance_due: data.balance_due,
            notes: data.notes,
            created_at: now,
            updated_at: now,
        };

        let created: Option<Customer> = self.base.db().create(TABLE).content(customer).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create customer".to_string()))
    }

    pub async fn update(&self, id: &str, data: CustomerUpdate) -> RepoResult<Customer> {
        let rid = record_id(TABLE, id)?;
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Customer {id} not found")))?;

        // Moving to an email another customer already holds is a conflict
        if let Some(ref new_email) = data.email
            && new_email != &existing.email
            && self.find_by_email(new_email).await?.is_some()
        {
            return Err(RepoError::Duplicate(format!(
                "Customer with email '{new_email}' already exists"
            )));
        }

        let mut patch = serde_json::to_value(&data)
            .map_err(|e| RepoError::Database(e.to_string()))?;
        patch["updated_at"] = serde_json::json!(Utc::now());

        self.base
            .db()
            .query("UPDATE $record MERGE $data")
            .bind(("record", rid.clone()))
            .bind(("data", patch))
            .await?;

        let updated: Option<Customer> = self.base.db().select(rid).await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Customer {id} not found")))
    }

    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let rid = record_id(TABLE, id)?;
        let deleted: Option<Customer> = self.base.db().delete(rid).await?;
        Ok(deleted.is_some())
    }
}
