//! User Repository

use chrono::Utc;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{User, UserCreate, UserStatus};

const TABLE: &str = "user_data";

#[derive(Clone)]
pub struct UserRepository {
    base: BaseRepository,
}

impl UserRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let email_owned = email.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM user_data WHERE email = $email LIMIT 1")
            .bind(("email", email_owned))
            .await?;
        let users: Vec<User> = result.take(0)?;
        Ok(users.into_iter().next())
    }

    /// Create a new user with a hashed password
    pub async fn create(&self, data: UserCreate) -> RepoResult<User> {
        if self.find_by_email(&data.email).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Email '{}' already registered",
                data.email
            )));
        }

        let hash_pass = User::hash_password(&data.password)
            .map_err(|e| RepoError::Database(format!("Failed to hash password: {e}")))?;

        let now = Utc::now();
        let user = User {
            id: None,
            first_name: data.first_name,
            last_name: data.last_name,
            email: data.email,
            hash_pass,
            phone_number: data.phone_number,
            role: data.role,
            status: UserStatus::Active,
            last_login: None,
            created_at: now,
            updated_at: now,
        };

        let created: Option<User> = self.base.db().create(TABLE).content(user).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create user".to_string()))
    }

    /// Record a successful login
    pub async fn touch_last_login(&self, email: &str) -> RepoResult<()> {
        let email_owned = email.to_string();
        self.base
            .db()
            .query("UPDATE user_data SET last_login = time::now() WHERE email = $email")
            .bind(("email", email_owned))
            .await?;
        Ok(())
    }
}
