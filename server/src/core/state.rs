use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::auth::JwtService;
use crate::core::Config;
use crate::db::DbService;
use crate::db::sequence::HumanIdGenerator;
use crate::notify::{LogNotifier, Notifier, NotifyService, spawn_dispatcher};
use crate::utils::AppResult;

/// Shared server state, cloned per request.
///
/// All members are cheap to clone (`Arc` or channel handles); the state is
/// the single composition point for storage, auth, and notifications.
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Config,
    /// Embedded database handle
    pub db: Surreal<Db>,
    /// Human-facing numeric ID generator
    pub id_generator: HumanIdGenerator,
    /// JWT token service
    pub jwt_service: Arc<JwtService>,
    /// Outbound notification queue
    pub notify: NotifyService,
}

impl ServerState {
    /// Initialize state for production: on-disk database, configured JWT
    /// service, and the default (logging) notifier.
    pub async fn initialize(config: &Config) -> AppResult<Self> {
        std::fs::create_dir_all(&config.work_dir).map_err(|e| {
            crate::utils::AppError::internal(format!("Failed to create work directory: {e}"))
        })?;

        let db_service = DbService::new(&config.database_path()).await?;
        Ok(Self::assemble(config.clone(), db_service, Arc::new(LogNotifier)))
    }

    /// State over an in-memory database with a caller-supplied notifier.
    /// Used by integration tests.
    pub async fn for_testing(config: Config, notifier: Arc<dyn Notifier>) -> AppResult<Self> {
        let db_service = DbService::memory().await?;
        Ok(Self::assemble(config, db_service, notifier))
    }

    fn assemble(config: Config, db_service: DbService, notifier: Arc<dyn Notifier>) -> Self {
        let db = db_service.db;
        let id_generator = HumanIdGenerator::new(db.clone());
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        let notify = spawn_dispatcher(notifier, config.notify_buffer);

        Self {
            config,
            db,
            id_generator,
            jwt_service,
            notify,
        }
    }

    pub fn get_db(&self) -> Surreal<Db> {
        self.db.clone()
    }
}
