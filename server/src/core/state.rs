use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::cart::SessionStore;
use crate::core::Config;
use crate::db::DbService;
use shared::AppError;

/// Shared application state
///
/// Cloning is cheap: the database handle and session store are both shared
/// references.
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Config,
    /// Embedded database (SurrealDB)
    pub db: Surreal<Db>,
    /// In-memory cart sessions
    pub sessions: Arc<SessionStore>,
}

impl ServerState {
    pub fn new(config: Config, db: Surreal<Db>) -> Self {
        Self {
            config,
            db,
            sessions: Arc::new(SessionStore::new()),
        }
    }

    /// Initialize state for a real server run
    ///
    /// Ensures the work directory layout exists and opens the RocksDB
    /// database at `work_dir/database/ravenhill.db`.
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        config
            .ensure_work_dir_structure()
            .map_err(|e| AppError::internal(format!("Failed to create work directory: {e}")))?;

        let db_path = config.database_dir().join("ravenhill.db");
        let db_service = DbService::new(&db_path.to_string_lossy()).await?;

        Ok(Self::new(config.clone(), db_service.db))
    }

    /// Initialize state on the in-memory engine (tests)
    pub async fn in_memory(config: Config) -> Result<Self, AppError> {
        let db_service = DbService::in_memory().await?;
        Ok(Self::new(config, db_service.db))
    }

    pub fn get_db(&self) -> Surreal<Db> {
        self.db.clone()
    }
}
