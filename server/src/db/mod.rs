//! Database Module
//!
//! Embedded SurrealDB storage. Production opens a RocksDB-backed database
//! under the work directory; tests use the in-memory engine, which exposes
//! the same `Surreal<Db>` handle.

pub mod models;
pub mod repository;

use shared::AppError;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem, RocksDb};

const NAMESPACE: &str = "ravenhill";
const DATABASE: &str = "shop";

/// Database service — owns the embedded SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open (or create) the RocksDB-backed database at `db_path`
    pub async fn new(db_path: &str) -> Result<Self, AppError> {
        let db = Surreal::new::<RocksDb>(db_path)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

        Self::prepare(&db).await?;
        tracing::info!("Database opened at {}", db_path);

        Ok(Self { db })
    }

    /// Open an in-memory database (used by tests)
    pub async fn in_memory() -> Result<Self, AppError> {
        let db = Surreal::new::<Mem>(())
            .await
            .map_err(|e| AppError::database(format!("Failed to open in-memory database: {e}")))?;

        Self::prepare(&db).await?;

        Ok(Self { db })
    }

    async fn prepare(db: &Surreal<Db>) -> Result<(), AppError> {
        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        apply_schema(db).await
    }
}

/// Apply the table definitions and unique indexes
///
/// Idempotent: safe to run on every startup.
async fn apply_schema(db: &Surreal<Db>) -> Result<(), AppError> {
    const SCHEMA: &str = "
        DEFINE TABLE IF NOT EXISTS product SCHEMALESS;
        DEFINE INDEX IF NOT EXISTS product_pid ON TABLE product FIELDS product_id UNIQUE;

        DEFINE TABLE IF NOT EXISTS inventory SCHEMALESS;
        DEFINE INDEX IF NOT EXISTS inventory_pid ON TABLE inventory FIELDS product_id UNIQUE;

        DEFINE TABLE IF NOT EXISTS orders SCHEMALESS;
        DEFINE INDEX IF NOT EXISTS orders_oid ON TABLE orders FIELDS order_id UNIQUE;

        DEFINE TABLE IF NOT EXISTS order_item SCHEMALESS;
        DEFINE INDEX IF NOT EXISTS order_item_iid ON TABLE order_item FIELDS item_id UNIQUE;

        DEFINE TABLE IF NOT EXISTS payment SCHEMALESS;
        DEFINE INDEX IF NOT EXISTS payment_pid ON TABLE payment FIELDS payment_id UNIQUE;

        DEFINE TABLE IF NOT EXISTS promotion SCHEMALESS;
        DEFINE INDEX IF NOT EXISTS promotion_code ON TABLE promotion FIELDS code UNIQUE;

        DEFINE TABLE IF NOT EXISTS loyalty_program SCHEMALESS;
        DEFINE TABLE IF NOT EXISTS notification SCHEMALESS;
    ";

    db.query(SCHEMA)
        .await
        .map_err(|e| AppError::database(format!("Failed to apply schema: {e}")))?
        .check()
        .map_err(|e| AppError::database(format!("Schema statement failed: {e}")))?;

    Ok(())
}
