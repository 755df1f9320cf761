//! Repository Module
//!
//! CRUD and transaction operations over the SurrealDB tables.

pub mod inventory;
pub mod order;
pub mod product;
pub mod promotion;

pub use inventory::InventoryRepository;
pub use order::{OrderRepository, PlacedOrder, PlacementLine};
pub use product::ProductRepository;
pub use promotion::PromotionRepository;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),

    /// Stock guard fired while placing an order; carries the product id
    #[error("Insufficient stock: {0}")]
    InsufficientStock(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

impl From<RepoError> for shared::AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(what) => shared::AppError::not_found(what),
            RepoError::Duplicate(what) => shared::AppError::already_exists(what),
            RepoError::Validation(msg) => shared::AppError::validation(msg),
            RepoError::InsufficientStock(product_id) => {
                shared::AppError::insufficient_stock(product_id)
            }
            RepoError::Database(msg) => shared::AppError::database(msg),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}
