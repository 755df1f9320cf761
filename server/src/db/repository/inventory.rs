//! Inventory Repository
//!
//! All stock movements are single conditional UPDATE statements, so two
//! concurrent reservations can never take a level below zero.

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::InventoryRecord;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

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

    /// Atomically take `quantity` units if enough stock remains
    ///
    /// Returns `true` when the reservation succeeded. The WHERE guard is the
    /// only oversell arbiter; on `false` the level is untouched.
    pub async fn try_reserve(&self, product_id: &str, quantity: i64) -> RepoResult<bool> {
        if quantity <= 0 {
            return Err(RepoError::Validation("quantity must be positive".into()));
        }
        let updated: Vec<InventoryRecord> = self
            .base
            .db()
            .query(
                "UPDATE inventory SET stock_level -= $qty \
                 WHERE product_id = $pid AND stock_level >= $qty",
            )
            .bind(("pid", product_id.to_string()))
            .bind(("qty", quantity))
            .await?
            .take(0)?;
        Ok(!updated.is_empty())
    }

    /// Return `quantity` units to stock (cart removal, quantity decrease)
    pub async fn release(&self, product_id: &str, quantity: i64) -> RepoResult<()> {
        if quantity <= 0 {
            return Err(RepoError::Validation("quantity must be positive".into()));
        }
        let updated: Vec<InventoryRecord> = self
            .base
            .db()
            .query("UPDATE inventory SET stock_level += $qty WHERE product_id = $pid")
            .bind(("pid", product_id.to_string()))
            .bind(("qty", quantity))
            .await?
            .take(0)?;
        if updated.is_empty() {
            return Err(RepoError::NotFound(format!("inventory for {product_id}")));
        }
        Ok(())
    }

    /// Current stock level, or None if the product has no inventory row
    pub async fn stock_level(&self, product_id: &str) -> RepoResult<Option<i64>> {
        let records: Vec<InventoryRecord> = self
            .base
            .db()
            .query("SELECT * FROM inventory WHERE product_id = $pid")
            .bind(("pid", product_id.to_string()))
            .await?
            .take(0)?;
        Ok(records.into_iter().next().map(|r| r.stock_level))
    }

    /// Overwrite the stock level (restock / correction)
    pub async fn set_level(&self, product_id: &str, level: i64) -> RepoResult<()> {
        if level < 0 {
            return Err(RepoError::Validation(
                "stock level cannot be negative".into(),
            ));
        }
        let updated: Vec<InventoryRecord> = self
            .base
            .db()
            .query("UPDATE inventory SET stock_level = $level WHERE product_id = $pid")
            .bind(("pid", product_id.to_string()))
            .bind(("level", level))
            .await?
            .take(0)?;
        if updated.is_empty() {
            return Err(RepoError::NotFound(format!("inventory for {product_id}")));
        }
        Ok(())
    }

    /// Products at or below their reorder threshold
    pub async fn find_below_threshold(&self) -> RepoResult<Vec<InventoryRecord>> {
        let records: Vec<InventoryRecord> = self
            .base
            .db()
            .query(
                "SELECT * FROM inventory WHERE stock_level <= reorder_threshold \
                 ORDER BY stock_level",
            )
            .await?
            .take(0)?;
        Ok(records)
    }
}
