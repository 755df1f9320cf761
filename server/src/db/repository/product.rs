//! Product Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{InventoryRecord, Product, ProductCreate};
use shared::util::{now_millis, prefixed_id};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const PRODUCT_TABLE: &str = "product";

#[derive(Clone)]
pub struct ProductRepository {
    base: BaseRepository,
}

impl ProductRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all products offered for sale, newest first
    pub async fn find_all_available(&self) -> RepoResult<Vec<Product>> {
        let products: Vec<Product> = self
            .base
            .db()
            .query("SELECT * FROM product WHERE available = true ORDER BY created_at DESC")
            .await?
            .take(0)?;
        Ok(products)
    }

    /// Find a product by its prefixed id
    pub async fn find_by_id(&self, product_id: &str) -> RepoResult<Option<Product>> {
        let products: Vec<Product> = self
            .base
            .db()
            .query("SELECT * FROM product WHERE product_id = $pid")
            .bind(("pid", product_id.to_string()))
            .await?
            .take(0)?;
        Ok(products.into_iter().next())
    }

    /// Create a product together with its inventory record
    pub async fn create(&self, data: ProductCreate) -> RepoResult<Product> {
        if data.price < 0.0 {
            return Err(RepoError::Validation("price cannot be negative".into()));
        }
        if data.stock_level < 0 {
            return Err(RepoError::Validation(
                "stock_level cannot be negative".into(),
            ));
        }

        let product = Product {
            product_id: prefixed_id("PRD"),
            name: data.name,
            description: data.description,
            price: data.price,
            allergens: data.allergens,
            image_url: data.image_url,
            available: true,
            created_at: now_millis(),
        };

        let created: Option<Product> = self
            .base
            .db()
            .create(PRODUCT_TABLE)
            .content(product)
            .await?;
        let created =
            created.ok_or_else(|| RepoError::Database("Failed to create product".to_string()))?;

        let inventory = InventoryRecord {
            product_id: created.product_id.clone(),
            stock_level: data.stock_level,
            reorder_threshold: data.reorder_threshold,
        };
        let _: Option<InventoryRecord> = self
            .base
            .db()
            .create("inventory")
            .content(inventory)
            .await?;

        Ok(created)
    }
}
