//! Promotion Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{Promotion, PromotionCreate};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

#[derive(Clone)]
pub struct PromotionRepository {
    base: BaseRepository,
}

impl PromotionRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find an active promotion whose validity window contains `date`
    ///
    /// `date` is an ISO `YYYY-MM-DD` string; the window bounds are inclusive.
    pub async fn find_active(&self, code: &str, date: &str) -> RepoResult<Option<Promotion>> {
        let promos: Vec<Promotion> = self
            .base
            .db()
            .query(
                "SELECT * FROM promotion \
                 WHERE code = $code AND active = true \
                 AND starts_on <= $date AND ends_on >= $date",
            )
            .bind(("code", code.to_string()))
            .bind(("date", date.to_string()))
            .await?
            .take(0)?;
        Ok(promos.into_iter().next())
    }

    /// Find a promotion by code regardless of window or active flag
    pub async fn find_by_code(&self, code: &str) -> RepoResult<Option<Promotion>> {
        let promos: Vec<Promotion> = self
            .base
            .db()
            .query("SELECT * FROM promotion WHERE code = $code")
            .bind(("code", code.to_string()))
            .await?
            .take(0)?;
        Ok(promos.into_iter().next())
    }

    /// Create a promotion
    pub async fn create(&self, data: PromotionCreate) -> RepoResult<Promotion> {
        if data.percent_off <= 0.0 || data.percent_off > 100.0 {
            return Err(RepoError::Validation(
                "percent_off must be between 0 and 100".into(),
            ));
        }

        let promotion = Promotion {
            code: data.code,
            percent_off: data.percent_off,
            starts_on: data.starts_on,
            ends_on: data.ends_on,
            active: data.active,
        };

        let created: Option<Promotion> = self
            .base
            .db()
            .create("promotion")
            .content(promotion)
            .await
            .map_err(|e| {
                let msg = e.to_string();
                if msg.contains("promotion_code") {
                    RepoError::Duplicate("promotion code".into())
                } else {
                    RepoError::Database(msg)
                }
            })?;
        created.ok_or_else(|| RepoError::Database("Failed to create promotion".to_string()))
    }
}
