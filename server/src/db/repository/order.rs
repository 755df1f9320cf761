//! Order Repository
//!
//! Order placement is a single multi-statement SurrealDB transaction: the
//! order row, every item row, the stock decrements and the payment row all
//! commit together or not at all. A THROW inside the transaction rolls back
//! every statement, including decrements that already succeeded for earlier
//! lines.

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{LoyaltyAward, Notification, OrderItemRow, OrderRow, PaymentRow};
use serde::Serialize;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const THROW_MARKER: &str = "insufficient stock: ";

/// One order line as fed into the placement transaction
///
/// `release` is the number of units the web cart already reserved for this
/// line; the transaction credits it back before applying the guarded
/// decrement, so the net effect is exactly one decrement per unit sold.
/// Point-of-sale orders reserve nothing and pass 0.
#[derive(Debug, Clone, Serialize)]
pub struct PlacementLine {
    pub item_id: String,
    pub order_id: String,
    pub product_id: String,
    pub name: String,
    pub price: f64,
    pub quantity: i64,
    pub release: i64,
    pub customisations: Option<String>,
}

/// A fully loaded order: header, lines and payment
#[derive(Debug, Clone, Serialize)]
pub struct PlacedOrder {
    #[serde(flatten)]
    pub order: OrderRow,
    pub items: Vec<OrderItemRow>,
    pub payment: Option<PaymentRow>,
}

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Atomically persist an order with its items and payment
    ///
    /// For each line the reservation (if any) is credited back, then a
    /// guarded decrement takes the sold quantity. If any guard finds too
    /// little stock the whole transaction is thrown away and
    /// [`RepoError::InsufficientStock`] names the offending product.
    pub async fn place(
        &self,
        order: OrderRow,
        lines: Vec<PlacementLine>,
        payment: PaymentRow,
    ) -> RepoResult<()> {
        if lines.is_empty() {
            return Err(RepoError::Validation("order has no lines".into()));
        }

        let result = self
            .base
            .db()
            .query(
                "BEGIN TRANSACTION;
                 CREATE orders CONTENT $order;
                 FOR $line IN $lines {
                     UPDATE inventory SET stock_level += $line.release
                         WHERE product_id = $line.product_id;
                     LET $dec = (UPDATE inventory SET stock_level -= $line.quantity
                         WHERE product_id = $line.product_id
                         AND stock_level >= $line.quantity);
                     IF array::len($dec) == 0 {
                         THROW 'insufficient stock: ' + $line.product_id;
                     };
                     CREATE order_item CONTENT {
                         item_id: $line.item_id,
                         order_id: $line.order_id,
                         product_id: $line.product_id,
                         name: $line.name,
                         price: $line.price,
                         quantity: $line.quantity,
                         customisations: $line.customisations
                     };
                 };
                 CREATE payment CONTENT $payment;
                 COMMIT TRANSACTION;",
            )
            .bind(("order", order))
            .bind(("lines", lines))
            .bind(("payment", payment))
            .await?
            .check();

        match result {
            Ok(_) => Ok(()),
            Err(e) => {
                let msg = e.to_string();
                if let Some(pos) = msg.find(THROW_MARKER) {
                    let product_id = msg[pos + THROW_MARKER.len()..]
                        .split_whitespace()
                        .next()
                        .unwrap_or("")
                        .trim_matches(|c: char| !c.is_ascii_alphanumeric() && c != '-')
                        .to_string();
                    Err(RepoError::InsufficientStock(product_id))
                } else {
                    Err(RepoError::Database(msg))
                }
            }
        }
    }

    /// Orders newest first, paginated
    pub async fn find_all(&self, limit: i64, start: i64) -> RepoResult<Vec<OrderRow>> {
        let orders: Vec<OrderRow> = self
            .base
            .db()
            .query("SELECT * FROM orders ORDER BY created_at DESC LIMIT $limit START $start")
            .bind(("limit", limit.clamp(1, 200)))
            .bind(("start", start.max(0)))
            .await?
            .take(0)?;
        Ok(orders)
    }

    /// Find an order header by its prefixed id
    pub async fn find_by_id(&self, order_id: &str) -> RepoResult<Option<OrderRow>> {
        let orders: Vec<OrderRow> = self
            .base
            .db()
            .query("SELECT * FROM orders WHERE order_id = $oid")
            .bind(("oid", order_id.to_string()))
            .await?
            .take(0)?;
        Ok(orders.into_iter().next())
    }

    /// Load an order with its items and payment
    pub async fn find_full(&self, order_id: &str) -> RepoResult<Option<PlacedOrder>> {
        let Some(order) = self.find_by_id(order_id).await? else {
            return Ok(None);
        };

        let items: Vec<OrderItemRow> = self
            .base
            .db()
            .query("SELECT * FROM order_item WHERE order_id = $oid")
            .bind(("oid", order_id.to_string()))
            .await?
            .take(0)?;

        let payments: Vec<PaymentRow> = self
            .base
            .db()
            .query("SELECT * FROM payment WHERE order_id = $oid")
            .bind(("oid", order_id.to_string()))
            .await?
            .take(0)?;

        Ok(Some(PlacedOrder {
            order,
            items,
            payment: payments.into_iter().next(),
        }))
    }

    /// Record a loyalty award for a placed order
    pub async fn insert_loyalty(&self, award: LoyaltyAward) -> RepoResult<()> {
        let _: Option<LoyaltyAward> = self
            .base
            .db()
            .create("loyalty_program")
            .content(award)
            .await?;
        Ok(())
    }

    /// Record a customer notification
    pub async fn insert_notification(&self, notification: Notification) -> RepoResult<()> {
        let _: Option<Notification> = self
            .base
            .db()
            .create("notification")
            .content(notification)
            .await?;
        Ok(())
    }

    /// Notifications for a recipient, newest first
    pub async fn find_notifications(&self, recipient: &str) -> RepoResult<Vec<Notification>> {
        let notifications: Vec<Notification> = self
            .base
            .db()
            .query(
                "SELECT * FROM notification WHERE recipient = $who ORDER BY created_at DESC",
            )
            .bind(("who", recipient.to_string()))
            .await?
            .take(0)?;
        Ok(notifications)
    }

    /// Total loyalty points accumulated by a customer
    pub async fn loyalty_balance(&self, customer_name: &str) -> RepoResult<i64> {
        #[derive(serde::Deserialize)]
        struct Balance {
            total: Option<i64>,
        }
        let mut res = self
            .base
            .db()
            .query(
                "SELECT math::sum(points) AS total FROM loyalty_program \
                 WHERE customer_name = $who GROUP ALL",
            )
            .bind(("who", customer_name.to_string()))
            .await?;
        let balances: Vec<Balance> = res.take(0)?;
        Ok(balances
            .into_iter()
            .next()
            .and_then(|b| b.total)
            .unwrap_or(0))
    }
}
