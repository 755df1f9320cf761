//! Order placement
//!
//! All request validation happens before the first write. The order, its
//! items, the stock decrements and the payment then commit atomically via
//! [`OrderRepository::place`]. Loyalty points and the confirmation
//! notification run after the commit and are deliberately best-effort.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::cart::session::{SessionStore, ShippingMethod};
use crate::checkout::totals;
use crate::db::models::{LoyaltyAward, Notification, OrderRow, PaymentRow};
use crate::db::repository::{OrderRepository, PlacementLine, ProductRepository, RepoError};
use crate::utils::validation::{
    MAX_ADDRESS_LEN, MAX_NAME_LEN, MAX_NOTES_LEN, validate_card_details, validate_optional_text,
    validate_quantity, validate_required_text,
};
use shared::util::{now_millis, prefixed_id};
use shared::{AppError, AppResult, ErrorCode};

/// How the customer pays
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum PaymentDetails {
    /// Settled when the order is handed over
    Cash,
    /// Charged now; details are validated, never stored
    Card {
        card_number: String,
        expiry: String,
        cvv: String,
    },
}

impl PaymentDetails {
    fn method_str(&self) -> &'static str {
        match self {
            Self::Cash => "cash",
            Self::Card { .. } => "card",
        }
    }
}

/// One line of a till order
#[derive(Debug, Clone, Deserialize)]
pub struct PosLine {
    pub product_id: String,
    pub quantity: i64,
    #[serde(default)]
    pub notes: Option<String>,
}

/// What the customer gets back after placing an order
#[derive(Debug, Clone, Serialize)]
pub struct OrderReceipt {
    pub order_id: String,
    pub payment_id: String,
    pub payment_status: String,
    pub subtotal: f64,
    pub shipping_fee: f64,
    pub discount: f64,
    pub total: f64,
    pub loyalty_points: i64,
}

/// Builds the customisations snapshot stored on an order item,
/// e.g. "oat milk; Allergens to avoid: nuts, soy"
fn customisations_text(notes: &Option<String>, allergens: &[String]) -> Option<String> {
    let allergen_part = if allergens.is_empty() {
        None
    } else {
        Some(format!("Allergens to avoid: {}", allergens.join(", ")))
    };
    match (notes, allergen_part) {
        (Some(n), Some(a)) => Some(format!("{n}; {a}")),
        (Some(n), None) => Some(n.clone()),
        (None, Some(a)) => Some(a),
        (None, None) => None,
    }
}

#[derive(Clone)]
pub struct PlacementService {
    products: ProductRepository,
    orders: OrderRepository,
    sessions: Arc<SessionStore>,
    delivery_fee: f64,
    loyalty_earn_divisor: i64,
}

impl PlacementService {
    pub fn new(
        db: Surreal<Db>,
        sessions: Arc<SessionStore>,
        delivery_fee: f64,
        loyalty_earn_divisor: i64,
    ) -> Self {
        Self {
            products: ProductRepository::new(db.clone()),
            orders: OrderRepository::new(db),
            sessions,
            delivery_fee,
            loyalty_earn_divisor,
        }
    }

    /// Place the online order held in a cart session
    ///
    /// On success the session is dropped; every cart reservation has been
    /// consumed by the transaction. On failure the cart and its
    /// reservations are left exactly as they were.
    pub async fn place_online(
        &self,
        session_id: &str,
        customer_name: &str,
        address: Option<String>,
        payment: PaymentDetails,
    ) -> AppResult<OrderReceipt> {
        validate_required_text("customer_name", customer_name, MAX_NAME_LEN)?;
        if let PaymentDetails::Card {
            card_number,
            expiry,
            cvv,
        } = &payment
        {
            validate_card_details(card_number, expiry, cvv)?;
        }

        let cart = self.sessions.get_or_create(session_id);
        let session = cart.lock().await;

        if session.lines.is_empty() {
            return Err(AppError::new(ErrorCode::CartEmpty));
        }

        let address = match session.shipping {
            ShippingMethod::Delivery => {
                let addr = address.unwrap_or_default();
                validate_required_text("address", &addr, MAX_ADDRESS_LEN)
                    .map_err(|_| AppError::new(ErrorCode::AddressRequired))?;
                Some(addr.trim().to_string())
            }
            ShippingMethod::Pickup => None,
        };

        // Re-read prices so a menu change mid-session never leaks a stale
        // price into the order
        let mut lines = Vec::with_capacity(session.lines.len());
        let order_id = prefixed_id("ORD");
        for line in &session.lines {
            let product = self
                .products
                .find_by_id(&line.product_id)
                .await
                .map_err(AppError::from)?
                .ok_or_else(|| AppError::product_not_found(&line.product_id))?;
            if !product.available {
                return Err(AppError::new(ErrorCode::ProductUnavailable)
                    .with_detail("product_id", product.product_id));
            }
            lines.push(PlacementLine {
                item_id: prefixed_id("OI"),
                order_id: order_id.clone(),
                product_id: product.product_id,
                name: product.name,
                price: product.price,
                quantity: line.quantity,
                // The cart reserved these units; the transaction credits
                // them back before its own guarded decrement
                release: line.quantity,
                customisations: customisations_text(&line.notes, &line.allergens_avoided),
            });
        }

        let fresh: Vec<crate::cart::CartLine> = session
            .lines
            .iter()
            .zip(&lines)
            .map(|(cart_line, placed)| crate::cart::CartLine {
                price: placed.price,
                ..cart_line.clone()
            })
            .collect();
        let t = totals::compute(
            &fresh,
            session.shipping,
            totals::dec(self.delivery_fee),
            session.promo.as_ref().map(|p| totals::dec(p.percent_off)),
        );

        let payment_status = match payment {
            PaymentDetails::Card { .. } => "paid",
            PaymentDetails::Cash => "pending",
        };
        let order = OrderRow {
            order_id: order_id.clone(),
            customer_name: customer_name.trim().to_string(),
            order_type: "online".into(),
            status: "pending".into(),
            shipping_method: Some(session.shipping.as_str().into()),
            address,
            subtotal: totals::money(t.subtotal),
            shipping_fee: totals::money(t.shipping),
            discount: totals::money(t.discount),
            total: totals::money(t.total),
            promo_code: session.promo.as_ref().map(|p| p.code.clone()),
            cashier_id: None,
            created_at: now_millis(),
        };
        let payment_row = PaymentRow {
            payment_id: prefixed_id("PAY"),
            order_id: order_id.clone(),
            method: payment.method_str().into(),
            status: payment_status.into(),
            amount: totals::money(t.total),
            created_at: now_millis(),
        };

        let receipt = self
            .commit(order, lines, payment_row, Some(customer_name.trim()))
            .await?;

        drop(session);
        self.sessions.remove(session_id);

        Ok(receipt)
    }

    /// Place an in-store order at the till
    ///
    /// No cart is involved, so nothing was reserved and the transaction's
    /// guarded decrement is the only stock movement.
    pub async fn place_pos(
        &self,
        cashier_id: &str,
        customer_name: Option<String>,
        pos_lines: Vec<PosLine>,
        pay_with_card: bool,
    ) -> AppResult<OrderReceipt> {
        if cashier_id.trim().is_empty() {
            return Err(AppError::new(ErrorCode::CashierRequired));
        }
        if pos_lines.is_empty() {
            return Err(AppError::new(ErrorCode::OrderEmpty));
        }

        let order_id = prefixed_id("ORD");
        let mut lines = Vec::with_capacity(pos_lines.len());
        let mut cart_lines = Vec::with_capacity(pos_lines.len());
        for pos_line in &pos_lines {
            validate_required_text("product_id", &pos_line.product_id, MAX_NAME_LEN)?;
            validate_quantity(pos_line.quantity)?;
            validate_optional_text("notes", pos_line.notes.as_deref(), MAX_NOTES_LEN)?;
            let product = self
                .products
                .find_by_id(&pos_line.product_id)
                .await
                .map_err(AppError::from)?
                .ok_or_else(|| AppError::product_not_found(&pos_line.product_id))?;
            if !product.available {
                return Err(AppError::new(ErrorCode::ProductUnavailable)
                    .with_detail("product_id", product.product_id));
            }
            cart_lines.push(crate::cart::CartLine {
                product_id: product.product_id.clone(),
                name: product.name.clone(),
                price: product.price,
                quantity: pos_line.quantity,
                notes: pos_line.notes.clone(),
                allergens_avoided: vec![],
            });
            lines.push(PlacementLine {
                item_id: prefixed_id("OI"),
                order_id: order_id.clone(),
                product_id: product.product_id,
                name: product.name,
                price: product.price,
                quantity: pos_line.quantity,
                release: 0,
                customisations: customisations_text(&pos_line.notes, &[]),
            });
        }

        let t = totals::compute(
            &cart_lines,
            ShippingMethod::Pickup,
            totals::dec(self.delivery_fee),
            None,
        );

        let customer = customer_name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());
        let order = OrderRow {
            order_id: order_id.clone(),
            customer_name: customer.clone().unwrap_or_else(|| "Walk-in".into()),
            order_type: "in_store".into(),
            status: "completed".into(),
            shipping_method: None,
            address: None,
            subtotal: totals::money(t.subtotal),
            shipping_fee: 0.0,
            discount: 0.0,
            total: totals::money(t.total),
            promo_code: None,
            cashier_id: Some(cashier_id.trim().to_string()),
            created_at: now_millis(),
        };
        let payment_row = PaymentRow {
            payment_id: prefixed_id("PAY"),
            order_id: order_id.clone(),
            method: if pay_with_card { "card" } else { "cash" }.into(),
            status: "completed".into(),
            amount: totals::money(t.total),
            created_at: now_millis(),
        };

        self.commit(order, lines, payment_row, customer.as_deref())
            .await
    }

    async fn commit(
        &self,
        order: OrderRow,
        lines: Vec<PlacementLine>,
        payment: PaymentRow,
        loyalty_customer: Option<&str>,
    ) -> AppResult<OrderReceipt> {
        let order_id = order.order_id.clone();
        let receipt = OrderReceipt {
            order_id: order_id.clone(),
            payment_id: payment.payment_id.clone(),
            payment_status: payment.status.clone(),
            subtotal: order.subtotal,
            shipping_fee: order.shipping_fee,
            discount: order.discount,
            total: order.total,
            loyalty_points: 0,
        };
        let total = order.total;

        self.orders
            .place(order, lines, payment)
            .await
            .map_err(|e| match e {
                RepoError::InsufficientStock(pid) => AppError::insufficient_stock(pid),
                other => AppError::from(other),
            })?;

        tracing::info!(order_id = %order_id, total = total, "Order placed");

        let points = self.award_loyalty(&order_id, loyalty_customer, total).await;

        Ok(OrderReceipt {
            loyalty_points: points,
            ..receipt
        })
    }

    /// Best-effort post-commit side effects: the confirmation notification
    /// and the loyalty award are independent of each other, and the order
    /// stands even when either insert fails
    async fn award_loyalty(
        &self,
        order_id: &str,
        customer: Option<&str>,
        total: f64,
    ) -> i64 {
        let Some(customer) = customer else { return 0 };

        // The confirmation goes out regardless of how small the order was
        let notification = Notification {
            notification_id: prefixed_id("NOTIF"),
            recipient: customer.to_string(),
            message: format!("Your order {order_id} has been placed"),
            read: false,
            created_at: now_millis(),
        };
        if let Err(e) = self.orders.insert_notification(notification).await {
            tracing::warn!(order_id = %order_id, error = %e, "Notification insert failed");
        }

        let points = (total / self.loyalty_earn_divisor as f64).floor() as i64;
        if points <= 0 {
            return 0;
        }
        let award = LoyaltyAward {
            award_id: prefixed_id("LOY"),
            customer_name: customer.to_string(),
            order_id: order_id.to_string(),
            points,
            created_at: now_millis(),
        };
        if let Err(e) = self.orders.insert_loyalty(award).await {
            tracing::warn!(order_id = %order_id, error = %e, "Loyalty award failed");
            return 0;
        }

        points
    }
}
