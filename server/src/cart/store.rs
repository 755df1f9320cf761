//! Cart operations
//!
//! Stock is reserved the moment an item enters a cart: every add or
//! quantity increase runs a guarded decrement against the inventory table,
//! and removals credit the units back. Checkout later consumes the
//! reservation inside the placement transaction.

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Serialize;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::cart::session::{
    AppliedPromo, CartLine, CartSession, SessionStore, ShippingMethod, normalize_allergens,
    normalize_notes,
};
use crate::checkout::totals;
use crate::db::repository::{InventoryRepository, ProductRepository, PromotionRepository};
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTES_LEN, validate_optional_text, validate_quantity,
    validate_required_text,
};
use shared::{AppError, AppResult, ErrorCode};

/// Snapshot of a cart with its computed totals
#[derive(Debug, Clone, Serialize)]
pub struct CartView {
    pub lines: Vec<CartLine>,
    pub wishlist: Vec<String>,
    pub shipping_method: ShippingMethod,
    pub promo: Option<AppliedPromo>,
    pub subtotal: f64,
    pub shipping_fee: f64,
    pub discount: f64,
    pub total: f64,
}

/// Cart service: session mutations plus the inventory ledger calls
#[derive(Clone)]
pub struct CartService {
    products: ProductRepository,
    inventory: InventoryRepository,
    promotions: PromotionRepository,
    sessions: Arc<SessionStore>,
    delivery_fee: Decimal,
}

impl CartService {
    pub fn new(db: Surreal<Db>, sessions: Arc<SessionStore>, delivery_fee: f64) -> Self {
        Self {
            products: ProductRepository::new(db.clone()),
            inventory: InventoryRepository::new(db.clone()),
            promotions: PromotionRepository::new(db),
            sessions,
            delivery_fee: totals::dec(delivery_fee),
        }
    }

    fn build_view(&self, session: &CartSession) -> CartView {
        let t = totals::compute(
            &session.lines,
            session.shipping,
            self.delivery_fee,
            session.promo.as_ref().map(|p| totals::dec(p.percent_off)),
        );
        CartView {
            lines: session.lines.clone(),
            wishlist: session.wishlist.clone(),
            shipping_method: session.shipping,
            promo: session.promo.clone(),
            subtotal: totals::money(t.subtotal),
            shipping_fee: totals::money(t.shipping),
            discount: totals::money(t.discount),
            total: totals::money(t.total),
        }
    }

    /// Current cart contents and totals
    pub async fn view(&self, session_id: &str) -> CartView {
        let cart = self.sessions.get_or_create(session_id);
        let session = cart.lock().await;
        self.build_view(&session)
    }

    /// Add an item, merging into an existing line when product, notes and
    /// avoided allergens all match
    pub async fn add_item(
        &self,
        session_id: &str,
        product_id: &str,
        quantity: i64,
        notes: Option<String>,
        allergens_avoided: Vec<String>,
    ) -> AppResult<CartView> {
        validate_required_text("product_id", product_id, MAX_NAME_LEN)?;
        validate_quantity(quantity)?;
        validate_optional_text("notes", notes.as_deref(), MAX_NOTES_LEN)?;
        let notes = normalize_notes(notes);
        let allergens = normalize_allergens(allergens_avoided);

        let product = self
            .products
            .find_by_id(product_id)
            .await
            .map_err(AppError::from)?
            .ok_or_else(|| AppError::product_not_found(product_id))?;
        if !product.available {
            return Err(AppError::new(ErrorCode::ProductUnavailable)
                .with_detail("product_id", product_id));
        }

        let cart = self.sessions.get_or_create(session_id);
        let mut session = cart.lock().await;

        // Reserve while holding the session lock so two requests on the
        // same session cannot interleave their reservations
        if !self
            .inventory
            .try_reserve(product_id, quantity)
            .await
            .map_err(AppError::from)?
        {
            let available = self
                .inventory
                .stock_level(product_id)
                .await
                .map_err(AppError::from)?
                .unwrap_or(0);
            return Err(AppError::out_of_stock(available).with_detail("product_id", product_id));
        }

        match session
            .lines
            .iter_mut()
            .find(|l| l.matches(product_id, &notes, &allergens))
        {
            Some(line) => line.quantity += quantity,
            None => session.lines.push(CartLine {
                product_id: product.product_id,
                name: product.name,
                price: product.price,
                quantity,
                notes,
                allergens_avoided: allergens,
            }),
        }

        Ok(self.build_view(&session))
    }

    /// Set a line's quantity; the stock delta is applied atomically and a
    /// quantity of zero removes the line
    pub async fn update_quantity(
        &self,
        session_id: &str,
        index: usize,
        quantity: i64,
    ) -> AppResult<CartView> {
        if quantity == 0 {
            return self.remove_item(session_id, index).await;
        }
        validate_quantity(quantity)?;

        let cart = self.sessions.get_or_create(session_id);
        let mut session = cart.lock().await;

        let line = session
            .lines
            .get(index)
            .ok_or_else(|| AppError::new(ErrorCode::CartLineNotFound).with_detail("index", index as i64))?
            .clone();

        let delta = quantity - line.quantity;
        if delta > 0 {
            if !self
                .inventory
                .try_reserve(&line.product_id, delta)
                .await
                .map_err(AppError::from)?
            {
                let available = self
                    .inventory
                    .stock_level(&line.product_id)
                    .await
                    .map_err(AppError::from)?
                    .unwrap_or(0);
                return Err(AppError::out_of_stock(available)
                    .with_detail("product_id", line.product_id.clone()));
            }
        } else if delta < 0 {
            self.inventory
                .release(&line.product_id, -delta)
                .await
                .map_err(AppError::from)?;
        }

        session.lines[index].quantity = quantity;
        Ok(self.build_view(&session))
    }

    /// Remove a line and return its units to stock
    pub async fn remove_item(&self, session_id: &str, index: usize) -> AppResult<CartView> {
        let cart = self.sessions.get_or_create(session_id);
        let mut session = cart.lock().await;

        let line = session
            .lines
            .get(index)
            .ok_or_else(|| {
                AppError::new(ErrorCode::CartLineNotFound).with_detail("index", index as i64)
            })?
            .clone();

        // Credit the ledger before dropping the line; a failed release
        // leaves the units attached to the cart instead of leaking them
        self.inventory
            .release(&line.product_id, line.quantity)
            .await
            .map_err(AppError::from)?;
        session.lines.remove(index);

        Ok(self.build_view(&session))
    }

    /// Apply a promo code after validating it against the promotion table
    pub async fn apply_promo(&self, session_id: &str, code: &str) -> AppResult<CartView> {
        let code = code.trim();
        if code.is_empty() {
            return Err(AppError::new(ErrorCode::RequiredField).with_detail("field", "promo_code"));
        }

        let today = chrono::Utc::now().date_naive().to_string();
        let promo = match self
            .promotions
            .find_active(code, &today)
            .await
            .map_err(AppError::from)?
        {
            Some(p) => p,
            None => {
                // Distinguish a real code outside its window from a bogus one
                let exists = self
                    .promotions
                    .find_by_code(code)
                    .await
                    .map_err(AppError::from)?
                    .is_some();
                let err_code = if exists {
                    ErrorCode::PromoCodeExpired
                } else {
                    ErrorCode::PromoCodeInvalid
                };
                return Err(AppError::new(err_code).with_detail("code", code));
            }
        };

        let cart = self.sessions.get_or_create(session_id);
        let mut session = cart.lock().await;
        session.promo = Some(AppliedPromo {
            code: promo.code,
            percent_off: promo.percent_off,
        });

        Ok(self.build_view(&session))
    }

    /// Switch between pickup and delivery
    pub async fn update_shipping(
        &self,
        session_id: &str,
        method: ShippingMethod,
    ) -> AppResult<CartView> {
        let cart = self.sessions.get_or_create(session_id);
        let mut session = cart.lock().await;
        session.shipping = method;
        Ok(self.build_view(&session))
    }

    /// Add a product to the wishlist
    pub async fn add_wish(&self, session_id: &str, product_id: &str) -> AppResult<CartView> {
        validate_required_text("product_id", product_id, MAX_NAME_LEN)?;
        self.products
            .find_by_id(product_id)
            .await
            .map_err(AppError::from)?
            .ok_or_else(|| AppError::product_not_found(product_id))?;

        let cart = self.sessions.get_or_create(session_id);
        let mut session = cart.lock().await;
        if session.wishlist.iter().any(|p| p == product_id) {
            return Err(AppError::new(ErrorCode::WishlistDuplicate)
                .with_detail("product_id", product_id));
        }
        session.wishlist.push(product_id.to_string());
        Ok(self.build_view(&session))
    }

    /// Remove a product from the wishlist
    pub async fn remove_wish(&self, session_id: &str, product_id: &str) -> AppResult<CartView> {
        let cart = self.sessions.get_or_create(session_id);
        let mut session = cart.lock().await;
        let before = session.wishlist.len();
        session.wishlist.retain(|p| p != product_id);
        if session.wishlist.len() == before {
            return Err(AppError::new(ErrorCode::WishlistEntryNotFound)
                .with_detail("product_id", product_id));
        }
        Ok(self.build_view(&session))
    }

    /// Drop the session after a successful checkout
    ///
    /// Reservations are not released here: the placement transaction has
    /// already consumed them.
    pub fn clear_after_checkout(&self, session_id: &str) {
        self.sessions.remove(session_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use crate::db::models::ProductCreate;

    async fn setup() -> (CartService, String) {
        let db = DbService::in_memory().await.unwrap();
        let products = ProductRepository::new(db.db.clone());
        let product = products
            .create(ProductCreate {
                name: "Flat White".into(),
                description: "".into(),
                price: 4.50,
                allergens: vec!["milk".into()],
                image_url: None,
                stock_level: 10,
                reorder_threshold: 2,
            })
            .await
            .unwrap();
        let service = CartService::new(db.db, Arc::new(SessionStore::new()), 5.0);
        (service, product.product_id)
    }

    #[tokio::test]
    async fn test_add_reserves_stock() {
        let (service, pid) = setup().await;
        let view = service
            .add_item("s1", &pid, 3, None, vec![])
            .await
            .unwrap();
        assert_eq!(view.lines.len(), 1);
        assert_eq!(view.lines[0].quantity, 3);
        assert_eq!(view.subtotal, 13.50);

        let level = service.inventory.stock_level(&pid).await.unwrap();
        assert_eq!(level, Some(7));
    }

    #[tokio::test]
    async fn test_add_merges_matching_lines() {
        let (service, pid) = setup().await;
        service
            .add_item("s1", &pid, 1, Some("oat milk".into()), vec!["Nuts".into()])
            .await
            .unwrap();
        let view = service
            .add_item("s1", &pid, 2, Some(" oat milk ".into()), vec!["nuts".into()])
            .await
            .unwrap();
        assert_eq!(view.lines.len(), 1);
        assert_eq!(view.lines[0].quantity, 3);

        // Different notes stay on their own line
        let view = service.add_item("s1", &pid, 1, None, vec![]).await.unwrap();
        assert_eq!(view.lines.len(), 2);
    }

    #[tokio::test]
    async fn test_add_rejects_over_stock() {
        let (service, pid) = setup().await;
        let err = service
            .add_item("s1", &pid, 11, None, vec![])
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ProductOutOfStock);
        assert_eq!(
            err.details.as_ref().unwrap().get("available").unwrap(),
            10
        );
        // Failed reservation leaves stock untouched
        assert_eq!(service.inventory.stock_level(&pid).await.unwrap(), Some(10));
    }

    #[tokio::test]
    async fn test_remove_restores_stock() {
        let (service, pid) = setup().await;
        service.add_item("s1", &pid, 4, None, vec![]).await.unwrap();
        assert_eq!(service.inventory.stock_level(&pid).await.unwrap(), Some(6));

        let view = service.remove_item("s1", 0).await.unwrap();
        assert!(view.lines.is_empty());
        assert_eq!(service.inventory.stock_level(&pid).await.unwrap(), Some(10));
    }

    #[tokio::test]
    async fn test_update_quantity_applies_delta() {
        let (service, pid) = setup().await;
        service.add_item("s1", &pid, 2, None, vec![]).await.unwrap();

        let view = service.update_quantity("s1", 0, 5).await.unwrap();
        assert_eq!(view.lines[0].quantity, 5);
        assert_eq!(service.inventory.stock_level(&pid).await.unwrap(), Some(5));

        let view = service.update_quantity("s1", 0, 1).await.unwrap();
        assert_eq!(view.lines[0].quantity, 1);
        assert_eq!(service.inventory.stock_level(&pid).await.unwrap(), Some(9));

        // Zero removes the line and releases the rest
        let view = service.update_quantity("s1", 0, 0).await.unwrap();
        assert!(view.lines.is_empty());
        assert_eq!(service.inventory.stock_level(&pid).await.unwrap(), Some(10));
    }

    #[tokio::test]
    async fn test_update_quantity_bad_index() {
        let (service, _pid) = setup().await;
        let err = service.update_quantity("s1", 3, 2).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::CartLineNotFound);
    }

    #[tokio::test]
    async fn test_wishlist() {
        let (service, pid) = setup().await;
        let view = service.add_wish("s1", &pid).await.unwrap();
        assert_eq!(view.wishlist, vec![pid.clone()]);

        let err = service.add_wish("s1", &pid).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::WishlistDuplicate);

        let view = service.remove_wish("s1", &pid).await.unwrap();
        assert!(view.wishlist.is_empty());

        let err = service.remove_wish("s1", &pid).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::WishlistEntryNotFound);
    }

    #[tokio::test]
    async fn test_add_rejects_blank_product_id() {
        let (service, _pid) = setup().await;
        let err = service.add_item("s1", "  ", 1, None, vec![]).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::RequiredField);

        let err = service.add_wish("s1", "").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::RequiredField);
    }

    #[tokio::test]
    async fn test_failed_release_keeps_line_in_cart() {
        let db = DbService::in_memory().await.unwrap();
        let products = ProductRepository::new(db.db.clone());
        let product = products
            .create(ProductCreate {
                name: "Mocha".into(),
                description: "".into(),
                price: 5.00,
                allergens: vec![],
                image_url: None,
                stock_level: 6,
                reorder_threshold: 1,
            })
            .await
            .unwrap();
        let service = CartService::new(db.db.clone(), Arc::new(SessionStore::new()), 5.0);
        service
            .add_item("s1", &product.product_id, 2, None, vec![])
            .await
            .unwrap();

        // Pull the ledger row out from under the cart
        db.db
            .query("DELETE inventory WHERE product_id = $pid")
            .bind(("pid", product.product_id.clone()))
            .await
            .unwrap()
            .check()
            .unwrap();

        let err = service.remove_item("s1", 0).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
        // The units stay on the line rather than vanishing
        let view = service.view("s1").await;
        assert_eq!(view.lines.len(), 1);
        assert_eq!(view.lines[0].quantity, 2);
    }

    #[tokio::test]
    async fn test_unknown_product() {
        let (service, _pid) = setup().await;
        let err = service
            .add_item("s1", "PRD-missing", 1, None, vec![])
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ProductNotFound);
    }
}
