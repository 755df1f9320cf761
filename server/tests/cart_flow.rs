//! Cart lifecycle tests against the in-memory database

use ravenhill_server::ErrorCode;
use ravenhill_server::cart::{CartService, ShippingMethod};
use ravenhill_server::core::{Config, ServerState};
use ravenhill_server::db::models::{ProductCreate, PromotionCreate};
use ravenhill_server::db::repository::{InventoryRepository, ProductRepository, PromotionRepository};

async fn setup() -> (ServerState, CartService, String) {
    let config = Config::with_overrides("/tmp/ravenhill-test", 0);
    let state = ServerState::in_memory(config).await.unwrap();

    let products = ProductRepository::new(state.db.clone());
    let product = products
        .create(ProductCreate {
            name: "Cappuccino".into(),
            description: "Double shot".into(),
            price: 4.50,
            allergens: vec!["milk".into()],
            image_url: None,
            stock_level: 8,
            reorder_threshold: 2,
        })
        .await
        .unwrap();

    let service = CartService::new(
        state.db.clone(),
        state.sessions.clone(),
        state.config.delivery_fee,
    );
    (state, service, product.product_id)
}

async fn stock(state: &ServerState, pid: &str) -> i64 {
    InventoryRepository::new(state.db.clone())
        .stock_level(pid)
        .await
        .unwrap()
        .unwrap()
}

#[tokio::test]
async fn add_update_remove_round_trip_restores_stock() {
    let (state, service, pid) = setup().await;

    service.add_item("s1", &pid, 3, None, vec![]).await.unwrap();
    assert_eq!(stock(&state, &pid).await, 5);

    service.update_quantity("s1", 0, 6).await.unwrap();
    assert_eq!(stock(&state, &pid).await, 2);

    service.update_quantity("s1", 0, 2).await.unwrap();
    assert_eq!(stock(&state, &pid).await, 6);

    let view = service.remove_item("s1", 0).await.unwrap();
    assert!(view.lines.is_empty());
    assert_eq!(stock(&state, &pid).await, 8);
}

#[tokio::test]
async fn merge_requires_identical_customisations() {
    let (_state, service, pid) = setup().await;

    service
        .add_item("s1", &pid, 1, Some("decaf".into()), vec!["Soy".into(), "nuts".into()])
        .await
        .unwrap();
    // Same line up to whitespace, case and allergen order
    let view = service
        .add_item("s1", &pid, 2, Some("  decaf ".into()), vec!["NUTS".into(), "soy".into()])
        .await
        .unwrap();
    assert_eq!(view.lines.len(), 1);
    assert_eq!(view.lines[0].quantity, 3);
    assert_eq!(
        view.lines[0].allergens_avoided,
        vec!["nuts".to_string(), "soy".to_string()]
    );

    let view = service
        .add_item("s1", &pid, 1, Some("decaf".into()), vec![])
        .await
        .unwrap();
    assert_eq!(view.lines.len(), 2);
}

#[tokio::test]
async fn oversell_is_rejected_at_add_time() {
    let (state, service, pid) = setup().await;

    service.add_item("s1", &pid, 8, None, vec![]).await.unwrap();
    assert_eq!(stock(&state, &pid).await, 0);

    // A second session cannot take what is reserved
    let err = service.add_item("s2", &pid, 1, None, vec![]).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ProductOutOfStock);
    assert_eq!(err.details.as_ref().unwrap().get("available").unwrap(), 0);
}

#[tokio::test]
async fn sessions_are_isolated() {
    let (_state, service, pid) = setup().await;

    service.add_item("a", &pid, 2, None, vec![]).await.unwrap();
    let view_b = service.view("b").await;
    assert!(view_b.lines.is_empty());

    let view_a = service.view("a").await;
    assert_eq!(view_a.lines.len(), 1);
}

#[tokio::test]
async fn shipping_method_changes_totals() {
    let (_state, service, pid) = setup().await;

    service.add_item("s1", &pid, 2, None, vec![]).await.unwrap();
    let view = service.view("s1").await;
    assert_eq!(view.subtotal, 9.00);
    assert_eq!(view.shipping_fee, 0.00);
    assert_eq!(view.total, 9.00);

    let view = service
        .update_shipping("s1", ShippingMethod::Delivery)
        .await
        .unwrap();
    assert_eq!(view.shipping_fee, 5.00);
    assert_eq!(view.total, 14.00);
}

#[tokio::test]
async fn promo_codes_are_window_checked() {
    let (state, service, pid) = setup().await;
    let promos = PromotionRepository::new(state.db.clone());

    promos
        .create(PromotionCreate {
            code: "BEANS10".into(),
            percent_off: 10.0,
            starts_on: "2020-01-01".into(),
            ends_on: "2099-12-31".into(),
            active: true,
        })
        .await
        .unwrap();
    promos
        .create(PromotionCreate {
            code: "BYGONE".into(),
            percent_off: 25.0,
            starts_on: "2020-01-01".into(),
            ends_on: "2020-12-31".into(),
            active: true,
        })
        .await
        .unwrap();

    service.add_item("s1", &pid, 2, None, vec![]).await.unwrap();

    // 9.00 subtotal, 10% off = 0.90
    let view = service.apply_promo("s1", "BEANS10").await.unwrap();
    assert_eq!(view.discount, 0.90);
    assert_eq!(view.total, 8.10);

    let err = service.apply_promo("s1", "BYGONE").await.unwrap_err();
    assert_eq!(err.code, ErrorCode::PromoCodeExpired);

    let err = service.apply_promo("s1", "NOPE").await.unwrap_err();
    assert_eq!(err.code, ErrorCode::PromoCodeInvalid);
}
