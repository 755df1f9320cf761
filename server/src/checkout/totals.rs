//! Order total computation
//!
//! All arithmetic runs in `Decimal` and is rounded half-up to two decimal
//! places at each boundary; rows and responses carry the rounded `f64`.

use crate::cart::{CartLine, ShippingMethod};
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};

/// Subtotal, shipping, discount and grand total for a set of lines
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Totals {
    pub subtotal: Decimal,
    pub shipping: Decimal,
    pub discount: Decimal,
    pub total: Decimal,
}

/// Round to 2 decimal places, midpoint away from zero
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Lossless-enough f64 to Decimal for stored prices
pub fn dec(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Rounded Decimal back to the f64 stored in rows and responses
pub fn money(value: Decimal) -> f64 {
    round2(value).to_f64().unwrap_or(0.0)
}

/// Compute order totals
///
/// The discount applies to subtotal plus shipping, matching how the shop
/// advertises its promo codes.
pub fn compute(
    lines: &[CartLine],
    shipping_method: ShippingMethod,
    delivery_fee: Decimal,
    promo_percent: Option<Decimal>,
) -> Totals {
    let subtotal: Decimal = lines
        .iter()
        .map(|l| dec(l.price) * Decimal::from(l.quantity))
        .sum();
    let subtotal = round2(subtotal);

    let shipping = match shipping_method {
        ShippingMethod::Delivery => round2(delivery_fee),
        ShippingMethod::Pickup => Decimal::ZERO,
    };

    let discount = match promo_percent {
        Some(percent) => round2((subtotal + shipping) * percent / Decimal::from(100)),
        None => Decimal::ZERO,
    };

    let total = round2(subtotal + shipping - discount);

    Totals {
        subtotal,
        shipping,
        discount,
        total,
    }
}
