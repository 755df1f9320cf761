//! Database row models
//!
//! Rows carry their own prefixed string ids (`PRD-`, `ORD-`, `OI-`, `PAY-`,
//! ...) rather than exposing SurrealDB record ids, so api payloads stay
//! engine-agnostic. Money fields are stored as `f64` already rounded to two
//! decimal places; computation happens in `Decimal` before rows are built.

mod inventory;
mod loyalty;
mod notification;
mod order;
mod payment;
mod product;
mod promotion;

pub use inventory::InventoryRecord;
pub use loyalty::LoyaltyAward;
pub use notification::Notification;
pub use order::{OrderItemRow, OrderRow};
pub use payment::PaymentRow;
pub use product::{Product, ProductCreate};
pub use promotion::{Promotion, PromotionCreate};
