//! Checkout module
//!
//! [`totals`] is the pure money math; [`placement`] turns a cart (or a till
//! order) into persisted order, item and payment rows inside one database
//! transaction.

pub mod placement;
pub mod totals;

pub use placement::{OrderReceipt, PaymentDetails, PlacementService, PosLine};
pub use totals::Totals;
