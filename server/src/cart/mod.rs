//! Shopping cart module
//!
//! Carts are per-session and live in memory; the database only sees stock
//! reservations while a cart is open. [`session`] holds the session store
//! and line types, [`store`] the cart operations themselves.

pub mod session;
pub mod store;

pub use session::{AppliedPromo, CartLine, CartSession, SessionId, SessionStore, ShippingMethod};
pub use store::{CartService, CartView};
