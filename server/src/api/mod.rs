//! API route modules
//!
//! # Structure
//!
//! - [`health`] - health check
//! - [`products`] - menu listing
//! - [`cart`] - cart view and mutations
//! - [`checkout`] - checkout summary and order placement
//! - [`pos`] - in-store orders placed at the till
//! - [`orders`] - order history and notifications
//! - [`inventory`] - low-stock report

pub mod cart;
pub mod checkout;
pub mod health;
pub mod inventory;
pub mod orders;
pub mod pos;
pub mod products;
