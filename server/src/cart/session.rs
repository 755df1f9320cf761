//! Cart sessions and the in-memory session store

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Header carrying the client's cart session id
pub const SESSION_HEADER: &str = "x-session-id";

/// A single cart line
///
/// Two lines are merged only when product, notes and avoided allergens all
/// match; the same drink with different customisations stays separate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: String,
    pub name: String,
    /// Unit price snapshot shown in the cart; checkout re-reads fresh prices
    pub price: f64,
    pub quantity: i64,
    #[serde(default)]
    pub notes: Option<String>,
    /// Sorted, lowercased, deduplicated
    #[serde(default)]
    pub allergens_avoided: Vec<String>,
}

impl CartLine {
    /// Whether an incoming item should merge into this line
    pub fn matches(&self, product_id: &str, notes: &Option<String>, allergens: &[String]) -> bool {
        self.product_id == product_id
            && self.notes == *notes
            && self.allergens_avoided == allergens
    }
}

/// Normalize an allergen list: lowercase, trim, sort, dedup
pub fn normalize_allergens(allergens: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = allergens
        .into_iter()
        .map(|a| a.trim().to_lowercase())
        .filter(|a| !a.is_empty())
        .collect();
    out.sort();
    out.dedup();
    out
}

/// Normalize free-text notes: trim, empty becomes None
pub fn normalize_notes(notes: Option<String>) -> Option<String> {
    notes
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
}

/// How an online order reaches the customer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShippingMethod {
    #[default]
    Pickup,
    Delivery,
}

impl ShippingMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pickup => "pickup",
            Self::Delivery => "delivery",
        }
    }
}

/// A promo code validated against the promotion table and pinned to the cart
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppliedPromo {
    pub code: String,
    pub percent_off: f64,
}

/// Everything a session holds between requests
#[derive(Debug, Clone, Default, Serialize)]
pub struct CartSession {
    pub lines: Vec<CartLine>,
    pub wishlist: Vec<String>,
    pub shipping: ShippingMethod,
    pub promo: Option<AppliedPromo>,
}

/// Concurrent map of session id to cart
///
/// Each cart sits behind its own async mutex, so operations on one session
/// serialize while different sessions proceed in parallel.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: DashMap<String, Arc<Mutex<CartSession>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
        }
    }

    /// Fetch the cart for a session, creating an empty one on first use
    pub fn get_or_create(&self, session_id: &str) -> Arc<Mutex<CartSession>> {
        self.sessions
            .entry(session_id.to_string())
            .or_default()
            .clone()
    }

    /// Drop a session entirely (after checkout)
    pub fn remove(&self, session_id: &str) {
        self.sessions.remove(session_id);
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

/// Extractor for the cart session id
///
/// Reads the `x-session-id` header; a missing header starts a fresh session
/// with a generated id, which the cart handlers echo back to the client.
#[derive(Debug, Clone)]
pub struct SessionId(pub String);

impl<S> FromRequestParts<S> for SessionId
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let id = parts
            .headers
            .get(SESSION_HEADER)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| uuid::Uuid::new_v4().simple().to_string());
        Ok(SessionId(id))
    }
}
