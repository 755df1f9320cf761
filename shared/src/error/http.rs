//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            // Success
            Self::Success => StatusCode::OK,

            // 404 Not Found
            Self::NotFound
            | Self::CartLineNotFound
            | Self::WishlistEntryNotFound
            | Self::SessionNotFound
            | Self::OrderNotFound
            | Self::ProductNotFound
            | Self::InventoryNotFound
            | Self::PromoCodeInvalid => StatusCode::NOT_FOUND,

            // 409 Conflict
            Self::AlreadyExists
            | Self::WishlistDuplicate
            | Self::ProductOutOfStock
            | Self::InsufficientStock => StatusCode::CONFLICT,

            // 410 Gone
            Self::PromoCodeExpired => StatusCode::GONE,

            // 402 Payment Required
            Self::PaymentFailed => StatusCode::PAYMENT_REQUIRED,

            // 500 Internal Server Error
            Self::InternalError
            | Self::DatabaseError
            | Self::TransactionFailed
            | Self::ConfigError => StatusCode::INTERNAL_SERVER_ERROR,

            // 400 Bad Request (default for validation/business errors)
            _ => StatusCode::BAD_REQUEST,
        }
    }
}
