//! Unified error codes for the Ravenhill backend
//!
//! This module defines all error codes used across the server and its clients.
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 2xxx: Cart and session errors
//! - 4xxx: Order errors
//! - 5xxx: Payment errors
//! - 6xxx: Product and inventory errors
//! - 7xxx: Promotion errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 2xxx: Cart / Session ====================
    /// Cart line not found at the given index
    CartLineNotFound = 2001,
    /// Cart is empty
    CartEmpty = 2002,
    /// Product is already on the wishlist
    WishlistDuplicate = 2003,
    /// Wishlist entry not found at the given index
    WishlistEntryNotFound = 2004,
    /// Session not found
    SessionNotFound = 2005,

    // ==================== 4xxx: Order ====================
    /// Order not found
    OrderNotFound = 4001,
    /// Order has no items
    OrderEmpty = 4002,
    /// Delivery address is required
    AddressRequired = 4003,
    /// Cashier id is required for point-of-sale orders
    CashierRequired = 4004,
    /// Invalid order type
    OrderTypeInvalid = 4005,

    // ==================== 5xxx: Payment ====================
    /// Payment processing failed
    PaymentFailed = 5001,
    /// Invalid payment method
    PaymentInvalidMethod = 5002,
    /// Card details failed validation
    InvalidCardDetails = 5003,

    // ==================== 6xxx: Product / Inventory ====================
    /// Product not found
    ProductNotFound = 6001,
    /// Product is not currently available for sale
    ProductUnavailable = 6002,
    /// Requested quantity exceeds available stock (cart time)
    ProductOutOfStock = 6003,
    /// Inventory record not found
    InventoryNotFound = 6101,
    /// Stock ran out while placing the order (placement time)
    InsufficientStock = 6102,

    // ==================== 7xxx: Promotion ====================
    /// Promo code not found or not applicable
    PromoCodeInvalid = 7001,
    /// Promo code is outside its validity window
    PromoCodeExpired = 7002,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Order placement transaction failed and was rolled back
    TransactionFailed = 9003,
    /// Configuration error
    ConfigError = 9005,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Cart / Session
            ErrorCode::CartLineNotFound => "Cart item not found",
            ErrorCode::CartEmpty => "Cart is empty",
            ErrorCode::WishlistDuplicate => "Already in wishlist",
            ErrorCode::WishlistEntryNotFound => "Wishlist item not found",
            ErrorCode::SessionNotFound => "Session not found",

            // Order
            ErrorCode::OrderNotFound => "Order not found",
            ErrorCode::OrderEmpty => "Order has no items",
            ErrorCode::AddressRequired => "Address is required for delivery",
            ErrorCode::CashierRequired => "No cashier logged in",
            ErrorCode::OrderTypeInvalid => "Invalid order type",

            // Payment
            ErrorCode::PaymentFailed => "Payment processing failed",
            ErrorCode::PaymentInvalidMethod => "Invalid payment method",
            ErrorCode::InvalidCardDetails => {
                "Invalid card details. Please ensure a 16-digit card number, MM/YY expiry, and 3-digit CVV"
            }

            // Product / Inventory
            ErrorCode::ProductNotFound => "Product not found",
            ErrorCode::ProductUnavailable => "Product is not available",
            ErrorCode::ProductOutOfStock => "Requested quantity exceeds available stock",
            ErrorCode::InventoryNotFound => "Inventory record not found",
            ErrorCode::InsufficientStock => "Insufficient stock",

            // Promotion
            ErrorCode::PromoCodeInvalid => "Invalid promo code",
            ErrorCode::PromoCodeExpired => "Promo code has expired",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::TransactionFailed => "Transaction failed",
            ErrorCode::ConfigError => "Configuration error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),
            7 => Ok(ErrorCode::RequiredField),
            8 => Ok(ErrorCode::ValueOutOfRange),

            // Cart / Session
            2001 => Ok(ErrorCode::CartLineNotFound),
            2002 => Ok(ErrorCode::CartEmpty),
            2003 => Ok(ErrorCode::WishlistDuplicate),
            2004 => Ok(ErrorCode::WishlistEntryNotFound),
            2005 => Ok(ErrorCode::SessionNotFound),

            // Order
            4001 => Ok(ErrorCode::OrderNotFound),
            4002 => Ok(ErrorCode::OrderEmpty),
            4003 => Ok(ErrorCode::AddressRequired),
            4004 => Ok(ErrorCode::CashierRequired),
            4005 => Ok(ErrorCode::OrderTypeInvalid),

            // Payment
            5001 => Ok(ErrorCode::PaymentFailed),
            5002 => Ok(ErrorCode::PaymentInvalidMethod),
            5003 => Ok(ErrorCode::InvalidCardDetails),

            // Product / Inventory
            6001 => Ok(ErrorCode::ProductNotFound),
            6002 => Ok(ErrorCode::ProductUnavailable),
            6003 => Ok(ErrorCode::ProductOutOfStock),
            6101 => Ok(ErrorCode::InventoryNotFound),
            6102 => Ok(ErrorCode::InsufficientStock),

            // Promotion
            7001 => Ok(ErrorCode::PromoCodeInvalid),
            7002 => Ok(ErrorCode::PromoCodeExpired),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9003 => Ok(ErrorCode::TransactionFailed),
            9005 => Ok(ErrorCode::ConfigError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
