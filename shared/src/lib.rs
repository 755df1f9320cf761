//! Shared support types for the Ravenhill café backend
//!
//! - **error**: unified error codes, [`AppError`] and the [`ApiResponse`] envelope
//! - **util**: timestamps and prefixed resource id generation

pub mod error;
pub mod util;

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
