//! Utility module - common helpers and re-exported error types
//!
//! # Contents
//!
//! - [`AppError`] - application error type (from `shared::error`)
//! - [`ApiResponse`] - API response envelope (from `shared::error`)
//! - [`logger`] - tracing setup
//! - [`validation`] - request field validation helpers

pub mod logger;
pub mod validation;

// Re-export error types from shared so handlers have one import path
pub use shared::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
