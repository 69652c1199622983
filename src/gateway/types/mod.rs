//! Gateway types module
//!
//! ## Input Types
//! - [`RegisterRequest`], [`LoginRequest`], [`UpdatePasswordRequest`]
//! - [`ValidatedJson`]: Axum extractor running `validator` rules
//!
//! ## Output Types
//! - [`ApiResponse<T>`]: Unified API response wrapper
//! - [`ApiError`]: Handler error with status and code

pub mod request;
pub mod response;

pub use request::{LoginRequest, RegisterRequest, UpdatePasswordRequest, ValidatedJson};
pub use response::{ApiError, ApiResponse, ApiResult, confirm, error_codes, ok};
