//! API Response types and error codes
//!
//! - `ApiResponse<T>`: Unified response wrapper
//! - `ApiError`: Error half of every handler result
//! - `error_codes`: Standard error code constants

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

use crate::user_auth::error::{GateError, StoreError, TokenError};

// ============================================================================
// Unified API Response Format
// ============================================================================

/// Unified API response wrapper
///
/// All API responses follow this structure:
/// - code: 0 = success, non-zero = error code
/// - msg: short message description
/// - data: actual data (success) or absent
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response code: 0 for success, non-zero for errors
    #[schema(example = 0)]
    pub code: i32,
    /// Response message
    #[schema(example = "ok")]
    pub msg: String,
    /// Response data (only present on success, and not for plain confirmations)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Create success response
    pub fn success(msg: impl Into<String>, data: T) -> Self {
        Self {
            code: error_codes::SUCCESS,
            msg: msg.into(),
            data: Some(data),
        }
    }

    /// Create error response
    pub fn error(code: i32, msg: impl Into<String>) -> ApiResponse<()> {
        ApiResponse {
            code,
            msg: msg.into(),
            data: None,
        }
    }
}

impl ApiResponse<()> {
    /// Success without a payload.
    pub fn confirm(msg: impl Into<String>) -> Self {
        Self {
            code: error_codes::SUCCESS,
            msg: msg.into(),
            data: None,
        }
    }
}

pub type ApiResult<T> = Result<(StatusCode, Json<ApiResponse<T>>), ApiError>;

/// 200 with payload.
pub fn ok<T>(msg: &str, data: T) -> ApiResult<T> {
    Ok((StatusCode::OK, Json(ApiResponse::success(msg, data))))
}

/// Payload-less confirmation with the given status.
pub fn confirm(status: StatusCode, msg: &str) -> ApiResult<()> {
    Ok((status, Json(ApiResponse::confirm(msg))))
}

// ============================================================================
// ApiError
// ============================================================================

/// Handler error carrying HTTP status, error code and message.
#[derive(Debug, Clone)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: i32,
    pub msg: String,
}

impl ApiError {
    pub fn new(status: StatusCode, code: i32, msg: impl Into<String>) -> Self {
        Self {
            status,
            code,
            msg: msg.into(),
        }
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, error_codes::INVALID_PARAMETER, msg)
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, error_codes::PERMISSION_DENIED, msg)
    }

    pub fn internal() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            error_codes::INTERNAL_ERROR,
            "Internal server error",
        )
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ApiResponse::<()>::error(self.code, self.msg))).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::EmptyUsername => Self::bad_request(e.to_string()),
            StoreError::DuplicateUsername => Self::new(
                StatusCode::BAD_REQUEST,
                error_codes::USERNAME_TAKEN,
                e.to_string(),
            ),
            StoreError::InvalidCredentials => Self::new(
                StatusCode::UNAUTHORIZED,
                error_codes::AUTH_FAILED,
                e.to_string(),
            ),
            StoreError::NotFound => Self::new(
                StatusCode::NOT_FOUND,
                error_codes::USER_NOT_FOUND,
                e.to_string(),
            ),
            StoreError::Hashing(ref detail) => {
                tracing::error!("credential store failure: {}", detail);
                Self::internal()
            }
        }
    }
}

impl From<GateError> for ApiError {
    fn from(e: GateError) -> Self {
        let code = match e {
            GateError::AccessDenied => error_codes::MISSING_AUTH,
            GateError::Forbidden(_) => error_codes::INVALID_TOKEN,
        };
        Self::new(StatusCode::FORBIDDEN, code, e.to_string())
    }
}

impl From<TokenError> for ApiError {
    fn from(e: TokenError) -> Self {
        tracing::error!("token failure outside the gate: {}", e);
        Self::internal()
    }
}

// ============================================================================
// Error Codes
// ============================================================================

/// Standard API error codes
pub mod error_codes {
    // Success
    pub const SUCCESS: i32 = 0;

    // Client errors (1xxx)
    pub const INVALID_PARAMETER: i32 = 1001;
    pub const USERNAME_TAKEN: i32 = 1002;

    // Auth errors (2xxx)
    pub const MISSING_AUTH: i32 = 2001;
    pub const AUTH_FAILED: i32 = 2002;
    pub const INVALID_TOKEN: i32 = 2003;
    pub const PERMISSION_DENIED: i32 = 2004;

    // Resource errors (4xxx)
    pub const USER_NOT_FOUND: i32 = 4001;

    // Server errors (5xxx)
    pub const INTERNAL_ERROR: i32 = 5000;
}
