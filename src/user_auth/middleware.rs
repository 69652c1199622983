//! Session gate: bearer extraction and JWT verification for protected routes.

use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Request, header},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use super::error::GateError;
use super::token::{Claims, TokenAuthority};
use crate::gateway::{state::AppState, types::ApiError};

const BEARER_PREFIX: &str = "Bearer ";

/// Pull the token out of an `Authorization: Bearer <token>` header.
pub fn extract_bearer(headers: &HeaderMap) -> Result<&str, GateError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or(GateError::AccessDenied)?;

    match value.strip_prefix(BEARER_PREFIX).map(str::trim) {
        Some(token) if !token.is_empty() => Ok(token),
        _ => Err(GateError::AccessDenied),
    }
}

/// Resolve request headers to the caller's claims.
///
/// Every verification failure surfaces as `Forbidden`; the underlying kind
/// is only logged.
pub fn authorize(tokens: &TokenAuthority, headers: &HeaderMap) -> Result<Claims, GateError> {
    let token = extract_bearer(headers)?;
    tokens.verify(token).map_err(|e| {
        tracing::debug!(reason = %e, "rejected bearer token");
        GateError::Forbidden(e)
    })
}

/// Axum middleware guarding the protected user routes.
///
/// Injects [`Claims`] into request extensions for the handlers.
pub async fn jwt_auth_middleware(
    State(state): State<Arc<AppState>>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let claims = authorize(&state.tokens, request.headers())?;
    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}
