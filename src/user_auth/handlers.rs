use axum::{
    Extension,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

use super::store::UserRecord;
use super::token::Claims;
use crate::gateway::state::AppState;
use crate::gateway::types::{
    ApiError, ApiResponse, ApiResult, LoginRequest, RegisterRequest, UpdatePasswordRequest,
    ValidatedJson, confirm, ok,
};

/// Login response (JWT)
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub token: String,
}

/// User as returned by the API.
#[derive(Debug, Serialize, ToSchema)]
pub struct UserView {
    #[schema(example = "melos")]
    pub username: String,
    /// Only present when hash exposure is enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "$argon2id$v=19$m=19456,t=2,p=1$...")]
    pub password_hash: Option<String>,
}

impl UserView {
    fn from_record(record: UserRecord, expose_hash: bool) -> Self {
        Self {
            password_hash: expose_hash.then_some(record.password_hash),
            username: record.username,
        }
    }
}

fn ensure_owner(state: &AppState, claims: &Claims, username: &str) -> Result<(), ApiError> {
    if state.policy.enforce_ownership && claims.username != username {
        tracing::warn!(
            caller = %claims.username,
            target = username,
            "refused to act on another user's account"
        );
        return Err(ApiError::forbidden("Cannot modify another user's account"));
    }
    Ok(())
}

/// Register a new user
///
/// POST /api/register
#[utoipa::path(
    post,
    path = "/api/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered successfully"),
        (status = 400, description = "Invalid input or username already taken")
    ),
    tag = "Users"
)]
pub async fn register(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> ApiResult<()> {
    state.store.register(&req.username, &req.password).await?;
    confirm(StatusCode::CREATED, "User registered successfully")
}

/// Log in and obtain a JWT
///
/// POST /api/login
#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = ApiResponse<LoginResponse>),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "Users"
)]
pub async fn login(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> ApiResult<LoginResponse> {
    let username = state.store.authenticate(&req.username, &req.password).await?;
    let token = state.tokens.issue(&username)?;
    tracing::info!(username = %username, "login successful");
    ok("Login successful", LoginResponse { token })
}

/// List all users
///
/// GET /api/users
#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "Users retrieved successfully", body = ApiResponse<Vec<UserView>>),
        (status = 403, description = "Missing or invalid token")
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn list_users(State(state): State<Arc<AppState>>) -> ApiResult<Vec<UserView>> {
    let expose = state.policy.expose_password_hash;
    let users: Vec<UserView> = state
        .store
        .list()
        .into_iter()
        .map(|r| UserView::from_record(r, expose))
        .collect();
    ok("Users retrieved successfully", users)
}

/// Get a single user
///
/// GET /api/users/{username}
#[utoipa::path(
    get,
    path = "/api/users/{username}",
    params(("username" = String, Path, description = "Username to look up")),
    responses(
        (status = 200, description = "User retrieved successfully", body = ApiResponse<UserView>),
        (status = 404, description = "User not found"),
        (status = 403, description = "Missing or invalid token")
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(username): Path<String>,
) -> ApiResult<UserView> {
    let record = state.store.get(&username)?;
    ok(
        "User retrieved successfully",
        UserView::from_record(record, state.policy.expose_password_hash),
    )
}

/// Update a user's password
///
/// PUT /api/users/{username}
#[utoipa::path(
    put,
    path = "/api/users/{username}",
    params(("username" = String, Path, description = "User whose password is replaced")),
    request_body = UpdatePasswordRequest,
    responses(
        (status = 200, description = "Password updated successfully"),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "User not found"),
        (status = 403, description = "Missing or invalid token, or not the account owner")
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn update_user(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Path(username): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdatePasswordRequest>,
) -> ApiResult<()> {
    ensure_owner(&state, &claims, &username)?;
    state.store.update_password(&username, &req.password).await?;
    confirm(StatusCode::OK, "Password updated successfully")
}

/// Delete a user
///
/// DELETE /api/users/{username}
#[utoipa::path(
    delete,
    path = "/api/users/{username}",
    params(("username" = String, Path, description = "User to delete")),
    responses(
        (status = 200, description = "User deleted successfully"),
        (status = 404, description = "User not found"),
        (status = 403, description = "Missing or invalid token, or not the account owner")
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Path(username): Path<String>,
) -> ApiResult<()> {
    ensure_owner(&state, &claims, &username)?;
    state.store.delete(&username)?;
    confirm(StatusCode::OK, "User deleted successfully")
}
