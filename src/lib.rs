//! melos_accounts - In-memory user account service
//!
//! Registration, login and account management over HTTP, with Argon2id
//! password hashing and HS256 JWT bearer sessions.
//!
//! # Modules
//!
//! - [`user_auth`] - Credential store, token authority, session gate, handlers
//! - [`gateway`] - Axum router, response envelope, OpenAPI docs
//! - [`config`] - YAML configuration with environment overrides
//! - [`logging`] - tracing subscriber setup

pub mod config;
pub mod gateway;
pub mod logging;
pub mod user_auth;

// Convenient re-exports at crate root
pub use config::{AppConfig, AuthConfig, GatewayConfig};
pub use gateway::build_router;
pub use gateway::state::{AccessPolicy, AppState};
pub use user_auth::{
    Claims, CredentialStore, GateError, StoreError, TokenAuthority, TokenError, UserRecord,
};
