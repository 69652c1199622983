//! User accounts: credential store, token authority and session gate.
//!
//! ## Components
//! - `password`: Argon2id hashing and verification
//! - `store`: In-memory credential store (register / authenticate / CRUD)
//! - `token`: JWT issuance and verification
//! - `middleware`: Session gate for protected routes
//! - `handlers`: HTTP handlers for the account API
//! - `error`: Store, token and gate error kinds

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod password;
pub mod store;
pub mod token;

pub use error::{GateError, StoreError, TokenError};
pub use middleware::{authorize, extract_bearer, jwt_auth_middleware};
pub use store::{CredentialStore, UserRecord};
pub use token::{Claims, DEFAULT_TOKEN_TTL_SECS, TokenAuthority};
