use crate::config::AuthConfig;
use crate::user_auth::{CredentialStore, TokenAuthority};

/// Per-deployment switches for ownership checks and hash exposure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AccessPolicy {
    /// Reject PUT/DELETE on a username other than the token's own.
    pub enforce_ownership: bool,
    /// Include `password_hash` in user listings and lookups.
    pub expose_password_hash: bool,
}

/// Gateway application state (shared)
#[derive(Clone)]
pub struct AppState {
    /// User records
    pub store: CredentialStore,
    /// JWT issuer / verifier
    pub tokens: TokenAuthority,
    pub policy: AccessPolicy,
}

impl AppState {
    pub fn new(store: CredentialStore, tokens: TokenAuthority, policy: AccessPolicy) -> Self {
        Self {
            store,
            tokens,
            policy,
        }
    }

    /// Build state from the `auth` config section with an empty store.
    pub fn from_config(auth: &AuthConfig, secret: &str) -> anyhow::Result<Self> {
        let tokens = TokenAuthority::new(secret.as_bytes(), auth.token_ttl()?);
        let policy = AccessPolicy {
            enforce_ownership: auth.enforce_ownership,
            expose_password_hash: auth.expose_password_hash,
        };
        Ok(Self::new(CredentialStore::new(), tokens, policy))
    }
}
