use anyhow::{Context, Result, bail};
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;

use crate::user_auth::DEFAULT_TOKEN_TTL_SECS;

/// Environment variable that overrides `auth.jwt_secret`.
pub const JWT_SECRET_ENV: &str = "ACCOUNTS_JWT_SECRET";

/// HS256 keys shorter than this are rejected at startup.
pub const MIN_SECRET_LEN: usize = 32;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub log_dir: String,
    pub log_file: String,
    pub use_json: bool,
    pub rotation: String,
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GatewayConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Serialize, Deserialize, Clone)]
pub struct AuthConfig {
    /// Signing secret. Prefer the environment variable in deployments.
    #[serde(default, skip_serializing)]
    pub jwt_secret: Option<String>,
    #[serde(default = "default_token_ttl_secs")]
    pub token_ttl_secs: i64,
    #[serde(default)]
    pub enforce_ownership: bool,
    #[serde(default)]
    pub expose_password_hash: bool,
}

fn default_token_ttl_secs() -> i64 {
    DEFAULT_TOKEN_TTL_SECS
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: None,
            token_ttl_secs: DEFAULT_TOKEN_TTL_SECS,
            enforce_ownership: false,
            expose_password_hash: false,
        }
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &self.jwt_secret.as_ref().map(|_| "<redacted>"))
            .field("token_ttl_secs", &self.token_ttl_secs)
            .field("enforce_ownership", &self.enforce_ownership)
            .field("expose_password_hash", &self.expose_password_hash)
            .finish()
    }
}

impl AuthConfig {
    /// The signing secret, validated.
    pub fn secret(&self) -> Result<&str> {
        let Some(secret) = self.jwt_secret.as_deref() else {
            bail!(
                "no JWT secret configured: set {} or auth.jwt_secret",
                JWT_SECRET_ENV
            );
        };
        if secret.len() < MIN_SECRET_LEN {
            bail!(
                "JWT secret too short ({} bytes, need at least {})",
                secret.len(),
                MIN_SECRET_LEN
            );
        }
        Ok(secret)
    }

    /// Token lifetime, checked to be positive and representable as an
    /// expiry timestamp.
    pub fn token_ttl(&self) -> Result<Duration> {
        if self.token_ttl_secs <= 0 {
            bail!("auth.token_ttl_secs must be positive");
        }
        Duration::try_seconds(self.token_ttl_secs)
            .filter(|ttl| Utc::now().checked_add_signed(*ttl).is_some())
            .with_context(|| format!("auth.token_ttl_secs {} is too large", self.token_ttl_secs))
    }
}

impl AppConfig {
    /// Load `config/<env>.yaml`, then apply environment overrides.
    pub fn load(env: &str) -> Result<Self> {
        let config_path = format!("config/{}.yaml", env);
        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path))?;
        let config = Self::from_yaml(&content)
            .with_context(|| format!("Failed to parse config file: {}", config_path))?;
        config.with_secret_override(std::env::var(JWT_SECRET_ENV).ok())
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content)?;
        config.auth.token_ttl()?;
        Ok(config)
    }

    /// Replace the configured secret when an override is present.
    pub fn with_secret_override(mut self, secret: Option<String>) -> Result<Self> {
        if let Some(secret) = secret.filter(|s| !s.is_empty()) {
            self.auth.jwt_secret = Some(secret);
        }
        self.auth.secret()?;
        Ok(self)
    }
}
