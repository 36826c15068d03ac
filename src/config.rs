//! Runtime configuration for the server binary.

use crate::store::SessionBackendConfig;
use std::net::SocketAddr;
use std::time::Duration;
use thiserror::Error;

/// Default listen address.
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8888";

/// Default lifetime of a persisted session.
pub const DEFAULT_TTL: Duration = Duration::from_secs(600);

/// Default prefix applied to every key before it reaches the cache backend.
pub const DEFAULT_KEY_PREFIX: &str = "SGS_";

/// Default deadline for each cache operation.
pub const DEFAULT_OP_TIMEOUT: Duration = Duration::from_secs(2);

/// A configuration value read from the environment did not parse.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid listen address in {var}: {value:?}")]
    InvalidBindAddr { var: &'static str, value: String },

    #[error("invalid integer in {var}: {value:?}")]
    InvalidNumber { var: &'static str, value: String },
}

/// Configuration for the server binary.
///
/// Everything here is read-only after startup; handlers never consult the
/// environment themselves.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Address the HTTP listener binds to.
    pub bind_addr: SocketAddr,
    /// Redis connection URL; `None` selects the in-memory backend.
    pub redis_url: Option<String>,
    /// Namespace prepended to every cache key.
    pub key_prefix: String,
    /// TTL applied to persisted sessions. Zero disables expiry.
    pub default_ttl: Duration,
    /// Per-operation cache deadline.
    pub op_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR
                .parse()
                .unwrap_or_else(|_| SocketAddr::from(([0, 0, 0, 0], 8888))),
            redis_url: None,
            key_prefix: DEFAULT_KEY_PREFIX.to_owned(),
            default_ttl: DEFAULT_TTL,
            op_timeout: DEFAULT_OP_TIMEOUT,
        }
    }
}

impl AppConfig {
    /// Configuration with all defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads overrides from the environment: `LUCKY_BIND_ADDR`,
    /// `LUCKY_REDIS_URL`, `LUCKY_KEY_PREFIX`, `LUCKY_SESSION_TTL_SECS`, and
    /// `LUCKY_CACHE_TIMEOUT_MS`. Unset variables keep their defaults; values
    /// that fail to parse abort startup.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(value) = std::env::var("LUCKY_BIND_ADDR") {
            config.bind_addr = value.parse().map_err(|_| ConfigError::InvalidBindAddr {
                var: "LUCKY_BIND_ADDR",
                value,
            })?;
        }
        if let Ok(value) = std::env::var("LUCKY_REDIS_URL") {
            if !value.is_empty() {
                config.redis_url = Some(value);
            }
        }
        if let Ok(value) = std::env::var("LUCKY_KEY_PREFIX") {
            config.key_prefix = value;
        }
        if let Ok(value) = std::env::var("LUCKY_SESSION_TTL_SECS") {
            let secs: u64 = value.parse().map_err(|_| ConfigError::InvalidNumber {
                var: "LUCKY_SESSION_TTL_SECS",
                value,
            })?;
            config.default_ttl = Duration::from_secs(secs);
        }
        if let Ok(value) = std::env::var("LUCKY_CACHE_TIMEOUT_MS") {
            let millis: u64 = value.parse().map_err(|_| ConfigError::InvalidNumber {
                var: "LUCKY_CACHE_TIMEOUT_MS",
                value,
            })?;
            config.op_timeout = Duration::from_millis(millis);
        }

        Ok(config)
    }

    /// Sets the listen address.
    pub fn with_bind_addr(mut self, addr: SocketAddr) -> Self {
        self.bind_addr = addr;
        self
    }

    /// Selects the Redis backend.
    pub fn with_redis_url(mut self, url: impl Into<String>) -> Self {
        self.redis_url = Some(url.into());
        self
    }

    /// Sets the cache key namespace.
    pub fn with_key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = prefix.into();
        self
    }

    /// Sets the default session TTL. Zero disables expiry.
    pub fn with_default_ttl(mut self, ttl: Duration) -> Self {
        self.default_ttl = ttl;
        self
    }

    /// Short backend label for startup logging.
    pub fn backend_name(&self) -> &'static str {
        if cfg!(feature = "redis") && self.redis_url.is_some() {
            "redis"
        } else {
            "in-memory"
        }
    }

    /// Resolves the store backend this configuration selects.
    pub fn backend(&self) -> SessionBackendConfig {
        #[cfg(feature = "redis")]
        {
            if let Some(url) = &self.redis_url {
                return SessionBackendConfig::Redis {
                    url: url.clone(),
                    namespace: self.key_prefix.clone(),
                    default_ttl: self.default_ttl,
                    op_timeout: self.op_timeout,
                };
            }
        }
        SessionBackendConfig::InMemory {
            default_ttl: self.default_ttl,
        }
    }
}
