use crate::errors::Error;
use std::time::Duration;

/// Environment variables recognized at startup. A missing required variable
/// is a fatal configuration error, never a runtime one.
pub const ENV_STORE_URI: &str = "STORE_URI";
pub const ENV_COLLECTION_NAME: &str = "COLLECTION_NAME";
pub const ENV_CACHE_AUTH_TOKEN: &str = "CACHE_AUTH_TOKEN";
pub const ENV_CONNECT_TIMEOUT_MS: &str = "CONNECT_TIMEOUT_MS";
pub const ENV_CACHE_TTL_SECS: &str = "CACHE_TTL_SECS";

const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 1000;
const DEFAULT_CACHE_TTL_SECS: u64 = 60;

/// Process configuration for the store and cache collaborators.
#[derive(Debug, Clone)]
pub struct Config {
    /// Connection URI of the source-of-truth document store.
    pub store_uri: String,
    /// Collection name; doubles as the cache namespace.
    pub namespace: String,
    /// Credential presented to the cache store.
    pub cache_auth_token: String,
    /// Bound on the one-time store connection attempt.
    pub connect_timeout: Duration,
    /// Time-to-live applied to every cache entry.
    pub cache_ttl: Duration,
}

impl Config {
    /// Reads configuration from process environment variables.
    ///
    /// # Errors
    /// Returns `Error::Configuration` when a required variable is absent or
    /// an optional one fails to parse.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads configuration through a caller-supplied lookup, which keeps the
    /// parsing logic testable without mutating process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &str| -> Result<String, Error> {
            lookup(name).ok_or_else(|| Error::Configuration(format!("missing {name}")))
        };
        let store_uri = required(ENV_STORE_URI)?;
        let namespace = required(ENV_COLLECTION_NAME)?;
        let cache_auth_token = required(ENV_CACHE_AUTH_TOKEN)?;

        let connect_timeout_ms = match lookup(ENV_CONNECT_TIMEOUT_MS) {
            Some(raw) => raw.parse::<u64>().map_err(|_| {
                Error::Configuration(format!("invalid {ENV_CONNECT_TIMEOUT_MS}: {raw}"))
            })?,
            None => DEFAULT_CONNECT_TIMEOUT_MS,
        };
        let cache_ttl_secs = match lookup(ENV_CACHE_TTL_SECS) {
            Some(raw) => raw.parse::<u64>().map_err(|_| {
                Error::Configuration(format!("invalid {ENV_CACHE_TTL_SECS}: {raw}"))
            })?,
            None => DEFAULT_CACHE_TTL_SECS,
        };

        Ok(Self {
            store_uri,
            namespace,
            cache_auth_token,
            connect_timeout: Duration::from_millis(connect_timeout_ms),
            cache_ttl: Duration::from_secs(cache_ttl_secs),
        })
    }
}
