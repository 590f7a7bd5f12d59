//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//!
//! ## Store connection
//!
//! ### Method 1: Full URL
//!
//! ```bash
//! export REDIS_URL="redis://localhost:6379/0"
//! ```
//!
//! ### Method 2: Individual components
//!
//! ```bash
//! export REDIS_HOST="localhost"
//! export REDIS_PORT="6379"
//! export REDIS_PASSWORD=""
//! export REDIS_DB="0"
//! ```
//!
//! If neither is set, `redis://127.0.0.1:6379/0` is used.
//!
//! ## Optional Variables
//!
//! - `STORE_BACKEND` - `redis` or `memory` (default: `redis`)
//! - `STORE_CONNECT_RETRIES` - Extra connection attempts at startup (default: 5, max: 20)
//! - `LISTEN` - Bind address (default: `0.0.0.0:8000`)
//! - `SHORT_URL_BASE` - Prefix of rendered short URLs (default: `http://8000`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)

use anyhow::{Context, Result};
use std::env;
use std::str::FromStr;

const DEFAULT_REDIS_URL: &str = "redis://127.0.0.1:6379/0";

/// Which mapping store the service talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Redis,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "redis" => Ok(Self::Redis),
            "memory" => Ok(Self::Memory),
            other => anyhow::bail!("STORE_BACKEND must be 'redis' or 'memory', got '{}'", other),
        }
    }
}

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub redis_url: String,
    pub store_backend: StoreBackend,
    /// Extra attempts made when the store is unreachable at startup.
    pub store_connect_retries: usize,
    pub listen_addr: String,
    /// Rendered short URL is `{short_url_base}/{alias}`.
    pub short_url_base: String,
    pub log_level: String,
    pub log_format: String,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `STORE_BACKEND` has an unknown value.
    pub fn from_env() -> Result<Self> {
        let redis_url = Self::load_redis_url();

        let store_backend = env::var("STORE_BACKEND")
            .unwrap_or_else(|_| "redis".to_string())
            .parse::<StoreBackend>()
            .context("Failed to load store configuration")?;

        let store_connect_retries = env::var("STORE_CONNECT_RETRIES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(5);

        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:8000".to_string());
        let short_url_base =
            env::var("SHORT_URL_BASE").unwrap_or_else(|_| "http://8000".to_string());
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        Ok(Self {
            redis_url,
            store_backend,
            store_connect_retries,
            listen_addr,
            short_url_base,
            log_level,
            log_format,
        })
    }

    /// Loads Redis URL with fallback to component-based configuration.
    ///
    /// Priority:
    /// 1. `REDIS_URL` environment variable
    /// 2. Constructed from `REDIS_HOST`, `REDIS_PORT`, `REDIS_PASSWORD`, `REDIS_DB`
    /// 3. `redis://127.0.0.1:6379/0`
    fn load_redis_url() -> String {
        if let Ok(url) = env::var("REDIS_URL") {
            return url;
        }

        let Ok(host) = env::var("REDIS_HOST") else {
            return DEFAULT_REDIS_URL.to_string();
        };
        let port = env::var("REDIS_PORT").unwrap_or_else(|_| "6379".to_string());
        let db = env::var("REDIS_DB").unwrap_or_else(|_| "0".to_string());

        match env::var("REDIS_PASSWORD") {
            // Empty password means no authentication
            Ok(pwd) if !pwd.is_empty() => format!("redis://:{}@{}:{}/{}", pwd, host, port, db),
            _ => format!("redis://{}:{}/{}", host, port, db),
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` is not `host:port`
    /// - the Redis URL scheme is not `redis://` or `rediss://`
    /// - `store_connect_retries` exceeds 20
    /// - `short_url_base` is empty
    pub fn validate(&self) -> Result<()> {
        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        if self.store_backend == StoreBackend::Redis
            && !self.redis_url.starts_with("redis://")
            && !self.redis_url.starts_with("rediss://")
        {
            anyhow::bail!(
                "REDIS_URL must start with 'redis://' or 'rediss://', got '{}'",
                mask_connection_string(&self.redis_url)
            );
        }

        if self.store_connect_retries > 20 {
            anyhow::bail!(
                "STORE_CONNECT_RETRIES is too large (max: 20), got {}",
                self.store_connect_retries
            );
        }

        if self.short_url_base.trim().is_empty() {
            anyhow::bail!("SHORT_URL_BASE must not be empty");
        }

        Ok(())
    }

    /// Prints configuration summary (without sensitive data).
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        match self.store_backend {
            StoreBackend::Redis => {
                tracing::info!("  Store: {}", mask_connection_string(&self.redis_url))
            }
            StoreBackend::Memory => tracing::info!("  Store: in-memory"),
        }
        tracing::info!("  Short URL base: {}", self.short_url_base);
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

/// Masks sensitive information in connection strings for logging.
///
/// `redis://:password@host:port/db` → `redis://:***@host:port/db`
fn mask_connection_string(url: &str) -> String {
    if let Some(start) = url.find("://") {
        let scheme_end = start + 3;
        let rest = &url[scheme_end..];

        if let Some(at_pos) = rest.find('@') {
            let credentials = &rest[..at_pos];
            let host_part = &rest[at_pos..];

            if let Some(colon_pos) = credentials.rfind(':') {
                let username = &credentials[..colon_pos];
                return format!("{}://{}:***{}", &url[..start], username, host_part);
            }
        }
    }

    url.to_string()
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if variables are malformed or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
