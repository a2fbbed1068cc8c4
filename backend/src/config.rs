//! Gateway configuration.
//!
//! Values come from the environment (a `.env` file is loaded first when
//! present). Every setting has a default suitable for local development.

use std::env;
use std::path::PathBuf;

use crate::error::{ConfigError, ConfigResult};

/// Maximum accepted upload (in bytes).
///
/// 16 MiB limit, inclusive.
pub const MAX_UPLOAD_BYTES: u64 = 16 * 1024 * 1024;

/// Default port, same as the development server the frontend expects.
pub const DEFAULT_PORT: u16 = 5000;

/// Default upstream prediction service.
pub const DEFAULT_UPSTREAM_URL: &str = "http://127.0.0.1:8000";

/// Default directory holding the built frontend.
pub const DEFAULT_STATIC_DIR: &str = "frontend/dist";

/// Number of ranked predictions returned to clients.
pub const DEFAULT_TOP_K: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct GatewayConfig {
    pub port: u16,
    /// Base URL of the prediction service (without `/predict`)
    pub upstream_url: String,
    pub static_dir: PathBuf,
    pub top_k: usize,
    pub max_upload_bytes: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            upstream_url: DEFAULT_UPSTREAM_URL.to_string(),
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            top_k: DEFAULT_TOP_K,
            max_upload_bytes: MAX_UPLOAD_BYTES,
        }
    }
}

impl GatewayConfig {
    /// Load from process environment, after `.env`.
    pub fn from_env() -> ConfigResult<Self> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> ConfigResult<Self> {
        let mut config = Self::default();

        if let Some(value) = lookup("IMAGECLASS_PORT") {
            config.port = parse("IMAGECLASS_PORT", &value)?;
        }
        if let Some(value) = lookup("IMAGECLASS_UPSTREAM_URL") {
            config.upstream_url = value.trim_end_matches('/').to_string();
        }
        if let Some(value) = lookup("IMAGECLASS_STATIC_DIR") {
            config.static_dir = PathBuf::from(value);
        }
        if let Some(value) = lookup("IMAGECLASS_TOP_K") {
            config.top_k = parse("IMAGECLASS_TOP_K", &value)?;
            if config.top_k == 0 {
                return Err(ConfigError::InvalidValue {
                    key: "IMAGECLASS_TOP_K".to_string(),
                    value,
                });
            }
        }

        Ok(config)
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_upstream(mut self, url: &str) -> Self {
        self.upstream_url = url.trim_end_matches('/').to_string();
        self
    }
}

fn parse<T: std::str::FromStr>(key: &str, value: &str) -> ConfigResult<T> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = GatewayConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, GatewayConfig::default());
        assert_eq!(config.port, 5000);
        assert_eq!(config.top_k, 3);
        assert_eq!(config.max_upload_bytes, 16 * 1024 * 1024);
    }

    #[test]
    fn test_overrides() {
        let config = GatewayConfig::from_lookup(lookup(&[
            ("IMAGECLASS_PORT", "8080"),
            ("IMAGECLASS_UPSTREAM_URL", "http://model:9000/"),
            ("IMAGECLASS_STATIC_DIR", "/srv/www"),
            ("IMAGECLASS_TOP_K", "5"),
        ]))
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.upstream_url, "http://model:9000");
        assert_eq!(config.static_dir, PathBuf::from("/srv/www"));
        assert_eq!(config.top_k, 5);
    }

    #[test]
    fn test_invalid_values() {
        let err = GatewayConfig::from_lookup(lookup(&[("IMAGECLASS_PORT", "http")])).unwrap_err();
        assert!(err.to_string().contains("IMAGECLASS_PORT"));

        assert!(GatewayConfig::from_lookup(lookup(&[("IMAGECLASS_TOP_K", "0")])).is_err());
    }
}
