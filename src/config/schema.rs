//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the relay.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Default TAP endpoint of the NASA Exoplanet Archive.
pub const DEFAULT_TAP_BASE_URL: &str = "https://exoplanetarchive.ipac.caltech.edu/TAP/sync";

/// Root configuration for the relay.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RelayConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Upstream TAP service settings.
    pub upstream: UpstreamConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl RelayConfig {
    /// Apply command-line overrides on top of the loaded configuration.
    pub fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(bind) = overrides.bind_address {
            self.listener.bind_address = bind;
        }
        if let Some(url) = overrides.upstream_url {
            self.upstream.base_url = url;
        }
        if let Some(level) = overrides.log_level {
            self.observability.log_level = level;
        }
    }
}

/// Values supplied on the command line that win over the config file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub bind_address: Option<String>,
    pub upstream_url: Option<String>,
    pub log_level: Option<String>,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "127.0.0.1:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8080".to_string(),
        }
    }
}

/// Upstream TAP service configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Base URL that `query` and `format` are appended to.
    pub base_url: String,

    /// Total request timeout in seconds. `None` waits indefinitely.
    pub timeout_secs: Option<u64>,

    /// User-Agent sent with every upstream request.
    pub user_agent: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_TAP_BASE_URL.to_string(),
            timeout_secs: None,
            user_agent: concat!("tap-cors-proxy/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level or EnvFilter directive (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format: "pretty" or "json".
    pub log_format: String,

    /// Log the full upstream URL, query text included, for every relayed call.
    pub log_upstream_urls: bool,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: "pretty".to_string(),
            log_upstream_urls: true,
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: RelayConfig = toml::from_str(
            r#"
            [listener]
            bind_address = "0.0.0.0:9000"
            "#,
        )
        .unwrap();

        assert_eq!(config.listener.bind_address, "0.0.0.0:9000");
        assert_eq!(config.upstream.base_url, DEFAULT_TAP_BASE_URL);
        assert_eq!(config.upstream.timeout_secs, None);
        assert!(config.observability.log_upstream_urls);
    }

    #[test]
    fn test_overrides_replace_only_given_fields() {
        let mut config = RelayConfig::default();
        config.apply_overrides(ConfigOverrides {
            bind_address: Some("127.0.0.1:3001".into()),
            upstream_url: None,
            log_level: Some("debug".into()),
        });

        assert_eq!(config.listener.bind_address, "127.0.0.1:3001");
        assert_eq!(config.upstream.base_url, DEFAULT_TAP_BASE_URL);
        assert_eq!(config.observability.log_level, "debug");
    }
}
