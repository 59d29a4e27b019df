//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the proxy.
//! All types derive Serde traits for deserialization from config files.

use serde::Deserialize;

/// Key under which the backend base URI is supplied.
pub const PROPERTY_TARGET_BASE_URI: &str = "TargetBaseURI";

/// Root configuration for the proxy.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProxyConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Backend target properties. `None` leaves the proxy inert.
    pub target: Option<TargetProperties>,

    /// Outbound transport settings.
    pub transport: TransportConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            listener: ListenerConfig::default(),
            target: Some(TargetProperties::default()),
            transport: TransportConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Properties describing the single backend the proxy forwards to.
///
/// A section without `TargetBaseURI` clears the target.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TargetProperties {
    /// Absolute scheme+host+port prefix, e.g. `http://backend:9000`.
    #[serde(rename = "TargetBaseURI", default)]
    pub target_base_uri: Option<String>,
}

impl TargetProperties {
    pub fn new(target_base_uri: impl Into<String>) -> Self {
        Self {
            target_base_uri: Some(target_base_uri.into()),
        }
    }
}

impl Default for TargetProperties {
    fn default() -> Self {
        Self::new("http://localhost:8088")
    }
}

/// Outbound transport configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TransportConfig {
    /// Connection establishment timeout in seconds. Unset uses the
    /// transport default.
    pub connect_timeout_secs: Option<u64>,
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log line format.
    pub log_format: LogFormat,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}
