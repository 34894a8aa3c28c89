//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from TOML files.

use serde::{Deserialize, Serialize};

use crate::headers::HeaderSet;

/// Environment variable consulted for headers when none are configured.
pub const DEFAULT_ENV_VAR: &str = "EXTRA_HEADERS";

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ExtraHeadersConfig {
    /// Where the extra headers come from.
    pub headers: HeadersConfig,

    /// Base transport settings.
    pub transport: TransportConfig,

    /// Logging settings.
    pub observability: ObservabilityConfig,
}

/// Header sources.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HeadersConfig {
    /// Structured `name = value` table.
    pub extra: HeaderSet,

    /// Flat `"Key: Value, Key2: Value2"` string.
    pub spec: Option<String>,

    /// Environment variable holding a JSON object of headers, used only
    /// when `extra` and `spec` yield nothing.
    pub env_var: String,
}

impl Default for HeadersConfig {
    fn default() -> Self {
        Self {
            extra: HeaderSet::new(),
            spec: None,
            env_var: DEFAULT_ENV_VAR.to_string(),
        }
    }
}

/// Base transport configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TransportConfig {
    /// Accept invalid TLS certificates.
    pub insecure: bool,

    /// Total request timeout in seconds.
    pub timeout_secs: u64,

    /// User-Agent sent when the caller sets none.
    pub user_agent: String,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            insecure: false,
            timeout_secs: 30,
            user_agent: concat!("extra-headers/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
