//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the mock server.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct MockConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Admin surface settings.
    pub admin: AdminConfig,

    /// Region derivation settings.
    pub region: RegionConfig,

    /// Request history settings.
    pub history: HistoryConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
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

/// Admin surface configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AdminConfig {
    /// Path prefix reserved for route-management operations.
    pub path_prefix: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            path_prefix: "/internal".to_string(),
        }
    }
}

impl AdminConfig {
    /// Full path of an admin operation, e.g. `/internal/add`.
    pub fn path_for(&self, operation: &str) -> String {
        format!("{}/{}", self.path_prefix.trim_end_matches('/'), operation)
    }
}

/// Region derivation configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RegionConfig {
    /// Header whose non-empty value overrides the caller address as region key.
    pub identity_header: String,
}

impl Default for RegionConfig {
    fn default() -> Self {
        Self {
            identity_header: "Mock-From".to_string(),
        }
    }
}

/// Request history configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Bodies longer than this are replaced by a placeholder in log lines.
    /// Storage is never bounded by it.
    pub log_preview_bytes: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            log_preview_bytes: 1024 * 1024, // 1 MiB
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Optional file that receives a copy of every log line.
    pub log_file: Option<String>,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_file: None,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
