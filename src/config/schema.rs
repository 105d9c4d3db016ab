//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the service.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Root configuration for the phonebook service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct PhonebookConfig {
    /// Listener configuration (host and port).
    pub listener: ListenerConfig,

    /// Record storage backend.
    pub storage: StorageConfig,

    /// HTTP surface settings (CORS, static files, body limit).
    pub http: HttpConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Interface to bind (e.g., "0.0.0.0").
    pub host: String,

    /// TCP port. Overridden by the `PORT` environment variable.
    pub port: u16,
}

impl ListenerConfig {
    /// `host:port` string suitable for binding.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3001,
        }
    }
}

/// Which record store the service runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Process memory; records vanish on restart.
    #[default]
    Memory,
    /// A MongoDB collection.
    Mongo,
}

impl StorageBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageBackend::Memory => "memory",
            StorageBackend::Mongo => "mongo",
        }
    }
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "memory" => Ok(StorageBackend::Memory),
            "mongo" | "mongodb" => Ok(StorageBackend::Mongo),
            other => Err(format!("unknown storage backend '{}'", other)),
        }
    }
}

/// Storage configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Backend selection.
    pub backend: StorageBackend,

    /// Seed the in-memory backend with the sample entries.
    pub seed_sample_data: bool,

    /// MongoDB connection string. Overridden by `MONGODB_URI`.
    pub database_url: String,

    /// Database used when the connection string names none.
    pub database_name: String,

    /// Collection holding the records.
    pub collection: String,

    /// Upper bound for a single database call, in milliseconds.
    pub operation_timeout_ms: u64,
}

impl StorageConfig {
    pub fn operation_timeout(&self) -> Duration {
        Duration::from_millis(self.operation_timeout_ms)
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Memory,
            seed_sample_data: true,
            database_url: String::new(),
            database_name: "phonebook".to_string(),
            collection: "people".to_string(),
            operation_timeout_ms: 5_000,
        }
    }
}

/// HTTP surface configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Allow cross-origin requests from any origin.
    pub cors_enabled: bool,

    /// Directory with a bundled front-end, served for unmatched paths.
    pub static_dir: Option<String>,

    /// Maximum request body size in bytes.
    pub max_body_size: usize,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            cors_enabled: true,
            static_dir: None,
            max_body_size: 64 * 1024,
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Default `tracing` filter directive. `RUST_LOG` takes precedence.
    pub log_filter: String,

    /// Emit logs as JSON lines instead of human-readable text.
    pub json_logs: bool,

    /// Emit one access log line per request.
    pub access_log: bool,

    /// Enable Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_filter: "phonebook=info,tower_http=info".to_string(),
            json_logs: false,
            access_log: true,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config: PhonebookConfig = toml::from_str("").unwrap();
        assert_eq!(config.listener.bind_address(), "0.0.0.0:3001");
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert!(config.storage.seed_sample_data);
        assert_eq!(config.storage.operation_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_partial_sections() {
        let config: PhonebookConfig = toml::from_str(
            r#"
            [listener]
            port = 8080

            [storage]
            backend = "mongo"
            database_url = "mongodb://localhost:27017/phonebook"
            "#,
        )
        .unwrap();

        assert_eq!(config.listener.host, "0.0.0.0");
        assert_eq!(config.listener.port, 8080);
        assert_eq!(config.storage.backend, StorageBackend::Mongo);
        assert_eq!(config.storage.collection, "people");
    }

    #[test]
    fn test_backend_from_str() {
        assert_eq!("memory".parse(), Ok(StorageBackend::Memory));
        assert_eq!("MongoDB".parse(), Ok(StorageBackend::Mongo));
        assert!("postgres".parse::<StorageBackend>().is_err());
    }
}
