//! Startup orchestration.
//!
//! # Responsibilities
//! - Build the configured person store
//! - Seed the in-memory store with sample data when asked
//! - Connect to MongoDB and report whether it answered
//!
//! # Design Decisions
//! - Only a malformed connection string is fatal; a database that does not
//!   answer the startup ping is logged and the server starts anyway

use std::sync::Arc;
use thiserror::Error;

use crate::config::{StorageBackend, StorageConfig};
use crate::store::{InMemoryStore, MongoStore, PersonStore, StoreError};

/// Errors that prevent the service from starting.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to configure MongoDB client: {0}")]
    Store(#[from] StoreError),

    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },
}

/// Build the store selected by `config.backend`.
pub async fn build_store(config: &StorageConfig) -> Result<Arc<dyn PersonStore>, StartupError> {
    match config.backend {
        StorageBackend::Memory => {
            let store = if config.seed_sample_data {
                InMemoryStore::with_sample_data()
            } else {
                InMemoryStore::new()
            };
            tracing::info!(seeded = config.seed_sample_data, "Using in-memory store");
            Ok(Arc::new(store))
        }
        StorageBackend::Mongo => {
            tracing::info!(
                database = %config.database_name,
                collection = %config.collection,
                "Connecting to MongoDB"
            );
            let store = MongoStore::from_config(config).await?;
            match store.ping().await {
                Ok(()) => tracing::info!("connected to MongoDB"),
                Err(e) => tracing::error!(error = %e, "error connecting to MongoDB"),
            }
            Ok(Arc::new(store))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_store_seeded() {
        let config = StorageConfig::default();
        let store = build_store(&config).await.unwrap();
        assert_eq!(store.backend(), StorageBackend::Memory);
        assert_eq!(store.count().await.unwrap(), 4);
    }

    #[tokio::test]
    async fn test_memory_store_empty() {
        let config = StorageConfig {
            seed_sample_data: false,
            ..StorageConfig::default()
        };
        let store = build_store(&config).await.unwrap();
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_unreachable_mongo_still_starts() {
        let config = StorageConfig {
            backend: StorageBackend::Mongo,
            database_url: "mongodb://127.0.0.1:9/?directConnection=true".into(),
            operation_timeout_ms: 200,
            ..StorageConfig::default()
        };
        let store = build_store(&config).await.unwrap();
        assert_eq!(store.backend(), StorageBackend::Mongo);
    }

    #[tokio::test]
    async fn test_malformed_mongo_url_is_fatal() {
        let config = StorageConfig {
            backend: StorageBackend::Mongo,
            database_url: "not-a-mongodb-url".into(),
            ..StorageConfig::default()
        };
        assert!(matches!(build_store(&config).await, Err(StartupError::Store(_))));
    }
}
