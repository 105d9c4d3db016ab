//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, addresses parse)
//! - Check that the selected backend has what it needs
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: PhonebookConfig → Result<(), Vec<ConfigValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;
use thiserror::Error;

use crate::config::schema::{PhonebookConfig, StorageBackend};

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigValidationError {
    #[error("listener address '{0}' is not a valid socket address")]
    InvalidBindAddress(String),

    #[error("metrics address '{0}' is not a valid socket address")]
    InvalidMetricsAddress(String),

    #[error("{0} must be greater than zero")]
    ZeroValue(&'static str),

    #[error("mongo backend requires storage.database_url (or MONGODB_URI)")]
    MissingDatabaseUrl,

    #[error("database url must start with mongodb:// or mongodb+srv://")]
    InvalidDatabaseUrl,

    #[error("{0} must not be empty")]
    Empty(&'static str),
}

/// Validate a parsed configuration.
pub fn validate_config(config: &PhonebookConfig) -> Result<(), Vec<ConfigValidationError>> {
    let mut errors = Vec::new();

    let bind = config.listener.bind_address();
    if bind.parse::<SocketAddr>().is_err() {
        errors.push(ConfigValidationError::InvalidBindAddress(bind));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ConfigValidationError::ZeroValue("timeouts.request_secs"));
    }
    if config.http.max_body_size == 0 {
        errors.push(ConfigValidationError::ZeroValue("http.max_body_size"));
    }

    let observability = &config.observability;
    if observability.metrics_enabled && observability.metrics_address.parse::<SocketAddr>().is_err() {
        errors.push(ConfigValidationError::InvalidMetricsAddress(
            observability.metrics_address.clone(),
        ));
    }

    let storage = &config.storage;
    if storage.backend == StorageBackend::Mongo {
        if storage.database_url.is_empty() {
            errors.push(ConfigValidationError::MissingDatabaseUrl);
        } else if !(storage.database_url.starts_with("mongodb://")
            || storage.database_url.starts_with("mongodb+srv://"))
        {
            errors.push(ConfigValidationError::InvalidDatabaseUrl);
        }
        if storage.database_name.is_empty() {
            errors.push(ConfigValidationError::Empty("storage.database_name"));
        }
        if storage.collection.is_empty() {
            errors.push(ConfigValidationError::Empty("storage.collection"));
        }
        if storage.operation_timeout_ms == 0 {
            errors.push(ConfigValidationError::ZeroValue("storage.operation_timeout_ms"));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(validate_config(&PhonebookConfig::default()), Ok(()));
    }

    #[test]
    fn test_mongo_without_url() {
        let mut config = PhonebookConfig::default();
        config.storage.backend = StorageBackend::Mongo;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors, vec![ConfigValidationError::MissingDatabaseUrl]);
    }

    #[test]
    fn test_collects_every_problem() {
        let mut config = PhonebookConfig::default();
        config.listener.host = "not a host".into();
        config.timeouts.request_secs = 0;
        config.storage.backend = StorageBackend::Mongo;
        config.storage.database_url = "postgres://localhost".into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.contains(&ConfigValidationError::InvalidDatabaseUrl));
        assert!(errors.contains(&ConfigValidationError::ZeroValue("timeouts.request_secs")));
    }

    #[test]
    fn test_metrics_address_checked_only_when_enabled() {
        let mut config = PhonebookConfig::default();
        config.observability.metrics_address = "nowhere".into();
        assert!(validate_config(&config).is_ok());

        config.observability.metrics_enabled = true;
        assert!(validate_config(&config).is_err());
    }
}
