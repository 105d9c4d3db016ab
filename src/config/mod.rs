//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → environment overrides (PORT, MONGODB_URI)
//!     → command-line overrides (main.rs)
//!     → validation.rs (semantic checks)
//!     → PhonebookConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{
    HttpConfig, ListenerConfig, ObservabilityConfig, PhonebookConfig, StorageBackend,
    StorageConfig, TimeoutConfig,
};
pub use validation::{validate_config, ConfigValidationError};
