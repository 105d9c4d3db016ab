//! Phonebook service library.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ──────────────▶ http::server (middleware stack)
//!                         │
//!                         ▼
//!                     http::handlers ──▶ contacts (presence + schema checks)
//!                         │
//!                         ▼
//!                     store::PersonStore
//!                       ├── InMemoryStore (seeded sample data)
//!                       └── MongoStore    (collection "people")
//!
//!     Cross-cutting: config, observability (logs, metrics), lifecycle
//! ```

pub mod config;
pub mod contacts;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod store;

pub use config::PhonebookConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
