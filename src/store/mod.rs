//! Record storage subsystem.
//!
//! # Data Flow
//! ```text
//! handler
//!     → PersonStore (trait object held in AppState)
//!         → memory.rs  (Mutex<Vec<Person>>, no I/O)
//!         → mongo.rs   (MongoDB collection, bounded by a per-call timeout)
//!     → StoreResult<T>
//!     → http::error (translation to status codes)
//! ```
//!
//! # Design Decisions
//! - One trait, two implementations, chosen once at startup
//! - Every operation is async, even when the backend never suspends
//! - Failures are values (`StoreError`), never panics
//! - A failed write leaves the collection untouched

pub mod memory;
pub mod mongo;

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

use crate::config::StorageBackend;
use crate::contacts::{NewPerson, Person, ValidationError};

pub use memory::InMemoryStore;
pub use mongo::MongoStore;

/// Errors produced by a [`PersonStore`].
#[derive(Debug, Error)]
pub enum StoreError {
    /// The id does not parse as an identifier for this backend.
    #[error("malformatted id: {0}")]
    MalformedId(String),

    /// The record failed validation at write time.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Another record already uses this name.
    #[error("name must be unique: {0}")]
    DuplicateName(String),

    /// The backend does not implement this operation. Only the in-memory
    /// `update_by_id` returns it, and the update handler never calls that
    /// (it answers in-memory updates itself), so reaching a handler means a
    /// routing bug and is reported as a 500.
    #[error("{operation} is not supported by the {backend} backend")]
    Unsupported {
        operation: &'static str,
        backend: StorageBackend,
    },

    /// The database could not be reached or rejected the request.
    #[error("database unavailable: {0}")]
    Unavailable(String),

    /// The database did not answer in time.
    #[error("database operation timed out after {0:?}")]
    Timeout(Duration),
}

impl StoreError {
    /// Short label used in logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            StoreError::MalformedId(_) => "malformed_id",
            StoreError::Validation(_) => "validation",
            StoreError::DuplicateName(_) => "duplicate_name",
            StoreError::Unsupported { .. } => "unsupported",
            StoreError::Unavailable(_) => "unavailable",
            StoreError::Timeout(_) => "timeout",
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Capability set shared by every storage backend.
#[async_trait]
pub trait PersonStore: Send + Sync + 'static {
    /// Which backend this is. Handlers use it for the few places where the
    /// HTTP contract differs between backends.
    fn backend(&self) -> StorageBackend;

    /// All records, in store order.
    async fn list(&self) -> StoreResult<Vec<Person>>;

    /// Exact id lookup. `Ok(None)` when no record has this id.
    async fn find_by_id(&self, id: &str) -> StoreResult<Option<Person>>;

    /// Store a new record under a freshly generated id.
    async fn insert(&self, person: NewPerson) -> StoreResult<Person>;

    /// Replace name and number of an existing record, keeping its id.
    /// `Ok(None)` when no record has this id.
    ///
    /// Persisted backend only. The in-memory backend returns
    /// [`StoreError::Unsupported`]; `http::handlers::update_person` stubs
    /// in-memory updates before getting here.
    async fn update_by_id(&self, id: &str, person: NewPerson) -> StoreResult<Option<Person>>;

    /// Remove a record. Succeeds whether or not the record existed.
    async fn delete_by_id(&self, id: &str) -> StoreResult<()>;

    /// Number of stored records.
    async fn count(&self) -> StoreResult<usize>;
}
