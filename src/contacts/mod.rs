//! Contact records and their validation rules.
//!
//! # Data Flow
//! ```text
//! Request body (JSON)
//!     → types.rs (PersonPayload, optional fields)
//!     → validation.rs (presence check → NewPerson)
//!     → store (schema check at write time, persisted backend only)
//!     → Person (id assigned by the store)
//! ```

pub mod types;
pub mod validation;

pub use types::{NewPerson, Person, PersonPayload};
pub use validation::ValidationError;
