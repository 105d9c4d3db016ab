//! Contact record types.

use serde::{Deserialize, Serialize};

use crate::contacts::validation::{require_fields, ValidationError};

/// A stored phonebook entry.
///
/// Field order matches the JSON the service has always produced:
/// `{"name": .., "number": .., "id": ..}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub name: String,
    pub number: String,
    /// Assigned by the store, never by the caller.
    pub id: String,
}

/// The caller-supplied part of a record, after the presence check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPerson {
    pub name: String,
    pub number: String,
}

impl NewPerson {
    pub fn new(name: impl Into<String>, number: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            number: number.into(),
        }
    }

    /// Attach a store-assigned id.
    pub fn with_id(self, id: impl Into<String>) -> Person {
        Person {
            name: self.name,
            number: self.number,
            id: id.into(),
        }
    }
}

/// Raw request body for create and update.
///
/// Both fields are optional here so a missing key surfaces as a
/// [`ValidationError`] rather than a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PersonPayload {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub number: Option<String>,
}

impl TryFrom<PersonPayload> for NewPerson {
    type Error = ValidationError;

    fn try_from(payload: PersonPayload) -> Result<Self, Self::Error> {
        require_fields(payload)
    }
}
