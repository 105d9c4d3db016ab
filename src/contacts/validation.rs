//! Record validation.
//!
//! Two levels:
//! - presence: `name` and `number` must be present and non-empty (every backend)
//! - schema: name length and phone number format (persisted backend, at write time)

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::contacts::types::{NewPerson, PersonPayload};

/// Minimum name length, in characters.
pub const MIN_NAME_LEN: usize = 3;

/// `DD-DDDDDD+` or `DDD-DDDDD+`, ASCII digits only.
static NUMBER_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]{2}-[0-9]{6,}$|^[0-9]{3}-[0-9]{5,}$").expect("number pattern is valid")
});

/// Reasons a record is rejected before it reaches storage.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("JSON must have valid keys: name, number")]
    MissingFields,

    #[error("name `{name}` is shorter than the minimum allowed length ({MIN_NAME_LEN})")]
    NameTooShort { name: String },

    #[error(
        "{number} is not valid phone number, format: xx-xxxxxx... or xxx-xxxxx... \
         where x=digit(0-9), ...=as many digits as you want"
    )]
    InvalidNumber { number: String },
}

/// Presence check shared by create and update.
pub fn require_fields(payload: PersonPayload) -> Result<NewPerson, ValidationError> {
    match (payload.name, payload.number) {
        (Some(name), Some(number)) if !name.is_empty() && !number.is_empty() => {
            Ok(NewPerson { name, number })
        }
        _ => Err(ValidationError::MissingFields),
    }
}

/// Schema check applied by the persisted backend before every write.
pub fn validate_schema(person: &NewPerson) -> Result<(), ValidationError> {
    if person.name.chars().count() < MIN_NAME_LEN {
        return Err(ValidationError::NameTooShort {
            name: person.name.clone(),
        });
    }
    if !is_valid_number(&person.number) {
        return Err(ValidationError::InvalidNumber {
            number: person.number.clone(),
        });
    }
    Ok(())
}

pub fn is_valid_number(number: &str) -> bool {
    NUMBER_PATTERN.is_match(number)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(name: Option<&str>, number: Option<&str>) -> PersonPayload {
        PersonPayload {
            name: name.map(str::to_string),
            number: number.map(str::to_string),
        }
    }

    #[test]
    fn test_presence_check() {
        assert!(require_fields(payload(Some("Ada"), Some("1"))).is_ok());
        assert_eq!(
            require_fields(payload(None, Some("040-123456"))),
            Err(ValidationError::MissingFields)
        );
        assert_eq!(
            require_fields(payload(Some("Ada"), None)),
            Err(ValidationError::MissingFields)
        );
        assert_eq!(
            require_fields(payload(Some(""), Some("040-123456"))),
            Err(ValidationError::MissingFields)
        );
    }

    #[test]
    fn test_number_format() {
        assert!(is_valid_number("09-123456"));
        assert!(is_valid_number("040-12345"));
        assert!(is_valid_number("040-1234567890"));

        assert!(!is_valid_number("123456"));
        assert!(!is_valid_number("0-1234567"));
        assert!(!is_valid_number("09-12345"));
        assert!(!is_valid_number("0400-123456"));
        assert!(!is_valid_number("040-1234"));
        assert!(!is_valid_number("39-44-5323523"));
        assert!(!is_valid_number("040-12345 "));
        // Non-ASCII digits are rejected.
        assert!(!is_valid_number("٠٤٠-١٢٣٤٥"));
    }

    #[test]
    fn test_name_length_counts_characters() {
        assert!(validate_schema(&NewPerson::new("Åsa", "040-12345")).is_ok());
        assert_eq!(
            validate_schema(&NewPerson::new("Al", "040-12345")),
            Err(ValidationError::NameTooShort { name: "Al".into() })
        );
    }

    #[test]
    fn test_invalid_number_message() {
        let err = validate_schema(&NewPerson::new("Ada Lovelace", "123456")).unwrap_err();
        assert!(err.to_string().starts_with("123456 is not valid phone number"));
    }
}
