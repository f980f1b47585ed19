//! Error types for contact book operations.
//!
//! Validation errors carry the offending input and render as the message the
//! interactive session shows to the user. Storage errors are split by
//! direction: a load failure aborts startup, a write failure leaves the book
//! dirty so the flush can be retried.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for contact book operations.
pub type Result<T> = std::result::Result<T, ContactsError>;

/// Core error type for contact book operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContactsError {
    /// Phone is not exactly 12 decimal digits
    #[error("'{0}' is not a valid phone number")]
    InvalidPhone(String),

    /// E-mail does not match the local@domain shape
    #[error("'{0}' is not a valid e-mail")]
    InvalidEmail(String),

    /// Birthday could not be parsed or is out of range
    #[error("'{0}' is not a valid date")]
    InvalidDate(String),

    /// Name was empty or whitespace only
    #[error("Name cannot be empty")]
    EmptyName,

    /// A contact with this name already exists
    #[error("'{0}' is already in the contact list")]
    DuplicateName(String),

    /// The record already holds this phone
    #[error("Phone '{0}' already exists")]
    DuplicatePhone(String),

    /// Contact name or row index does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// The storage file exists but could not be read or decoded
    #[error("Failed to load contacts from {path}: {reason}")]
    StorageLoad { path: PathBuf, reason: String },

    /// The storage file could not be written
    #[error("Failed to save contacts to {path}: {reason}")]
    StorageWrite { path: PathBuf, reason: String },
}

impl ContactsError {
    pub(crate) fn load(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::StorageLoad {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn write(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::StorageWrite {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_messages() {
        assert_eq!(
            ContactsError::InvalidPhone("123".to_string()).to_string(),
            "'123' is not a valid phone number"
        );
        assert_eq!(
            ContactsError::InvalidDate("13-40".to_string()).to_string(),
            "'13-40' is not a valid date"
        );
    }

    #[test]
    fn test_storage_error_carries_reason() {
        let err = ContactsError::write("/tmp/ab.json", "disk full");
        assert!(err.to_string().contains("/tmp/ab.json"));
        assert!(err.to_string().contains("disk full"));
    }
}
