//! The directory's error vocabulary.
//!
//! Every failure the service reports is one of the [`DirectoryError`]
//! variants. Store errors are reclassified here, in one `From` impl, so raw
//! storage errors never reach a caller.

use phonebook_store::StoreError;
use phonebook_types::{EntryId, Field, TypeError};
use thiserror::Error;
use tracing::warn;

/// Errors reported by the directory service.
///
/// The `Display` text of the client-facing variants is the stable message
/// sent back to callers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DirectoryError {
    /// A required field was absent or empty.
    #[error("missing {0}")]
    MissingField(Field),

    /// Another entry already has this name.
    #[error("name must be unique")]
    DuplicateName(String),

    /// The id is not in the store's identifier format.
    #[error("malformatted id")]
    MalformedId(String),

    /// No entry has this id.
    #[error("not found")]
    NotFound(EntryId),

    /// The storage layer failed (connectivity, I/O, exhausted id space).
    #[error("persistence failure: {0}")]
    Persistence(String),

    /// A store-level constraint other than uniqueness rejected the request.
    #[error("{0}")]
    Validation(String),
}

/// Coarse classification of a [`DirectoryError`], used by transports to pick
/// a response status.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorClass {
    /// The caller's request was invalid.
    Client,
    /// The addressed entry does not exist.
    Absent,
    /// The server failed; retrying may help.
    Server,
}

impl DirectoryError {
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::MissingField(_)
            | Self::DuplicateName(_)
            | Self::MalformedId(_)
            | Self::Validation(_) => ErrorClass::Client,
            Self::NotFound(_) => ErrorClass::Absent,
            Self::Persistence(_) => ErrorClass::Server,
        }
    }
}

impl From<StoreError> for DirectoryError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => Self::NotFound(id),
            StoreError::UniqueViolation { value, .. } => Self::DuplicateName(value),
            StoreError::ConstraintViolation { field, reason } => {
                Self::Validation(format!("invalid {field}: {reason}"))
            }
            other @ (StoreError::IdSpaceExhausted { .. }
            | StoreError::Serialization(_)
            | StoreError::Io(_)
            | StoreError::LockPoisoned) => {
                warn!(error = %other, "entry store failure");
                Self::Persistence(other.to_string())
            }
        }
    }
}

impl From<TypeError> for DirectoryError {
    fn from(err: TypeError) -> Self {
        match err {
            TypeError::MalformedId(raw) => Self::MalformedId(raw),
        }
    }
}

/// Result alias for directory operations.
pub type DirectoryResult<T> = Result<T, DirectoryError>;
