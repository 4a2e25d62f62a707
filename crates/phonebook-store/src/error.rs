use phonebook_types::{EntryId, Field};

/// Errors from entry store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No entry has the given id.
    #[error("entry not found: {0}")]
    NotFound(EntryId),

    /// The store's uniqueness constraint on a field was violated.
    #[error("unique constraint violated on {field}: {value:?}")]
    UniqueViolation { field: Field, value: String },

    /// A store-level constraint other than uniqueness was violated.
    #[error("constraint violated on {field}: {reason}")]
    ConstraintViolation { field: Field, reason: String },

    /// Every identifier in the configured id space is taken.
    #[error("id space exhausted: all {capacity} ids are in use")]
    IdSpaceExhausted { capacity: u64 },

    /// Serialization or deserialization failure.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// I/O error from the underlying storage backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A lock guarding store state was poisoned by a panicking writer.
    #[error("store lock poisoned")]
    LockPoisoned,
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
