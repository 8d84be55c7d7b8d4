use strata_types::{Namespace, Slot};

/// Errors from slot store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backend failed to read a slot.
    #[error("read of {slot} in {namespace} failed: {reason}")]
    ReadFailed {
        namespace: Namespace,
        slot: Slot,
        reason: String,
    },

    /// The backend failed to write a slot.
    #[error("write of {slot} in {namespace} failed: {reason}")]
    WriteFailed {
        namespace: Namespace,
        slot: Slot,
        reason: String,
    },

    /// I/O error from the underlying storage backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Any other backend failure.
    #[error("backend error: {0}")]
    Backend(String),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
