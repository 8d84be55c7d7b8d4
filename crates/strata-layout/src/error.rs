use strata_store::StoreError;
use strata_types::Slot;

/// Errors from layout operations.
#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    /// Array `get`/`set` with an index at or past the current size.
    #[error("index {index} out of range for array of size {size}")]
    IndexOutOfRange { index: u64, size: u64 },

    /// `remove_last` on an array with no elements.
    #[error("array is empty")]
    EmptyArray,

    /// A length or position word does not describe a representable length.
    #[error("corrupt length word at {slot}")]
    CorruptLength { slot: Slot },

    /// An element or chunk address would fall past the top of the slot space.
    #[error("slot address overflow from base {base}")]
    SlotOverflow { base: Slot },

    /// Failure reported by the underlying slot store.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// Result alias for layout operations.
pub type LayoutResult<T> = Result<T, LayoutError>;
