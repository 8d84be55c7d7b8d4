//! Persistent data layouts over a 32-byte slot store.
//!
//! Every structure here is a borrowed projection over a [`SlotStore`]
//! namespace: it owns no memory beyond the slots it addresses and keeps no
//! state between calls.
//!
//! # Layouts
//!
//! - [`DynamicArray`] -- length at base slot `B`, element `i` at `B + 1 + i`
//! - [`SaltedHashIndex`] -- `key -> value` stored at `hash(salt ‖ key)`
//! - [`EnumerableSet`] -- array plus 1-based position index; O(1) add,
//!   remove and membership, fully enumerable
//! - [`blob`] -- short/long encoding of byte strings across consecutive slots
//!
//! # Concurrency
//!
//! Operations are plain sequences of store reads and writes. Consistency is
//! whatever the store provides per call; callers must serialize mutation of
//! any single structure instance.
//!
//! [`SlotStore`]: strata_store::SlotStore

pub mod array;
pub mod blob;
pub mod error;
pub mod index;
pub mod set;
pub mod word;

pub use array::{ArrayIter, DynamicArray};
pub use blob::{delete_blob, encode, get_blob, set_blob, slot_count, MAX_SHORT_LEN};
pub use error::{LayoutError, LayoutResult};
pub use index::SaltedHashIndex;
pub use set::EnumerableSet;
