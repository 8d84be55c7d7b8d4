//! Slot storage boundary for Strata.
//!
//! The layout engine needs exactly one capability from its host: read and
//! write a 32-byte value at a `(namespace, slot)` address. This crate defines
//! that boundary and an in-memory backend.
//!
//! # Storage Backends
//!
//! All backends implement the [`SlotStore`] trait:
//!
//! - [`InMemorySlotStore`] -- `HashMap`-based store for tests and embedding
//!
//! # Design Rules
//!
//! 1. Every address reads as the all-zero word until written.
//! 2. Writing the all-zero word is a delete; backends may drop the entry.
//! 3. Namespaces are fully disjoint.
//! 4. Consistency is per call. Transactions and durability belong to the
//!    namespace's owner.
//! 5. All backend errors are propagated, never silently ignored.

pub mod error;
pub mod memory;
pub mod traits;

// Re-export primary types at crate root for ergonomic imports.
pub use error::{StoreError, StoreResult};
pub use memory::InMemorySlotStore;
pub use traits::SlotStore;
