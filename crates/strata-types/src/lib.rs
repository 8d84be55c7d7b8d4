//! Foundation types for Strata.
//!
//! Strata lays dense arrays, enumerable sets and variable-length blobs out
//! over a flat key-value store whose keys and values are both 32 bytes wide.
//! This crate holds the identifiers every other Strata crate speaks in.
//!
//! # Key Types
//!
//! - [`Slot`] -- 32-byte slot address with checked 256-bit arithmetic
//! - [`Namespace`] -- processor identifier partitioning the slot space
//! - [`EntityKey`] -- 32-byte key of a top-level stored entity
//! - [`B256`] / [`U256`] -- the raw word and integer types, re-exported

pub mod entity;
pub mod error;
pub mod namespace;
pub mod slot;

pub use alloy_primitives::{Address, B256, U256};
pub use entity::EntityKey;
pub use error::TypeError;
pub use namespace::Namespace;
pub use slot::Slot;
