//! Entity records for Strata.
//!
//! An entity is a 32-byte [`EntityKey`] plus structured metadata. This crate
//! persists entities through the layout engine:
//!
//! - [`RecordStore`] -- serializes a record with bincode, frames it with a
//!   codec tag, optionally compresses it with zstd, and stores it as one blob
//!   at `hash(ENTITY_SALT ‖ key)`
//! - [`GlobalRegistry`] -- the enumerable set of every live entity key
//! - [`ExpiryIndex`] -- per-block sets of entities due to expire
//! - [`EntityStore`] -- the three above, kept consistent through an entity's
//!   lifecycle
//!
//! Runtime choices (hash primitive, record codec, namespaces) come from
//! [`StrataConfig`], usually loaded from TOML.
//!
//! [`EntityKey`]: strata_types::EntityKey

pub mod codec;
pub mod config;
pub mod entity_store;
pub mod error;
pub mod expiry;
pub mod metadata;
pub mod record;
pub mod registry;

pub use codec::RecordCodec;
pub use config::{CodecKind, RecordsConfig, StrataConfig};
pub use entity_store::EntityStore;
pub use error::{ConfigError, RecordError, RecordResult};
pub use expiry::ExpiryIndex;
pub use metadata::{EntityMetadata, NumericAnnotation, StringAnnotation};
pub use record::RecordStore;
pub use registry::GlobalRegistry;
