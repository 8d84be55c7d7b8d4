//! Domain-separation salts.
//!
//! These byte strings are mixed into every derived slot address. Changing
//! any of them orphans all data previously written under it.
//!
//! The salts are Strata's own. They are not the salts of any other system
//! that uses the same processor namespaces, so data laid out by such a
//! system is not readable through these derivations, nor the reverse. A
//! store shared with another layout must give Strata namespaces of its own.

use alloy_primitives::B256;
use strata_types::Slot;

use crate::hasher::{HashAlgorithm, SaltedHasher};

/// Prefix of every enumerable set's position index.
pub const SET_SALT: &[u8] = b"strataKeyset";

/// Prefix of entity record head slots.
pub const ENTITY_SALT: &[u8] = b"strataEntity";

/// Literal whose hash is the global registry's set key.
pub const REGISTRY_LABEL: &[u8] = b"strataAllEntities";

/// Prefix of the per-block expiry sets.
pub const EXPIRY_SALT: &[u8] = b"strataExpiresAtBlock";

/// Position-index hasher for the set whose key is `set_key`.
pub fn set_index_hasher(algorithm: HashAlgorithm, set_key: &Slot) -> SaltedHasher {
    SaltedHasher::new(algorithm, SET_SALT).with_suffix(set_key.as_bytes())
}

/// Hasher deriving entity record head slots.
pub fn entity_hasher(algorithm: HashAlgorithm) -> SaltedHasher {
    SaltedHasher::new(algorithm, ENTITY_SALT)
}

/// Set key of the global entity registry.
pub fn registry_set_key(algorithm: HashAlgorithm) -> Slot {
    Slot::from_hash(algorithm.hash(REGISTRY_LABEL))
}

/// Set key of the expiry set for `block`.
pub fn expiry_set_key(algorithm: HashAlgorithm, block: u64) -> Slot {
    let hash: B256 = algorithm.hash_concat(&[EXPIRY_SALT, &block.to_be_bytes()[..]]);
    Slot::from_hash(hash)
}
