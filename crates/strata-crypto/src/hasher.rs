use alloy_primitives::{Keccak256, B256};
use serde::{Deserialize, Serialize};
use strata_types::Slot;

/// Hash primitive used to derive slot addresses.
///
/// Keccak-256 is the persisted default. BLAKE3 is available for stores that
/// are not shared with Keccak-addressed data; the two must never be mixed in
/// one namespace.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    #[default]
    Keccak256,
    Blake3,
}

impl HashAlgorithm {
    /// Hash the concatenation of `parts`, with no separator between them.
    pub fn hash_concat(&self, parts: &[&[u8]]) -> B256 {
        match self {
            Self::Keccak256 => {
                let mut hasher = Keccak256::new();
                for part in parts {
                    hasher.update(part);
                }
                hasher.finalize()
            }
            Self::Blake3 => {
                let mut hasher = blake3::Hasher::new();
                for part in parts {
                    hasher.update(part);
                }
                B256::from(*hasher.finalize().as_bytes())
            }
        }
    }

    /// Hash a single byte string.
    pub fn hash(&self, data: &[u8]) -> B256 {
        self.hash_concat(&[data])
    }
}

/// Salt-prefixed hasher that maps keys to slot addresses.
///
/// `hash(key)` computes `H(salt ‖ key)`. Two hashers with different salts
/// map the same key to unrelated slots, which is what keeps independent
/// structures sharing one namespace from colliding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SaltedHasher {
    algorithm: HashAlgorithm,
    salt: Vec<u8>,
}

impl SaltedHasher {
    /// Create a hasher with an explicit algorithm and salt.
    pub fn new(algorithm: HashAlgorithm, salt: impl Into<Vec<u8>>) -> Self {
        Self {
            algorithm,
            salt: salt.into(),
        }
    }

    /// A hasher whose salt is this salt followed by `suffix`.
    pub fn with_suffix(&self, suffix: &[u8]) -> Self {
        let mut salt = Vec::with_capacity(self.salt.len() + suffix.len());
        salt.extend_from_slice(&self.salt);
        salt.extend_from_slice(suffix);
        Self {
            algorithm: self.algorithm,
            salt,
        }
    }

    /// `H(salt ‖ key)`.
    pub fn hash(&self, key: &[u8]) -> B256 {
        self.algorithm.hash_concat(&[self.salt.as_slice(), key])
    }

    /// The slot derived for `key`.
    pub fn slot(&self, key: &[u8]) -> Slot {
        Slot::from_hash(self.hash(key))
    }

    pub fn salt(&self) -> &[u8] {
        &self.salt
    }

    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }
}
