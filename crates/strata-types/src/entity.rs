use std::fmt;

use alloy_primitives::B256;
use serde::{Deserialize, Serialize};

use crate::error::TypeError;
use crate::slot::decode_fixed;

/// Key of a top-level entity.
///
/// Entity keys are opaque 32-byte values. They are members of the global
/// registry and the input to record key derivation; the engine never
/// interprets their contents.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityKey(B256);

impl EntityKey {
    /// Wrap a 32-byte key.
    pub const fn new(key: B256) -> Self {
        Self(key)
    }

    /// Create a random key for tests and demos.
    pub fn ephemeral() -> Self {
        let mut bytes = [0u8; 32];
        rand::Rng::fill(&mut rand::thread_rng(), &mut bytes);
        Self(B256::from(bytes))
    }

    /// The key as a 32-byte word, the form stored in sets.
    pub fn as_word(&self) -> &B256 {
        &self.0
    }

    /// The raw 32 bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0 .0
    }

    /// Full hex-encoded string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from a hex string, with or without a `0x` prefix.
    pub fn from_hex(s: &str) -> Result<Self, TypeError> {
        decode_fixed::<32>(s).map(|bytes| Self(B256::from(bytes)))
    }
}

impl fmt::Debug for EntityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityKey({})", hex::encode(&self.0[..4]))
    }
}

impl fmt::Display for EntityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", self.to_hex())
    }
}

impl From<B256> for EntityKey {
    fn from(key: B256) -> Self {
        Self(key)
    }
}

impl From<EntityKey> for B256 {
    fn from(key: EntityKey) -> Self {
        key.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ephemeral_keys_are_unique() {
        assert_ne!(EntityKey::ephemeral(), EntityKey::ephemeral());
    }

    #[test]
    fn word_conversion_roundtrip() {
        let key = EntityKey::new(B256::repeat_byte(7));
        let word: B256 = key.into();
        assert_eq!(EntityKey::from(word), key);
    }

    #[test]
    fn debug_is_short() {
        let key = EntityKey::new(B256::repeat_byte(0xab));
        assert_eq!(format!("{key:?}"), "EntityKey(abababab)");
    }

    #[test]
    fn hex_roundtrip() {
        let key = EntityKey::ephemeral();
        assert_eq!(EntityKey::from_hex(&key.to_hex()).unwrap(), key);
    }
}
