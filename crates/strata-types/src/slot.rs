use std::fmt;

use alloy_primitives::{B256, U256};
use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Address of a single 32-byte storage cell within a namespace.
///
/// A `Slot` is a 256-bit unsigned integer serialized big-endian. Layouts
/// place related cells at consecutive addresses, so a slot supports checked
/// integer offsets: an address computation that would leave the 256-bit
/// range returns `None` instead of wrapping around.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Slot(B256);

impl Slot {
    /// Slot zero.
    pub const ZERO: Self = Self(B256::ZERO);

    /// Create a slot from a 32-byte hash or raw address.
    pub const fn from_hash(hash: B256) -> Self {
        Self(hash)
    }

    /// Create a slot from its integer form.
    pub fn from_u256(value: U256) -> Self {
        Self(B256::from(value.to_be_bytes::<32>()))
    }

    /// The slot as a 256-bit integer.
    pub fn to_u256(&self) -> U256 {
        U256::from_be_bytes(self.0 .0)
    }

    /// The slot address as a 32-byte word.
    pub fn as_word(&self) -> &B256 {
        &self.0
    }

    /// The raw 32 bytes, big-endian.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0 .0
    }

    /// Address `offset` cells after this one.
    pub fn checked_add(&self, offset: U256) -> Option<Self> {
        self.to_u256().checked_add(offset).map(Self::from_u256)
    }

    /// Address `offset` cells after this one.
    pub fn checked_offset(&self, offset: u64) -> Option<Self> {
        self.checked_add(U256::from(offset))
    }

    /// The next slot, or `None` at the top of the address space.
    pub fn next(&self) -> Option<Self> {
        self.checked_offset(1)
    }

    /// Hex-encoded string representation.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Short hex representation (first 8 characters).
    pub fn short_hex(&self) -> String {
        hex::encode(&self.0[..4])
    }

    /// Parse from a hex string, with or without a `0x` prefix.
    pub fn from_hex(s: &str) -> Result<Self, TypeError> {
        decode_fixed::<32>(s).map(|bytes| Self(B256::from(bytes)))
    }
}

impl fmt::Debug for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Slot({})", self.short_hex())
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", self.to_hex())
    }
}

impl From<B256> for Slot {
    fn from(hash: B256) -> Self {
        Self(hash)
    }
}

impl From<[u8; 32]> for Slot {
    fn from(bytes: [u8; 32]) -> Self {
        Self(B256::from(bytes))
    }
}

impl From<U256> for Slot {
    fn from(value: U256) -> Self {
        Self::from_u256(value)
    }
}

impl From<u64> for Slot {
    fn from(value: u64) -> Self {
        Self::from_u256(U256::from(value))
    }
}

impl From<Slot> for B256 {
    fn from(slot: Slot) -> Self {
        slot.0
    }
}

/// Decode a hex string into exactly `N` bytes.
pub(crate) fn decode_fixed<const N: usize>(s: &str) -> Result<[u8; N], TypeError> {
    let s = s.strip_prefix("0x").unwrap_or(s);
    let bytes = hex::decode(s).map_err(|e| TypeError::InvalidHex(e.to_string()))?;
    if bytes.len() != N {
        return Err(TypeError::InvalidLength {
            expected: N,
            actual: bytes.len(),
        });
    }
    let mut arr = [0u8; N];
    arr.copy_from_slice(&bytes);
    Ok(arr)
}
