use std::fmt;

use alloy_primitives::{address, Address};
use serde::{Deserialize, Serialize};

use crate::error::TypeError;
use crate::slot::decode_fixed;

/// Identifier of the processor that owns a partition of the slot space.
///
/// Two namespaces never share slots: the same [`Slot`](crate::Slot) in two
/// namespaces addresses two independent cells. Every layout instance is
/// bound to exactly one namespace.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Namespace(Address);

impl Namespace {
    /// Namespace of the general storage processor (entity records, expiry).
    pub const STORAGE_PROCESSOR: Self =
        Self(address!("0000000000000000000000000000000060138453"));

    /// Namespace of the registry processor (the global entity registry).
    pub const REGISTRY_PROCESSOR: Self =
        Self(address!("0000000000000000000000000000000060138454"));

    /// Wrap a raw processor address.
    pub const fn new(address: Address) -> Self {
        Self(address)
    }

    /// The underlying 20-byte address.
    pub fn address(&self) -> &Address {
        &self.0
    }

    /// Hex-encoded string representation.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from a hex string, with or without a `0x` prefix.
    pub fn from_hex(s: &str) -> Result<Self, TypeError> {
        decode_fixed::<20>(s).map(|bytes| Self(Address::from(bytes)))
    }
}

impl fmt::Debug for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Namespace(0x{})", self.to_hex())
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", self.to_hex())
    }
}

impl From<Address> for Namespace {
    fn from(address: Address) -> Self {
        Self(address)
    }
}
