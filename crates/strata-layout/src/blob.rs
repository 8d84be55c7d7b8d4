//! Variable-length byte strings across consecutive slots.
//!
//! The head slot `K` says which of two forms follows. The discriminator is
//! the low bit of the head's last byte:
//!
//! ```text
//! short (len <= 31), bit 0 clear:
//!   K      [ payload, zero-padded to 31 bytes ][ len * 2 ]
//!
//! long (len >= 32), bit 0 set:
//!   K      big-endian integer len * 2 + 1
//!   K + 1  payload bytes 0..32
//!   K + 2  payload bytes 32..64
//!   ...    last chunk zero-padded
//! ```
//!
//! This is a persisted format. Identical inputs must produce byte-identical
//! chunks.

use strata_store::SlotStore;
use strata_types::{Namespace, Slot, B256, U256};
use tracing::debug;

use crate::error::{LayoutError, LayoutResult};
use crate::word;

const SLOT_BYTES: usize = 32;

/// Longest payload stored in short form.
pub const MAX_SHORT_LEN: usize = SLOT_BYTES - 1;

/// Largest payload a long-form head may claim, bounded by what a single
/// allocation can hold.
const MAX_LONG_LEN: usize = isize::MAX as usize - SLOT_BYTES;

/// Upper bound on the buffer reserved before any data slot is read.
const PREALLOC_LIMIT: usize = 64 * 1024;

/// Decoded head slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Head {
    Short(usize),
    Long(usize),
}

impl Head {
    /// Decode the head stored at `slot`. A long-form length is only accepted
    /// if every data slot it implies is addressable after `slot`.
    fn decode(head: &B256, slot: &Slot) -> LayoutResult<Self> {
        let corrupt = || LayoutError::CorruptLength { slot: *slot };
        let last = head[SLOT_BYTES - 1];
        if last & 1 == 0 {
            let len = usize::from(last / 2);
            if len > MAX_SHORT_LEN {
                return Err(corrupt());
            }
            return Ok(Self::Short(len));
        }
        let encoded = word::to_u256(head);
        let len = (encoded - U256::from(1u8)) / U256::from(2u8);
        let len = word::narrow(len)
            .and_then(|len| usize::try_from(len).ok())
            .filter(|len| *len <= MAX_LONG_LEN)
            .ok_or_else(corrupt)?;
        u64::try_from(data_slots(len))
            .ok()
            .and_then(|n| slot.checked_offset(n))
            .ok_or_else(corrupt)?;
        Ok(Self::Long(len))
    }

    /// Number of slots after the head that hold payload.
    fn data_slots(&self) -> usize {
        match self {
            Self::Short(_) => 0,
            Self::Long(len) => data_slots(*len),
        }
    }
}

/// Number of slots, head included, that `len` payload bytes occupy.
pub fn slot_count(len: usize) -> usize {
    if len <= MAX_SHORT_LEN {
        1
    } else {
        1 + data_slots(len)
    }
}

fn data_slots(len: usize) -> usize {
    len.div_ceil(SLOT_BYTES)
}

/// Slot `offset` cells after `key`.
fn offset_slot(key: &Slot, offset: usize) -> LayoutResult<Slot> {
    u64::try_from(offset)
        .ok()
        .and_then(|n| key.checked_offset(n))
        .ok_or(LayoutError::SlotOverflow { base: *key })
}

/// Encode `bytes` into the chunk sequence written from the head slot on.
pub fn encode(bytes: &[u8]) -> Vec<B256> {
    let len = bytes.len();
    if len <= MAX_SHORT_LEN {
        let mut chunk = [0u8; SLOT_BYTES];
        chunk[..len].copy_from_slice(bytes);
        chunk[SLOT_BYTES - 1] = (len * 2) as u8;
        return vec![B256::from(chunk)];
    }

    let mut chunks = Vec::with_capacity(slot_count(len));
    let head = U256::from(len) * U256::from(2u8) + U256::from(1u8);
    chunks.push(word::from_u256(head));
    for window in bytes.chunks(SLOT_BYTES) {
        let mut chunk = [0u8; SLOT_BYTES];
        chunk[..window.len()].copy_from_slice(window);
        chunks.push(B256::from(chunk));
    }
    chunks
}

/// Write `bytes` as a blob headed at `key`.
///
/// Any blob already stored at `key` is deleted first, so replacing a long
/// payload with a shorter one leaves no stale tail slots. A payload that
/// would run past the top of the slot space is rejected before anything is
/// deleted or written.
pub fn set_blob<S: SlotStore + ?Sized>(
    store: &S,
    namespace: &Namespace,
    key: &Slot,
    bytes: &[u8],
) -> LayoutResult<()> {
    let chunks = encode(bytes);
    offset_slot(key, chunks.len() - 1)?;

    delete_blob(store, namespace, key)?;
    for (i, chunk) in chunks.iter().enumerate() {
        store.set(namespace, &offset_slot(key, i)?, *chunk)?;
    }
    debug!(%key, len = bytes.len(), slots = chunks.len(), "blob written");
    Ok(())
}

/// Read the blob headed at `key`. An empty head reads as an empty payload.
pub fn get_blob<S: SlotStore + ?Sized>(
    store: &S,
    namespace: &Namespace,
    key: &Slot,
) -> LayoutResult<Vec<u8>> {
    let head = store.get(namespace, key)?;
    match Head::decode(&head, key)? {
        Head::Short(len) => Ok(head[..len].to_vec()),
        decoded @ Head::Long(len) => {
            let mut out = Vec::with_capacity(len.min(PREALLOC_LIMIT));
            for i in 1..=decoded.data_slots() {
                let chunk = store.get(namespace, &offset_slot(key, i)?)?;
                let take = (len - out.len()).min(SLOT_BYTES);
                out.extend_from_slice(&chunk[..take]);
            }
            Ok(out)
        }
    }
}

/// Zero every slot of the blob headed at `key`. A zero head is a no-op.
///
/// Data slots are cleared before the head, so a failure part way leaves a
/// head that still describes every slot not yet cleared.
pub fn delete_blob<S: SlotStore + ?Sized>(
    store: &S,
    namespace: &Namespace,
    key: &Slot,
) -> LayoutResult<()> {
    let head = store.get(namespace, key)?;
    if head.is_zero() {
        return Ok(());
    }
    let decoded = Head::decode(&head, key)?;
    for i in (1..=decoded.data_slots()).rev() {
        store.set(namespace, &offset_slot(key, i)?, B256::ZERO)?;
    }
    store.set(namespace, key, B256::ZERO)?;
    debug!(%key, slots = decoded.data_slots() + 1, "blob deleted");
    Ok(())
}
