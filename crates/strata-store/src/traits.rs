use strata_types::{Namespace, Slot, B256};

use crate::error::StoreResult;

/// Namespace-partitioned store of 32-byte words at 32-byte addresses.
///
/// All implementations must satisfy these invariants:
/// - A slot that was never written, or was last written with zero, reads as
///   [`B256::ZERO`].
/// - Writing zero is a logical delete. Backends are free to reclaim the entry.
/// - Slots in different namespaces are independent.
/// - Failures are reported as `Err`, never by panicking.
pub trait SlotStore: Send + Sync {
    /// Read the word stored at `slot` in `namespace`.
    fn get(&self, namespace: &Namespace, slot: &Slot) -> StoreResult<B256>;

    /// Write `value` at `slot` in `namespace` and return the previous word.
    fn set(&self, namespace: &Namespace, slot: &Slot, value: B256) -> StoreResult<B256>;

    /// Delete the word at `slot`. Equivalent to writing zero.
    fn clear(&self, namespace: &Namespace, slot: &Slot) -> StoreResult<B256> {
        self.set(namespace, slot, B256::ZERO)
    }

    /// Returns `true` if `slot` currently reads as zero.
    fn is_empty_slot(&self, namespace: &Namespace, slot: &Slot) -> StoreResult<bool> {
        Ok(self.get(namespace, slot)?.is_zero())
    }
}
