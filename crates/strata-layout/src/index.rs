use std::fmt;

use strata_crypto::SaltedHasher;
use strata_store::SlotStore;
use strata_types::{Namespace, Slot, B256};

use crate::error::LayoutResult;

/// One-way `key -> value` map stored at `hash(salt ‖ key)`.
///
/// The index keeps no count and cannot be enumerated: it is an auxiliary
/// lookup structure. A zero value means "no entry".
pub struct SaltedHashIndex<'a, S: SlotStore + ?Sized> {
    store: &'a S,
    namespace: Namespace,
    hasher: SaltedHasher,
}

impl<'a, S: SlotStore + ?Sized> SaltedHashIndex<'a, S> {
    pub fn new(store: &'a S, namespace: Namespace, hasher: SaltedHasher) -> Self {
        Self {
            store,
            namespace,
            hasher,
        }
    }

    /// Slot holding the entry for `key`.
    pub fn slot_for(&self, key: &B256) -> Slot {
        self.hasher.slot(key.as_slice())
    }

    pub fn get(&self, key: &B256) -> LayoutResult<B256> {
        Ok(self.store.get(&self.namespace, &self.slot_for(key))?)
    }

    /// Write `value` for `key`, returning the previous value. Writing zero
    /// removes the entry.
    pub fn set(&self, key: &B256, value: B256) -> LayoutResult<B256> {
        Ok(self.store.set(&self.namespace, &self.slot_for(key), value)?)
    }

    pub fn hasher(&self) -> &SaltedHasher {
        &self.hasher
    }
}

impl<S: SlotStore + ?Sized> fmt::Debug for SaltedHashIndex<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SaltedHashIndex")
            .field("namespace", &self.namespace)
            .field("salt_len", &self.hasher.salt().len())
            .finish()
    }
}
