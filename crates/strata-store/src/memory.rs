use std::collections::HashMap;
use std::sync::RwLock;

use strata_types::{Namespace, Slot, B256};
use tracing::trace;

use crate::error::StoreResult;
use crate::traits::SlotStore;

/// In-memory, HashMap-based slot store.
///
/// Intended for tests and embedding. Live slots are held behind a `RwLock`
/// for safe concurrent access. Writing zero removes the entry, so
/// [`len`](Self::len) always counts live (non-zero) slots only.
pub struct InMemorySlotStore {
    slots: RwLock<HashMap<(Namespace, Slot), B256>>,
}

impl InMemorySlotStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            slots: RwLock::new(HashMap::new()),
        }
    }

    /// Number of live slots across all namespaces.
    pub fn len(&self) -> usize {
        self.slots.read().expect("lock poisoned").len()
    }

    /// Returns `true` if no slot holds a non-zero word.
    pub fn is_empty(&self) -> bool {
        self.slots.read().expect("lock poisoned").is_empty()
    }

    /// Number of live slots in one namespace.
    pub fn live_slots(&self, namespace: &Namespace) -> usize {
        self.slots
            .read()
            .expect("lock poisoned")
            .keys()
            .filter(|(ns, _)| ns == namespace)
            .count()
    }

    /// Sorted addresses of the live slots in one namespace.
    pub fn slots_in(&self, namespace: &Namespace) -> Vec<Slot> {
        let map = self.slots.read().expect("lock poisoned");
        let mut slots: Vec<Slot> = map
            .keys()
            .filter(|(ns, _)| ns == namespace)
            .map(|(_, slot)| *slot)
            .collect();
        slots.sort();
        slots
    }

    /// Remove every slot from every namespace.
    pub fn clear_all(&self) {
        self.slots.write().expect("lock poisoned").clear();
    }
}

impl Default for InMemorySlotStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SlotStore for InMemorySlotStore {
    fn get(&self, namespace: &Namespace, slot: &Slot) -> StoreResult<B256> {
        let map = self.slots.read().expect("lock poisoned");
        Ok(map.get(&(*namespace, *slot)).copied().unwrap_or(B256::ZERO))
    }

    fn set(&self, namespace: &Namespace, slot: &Slot, value: B256) -> StoreResult<B256> {
        let mut map = self.slots.write().expect("lock poisoned");
        let previous = if value.is_zero() {
            map.remove(&(*namespace, *slot))
        } else {
            map.insert((*namespace, *slot), value)
        };
        trace!(%namespace, %slot, cleared = value.is_zero(), "slot write");
        Ok(previous.unwrap_or(B256::ZERO))
    }
}

impl std::fmt::Debug for InMemorySlotStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = self.len();
        f.debug_struct("InMemorySlotStore")
            .field("live_slots", &count)
            .finish()
    }
}
