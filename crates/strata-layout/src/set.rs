use std::fmt;

use strata_crypto::{domain, HashAlgorithm};
use strata_store::SlotStore;
use strata_types::{Namespace, Slot, B256};
use tracing::debug;

use crate::array::{ArrayIter, DynamicArray};
use crate::error::{LayoutError, LayoutResult};
use crate::index::SaltedHashIndex;
use crate::word;

/// Enumerable set of 32-byte words with O(1) add, remove and membership.
///
/// Two layouts back every set with key `S`:
///
/// - a [`DynamicArray`] at base `S` holding the members densely, and
/// - a [`SaltedHashIndex`] salted with `SET_SALT ‖ S` mapping each member to
///   its 1-based array position. Zero means "not a member".
///
/// Removal moves the last member into the vacated position, so enumeration
/// order is insertion order only until the first removal.
pub struct EnumerableSet<'a, S: SlotStore + ?Sized> {
    members: DynamicArray<'a, S>,
    positions: SaltedHashIndex<'a, S>,
}

impl<'a, S: SlotStore + ?Sized> EnumerableSet<'a, S> {
    /// Set keyed by `set_key`, with Keccak-256 position hashing.
    pub fn new(store: &'a S, namespace: Namespace, set_key: Slot) -> Self {
        Self::with_algorithm(store, namespace, set_key, HashAlgorithm::default())
    }

    pub fn with_algorithm(
        store: &'a S,
        namespace: Namespace,
        set_key: Slot,
        algorithm: HashAlgorithm,
    ) -> Self {
        Self {
            members: DynamicArray::new(store, namespace, set_key),
            positions: SaltedHashIndex::new(
                store,
                namespace,
                domain::set_index_hasher(algorithm, &set_key),
            ),
        }
    }

    pub fn set_key(&self) -> Slot {
        self.members.base()
    }

    pub fn contains(&self, value: &B256) -> LayoutResult<bool> {
        Ok(!self.positions.get(value)?.is_zero())
    }

    /// Insert `value`. Returns `false` if it was already a member.
    pub fn add(&self, value: B256) -> LayoutResult<bool> {
        if self.contains(&value)? {
            return Ok(false);
        }
        self.members.append(value)?;
        let position = self.members.size()?;
        self.positions.set(&value, word::from_u64(position))?;
        debug!(set = %self.set_key(), position, "set member added");
        Ok(true)
    }

    /// Remove `value`. Returns `false` if it was not a member.
    pub fn remove(&self, value: &B256) -> LayoutResult<bool> {
        let position = self.positions.get(value)?;
        if position.is_zero() {
            return Ok(false);
        }
        let index = self.position_to_index(value, &position)?;
        let last_index = self
            .members
            .size()?
            .checked_sub(1)
            .ok_or(LayoutError::EmptyArray)?;
        let last = self.members.get(last_index)?;

        self.positions.set(value, B256::ZERO)?;
        if index != last_index {
            self.members.set(index, last)?;
            self.positions.set(&last, word::from_u64(index + 1))?;
        }
        self.members.remove_last()?;
        debug!(set = %self.set_key(), index, moved = index != last_index, "set member removed");
        Ok(true)
    }

    pub fn size(&self) -> LayoutResult<u64> {
        self.members.size()
    }

    pub fn is_empty(&self) -> LayoutResult<bool> {
        self.members.is_empty()
    }

    /// Live cursor over the members. See [`ArrayIter`].
    pub fn iter(&self) -> ArrayIter<'a, S> {
        self.members.iter()
    }

    /// Snapshot of the current members.
    pub fn members(&self) -> LayoutResult<Vec<B256>> {
        self.members.to_vec()
    }

    /// Remove every member. O(n).
    pub fn clear(&self) -> LayoutResult<()> {
        let mut cleared = 0u64;
        for member in self.members.iter() {
            self.positions.set(&member?, B256::ZERO)?;
            cleared += 1;
        }
        self.members.clear()?;
        debug!(set = %self.set_key(), cleared, "set cleared");
        Ok(())
    }

    fn position_to_index(&self, value: &B256, position: &B256) -> LayoutResult<u64> {
        // Non-zero positions are 1-based.
        word::to_u64(position)
            .map(|p| p - 1)
            .ok_or(LayoutError::CorruptLength {
                slot: self.positions.slot_for(value),
            })
    }
}

impl<S: SlotStore + ?Sized> fmt::Debug for EnumerableSet<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnumerableSet")
            .field("namespace", &self.members.namespace())
            .field("set_key", &self.members.base())
            .finish()
    }
}
