use strata_crypto::{domain, HashAlgorithm};
use strata_layout::{EnumerableSet, LayoutResult};
use strata_store::SlotStore;
use strata_types::{EntityKey, Namespace};
use tracing::debug;

/// Per-block sets of entities that expire at that block.
///
/// The set for block `n` is keyed by `hash(EXPIRY_SALT ‖ n as big-endian u64)`.
#[derive(Debug)]
pub struct ExpiryIndex<'a, S: SlotStore + ?Sized> {
    store: &'a S,
    namespace: Namespace,
    algorithm: HashAlgorithm,
}

impl<'a, S: SlotStore + ?Sized> ExpiryIndex<'a, S> {
    pub fn new(store: &'a S, namespace: Namespace, algorithm: HashAlgorithm) -> Self {
        Self {
            store,
            namespace,
            algorithm,
        }
    }

    fn block_set(&self, block: u64) -> EnumerableSet<'a, S> {
        EnumerableSet::with_algorithm(
            self.store,
            self.namespace,
            domain::expiry_set_key(self.algorithm, block),
            self.algorithm,
        )
    }

    /// Schedule `key` to expire at `block`. Returns `false` if already scheduled.
    pub fn schedule(&self, block: u64, key: &EntityKey) -> LayoutResult<bool> {
        self.block_set(block).add(*key.as_word())
    }

    /// Returns `false` if `key` was not scheduled at `block`.
    pub fn unschedule(&self, block: u64, key: &EntityKey) -> LayoutResult<bool> {
        self.block_set(block).remove(key.as_word())
    }

    pub fn is_scheduled(&self, block: u64, key: &EntityKey) -> LayoutResult<bool> {
        self.block_set(block).contains(key.as_word())
    }

    /// Snapshot of the keys due at `block`.
    pub fn due_at(&self, block: u64) -> LayoutResult<Vec<EntityKey>> {
        Ok(self
            .block_set(block)
            .members()?
            .into_iter()
            .map(EntityKey::new)
            .collect())
    }

    /// Take every key due at `block`, leaving the block's set empty.
    pub fn drain(&self, block: u64) -> LayoutResult<Vec<EntityKey>> {
        let set = self.block_set(block);
        let due: Vec<EntityKey> = set.members()?.into_iter().map(EntityKey::new).collect();
        set.clear()?;
        debug!(block, drained = due.len(), "expiry set drained");
        Ok(due)
    }
}
