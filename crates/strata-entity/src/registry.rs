use std::fmt;

use strata_crypto::{domain, HashAlgorithm};
use strata_layout::{EnumerableSet, LayoutResult};
use strata_store::SlotStore;
use strata_types::{EntityKey, Namespace, Slot};
use tracing::debug;

/// The set of every live entity key.
///
/// A single enumerable set whose key is `hash(REGISTRY_LABEL)`, held in the
/// registry processor's namespace. The key is derived once at construction
/// and handed to the set explicitly.
pub struct GlobalRegistry<'a, S: SlotStore + ?Sized> {
    set: EnumerableSet<'a, S>,
}

impl<'a, S: SlotStore + ?Sized> GlobalRegistry<'a, S> {
    /// Registry in [`Namespace::REGISTRY_PROCESSOR`].
    pub fn new(store: &'a S, algorithm: HashAlgorithm) -> Self {
        Self::with_namespace(store, Namespace::REGISTRY_PROCESSOR, algorithm)
    }

    pub fn with_namespace(store: &'a S, namespace: Namespace, algorithm: HashAlgorithm) -> Self {
        let set_key = domain::registry_set_key(algorithm);
        Self {
            set: EnumerableSet::with_algorithm(store, namespace, set_key, algorithm),
        }
    }

    pub fn set_key(&self) -> Slot {
        self.set.set_key()
    }

    /// Add `key`. Returns `false` if it was already registered.
    pub fn register(&self, key: &EntityKey) -> LayoutResult<bool> {
        let added = self.set.add(*key.as_word())?;
        if added {
            debug!(%key, "entity registered");
        }
        Ok(added)
    }

    /// Remove `key`. Returns `false` if it was not registered.
    pub fn unregister(&self, key: &EntityKey) -> LayoutResult<bool> {
        let removed = self.set.remove(key.as_word())?;
        if removed {
            debug!(%key, "entity unregistered");
        }
        Ok(removed)
    }

    pub fn contains(&self, key: &EntityKey) -> LayoutResult<bool> {
        self.set.contains(key.as_word())
    }

    pub fn len(&self) -> LayoutResult<u64> {
        self.set.size()
    }

    pub fn is_empty(&self) -> LayoutResult<bool> {
        self.set.is_empty()
    }

    /// Snapshot of all registered keys.
    pub fn entities(&self) -> LayoutResult<Vec<EntityKey>> {
        Ok(self
            .set
            .members()?
            .into_iter()
            .map(EntityKey::new)
            .collect())
    }

    /// Live cursor over registered keys.
    pub fn iter(&self) -> impl Iterator<Item = LayoutResult<EntityKey>> + 'a {
        self.set.iter().map(|member| member.map(EntityKey::new))
    }
}

impl<S: SlotStore + ?Sized> fmt::Debug for GlobalRegistry<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GlobalRegistry")
            .field("set_key", &self.set_key())
            .finish()
    }
}
