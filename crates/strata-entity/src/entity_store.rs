use std::fmt;

use strata_store::SlotStore;
use strata_types::EntityKey;
use tracing::debug;

use crate::config::StrataConfig;
use crate::error::{RecordError, RecordResult};
use crate::expiry::ExpiryIndex;
use crate::metadata::EntityMetadata;
use crate::record::RecordStore;
use crate::registry::GlobalRegistry;

/// Entity lifecycle over a slot store.
///
/// Keeps three structures consistent for every entity:
///
/// - its metadata record, a blob at `hash(ENTITY_SALT ‖ key)`
/// - its membership in the [`GlobalRegistry`]
/// - its membership in the expiry set of `expires_at_block`
///
/// Once an entity is deleted or expired, none of the slots written on its
/// behalf remain.
pub struct EntityStore<'a, S: SlotStore + ?Sized> {
    records: RecordStore<'a, S>,
    registry: GlobalRegistry<'a, S>,
    expiry: ExpiryIndex<'a, S>,
}

impl<'a, S: SlotStore + ?Sized> EntityStore<'a, S> {
    /// Entity store with the default configuration.
    pub fn new(store: &'a S) -> Self {
        Self::with_config(store, &StrataConfig::default())
    }

    pub fn with_config(store: &'a S, config: &StrataConfig) -> Self {
        let algorithm = config.hash_algorithm();
        Self {
            records: RecordStore::with_options(
                store,
                config.storage_namespace,
                algorithm,
                config.record_codec(),
            ),
            registry: GlobalRegistry::with_namespace(store, config.registry_namespace, algorithm),
            expiry: ExpiryIndex::new(store, config.storage_namespace, algorithm),
        }
    }

    pub fn records(&self) -> &RecordStore<'a, S> {
        &self.records
    }

    pub fn registry(&self) -> &GlobalRegistry<'a, S> {
        &self.registry
    }

    pub fn expiry(&self) -> &ExpiryIndex<'a, S> {
        &self.expiry
    }

    /// Store a new entity. Fails with [`RecordError::EntityExists`] if `key`
    /// is already registered.
    pub fn create(&self, key: &EntityKey, metadata: &EntityMetadata) -> RecordResult<()> {
        if self.registry.contains(key)? {
            return Err(RecordError::EntityExists(*key));
        }
        self.records.store(key, metadata)?;
        self.registry.register(key)?;
        self.expiry.schedule(metadata.expires_at_block, key)?;
        debug!(%key, expires_at = metadata.expires_at_block, "entity created");
        Ok(())
    }

    /// Replace an entity's metadata, moving it between expiry sets if its
    /// expiry block changed.
    pub fn update(&self, key: &EntityKey, metadata: &EntityMetadata) -> RecordResult<()> {
        let current = self.get(key)?.ok_or(RecordError::EntityNotFound(*key))?;
        if current.expires_at_block != metadata.expires_at_block {
            self.expiry.unschedule(current.expires_at_block, key)?;
            self.expiry.schedule(metadata.expires_at_block, key)?;
        }
        self.records.store(key, metadata)?;
        debug!(
            %key,
            from = current.expires_at_block,
            to = metadata.expires_at_block,
            "entity updated"
        );
        Ok(())
    }

    pub fn get(&self, key: &EntityKey) -> RecordResult<Option<EntityMetadata>> {
        self.records.load(key)
    }

    pub fn contains(&self, key: &EntityKey) -> RecordResult<bool> {
        Ok(self.registry.contains(key)?)
    }

    /// Number of live entities.
    pub fn len(&self) -> RecordResult<u64> {
        Ok(self.registry.len()?)
    }

    pub fn is_empty(&self) -> RecordResult<bool> {
        Ok(self.registry.is_empty()?)
    }

    /// Snapshot of every live entity key.
    pub fn entities(&self) -> RecordResult<Vec<EntityKey>> {
        Ok(self.registry.entities()?)
    }

    /// Remove an entity. Returns `false` if it did not exist.
    pub fn delete(&self, key: &EntityKey) -> RecordResult<bool> {
        let Some(current) = self.get(key)? else {
            return Ok(false);
        };
        self.expiry.unschedule(current.expires_at_block, key)?;
        self.records.delete(key)?;
        self.registry.unregister(key)?;
        debug!(%key, "entity deleted");
        Ok(true)
    }

    /// Remove every entity scheduled to expire at `block` and return their keys.
    pub fn expire(&self, block: u64) -> RecordResult<Vec<EntityKey>> {
        let due = self.expiry.drain(block)?;
        for key in &due {
            self.records.delete(key)?;
            self.registry.unregister(key)?;
        }
        debug!(block, expired = due.len(), "entities expired");
        Ok(due)
    }
}

impl<S: SlotStore + ?Sized> fmt::Debug for EntityStore<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityStore")
            .field("records", &self.records)
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::RecordCodec;
    use crate::config::CodecKind;
    use proptest::prelude::*;
    use strata_crypto::HashAlgorithm;
    use strata_store::InMemorySlotStore;
    use strata_types::{Address, Namespace};

    fn meta(expires_at_block: u64) -> EntityMetadata {
        EntityMetadata::new(expires_at_block, Address::repeat_byte(0x42))
            .with_string_annotation("type", "document")
            .with_numeric_annotation("size", 1_024)
    }

    // -----------------------------------------------------------------------
    // Create / get
    // -----------------------------------------------------------------------

    #[test]
    fn create_then_get() {
        let store = InMemorySlotStore::new();
        let entities = EntityStore::new(&store);
        let key = EntityKey::ephemeral();

        entities.create(&key, &meta(100)).unwrap();
        assert_eq!(entities.get(&key).unwrap(), Some(meta(100)));
        assert!(entities.contains(&key).unwrap());
        assert_eq!(entities.len().unwrap(), 1);
        assert_eq!(entities.entities().unwrap(), vec![key]);
        assert_eq!(entities.expiry().due_at(100).unwrap(), vec![key]);
    }

    #[test]
    fn create_twice_fails() {
        let store = InMemorySlotStore::new();
        let entities = EntityStore::new(&store);
        let key = EntityKey::ephemeral();

        entities.create(&key, &meta(100)).unwrap();
        let err = entities.create(&key, &meta(200)).unwrap_err();
        assert!(matches!(err, RecordError::EntityExists(k) if k == key));
        // Original record untouched.
        assert_eq!(entities.get(&key).unwrap(), Some(meta(100)));
        assert!(entities.expiry().due_at(200).unwrap().is_empty());
    }

    #[test]
    fn get_missing_is_none() {
        let store = InMemorySlotStore::new();
        let entities = EntityStore::new(&store);
        assert_eq!(entities.get(&EntityKey::ephemeral()).unwrap(), None);
    }

    // -----------------------------------------------------------------------
    // Update
    // -----------------------------------------------------------------------

    #[test]
    fn update_moves_expiry() {
        let store = InMemorySlotStore::new();
        let entities = EntityStore::new(&store);
        let key = EntityKey::ephemeral();

        entities.create(&key, &meta(100)).unwrap();
        entities.update(&key, &meta(250)).unwrap();

        assert_eq!(entities.get(&key).unwrap(), Some(meta(250)));
        assert!(entities.expiry().due_at(100).unwrap().is_empty());
        assert_eq!(entities.expiry().due_at(250).unwrap(), vec![key]);
    }

    #[test]
    fn update_same_expiry_keeps_schedule() {
        let store = InMemorySlotStore::new();
        let entities = EntityStore::new(&store);
        let key = EntityKey::ephemeral();

        entities.create(&key, &meta(100)).unwrap();
        let changed = meta(100).with_string_annotation("status", "final");
        entities.update(&key, &changed).unwrap();

        assert_eq!(entities.get(&key).unwrap(), Some(changed));
        assert_eq!(entities.expiry().due_at(100).unwrap(), vec![key]);
    }

    #[test]
    fn update_missing_fails() {
        let store = InMemorySlotStore::new();
        let entities = EntityStore::new(&store);
        let key = EntityKey::ephemeral();

        let err = entities.update(&key, &meta(1)).unwrap_err();
        assert!(matches!(err, RecordError::EntityNotFound(k) if k == key));
        assert!(store.is_empty());
    }

    // -----------------------------------------------------------------------
    // Delete / expire
    // -----------------------------------------------------------------------

    #[test]
    fn delete_clears_everything() {
        let store = InMemorySlotStore::new();
        let entities = EntityStore::new(&store);
        let key = EntityKey::ephemeral();

        entities.create(&key, &meta(100)).unwrap();
        assert!(entities.delete(&key).unwrap());
        assert!(!entities.delete(&key).unwrap());
        assert!(entities.is_empty().unwrap());
        assert!(store.is_empty());
    }

    #[test]
    fn expire_removes_only_due_entities() {
        let store = InMemorySlotStore::new();
        let entities = EntityStore::new(&store);
        let early: Vec<EntityKey> = (0..3).map(|_| EntityKey::ephemeral()).collect();
        let late = EntityKey::ephemeral();

        for key in &early {
            entities.create(key, &meta(10)).unwrap();
        }
        entities.create(&late, &meta(20)).unwrap();

        let expired = entities.expire(10).unwrap();
        assert_eq!(expired, early);
        assert_eq!(entities.entities().unwrap(), vec![late]);
        for key in &early {
            assert_eq!(entities.get(key).unwrap(), None);
        }

        assert!(entities.expire(15).unwrap().is_empty());
        assert_eq!(entities.expire(20).unwrap(), vec![late]);
        assert!(store.is_empty());
    }

    #[test]
    fn lifecycle_leaves_store_empty() {
        let store = InMemorySlotStore::new();
        let entities = EntityStore::new(&store);
        let a = EntityKey::ephemeral();
        let b = EntityKey::ephemeral();

        entities.create(&a, &meta(5)).unwrap();
        entities.create(&b, &meta(5)).unwrap();
        entities.update(&a, &meta(9)).unwrap();
        entities.update(&b, &meta(5).with_numeric_annotation("rev", 2)).unwrap();

        assert_eq!(entities.expire(5).unwrap(), vec![b]);
        assert_eq!(entities.expire(9).unwrap(), vec![a]);
        assert!(store.is_empty());
    }

    // -----------------------------------------------------------------------
    // Configuration
    // -----------------------------------------------------------------------

    #[test]
    fn with_config_uses_configured_namespaces() {
        let store = InMemorySlotStore::new();
        let mut config = StrataConfig::default();
        config.hash = HashAlgorithm::Blake3;
        config.records.codec = CodecKind::Raw;
        config.storage_namespace = Namespace::new(Address::repeat_byte(0x01));
        config.registry_namespace = Namespace::new(Address::repeat_byte(0x02));
        let entities = EntityStore::with_config(&store, &config);
        let key = EntityKey::ephemeral();

        entities.create(&key, &meta(3)).unwrap();
        assert_eq!(entities.records().codec(), RecordCodec::Raw);
        assert!(store.live_slots(&config.storage_namespace) > 0);
        assert_eq!(store.live_slots(&config.registry_namespace), 3);
        assert_eq!(store.live_slots(&Namespace::STORAGE_PROCESSOR), 0);
        assert_eq!(store.live_slots(&Namespace::REGISTRY_PROCESSOR), 0);
    }

    #[test]
    fn codec_change_keeps_old_records_readable() {
        let store = InMemorySlotStore::new();
        let mut raw_config = StrataConfig::default();
        raw_config.records.codec = CodecKind::Raw;
        let key = EntityKey::ephemeral();
        EntityStore::with_config(&store, &raw_config)
            .create(&key, &meta(8))
            .unwrap();

        let zstd = EntityStore::new(&store);
        assert_eq!(zstd.get(&key).unwrap(), Some(meta(8)));
        assert!(zstd.delete(&key).unwrap());
        assert!(store.is_empty());
    }

    // -----------------------------------------------------------------------
    // Property tests
    // -----------------------------------------------------------------------

    proptest! {
        #[test]
        fn expiring_every_block_empties_store(
            blocks in prop::collection::vec(0u64..8, 1..20)
        ) {
            let store = InMemorySlotStore::new();
            let entities = EntityStore::new(&store);
            for block in &blocks {
                entities.create(&EntityKey::ephemeral(), &meta(*block)).unwrap();
            }
            prop_assert_eq!(entities.len().unwrap(), blocks.len() as u64);

            let mut expired = 0usize;
            for block in 0..8 {
                let due = entities.expire(block).unwrap();
                prop_assert_eq!(due.len(), blocks.iter().filter(|b| **b == block).count());
                expired += due.len();
            }
            prop_assert_eq!(expired, blocks.len());
            prop_assert!(store.is_empty());
        }
    }
}
