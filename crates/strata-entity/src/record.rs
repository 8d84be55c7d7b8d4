use std::fmt;

use serde::de::DeserializeOwned;
use serde::Serialize;
use strata_crypto::{domain, HashAlgorithm, SaltedHasher};
use strata_layout::blob;
use strata_store::SlotStore;
use strata_types::{EntityKey, Namespace, Slot};
use tracing::debug;

use crate::codec::RecordCodec;
use crate::error::{RecordError, RecordResult};

/// Structured records stored as framed blobs at `hash(ENTITY_SALT ‖ key)`.
pub struct RecordStore<'a, S: SlotStore + ?Sized> {
    store: &'a S,
    namespace: Namespace,
    hasher: SaltedHasher,
    codec: RecordCodec,
}

impl<'a, S: SlotStore + ?Sized> RecordStore<'a, S> {
    /// Record store with Keccak-256 key derivation and the default codec.
    pub fn new(store: &'a S, namespace: Namespace) -> Self {
        Self::with_options(store, namespace, HashAlgorithm::default(), RecordCodec::default())
    }

    pub fn with_options(
        store: &'a S,
        namespace: Namespace,
        algorithm: HashAlgorithm,
        codec: RecordCodec,
    ) -> Self {
        Self {
            store,
            namespace,
            hasher: domain::entity_hasher(algorithm),
            codec,
        }
    }

    pub fn namespace(&self) -> Namespace {
        self.namespace
    }

    /// Codec applied to new writes. Reads follow each record's own tag.
    pub fn codec(&self) -> RecordCodec {
        self.codec
    }

    /// Head slot of the blob holding `key`'s record.
    pub fn slot_for(&self, key: &EntityKey) -> Slot {
        self.hasher.slot(key.as_bytes())
    }

    /// Serialize, frame and write `record`, replacing any previous one.
    pub fn store<T: Serialize>(&self, key: &EntityKey, record: &T) -> RecordResult<()> {
        let encoded =
            bincode::serialize(record).map_err(|e| RecordError::Serialization(e.to_string()))?;
        let framed = self.codec.encode(&encoded)?;
        blob::set_blob(self.store, &self.namespace, &self.slot_for(key), &framed)?;
        debug!(
            %key,
            encoded = encoded.len(),
            stored = framed.len(),
            tag = self.codec.tag(),
            "record stored"
        );
        Ok(())
    }

    /// Read `key`'s record. `None` if nothing is stored.
    pub fn load<T: DeserializeOwned>(&self, key: &EntityKey) -> RecordResult<Option<T>> {
        let framed = blob::get_blob(self.store, &self.namespace, &self.slot_for(key))?;
        if framed.is_empty() {
            return Ok(None);
        }
        let encoded = RecordCodec::decode(&framed)?;
        let record =
            bincode::deserialize(&encoded).map_err(|e| RecordError::Serialization(e.to_string()))?;
        Ok(Some(record))
    }

    /// Zero every slot of `key`'s record. Deleting an absent record is a no-op.
    pub fn delete(&self, key: &EntityKey) -> RecordResult<()> {
        blob::delete_blob(self.store, &self.namespace, &self.slot_for(key))?;
        debug!(%key, "record deleted");
        Ok(())
    }
}

impl<S: SlotStore + ?Sized> fmt::Debug for RecordStore<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordStore")
            .field("namespace", &self.namespace)
            .field("algorithm", &self.hasher.algorithm())
            .field("codec", &self.codec)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::EntityMetadata;
    use strata_layout::LayoutError;
    use strata_store::InMemorySlotStore;
    use strata_types::{Address, B256};

    fn ns() -> Namespace {
        Namespace::STORAGE_PROCESSOR
    }

    fn metadata() -> EntityMetadata {
        EntityMetadata::new(42, Address::repeat_byte(0xaa))
            .with_string_annotation("title", "a fairly long annotation value that spans slots")
            .with_numeric_annotation("score", 7)
    }

    // -----------------------------------------------------------------------
    // Round-trips
    // -----------------------------------------------------------------------

    #[test]
    fn roundtrip_zstd() {
        let store = InMemorySlotStore::new();
        let records = RecordStore::new(&store, ns());
        let key = EntityKey::ephemeral();

        records.store(&key, &metadata()).unwrap();
        let loaded: Option<EntityMetadata> = records.load(&key).unwrap();
        assert_eq!(loaded, Some(metadata()));
    }

    #[test]
    fn roundtrip_raw() {
        let store = InMemorySlotStore::new();
        let records =
            RecordStore::with_options(&store, ns(), HashAlgorithm::Keccak256, RecordCodec::Raw);
        let key = EntityKey::ephemeral();

        records.store(&key, &metadata()).unwrap();
        let loaded: Option<EntityMetadata> = records.load(&key).unwrap();
        assert_eq!(loaded, Some(metadata()));
    }

    #[test]
    fn load_missing_is_none() {
        let store = InMemorySlotStore::new();
        let records = RecordStore::new(&store, ns());
        let loaded: Option<EntityMetadata> = records.load(&EntityKey::ephemeral()).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn raw_record_readable_by_zstd_store() {
        let store = InMemorySlotStore::new();
        let key = EntityKey::ephemeral();
        RecordStore::with_options(&store, ns(), HashAlgorithm::Keccak256, RecordCodec::Raw)
            .store(&key, &metadata())
            .unwrap();

        let zstd = RecordStore::new(&store, ns());
        let loaded: Option<EntityMetadata> = zstd.load(&key).unwrap();
        assert_eq!(loaded, Some(metadata()));
    }

    #[test]
    fn overwrite_replaces_record() {
        let store = InMemorySlotStore::new();
        let records = RecordStore::new(&store, ns());
        let key = EntityKey::ephemeral();

        records.store(&key, &metadata()).unwrap();
        let replacement = EntityMetadata::new(7, Address::ZERO);
        records.store(&key, &replacement).unwrap();
        let loaded: Option<EntityMetadata> = records.load(&key).unwrap();
        assert_eq!(loaded, Some(replacement));
    }

    // -----------------------------------------------------------------------
    // Layout
    // -----------------------------------------------------------------------

    #[test]
    fn head_slot_is_salted_hash_of_key() {
        let store = InMemorySlotStore::new();
        let records = RecordStore::new(&store, ns());
        let key = EntityKey::new(B256::repeat_byte(0x01));

        let expected =
            HashAlgorithm::Keccak256.hash_concat(&[domain::ENTITY_SALT, &key.as_bytes()[..]]);
        assert_eq!(records.slot_for(&key), Slot::from_hash(expected));
    }

    #[test]
    fn stored_blob_starts_with_codec_tag() {
        let store = InMemorySlotStore::new();
        let key = EntityKey::ephemeral();
        let raw =
            RecordStore::with_options(&store, ns(), HashAlgorithm::Keccak256, RecordCodec::Raw);
        raw.store(&key, &metadata()).unwrap();

        let framed = blob::get_blob(&store, &ns(), &raw.slot_for(&key)).unwrap();
        assert_eq!(framed[0], 0x00);
        assert_eq!(&framed[1..], bincode::serialize(&metadata()).unwrap().as_slice());
    }

    #[test]
    fn delete_leaves_no_live_slots() {
        let store = InMemorySlotStore::new();
        let records = RecordStore::new(&store, ns());
        let key = EntityKey::ephemeral();

        records.store(&key, &metadata()).unwrap();
        assert!(store.live_slots(&ns()) > 0);
        records.delete(&key).unwrap();
        assert_eq!(store.live_slots(&ns()), 0);

        // Second delete is a no-op.
        records.delete(&key).unwrap();
    }

    #[test]
    fn algorithms_use_different_slots() {
        let store = InMemorySlotStore::new();
        let key = EntityKey::ephemeral();
        let keccak = RecordStore::new(&store, ns());
        let blake = RecordStore::with_options(
            &store,
            ns(),
            HashAlgorithm::Blake3,
            RecordCodec::default(),
        );
        assert_ne!(keccak.slot_for(&key), blake.slot_for(&key));
    }

    // -----------------------------------------------------------------------
    // Failures
    // -----------------------------------------------------------------------

    #[test]
    fn undecodable_body_is_serialization_error() {
        let store = InMemorySlotStore::new();
        let records = RecordStore::new(&store, ns());
        let key = EntityKey::ephemeral();
        blob::set_blob(&store, &ns(), &records.slot_for(&key), &[0x00, 0x01]).unwrap();

        let err = records.load::<EntityMetadata>(&key).unwrap_err();
        assert!(matches!(err, RecordError::Serialization(_)));
    }

    #[test]
    fn unknown_tag_is_reported() {
        let store = InMemorySlotStore::new();
        let records = RecordStore::new(&store, ns());
        let key = EntityKey::ephemeral();
        blob::set_blob(&store, &ns(), &records.slot_for(&key), &[0x09, 0x01]).unwrap();

        let err = records.load::<EntityMetadata>(&key).unwrap_err();
        assert!(matches!(err, RecordError::UnknownCodec(0x09)));
    }

    #[test]
    fn corrupt_head_surfaces_layout_error() {
        let store = InMemorySlotStore::new();
        let records = RecordStore::new(&store, ns());
        let key = EntityKey::ephemeral();
        // Short-form head claiming 40 bytes.
        let mut head = [0u8; 32];
        head[31] = 80;
        store.set(&ns(), &records.slot_for(&key), B256::from(head)).unwrap();

        let err = records.load::<EntityMetadata>(&key).unwrap_err();
        assert!(matches!(
            err,
            RecordError::Layout(LayoutError::CorruptLength { .. })
        ));
    }
}
