use serde::{Deserialize, Serialize};
use strata_types::Address;

/// String-valued annotation attached to an entity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StringAnnotation {
    pub key: String,
    pub value: String,
}

/// Numeric annotation attached to an entity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumericAnnotation {
    pub key: String,
    pub value: u64,
}

/// Metadata persisted for every entity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityMetadata {
    /// First block at which the entity is no longer live.
    pub expires_at_block: u64,
    pub string_annotations: Vec<StringAnnotation>,
    pub numeric_annotations: Vec<NumericAnnotation>,
    pub owner: Address,
}

impl EntityMetadata {
    pub fn new(expires_at_block: u64, owner: Address) -> Self {
        Self {
            expires_at_block,
            string_annotations: Vec::new(),
            numeric_annotations: Vec::new(),
            owner,
        }
    }

    pub fn with_string_annotation(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.string_annotations.push(StringAnnotation {
            key: key.into(),
            value: value.into(),
        });
        self
    }

    pub fn with_numeric_annotation(mut self, key: impl Into<String>, value: u64) -> Self {
        self.numeric_annotations.push(NumericAnnotation {
            key: key.into(),
            value,
        });
        self
    }

    /// Returns `true` once `block` has reached the expiry block.
    pub fn is_expired_at(&self, block: u64) -> bool {
        block >= self.expires_at_block
    }

    /// Blocks-to-live (BTL) remaining at `current_block`, zero once expired.
    pub fn blocks_to_live(&self, current_block: u64) -> u64 {
        self.expires_at_block.saturating_sub(current_block)
    }

    /// Value of the first string annotation named `key`.
    pub fn string_annotation(&self, key: &str) -> Option<&str> {
        self.string_annotations
            .iter()
            .find(|a| a.key == key)
            .map(|a| a.value.as_str())
    }

    /// Value of the first numeric annotation named `key`.
    pub fn numeric_annotation(&self, key: &str) -> Option<u64> {
        self.numeric_annotations
            .iter()
            .find(|a| a.key == key)
            .map(|a| a.value)
    }
}
