use std::path::Path;

use serde::{Deserialize, Serialize};
use strata_crypto::HashAlgorithm;
use strata_types::Namespace;

use crate::codec::RecordCodec;
use crate::error::ConfigError;

/// Runtime configuration for an entity store.
///
/// ```toml
/// hash = "keccak256"
/// storage_namespace = "0x0000000000000000000000000000000060138453"
/// registry_namespace = "0x0000000000000000000000000000000060138454"
///
/// [records]
/// codec = "zstd"
/// zstd_level = 3
/// ```
///
/// Every field is optional; missing fields take their defaults.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrataConfig {
    /// Hash primitive for every derived slot address.
    pub hash: HashAlgorithm,
    /// Namespace holding entity records and expiry sets.
    pub storage_namespace: Namespace,
    /// Namespace holding the global registry.
    pub registry_namespace: Namespace,
    pub records: RecordsConfig,
}

impl Default for StrataConfig {
    fn default() -> Self {
        Self {
            hash: HashAlgorithm::default(),
            storage_namespace: Namespace::STORAGE_PROCESSOR,
            registry_namespace: Namespace::REGISTRY_PROCESSOR,
            records: RecordsConfig::default(),
        }
    }
}

/// Codec settings for newly written records.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordsConfig {
    pub codec: CodecKind,
    /// Only read when `codec = "zstd"`.
    pub zstd_level: i32,
}

impl Default for RecordsConfig {
    fn default() -> Self {
        Self {
            codec: CodecKind::Zstd,
            zstd_level: RecordCodec::DEFAULT_ZSTD_LEVEL,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CodecKind {
    Raw,
    #[default]
    Zstd,
}

impl StrataConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string(self).map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage_namespace == self.registry_namespace {
            return Err(ConfigError::Invalid(format!(
                "storage and registry namespaces must differ (both {})",
                self.storage_namespace
            )));
        }
        if self.records.codec == CodecKind::Zstd {
            let levels = zstd::compression_level_range();
            if !levels.contains(&self.records.zstd_level) {
                return Err(ConfigError::Invalid(format!(
                    "zstd_level {} outside {}..={}",
                    self.records.zstd_level,
                    levels.start(),
                    levels.end()
                )));
            }
        }
        Ok(())
    }

    pub fn hash_algorithm(&self) -> HashAlgorithm {
        self.hash
    }

    /// Codec applied to newly written records.
    pub fn record_codec(&self) -> RecordCodec {
        match self.records.codec {
            CodecKind::Raw => RecordCodec::Raw,
            CodecKind::Zstd => RecordCodec::Zstd {
                level: self.records.zstd_level,
            },
        }
    }
}
