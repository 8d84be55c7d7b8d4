use strata_layout::LayoutError;
use strata_types::EntityKey;
use thiserror::Error;

/// Errors from record and entity operations.
#[derive(Debug, Error)]
pub enum RecordError {
    /// The record could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Compression of an encoded record failed.
    #[error("compression failed: {0}")]
    Compression(String),

    #[error("decompression failed: {0}")]
    Decompression(String),

    /// The stored record starts with a codec tag this build does not know.
    #[error("unknown record codec tag: {0:#04x}")]
    UnknownCodec(u8),

    #[error("entity already exists: {0}")]
    EntityExists(EntityKey),

    #[error("entity not found: {0}")]
    EntityNotFound(EntityKey),

    #[error("layout error: {0}")]
    Layout(#[from] LayoutError),
}

/// Result alias for record operations.
pub type RecordResult<T> = Result<T, RecordError>;

/// Errors from loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}
