use crate::error::{RecordError, RecordResult};

const TAG_RAW: u8 = 0x00;
const TAG_ZSTD: u8 = 0x01;

/// Framing applied to a serialized record before it is stored as a blob.
///
/// Stored format:
/// ```text
/// [1 byte: codec tag]
/// [N bytes: body (bincode record, compressed per the tag)]
/// ```
///
/// Decoding dispatches on the stored tag rather than on the configured
/// codec, so changing the codec never strands records written earlier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecordCodec {
    /// Uncompressed bincode.
    Raw,
    /// zstd-compressed bincode at the given level.
    Zstd { level: i32 },
}

impl RecordCodec {
    pub const DEFAULT_ZSTD_LEVEL: i32 = 3;

    /// The tag byte written in front of records encoded with this codec.
    pub fn tag(&self) -> u8 {
        match self {
            Self::Raw => TAG_RAW,
            Self::Zstd { .. } => TAG_ZSTD,
        }
    }

    /// Frame and compress a serialized record.
    pub fn encode(&self, payload: &[u8]) -> RecordResult<Vec<u8>> {
        let mut framed = vec![self.tag()];
        match self {
            Self::Raw => framed.extend_from_slice(payload),
            Self::Zstd { level } => {
                let compressed = zstd::encode_all(payload, *level)
                    .map_err(|e| RecordError::Compression(e.to_string()))?;
                framed.extend_from_slice(&compressed);
            }
        }
        Ok(framed)
    }

    /// Strip the frame from a stored record and decompress it.
    pub fn decode(framed: &[u8]) -> RecordResult<Vec<u8>> {
        let (tag, body) = framed
            .split_first()
            .ok_or_else(|| RecordError::Serialization("empty record frame".into()))?;
        match *tag {
            TAG_RAW => Ok(body.to_vec()),
            TAG_ZSTD => {
                zstd::decode_all(body).map_err(|e| RecordError::Decompression(e.to_string()))
            }
            other => Err(RecordError::UnknownCodec(other)),
        }
    }
}

impl Default for RecordCodec {
    fn default() -> Self {
        Self::Zstd {
            level: Self::DEFAULT_ZSTD_LEVEL,
        }
    }
}
