//! Conversions between 32-byte words and the integers stored in them.

use strata_types::{B256, U256};

/// `n` as a big-endian 32-byte word.
pub fn from_u64(n: u64) -> B256 {
    from_u256(U256::from(n))
}

/// `n` as a big-endian 32-byte word.
pub fn from_u256(n: U256) -> B256 {
    B256::from(n.to_be_bytes::<32>())
}

/// The word read as a big-endian 256-bit integer.
pub fn to_u256(word: &B256) -> U256 {
    U256::from_be_bytes(word.0)
}

/// `n` as a `u64`, if it fits.
pub fn narrow(n: U256) -> Option<u64> {
    to_u64(&from_u256(n))
}

/// The word read as a big-endian integer, if it fits in 64 bits.
pub fn to_u64(word: &B256) -> Option<u64> {
    let (high, low) = word.0.split_at(24);
    if high.iter().any(|b| *b != 0) {
        return None;
    }
    let mut buf = [0u8; 8];
    buf.copy_from_slice(low);
    Some(u64::from_be_bytes(buf))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_integers_roundtrip() {
        for n in [0u64, 1, 255, 256, u64::MAX] {
            assert_eq!(to_u64(&from_u64(n)), Some(n));
        }
    }

    #[test]
    fn wide_values_do_not_fit() {
        let wide = from_u256(U256::from(u64::MAX) + U256::from(1u8));
        assert_eq!(to_u64(&wide), None);
        assert_eq!(narrow(U256::MAX), None);
        assert_eq!(narrow(U256::from(42u8)), Some(42));
    }

    #[test]
    fn layout_is_big_endian() {
        let word = from_u64(111);
        assert_eq!(word.0[31], 111);
        assert!(word.0[..31].iter().all(|b| *b == 0));
        assert_eq!(to_u256(&word), U256::from(111u64));
    }
}
