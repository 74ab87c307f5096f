//! Binary key encodings.
//!
//! The store orders keys by comparing their bytes, so integers are written
//! big-endian: lexicographic order of the encodings equals numeric order.

/// Size of an encoded integer key.
pub const INTEGER_KEY_SIZE: usize = 8;

/// Encodes `v` as an 8-byte big-endian key.
pub fn integer_to_bytes(v: u64) -> [u8; INTEGER_KEY_SIZE] {
    v.to_be_bytes()
}

/// Decodes a key written by [`integer_to_bytes`].
/// Returns `None` if `b` is not exactly 8 bytes long.
pub fn integer_from_bytes(b: &[u8]) -> Option<u64> {
    let b: [u8; INTEGER_KEY_SIZE] = b.try_into().ok()?;
    Some(u64::from_be_bytes(b))
}

#[cfg(test)]
mod tests {
    use rand::{Rng as _, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    use super::*;

    const DEFAULT_SEED: u64 = 1;

    #[test]
    fn test_big_endian_layout() {
        assert_eq!(integer_to_bytes(0), [0; 8]);
        assert_eq!(integer_to_bytes(1), [0, 0, 0, 0, 0, 0, 0, 1]);
        assert_eq!(integer_to_bytes(0x0102), [0, 0, 0, 0, 0, 0, 1, 2]);
        assert_eq!(integer_to_bytes(u64::MAX), [0xFF; 8]);
    }

    #[test]
    fn test_encoding_preserves_order() {
        let mut rng = ChaCha8Rng::seed_from_u64(DEFAULT_SEED);
        for _ in 0..10_000 {
            let (a, b): (u64, u64) = (rng.random(), rng.random());
            assert_eq!(
                a.cmp(&b),
                integer_to_bytes(a).cmp(&integer_to_bytes(b)),
                "a = {a}, b = {b}"
            );
        }
        // Boundaries where little-endian would break.
        assert!(integer_to_bytes(255) < integer_to_bytes(256));
        assert!(integer_to_bytes(u64::MAX - 1) < integer_to_bytes(u64::MAX));
    }

    #[test]
    fn test_decode() {
        assert_eq!(integer_from_bytes(&integer_to_bytes(9001)), Some(9001));
        assert_eq!(integer_from_bytes(&[1, 2, 3]), None);
        assert_eq!(integer_from_bytes(&[0; 9]), None);
    }
}
