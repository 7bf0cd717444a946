use proptest::prelude::*;

use poh_types::{blake2b_256, blake2b_256_multi, BlockHash, Timestamp};

proptest! {
    /// Hashing is deterministic.
    #[test]
    fn digest_is_deterministic(data in prop::collection::vec(any::<u8>(), 0..256)) {
        prop_assert_eq!(blake2b_256(&data), blake2b_256(&data));
    }

    /// Multi-part hashing matches hashing the concatenation.
    #[test]
    fn multi_matches_concatenation(
        a in prop::collection::vec(any::<u8>(), 0..128),
        b in prop::collection::vec(any::<u8>(), 0..128),
    ) {
        let mut joined = a.clone();
        joined.extend_from_slice(&b);
        prop_assert_eq!(blake2b_256(&joined), blake2b_256_multi(&[&a, &b]));
    }

    /// Leading-zero-nibble count agrees with the hex rendering.
    #[test]
    fn nibble_count_matches_hex(bytes in prop::array::uniform32(any::<u8>())) {
        let hash = BlockHash::new(bytes);
        let hex = hash.to_string();
        let expected = hex.chars().take_while(|c| *c == '0').count() as u32;
        prop_assert_eq!(hash.leading_zero_nibbles(), expected);
    }

    /// Meeting difficulty D implies meeting every difficulty below D.
    #[test]
    fn difficulty_is_monotone(bytes in prop::array::uniform32(any::<u8>()), d in 1u32..64) {
        let hash = BlockHash::new(bytes);
        if hash.meets_difficulty(d) {
            prop_assert!(hash.meets_difficulty(d - 1));
        }
    }

    /// Expiry is monotone in `now`.
    #[test]
    fn expiry_is_monotone(start in 0u64..1_000_000, dur in 0u64..1_000_000, dt in 0u64..1_000_000) {
        let t = Timestamp::new(start);
        let now = Timestamp::new(start + dt);
        if t.has_expired(dur, now) {
            prop_assert!(t.has_expired(dur, now.plus(1)));
        }
    }
}
