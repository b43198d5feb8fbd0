//! Smearing and shifting against a per-bit oracle.

use proptest::prelude::*;
use verbum::packed::{bitmask_indices, shift_bitmask, words_for};
use verbum::{smear_bitmask, to_bit_mask, Direction};

use crate::{direction, posting_list};

/// Positions a smear of `values` must cover, clipped to the mask.
fn oracle_smear(values: &[u32], mask_bits: i64, radius: u32, direction: Direction) -> Vec<u32> {
    let r = i64::from(radius);
    let (low, high) = match direction {
        Direction::Left => (-r, 0),
        Direction::Right => (0, r),
        Direction::Both => (-r, r),
    };
    (0..mask_bits)
        .filter(|&q| {
            values
                .iter()
                .any(|&v| (i64::from(v) + low..=i64::from(v) + high).contains(&q))
        })
        .map(|q| q as u32)
        .collect()
}

proptest! {
    #[test]
    fn prop_smear_matches_oracle(
        (num_tokens, values) in posting_list(300),
        radius in 0u32..100,
        direction in direction(),
    ) {
        let mask = to_bit_mask(&values, num_tokens);
        let mask_bits = words_for(num_tokens) as i64 * 32;
        let smeared = smear_bitmask(&mask, radius, direction);
        prop_assert_eq!(smeared.len(), mask.len());
        prop_assert_eq!(
            bitmask_indices(&smeared),
            oracle_smear(&values, mask_bits, radius, direction)
        );
    }

    #[test]
    fn prop_smear_zero_is_identity((num_tokens, values) in posting_list(300), direction in direction()) {
        let mask = to_bit_mask(&values, num_tokens);
        prop_assert_eq!(smear_bitmask(&mask, 0, direction), mask);
    }

    #[test]
    fn prop_shift_moves_every_bit((num_tokens, values) in posting_list(300), shift in -100i64..100) {
        let mask = to_bit_mask(&values, num_tokens);
        let mask_bits = mask.len() as i64 * 32;
        let expected: Vec<u32> = values
            .iter()
            .map(|&v| i64::from(v) + shift)
            .filter(|&p| (0..mask_bits).contains(&p))
            .map(|p| p as u32)
            .collect();
        prop_assert_eq!(bitmask_indices(&shift_bitmask(&mask, shift)), expected);
    }
}
