//! Offset-aware AND, OR and proximity against set oracles, for every pairing
//! of encodings.

use proptest::prelude::*;
use verbum::{
    apply_and_to_indices, apply_or_to_indices, apply_within_to_indices, Direction, PackedIndex,
};

use crate::{direction, posting_pair};

fn encodings(values: &[u32], num_tokens: u32) -> [PackedIndex; 2] {
    [
        PackedIndex::sparse(values),
        PackedIndex::dense(values, num_tokens),
    ]
}

fn oracle_and(candidates: &[u32], filter: &[u32], offset: i64) -> Vec<u32> {
    candidates
        .iter()
        .copied()
        .filter(|&c| {
            let p = i64::from(c) - offset;
            p >= 0 && filter.contains(&(p as u32))
        })
        .collect()
}

fn oracle_or(candidates: &[u32], filter: &[u32], offset: i64) -> Vec<u32> {
    let shifted = filter
        .iter()
        .filter_map(|&f| u32::try_from(i64::from(f) + offset).ok());
    let mut union: Vec<u32> = candidates.iter().copied().chain(shifted).collect();
    union.sort_unstable();
    union.dedup();
    union
}

fn oracle_within(
    candidates: &[u32],
    filter: &[u32],
    offset: i64,
    radius: u32,
    direction: Direction,
) -> Vec<u32> {
    let r = i64::from(radius);
    let (behind, ahead) = match direction {
        Direction::Right => (r, 0),
        Direction::Left => (0, r),
        Direction::Both => (r, r),
    };
    candidates
        .iter()
        .copied()
        .filter(|&c| {
            let p = i64::from(c) - offset;
            p >= 0
                && filter
                    .iter()
                    .any(|&f| (p - behind..=p + ahead).contains(&i64::from(f)))
        })
        .collect()
}

proptest! {
    #[test]
    fn prop_and_matches_oracle(
        (num_tokens, a, b) in posting_pair(600),
        a_pos in 0u32..40,
        b_pos in 0u32..40,
    ) {
        let offset = i64::from(a_pos) - i64::from(b_pos);
        let expected = oracle_and(&a, &b, offset);
        for candidates in &encodings(&a, num_tokens) {
            for filter in &encodings(&b, num_tokens) {
                let (result, pos) = apply_and_to_indices(candidates, a_pos, filter, b_pos);
                prop_assert_eq!(pos, a_pos);
                prop_assert_eq!(
                    result.to_vec(),
                    expected.clone(),
                    "dense candidates: {}, dense filter: {}",
                    candidates.is_dense(),
                    filter.is_dense()
                );
            }
        }
    }

    #[test]
    fn prop_or_matches_oracle(
        (num_tokens, a, b) in posting_pair(600),
        a_pos in 0u32..40,
        b_pos in 0u32..40,
    ) {
        let offset = i64::from(a_pos) - i64::from(b_pos);
        let expected = oracle_or(&a, &b, offset);
        for candidates in &encodings(&a, num_tokens) {
            for filter in &encodings(&b, num_tokens) {
                let (result, pos) = apply_or_to_indices(candidates, a_pos, filter, b_pos);
                prop_assert_eq!(pos, a_pos);
                prop_assert_eq!(result.is_dense(), candidates.is_dense() || filter.is_dense());
                prop_assert_eq!(
                    result.to_vec(),
                    expected.clone(),
                    "dense candidates: {}, dense filter: {}",
                    candidates.is_dense(),
                    filter.is_dense()
                );
            }
        }
    }

    #[test]
    fn prop_and_result_is_subset_of_candidates(
        (num_tokens, a, b) in posting_pair(600),
        b_pos in 0u32..40,
    ) {
        let candidates = PackedIndex::from_sorted(&a, num_tokens, 32);
        let filter = PackedIndex::from_sorted(&b, num_tokens, 32);
        let (result, _) = apply_and_to_indices(&candidates, 0, &filter, b_pos);
        for token in result.to_vec() {
            prop_assert!(a.binary_search(&token).is_ok());
        }
    }

    #[test]
    fn prop_within_matches_oracle(
        (num_tokens, a, b) in posting_pair(600),
        a_pos in 0u32..20,
        b_pos in 0u32..20,
        radius in 0u32..80,
        direction in direction(),
    ) {
        let offset = i64::from(a_pos) - i64::from(b_pos);
        let expected = oracle_within(&a, &b, offset, radius, direction);
        for candidates in &encodings(&a, num_tokens) {
            for filter in &encodings(&b, num_tokens) {
                let (result, pos) =
                    apply_within_to_indices(candidates, a_pos, filter, b_pos, radius, direction);
                prop_assert_eq!(pos, a_pos);
                prop_assert_eq!(
                    result.to_vec(),
                    expected.clone(),
                    "dense candidates: {}, dense filter: {}, {} {}",
                    candidates.is_dense(),
                    filter.is_dense(),
                    direction,
                    radius
                );
            }
        }
    }

    #[test]
    fn prop_within_grows_with_radius(
        (num_tokens, a, b) in posting_pair(400),
        radius in 0u32..30,
        direction in direction(),
    ) {
        let candidates = PackedIndex::sparse(&a);
        let filter = PackedIndex::dense(&b, num_tokens);
        let (narrow, _) = apply_within_to_indices(&candidates, 0, &filter, 0, radius, direction);
        let (wide, _) = apply_within_to_indices(&candidates, 0, &filter, 0, radius + 1, direction);
        let wide = wide.to_vec();
        for token in narrow.to_vec() {
            prop_assert!(wide.binary_search(&token).is_ok());
        }
    }
}
