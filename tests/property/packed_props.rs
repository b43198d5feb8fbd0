//! Both posting list encodings decode to the same ascending set.

use proptest::prelude::*;
use verbum::{has_value_in_range, PackedIndex, PackedNats};

use crate::posting_list;

proptest! {
    #[test]
    fn prop_encodings_decode_identically((num_tokens, values) in posting_list(2000)) {
        let sparse = PackedIndex::sparse(&values);
        let dense = PackedIndex::dense(&values, num_tokens);
        prop_assert_eq!(sparse.to_vec(), values.clone());
        prop_assert_eq!(dense.to_vec(), values.clone());
        prop_assert_eq!(sparse.len(), values.len());
        prop_assert_eq!(dense.len(), values.len());
        prop_assert_eq!(sparse.is_empty(), values.is_empty());
        prop_assert_eq!(dense.is_empty(), values.is_empty());
    }

    #[test]
    fn prop_range_query_matches_scan(
        (num_tokens, values) in posting_list(2000),
        a in 0u32..2100,
        b in 0u32..2100,
    ) {
        let (start, end) = (a.min(b), a.max(b));
        let expected = values.iter().any(|&v| v >= start && v <= end);
        let sparse = PackedIndex::sparse(&values);
        let dense = PackedIndex::dense(&values, num_tokens);
        prop_assert_eq!(sparse.has_value_in_range(start, end), expected);
        prop_assert_eq!(dense.has_value_in_range(start, end), expected);
        prop_assert_eq!(has_value_in_range(Some(&dense), (start, end)), expected);
        prop_assert!(!has_value_in_range(None, (start, end)));
    }

    #[test]
    fn prop_density_rule((num_tokens, values) in posting_list(2000), ratio in 1u32..64) {
        let packed = PackedIndex::from_sorted(&values, num_tokens, ratio);
        let dense = values.len() as u64 * u64::from(ratio) > u64::from(num_tokens);
        prop_assert_eq!(packed.is_dense(), dense);
        prop_assert_eq!(packed.to_vec(), values);
    }

    #[test]
    fn prop_nats_wire_format((_, values) in posting_list(100_000)) {
        let nats: PackedNats = values.iter().copied().collect();
        let mut buf = Vec::new();
        nats.encode(&mut buf);
        buf.push(0xAB);
        let (decoded, consumed) = PackedNats::decode(&buf).unwrap();
        prop_assert_eq!(consumed, buf.len() - 1);
        prop_assert_eq!(decoded.unpack(), values.clone());
        prop_assert_eq!(decoded.last(), values.last().copied());
        for v in &values {
            prop_assert!(decoded.contains(*v));
        }
    }
}
