// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Offset-aware intersection and union of posting lists.
//!
//! Every operation combines candidates with a filter shifted by a signed
//! `offset`. For AND, candidate `c` survives iff the filter contains
//! `c - offset`; for OR, every filter member `f` contributes `f + offset`. With `offset = 0` this is plain intersection; with
//! the difference between two query terms' positions it becomes an adjacency
//! test ("`A` immediately followed by `B`").
//!
//! # Frames
//!
//! Query terms carry a positional anchor. A result is always expressed in
//! the candidate side's frame, so a query executor can fold any number of
//! terms into one running result:
//!
//! ```text
//! term:      arma   virum   cano
//! position:    0      1       2
//!
//! (arma@0 AND virum@1) -> result@0 -> (result@0 AND cano@2) -> result@0
//! ```
//!
//! # Representations
//!
//! All four sparse/dense pairings are supported and decode to the same set.
//! Out-of-range shifts and empty operands are not errors; they produce empty
//! results so chains of terms can legitimately match nothing.
//!
//! AND and proximity results are dense only when both operands are. A union
//! is at least as large as either operand, so OR returns a dense result as
//! soon as one operand is dense.

use crate::binary::WORD_BITS;
use crate::packed::{
    is_bit_set, iter_set_bits, mask_width, shifted_word, smear_bitmask, Direction, PackedIndex,
    PackedNats,
};

// ============================================================================
// REPRESENTATION-SPECIFIC KERNELS
// ============================================================================

/// Merge intersection of `first` with `second` shifted by `+offset`.
///
/// Returns the members `c` of `first` for which `c - offset` is in `second`.
/// Both slices must be ascending. `O(n + m)`.
pub fn apply_and_with_arrays(first: &[u32], second: &[u32], offset: i64) -> Vec<u32> {
    let mut result = Vec::new();
    let (mut i, mut j) = (0, 0);
    while i < first.len() && j < second.len() {
        let left = i64::from(first[i]);
        let right = i64::from(second[j]) + offset;
        match left.cmp(&right) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                result.push(first[i]);
                i += 1;
                j += 1;
            }
        }
    }
    result
}

/// Keep the array entries whose `index + offset` bit is set in `bitmask`.
///
/// Returns the shifted values `index + offset`, i.e. positions in the
/// bitmask's frame. Shifted positions outside the mask never match.
pub fn apply_and_with_bitmask_and_array(bitmask: &[u32], array: &[u32], offset: i64) -> Vec<u32> {
    array
        .iter()
        .map(|&index| i64::from(index) + offset)
        .filter(|&position| is_bit_set(bitmask, position))
        // A set bit proves 0 <= position < bitmask.len() * 32.
        .map(|position| position as u32)
        .collect()
}

/// Bitwise AND of `a` with `b` shifted by `offset` bits.
///
/// Result bit `c` is `a[c] & b[c - offset]`; bits of `b` shifted past either
/// end are dropped. The result has the length of `a`.
pub fn apply_and_with_bitmasks(a: &[u32], b: &[u32], offset: i64) -> Vec<u32> {
    if b.is_empty() || offset.unsigned_abs() >= (b.len() as u64 + a.len() as u64) * 32 {
        return vec![0; a.len()];
    }
    a.iter()
        .enumerate()
        .map(|(word_index, &word)| word & shifted_word(b, word_index, offset))
        .collect()
}

/// Sorted union of `first` with `second` shifted by `+offset`.
///
/// Shifted values that leave the `u32` range are dropped; values present in
/// both inputs appear once. `O(n + m)`.
pub fn apply_or_with_arrays(first: &[u32], second: &[u32], offset: i64) -> Vec<u32> {
    let mut result = Vec::with_capacity(first.len() + second.len());
    let mut left = first.iter().copied().peekable();
    let mut right = second
        .iter()
        .filter_map(|&value| u32::try_from(i64::from(value) + offset).ok())
        .peekable();
    loop {
        let next = match (left.peek().copied(), right.peek().copied()) {
            (Some(a), Some(b)) if a < b => left.next(),
            (Some(a), Some(b)) if a > b => right.next(),
            (Some(_), Some(_)) => {
                right.next();
                left.next()
            }
            (Some(_), None) => left.next(),
            (None, Some(_)) => right.next(),
            (None, None) => None,
        };
        match next {
            Some(value) => result.push(value),
            None => break,
        }
    }
    result
}

/// Set the bit for `index + offset` of every array entry in a copy of
/// `bitmask`.
///
/// The mask grows to hold positions past its last word; negative positions
/// are dropped.
pub fn apply_or_with_bitmask_and_array(bitmask: &[u32], array: &[u32], offset: i64) -> Vec<u32> {
    let mut result = bitmask.to_vec();
    for position in array
        .iter()
        .filter_map(|&index| u32::try_from(i64::from(index) + offset).ok())
    {
        let word = (position / WORD_BITS) as usize;
        if word >= result.len() {
            result.resize(word + 1, 0);
        }
        result[word] |= 1 << (position % WORD_BITS);
    }
    result
}

/// Bitwise OR of `a` with `b` shifted by `offset` bits.
///
/// Result bit `c` is `a[c] | b[c - offset]`. The result is long enough to
/// keep every bit of `b` shifted toward higher positions; bits shifted below
/// zero are dropped.
pub fn apply_or_with_bitmasks(a: &[u32], b: &[u32], offset: i64) -> Vec<u32> {
    let shifted_end = (b.len() as i64 * i64::from(WORD_BITS) + offset).max(0);
    let shifted_words = (shifted_end as u64).div_ceil(u64::from(WORD_BITS)) as usize;
    let len = if b.is_empty() {
        a.len()
    } else {
        a.len().max(shifted_words)
    };
    (0..len)
        .map(|word_index| {
            a.get(word_index).copied().unwrap_or(0) | shifted_word(b, word_index, offset)
        })
        .collect()
}

// ============================================================================
// DISPATCH
// ============================================================================

/// AND two positioned posting lists.
///
/// `offset = candidates_pos - filter_pos`: a candidate `c` matches iff the
/// filter contains `c - offset`. Returns the result and its position, which is
/// always `candidates_pos`.
pub fn apply_and_to_indices(
    candidates: &PackedIndex,
    candidates_pos: u32,
    filter: &PackedIndex,
    filter_pos: u32,
) -> (PackedIndex, u32) {
    let offset = i64::from(candidates_pos) - i64::from(filter_pos);
    let result = match (candidates, filter) {
        (PackedIndex::Sparse(c), PackedIndex::Sparse(f)) => {
            PackedIndex::Sparse(sparse_and_sparse(c, f, offset))
        }
        (PackedIndex::Sparse(c), PackedIndex::Dense(f)) => {
            // Work in the filter's frame, then shift back.
            let matched = apply_and_with_bitmask_and_array(f, &c.unpack(), -offset);
            PackedIndex::Sparse(
                matched
                    .into_iter()
                    .map(|position| (i64::from(position) + offset) as u32)
                    .collect(),
            )
        }
        (PackedIndex::Dense(c), PackedIndex::Sparse(f)) => {
            let matched = apply_and_with_bitmask_and_array(c, &f.unpack(), offset);
            PackedIndex::Sparse(matched.into_iter().collect())
        }
        (PackedIndex::Dense(c), PackedIndex::Dense(f)) => {
            PackedIndex::Dense(apply_and_with_bitmasks(c, f, offset))
        }
    };
    (result, candidates_pos)
}

/// OR two positioned posting lists.
///
/// Same frame rule as [`apply_and_to_indices`]: with
/// `offset = candidates_pos - filter_pos`, every filter member `f` is added
/// at `f + offset` and the result position is `candidates_pos`. Members that
/// shift below zero are dropped.
pub fn apply_or_to_indices(
    candidates: &PackedIndex,
    candidates_pos: u32,
    filter: &PackedIndex,
    filter_pos: u32,
) -> (PackedIndex, u32) {
    let offset = i64::from(candidates_pos) - i64::from(filter_pos);
    let result = match (candidates, filter) {
        (PackedIndex::Sparse(c), PackedIndex::Sparse(f)) => PackedIndex::Sparse(
            apply_or_with_arrays(&c.unpack(), &f.unpack(), offset)
                .into_iter()
                .collect(),
        ),
        (PackedIndex::Sparse(c), PackedIndex::Dense(f)) => {
            let shifted = apply_or_with_bitmasks(&[], f, offset);
            PackedIndex::Dense(apply_or_with_bitmask_and_array(&shifted, &c.unpack(), 0))
        }
        (PackedIndex::Dense(c), PackedIndex::Sparse(f)) => {
            PackedIndex::Dense(apply_or_with_bitmask_and_array(c, &f.unpack(), offset))
        }
        (PackedIndex::Dense(c), PackedIndex::Dense(f)) => {
            PackedIndex::Dense(apply_or_with_bitmasks(c, f, offset))
        }
    };
    (result, candidates_pos)
}

/// Streaming sparse merge that never materializes either operand.
fn sparse_and_sparse(candidates: &PackedNats, filter: &PackedNats, offset: i64) -> PackedNats {
    let mut result = PackedNats::new();
    let mut filter_iter = filter.iter().peekable();
    for candidate in candidates {
        let target = i64::from(candidate) - offset;
        while filter_iter
            .peek()
            .is_some_and(|&value| i64::from(value) < target)
        {
            filter_iter.next();
        }
        match filter_iter.peek() {
            Some(&value) if i64::from(value) == target => result.push(candidate),
            Some(_) => {}
            None => break,
        }
    }
    result
}

// ============================================================================
// PROXIMITY
// ============================================================================

/// Like [`apply_and_to_indices`], but the filter only needs a member *near*
/// the shifted candidate.
///
/// With `p = c - offset`, candidate `c` matches iff `p >= 0` and the filter
/// has a member `f` with `p - f` in the direction's window:
///
/// | direction | window      | filter member        |
/// |-----------|-------------|----------------------|
/// | right     | `[0, r]`    | `f` in `[p - r, p]`  |
/// | left      | `[-r, 0]`   | `f` in `[p, p + r]`  |
/// | both      | `[-r, r]`   | `f` in `[p - r, p + r]` |
///
/// Dense filters are smeared and intersected; sparse filters are merged with
/// a sliding window. `radius = 0` is exactly [`apply_and_to_indices`].
pub fn apply_within_to_indices(
    candidates: &PackedIndex,
    candidates_pos: u32,
    filter: &PackedIndex,
    filter_pos: u32,
    radius: u32,
    direction: Direction,
) -> (PackedIndex, u32) {
    if radius == 0 {
        return apply_and_to_indices(candidates, candidates_pos, filter, filter_pos);
    }
    match filter {
        PackedIndex::Dense(mask) => {
            // Runs smeared right may extend past the last word; grow the mask
            // so they are not clipped, but only as far as a shifted candidate
            // can land.
            let mut grown = mask.clone();
            if direction != Direction::Left {
                let offset = i64::from(candidates_pos) - i64::from(filter_pos);
                let reach = (candidate_bound(candidates) - offset).max(0) as u64;
                let needed = reach.div_ceil(u64::from(WORD_BITS));
                let limit = mask.len() + radius.div_ceil(WORD_BITS) as usize;
                let words = usize::try_from(needed).map_or(limit, |n| n.clamp(mask.len(), limit));
                grown.resize(words, 0);
            }
            let smeared = PackedIndex::Dense(smear_bitmask(&grown, radius, direction));
            apply_and_to_indices(candidates, candidates_pos, &smeared, filter_pos)
        }
        PackedIndex::Sparse(nats) => {
            let offset = i64::from(candidates_pos) - i64::from(filter_pos);
            let (behind, ahead) = match direction {
                Direction::Right => (i64::from(radius), 0),
                Direction::Left => (0, i64::from(radius)),
                Direction::Both => (i64::from(radius), i64::from(radius)),
            };
            let result = match candidates {
                PackedIndex::Sparse(c) => within_sparse(c.iter(), nats, offset, behind, ahead),
                PackedIndex::Dense(c) => within_sparse(iter_set_bits(c), nats, offset, behind, ahead),
            };
            (PackedIndex::Sparse(result), candidates_pos)
        }
    }
}

/// Exclusive upper bound on the members of `candidates`.
fn candidate_bound(candidates: &PackedIndex) -> i64 {
    match candidates {
        PackedIndex::Sparse(nats) => nats.last().map_or(0, |last| i64::from(last) + 1),
        PackedIndex::Dense(mask) => i64::from(mask_width(mask)),
    }
}

/// Sliding-window merge: keeps `c` when the filter has a member in
/// `[c - offset - behind, c - offset + ahead]`.
fn within_sparse(
    candidates: impl Iterator<Item = u32>,
    filter: &PackedNats,
    offset: i64,
    behind: i64,
    ahead: i64,
) -> PackedNats {
    let mut result = PackedNats::new();
    let mut filter_iter = filter.iter().peekable();
    for candidate in candidates {
        let target = i64::from(candidate) - offset;
        if target < 0 {
            continue;
        }
        let low = target - behind;
        while filter_iter
            .peek()
            .is_some_and(|&value| i64::from(value) < low)
        {
            filter_iter.next();
        }
        match filter_iter.peek() {
            Some(&value) if i64::from(value) <= target + ahead => result.push(candidate),
            Some(_) => {}
            None => break,
        }
    }
    result
}
