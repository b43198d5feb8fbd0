// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Packed posting lists.
//!
//! A posting list is stored in whichever of two encodings is smaller for its
//! density:
//!
//! - [`PackedIndex::Sparse`]: blocked delta + varint ([`PackedNats`]). Cost is
//!   roughly one or two bytes per member, independent of corpus size.
//! - [`PackedIndex::Dense`]: one bit per corpus token, in 32-bit words. Cost
//!   is `num_tokens / 8` bytes regardless of how many members there are.
//!
//! The crossover sits where a member costs about as much as 32 token bits,
//! so a list goes dense once `len * dense_ratio > num_tokens`.

pub mod bitmask;
pub mod nats;

pub use bitmask::{
    bitmask_indices, count_set_bits, is_bit_set, iter_set_bits, mask_width, shift_bitmask,
    shifted_word, smear_bitmask, to_bit_mask, words_for, Direction,
};
pub use nats::{pack_sorted_nats, NatsIter, PackedNats};

use crate::binary::WORD_BITS;

/// A posting list in either encoding. Both encodings decode to a strictly
/// ascending list of token indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackedIndex {
    Sparse(PackedNats),
    Dense(Vec<u32>),
}

impl PackedIndex {
    /// Pack ascending `indices` for a corpus of `num_tokens`, choosing the
    /// encoding by density.
    pub fn from_sorted(indices: &[u32], num_tokens: u32, dense_ratio: u32) -> Self {
        let dense = (indices.len() as u64) * u64::from(dense_ratio) > u64::from(num_tokens);
        if dense {
            Self::dense(indices, num_tokens)
        } else {
            Self::sparse(indices)
        }
    }

    pub fn sparse(indices: &[u32]) -> Self {
        PackedIndex::Sparse(pack_sorted_nats(indices))
    }

    pub fn dense(indices: &[u32], num_tokens: u32) -> Self {
        PackedIndex::Dense(to_bit_mask(indices, num_tokens))
    }

    pub fn is_dense(&self) -> bool {
        matches!(self, PackedIndex::Dense(_))
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        match self {
            PackedIndex::Sparse(nats) => nats.len(),
            PackedIndex::Dense(mask) => count_set_bits(mask),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            PackedIndex::Sparse(nats) => nats.is_empty(),
            PackedIndex::Dense(mask) => mask.iter().all(|&w| w == 0),
        }
    }

    /// Approximate in-memory footprint of the encoded data.
    pub fn byte_len(&self) -> usize {
        match self {
            PackedIndex::Sparse(nats) => nats.byte_len(),
            PackedIndex::Dense(mask) => mask.len() * 4,
        }
    }

    /// Decode to an ascending list.
    pub fn to_vec(&self) -> Vec<u32> {
        match self {
            PackedIndex::Sparse(nats) => nats.unpack(),
            PackedIndex::Dense(mask) => bitmask_indices(mask),
        }
    }

    /// Whether some member lies in `[start, end]`. Never decodes the whole list.
    pub fn has_value_in_range(&self, start: u32, end: u32) -> bool {
        if start > end {
            return false;
        }
        match self {
            PackedIndex::Sparse(nats) => nats.contains_in_range(start, end),
            PackedIndex::Dense(mask) => dense_has_value_in_range(mask, start, end),
        }
    }
}

/// Decode a possibly-absent posting list. Absence is the empty set.
pub fn unpack_packed_index_data(packed: Option<&PackedIndex>) -> Vec<u32> {
    packed.map(PackedIndex::to_vec).unwrap_or_default()
}

/// Range membership on a possibly-absent posting list.
pub fn has_value_in_range(packed: Option<&PackedIndex>, range: (u32, u32)) -> bool {
    let (start, end) = range;
    packed.is_some_and(|p| p.has_value_in_range(start, end))
}

fn dense_has_value_in_range(mask: &[u32], start: u32, end: u32) -> bool {
    let first_word = (start / WORD_BITS) as usize;
    let last_word = (end / WORD_BITS) as usize;
    if first_word >= mask.len() {
        return false;
    }
    for word_index in first_word..=last_word.min(mask.len() - 1) {
        let mut word = mask[word_index];
        if word_index == first_word {
            word &= u32::MAX << (start % WORD_BITS);
        }
        if word_index == last_word {
            let top = end % WORD_BITS;
            if top < WORD_BITS - 1 {
                word &= (1u32 << (top + 1)) - 1;
            }
        }
        if word != 0 {
            return true;
        }
    }
    false
}
