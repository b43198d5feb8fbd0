// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Dense posting lists: fixed-width arrays of 32-bit words.
//!
//! Bit `i` of word `w` stands for token `32 * w + i`. Every operation here
//! works a word at a time; the only subtle part is shifting, where each
//! output word is stitched together from two neighbouring input words.
//!
//! ```text
//! shift = +3 (toward higher token indices)
//!
//!   input   word 0: ...b31 b30 b29 | word 1: ...
//!   output  word 1 = (in[1] << 3) | (in[0] >> 29)
//! ```
//!
//! Bits shifted past either end of the mask are dropped. Masks cover
//! `len * 32` positions, so a mask built for `n` tokens may carry a few
//! positions past `n - 1` in its last word; operations never set those
//! positions from real tokens, and smearing into them is harmless because
//! no token lives there.

use std::fmt;
use std::str::FromStr;

use crate::binary::WORD_BITS;

/// Direction of a smear (dilation) relative to each set bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Toward lower token indices: `[i - r, i]`.
    Left,
    /// Toward higher token indices: `[i, i + r]`.
    Right,
    /// Both ways: `[i - r, i + r]`.
    Both,
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" => Ok(Direction::Left),
            "right" => Ok(Direction::Right),
            "both" => Ok(Direction::Both),
            other => Err(format!("Unknown smear direction '{}'", other)),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Both => "both",
        };
        f.write_str(name)
    }
}

/// Number of words needed to cover `total_length` positions.
#[inline]
pub fn words_for(total_length: u32) -> usize {
    total_length.div_ceil(WORD_BITS) as usize
}

/// Build a dense mask covering positions `0..total_length`.
///
/// # Panics
///
/// Panics if any index is `>= total_length`.
pub fn to_bit_mask(indices: &[u32], total_length: u32) -> Vec<u32> {
    let mut mask = vec![0u32; words_for(total_length)];
    for &index in indices {
        assert!(
            index < total_length,
            "index {} does not fit a mask of length {}",
            index,
            total_length
        );
        mask[(index / WORD_BITS) as usize] |= 1 << (index % WORD_BITS);
    }
    mask
}

/// Whether the bit for `position` is set. Out-of-range positions read as unset.
#[inline]
pub fn is_bit_set(mask: &[u32], position: i64) -> bool {
    if position < 0 {
        return false;
    }
    let word = (position / i64::from(WORD_BITS)) as usize;
    let bit = (position % i64::from(WORD_BITS)) as u32;
    mask.get(word).is_some_and(|w| w & (1 << bit) != 0)
}

/// Iterate the set positions of a mask in ascending order.
pub fn iter_set_bits(mask: &[u32]) -> SetBits<'_> {
    SetBits {
        mask,
        word_index: 0,
        current: mask.first().copied().unwrap_or(0),
    }
}

/// Decode a mask to its ascending set positions.
pub fn bitmask_indices(mask: &[u32]) -> Vec<u32> {
    iter_set_bits(mask).collect()
}

/// Number of set positions.
pub fn count_set_bits(mask: &[u32]) -> usize {
    mask.iter().map(|w| w.count_ones() as usize).sum()
}

/// Ascending iterator over set bits, one word at a time.
#[derive(Debug, Clone)]
pub struct SetBits<'a> {
    mask: &'a [u32],
    word_index: usize,
    current: u32,
}

impl Iterator for SetBits<'_> {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        while self.current == 0 {
            self.word_index += 1;
            self.current = *self.mask.get(self.word_index)?;
        }
        let bit = self.current.trailing_zeros();
        // Clear the lowest set bit.
        self.current &= self.current - 1;
        Some(self.word_index as u32 * WORD_BITS + bit)
    }
}

/// Word `word_index` of `mask` after shifting every bit by `shift` positions.
///
/// Positive shifts move bits toward higher positions: output bit `p` equals
/// input bit `p - shift`. Input words outside the mask read as zero, so any
/// shift at or beyond the mask length yields zero.
#[inline]
pub fn shifted_word(mask: &[u32], word_index: usize, shift: i64) -> u32 {
    let bits = i64::from(WORD_BITS);
    let source_start = word_index as i64 * bits - shift;
    let source_word = source_start.div_euclid(bits);
    let bit = source_start.rem_euclid(bits) as u32;

    let read = |index: i64| -> u32 {
        if index < 0 {
            return 0;
        }
        mask.get(index as usize).copied().unwrap_or(0)
    };

    let low = read(source_word) >> bit;
    if bit == 0 {
        low
    } else {
        low | (read(source_word + 1) << (WORD_BITS - bit))
    }
}

/// Shift a whole mask by `shift` positions, keeping its length.
pub fn shift_bitmask(mask: &[u32], shift: i64) -> Vec<u32> {
    (0..mask.len())
        .map(|word_index| shifted_word(mask, word_index, shift))
        .collect()
}

/// `data |= data shifted by shift`, in place.
///
/// Words are visited in the order that guarantees every word is read before
/// it is overwritten: high to low for positive shifts, low to high otherwise.
fn or_with_self_shifted(data: &mut [u32], shift: i64) {
    if shift == 0 || data.is_empty() {
        return;
    }
    if shift > 0 {
        for word_index in (0..data.len()).rev() {
            let shifted = shifted_word(data, word_index, shift);
            data[word_index] |= shifted;
        }
    } else {
        for word_index in 0..data.len() {
            let shifted = shifted_word(data, word_index, shift);
            data[word_index] |= shifted;
        }
    }
}

/// Dilate every set bit into a run of `radius` extra bits.
///
/// If the original mask has bit `i` set, the result has bits set in:
/// - [`Direction::Left`]: `[i - radius, i]`
/// - [`Direction::Right`]: `[i, i + radius]`
/// - [`Direction::Both`]: `[i - radius, i + radius]`
///
/// Runs are clipped at the mask bounds and overlapping runs simply merge, so
/// any radius past the mask width behaves like the width itself.
///
/// The run is grown by doubling: after OR-ing with a copy shifted by
/// `covered + 1`, a run of `covered + 1` bits becomes `2 * (covered + 1)` bits
/// with no gap, so `radius` costs `O(log radius)` passes over the mask.
pub fn smear_bitmask(mask: &[u32], radius: u32, direction: Direction) -> Vec<u32> {
    let radius = radius.min(mask_width(mask));
    if direction != Direction::Both {
        let mut result = mask.to_vec();
        smear_in_place(&mut result, radius, direction);
        return result;
    }
    // The right pass must not lose the tail of a run to clipping before the
    // left pass mirrors it, so it runs on a copy grown by `radius` bits.
    let mut result = mask.to_vec();
    result.resize(mask.len() + radius.div_ceil(WORD_BITS) as usize, 0);
    smear_in_place(&mut result, radius, Direction::Right);
    // The run now spans [i, i + radius]; one left pass of `radius` completes
    // the symmetric window.
    if radius > 0 {
        or_with_self_shifted(&mut result, -i64::from(radius));
    }
    result.truncate(mask.len());
    result
}

/// Number of positions a mask covers, saturating at `u32::MAX`.
#[inline]
pub fn mask_width(mask: &[u32]) -> u32 {
    u32::try_from(mask.len())
        .ok()
        .and_then(|words| words.checked_mul(WORD_BITS))
        .unwrap_or(u32::MAX)
}

fn smear_in_place(data: &mut [u32], radius: u32, direction: Direction) {
    let sign: i64 = if direction == Direction::Left { -1 } else { 1 };
    let mut covered = 0u32;
    while covered < radius {
        let step = (covered + 1).min(radius - covered);
        or_with_self_shifted(data, i64::from(step) * sign);
        covered += step;
    }
}
