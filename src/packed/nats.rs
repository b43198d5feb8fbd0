// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Sparse posting lists: blocked delta + varint encoding of ascending naturals.
//!
//! Token indices in a sparse posting list are strictly ascending, so the gaps
//! are what we store. Most gaps in a real corpus are a few hundred tokens at
//! most, which is one or two varint bytes each.
//!
//! Pure delta streams have one weakness: answering "is there anything in
//! [start, end]?" means decoding from the beginning. So values are grouped in
//! blocks of `SPARSE_BLOCK_LEN`, and the first value of every block is kept
//! in absolute form in `heads`. A range query binary searches the heads and
//! decodes at most one block.
//!
//! ```text
//! values:  [3, 5, 9, 200, | 260, 261, ...]
//! heads:   [3,            | 260, ...]
//! deltas:  [2, 4, 191,    | 1, ...]        (varint bytes)
//! ```

use std::io;

use crate::binary::{decode_varint_u32, encode_varint, SPARSE_BLOCK_LEN};

/// A strictly ascending set of naturals in blocked delta + varint form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackedNats {
    len: u32,
    /// Absolute first value of every block.
    heads: Vec<u32>,
    /// Byte offset in `deltas` where each block's delta stream starts.
    block_starts: Vec<u32>,
    /// Varint-encoded gaps, excluding block heads.
    deltas: Vec<u8>,
    last: Option<u32>,
}

/// Encode a strictly ascending slice of naturals in sparse form.
///
/// # Panics
///
/// Panics if `values` is not strictly ascending.
pub fn pack_sorted_nats(values: &[u32]) -> PackedNats {
    let mut packed = PackedNats::default();
    for &value in values {
        packed.push(value);
    }
    packed
}

impl PackedNats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a value larger than every value already present.
    ///
    /// # Panics
    ///
    /// Panics if `value` does not exceed the current last value.
    pub fn push(&mut self, value: u32) {
        if self.len as usize % SPARSE_BLOCK_LEN == 0 {
            if let Some(last) = self.last {
                assert!(
                    value > last,
                    "packed naturals must be strictly ascending: {} after {}",
                    value,
                    last
                );
            }
            self.heads.push(value);
            self.block_starts.push(self.deltas.len() as u32);
        } else {
            let last = self.last.unwrap_or_default();
            assert!(
                value > last,
                "packed naturals must be strictly ascending: {} after {}",
                value,
                last
            );
            encode_varint(u64::from(value - last), &mut self.deltas);
        }
        self.last = Some(value);
        self.len += 1;
    }

    pub fn len(&self) -> usize {
        self.len as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Largest value in the set.
    pub fn last(&self) -> Option<u32> {
        self.last
    }

    /// Encoded payload size in bytes (heads, block starts and deltas).
    pub fn byte_len(&self) -> usize {
        self.heads.len() * 8 + self.deltas.len()
    }

    pub fn iter(&self) -> NatsIter<'_> {
        NatsIter {
            packed: self,
            index: 0,
            end: self.len,
            pos: 0,
            current: 0,
        }
    }

    /// Decode to a plain ascending vector.
    pub fn unpack(&self) -> Vec<u32> {
        self.iter().collect()
    }

    fn block_iter(&self, block: usize) -> NatsIter<'_> {
        let start = (block * SPARSE_BLOCK_LEN) as u32;
        let end = ((block + 1) * SPARSE_BLOCK_LEN).min(self.len as usize) as u32;
        NatsIter {
            packed: self,
            index: start,
            end,
            pos: 0,
            current: 0,
        }
    }

    /// Whether any member lies in `[start, end]`, decoding at most one block.
    pub fn contains_in_range(&self, start: u32, end: u32) -> bool {
        if start > end || self.is_empty() {
            return false;
        }
        // Blocks before `candidate` begin at or before `end`.
        let candidate = self.heads.partition_point(|&head| head <= end);
        if candidate == 0 {
            return false;
        }
        let block = candidate - 1;
        if self.heads[block] >= start {
            return true;
        }
        self.block_iter(block)
            .find(|&value| value >= start)
            .is_some_and(|value| value <= end)
    }

    /// Whether `value` is a member.
    pub fn contains(&self, value: u32) -> bool {
        self.contains_in_range(value, value)
    }

    // ========================================================================
    // SERIALIZATION
    // ========================================================================

    /// Serialize to a self-describing byte stream.
    ///
    /// Corpus artifacts do not include posting lists; this is the byte form
    /// handed to whatever container stores the index.
    ///
    /// Format:
    /// - len: varint
    /// - For each block: head (varint), delta_bytes (varint)
    /// - deltas: raw varint bytes of all blocks
    pub fn encode(&self, buf: &mut Vec<u8>) {
        encode_varint(u64::from(self.len), buf);
        for block in 0..self.heads.len() {
            let block_end = self
                .block_starts
                .get(block + 1)
                .copied()
                .unwrap_or(self.deltas.len() as u32);
            encode_varint(u64::from(self.heads[block]), buf);
            encode_varint(u64::from(block_end - self.block_starts[block]), buf);
        }
        buf.extend_from_slice(&self.deltas);
    }

    /// Deserialize from bytes produced by [`PackedNats::encode`], returning
    /// (value, bytes_consumed).
    ///
    /// Every delta is validated here, so iteration over the result never
    /// encounters corruption.
    pub fn decode(bytes: &[u8]) -> io::Result<(Self, usize)> {
        let (len, mut pos) = decode_varint_u32(bytes)?;
        let num_blocks = (len as usize).div_ceil(SPARSE_BLOCK_LEN);
        if num_blocks > bytes.len().saturating_sub(pos) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Block count {} exceeds available bytes", num_blocks),
            ));
        }

        let mut heads = Vec::with_capacity(num_blocks);
        let mut block_starts = Vec::with_capacity(num_blocks);
        let mut total_delta_bytes = 0u32;
        for _ in 0..num_blocks {
            let (head, consumed) = decode_varint_u32(bytes.get(pos..).unwrap_or_default())?;
            pos += consumed;
            let (block_bytes, consumed) =
                decode_varint_u32(bytes.get(pos..).unwrap_or_default())?;
            pos += consumed;
            heads.push(head);
            block_starts.push(total_delta_bytes);
            total_delta_bytes = total_delta_bytes.checked_add(block_bytes).ok_or_else(|| {
                io::Error::new(io::ErrorKind::InvalidData, "Delta byte length overflow")
            })?;
        }

        let deltas_end = pos + total_delta_bytes as usize;
        let deltas = bytes
            .get(pos..deltas_end)
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "Truncated delta stream"))?
            .to_vec();

        let mut last = None;
        for block in 0..num_blocks {
            let count = (len as usize - block * SPARSE_BLOCK_LEN).min(SPARSE_BLOCK_LEN);
            let block_end = block_starts
                .get(block + 1)
                .copied()
                .unwrap_or(total_delta_bytes) as usize;
            let mut cursor = block_starts[block] as usize;
            let mut value = heads[block];
            if last.is_some_and(|previous| value <= previous) {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("Block {} head {} is not ascending", block, value),
                ));
            }
            for _ in 1..count {
                let (delta, consumed) =
                    decode_varint_u32(deltas.get(cursor..block_end).unwrap_or_default())?;
                cursor += consumed;
                if delta == 0 {
                    return Err(io::Error::new(io::ErrorKind::InvalidData, "Zero delta"));
                }
                value = value.checked_add(delta).ok_or_else(|| {
                    io::Error::new(io::ErrorKind::InvalidData, "Delta overflows u32")
                })?;
            }
            if cursor != block_end {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("Block {} has {} trailing bytes", block, block_end - cursor),
                ));
            }
            last = Some(value);
        }

        Ok((
            PackedNats {
                len,
                heads,
                block_starts,
                deltas,
                last,
            },
            deltas_end,
        ))
    }
}

impl FromIterator<u32> for PackedNats {
    fn from_iter<I: IntoIterator<Item = u32>>(iter: I) -> Self {
        let mut packed = PackedNats::new();
        for value in iter {
            packed.push(value);
        }
        packed
    }
}

impl<'a> IntoIterator for &'a PackedNats {
    type Item = u32;
    type IntoIter = NatsIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Streaming decoder over a [`PackedNats`].
#[derive(Debug, Clone)]
pub struct NatsIter<'a> {
    packed: &'a PackedNats,
    index: u32,
    end: u32,
    pos: usize,
    current: u32,
}

impl Iterator for NatsIter<'_> {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        if self.index >= self.end {
            return None;
        }
        let index = self.index as usize;
        let value = if index % SPARSE_BLOCK_LEN == 0 {
            let block = index / SPARSE_BLOCK_LEN;
            self.pos = self.packed.block_starts[block] as usize;
            self.packed.heads[block]
        } else {
            let (delta, consumed) = decode_varint_u32(&self.packed.deltas[self.pos..])
                .unwrap_or_else(|e| panic!("corrupted sparse posting list: {}", e));
            self.pos += consumed;
            self.current + delta
        };
        self.current = value;
        self.index += 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.end - self.index) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for NatsIter<'_> {}
