// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Constants shared by the writers and readers of corpus artifacts.
//!
//! The inflection offsets table packs a 24-bit offset and an 8-bit length
//! into every 32-bit entry. Those widths are hard limits of the format: a
//! corpus that needs more has outgrown it, and the build must stop rather
//! than silently truncate.

// ============================================================================
// ARTIFACT FILE NAMES
// ============================================================================

/// Interleaved UTF-8 token and break text.
pub const RAW_TEXT_FILE: &str = "corpus_raw.txt";

/// Little-endian u32 pairs `(token_start, break_start)` per token.
pub const TOKEN_STARTS_FILE: &str = "corpus_token_starts.bin";

/// Flat little-endian u32 buffer of packed grammatical analyses.
pub const INFLECTIONS_RAW_FILE: &str = "corpus_inflections_raw.bin";

/// One little-endian u32 `(offset << 8) | length` per token.
pub const INFLECTION_OFFSETS_FILE: &str = "corpus_inflection_offsets.bin";

/// JSON summary of works, authors and statistics.
pub const STATS_FILE: &str = "corpus_stats.json";

// ============================================================================
// INFLECTION TABLE LIMITS
// ============================================================================

/// Bits reserved for the length in an inflection offsets entry.
pub const INFLECTION_LENGTH_BITS: u32 = 8;

/// Offsets must stay below 2^24.
pub const MAX_INFLECTION_OFFSET: u32 = 1 << 24;

/// Lengths must stay below 2^8.
pub const MAX_INFLECTION_LENGTH: u32 = 1 << INFLECTION_LENGTH_BITS;

/// Reserved word 0 of the inflection buffer ("no inflection").
pub const NO_INFLECTION: u32 = 0;

// ============================================================================
// PACKED INDEX LAYOUT
// ============================================================================

/// Values per block of a sparse posting list. Each block starts with an
/// absolute value so range queries can binary search block heads.
pub const SPARSE_BLOCK_LEN: usize = 64;

/// Bits per dense bitmask word.
pub const WORD_BITS: u32 = 32;

/// A posting list is stored dense when `len * DEFAULT_DENSE_RATIO > num_tokens`.
pub const DEFAULT_DENSE_RATIO: u32 = 32;

/// Maximum varint bytes (u64 needs at most 10 bytes)
pub const MAX_VARINT_BYTES: usize = 10;
