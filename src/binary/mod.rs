// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Byte-level building blocks for packed posting lists and corpus artifacts.
//!
//! Two kinds of data leave this crate as raw bytes:
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │ SPARSE POSTINGS (in memory)                                │
//! │   per block: absolute head + varint deltas                 │
//! ├────────────────────────────────────────────────────────────┤
//! │ INFLECTIONS_RAW    [u32 LE]  word 0 = NO_INFLECTION        │
//! │ INFLECTION_OFFSETS [u32 LE]  (offset << 8) | length        │
//! │ TOKEN_STARTS       [u32 LE]  token_start, break_start      │
//! │ RAW_TEXT           UTF-8     token, break, token, break... │
//! └────────────────────────────────────────────────────────────┘
//! ```

pub mod encoding;
pub mod header;

pub use encoding::{decode_u32_le, decode_varint, decode_varint_u32, encode_u32_le, encode_varint};
pub use header::*;
