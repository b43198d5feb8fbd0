// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Binary encoding primitives: varint and little-endian word streams.
//!
//! Varint carries the delta stream of sparse posting lists, where almost every
//! gap between consecutive tokens fits in one or two bytes. The little-endian
//! word helpers produce the fixed-width artifacts (inflection buffer, offsets
//! table, token starts) that readers on any platform can map directly.
//!
//! # References
//!
//! - **Varint (LEB128)**: Little-endian base-128 variable-length integer encoding.
//!   See: DWARF4 specification §7.6 "Variable Length Data", and
//!   Google Protocol Buffers encoding: <https://protobuf.dev/programming-guides/encoding/>

use std::io;

use super::header::MAX_VARINT_BYTES;

// ============================================================================
// VARINT ENCODING
// ============================================================================

/// Append `value` as LEB128: seven bits per byte, low bits first, high bit
/// set on every byte but the last.
pub fn encode_varint(mut value: u64, buf: &mut Vec<u8>) {
    while value >= 0x80 {
        buf.push((value as u8 & 0x7F) | 0x80);
        value >>= 7;
    }
    buf.push(value as u8);
}

/// Decode one varint from the front of `bytes`, returning
/// `(value, bytes_consumed)`.
///
/// Fails on an empty or truncated buffer, and on a run longer than
/// `MAX_VARINT_BYTES` (which can only come from corruption).
pub fn decode_varint(bytes: &[u8]) -> io::Result<(u64, usize)> {
    let mut value = 0u64;
    for (i, &byte) in bytes.iter().take(MAX_VARINT_BYTES).enumerate() {
        value |= u64::from(byte & 0x7F) << (7 * i);
        if byte & 0x80 == 0 {
            return Ok((value, i + 1));
        }
    }
    if bytes.len() >= MAX_VARINT_BYTES {
        Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "Varint exceeds maximum length (possible corruption)",
        ))
    } else {
        Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "Incomplete varint",
        ))
    }
}

/// Decode a varint that must fit in a `u32`.
pub fn decode_varint_u32(bytes: &[u8]) -> io::Result<(u32, usize)> {
    let (value, consumed) = decode_varint(bytes)?;
    let value = u32::try_from(value).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("Varint {} does not fit in u32", value),
        )
    })?;
    Ok((value, consumed))
}

// ============================================================================
// LITTLE-ENDIAN WORD STREAMS
// ============================================================================

/// Encode 32-bit words as little-endian bytes.
pub fn encode_u32_le(words: &[u32]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(words.len() * 4);
    for word in words {
        bytes.extend_from_slice(&word.to_le_bytes());
    }
    bytes
}

/// Decode little-endian bytes into 32-bit words.
pub fn decode_u32_le(bytes: &[u8]) -> io::Result<Vec<u32>> {
    if bytes.len() % 4 != 0 {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("Word stream length {} is not a multiple of 4", bytes.len()),
        ));
    }
    Ok(bytes
        .chunks_exact(4)
        .map(|chunk| u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect())
}
