// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Per-token inflection storage with one shared entry per distinct word.
//!
//! ```text
//! raw:      [0][a₀ a₁ a₂][b₀][c₀ c₁] ...      (u32 records, word 0 reserved)
//!               ▲          ▲
//! tokens:   (1,3) (4,1) (1,3) (0,0) ...        (offset, length) per token
//! ```
//!
//! Every occurrence of a word points at the same slice of `raw`. Words whose
//! analyses carry no grammatical information at all share the zero-length
//! slot at offset 0.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use tracing::debug;

use super::WordInflectionData;
use crate::analyzer::Analyzer;
use crate::binary::{
    encode_u32_le, INFLECTIONS_RAW_FILE, INFLECTION_LENGTH_BITS, INFLECTION_OFFSETS_FILE,
    MAX_INFLECTION_LENGTH, MAX_INFLECTION_OFFSET, NO_INFLECTION,
};
use crate::error::{CorpusError, Result};

/// Where a word's packed analyses live in the raw buffer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct InflectionSlot {
    pub offset: u32,
    pub len: u32,
}

impl InflectionSlot {
    /// The shared slot for words without grammatical information.
    pub const EMPTY: InflectionSlot = InflectionSlot { offset: 0, len: 0 };

    /// `(offset << 8) | len`, checked against the 24/8-bit split.
    pub fn packed(self) -> Result<u32> {
        if self.offset >= MAX_INFLECTION_OFFSET {
            return Err(CorpusError::InflectionOffsetOverflow {
                offset: self.offset as usize,
            });
        }
        if self.len >= MAX_INFLECTION_LENGTH {
            return Err(CorpusError::InflectionLengthOverflow {
                word: format!("<slot at {}>", self.offset),
                len: self.len as usize,
            });
        }
        Ok((self.offset << INFLECTION_LENGTH_BITS) | self.len)
    }

    pub fn unpack(entry: u32) -> Self {
        InflectionSlot {
            offset: entry >> INFLECTION_LENGTH_BITS,
            len: entry & (MAX_INFLECTION_LENGTH - 1),
        }
    }
}

/// What the store remembers about a distinct normalized word.
#[derive(Debug, Clone, Default)]
pub struct WordEntry {
    /// Sorted, deduplicated lemmata from every analysis.
    pub lemmata: Vec<String>,
    pub slot: InflectionSlot,
}

#[derive(Debug)]
pub struct InflectionStore {
    raw: Vec<WordInflectionData>,
    token_slots: Vec<InflectionSlot>,
    words: HashMap<String, WordEntry>,
}

impl Default for InflectionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InflectionStore {
    pub fn new() -> Self {
        InflectionStore {
            raw: vec![NO_INFLECTION],
            token_slots: Vec::new(),
            words: HashMap::new(),
        }
    }

    /// Record one token of `word`, calling `analyzer` only the first time the
    /// word is seen.
    pub fn ingest<A: Analyzer + ?Sized>(&mut self, word: &str, analyzer: &A) -> Result<InflectionSlot> {
        let slot = match self.words.get(word) {
            Some(entry) => entry.slot,
            None => {
                let entry = self.allocate(word, analyzer)?;
                let slot = entry.slot;
                self.words.insert(word.to_string(), entry);
                slot
            }
        };
        self.token_slots.push(slot);
        Ok(slot)
    }

    fn allocate<A: Analyzer + ?Sized>(&mut self, word: &str, analyzer: &A) -> Result<WordEntry> {
        let analyses = analyzer.analyze(word);

        let mut lemmata: Vec<String> = analyses.iter().map(|a| a.lemma.clone()).collect();
        lemmata.sort_unstable();
        lemmata.dedup();

        let mut records: Vec<WordInflectionData> = analyses.iter().flat_map(|a| a.pack()).collect();
        records.sort_unstable();
        records.dedup();

        if records.is_empty() || records == [NO_INFLECTION] {
            return Ok(WordEntry {
                lemmata,
                slot: InflectionSlot::EMPTY,
            });
        }

        let offset = self.raw.len();
        if offset >= MAX_INFLECTION_OFFSET as usize {
            return Err(CorpusError::InflectionOffsetOverflow { offset });
        }
        if records.len() >= MAX_INFLECTION_LENGTH as usize {
            return Err(CorpusError::InflectionLengthOverflow {
                word: word.to_string(),
                len: records.len(),
            });
        }
        debug!(word, records = records.len(), offset, "allocated inflections");
        let slot = InflectionSlot {
            offset: offset as u32,
            len: records.len() as u32,
        };
        self.raw.extend_from_slice(&records);
        Ok(WordEntry { lemmata, slot })
    }

    /// Entry for a previously ingested word.
    pub fn word(&self, word: &str) -> Option<&WordEntry> {
        self.words.get(word)
    }

    /// Lemmata of a previously ingested word; empty if unknown.
    pub fn lemmata(&self, word: &str) -> &[String] {
        self.words
            .get(word)
            .map_or(&[][..], |entry| entry.lemmata.as_slice())
    }

    pub fn records(&self, slot: InflectionSlot) -> &[WordInflectionData] {
        let start = slot.offset as usize;
        &self.raw[start..start + slot.len as usize]
    }

    /// Records of the token at `token`, if it was ingested.
    pub fn token_records(&self, token: usize) -> Option<&[WordInflectionData]> {
        self.token_slots.get(token).map(|&slot| self.records(slot))
    }

    pub fn raw(&self) -> &[WordInflectionData] {
        &self.raw
    }

    pub fn token_slots(&self) -> &[InflectionSlot] {
        &self.token_slots
    }

    pub fn num_tokens(&self) -> usize {
        self.token_slots.len()
    }

    pub fn num_words(&self) -> usize {
        self.words.len()
    }

    /// Per-token `(offset << 8) | len` table.
    pub fn offsets_table(&self) -> Result<Vec<u32>> {
        self.token_slots.iter().map(|slot| slot.packed()).collect()
    }

    /// Write the raw buffer and offsets table as little-endian u32 files.
    pub fn save(&self, dir: &Path) -> Result<()> {
        let offsets = self.offsets_table()?;
        fs::create_dir_all(dir)?;
        fs::write(dir.join(INFLECTIONS_RAW_FILE), encode_u32_le(&self.raw))?;
        fs::write(dir.join(INFLECTION_OFFSETS_FILE), encode_u32_le(&offsets))?;
        debug!(
            raw_words = self.raw.len(),
            tokens = offsets.len(),
            "saved inflection tables"
        );
        Ok(())
    }
}
