// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The finished, immutable corpus.
//!
//! A [`Corpus`] is produced once by [`CorpusBuilder`](crate::CorpusBuilder)
//! and never changes afterwards, so it can be shared read-only between any
//! number of concurrent queries.
//!
//! # Layout
//!
//! ```text
//! indices:   dimension → value → PackedIndex      (word, lemma, case, ...)
//! works:     [WorkEntry { rows: [RowRange] }]     ascending token ranges
//! raw text:  token₀ break₀ token₁ break₁ ...      one UTF-8 string
//! starts:    token_starts[t], break_starts[t]     byte offsets into raw text
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::Serialize;
use tracing::info;

use crate::binary::{encode_u32_le, RAW_TEXT_FILE, STATS_FILE, TOKEN_STARTS_FILE};
use crate::error::Result;
use crate::inflection::{InflectionStore, WordInflectionData};
use crate::packed::PackedIndex;

/// A named axis of posting lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Word,
    Lemma,
    Breaks,
    Case,
    Number,
    Gender,
    Tense,
    Person,
    Mood,
    Voice,
}

impl Dimension {
    pub const ALL: [Dimension; 10] = [
        Dimension::Word,
        Dimension::Lemma,
        Dimension::Breaks,
        Dimension::Case,
        Dimension::Number,
        Dimension::Gender,
        Dimension::Tense,
        Dimension::Person,
        Dimension::Mood,
        Dimension::Voice,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Dimension::Word => "word",
            Dimension::Lemma => "lemma",
            Dimension::Breaks => "breaks",
            Dimension::Case => "case",
            Dimension::Number => "number",
            Dimension::Gender => "gender",
            Dimension::Tense => "tense",
            Dimension::Person => "person",
            Dimension::Mood => "mood",
            Dimension::Voice => "voice",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Dimension {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Dimension::ALL
            .into_iter()
            .find(|dimension| dimension.name() == s)
            .ok_or_else(|| format!("Unknown dimension '{}'", s))
    }
}

/// Key of the hard-break posting list in [`Dimension::Breaks`].
pub const HARD_BREAK: &str = "hard";

/// Tokens `[start, end)` belonging to one row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RowRange {
    pub section_id: String,
    pub start: u32,
    pub end: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkEntry {
    pub id: String,
    pub name: String,
    pub author: String,
    pub author_code: String,
    /// First token of the work.
    pub start: u32,
    /// One past the last token of the work.
    pub end: u32,
    pub rows: Vec<RowRange>,
}

/// Works `[first_work, last_work]` and tokens `[start, end)` of one author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorEntry {
    pub name: String,
    pub first_work: usize,
    pub last_work: usize,
    pub start: u32,
    pub end: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CorpusStats {
    pub total_words: u32,
    pub total_works: u32,
    pub unique_words: u32,
    pub unique_lemmata: u32,
}

/// Where a token sits in the corpus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenLocation<'a> {
    pub work_index: usize,
    pub work: &'a WorkEntry,
    pub row: &'a RowRange,
    /// Position of the token within its row.
    pub offset_in_row: u32,
}

/// Corpus-wide UTF-8 text with per-token byte offsets.
#[derive(Debug, Clone, Default)]
pub struct RawText {
    pub text: String,
    pub token_starts: Vec<u32>,
    pub break_starts: Vec<u32>,
}

#[derive(Debug)]
pub struct Corpus {
    pub(crate) num_tokens: u32,
    pub(crate) indices: BTreeMap<Dimension, BTreeMap<String, PackedIndex>>,
    pub(crate) works: Vec<WorkEntry>,
    pub(crate) authors: BTreeMap<String, AuthorEntry>,
    pub(crate) raw: RawText,
    pub(crate) inflections: InflectionStore,
    pub(crate) stats: CorpusStats,
}

/// Contents of `corpus_stats.json`.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CorpusSummary<'a> {
    num_tokens: u32,
    stats: &'a CorpusStats,
    works: &'a [WorkEntry],
    authors: &'a BTreeMap<String, AuthorEntry>,
    dimensions: BTreeMap<Dimension, DimensionSummary>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DimensionSummary {
    keys: usize,
    dense: usize,
    bytes: usize,
}

impl Corpus {
    pub fn num_tokens(&self) -> u32 {
        self.num_tokens
    }

    pub fn stats(&self) -> &CorpusStats {
        &self.stats
    }

    /// Posting list for `key` in `dimension`. Absent means empty.
    pub fn index(&self, dimension: Dimension, key: &str) -> Option<&PackedIndex> {
        self.indices.get(&dimension)?.get(key)
    }

    /// All posting lists of a dimension, ordered by key.
    pub fn dimension(&self, dimension: Dimension) -> impl Iterator<Item = (&str, &PackedIndex)> {
        self.indices
            .get(&dimension)
            .into_iter()
            .flat_map(|lists| lists.iter().map(|(key, list)| (key.as_str(), list)))
    }

    pub fn works(&self) -> &[WorkEntry] {
        &self.works
    }

    pub fn work(&self, id: &str) -> Option<&WorkEntry> {
        self.works.iter().find(|work| work.id == id)
    }

    pub fn authors(&self) -> &BTreeMap<String, AuthorEntry> {
        &self.authors
    }

    pub fn author(&self, code: &str) -> Option<&AuthorEntry> {
        self.authors.get(code)
    }

    pub fn raw_text(&self) -> &RawText {
        &self.raw
    }

    /// Original spelling of token `t`.
    pub fn token_text(&self, t: u32) -> Option<&str> {
        let t = t as usize;
        let start = *self.raw.token_starts.get(t)? as usize;
        let end = *self.raw.break_starts.get(t)? as usize;
        self.raw.text.get(start..end)
    }

    /// Punctuation and whitespace following token `t`.
    pub fn break_text(&self, t: u32) -> Option<&str> {
        let t = t as usize;
        let start = *self.raw.break_starts.get(t)? as usize;
        let end = self
            .raw
            .token_starts
            .get(t + 1)
            .map_or(self.raw.text.len(), |&next| next as usize);
        self.raw.text.get(start..end)
    }

    pub fn inflections(&self) -> &InflectionStore {
        &self.inflections
    }

    /// Packed analyses of token `t`.
    pub fn token_inflections(&self, t: u32) -> Option<&[WordInflectionData]> {
        self.inflections.token_records(t as usize)
    }

    /// Find the work and row containing token `t`.
    pub fn resolve_token(&self, t: u32) -> Option<TokenLocation<'_>> {
        let work_index = self.works.partition_point(|work| work.end <= t);
        let work = self.works.get(work_index)?;
        if work.start > t {
            return None;
        }
        let row_index = work.rows.partition_point(|row| row.end <= t);
        let row = work.rows.get(row_index)?;
        if row.start > t {
            return None;
        }
        Some(TokenLocation {
            work_index,
            work,
            row,
            offset_in_row: t - row.start,
        })
    }

    /// Write raw text, token offsets, inflection tables and a JSON summary.
    pub fn write_artifacts(&self, dir: &Path) -> Result<()> {
        fs::create_dir_all(dir)?;
        fs::write(dir.join(RAW_TEXT_FILE), &self.raw.text)?;

        let interleaved: Vec<u32> = self
            .raw
            .token_starts
            .iter()
            .zip(&self.raw.break_starts)
            .flat_map(|(&token, &brk)| [token, brk])
            .collect();
        fs::write(dir.join(TOKEN_STARTS_FILE), encode_u32_le(&interleaved))?;

        self.inflections.save(dir)?;

        let summary = CorpusSummary {
            num_tokens: self.num_tokens,
            stats: &self.stats,
            works: &self.works,
            authors: &self.authors,
            dimensions: self
                .indices
                .iter()
                .map(|(&dimension, lists)| {
                    let summary = DimensionSummary {
                        keys: lists.len(),
                        dense: lists.values().filter(|list| list.is_dense()).count(),
                        bytes: lists.values().map(PackedIndex::byte_len).sum(),
                    };
                    (dimension, summary)
                })
                .collect(),
        };
        fs::write(dir.join(STATS_FILE), serde_json::to_string_pretty(&summary)?)?;
        info!(dir = %dir.display(), tokens = self.num_tokens, "wrote corpus artifacts");
        Ok(())
    }
}
