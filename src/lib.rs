// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Positional inverted index for a Latin text corpus.
//!
//! Every word token in the corpus gets a global index. Posting lists map
//! surface forms, lemmata, grammatical categories and section breaks to the
//! tokens they cover, and a small algebra over those lists answers phrase
//! and proximity queries without decoding them.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     ┌───────────────┐
//! │  build/      │────▶│ inflection/   │
//! │ (tokenize,   │     │ (bitfields,   │
//! │  sections)   │     │  store)       │
//! └──────────────┘     └───────────────┘
//!        │                     │
//!        ▼                     ▼
//! ┌──────────────────────────────────────┐     ┌──────────────────┐
//! │ corpus.rs (Corpus, artifacts)        │────▶│  packed/         │
//! └──────────────────────────────────────┘     │ (PackedNats,     │
//!                                              │  bitmasks, smear)│
//!                                              └──────────────────┘
//!                                                       │
//!                                                       ▼
//!                                              ┌──────────────────┐
//!                                              │  algebra.rs      │
//!                                              │ (AND, OR, within)│
//!                                              └──────────────────┘
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use verbum::{apply_and_to_indices, build_corpus, BuildOptions, Dimension};
//!
//! let corpus = build_corpus(&works, analyzer, BuildOptions::default())?;
//! let gallia = corpus.index(Dimension::Word, "gallia").unwrap();
//! let est = corpus.index(Dimension::Word, "est").unwrap();
//! // "gallia est": gallia at position 0, est at position 1
//! let (phrase, _) = apply_and_to_indices(gallia, 0, est, 1);
//! ```

pub mod algebra;
pub mod analyzer;
pub mod binary;
pub mod build;
pub mod corpus;
pub mod error;
pub mod inflection;
pub mod packed;
pub mod utils;

#[doc(hidden)]
pub mod testing;

pub use algebra::{
    apply_and_to_indices, apply_and_with_arrays, apply_and_with_bitmask_and_array,
    apply_and_with_bitmasks, apply_or_to_indices, apply_or_with_arrays,
    apply_or_with_bitmask_and_array, apply_or_with_bitmasks, apply_within_to_indices,
};
pub use analyzer::{AnalysisTable, Analyzer};
pub use build::{
    build_corpus, run_build, BreakCharTokenizer, BuildOptions, CorpusBuilder, CorpusInputWork,
    InputManifest, Tokenizer,
};
pub use corpus::{
    AuthorEntry, Corpus, CorpusStats, Dimension, RawText, RowRange, TokenLocation, WorkEntry,
    HARD_BREAK,
};
pub use error::{CorpusError, Result};
pub use inflection::{
    expand_inflection_data, Analysis, Case, Degree, ExpandedInflection, Gender, InflectionSlot,
    InflectionStore, Mood, Number, OneOrMany, Person, Tense, Voice, WordInflectionData,
};
pub use packed::{
    has_value_in_range, smear_bitmask, to_bit_mask, unpack_packed_index_data, Direction,
    PackedIndex, PackedNats,
};
pub use utils::normalize;
