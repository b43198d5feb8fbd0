// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Build failures.
//!
//! Every variant is fatal: a corpus build either completes or stops at the
//! first violation. Structural variants point at bad upstream content;
//! capacity variants mean the corpus has outgrown the artifact format.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CorpusError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Work '{work}' contains no word tokens")]
    EmptyWork { work: String },

    #[error("Work '{work}' has {rows} rows but {row_ids} row ids")]
    RowIdMismatch {
        work: String,
        rows: usize,
        row_ids: usize,
    },

    #[error("Work '{work}' has malformed section id '{id}' (previous '{previous}')")]
    MalformedSectionId {
        work: String,
        previous: String,
        id: String,
    },

    #[error("Works by author '{author}' are not contiguous: '{work}' follows another author")]
    NonContiguousAuthor { author: String, work: String },

    #[error("Inflection offset {offset} does not fit in 24 bits")]
    InflectionOffsetOverflow { offset: usize },

    #[error("Word '{word}' has {len} distinct inflections; at most 255 fit")]
    InflectionLengthOverflow { word: String, len: usize },

    #[error("Corpus exceeds {max} tokens")]
    TokenCountOverflow { max: u64 },

    #[error("Raw text reached {bytes} bytes; offsets must fit in 32 bits")]
    RawTextOverflow { bytes: usize },
}

/// Result type alias for corpus operations
pub type Result<T> = std::result::Result<T, CorpusError>;

impl CorpusError {
    /// Whether the corpus has outgrown the artifact format, as opposed to
    /// containing bad input.
    pub fn is_capacity(&self) -> bool {
        matches!(
            self,
            CorpusError::InflectionOffsetOverflow { .. }
                | CorpusError::InflectionLengthOverflow { .. }
                | CorpusError::TokenCountOverflow { .. }
                | CorpusError::RawTextOverflow { .. }
        )
    }
}
