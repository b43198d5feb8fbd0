// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The morphological analyzer seam.
//!
//! The builder never decides what a word form means; it asks an [`Analyzer`]
//! for candidate analyses of each normalized word. Any `Fn(&str) ->
//! Vec<Analysis>` closure is an analyzer, which keeps tests small. For real
//! builds the caller loads an [`AnalysisTable`] once and hands it to the
//! builder.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::Result;
use crate::inflection::Analysis;

pub trait Analyzer {
    /// Candidate analyses for a normalized word. Unknown words yield an
    /// empty list.
    fn analyze(&self, word: &str) -> Vec<Analysis>;
}

impl<F> Analyzer for F
where
    F: Fn(&str) -> Vec<Analysis>,
{
    fn analyze(&self, word: &str) -> Vec<Analysis> {
        self(word)
    }
}

/// Precomputed analyses keyed by normalized word.
///
/// ```json
/// {
///   "gallia": [{"lemma": "Gallia", "case": "nominative", "number": "singular"}],
///   "est": [{"lemma": "sum", "tense": "present", "mood": "indicative", "person": "third"}]
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnalysisTable {
    entries: HashMap<String, Vec<Analysis>>,
}

impl AnalysisTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let table = Self::from_json(&fs::read_to_string(path)?)?;
        info!(path = %path.display(), words = table.len(), "loaded analysis table");
        Ok(table)
    }

    pub fn insert(&mut self, word: impl Into<String>, analyses: Vec<Analysis>) {
        self.entries.insert(word.into(), analyses);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Analyzer for AnalysisTable {
    fn analyze(&self, word: &str) -> Vec<Analysis> {
        self.entries.get(word).cloned().unwrap_or_default()
    }
}
