// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Corpus construction.
//!
//! One sequential pass over the works assigns every word token a corpus-wide
//! index and appends that index to each posting list its analyses imply:
//!
//! ```text
//! work → row → (chunk, is_word)
//!                  │
//!                  ├─ break chunk ─→ appended to previous token's break text
//!                  │                 ('.' marks previous token as hard break)
//!                  └─ word chunk ──→ normalize → InflectionStore::ingest
//!                                      │
//!                                      ├─ word[normalized]  += t
//!                                      ├─ lemma[l]          += t   per lemma
//!                                      └─ case/number/...   += t   per record
//! ```
//!
//! Indices are assigned in increasing order, so every posting list is built
//! already sorted; packing at the end just picks an encoding per list.

pub mod parallel;
pub mod sections;
pub mod tokenize;
pub mod work;

use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::time::Instant;

#[cfg(feature = "parallel")]
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use tracing::{debug, info};

use crate::analyzer::{AnalysisTable, Analyzer};
use crate::binary::DEFAULT_DENSE_RATIO;
use crate::corpus::{
    AuthorEntry, Corpus, CorpusStats, Dimension, RawText, RowRange, WorkEntry, HARD_BREAK,
};
use crate::error::{CorpusError, Result};
use crate::inflection::{
    expand_inflection_data, Case, Gender, GrammaticalValue, InflectionStore, Mood, Number, Person,
    Tense, Voice, WordInflectionData,
};
use crate::packed::PackedIndex;
use crate::utils::normalize;

pub use parallel::*;
pub use sections::*;
pub use tokenize::*;
pub use work::*;

/// Knobs for packing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildOptions {
    /// A posting list is stored dense when `len * dense_ratio > num_tokens`.
    pub dense_ratio: u32,
}

impl Default for BuildOptions {
    fn default() -> Self {
        BuildOptions {
            dense_ratio: DEFAULT_DENSE_RATIO,
        }
    }
}

/// Posting lists for a small, fixed value domain, indexed by enum code.
#[derive(Debug)]
struct CodePostings {
    lists: Vec<Vec<u32>>,
}

impl CodePostings {
    fn with_codes(max_code: u32) -> Self {
        CodePostings {
            lists: vec![Vec::new(); max_code as usize + 1],
        }
    }

    fn add(&mut self, code: u32, token: u32) {
        if let Some(list) = self.lists.get_mut(code as usize) {
            push_unique(list, token);
        }
    }

    fn into_keyed(self, key_of: impl Fn(u32) -> Option<&'static str>) -> HashMap<String, Vec<u32>> {
        self.lists
            .into_iter()
            .enumerate()
            .filter(|(_, list)| !list.is_empty())
            .filter_map(|(code, list)| key_of(code as u32).map(|key| (key.to_string(), list)))
            .collect()
    }
}

fn max_code<T: GrammaticalValue>(all: &[T]) -> u32 {
    all.iter().map(|value| value.code()).max().unwrap_or(0)
}

/// Appends `token` unless it is already the last entry. Tokens arrive in
/// non-decreasing order, so this keeps lists strictly ascending.
#[inline]
fn push_unique(list: &mut Vec<u32>, token: u32) {
    if list.last() != Some(&token) {
        list.push(token);
    }
}

#[derive(Debug)]
struct GrammarPostings {
    case: CodePostings,
    number: CodePostings,
    gender: CodePostings,
    tense: CodePostings,
    person: CodePostings,
    mood: CodePostings,
    voice: CodePostings,
}

impl GrammarPostings {
    fn new() -> Self {
        GrammarPostings {
            case: CodePostings::with_codes(max_code(Case::ALL)),
            number: CodePostings::with_codes(max_code(Number::ALL)),
            gender: CodePostings::with_codes(max_code(Gender::ALL)),
            tense: CodePostings::with_codes(max_code(Tense::ALL)),
            person: CodePostings::with_codes(max_code(Person::ALL)),
            mood: CodePostings::with_codes(max_code(Mood::ALL)),
            voice: CodePostings::with_codes(max_code(Voice::ALL)),
        }
    }

    fn add_record(&mut self, record: WordInflectionData, token: u32) {
        let expanded = expand_inflection_data(record);
        for case in expanded.cases {
            self.case.add(case.code(), token);
        }
        for gender in expanded.genders {
            self.gender.add(gender.code(), token);
        }
        if let Some(number) = expanded.number {
            self.number.add(number.code(), token);
        }
        if let Some(tense) = expanded.tense {
            self.tense.add(tense.code(), token);
        }
        if let Some(person) = expanded.person {
            self.person.add(person.code(), token);
        }
        if let Some(mood) = expanded.mood {
            self.mood.add(mood.code(), token);
        }
        if let Some(voice) = expanded.voice {
            self.voice.add(voice.code(), token);
        }
    }

    fn into_dimensions(self) -> Vec<(Dimension, HashMap<String, Vec<u32>>)> {
        vec![
            (Dimension::Case, self.case.into_keyed(|c| Case::from_code(c).map(Case::key))),
            (Dimension::Number, self.number.into_keyed(|c| Number::from_code(c).map(Number::key))),
            (Dimension::Gender, self.gender.into_keyed(|c| Gender::from_code(c).map(Gender::key))),
            (Dimension::Tense, self.tense.into_keyed(|c| Tense::from_code(c).map(Tense::key))),
            (Dimension::Person, self.person.into_keyed(|c| Person::from_code(c).map(Person::key))),
            (Dimension::Mood, self.mood.into_keyed(|c| Mood::from_code(c).map(Mood::key))),
            (Dimension::Voice, self.voice.into_keyed(|c| Voice::from_code(c).map(Voice::key))),
        ]
    }
}

/// Streaming corpus builder.
///
/// Feed works in order with [`absorb_work`](Self::absorb_work), then call
/// [`finish`](Self::finish). Any error is fatal; the builder must not be
/// reused after one.
pub struct CorpusBuilder<A, T = BreakCharTokenizer> {
    analyzer: A,
    tokenizer: T,
    options: BuildOptions,
    inflections: InflectionStore,
    /// Original spelling per token.
    tokens: Vec<String>,
    /// Break text following each token.
    breaks: Vec<String>,
    words: HashMap<String, Vec<u32>>,
    lemmata: HashMap<String, Vec<u32>>,
    hard_breaks: Vec<u32>,
    grammar: GrammarPostings,
    works: Vec<WorkEntry>,
    authors: BTreeMap<String, AuthorEntry>,
}

impl<A: Analyzer> CorpusBuilder<A, BreakCharTokenizer> {
    pub fn new(analyzer: A) -> Self {
        Self::with_tokenizer(analyzer, BreakCharTokenizer::default())
    }
}

impl<A: Analyzer, T: Tokenizer> CorpusBuilder<A, T> {
    pub fn with_tokenizer(analyzer: A, tokenizer: T) -> Self {
        CorpusBuilder {
            analyzer,
            tokenizer,
            options: BuildOptions::default(),
            inflections: InflectionStore::new(),
            tokens: Vec::new(),
            breaks: Vec::new(),
            words: HashMap::new(),
            lemmata: HashMap::new(),
            hard_breaks: Vec::new(),
            grammar: GrammarPostings::new(),
            works: Vec::new(),
            authors: BTreeMap::new(),
        }
    }

    pub fn options(mut self, options: BuildOptions) -> Self {
        self.options = options;
        self
    }

    /// Number of word tokens absorbed so far.
    pub fn num_tokens(&self) -> usize {
        self.tokens.len()
    }

    /// Ingest one work, appending its tokens after everything absorbed so far.
    pub fn absorb_work(&mut self, work: &CorpusInputWork) -> Result<()> {
        info!(id = %work.id, name = %work.work_name, author = %work.author, "ingesting work");

        if work.rows.len() != work.row_ids.len() {
            return Err(CorpusError::RowIdMismatch {
                work: work.id.clone(),
                rows: work.rows.len(),
                row_ids: work.row_ids.len(),
            });
        }
        if work.rows.is_empty() {
            return Err(CorpusError::EmptyWork {
                work: work.id.clone(),
            });
        }
        let work_index = self.works.len();
        self.check_author_contiguity(work, work_index)?;

        let work_start = self.tokens.len();
        let mut rows = Vec::with_capacity(work.rows.len());

        for (row_index, row_text) in work.rows.iter().enumerate() {
            let row_id = &work.row_ids[row_index];
            let kind = if row_index == 0 {
                validate_section_id(row_id).map(|()| None)
            } else {
                classify_row_break(&work.row_ids[row_index - 1], row_id).map(Some)
            };
            let kind = kind.map_err(|_| CorpusError::MalformedSectionId {
                work: work.id.clone(),
                previous: row_index
                    .checked_sub(1)
                    .map(|previous| section_label(&work.row_ids[previous]))
                    .unwrap_or_default(),
                id: section_label(row_id),
            })?;

            // Breaks only attach to tokens of this work; the previous work
            // already ended on a hard break.
            if self.tokens.len() > work_start {
                match kind {
                    Some(BreakKind::Hard) => self.mark_hard_break(),
                    Some(BreakKind::Soft) => {
                        if let Some(last) = self.breaks.last_mut() {
                            last.push('\n');
                        }
                    }
                    None => {}
                }
            }

            let row_start = self.tokens.len();
            for (chunk, is_word) in self.tokenizer.tokenize(row_text) {
                if is_word {
                    self.absorb_word(chunk)?;
                    continue;
                }
                if let Some(last) = self.breaks.last_mut() {
                    last.push_str(chunk);
                }
                if chunk.contains('.') {
                    self.mark_hard_break();
                }
            }
            rows.push(RowRange {
                section_id: section_label(row_id),
                start: row_start as u32,
                end: self.tokens.len() as u32,
            });
        }

        let work_end = self.tokens.len();
        if work_end == work_start {
            return Err(CorpusError::EmptyWork {
                work: work.id.clone(),
            });
        }
        self.mark_hard_break();

        if let Some(author) = self.authors.get_mut(&work.author_code) {
            author.end = work_end as u32;
        }
        debug!(id = %work.id, tokens = work_end - work_start, rows = rows.len(), "absorbed work");
        self.works.push(WorkEntry {
            id: work.id.clone(),
            name: work.work_name.clone(),
            author: work.author.clone(),
            author_code: work.author_code.clone(),
            start: work_start as u32,
            end: work_end as u32,
            rows,
        });
        Ok(())
    }

    /// An author's works must arrive back to back.
    fn check_author_contiguity(&mut self, work: &CorpusInputWork, work_index: usize) -> Result<()> {
        let start = self.tokens.len() as u32;
        match self.authors.get_mut(&work.author_code) {
            Some(author) if author.last_work + 1 == work_index => {
                author.last_work = work_index;
                Ok(())
            }
            Some(_) => Err(CorpusError::NonContiguousAuthor {
                author: work.author_code.clone(),
                work: work.id.clone(),
            }),
            None => {
                self.authors.insert(
                    work.author_code.clone(),
                    AuthorEntry {
                        name: work.author.clone(),
                        first_work: work_index,
                        last_work: work_index,
                        start,
                        end: start,
                    },
                );
                Ok(())
            }
        }
    }

    fn absorb_word(&mut self, token: &str) -> Result<()> {
        if self.tokens.len() >= u32::MAX as usize {
            return Err(CorpusError::TokenCountOverflow {
                max: u64::from(u32::MAX),
            });
        }
        let index = self.tokens.len() as u32;
        let normalized = normalize(token);

        let slot = self.inflections.ingest(&normalized, &self.analyzer)?;
        for lemma in self.inflections.lemmata(&normalized) {
            match self.lemmata.get_mut(lemma) {
                Some(list) => push_unique(list, index),
                None => {
                    self.lemmata.insert(lemma.clone(), vec![index]);
                }
            }
        }
        for &record in self.inflections.records(slot) {
            self.grammar.add_record(record, index);
        }
        self.words.entry(normalized).or_default().push(index);

        self.tokens.push(token.to_string());
        self.breaks.push(String::new());
        Ok(())
    }

    fn mark_hard_break(&mut self) {
        if let Some(last) = self.tokens.len().checked_sub(1) {
            push_unique(&mut self.hard_breaks, last as u32);
        }
    }

    /// Pack every posting list and assemble the finished corpus.
    pub fn finish(self) -> Result<Corpus> {
        let num_tokens = self.tokens.len() as u32;
        let ratio = self.options.dense_ratio;
        let raw = assemble_raw_text(&self.tokens, &self.breaks)?;

        let stats = CorpusStats {
            total_words: num_tokens,
            total_works: self.works.len() as u32,
            unique_words: self.words.len() as u32,
            unique_lemmata: self.lemmata.len() as u32,
        };

        let mut indices = BTreeMap::new();
        indices.insert(Dimension::Word, pack_postings(self.words, num_tokens, ratio));
        indices.insert(Dimension::Lemma, pack_postings(self.lemmata, num_tokens, ratio));
        let mut breaks = BTreeMap::new();
        breaks.insert(
            HARD_BREAK.to_string(),
            PackedIndex::dense(&self.hard_breaks, num_tokens),
        );
        indices.insert(Dimension::Breaks, breaks);
        for (dimension, postings) in self.grammar.into_dimensions() {
            indices.insert(dimension, pack_postings(postings, num_tokens, ratio));
        }

        for (dimension, lists) in &indices {
            debug!(
                dimension = %dimension,
                keys = lists.len(),
                dense = lists.values().filter(|list| list.is_dense()).count(),
                "packed dimension"
            );
        }
        info!(
            tokens = stats.total_words,
            works = stats.total_works,
            words = stats.unique_words,
            lemmata = stats.unique_lemmata,
            "corpus complete"
        );

        Ok(Corpus {
            num_tokens,
            indices,
            works: self.works,
            authors: self.authors,
            raw,
            inflections: self.inflections,
            stats,
        })
    }
}

/// Interleave tokens and breaks into one string, recording byte offsets.
fn assemble_raw_text(tokens: &[String], breaks: &[String]) -> Result<RawText> {
    let mut raw = RawText {
        text: String::new(),
        token_starts: Vec::with_capacity(tokens.len()),
        break_starts: Vec::with_capacity(tokens.len()),
    };
    let offset = |text: &String| {
        u32::try_from(text.len()).map_err(|_| CorpusError::RawTextOverflow { bytes: text.len() })
    };
    for (token, brk) in tokens.iter().zip(breaks) {
        raw.token_starts.push(offset(&raw.text)?);
        raw.text.push_str(token);
        raw.break_starts.push(offset(&raw.text)?);
        raw.text.push_str(brk);
    }
    offset(&raw.text)?;
    Ok(raw)
}

/// Build a corpus from in-memory works.
pub fn build_corpus<'a, A, I>(works: I, analyzer: A, options: BuildOptions) -> Result<Corpus>
where
    A: Analyzer,
    I: IntoIterator<Item = &'a CorpusInputWork>,
{
    let mut builder = CorpusBuilder::new(analyzer).options(options);
    for work in works {
        builder.absorb_work(work)?;
    }
    builder.finish()
}

/// Create a progress style for the main progress bars
#[cfg(feature = "parallel")]
fn create_progress_style() -> ProgressStyle {
    ProgressStyle::with_template(
        "{spinner:.cyan} {prefix:<12} [{bar:40.cyan/dim}] {pos}/{len} {msg}",
    )
    .unwrap_or_else(|_| ProgressStyle::default_bar())
    .progress_chars("━━╸")
}

/// Build a corpus from a manifest on disk and write its artifacts.
pub fn run_build(manifest_path: &Path, output_dir: &Path, options: BuildOptions) -> Result<Corpus> {
    let started = Instant::now();
    let base = manifest_path.parent().unwrap_or_else(|| Path::new("."));

    #[cfg(feature = "parallel")]
    let multi = MultiProgress::new();

    // 1. Read manifest and analyses
    let manifest = InputManifest::from_file(manifest_path)?;
    let table = AnalysisTable::from_file(&manifest.analyses_path(base))?;
    let paths = manifest.work_paths(base);

    // 2. Load works in parallel
    #[cfg(feature = "parallel")]
    let works = {
        let load_pb = multi.add(ProgressBar::new(paths.len() as u64));
        load_pb.set_style(create_progress_style());
        load_pb.set_prefix("Loading");
        load_pb.set_message("works...");
        let works = load_works_with_progress(&paths, &load_pb)?;
        load_pb.finish_with_message(format!("loaded {} works", works.len()));
        works
    };
    #[cfg(not(feature = "parallel"))]
    let works = load_works(&paths)?;

    // 3. Token pass, in manifest order
    #[cfg(feature = "parallel")]
    let index_pb = {
        let pb = multi.add(ProgressBar::new(works.len() as u64));
        pb.set_style(create_progress_style());
        pb.set_prefix("Indexing");
        pb
    };

    let mut builder = CorpusBuilder::new(table).options(options);
    for work in &works {
        #[cfg(feature = "parallel")]
        index_pb.set_message(work.id.clone());
        builder.absorb_work(work)?;
        #[cfg(feature = "parallel")]
        index_pb.inc(1);
    }

    #[cfg(feature = "parallel")]
    index_pb.finish_with_message(format!("{} tokens", builder.num_tokens()));

    // 4. Pack and write
    let corpus = builder.finish()?;
    corpus.write_artifacts(output_dir)?;

    let stats = corpus.stats();
    eprintln!();
    eprintln!("✅ Build complete");
    eprintln!(
        "   {} works │ {} tokens │ {} words │ {} lemmata │ {}ms",
        stats.total_works,
        stats.total_words,
        stats.unique_words,
        stats.unique_lemmata,
        started.elapsed().as_millis()
    );

    Ok(corpus)
}
