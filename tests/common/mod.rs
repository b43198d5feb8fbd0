//! Shared test utilities and fixtures.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use verbum::{build_corpus, BuildOptions, Corpus, CorpusInputWork, Dimension};

pub use verbum::testing::{gallia_analyzer, make_sectioned_work, make_work, sorted_unique};

/// Opening sentence of the Gallic War, one row.
pub const GALLIA: &str = "Gallia est omnis divisa in partes tres.";

/// Build the one-sentence Gallic War corpus.
pub fn gallia_corpus() -> Corpus {
    let work = make_work("caes_bg", "caesar", &[GALLIA]);
    build_corpus([&work], gallia_analyzer, BuildOptions::default()).expect("gallia corpus builds")
}

/// Decoded posting list, empty when the key is absent.
pub fn postings(corpus: &Corpus, dimension: Dimension, key: &str) -> Vec<u32> {
    verbum::unpack_packed_index_data(corpus.index(dimension, key))
}

/// Write works, an analysis table and a manifest into `dir`. Returns the
/// manifest path.
pub fn write_fixture(dir: &Path, works: &[CorpusInputWork], analyses_json: &str) -> PathBuf {
    let works_dir = dir.join("works");
    fs::create_dir_all(&works_dir).unwrap();
    let mut names = Vec::new();
    for work in works {
        let name = format!("works/{}.json", work.id);
        fs::write(dir.join(&name), serde_json::to_string(work).unwrap()).unwrap();
        names.push(name);
    }
    fs::write(dir.join("analyses.json"), analyses_json).unwrap();

    let manifest = serde_json::json!({ "works": names, "analyses": "analyses.json" });
    let manifest_path = dir.join("manifest.json");
    fs::write(&manifest_path, manifest.to_string()).unwrap();
    manifest_path
}

/// Assert that every token appears in exactly one word posting list.
pub fn assert_word_dimension_partitions(corpus: &Corpus) {
    let mut seen = vec![0u32; corpus.num_tokens() as usize];
    for (word, list) in corpus.dimension(Dimension::Word) {
        for token in list.to_vec() {
            assert!(
                (token as usize) < seen.len(),
                "word '{}' lists out-of-range token {}",
                word,
                token
            );
            seen[token as usize] += 1;
        }
    }
    assert!(
        seen.iter().all(|&count| count == 1),
        "token coverage by word lists: {:?}",
        seen
    );
}
