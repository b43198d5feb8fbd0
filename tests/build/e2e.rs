//! End-to-end tests for the build workflow.

use std::fs;

use tempfile::TempDir;
use verbum::binary::{
    decode_u32_le, INFLECTIONS_RAW_FILE, INFLECTION_OFFSETS_FILE, RAW_TEXT_FILE, STATS_FILE,
    TOKEN_STARTS_FILE,
};
use verbum::{run_build, BuildOptions, CorpusError, Dimension, InflectionSlot};

use crate::common::{make_sectioned_work, make_work, postings, write_fixture};

const ANALYSES: &str = r#"{
    "gallia": [{"lemma": "Gallia", "case": "nominative", "number": "singular", "gender": "feminine"}],
    "est": [{"lemma": "sum", "person": "third", "number": "singular", "tense": "present", "mood": "indicative"}],
    "partes": [{"lemma": "pars", "case": ["nominative", "accusative"], "number": "plural"}]
}"#;

fn fixture(temp: &TempDir) -> std::path::PathBuf {
    let bg = make_sectioned_work(
        "caes_bg",
        "caesar",
        &[
            ("1.1", "Gallia est omnis divisa in partes tres,"),
            ("1.2", "quarum unam incolunt Belgae."),
        ],
    );
    let bc = make_work("caes_bc", "caesar", &["Litteris a Fabio"]);
    write_fixture(temp.path(), &[bg, bc], ANALYSES)
}

#[test]
fn test_run_build_e2e_basic() {
    let temp = TempDir::new().unwrap();
    let manifest = fixture(&temp);
    let output = temp.path().join("out");

    let corpus = run_build(&manifest, &output, BuildOptions::default()).unwrap();

    for file in [
        RAW_TEXT_FILE,
        TOKEN_STARTS_FILE,
        INFLECTIONS_RAW_FILE,
        INFLECTION_OFFSETS_FILE,
        STATS_FILE,
    ] {
        assert!(output.join(file).exists(), "{} should be written", file);
    }
    assert_eq!(corpus.num_tokens(), 14);
    assert_eq!(corpus.works().len(), 2);
    assert_eq!(postings(&corpus, Dimension::Case, "nominative"), vec![0, 5]);
    assert_eq!(postings(&corpus, Dimension::Lemma, "sum"), vec![1]);
}

#[test]
fn test_artifacts_match_corpus() {
    let temp = TempDir::new().unwrap();
    let manifest = fixture(&temp);
    let output = temp.path().join("out");
    let corpus = run_build(&manifest, &output, BuildOptions::default()).unwrap();

    let raw_text = fs::read_to_string(output.join(RAW_TEXT_FILE)).unwrap();
    assert_eq!(raw_text, corpus.raw_text().text);
    assert!(raw_text.starts_with("Gallia est omnis divisa in partes tres,\nquarum"));

    let starts = decode_u32_le(&fs::read(output.join(TOKEN_STARTS_FILE)).unwrap()).unwrap();
    assert_eq!(starts.len(), 2 * corpus.num_tokens() as usize);
    // token 1 is "est": starts at byte 7, its break at byte 10
    assert_eq!(&starts[2..4], &[7, 10]);

    let offsets =
        decode_u32_le(&fs::read(output.join(INFLECTION_OFFSETS_FILE)).unwrap()).unwrap();
    let raw = decode_u32_le(&fs::read(output.join(INFLECTIONS_RAW_FILE)).unwrap()).unwrap();
    assert_eq!(offsets.len(), corpus.num_tokens() as usize);
    assert_eq!(raw, corpus.inflections().raw());
    for (token, &entry) in offsets.iter().enumerate() {
        let slot = InflectionSlot::unpack(entry);
        let records = &raw[slot.offset as usize..(slot.offset + slot.len) as usize];
        assert_eq!(Some(records), corpus.token_inflections(token as u32));
    }

    let stats: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(output.join(STATS_FILE)).unwrap()).unwrap();
    assert_eq!(stats["numTokens"], 14);
    assert_eq!(stats["stats"]["totalWorks"], 2);
    assert_eq!(stats["works"][1]["id"], "caes_bc");
    assert_eq!(stats["authors"]["caesar"]["end"], 14);
}

#[test]
fn test_run_build_missing_work_file() {
    let temp = TempDir::new().unwrap();
    let manifest = fixture(&temp);
    fs::remove_file(temp.path().join("works/caes_bc.json")).unwrap();

    let result = run_build(&manifest, &temp.path().join("out"), BuildOptions::default());
    assert!(matches!(result, Err(CorpusError::Io(_))));
}

#[test]
fn test_run_build_malformed_analyses() {
    let temp = TempDir::new().unwrap();
    let work = make_work("w", "a", &["arma"]);
    let manifest = write_fixture(temp.path(), &[work], r#"{"arma": [{"case": "nominative"}]}"#);

    let result = run_build(&manifest, &temp.path().join("out"), BuildOptions::default());
    assert!(matches!(result, Err(CorpusError::Json(_))));
}
