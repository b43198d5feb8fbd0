//! Grammatical posting lists and the per-token inflection table.

use verbum::{
    build_corpus, expand_inflection_data, Analysis, AnalysisTable, BuildOptions, Case,
    CorpusError, Dimension, Gender, InflectionSlot, Person, Tense,
};

use crate::common::{gallia_corpus, make_work, postings};

#[test]
fn test_grammatical_dimensions() {
    let corpus = gallia_corpus();
    // gallia est omnis divisa in partes tres
    //   0     1    2     3    4    5     6
    assert_eq!(
        postings(&corpus, Dimension::Case, "nominative"),
        vec![0, 2, 3, 5, 6]
    );
    assert_eq!(postings(&corpus, Dimension::Case, "ablative"), vec![0]);
    assert_eq!(postings(&corpus, Dimension::Case, "genitive"), vec![2]);
    assert_eq!(postings(&corpus, Dimension::Case, "accusative"), vec![5, 6]);
    assert_eq!(
        postings(&corpus, Dimension::Gender, "feminine"),
        vec![0, 2, 3, 5]
    );
    assert_eq!(postings(&corpus, Dimension::Gender, "masculine"), vec![2]);
    assert_eq!(
        postings(&corpus, Dimension::Number, "singular"),
        vec![0, 1, 2, 3]
    );
    assert_eq!(postings(&corpus, Dimension::Number, "plural"), vec![5, 6]);
    assert_eq!(postings(&corpus, Dimension::Person, "third"), vec![1]);
    assert_eq!(postings(&corpus, Dimension::Tense, "present"), vec![1]);
    assert_eq!(postings(&corpus, Dimension::Tense, "perfect"), vec![3]);
    assert_eq!(postings(&corpus, Dimension::Mood, "participle"), vec![3]);
    assert_eq!(postings(&corpus, Dimension::Voice, "passive"), vec![3]);
    assert_eq!(postings(&corpus, Dimension::Voice, "active"), vec![1]);
}

#[test]
fn test_lemma_dimension() {
    let corpus = gallia_corpus();
    assert_eq!(postings(&corpus, Dimension::Lemma, "sum"), vec![1]);
    assert_eq!(postings(&corpus, Dimension::Lemma, "in"), vec![4]);
    assert_eq!(postings(&corpus, Dimension::Lemma, "pars"), vec![5]);
    assert_eq!(corpus.stats().unique_lemmata, 7);
}

#[test]
fn test_token_inflections() {
    let corpus = gallia_corpus();

    let gallia = corpus.token_inflections(0).unwrap();
    assert_eq!(gallia.len(), 1);
    let expanded = expand_inflection_data(gallia[0]);
    assert_eq!(expanded.cases, vec![Case::Nominative, Case::Ablative]);
    assert_eq!(expanded.genders, vec![Gender::Feminine]);

    // "in" analyzes to a lemma with no grammatical fields
    assert_eq!(corpus.token_inflections(4), Some(&[][..]));
    assert_eq!(corpus.token_inflections(7), None);
    assert_eq!(corpus.inflections().raw()[0], 0);
}

#[test]
fn test_repeated_words_share_a_slot() {
    let work = make_work("w", "a", &["Gallia est", "Gallia est"]);
    let corpus = build_corpus([&work], crate::common::gallia_analyzer, BuildOptions::default())
        .unwrap();
    let slots = corpus.inflections().token_slots();
    assert_eq!(slots[0], slots[2]);
    assert_eq!(slots[1], slots[3]);
    assert_ne!(slots[0], slots[1]);
    assert_eq!(corpus.inflections().num_words(), 2);
    // sentinel plus one record per distinct word
    assert_eq!(corpus.inflections().raw().len(), 3);
}

#[test]
fn test_ambiguous_tense_expands() {
    let analyzer = |word: &str| {
        if word == "legit" {
            vec![Analysis::of("lego")
                .with_person(Person::Third)
                .with_tense(vec![Tense::Present, Tense::Perfect])]
        } else {
            Vec::new()
        }
    };
    let work = make_work("w", "a", &["Marcus legit"]);
    let corpus = build_corpus([&work], analyzer, BuildOptions::default()).unwrap();

    let records = corpus.token_inflections(1).unwrap();
    assert_eq!(records.len(), 2);
    let tenses: Vec<_> = records
        .iter()
        .filter_map(|&record| expand_inflection_data(record).tense)
        .collect();
    assert_eq!(tenses, vec![Tense::Present, Tense::Perfect]);
    assert_eq!(postings(&corpus, Dimension::Tense, "present"), vec![1]);
    assert_eq!(postings(&corpus, Dimension::Tense, "perfect"), vec![1]);
    assert_eq!(postings(&corpus, Dimension::Person, "third"), vec![1]);
}

#[test]
fn test_analysis_table_drives_build() {
    let table = AnalysisTable::from_json(
        r#"{
            "arma": [{"lemma": "arma", "case": ["nominative", "accusative"], "number": "plural", "gender": "neuter"}],
            "cano": [{"lemma": "cano", "person": "first", "number": "singular", "tense": "present", "mood": "indicative", "voice": "active"}]
        }"#,
    )
    .unwrap();
    let work = make_work("aen", "verg", &["Arma virumque cano"]);
    let corpus = build_corpus([&work], table, BuildOptions::default()).unwrap();

    assert_eq!(postings(&corpus, Dimension::Gender, "neuter"), vec![0]);
    assert_eq!(postings(&corpus, Dimension::Person, "first"), vec![2]);
    assert_eq!(postings(&corpus, Dimension::Mood, "indicative"), vec![2]);
    assert!(corpus.index(Dimension::Lemma, "virumque").is_none());
    assert_eq!(corpus.token_inflections(1), Some(&[][..]));
}

#[test]
fn test_too_many_inflections_is_a_capacity_error() {
    // 6 tenses * 7 moods * 3 persons * 2 numbers * 2 voices = 504 records
    let analyzer = |_: &str| {
        vec![Analysis::of("x")
            .with_tense(Tense::ALL.to_vec())
            .with_mood(verbum::Mood::ALL.to_vec())
            .with_person(Person::ALL.to_vec())
            .with_number(verbum::Number::ALL.to_vec())
            .with_voice(verbum::Voice::ALL.to_vec())]
    };
    let work = make_work("w", "a", &["monstrum"]);
    let err = build_corpus([&work], analyzer, BuildOptions::default())
        .err()
        .unwrap();
    assert!(matches!(err, CorpusError::InflectionLengthOverflow { len: 504, .. }));
    assert!(err.is_capacity());
}

#[test]
fn test_slot_packing_limits() {
    let slot = InflectionSlot { offset: 12, len: 3 };
    assert_eq!(slot.packed().unwrap(), (12 << 8) | 3);
    assert_eq!(InflectionSlot::unpack((12 << 8) | 3), slot);
    assert!(InflectionSlot { offset: 1 << 24, len: 1 }.packed().is_err());
}
