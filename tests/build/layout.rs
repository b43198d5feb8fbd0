//! Token numbering, breaks, works and authors.

use verbum::{
    build_corpus, Analysis, BuildOptions, Case, CorpusError, Dimension, Number, HARD_BREAK,
};

use crate::common::{
    assert_word_dimension_partitions, gallia_corpus, make_sectioned_work, make_work, postings,
    GALLIA,
};

fn nominative_gallia(word: &str) -> Vec<Analysis> {
    if word == "gallia" {
        vec![Analysis::of("Gallia")
            .with_case(Case::Nominative)
            .with_number(Number::Singular)]
    } else {
        Vec::new()
    }
}

fn no_analyses(_: &str) -> Vec<Analysis> {
    Vec::new()
}

#[test]
fn test_two_row_work() {
    let work = make_work("bg", "caesar", &["Gallia est", "omnis divisa"]);
    let corpus = build_corpus([&work], nominative_gallia, BuildOptions::default()).unwrap();

    assert_eq!(corpus.num_tokens(), 4);
    assert_eq!(postings(&corpus, Dimension::Case, "nominative"), vec![0]);
    assert_eq!(postings(&corpus, Dimension::Word, "gallia"), vec![0]);
    assert_eq!(postings(&corpus, Dimension::Lemma, "Gallia"), vec![0]);
    assert_eq!(postings(&corpus, Dimension::Number, "singular"), vec![0]);
    assert!(corpus.index(Dimension::Case, "genitive").is_none());
}

#[test]
fn test_words_are_normalized() {
    let work = make_work("w", "a", &["Cāesar CAESAR caesar"]);
    let corpus = build_corpus([&work], no_analyses, BuildOptions::default()).unwrap();
    assert_eq!(postings(&corpus, Dimension::Word, "caesar"), vec![0, 1, 2]);
    assert_eq!(corpus.token_text(0), Some("Cāesar"));
    assert_eq!(corpus.stats().unique_words, 1);
}

#[test]
fn test_word_dimension_partitions_tokens() {
    let corpus = gallia_corpus();
    assert_eq!(corpus.num_tokens(), 7);
    assert_word_dimension_partitions(&corpus);

    let work_a = make_work("a", "x", &["arma virumque cano", "Troiae qui primus"]);
    let work_b = make_work("b", "y", &["arma arma arma"]);
    let corpus = build_corpus([&work_a, &work_b], no_analyses, BuildOptions::default()).unwrap();
    assert_word_dimension_partitions(&corpus);
    assert_eq!(postings(&corpus, Dimension::Word, "arma"), vec![0, 6, 7, 8]);
}

#[test]
fn test_raw_text_round_trips_tokens_and_breaks() {
    let corpus = gallia_corpus();
    let text: String = (0..corpus.num_tokens())
        .map(|t| {
            format!(
                "{}{}",
                corpus.token_text(t).unwrap(),
                corpus.break_text(t).unwrap()
            )
        })
        .collect();
    assert_eq!(text, GALLIA);
    assert_eq!(corpus.raw_text().text, GALLIA);
    assert_eq!(corpus.token_text(7), None);
}

#[test]
fn test_hard_breaks_from_sections_and_periods() {
    let work = make_sectioned_work(
        "aen",
        "verg",
        &[
            ("1.1", "Arma virumque cano"),
            ("1.2", "Troiae qui primus. Ab oris"),
            ("2.1", "Conticuere omnes"),
        ],
    );
    let corpus = build_corpus([&work], no_analyses, BuildOptions::default()).unwrap();
    // period after "primus" (5), section change after "oris" (7), end of
    // work (9)
    assert_eq!(postings(&corpus, Dimension::Breaks, HARD_BREAK), vec![5, 7, 9]);
    assert_eq!(corpus.break_text(2), Some("\n"));
    assert!(corpus
        .index(Dimension::Breaks, HARD_BREAK)
        .unwrap()
        .is_dense());
}

#[test]
fn test_every_work_ends_on_hard_break() {
    let first = make_work("a", "x", &["arma virumque"]);
    let second = make_work("b", "x", &["cano"]);
    let corpus = build_corpus([&first, &second], no_analyses, BuildOptions::default()).unwrap();
    assert_eq!(postings(&corpus, Dimension::Breaks, HARD_BREAK), vec![1, 2]);
}

#[test]
fn test_work_and_row_ranges() {
    let first = make_work("a", "x", &["arma virumque", "cano"]);
    let second = make_sectioned_work("b", "x", &[("3.1", "Troiae qui")]);
    let corpus = build_corpus([&first, &second], no_analyses, BuildOptions::default()).unwrap();

    let works = corpus.works();
    assert_eq!(works.len(), 2);
    assert_eq!((works[0].start, works[0].end), (0, 3));
    assert_eq!((works[1].start, works[1].end), (3, 5));
    assert_eq!(works[0].rows[1].section_id, "2");
    assert_eq!((works[0].rows[1].start, works[0].rows[1].end), (2, 3));
    assert_eq!(works[1].rows[0].section_id, "3.1");

    let location = corpus.resolve_token(4).unwrap();
    assert_eq!(location.work_index, 1);
    assert_eq!(location.work.id, "b");
    assert_eq!(location.row.section_id, "3.1");
    assert_eq!(location.offset_in_row, 1);
    assert!(corpus.resolve_token(5).is_none());
}

#[test]
fn test_author_ranges() {
    let a1 = make_work("a1", "caesar", &["Gallia est"]);
    let a2 = make_work("a2", "caesar", &["omnis divisa"]);
    let b1 = make_work("b1", "cicero", &["quo usque tandem"]);
    let corpus = build_corpus([&a1, &a2, &b1], no_analyses, BuildOptions::default()).unwrap();

    let caesar = corpus.author("caesar").unwrap();
    assert_eq!((caesar.first_work, caesar.last_work), (0, 1));
    assert_eq!((caesar.start, caesar.end), (0, 4));
    let cicero = corpus.author("cicero").unwrap();
    assert_eq!((cicero.start, cicero.end), (4, 7));
    assert_eq!(corpus.stats().total_works, 3);
}

#[test]
fn test_rejects_non_contiguous_author() {
    let a1 = make_work("a1", "caesar", &["Gallia est"]);
    let b1 = make_work("b1", "cicero", &["quo usque"]);
    let a2 = make_work("a2", "caesar", &["omnis divisa"]);
    let result = build_corpus([&a1, &b1, &a2], no_analyses, BuildOptions::default());
    match result {
        Err(CorpusError::NonContiguousAuthor { author, work }) => {
            assert_eq!(author, "caesar");
            assert_eq!(work, "a2");
        }
        other => panic!("expected NonContiguousAuthor, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_rejects_empty_section_id() {
    let mut work = make_work("w", "a", &["arma", "cano"]);
    work.row_ids[1] = Vec::new();
    let result = build_corpus([&work], no_analyses, BuildOptions::default());
    assert!(matches!(result, Err(CorpusError::MalformedSectionId { .. })));
}

#[test]
fn test_dense_ratio_controls_encoding() {
    let work = make_work("w", "a", &["et arma et virum et cano et"]);
    let sparse = build_corpus([&work], no_analyses, BuildOptions { dense_ratio: 1 }).unwrap();
    assert!(!sparse.index(Dimension::Word, "et").unwrap().is_dense());

    let dense = build_corpus([&work], no_analyses, BuildOptions::default()).unwrap();
    let et = dense.index(Dimension::Word, "et").unwrap();
    assert!(et.is_dense());
    assert_eq!(et.to_vec(), vec![0, 2, 4, 6]);
    assert_eq!(
        sparse.index(Dimension::Word, "et").unwrap().to_vec(),
        et.to_vec()
    );
}
