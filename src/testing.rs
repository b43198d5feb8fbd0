//! Test utilities shared across unit and integration tests.
//!
//! This module is always compiled but hidden from documentation.

#![doc(hidden)]

use crate::build::CorpusInputWork;
use crate::inflection::{Analysis, Case, Gender, Mood, Number, Person, Tense, Voice};

/// A work whose rows are numbered `1`, `2`, ... in a flat hierarchy.
pub fn make_work(id: &str, author_code: &str, rows: &[&str]) -> CorpusInputWork {
    CorpusInputWork {
        id: id.to_string(),
        work_name: format!("Work {}", id),
        author: author_code.to_uppercase(),
        author_code: author_code.to_string(),
        rows: rows.iter().map(|row| row.to_string()).collect(),
        row_ids: (1..=rows.len()).map(|n| vec![n.to_string()]).collect(),
    }
}

/// A work with explicit hierarchical section ids like `"1.2"`.
pub fn make_sectioned_work(id: &str, author_code: &str, rows: &[(&str, &str)]) -> CorpusInputWork {
    CorpusInputWork {
        id: id.to_string(),
        work_name: format!("Work {}", id),
        author: author_code.to_uppercase(),
        author_code: author_code.to_string(),
        rows: rows.iter().map(|(_, text)| text.to_string()).collect(),
        row_ids: rows
            .iter()
            .map(|(section, _)| section.split('.').map(String::from).collect())
            .collect(),
    }
}

/// Hand-written analyses for the opening of the Gallic War.
pub fn gallia_analyzer(word: &str) -> Vec<Analysis> {
    match word {
        "gallia" => vec![Analysis::of("Gallia")
            .with_case(vec![Case::Nominative, Case::Ablative])
            .with_number(Number::Singular)
            .with_gender(Gender::Feminine)],
        "est" => vec![Analysis::of("sum")
            .with_person(Person::Third)
            .with_number(Number::Singular)
            .with_tense(Tense::Present)
            .with_mood(Mood::Indicative)
            .with_voice(Voice::Active)],
        "omnis" => vec![Analysis::of("omnis")
            .with_case(vec![Case::Nominative, Case::Genitive])
            .with_number(Number::Singular)
            .with_gender(vec![Gender::Masculine, Gender::Feminine])],
        "divisa" => vec![Analysis::of("divido")
            .with_case(Case::Nominative)
            .with_number(Number::Singular)
            .with_gender(Gender::Feminine)
            .with_tense(Tense::Perfect)
            .with_mood(Mood::Participle)
            .with_voice(Voice::Passive)],
        "in" => vec![Analysis::of("in")],
        "partes" => vec![Analysis::of("pars")
            .with_case(vec![Case::Nominative, Case::Accusative])
            .with_number(Number::Plural)
            .with_gender(Gender::Feminine)],
        "tres" => vec![Analysis::of("tres")
            .with_case(vec![Case::Nominative, Case::Accusative])
            .with_number(Number::Plural)],
        _ => Vec::new(),
    }
}

/// Ascending, duplicate-free copy of `values`.
pub fn sorted_unique(mut values: Vec<u32>) -> Vec<u32> {
    values.sort_unstable();
    values.dedup();
    values
}
