// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Grammatical analyses and their packed 32-bit form.
//!
//! An [`Analysis`] is what the morphological analyzer says a word form can
//! be: a lemma plus optional grammatical fields, each absent, a single value,
//! or a list of values when the form is ambiguous. For storage every analysis
//! becomes one or more [`WordInflectionData`] bitfields:
//!
//! ```text
//!  31        24 23        16 15  14   11 10    8 7  6 5  4 3  2 1  0
//! ┌────────────┬────────────┬──┬───────┬───────┬────┬────┬────┬────┐
//! │ gender set │  case set  │  │ mood  │ tense │deg │voic│pers│num │
//! └────────────┴────────────┴──┴───────┴───────┴────┴────┴────┴────┘
//! ```
//!
//! Single-valued fields hold the enum code (0 = absent). Case and gender are
//! bitsets where bit `code` is set, so one record can say "dative or
//! ablative". A list in a single-valued field cannot be expressed in one
//! record and expands to one record per value.

pub mod store;

pub use store::{InflectionSlot, InflectionStore};

use std::fmt;

use serde::{Deserialize, Serialize};

/// One packed grammatical analysis.
pub type WordInflectionData = u32;

const NUMBER_SHIFT: u32 = 0;
const PERSON_SHIFT: u32 = 2;
const VOICE_SHIFT: u32 = 4;
const DEGREE_SHIFT: u32 = 6;
const TENSE_SHIFT: u32 = 8;
const MOOD_SHIFT: u32 = 11;
const CASE_SHIFT: u32 = 16;
const GENDER_SHIFT: u32 = 24;

const TWO_BITS: u32 = 0b11;
const THREE_BITS: u32 = 0b111;
const BYTE_MASK: u32 = 0xff;

/// A grammatical category value with a stable numeric code.
pub trait GrammaticalValue: Copy {
    fn code(self) -> u32;
}

macro_rules! grammatical_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident = $code:literal => $key:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $key)]
                $variant = $code,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Posting list key, also the JSON spelling.
            pub fn key(self) -> &'static str {
                match self {
                    $($name::$variant => $key,)+
                }
            }

            pub fn from_code(code: u32) -> Option<Self> {
                match code {
                    $($code => Some($name::$variant),)+
                    _ => None,
                }
            }
        }

        impl GrammaticalValue for $name {
            #[inline]
            fn code(self) -> u32 {
                self as u32
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.key())
            }
        }

        impl From<$name> for OneOrMany<$name> {
            fn from(value: $name) -> Self {
                OneOrMany::One(value)
            }
        }

        impl From<Vec<$name>> for OneOrMany<$name> {
            fn from(values: Vec<$name>) -> Self {
                OneOrMany::Many(values)
            }
        }
    };
}

grammatical_enum!(Case {
    Nominative = 1 => "nominative",
    Accusative = 2 => "accusative",
    Dative = 3 => "dative",
    Genitive = 4 => "genitive",
    Ablative = 5 => "ablative",
    Vocative = 6 => "vocative",
    Locative = 7 => "locative",
});

grammatical_enum!(Number {
    Singular = 1 => "singular",
    Plural = 2 => "plural",
});

grammatical_enum!(Gender {
    Masculine = 1 => "masculine",
    Feminine = 2 => "feminine",
    Neuter = 3 => "neuter",
    Adverbial = 4 => "adverbial",
});

grammatical_enum!(Person {
    First = 1 => "first",
    Second = 2 => "second",
    Third = 3 => "third",
});

grammatical_enum!(Mood {
    Indicative = 1 => "indicative",
    Imperative = 2 => "imperative",
    Subjunctive = 3 => "subjunctive",
    Participle = 4 => "participle",
    Gerundive = 5 => "gerundive",
    Infinitive = 6 => "infinitive",
    Supine = 7 => "supine",
});

grammatical_enum!(Voice {
    Active = 1 => "active",
    Passive = 2 => "passive",
});

grammatical_enum!(Tense {
    Present = 1 => "present",
    Imperfect = 2 => "imperfect",
    Perfect = 3 => "perfect",
    FuturePerfect = 4 => "future_perfect",
    Future = 5 => "future",
    Pluperfect = 6 => "pluperfect",
});

grammatical_enum!(Degree {
    Positive = 1 => "positive",
    Comparative = 2 => "comparative",
    Superlative = 3 => "superlative",
});

// ============================================================================
// ANALYSES
// ============================================================================

/// A field that is either a single value or an ambiguous list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    pub fn values(&self) -> &[T] {
        match self {
            OneOrMany::One(value) => std::slice::from_ref(value),
            OneOrMany::Many(values) => values,
        }
    }
}

/// One candidate analysis of a word form.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Analysis {
    pub lemma: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case: Option<OneOrMany<Case>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<OneOrMany<Number>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<OneOrMany<Gender>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tense: Option<OneOrMany<Tense>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub person: Option<OneOrMany<Person>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood: Option<OneOrMany<Mood>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice: Option<OneOrMany<Voice>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub degree: Option<OneOrMany<Degree>>,
}

impl Analysis {
    /// An analysis with only a lemma.
    pub fn of(lemma: impl Into<String>) -> Self {
        Analysis {
            lemma: lemma.into(),
            ..Analysis::default()
        }
    }

    pub fn with_case(mut self, case: impl Into<OneOrMany<Case>>) -> Self {
        self.case = Some(case.into());
        self
    }

    pub fn with_number(mut self, number: impl Into<OneOrMany<Number>>) -> Self {
        self.number = Some(number.into());
        self
    }

    pub fn with_gender(mut self, gender: impl Into<OneOrMany<Gender>>) -> Self {
        self.gender = Some(gender.into());
        self
    }

    pub fn with_tense(mut self, tense: impl Into<OneOrMany<Tense>>) -> Self {
        self.tense = Some(tense.into());
        self
    }

    pub fn with_person(mut self, person: impl Into<OneOrMany<Person>>) -> Self {
        self.person = Some(person.into());
        self
    }

    pub fn with_mood(mut self, mood: impl Into<OneOrMany<Mood>>) -> Self {
        self.mood = Some(mood.into());
        self
    }

    pub fn with_voice(mut self, voice: impl Into<OneOrMany<Voice>>) -> Self {
        self.voice = Some(voice.into());
        self
    }

    pub fn with_degree(mut self, degree: impl Into<OneOrMany<Degree>>) -> Self {
        self.degree = Some(degree.into());
        self
    }

    /// Packed records for this analysis. Never empty; an analysis with no
    /// grammatical fields packs to `[0]`.
    pub fn pack(&self) -> Vec<WordInflectionData> {
        let mut records = vec![0];
        expand_single(&mut records, self.number.as_ref(), NUMBER_SHIFT);
        expand_single(&mut records, self.person.as_ref(), PERSON_SHIFT);
        expand_single(&mut records, self.voice.as_ref(), VOICE_SHIFT);
        expand_single(&mut records, self.degree.as_ref(), DEGREE_SHIFT);
        expand_single(&mut records, self.tense.as_ref(), TENSE_SHIFT);
        expand_single(&mut records, self.mood.as_ref(), MOOD_SHIFT);

        let sets = (bitset(self.case.as_ref()) << CASE_SHIFT)
            | (bitset(self.gender.as_ref()) << GENDER_SHIFT);
        for record in &mut records {
            *record |= sets;
        }
        records
    }
}

/// Cartesian expansion of a single-valued field.
fn expand_single<T: GrammaticalValue>(
    records: &mut Vec<WordInflectionData>,
    field: Option<&OneOrMany<T>>,
    shift: u32,
) {
    let values = match field {
        Some(field) if !field.values().is_empty() => field.values(),
        _ => return,
    };
    *records = records
        .iter()
        .flat_map(|&record| values.iter().map(move |value| record | (value.code() << shift)))
        .collect();
}

fn bitset<T: GrammaticalValue>(field: Option<&OneOrMany<T>>) -> u32 {
    field
        .map(|field| field.values().iter().fold(0, |bits, value| bits | (1 << value.code())))
        .unwrap_or(0)
}

// ============================================================================
// EXTRACTION
// ============================================================================

#[inline]
fn extract_field(data: WordInflectionData, shift: u32, mask: u32) -> u32 {
    (data >> shift) & mask
}

#[inline]
pub fn extract_number(data: WordInflectionData) -> u32 {
    extract_field(data, NUMBER_SHIFT, TWO_BITS)
}

#[inline]
pub fn extract_person(data: WordInflectionData) -> u32 {
    extract_field(data, PERSON_SHIFT, TWO_BITS)
}

#[inline]
pub fn extract_voice(data: WordInflectionData) -> u32 {
    extract_field(data, VOICE_SHIFT, TWO_BITS)
}

#[inline]
pub fn extract_degree(data: WordInflectionData) -> u32 {
    extract_field(data, DEGREE_SHIFT, TWO_BITS)
}

#[inline]
pub fn extract_tense(data: WordInflectionData) -> u32 {
    extract_field(data, TENSE_SHIFT, THREE_BITS)
}

#[inline]
pub fn extract_mood(data: WordInflectionData) -> u32 {
    extract_field(data, MOOD_SHIFT, THREE_BITS)
}

#[inline]
pub fn extract_case_bits(data: WordInflectionData) -> u32 {
    extract_field(data, CASE_SHIFT, BYTE_MASK)
}

#[inline]
pub fn extract_gender_bits(data: WordInflectionData) -> u32 {
    extract_field(data, GENDER_SHIFT, BYTE_MASK)
}

/// Members of a case or gender bitset.
fn iterate_bits<T>(bits: u32, from_code: fn(u32) -> Option<T>) -> impl Iterator<Item = T> {
    (1..8).filter(move |code| bits & (1 << code) != 0).filter_map(from_code)
}

/// A packed record decoded back into its fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpandedInflection {
    pub number: Option<Number>,
    pub person: Option<Person>,
    pub voice: Option<Voice>,
    pub degree: Option<Degree>,
    pub tense: Option<Tense>,
    pub mood: Option<Mood>,
    pub cases: Vec<Case>,
    pub genders: Vec<Gender>,
}

pub fn expand_inflection_data(data: WordInflectionData) -> ExpandedInflection {
    ExpandedInflection {
        number: Number::from_code(extract_number(data)),
        person: Person::from_code(extract_person(data)),
        voice: Voice::from_code(extract_voice(data)),
        degree: Degree::from_code(extract_degree(data)),
        tense: Tense::from_code(extract_tense(data)),
        mood: Mood::from_code(extract_mood(data)),
        cases: iterate_bits(extract_case_bits(data), Case::from_code).collect(),
        genders: iterate_bits(extract_gender_bits(data), Gender::from_code).collect(),
    }
}
