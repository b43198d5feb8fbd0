//! Word normalization.

#[cfg(feature = "unicode-normalization")]
use unicode_normalization::UnicodeNormalization;

/// Indexing key for a word form: diacritics removed, then lowercased.
///
/// Editions mark vowel length, breves and diaeresis; none of them separate
/// index entries, so `"rēgīna"`, `"Regina"` and `"regina"` share one key.
///
/// Without the `unicode-normalization` feature this only lowercases, and the
/// input is expected to be free of diacritics already.
#[cfg(feature = "unicode-normalization")]
pub fn normalize(value: &str) -> String {
    value
        .nfd()
        .filter(|&c| !is_combining_mark(c))
        .flat_map(char::to_lowercase)
        .collect()
}

#[cfg(not(feature = "unicode-normalization"))]
pub fn normalize(value: &str) -> String {
    value.to_lowercase()
}

/// Unicode blocks made of combining marks only.
#[cfg(feature = "unicode-normalization")]
const COMBINING_BLOCKS: [(char, char); 5] = [
    ('\u{0300}', '\u{036F}'),
    ('\u{1AB0}', '\u{1AFF}'),
    ('\u{1DC0}', '\u{1DFF}'),
    ('\u{20D0}', '\u{20FF}'),
    ('\u{FE20}', '\u{FE2F}'),
];

#[cfg(feature = "unicode-normalization")]
fn is_combining_mark(c: char) -> bool {
    COMBINING_BLOCKS
        .iter()
        .any(|&(first, last)| (first..=last).contains(&c))
}
