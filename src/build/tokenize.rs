// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Splitting row text into alternating word and break chunks.

/// Characters that separate words in the default tokenizer.
pub const DEFAULT_BREAK_CHARS: &str = " ()[];:.,?!'\n\t—\"†‘“”’<>";

/// Splits a row into `(chunk, is_word)` pairs.
///
/// Concatenating the chunks must reproduce the input exactly, since break
/// chunks are kept verbatim for text reconstruction.
pub trait Tokenizer {
    fn tokenize<'a>(&self, text: &'a str) -> Vec<(&'a str, bool)>;
}

impl<F> Tokenizer for F
where
    F: for<'a> Fn(&'a str) -> Vec<(&'a str, bool)>,
{
    fn tokenize<'a>(&self, text: &'a str) -> Vec<(&'a str, bool)> {
        self(text)
    }
}

/// Maximal runs of break and non-break characters.
#[derive(Debug, Clone)]
pub struct BreakCharTokenizer {
    break_chars: Vec<char>,
}

impl Default for BreakCharTokenizer {
    fn default() -> Self {
        Self::with_break_chars(DEFAULT_BREAK_CHARS)
    }
}

impl BreakCharTokenizer {
    pub fn with_break_chars(chars: &str) -> Self {
        let mut break_chars: Vec<char> = chars.chars().collect();
        break_chars.sort_unstable();
        break_chars.dedup();
        BreakCharTokenizer { break_chars }
    }

    #[inline]
    fn is_break(&self, c: char) -> bool {
        self.break_chars.binary_search(&c).is_ok()
    }
}

impl Tokenizer for BreakCharTokenizer {
    fn tokenize<'a>(&self, text: &'a str) -> Vec<(&'a str, bool)> {
        let mut result = Vec::new();
        let mut in_word = match text.chars().next() {
            Some(c) => !self.is_break(c),
            None => return result,
        };
        let mut start = 0;
        for (i, c) in text.char_indices() {
            let is_word = !self.is_break(c);
            if is_word == in_word {
                continue;
            }
            result.push((&text[start..i], in_word));
            start = i;
            in_word = is_word;
        }
        if start < text.len() {
            result.push((&text[start..], in_word));
        }
        result
    }
}

/// Tokenize with the default break characters.
pub fn process_tokens(text: &str) -> Vec<(&str, bool)> {
    BreakCharTokenizer::default().tokenize(text)
}
