//! Sentence and word segmentation
//!
//! Everything here is a pure function over request-local text, so it is safe
//! to call from any number of concurrent requests.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

use super::compile;
use super::stopwords::is_stopword;

static DISALLOWED_CHARS: Lazy<Regex> = Lazy::new(|| compile(r"[^\w\s.,!?;:\-]"));
static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| compile(r"\s+"));
static WORD: Lazy<Regex> = Lazy::new(|| compile(r"\w+"));

/// Strips characters outside word characters and `.,!?;:-`, then collapses
/// whitespace runs to a single space.
#[must_use]
pub fn clean_text(text: &str) -> String {
    let stripped = DISALLOWED_CHARS.replace_all(text, "");
    WHITESPACE_RUN.replace_all(&stripped, " ").trim().to_string()
}

const fn is_terminal(c: char) -> bool {
    matches!(c, '.' | '!' | '?')
}

/// Splits already-cleaned text into sentences.
///
/// A sentence ends at a run of `.`, `!` or `?` followed by whitespace or the
/// end of input, so decimals like `3.5` stay inside their sentence.
#[must_use]
pub fn split_sentences(cleaned: &str) -> Vec<String> {
    let chars: Vec<(usize, char)> = cleaned.char_indices().collect();
    let mut out = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < chars.len() {
        if !is_terminal(chars[i].1) {
            i += 1;
            continue;
        }
        let mut j = i + 1;
        while j < chars.len() && is_terminal(chars[j].1) {
            j += 1;
        }
        if j == chars.len() || chars[j].1.is_whitespace() {
            let end = chars.get(j).map_or(cleaned.len(), |&(pos, _)| pos);
            let sentence = cleaned[start..end].trim();
            if !sentence.is_empty() {
                out.push(sentence.to_string());
            }
            start = end;
        }
        i = j;
    }

    let tail = cleaned[start..].trim();
    if !tail.is_empty() {
        out.push(tail.to_string());
    }
    out
}

/// Cleans `text` and splits it into sentences in document order.
#[must_use]
pub fn sentences(text: &str) -> Vec<String> {
    split_sentences(&clean_text(text))
}

/// Lowercase alphabetic tokens, stop words included.
#[must_use]
pub fn terms(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    WORD.find_iter(&lowered)
        .map(|m| m.as_str())
        .filter(|token| token.chars().all(char::is_alphabetic))
        .map(str::to_string)
        .collect()
}

/// Lowercase alphabetic tokens with stop words removed.
#[must_use]
pub fn words(text: &str) -> Vec<String> {
    terms(text)
        .into_iter()
        .filter(|token| !is_stopword(token))
        .collect()
}

/// Whitespace-delimited word count, without any filtering.
#[must_use]
pub fn raw_word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Token counts that remember first-seen order, so ranking ties resolve
/// deterministically.
#[derive(Debug, Default, Clone)]
pub struct WordFrequencies {
    counts: HashMap<String, usize>,
    order: Vec<String>,
}

impl WordFrequencies {
    #[must_use]
    pub fn from_words(words: &[String]) -> Self {
        let mut table = Self::default();
        for word in words {
            match table.counts.get_mut(word) {
                Some(count) => *count += 1,
                None => {
                    table.counts.insert(word.clone(), 1);
                    table.order.push(word.clone());
                }
            }
        }
        table
    }

    #[must_use]
    pub fn of_text(text: &str) -> Self {
        Self::from_words(&words(text))
    }

    #[must_use]
    pub fn get(&self, word: &str) -> usize {
        self.counts.get(word).copied().unwrap_or(0)
    }

    /// Distinct words in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.order
            .iter()
            .map(|word| (word.as_str(), self.counts.get(word).copied().unwrap_or(0)))
    }

    /// The `n` most frequent words longer than `min_len` characters, most
    /// frequent first; equal counts keep first-seen order.
    #[must_use]
    pub fn most_common(&self, n: usize, min_len: usize) -> Vec<(&str, usize)> {
        let mut ranked: Vec<(&str, usize)> = self
            .iter()
            .filter(|(word, _)| word.chars().count() > min_len)
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(n);
        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_text_collapses_whitespace_and_strips_symbols() {
        assert_eq!(
            clean_text("Hello,\n\n  world!  (really) @home #1 - ok?"),
            "Hello, world! really home 1 - ok?"
        );
    }

    #[test]
    fn empty_input_yields_no_sentences() {
        assert!(sentences("").is_empty());
        assert!(sentences("   \n\t").is_empty());
        assert!(words("").is_empty());
    }

    #[test]
    fn sentences_split_on_terminal_punctuation() {
        let got = sentences("First one. Second one!  Third one?? trailing bit");
        assert_eq!(got, vec!["First one.", "Second one!", "Third one??", "trailing bit"]);
    }

    #[test]
    fn decimals_do_not_end_a_sentence() {
        let got = sentences("Version 3.5 shipped today. It is faster.");
        assert_eq!(got, vec!["Version 3.5 shipped today.", "It is faster."]);
    }

    #[test]
    fn words_drop_stopwords_digits_and_punctuation() {
        let got = words("The 3 quick foxes, and the LAZY dog!");
        assert_eq!(got, vec!["quick", "foxes", "lazy", "dog"]);
    }

    #[test]
    fn terms_keep_stopwords() {
        assert_eq!(terms("The cat sat"), vec!["the", "cat", "sat"]);
    }

    #[test]
    fn most_common_breaks_ties_by_first_appearance() {
        let freq = WordFrequencies::of_text("delta alpha gamma alpha delta beta");
        let top = freq.most_common(3, 3);
        assert_eq!(top, vec![("delta", 2), ("alpha", 2), ("gamma", 1)]);
    }

    #[test]
    fn most_common_respects_min_length() {
        let freq = WordFrequencies::of_text("cat cat cat elephant");
        assert_eq!(freq.most_common(5, 3), vec![("elephant", 1)]);
    }
}
