//! Text segmentation, stop words and statistics

pub mod stats;
pub mod stopwords;
pub mod tokenizer;

use regex::Regex;

pub use tokenizer::{WordFrequencies, clean_text, sentences, words};

/// Compiles a literal pattern. A pattern that fails to compile degrades to
/// one that never matches.
pub(crate) fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|_| Regex::new(r"$^").expect("fallback regex compiles"))
}
