//! Paragraph, bullet and key-phrase rendering

use crate::core::models::OutputType;
use crate::summarizer::document::{Document, Extract};
use crate::summarizer::scorer;
use crate::text::tokenizer::{WordFrequencies, split_sentences};

pub const BULLET_MARKER: &str = "•";

const KEY_PHRASE_MIN_LEN: usize = 3;

#[must_use]
pub fn paragraph(sentences: &[&str]) -> String {
    sentences.join(" ")
}

/// One bullet per sentence: trimmed, trailing periods stripped.
#[must_use]
pub fn bullets(sentences: &[&str]) -> String {
    sentences
        .iter()
        .map(|s| s.trim().trim_end_matches('.').trim_end())
        .filter(|s| !s.is_empty())
        .map(|s| format!("{BULLET_MARKER} {s}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// The `n` most frequent non-stop alphabetic words longer than three
/// characters, title-cased and comma separated.
#[must_use]
pub fn key_phrases(text: &str, n: usize) -> String {
    WordFrequencies::of_text(text)
        .most_common(n, KEY_PHRASE_MIN_LEN)
        .into_iter()
        .map(|(word, _)| title_case(word))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Renders a local extract in the requested shape.
#[must_use]
pub fn render_local(doc: &Document, extract: &Extract, shape: OutputType, count: usize) -> String {
    match shape {
        OutputType::Paragraph => extract.render(doc),
        OutputType::Bullets => bullets(&extract.sentences(doc)),
        OutputType::KeyPhrases => key_phrases(doc.cleaned(), count * 2),
    }
}

/// Renders provider prose in the requested shape. Bullets re-score the
/// provider's sentences only when there are more than `count` of them.
#[must_use]
pub fn render_remote(text: &str, shape: OutputType, count: usize) -> String {
    match shape {
        OutputType::Paragraph => text.to_string(),
        OutputType::Bullets => {
            let sentences = split_sentences(text);
            if sentences.len() <= count {
                let all: Vec<&str> = sentences.iter().map(String::as_str).collect();
                return bullets(&all);
            }
            let picked: Vec<&str> = scorer::score(&sentences, text)
                .top_in_order(count)
                .into_iter()
                .filter_map(|i| sentences.get(i).map(String::as_str))
                .collect();
            bullets(&picked)
        }
        OutputType::KeyPhrases => key_phrases(text, count * 2),
    }
}
