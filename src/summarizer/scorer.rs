//! Weighted multi-factor sentence scoring
//!
//! `total = (frequency * 0.4 + position * 0.2 + length * 0.2 + keyword * 0.2) * penalty`
//!
//! The weights are fixed. Sentences with no qualifying tokens get no score and
//! can never be selected through this scorer.

use std::collections::{BTreeMap, HashSet};

use crate::text::tokenizer::{WordFrequencies, words};

const FREQUENCY_WEIGHT: f64 = 0.4;
const POSITION_WEIGHT: f64 = 0.2;
const LENGTH_WEIGHT: f64 = 0.2;
const KEYWORD_WEIGHT: f64 = 0.2;

/// Importance score per sentence index. Recomputed per request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SentenceScores(BTreeMap<usize, f64>);

impl SentenceScores {
    #[must_use]
    pub fn get(&self, index: usize) -> Option<f64> {
        self.0.get(&index).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Scored indices, best first; equal scores keep document order.
    #[must_use]
    pub fn ranked(&self) -> Vec<usize> {
        let mut entries: Vec<(usize, f64)> = self.0.iter().map(|(&i, &s)| (i, s)).collect();
        entries.sort_by(|a, b| b.1.total_cmp(&a.1));
        entries.into_iter().map(|(i, _)| i).collect()
    }

    /// The best `n` indices, returned in document order.
    #[must_use]
    pub fn top_in_order(&self, n: usize) -> Vec<usize> {
        let mut top: Vec<usize> = self.ranked().into_iter().take(n).collect();
        top.sort_unstable();
        top
    }

    /// Re-ranks `candidates` by these scores and keeps the best `n` in
    /// document order. Candidates without a score are dropped; equal scores
    /// keep the candidates' incoming order.
    #[must_use]
    pub fn rerank(&self, candidates: &[usize], n: usize) -> Vec<usize> {
        let mut scored: Vec<(usize, f64)> = candidates
            .iter()
            .filter_map(|&i| self.get(i).map(|s| (i, s)))
            .collect();
        scored.sort_by(|a, b| b.1.total_cmp(&a.1));
        let mut kept: Vec<usize> = scored.into_iter().take(n).map(|(i, _)| i).collect();
        kept.sort_unstable();
        kept
    }
}

#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn position_score(index: usize, total: usize) -> f64 {
    if total == 0 {
        return 1.0;
    }
    1.0 - (index as f64 / total as f64) * 0.5
}

#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn length_score(token_count: usize) -> f64 {
    if token_count > 5 {
        (token_count as f64 / 20.0).min(1.0)
    } else {
        0.5
    }
}

#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn keyword_density(tokens: &[String]) -> f64 {
    if tokens.is_empty() {
        return 0.0;
    }
    let distinct: HashSet<&String> = tokens.iter().collect();
    distinct.len() as f64 / tokens.len() as f64
}

#[must_use]
pub const fn length_penalty(token_count: usize) -> f64 {
    if token_count < 5 || token_count > 50 {
        0.5
    } else {
        1.0
    }
}

#[allow(clippy::cast_precision_loss)]
fn frequency_score(tokens: &[String], corpus: &WordFrequencies) -> f64 {
    if tokens.is_empty() {
        return 0.0;
    }
    let total: usize = tokens.iter().map(|t| corpus.get(t)).sum();
    total as f64 / tokens.len() as f64
}

/// Scores `sentences` against the word frequencies of `full_text`.
#[must_use]
pub fn score(sentences: &[String], full_text: &str) -> SentenceScores {
    let corpus = WordFrequencies::of_text(full_text);
    let total = sentences.len();
    let mut scores = BTreeMap::new();

    for (index, sentence) in sentences.iter().enumerate() {
        let tokens = words(sentence);
        if tokens.is_empty() {
            continue;
        }
        let count = tokens.len();
        let combined = frequency_score(&tokens, &corpus) * FREQUENCY_WEIGHT
            + position_score(index, total) * POSITION_WEIGHT
            + length_score(count) * LENGTH_WEIGHT
            + keyword_density(&tokens) * KEYWORD_WEIGHT;
        scores.insert(index, combined * length_penalty(count));
    }

    SentenceScores(scores)
}
