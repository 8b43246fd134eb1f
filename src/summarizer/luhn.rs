//! Frequency-heuristic sentence ranking (Luhn)
//!
//! Significant words are non-stop words seen at least twice in the document.
//! Within a sentence, significant words closer than `MAX_GAP` insignificant
//! words apart form a cluster; a cluster scores `significant² / span` and a
//! sentence takes the score of its best cluster.

use std::collections::HashSet;

use super::top_indices;
use crate::text::stopwords::is_stopword;
use crate::text::tokenizer::{WordFrequencies, terms};

const MAX_GAP: usize = 4;
const MIN_SIGNIFICANT_FREQUENCY: usize = 2;

fn significant_words(sentence_words: &[Vec<String>]) -> HashSet<String> {
    let all: Vec<String> = sentence_words.iter().flatten().cloned().collect();
    let freq = WordFrequencies::from_words(&all);
    let frequent: HashSet<String> = freq
        .iter()
        .filter(|&(_, count)| count >= MIN_SIGNIFICANT_FREQUENCY)
        .map(|(word, _)| word.to_string())
        .collect();
    if frequent.is_empty() {
        freq.iter().map(|(word, _)| word.to_string()).collect()
    } else {
        frequent
    }
}

#[allow(clippy::cast_precision_loss)]
fn cluster_score(tokens: &[String], significant: &HashSet<String>) -> f64 {
    let positions: Vec<usize> = tokens
        .iter()
        .enumerate()
        .filter(|(_, t)| !is_stopword(t) && significant.contains(t.as_str()))
        .map(|(i, _)| i)
        .collect();

    let Some(&first) = positions.first() else {
        return 0.0;
    };

    let mut best = 0.0_f64;
    let mut start = first;
    let mut last = first;
    let mut hits = 1_usize;

    for &pos in &positions[1..] {
        if pos - last - 1 <= MAX_GAP {
            hits += 1;
        } else {
            best = best.max((hits * hits) as f64 / (last - start + 1) as f64);
            start = pos;
            hits = 1;
        }
        last = pos;
    }
    best.max((hits * hits) as f64 / (last - start + 1) as f64)
}

/// Ranks sentences by their densest cluster of significant words. `sentences`
/// holds the raw sentence text so gaps can count stop words too.
#[must_use]
pub fn rank(sentences: &[String], sentence_words: &[Vec<String>], limit: usize) -> Vec<usize> {
    let significant = significant_words(sentence_words);
    let scores: Vec<f64> = sentences
        .iter()
        .map(|s| cluster_score(&terms(s), &significant))
        .collect();
    top_indices(&scores, limit)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(words: &[&str]) -> HashSet<String> {
        words.iter().map(|w| (*w).to_string()).collect()
    }

    fn tokens(text: &str) -> Vec<String> {
        terms(text)
    }

    #[test]
    fn dense_cluster_beats_sparse_mentions() {
        let significant = set(&["cache", "eviction"]);
        let dense = cluster_score(&tokens("cache eviction cache"), &significant);
        let sparse = cluster_score(
            &tokens("cache one two three four five six eviction"),
            &significant,
        );
        // dense: 3 hits over span 3; sparse: two singleton clusters
        assert!((dense - 3.0).abs() < 1e-12);
        assert!((sparse - 1.0).abs() < 1e-12);
    }

    #[test]
    fn no_significant_words_scores_zero() {
        assert!(cluster_score(&tokens("nothing here"), &set(&["cache"])).abs() < 1e-12);
    }

    #[test]
    fn repeated_topic_sentence_ranks_first() {
        let sentences: Vec<String> = [
            "Weather was mild today.",
            "The cache eviction policy drops cold cache entries first.",
            "Lunch was served late.",
            "Eviction of the cache happens under memory pressure.",
        ]
        .iter()
        .map(|s| (*s).to_string())
        .collect();
        let words: Vec<Vec<String>> = sentences.iter().map(|s| crate::text::words(s)).collect();
        let ranked = rank(&sentences, &words, 2);
        assert_eq!(ranked[0], 1);
        assert!(ranked.contains(&3));
    }
}
