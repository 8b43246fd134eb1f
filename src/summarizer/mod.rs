//! Local extractive summarization
//!
//! Pure functions over request-local text: segmentation, scoring, the
//! interchangeable ranking algorithms and output shaping.

pub mod abstractive;
pub mod document;
pub mod formatter;
pub mod lsa;
pub mod luhn;
pub mod scorer;
pub mod strategies;
pub mod textrank;

pub use document::{Document, Extract, MIN_WORDS_TO_SUMMARIZE};
pub use strategies::summarize;

/// Indices of the `limit` highest scores, best first; ties keep index order.
pub(crate) fn top_indices(scores: &[f64], limit: usize) -> Vec<usize> {
    let mut indexed: Vec<(usize, f64)> = scores.iter().copied().enumerate().collect();
    indexed.sort_by(|a, b| b.1.total_cmp(&a.1));
    indexed.into_iter().take(limit).map(|(i, _)| i).collect()
}
