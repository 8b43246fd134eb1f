//! Strategy dispatch for local summarization

use tracing::debug;

use super::document::{Document, Extract};
use super::{abstractive, lsa, luhn, scorer, textrank};
use crate::core::models::Algorithm;

/// Candidate multiplier for the graph, matrix and frequency algorithms: they
/// nominate this many times the target, then the scorer picks the final set.
const CANDIDATE_FACTOR: usize = 2;

/// Reduces `doc` to at most `count` sentences using `algorithm`.
///
/// Documents under the minimum word count come back `Unchanged`. When
/// `count` covers every sentence, all of them are selected. A strategy that
/// selects nothing degrades to `Unchanged` instead of failing.
#[must_use]
pub fn summarize(doc: &Document, algorithm: Algorithm, count: usize) -> Extract {
    if doc.is_too_short() || doc.is_empty() {
        debug!(words = doc.word_count(), "Document too short to summarize");
        return Extract::Unchanged;
    }

    let count = count.max(1);
    let total = doc.len();
    if count >= total {
        return Extract::Selected((0..total).collect());
    }

    let selected = match algorithm {
        Algorithm::Smart => smart(doc, count),
        Algorithm::TextRank => blended(doc, count, |words, limit| textrank::rank(words, limit)),
        Algorithm::Lsa => blended(doc, count, |words, limit| lsa::rank(words, limit)),
        Algorithm::Luhn => blended(doc, count, |words, limit| luhn::rank(doc.sentences(), words, limit)),
        Algorithm::Abstractive => abstractive::select(doc, count),
    };

    debug!(
        algorithm = algorithm.as_str(),
        requested = count,
        selected = selected.len(),
        "Local strategy finished"
    );

    if selected.is_empty() {
        Extract::Unchanged
    } else {
        Extract::Selected(selected)
    }
}

/// Top `count` sentences by the weighted scorer, in document order.
#[must_use]
pub fn smart(doc: &Document, count: usize) -> Vec<usize> {
    scorer::score(doc.sentences(), doc.cleaned()).top_in_order(count)
}

/// Lets `rank` nominate `2 * count` candidates, then keeps the `count` the
/// weighted scorer prefers among them.
fn blended<F>(doc: &Document, count: usize, rank: F) -> Vec<usize>
where
    F: Fn(&[Vec<String>], usize) -> Vec<usize>,
{
    let sentence_words = doc.sentence_words();
    let candidates = rank(&sentence_words[..], count * CANDIDATE_FACTOR);
    let scores = scorer::score(doc.sentences(), doc.cleaned());
    let kept = scores.rerank(&candidates, count);

    if kept.is_empty() {
        let mut fallback: Vec<usize> = candidates.into_iter().take(count).collect();
        fallback.sort_unstable();
        fallback
    } else {
        kept
    }
}
