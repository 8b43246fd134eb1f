//! Concept-density selection ("pseudo-abstractive")
//!
//! No new text is generated: sentences dense in the document's key concepts
//! are picked first, the scorer fills any remaining slots, and the result is
//! put back in document order.

use std::collections::HashSet;

use tracing::debug;

use super::document::Document;
use super::scorer;
use crate::text::tokenizer::WordFrequencies;

const KEY_CONCEPT_COUNT: usize = 10;
const KEY_CONCEPT_MIN_LEN: usize = 3;
const MIN_CONCEPT_HITS: usize = 2;

/// The ten most frequent non-stop alphabetic tokens longer than three characters.
#[must_use]
pub fn key_concepts(text: &str) -> Vec<String> {
    WordFrequencies::of_text(text)
        .most_common(KEY_CONCEPT_COUNT, KEY_CONCEPT_MIN_LEN)
        .into_iter()
        .map(|(word, _)| word.to_string())
        .collect()
}

/// Picks `count` sentence indices, returned in document order.
#[must_use]
pub fn select(doc: &Document, count: usize) -> Vec<usize> {
    let concepts: HashSet<String> = key_concepts(doc.cleaned()).into_iter().collect();
    let sentence_words = doc.sentence_words();

    let mut dense: Vec<(usize, usize)> = sentence_words
        .iter()
        .enumerate()
        .map(|(i, tokens)| {
            let distinct: HashSet<&String> = tokens.iter().filter(|t| concepts.contains(*t)).collect();
            (i, distinct.len())
        })
        .filter(|&(_, hits)| hits >= MIN_CONCEPT_HITS)
        .collect();
    dense.sort_by(|a, b| b.1.cmp(&a.1));

    let mut chosen: Vec<usize> = dense.into_iter().take(count).map(|(i, _)| i).collect();
    debug!(
        concepts = concepts.len(),
        concept_dense = chosen.len(),
        "Selected concept-dense sentences"
    );

    if chosen.len() < count {
        let scores = scorer::score(doc.sentences(), doc.cleaned());
        let missing = count - chosen.len();
        let fill: Vec<usize> = scores
            .ranked()
            .into_iter()
            .filter(|i| !chosen.contains(i))
            .take(missing)
            .collect();
        chosen.extend(fill);
    }

    chosen.sort_unstable();
    chosen
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_concepts_skip_short_and_stop_words() {
        let concepts = key_concepts("The cat and the dog chased the network. Network packets flow.");
        assert_eq!(concepts[0], "network");
        assert!(!concepts.iter().any(|c| c == "cat" || c == "the"));
    }

    #[test]
    fn concept_dense_sentences_win_and_order_is_restored() {
        let doc = Document::parse(
            "Compilers translate source code into machine code. \
             It was a hot day in May. \
             Optimizing compilers rewrite source code for speed. \
             The sun set at ten. \
             Machine code from compilers runs directly on hardware.",
        );
        // Sentence 2 hits six key concepts, sentences 0 and 4 five each; the
        // earlier of the tied pair wins.
        assert_eq!(select(&doc, 2), vec![0, 2]);
    }

    #[test]
    fn scorer_fills_when_too_few_sentences_are_dense() {
        let doc = Document::parse(
            "A big cat sat. Two red dogs ran. The old owl saw it.",
        );
        let picked = select(&doc, 2);
        assert_eq!(picked.len(), 2);
        assert!(picked.windows(2).all(|w| w[0] < w[1]));
    }
}
