use super::formatter;
use crate::text::tokenizer::{clean_text, raw_word_count, split_sentences, words};

/// Inputs with fewer whitespace-delimited words than this are returned unchanged.
pub const MIN_WORDS_TO_SUMMARIZE: usize = 20;

/// A cleaned input text and its sentence segmentation. Lives for one request.
#[derive(Debug, Clone)]
pub struct Document {
    cleaned: String,
    sentences: Vec<String>,
}

impl Document {
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let cleaned = clean_text(text);
        let sentences = split_sentences(&cleaned);
        Self { cleaned, sentences }
    }

    #[must_use]
    pub fn cleaned(&self) -> &str {
        &self.cleaned
    }

    #[must_use]
    pub fn sentences(&self) -> &[String] {
        &self.sentences
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    #[must_use]
    pub fn word_count(&self) -> usize {
        raw_word_count(&self.cleaned)
    }

    #[must_use]
    pub fn is_too_short(&self) -> bool {
        self.word_count() < MIN_WORDS_TO_SUMMARIZE
    }

    /// Filtered tokens of every sentence, index-aligned with [`Document::sentences`].
    #[must_use]
    pub fn sentence_words(&self) -> Vec<Vec<String>> {
        self.sentences.iter().map(|s| words(s)).collect()
    }
}

/// What a local strategy decided to keep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extract {
    /// The document is returned as cleaned, without selection.
    Unchanged,
    /// Sentence indices, strictly increasing.
    Selected(Vec<usize>),
}

impl Extract {
    /// Sentences kept by this extract. `Unchanged` keeps all of them.
    #[must_use]
    pub fn sentences<'a>(&self, doc: &'a Document) -> Vec<&'a str> {
        match self {
            Extract::Unchanged => doc.sentences().iter().map(String::as_str).collect(),
            Extract::Selected(indices) => indices
                .iter()
                .filter_map(|&i| doc.sentences().get(i).map(String::as_str))
                .collect(),
        }
    }

    /// Paragraph rendering: the cleaned text when unchanged, otherwise the
    /// selected sentences joined by single spaces.
    #[must_use]
    pub fn render(&self, doc: &Document) -> String {
        match self {
            Extract::Unchanged => doc.cleaned().to_string(),
            Extract::Selected(_) => formatter::paragraph(&self.sentences(doc)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_cleans_and_segments() {
        let doc = Document::parse("  One   two. Three\nfour!  ");
        assert_eq!(doc.cleaned(), "One two. Three four!");
        assert_eq!(doc.sentences(), &["One two.".to_string(), "Three four!".to_string()]);
        assert_eq!(doc.word_count(), 4);
        assert!(doc.is_too_short());
    }

    #[test]
    fn selected_extract_renders_in_index_order() {
        let doc = Document::parse("A one. B two. C three.");
        let extract = Extract::Selected(vec![0, 2]);
        assert_eq!(extract.render(&doc), "A one. C three.");
    }

    #[test]
    fn unchanged_extract_renders_cleaned_text() {
        let doc = Document::parse("Short   text here");
        assert_eq!(Extract::Unchanged.render(&doc), "Short text here");
    }
}
