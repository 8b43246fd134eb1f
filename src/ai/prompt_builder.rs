use crate::core::models::SummaryLength;

/// Input longer than this many characters is cut before it is sent.
pub const MAX_INPUT_CHARS: usize = 8000;

/// Appended to input that was cut at [`MAX_INPUT_CHARS`].
pub const TRUNCATION_MARKER: &str = "...";

const SYSTEM_PROMPT: &str = "You are a precise summarization assistant. \
    Write the summary as plain flowing prose in complete sentences. \
    Do not use lists, headings, markdown or introductory phrases, and do not \
    add commentary about the summary itself.";

/// A fully prepared provider call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderRequest {
    pub system: String,
    pub user: String,
    pub max_tokens: u32,
}

/// Sentence range and output-token budget for each length.
#[must_use]
pub const fn length_budget(length: SummaryLength) -> (&'static str, u32) {
    match length {
        SummaryLength::Short => ("2-3", 150),
        SummaryLength::Medium => ("3-4", 250),
        SummaryLength::Long => ("5-7", 400),
    }
}

/// Drops control characters (newlines and tabs survive) and hard-truncates
/// to [`MAX_INPUT_CHARS`], marking the cut with [`TRUNCATION_MARKER`].
#[must_use]
pub fn prepare_input(raw: &str) -> String {
    let cleaned: String = raw
        .chars()
        .filter(|&c| !c.is_control() || c == '\n' || c == '\t')
        .collect();

    if cleaned.chars().count() <= MAX_INPUT_CHARS {
        return cleaned;
    }
    let mut truncated: String = cleaned.chars().take(MAX_INPUT_CHARS).collect();
    truncated.push_str(TRUNCATION_MARKER);
    truncated
}

#[must_use]
pub fn build_request(text: &str, length: SummaryLength) -> ProviderRequest {
    let (sentences, max_tokens) = length_budget(length);
    ProviderRequest {
        system: SYSTEM_PROMPT.to_string(),
        user: format!(
            "Summarize the following text in {sentences} sentences.\n\nTEXT:\n{}",
            prepare_input(text)
        ),
        max_tokens,
    }
}
