use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Local extraction algorithm requested by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Algorithm {
    #[default]
    TextRank,
    Lsa,
    Luhn,
    Abstractive,
    Smart,
}

impl Algorithm {
    pub const ALL: [Algorithm; 5] = [
        Algorithm::TextRank,
        Algorithm::Lsa,
        Algorithm::Luhn,
        Algorithm::Abstractive,
        Algorithm::Smart,
    ];

    /// Resolves a tag, falling back to [`Algorithm::TextRank`] for anything unknown.
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "lsa" => Self::Lsa,
            "luhn" => Self::Luhn,
            "abstractive" => Self::Abstractive,
            "smart" => Self::Smart,
            _ => Self::TextRank,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TextRank => "textrank",
            Self::Lsa => "lsa",
            Self::Luhn => "luhn",
            Self::Abstractive => "abstractive",
            Self::Smart => "smart",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::TextRank => "TextRank (Graph-based)",
            Self::Lsa => "LSA (Latent Semantic Analysis)",
            Self::Luhn => "Luhn (Frequency-based)",
            Self::Abstractive => "Abstractive (Concept-based)",
            Self::Smart => "Smart (Weighted scoring)",
        }
    }
}

/// Whether summarization runs locally or through the remote provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SmartOption {
    #[default]
    LocalSmart,
    OpenRouter,
}

impl SmartOption {
    pub const ALL: [SmartOption; 2] = [SmartOption::LocalSmart, SmartOption::OpenRouter];

    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "openrouter" | "remote_provider" => Self::OpenRouter,
            _ => Self::LocalSmart,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LocalSmart => "local_smart",
            Self::OpenRouter => "openrouter",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::LocalSmart => "Smart Summary (Local)",
            Self::OpenRouter => "AI Summary (OpenRouter)",
        }
    }

    #[must_use]
    pub const fn is_remote(self) -> bool {
        matches!(self, Self::OpenRouter)
    }
}

/// Shape of the rendered summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputType {
    #[default]
    Paragraph,
    Bullets,
    KeyPhrases,
}

impl OutputType {
    pub const ALL: [OutputType; 3] = [OutputType::Paragraph, OutputType::Bullets, OutputType::KeyPhrases];

    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "bullets" => Self::Bullets,
            "keyphrases" => Self::KeyPhrases,
            _ => Self::Paragraph,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Paragraph => "paragraph",
            Self::Bullets => "bullets",
            Self::KeyPhrases => "keyphrases",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Paragraph => "Paragraph",
            Self::Bullets => "Bullet Points",
            Self::KeyPhrases => "Key Phrases",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SummaryLength {
    Short,
    #[default]
    Medium,
    Long,
}

impl SummaryLength {
    pub const ALL: [SummaryLength; 3] = [SummaryLength::Short, SummaryLength::Medium, SummaryLength::Long];

    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "short" => Self::Short,
            "long" => Self::Long,
            _ => Self::Medium,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Short => "short",
            Self::Medium => "medium",
            Self::Long => "long",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Short => "Short (3 sentences)",
            Self::Medium => "Medium (5 sentences)",
            Self::Long => "Long (7 sentences)",
        }
    }

    /// Number of sentences the local strategies select.
    #[must_use]
    pub const fn sentence_count(self) -> usize {
        match self {
            Self::Short => 3,
            Self::Medium => 5,
            Self::Long => 7,
        }
    }
}

/// Raw request as it arrives from the outer surface. Tags are kept as strings
/// so unknown values resolve to defaults instead of failing deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SummarizeRequest {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub algorithm: Option<String>,
    #[serde(default)]
    pub smart_option: Option<String>,
    #[serde(default, rename = "type")]
    pub output_type: Option<String>,
    #[serde(default)]
    pub length: Option<String>,
}

impl SummarizeRequest {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = Some(algorithm.as_str().to_string());
        self
    }

    #[must_use]
    pub fn with_smart_option(mut self, option: SmartOption) -> Self {
        self.smart_option = Some(option.as_str().to_string());
        self
    }

    #[must_use]
    pub fn with_output_type(mut self, output_type: OutputType) -> Self {
        self.output_type = Some(output_type.as_str().to_string());
        self
    }

    #[must_use]
    pub fn with_length(mut self, length: SummaryLength) -> Self {
        self.length = Some(length.as_str().to_string());
        self
    }

    #[must_use]
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm.as_deref().map(Algorithm::from_tag).unwrap_or_default()
    }

    #[must_use]
    pub fn smart_option(&self) -> SmartOption {
        self.smart_option.as_deref().map(SmartOption::from_tag).unwrap_or_default()
    }

    #[must_use]
    pub fn output_type(&self) -> OutputType {
        self.output_type.as_deref().map(OutputType::from_tag).unwrap_or_default()
    }

    #[must_use]
    pub fn length(&self) -> SummaryLength {
        self.length.as_deref().map(SummaryLength::from_tag).unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    pub original_word_count: usize,
    pub summary_word_count: usize,
    pub reduction_percentage: f64,
    pub original_reading_time_minutes: usize,
    pub summary_reading_time_minutes: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryResponse {
    pub original_text: String,
    pub summary: String,
    pub algorithm: String,
    pub smart_option: String,
    #[serde(rename = "type")]
    pub output_type: String,
    pub length: String,
    pub statistics: Statistics,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_available: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retry_after_seconds: Option<u64>,
}

/// Snapshot of the remote gateway's rate-limit state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayStatus {
    pub minute_requests: usize,
    pub minute_limit: usize,
    pub daily_requests: usize,
    pub daily_limit: usize,
    pub is_rate_limited: bool,
    pub cooldown_seconds: u64,
}

/// Tag to label catalogue for every request field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryOptions {
    pub algorithms: BTreeMap<String, String>,
    pub smart_options: BTreeMap<String, String>,
    pub types: BTreeMap<String, String>,
    pub lengths: BTreeMap<String, String>,
}

#[must_use]
pub fn summary_options() -> SummaryOptions {
    fn catalogue<T: Copy>(items: &[T], tag: fn(T) -> &'static str, label: fn(T) -> &'static str) -> BTreeMap<String, String> {
        items
            .iter()
            .map(|&item| (tag(item).to_string(), label(item).to_string()))
            .collect()
    }

    SummaryOptions {
        algorithms: catalogue(&Algorithm::ALL, Algorithm::as_str, Algorithm::label),
        smart_options: catalogue(&SmartOption::ALL, SmartOption::as_str, SmartOption::label),
        types: catalogue(&OutputType::ALL, OutputType::as_str, OutputType::label),
        lengths: catalogue(&SummaryLength::ALL, SummaryLength::as_str, SummaryLength::label),
    }
}
