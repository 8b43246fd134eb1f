//! Request orchestration: local strategy or remote gateway, then shaping and
//! statistics.

use std::sync::Arc;

use serde_json::{Value, json};
use tracing::{Instrument, error, info, info_span};
use uuid::Uuid;

use crate::ai::Gateway;
use crate::core::config::AppConfig;
use crate::core::models::{
    ErrorResponse, GatewayStatus, SummarizeRequest, SummaryOptions, SummaryResponse, summary_options,
};
use crate::errors::SummarizeError;
use crate::summarizer::{Document, formatter, strategies};
use crate::text::stats;

#[derive(Debug, Clone)]
pub struct Summarizer {
    gateway: Arc<Gateway>,
}

impl Summarizer {
    /// The gateway is shared so every caller sees the same rate-limit state.
    #[must_use]
    pub fn new(gateway: Arc<Gateway>) -> Self {
        Self { gateway }
    }

    /// # Errors
    ///
    /// Returns `SummarizeError::Config` if the remote client cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, SummarizeError> {
        Ok(Self::new(Arc::new(Gateway::from_config(config)?)))
    }

    /// Summarizes one request.
    ///
    /// Remote failures are returned as errors and never fall back to a local
    /// strategy; the caller decides whether to retry locally.
    ///
    /// # Errors
    ///
    /// - `SummarizeError::InvalidInput` for missing or blank text
    /// - any gateway error when the remote option is selected
    pub async fn summarize(&self, request: &SummarizeRequest) -> Result<SummaryResponse, SummarizeError> {
        let correlation_id = Uuid::new_v4();
        let span = info_span!("summarize", %correlation_id);
        self.summarize_inner(request).instrument(span).await
    }

    async fn summarize_inner(&self, request: &SummarizeRequest) -> Result<SummaryResponse, SummarizeError> {
        let text = request
            .text
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| SummarizeError::InvalidInput("No text provided".to_string()))?;

        let algorithm = request.algorithm();
        let smart_option = request.smart_option();
        let output_type = request.output_type();
        let length = request.length();
        let count = length.sentence_count();

        info!(
            algorithm = algorithm.as_str(),
            smart_option = smart_option.as_str(),
            output_type = output_type.as_str(),
            length = length.as_str(),
            input_chars = text.chars().count(),
            "Summarization requested"
        );

        let summary = if smart_option.is_remote() {
            let prose = self.gateway.summarize(text, length).await?;
            formatter::render_remote(&prose, output_type, count)
        } else {
            let doc = Document::parse(text);
            let extract = strategies::summarize(&doc, algorithm, count);
            formatter::render_local(&doc, &extract, output_type, count)
        };

        let statistics = stats::compute(text, &summary);
        info!(
            summary_words = statistics.summary_word_count,
            reduction = statistics.reduction_percentage,
            "Summarization finished"
        );

        Ok(SummaryResponse {
            original_text: text.to_string(),
            summary,
            algorithm: algorithm.as_str().to_string(),
            smart_option: smart_option.as_str().to_string(),
            output_type: output_type.as_str().to_string(),
            length: length.as_str().to_string(),
            statistics,
            status: "success".to_string(),
        })
    }

    /// Runs [`Summarizer::summarize`] and wraps the outcome in the JSON
    /// envelope the outer surface returns.
    pub async fn respond(&self, request: &SummarizeRequest) -> Value {
        match self.summarize(request).await {
            Ok(response) => json!(response),
            Err(e) => {
                error!(error = %e, status = e.status_code(), "Summarization failed");
                json!(error_response(&e, request.smart_option().is_remote()))
            }
        }
    }

    #[must_use]
    pub fn gateway_status(&self) -> GatewayStatus {
        self.gateway.status()
    }

    #[must_use]
    pub fn options(&self) -> SummaryOptions {
        summary_options()
    }
}

/// Error envelope. The fallback hint is only offered when the remote path
/// failed, since retrying locally is then a meaningful choice.
#[must_use]
pub fn error_response(error: &SummarizeError, remote: bool) -> ErrorResponse {
    ErrorResponse {
        error: error.to_string(),
        status: "error".to_string(),
        fallback_available: (remote && !matches!(error, SummarizeError::InvalidInput(_))).then_some(true),
        retry_after_seconds: error.retry_after_secs(),
    }
}
