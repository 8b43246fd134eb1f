//! Rate-limited access to the remote summarization provider
//!
//! The gateway is the only path to the provider. Every call is gated by the
//! [`RateLimiter`]; only calls the provider confirmed are counted, and a
//! provider-side "too many requests" forces a cooldown on our side too.

use std::sync::Arc;
use std::time::Duration;

use chrono::TimeDelta;
use tracing::{info, warn};

use super::client::{OpenRouterClient, SummaryProvider};
use super::clock::SystemClock;
use super::normalizer::normalize;
use super::prompt_builder::build_request;
use super::rate_limiter::RateLimiter;
use crate::core::config::AppConfig;
use crate::core::models::{GatewayStatus, SummaryLength};
use crate::errors::SummarizeError;

/// Cooldown applied when the provider itself throttles us.
pub const PROVIDER_COOLDOWN: TimeDelta = TimeDelta::minutes(5);

pub struct Gateway {
    limiter: RateLimiter,
    provider: Arc<dyn SummaryProvider>,
    timeout: Duration,
}

impl std::fmt::Debug for Gateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gateway")
            .field("limiter", &self.limiter)
            .field("configured", &self.provider.is_configured())
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl Gateway {
    #[must_use]
    pub fn new(provider: Arc<dyn SummaryProvider>, limiter: RateLimiter, timeout: Duration) -> Self {
        Self {
            limiter,
            provider,
            timeout,
        }
    }

    /// Builds the production gateway: `OpenRouter` client, wall clock and the
    /// configured request timeout.
    ///
    /// # Errors
    ///
    /// Returns `SummarizeError::Config` if the client cannot be constructed.
    pub fn from_config(config: &AppConfig) -> Result<Self, SummarizeError> {
        let provider = OpenRouterClient::new(config)?;
        Ok(Self::new(
            Arc::new(provider),
            RateLimiter::new(Arc::new(SystemClock)),
            config.request_timeout,
        ))
    }

    /// Requests a normalized summary of `text` sized for `length`.
    ///
    /// # Errors
    ///
    /// - `SummarizeError::Config` when no credential is configured
    /// - `SummarizeError::RateLimited` when a window is full, a cooldown is
    ///   active, or the provider throttled this call
    /// - any provider failure category, unchanged
    /// - `SummarizeError::MalformedResponse` when normalization leaves nothing
    pub async fn summarize(&self, text: &str, length: SummaryLength) -> Result<String, SummarizeError> {
        if !self.provider.is_configured() {
            return Err(SummarizeError::Config(
                "OpenRouter API key not found (set OPENROUTER_API_KEY)".to_string(),
            ));
        }

        let permit = self.limiter.try_acquire()?;
        let request = build_request(text, length);

        match self.provider.summarize(&request, self.timeout).await {
            Ok(raw) => {
                permit.record();
                let summary = normalize(&raw);
                if summary.is_empty() {
                    return Err(SummarizeError::MalformedResponse(
                        "Provider returned only boilerplate".to_string(),
                    ));
                }
                info!(summary_chars = summary.chars().count(), "Provider summary received");
                Ok(summary)
            }
            Err(SummarizeError::RateLimited { message, .. }) => {
                drop(permit);
                self.limiter.force_cooldown(PROVIDER_COOLDOWN);
                let retry_after_secs = u64::try_from(PROVIDER_COOLDOWN.num_seconds()).unwrap_or(0);
                warn!(retry_after_secs, "Provider throttled the request; cooling down");
                Err(SummarizeError::RateLimited {
                    message,
                    retry_after_secs,
                })
            }
            Err(e) => {
                warn!(error = %e, "Provider call failed");
                Err(e)
            }
        }
    }

    #[must_use]
    pub fn status(&self) -> GatewayStatus {
        self.limiter.status()
    }
}
