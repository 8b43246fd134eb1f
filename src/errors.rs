use thiserror::Error;

#[derive(Debug, Error)]
pub enum SummarizeError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Rate limit exceeded: {message}")]
    RateLimited {
        message: String,
        retry_after_secs: u64,
    },

    #[error("Provider rejected credentials: {0}")]
    ProviderAuth(String),

    #[error("Provider quota exhausted: {0}")]
    ProviderQuota(String),

    #[error("Provider unreachable: {0}")]
    ProviderUnavailable(String),

    #[error("Malformed provider response: {0}")]
    MalformedResponse(String),

    #[error("Provider error: {0}")]
    Provider(String),
}

impl SummarizeError {
    /// Whether the same request may succeed if retried later without operator action.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::RateLimited { .. } | Self::ProviderUnavailable(_) | Self::Provider(_)
        )
    }

    /// HTTP-equivalent status for outer surfaces.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::InvalidInput(_) => 400,
            Self::Config(_) => 500,
            Self::RateLimited { .. } => 429,
            Self::ProviderAuth(_) => 401,
            Self::ProviderQuota(_) => 402,
            Self::ProviderUnavailable(_) => 504,
            Self::MalformedResponse(_) | Self::Provider(_) => 502,
        }
    }

    #[must_use]
    pub const fn retry_after_secs(&self) -> Option<u64> {
        match self {
            Self::RateLimited {
                retry_after_secs, ..
            } => Some(*retry_after_secs),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for SummarizeError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() || error.is_connect() || error.is_request() {
            SummarizeError::ProviderUnavailable(error.to_string())
        } else if error.is_decode() {
            SummarizeError::MalformedResponse(error.to_string())
        } else {
            SummarizeError::Provider(error.to_string())
        }
    }
}

impl From<anyhow::Error> for SummarizeError {
    fn from(error: anyhow::Error) -> Self {
        SummarizeError::Provider(error.to_string())
    }
}
