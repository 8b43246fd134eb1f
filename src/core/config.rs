use std::env;
use std::time::Duration;

use url::Url;

use crate::errors::SummarizeError;

pub const DEFAULT_MODEL: &str = "mistralai/mistral-7b-instruct:free";
pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub openrouter_api_key: Option<String>,
    pub openrouter_model: String,
    pub openrouter_base_url: Url,
    pub request_timeout: Duration,
}

impl AppConfig {
    /// Loads provider settings from the environment.
    ///
    /// A missing API key is not an error here; the remote path reports it
    /// when it is actually used.
    pub fn from_env() -> Result<Self, SummarizeError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, SummarizeError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let openrouter_api_key = lookup("OPENROUTER_API_KEY").filter(|k| !k.trim().is_empty());

        let openrouter_model = lookup("OPENROUTER_MODEL")
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let raw_base = lookup("OPENROUTER_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let openrouter_base_url = Url::parse(raw_base.trim_end_matches('/'))
            .map_err(|e| SummarizeError::Config(format!("OPENROUTER_BASE_URL: {e}")))?;

        let timeout_secs = match lookup("OPENROUTER_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map_err(|e| SummarizeError::Config(format!("OPENROUTER_TIMEOUT_SECS: {e}")))?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            openrouter_api_key,
            openrouter_model,
            openrouter_base_url,
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            openrouter_api_key: None,
            openrouter_model: DEFAULT_MODEL.to_string(),
            openrouter_base_url: Url::parse(DEFAULT_BASE_URL).expect("default base url is valid"),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}
