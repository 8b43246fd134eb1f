//! Remote summarization provider (`OpenRouter`) client
//!
//! Encapsulates the single outbound chat-completions call and maps every
//! failure mode onto a distinct [`SummarizeError`] category.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::{Value, json};
use std::time::Duration;
use tracing::{info, warn};
use url::Url;

use super::prompt_builder::ProviderRequest;
use crate::core::config::AppConfig;
use crate::errors::SummarizeError;

const TEMPERATURE: f64 = 0.3;
const ERROR_BODY_PREVIEW_CHARS: usize = 300;

#[async_trait]
pub trait SummaryProvider: Send + Sync {
    /// Whether a credential is available. Unconfigured providers are never called.
    fn is_configured(&self) -> bool {
        true
    }

    /// Performs one call bounded by `timeout` and returns the raw summary text.
    async fn summarize(
        &self,
        request: &ProviderRequest,
        timeout: Duration,
    ) -> Result<String, SummarizeError>;
}

/// Maps a non-success HTTP status to an error category.
#[must_use]
pub fn classify_status(status: StatusCode, body: &str) -> SummarizeError {
    let preview: String = body.chars().take(ERROR_BODY_PREVIEW_CHARS).collect();
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            SummarizeError::ProviderAuth(format!("Invalid API key (status {status}): {preview}"))
        }
        StatusCode::PAYMENT_REQUIRED => {
            SummarizeError::ProviderQuota(format!("Insufficient credits (status {status}): {preview}"))
        }
        StatusCode::TOO_MANY_REQUESTS => SummarizeError::RateLimited {
            message: format!("provider throttled the request: {preview}"),
            retry_after_secs: 0,
        },
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            SummarizeError::ProviderUnavailable(format!("Provider timed out (status {status})"))
        }
        _ => SummarizeError::Provider(format!("Provider error (status {status}): {preview}")),
    }
}

/// Pulls `choices[0].message.content` out of a chat-completions response.
///
/// # Errors
///
/// Returns `SummarizeError::MalformedResponse` when the field is missing or blank.
pub fn extract_content(response: &Value) -> Result<String, SummarizeError> {
    let content = response
        .get("choices")
        .and_then(|c| c.get(0))
        .and_then(|choice| choice.get("message"))
        .and_then(|message| message.get("content"))
        .and_then(Value::as_str)
        .ok_or_else(|| SummarizeError::MalformedResponse("No message content in response".to_string()))?;

    if content.trim().is_empty() {
        return Err(SummarizeError::MalformedResponse("Empty message content".to_string()));
    }
    Ok(content.to_string())
}

/// `OpenRouter` chat-completions client
pub struct OpenRouterClient {
    api_key: Option<String>,
    model_name: String,
    endpoint: Url,
    http: Client,
}

impl std::fmt::Debug for OpenRouterClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenRouterClient")
            .field("configured", &self.api_key.is_some())
            .field("model_name", &self.model_name)
            .field("endpoint", &self.endpoint.as_str())
            .finish_non_exhaustive()
    }
}

impl OpenRouterClient {
    /// # Errors
    ///
    /// Returns `SummarizeError::Config` if the endpoint URL cannot be derived
    /// from the configured base URL or the HTTP client cannot be built.
    pub fn new(config: &AppConfig) -> Result<Self, SummarizeError> {
        let http = Client::builder()
            .build()
            .map_err(|e| SummarizeError::Config(format!("Failed to build OpenRouter HTTP client: {e}")))?;
        Self::with_http(config, http)
    }

    /// Same as [`OpenRouterClient::new`] with a caller-supplied HTTP client.
    ///
    /// # Errors
    ///
    /// Returns `SummarizeError::Config` if the endpoint URL cannot be derived
    /// from the configured base URL.
    pub fn with_http(config: &AppConfig, http: Client) -> Result<Self, SummarizeError> {
        let endpoint = Url::parse(&format!(
            "{}/chat/completions",
            config.openrouter_base_url.as_str().trim_end_matches('/')
        ))
        .map_err(|e| SummarizeError::Config(format!("Invalid OpenRouter endpoint: {e}")))?;

        Ok(Self {
            api_key: config.openrouter_api_key.clone(),
            model_name: config.openrouter_model.clone(),
            endpoint,
            http,
        })
    }

    #[must_use]
    pub fn request_body(&self, request: &ProviderRequest) -> Value {
        json!({
            "model": self.model_name,
            "messages": [
                { "role": "system", "content": request.system },
                { "role": "user", "content": request.user }
            ],
            "max_tokens": request.max_tokens,
            "temperature": TEMPERATURE
        })
    }
}

#[async_trait]
impl SummaryProvider for OpenRouterClient {
    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn summarize(
        &self,
        request: &ProviderRequest,
        timeout: Duration,
    ) -> Result<String, SummarizeError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            SummarizeError::Config("OpenRouter API key not found (set OPENROUTER_API_KEY)".to_string())
        })?;

        #[cfg(feature = "debug-logs")]
        info!("Using OpenRouter prompt:\n{:?}", request);

        #[cfg(not(feature = "debug-logs"))]
        info!(
            model = %self.model_name,
            input_chars = request.user.chars().count(),
            max_tokens = request.max_tokens,
            "Requesting summary from OpenRouter"
        );

        let response = self
            .http
            .post(self.endpoint.clone())
            .timeout(timeout)
            .bearer_auth(api_key)
            .header("Content-Type", "application/json")
            .header("X-Title", "condense")
            .json(&self.request_body(request))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SummarizeError::ProviderUnavailable(format!(
                        "OpenRouter request timed out after {}s",
                        timeout.as_secs()
                    ))
                } else {
                    SummarizeError::ProviderUnavailable(format!("OpenRouter request failed: {e}"))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_else(|e| {
                format!("Failed to read error response body (status {status}): {e}")
            });
            warn!(status = status.as_u16(), "OpenRouter returned an error status");
            return Err(classify_status(status, &error_text));
        }

        // Body decode failures convert to MalformedResponse.
        let response_json: Value = response.json().await?;

        extract_content(&response_json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::prompt_builder::build_request;
    use crate::core::models::SummaryLength;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Answers a single HTTP request with `status_line` and `body`, returning
    /// a base URL that points at it.
    async fn serve_once(status_line: &'static str, body: &'static str) -> Url {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0_u8; 4096];
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
                let text = String::from_utf8_lossy(&request);
                if let Some(head_end) = text.find("\r\n\r\n") {
                    let content_length = text[..head_end]
                        .lines()
                        .find_map(|l| {
                            let (name, value) = l.split_once(':')?;
                            name.eq_ignore_ascii_case("content-length")
                                .then(|| value.trim().parse::<usize>().ok())
                                .flatten()
                        })
                        .unwrap_or(0);
                    if request.len() >= head_end + 4 + content_length {
                        break;
                    }
                }
            }
            let response = format!(
                "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
        });
        Url::parse(&format!("http://{addr}/api/v1")).unwrap()
    }

    fn client_for(base: Url) -> OpenRouterClient {
        let config = AppConfig {
            openrouter_api_key: Some("key".into()),
            openrouter_base_url: base,
            ..AppConfig::default()
        };
        let http = Client::builder().no_proxy().build().unwrap();
        OpenRouterClient::with_http(&config, http).unwrap()
    }

    #[test]
    fn status_codes_map_to_distinct_categories() {
        assert!(matches!(
            classify_status(StatusCode::UNAUTHORIZED, "bad key"),
            SummarizeError::ProviderAuth(_)
        ));
        assert!(matches!(
            classify_status(StatusCode::PAYMENT_REQUIRED, ""),
            SummarizeError::ProviderQuota(_)
        ));
        assert!(matches!(
            classify_status(StatusCode::TOO_MANY_REQUESTS, ""),
            SummarizeError::RateLimited { .. }
        ));
        assert!(matches!(
            classify_status(StatusCode::INTERNAL_SERVER_ERROR, "oops"),
            SummarizeError::Provider(_)
        ));
    }

    #[test]
    fn extract_content_reads_first_choice() {
        let body = json!({ "choices": [ { "message": { "role": "assistant", "content": "A summary." } } ] });
        assert_eq!(extract_content(&body).unwrap(), "A summary.");
    }

    #[test]
    fn missing_or_blank_content_is_malformed() {
        assert!(matches!(
            extract_content(&json!({ "choices": [] })),
            Err(SummarizeError::MalformedResponse(_))
        ));
        assert!(matches!(
            extract_content(&json!({ "choices": [ { "message": { "content": "   " } } ] })),
            Err(SummarizeError::MalformedResponse(_))
        ));
    }

    #[test]
    fn request_body_carries_model_messages_and_budget() {
        let config = AppConfig {
            openrouter_api_key: Some("key".into()),
            ..AppConfig::default()
        };
        let client = OpenRouterClient::new(&config).unwrap();
        let body = client.request_body(&build_request("Hello there.", SummaryLength::Short));
        assert_eq!(body["model"], config.openrouter_model.as_str());
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(body["max_tokens"], 150);
        assert_eq!(client.endpoint.as_str(), "https://openrouter.ai/api/v1/chat/completions");
    }

    #[tokio::test]
    async fn unconfigured_client_fails_without_network() {
        let client = OpenRouterClient::new(&AppConfig::default()).unwrap();
        assert!(!client.is_configured());
        let err = client
            .summarize(&build_request("text", SummaryLength::Medium), Duration::from_secs(1))
            .await
            .unwrap_err();
        assert!(matches!(err, SummarizeError::Config(_)));
    }

    #[tokio::test]
    async fn successful_response_yields_message_content() {
        let base = serve_once("200 OK", r#"{"choices":[{"message":{"content":"Short summary."}}]}"#).await;
        let summary = client_for(base)
            .summarize(&build_request("text", SummaryLength::Short), Duration::from_secs(5))
            .await
            .unwrap();
        assert_eq!(summary, "Short summary.");
    }

    #[tokio::test]
    async fn undecodable_body_is_malformed() {
        let base = serve_once("200 OK", "not json!").await;
        let err = client_for(base)
            .summarize(&build_request("text", SummaryLength::Short), Duration::from_secs(5))
            .await
            .unwrap_err();
        assert!(matches!(err, SummarizeError::MalformedResponse(_)), "{err:?}");
    }

    #[tokio::test]
    async fn rejected_key_is_an_auth_error() {
        let base = serve_once("401 Unauthorized", r#"{"error":"invalid key"}"#).await;
        let err = client_for(base)
            .summarize(&build_request("text", SummaryLength::Short), Duration::from_secs(5))
            .await
            .unwrap_err();
        assert!(matches!(err, SummarizeError::ProviderAuth(_)));
    }
}
