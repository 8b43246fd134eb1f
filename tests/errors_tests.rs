use std::error::Error;
use condense::errors::SummarizeError;

#[test]
fn test_summarize_error_implements_error_trait() {
    fn assert_error<T: Error>(_: &T) {}

    let error = SummarizeError::InvalidInput("test error".to_string());
    assert_error(&error);
}

#[test]
fn test_summarize_error_display() {
    let error = SummarizeError::InvalidInput("No text provided".to_string());
    assert_eq!(format!("{error}"), "Invalid input: No text provided");

    let error = SummarizeError::RateLimited {
        message: "per-minute limit reached".to_string(),
        retry_after_secs: 60,
    };
    assert_eq!(format!("{error}"), "Rate limit exceeded: per-minute limit reached");

    let error = SummarizeError::ProviderQuota("no credits".to_string());
    assert_eq!(format!("{error}"), "Provider quota exhausted: no credits");
}

#[test]
fn test_retryable_categories() {
    assert!(SummarizeError::RateLimited { message: String::new(), retry_after_secs: 1 }.is_retryable());
    assert!(SummarizeError::ProviderUnavailable("timeout".into()).is_retryable());
    assert!(!SummarizeError::ProviderAuth("bad key".into()).is_retryable());
    assert!(!SummarizeError::ProviderQuota("empty".into()).is_retryable());
    assert!(!SummarizeError::MalformedResponse("garbage".into()).is_retryable());
    assert!(!SummarizeError::InvalidInput("empty".into()).is_retryable());
}

#[test]
fn test_status_codes() {
    assert_eq!(SummarizeError::InvalidInput(String::new()).status_code(), 400);
    assert_eq!(SummarizeError::Config(String::new()).status_code(), 500);
    assert_eq!(SummarizeError::ProviderAuth(String::new()).status_code(), 401);
    assert_eq!(SummarizeError::ProviderUnavailable(String::new()).status_code(), 504);
    assert_eq!(
        SummarizeError::RateLimited { message: String::new(), retry_after_secs: 300 }.retry_after_secs(),
        Some(300)
    );
    assert_eq!(SummarizeError::Provider(String::new()).retry_after_secs(), None);
}

#[test]
fn test_summarize_error_from_conversions() {
    let err = anyhow::anyhow!("test error");
    let summarize_err: SummarizeError = err.into();

    match summarize_err {
        SummarizeError::Provider(msg) => assert!(msg.contains("test error")),
        _ => panic!("Unexpected error type"),
    }

    // reqwest::Error cannot be built directly; this only checks the impl exists
    #[allow(unused)]
    #[allow(clippy::items_after_statements)]
    fn _check_reqwest_conversion(err: reqwest::Error) -> SummarizeError {
        SummarizeError::from(err)
    }
}
