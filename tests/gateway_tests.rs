use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::TimeDelta;
use condense::ai::prompt_builder::ProviderRequest;
use condense::ai::{DAILY_LIMIT, Gateway, MINUTE_LIMIT, ManualClock, RateLimiter, SummaryProvider};
use condense::core::models::SummaryLength;
use condense::errors::SummarizeError;

#[derive(Debug, Default)]
struct ThrottledProvider {
    calls: AtomicUsize,
}

#[async_trait]
impl SummaryProvider for ThrottledProvider {
    async fn summarize(&self, _request: &ProviderRequest, _timeout: Duration) -> Result<String, SummarizeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(SummarizeError::RateLimited {
            message: "429 Too Many Requests".to_string(),
            retry_after_secs: 0,
        })
    }
}

#[test]
fn test_twenty_first_request_in_a_minute_is_rejected() {
    let clock = Arc::new(ManualClock::default());
    let limiter = RateLimiter::new(clock.clone());

    for _ in 0..MINUTE_LIMIT {
        limiter.try_acquire().unwrap().record();
        clock.advance(TimeDelta::seconds(2));
    }
    let err = limiter.try_acquire().unwrap_err();
    assert_eq!(err.retry_after_secs(), Some(60));

    let status = limiter.status();
    assert!(status.is_rate_limited);
    assert_eq!(status.minute_requests, MINUTE_LIMIT);
    assert_eq!(status.cooldown_seconds, 60);

    clock.advance(TimeDelta::seconds(60));
    assert!(limiter.try_acquire().is_ok());
}

#[test]
fn test_two_hundred_and_first_daily_request_starts_day_cooldown() {
    let clock = Arc::new(ManualClock::default());
    let limiter = RateLimiter::new(clock.clone());

    for _ in 0..DAILY_LIMIT {
        limiter.try_acquire().unwrap().record();
        clock.advance(TimeDelta::minutes(4));
    }
    let err = limiter.try_acquire().unwrap_err();
    assert_eq!(err.retry_after_secs(), Some(86_400));
    assert_eq!(limiter.status().daily_requests, DAILY_LIMIT);
}

#[test]
fn test_status_is_a_pure_read() {
    let clock = Arc::new(ManualClock::default());
    let limiter = RateLimiter::new(clock.clone());
    limiter.try_acquire().unwrap().record();

    let first = limiter.status();
    let second = limiter.status();
    assert_eq!(first, second);
    assert_eq!(first.minute_limit, MINUTE_LIMIT);
    assert_eq!(first.daily_limit, DAILY_LIMIT);
    assert!(!first.is_rate_limited);
    assert_eq!(first.cooldown_seconds, 0);
}

#[test]
fn test_concurrent_acquires_never_exceed_the_window() {
    let clock = Arc::new(ManualClock::default());
    let limiter = Arc::new(RateLimiter::new(clock));

    let granted = AtomicUsize::new(0);
    std::thread::scope(|scope| {
        for _ in 0..8 {
            scope.spawn(|| {
                for _ in 0..10 {
                    if let Ok(permit) = limiter.try_acquire() {
                        permit.record();
                        granted.fetch_add(1, Ordering::SeqCst);
                    }
                }
            });
        }
    });

    assert_eq!(granted.load(Ordering::SeqCst), MINUTE_LIMIT);
    assert_eq!(limiter.status().minute_requests, MINUTE_LIMIT);
}

#[tokio::test]
async fn test_provider_429_cools_down_for_five_minutes_without_network_calls() {
    let clock = Arc::new(ManualClock::default());
    let provider = Arc::new(ThrottledProvider::default());
    let gateway = Gateway::new(
        provider.clone(),
        RateLimiter::new(clock.clone()),
        Duration::from_secs(5),
    );

    let err = gateway.summarize("Some text.", SummaryLength::Medium).await.unwrap_err();
    assert_eq!(err.retry_after_secs(), Some(300));
    assert_eq!(gateway.status().cooldown_seconds, 300);

    clock.advance(TimeDelta::minutes(2));
    let err = gateway.summarize("Some text.", SummaryLength::Medium).await.unwrap_err();
    assert_eq!(err.retry_after_secs(), Some(180));
    assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
}
