//! Sliding-window rate limiter for the remote provider
//!
//! Two windows (one minute, one day) plus a cooldown deadline, all behind a
//! single mutex. A permission check hands out a [`Permit`] that reserves a
//! slot; the slot only becomes a window entry once the caller records a
//! successful call. Dropping an unrecorded permit gives the slot back.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, TimeDelta, Utc};
use tracing::warn;

use super::clock::Clock;
use crate::core::models::GatewayStatus;
use crate::errors::SummarizeError;

pub const MINUTE_LIMIT: usize = 20;
pub const DAILY_LIMIT: usize = 200;

#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    pub minute_limit: usize,
    pub daily_limit: usize,
    pub minute_span: TimeDelta,
    pub daily_span: TimeDelta,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            minute_limit: MINUTE_LIMIT,
            daily_limit: DAILY_LIMIT,
            minute_span: TimeDelta::minutes(1),
            daily_span: TimeDelta::hours(24),
        }
    }
}

#[derive(Debug)]
struct WindowState {
    minute: VecDeque<DateTime<Utc>>,
    daily: VecDeque<DateTime<Utc>>,
    rate_limited_until: Option<DateTime<Utc>>,
    daily_reset_at: DateTime<Utc>,
    in_flight: usize,
}

fn prune(window: &mut VecDeque<DateTime<Utc>>, now: DateTime<Utc>, span: TimeDelta) {
    while window.front().is_some_and(|&t| now - t >= span) {
        window.pop_front();
    }
}

fn count_within(window: &VecDeque<DateTime<Utc>>, now: DateTime<Utc>, span: TimeDelta) -> usize {
    window.iter().filter(|&&t| now - t < span).count()
}

fn seconds_until(until: DateTime<Utc>, now: DateTime<Utc>) -> u64 {
    let millis = (until - now).num_milliseconds().max(0);
    u64::try_from((millis + 999) / 1000).unwrap_or(0)
}

#[derive(Debug)]
pub struct RateLimiter {
    config: RateLimitConfig,
    clock: Arc<dyn Clock>,
    state: Mutex<WindowState>,
}

impl RateLimiter {
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self::with_config(RateLimitConfig::default(), clock)
    }

    #[must_use]
    pub fn with_config(config: RateLimitConfig, clock: Arc<dyn Clock>) -> Self {
        let now = clock.now();
        Self {
            config,
            clock,
            state: Mutex::new(WindowState {
                minute: VecDeque::new(),
                daily: VecDeque::new(),
                rate_limited_until: None,
                daily_reset_at: now,
                in_flight: 0,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, WindowState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Checks both windows and the cooldown. On success the returned permit
    /// holds a reserved slot until it is recorded or dropped.
    ///
    /// # Errors
    ///
    /// Returns `SummarizeError::RateLimited` while cooling down, or when this
    /// request would exceed either window. A cooldown starts only when the
    /// recorded calls alone fill a window.
    pub fn try_acquire(&self) -> Result<Permit<'_>, SummarizeError> {
        let now = self.clock.now();
        let mut state = self.lock();

        if state.rate_limited_until.is_some_and(|until| now >= until) {
            state.rate_limited_until = None;
        }
        if now - state.daily_reset_at >= self.config.daily_span {
            state.daily.clear();
            state.rate_limited_until = None;
            state.daily_reset_at = now;
        }
        prune(&mut state.minute, now, self.config.minute_span);
        prune(&mut state.daily, now, self.config.daily_span);

        if let Some(until) = state.rate_limited_until {
            let retry_after_secs = seconds_until(until, now);
            warn!(retry_after_secs, "Provider call rejected during cooldown");
            return Err(SummarizeError::RateLimited {
                message: format!("cooling down, retry in {retry_after_secs} seconds"),
                retry_after_secs,
            });
        }

        // Only recorded calls arm a cooldown; pending reservations just refuse.
        if state.minute.len() >= self.config.minute_limit {
            return Err(self.start_cooldown(&mut state, now, self.config.minute_span, "per-minute"));
        }
        if state.daily.len() >= self.config.daily_limit {
            return Err(self.start_cooldown(&mut state, now, self.config.daily_span, "daily"));
        }
        if state.minute.len() + state.in_flight >= self.config.minute_limit
            || state.daily.len() + state.in_flight >= self.config.daily_limit
        {
            warn!(in_flight = state.in_flight, "Provider call rejected while window slots are reserved");
            return Err(SummarizeError::RateLimited {
                message: "all window slots are reserved by calls in flight".to_string(),
                retry_after_secs: 1,
            });
        }

        state.in_flight += 1;
        Ok(Permit {
            limiter: self,
            settled: false,
        })
    }

    fn start_cooldown(
        &self,
        state: &mut WindowState,
        now: DateTime<Utc>,
        span: TimeDelta,
        window: &str,
    ) -> SummarizeError {
        state.rate_limited_until = Some(now + span);
        let retry_after_secs = seconds_until(now + span, now);
        warn!(window, retry_after_secs, "Provider {window} limit reached; cooling down");
        SummarizeError::RateLimited {
            message: format!("{window} limit reached, retry in {retry_after_secs} seconds"),
            retry_after_secs,
        }
    }

    /// Forces a cooldown regardless of window state, e.g. after the provider
    /// itself answered "too many requests". Never shortens an existing one.
    pub fn force_cooldown(&self, duration: TimeDelta) {
        let now = self.clock.now();
        let mut state = self.lock();
        let until = now + duration;
        if state.rate_limited_until.is_none_or(|current| current < until) {
            state.rate_limited_until = Some(until);
        }
    }

    fn commit(&self) {
        let now = self.clock.now();
        let mut state = self.lock();
        state.in_flight = state.in_flight.saturating_sub(1);
        state.minute.push_back(now);
        state.daily.push_back(now);
    }

    fn release(&self) {
        let mut state = self.lock();
        state.in_flight = state.in_flight.saturating_sub(1);
    }

    /// Read-only snapshot; expired entries are ignored rather than pruned.
    #[must_use]
    pub fn status(&self) -> GatewayStatus {
        let now = self.clock.now();
        let state = self.lock();

        let daily_expired = now - state.daily_reset_at >= self.config.daily_span;
        let cooling_until = state
            .rate_limited_until
            .filter(|&until| until > now && !daily_expired);

        GatewayStatus {
            minute_requests: count_within(&state.minute, now, self.config.minute_span),
            minute_limit: self.config.minute_limit,
            daily_requests: if daily_expired {
                0
            } else {
                count_within(&state.daily, now, self.config.daily_span)
            },
            daily_limit: self.config.daily_limit,
            is_rate_limited: cooling_until.is_some(),
            cooldown_seconds: cooling_until.map_or(0, |until| seconds_until(until, now)),
        }
    }
}

/// A reserved slot in both windows.
#[derive(Debug)]
#[must_use = "a permit must be recorded after a successful call"]
pub struct Permit<'a> {
    limiter: &'a RateLimiter,
    settled: bool,
}

impl Permit<'_> {
    /// Records the current time in both windows. Call only after the
    /// provider confirmed success.
    pub fn record(mut self) {
        self.settled = true;
        self.limiter.commit();
    }
}

impl Drop for Permit<'_> {
    fn drop(&mut self) {
        if !self.settled {
            self.limiter.release();
        }
    }
}
