//! Remote summarization: provider client, rate limiting and cleanup

pub mod client;
pub mod clock;
pub mod gateway;
pub mod normalizer;
pub mod prompt_builder;
pub mod rate_limiter;

// Re-export main types for convenience
pub use client::{OpenRouterClient, SummaryProvider};
pub use clock::{Clock, ManualClock, SystemClock};
pub use gateway::Gateway;
pub use normalizer::normalize;
pub use rate_limiter::{DAILY_LIMIT, MINUTE_LIMIT, Permit, RateLimitConfig, RateLimiter};
