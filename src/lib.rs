//! Condense - multi-strategy text summarization with a rate-limited remote provider.
//!
//! Text is either reduced locally by one of several extractive algorithms or
//! sent through a guarded gateway to an `OpenRouter` chat model, then shaped
//! into a paragraph, bullets or key phrases with reduction statistics.
//!
//! # Architecture
//!
//! The crate is organized as:
//! - `text`: cleaning, segmentation, stop words, frequencies and statistics
//! - `summarizer`: the sentence scorer, the ranking algorithms and output shaping
//! - `ai`: the provider client, sliding-window rate limiter and response normalizer
//! - `features`: the request orchestrator tying local and remote paths together
//!
//! # Example
//!
//! ```no_run
//! use condense::core::config::AppConfig;
//! use condense::core::models::{OutputType, SummarizeRequest};
//! use condense::features::Summarizer;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     condense::setup_logging();
//!
//!     let config = AppConfig::from_env()?;
//!     let summarizer = Summarizer::from_config(&config)?;
//!
//!     let request = SummarizeRequest::new("Some long article text ...")
//!         .with_output_type(OutputType::Bullets);
//!     let response = summarizer.summarize(&request).await?;
//!     println!("{}", response.summary);
//!
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod ai;
pub mod core;
pub mod errors;
pub mod features;
pub mod summarizer;
pub mod text;

pub use errors::SummarizeError;
pub use features::Summarizer;

/// Configure structured logging with JSON format.
///
/// Sets up tracing-subscriber with a JSON formatter writing to stderr, so
/// stdout stays free for command output. It should be called once at process
/// start.
///
/// # Example
///
/// ```
/// condense::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::prelude::*;
    let fmt_layer = tracing_subscriber::fmt::layer()
        .json()
        .with_target(true)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry().with(fmt_layer).init();
}
