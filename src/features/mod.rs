pub mod summarize;

// Re-exports for the thin bin
pub use summarize::{Summarizer, error_response};
