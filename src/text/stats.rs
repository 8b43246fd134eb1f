//! Word-count reduction and reading-time estimates

use crate::core::models::Statistics;
use crate::text::tokenizer::raw_word_count;

pub const WORDS_PER_MINUTE: usize = 200;

#[must_use]
pub fn reading_time_minutes(word_count: usize) -> usize {
    word_count.div_ceil(WORDS_PER_MINUTE)
}

/// Percentage of words removed, rounded to one decimal and clamped to 0-100.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn reduction_percentage(original_words: usize, summary_words: usize) -> f64 {
    if original_words == 0 {
        return 0.0;
    }
    let original = original_words as f64;
    let removed = original - summary_words as f64;
    let pct = (removed / original * 100.0 * 10.0).round() / 10.0;
    pct.clamp(0.0, 100.0)
}

/// Compares the original text with its summary. Word counts are plain
/// whitespace splits, not tokenizer-filtered.
#[must_use]
pub fn compute(original: &str, summary: &str) -> Statistics {
    let original_word_count = raw_word_count(original);
    let summary_word_count = raw_word_count(summary);

    Statistics {
        original_word_count,
        summary_word_count,
        reduction_percentage: reduction_percentage(original_word_count, summary_word_count),
        original_reading_time_minutes: reading_time_minutes(original_word_count),
        summary_reading_time_minutes: reading_time_minutes(summary_word_count),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_original_words_means_zero_reduction() {
        let stats = compute("", "");
        assert_eq!(stats.original_word_count, 0);
        assert!(stats.reduction_percentage.abs() < f64::EPSILON);
        assert_eq!(stats.original_reading_time_minutes, 0);
    }

    #[test]
    fn reduction_rounds_to_one_decimal() {
        // (3 - 1) / 3 * 100 = 66.666...
        assert!((reduction_percentage(3, 1) - 66.7).abs() < 1e-9);
        assert!((reduction_percentage(8, 2) - 75.0).abs() < 1e-9);
    }

    #[test]
    fn reading_time_rounds_up() {
        assert_eq!(reading_time_minutes(1), 1);
        assert_eq!(reading_time_minutes(200), 1);
        assert_eq!(reading_time_minutes(201), 2);
    }

    #[test]
    fn counts_use_whitespace_split() {
        let stats = compute("the cat   sat on\nthe mat", "cat sat");
        assert_eq!(stats.original_word_count, 6);
        assert_eq!(stats.summary_word_count, 2);
        assert!((stats.reduction_percentage - 66.7).abs() < 1e-9);
    }
}
