//! Rewrites provider prose into house style
//!
//! Strips assistant boilerplate, flattens list-shaped answers into sentences,
//! removes markdown emphasis and tidies whitespace. The result always ends
//! with terminal punctuation unless it is empty.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::text::compile;

/// Opening phrases, anchored at the start of the text.
static INTRO_PHRASES: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)^\s*(?:sure|certainly|of course|absolutely)\s*[!,.]\s*",
        r"(?i)^\s*here(?:['’]s| is)\s+(?:a|an|the|your)?\s*(?:brief|concise|short|quick)?\s*summary(?:\s+of\s+(?:the|this|your)\s+(?:text|article|passage|document|content))?\s*[:.\-]?\s*",
        r"(?i)^\s*summary\s*:\s*",
        r"(?i)^\s*(?:in summary|to summarize|in short|in brief)\s*[,:]\s*",
        r"(?i)^\s*(?:the|this)\s+(?:text|article|passage|document)\s+(?:discusses|describes|explains|is about)\s+",
    ]
    .iter()
    .map(|p| compile(p))
    .collect()
});

/// Closing phrases; everything from the match to the end is dropped.
static OUTRO_PHRASES: Lazy<Regex> = Lazy::new(|| {
    compile(
        r"(?is)\s*(?:I hope (?:this|that) (?:summary )?helps|Let me know if you (?:need|have|would like|want)|Feel free to ask|Is there anything else|If you (?:need|have) any (?:further|more|other) (?:questions|details)).*$",
    )
});

static LIST_MARKER: Lazy<Regex> = Lazy::new(|| compile(r"^\s*(?:\d+[.)]|[-*•+])\s+"));
static BOLD: Lazy<Regex> = Lazy::new(|| compile(r"\*\*(.+?)\*\*|__(.+?)__"));
static ITALIC: Lazy<Regex> = Lazy::new(|| compile(r"\*([^*\n]+)\*"));
static INLINE_CODE: Lazy<Regex> = Lazy::new(|| compile(r"`([^`\n]+)`"));
static HEADING: Lazy<Regex> = Lazy::new(|| compile(r"(?m)^\s*#{1,6}\s+"));
static TRAILING_SPACES: Lazy<Regex> = Lazy::new(|| compile(r"(?m)[ \t]+$"));
static BLANK_LINE_RUN: Lazy<Regex> = Lazy::new(|| compile(r"\n{3,}"));
static SPACE_RUN: Lazy<Regex> = Lazy::new(|| compile(r"[ \t]{2,}"));

/// A list-shaped answer has more than this share of list-item lines.
const LIST_LINE_RATIO: f64 = 0.6;

fn ends_with_terminal(text: &str) -> bool {
    text.ends_with(['.', '!', '?'])
}

fn strip_intro(text: &str) -> String {
    let mut current = text.to_string();
    loop {
        let before = current.len();
        for pattern in INTRO_PHRASES.iter() {
            current = pattern.replace(&current, "").into_owned();
        }
        if current.len() == before {
            return current;
        }
    }
}

#[allow(clippy::cast_precision_loss)]
fn flatten_list(text: &str) -> String {
    let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
    if lines.is_empty() {
        return text.to_string();
    }
    let list_lines = lines.iter().filter(|l| LIST_MARKER.is_match(l)).count();
    if (list_lines as f64) / (lines.len() as f64) <= LIST_LINE_RATIO {
        return text.to_string();
    }

    lines
        .iter()
        .map(|line| {
            let item = LIST_MARKER.replace(line, "");
            let item = item.trim();
            if LIST_MARKER.is_match(line) && !ends_with_terminal(item) {
                format!("{item}.")
            } else {
                item.to_string()
            }
        })
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn strip_markdown(text: &str) -> String {
    let text = BOLD.replace_all(text, "$1$2");
    let text = ITALIC.replace_all(&text, "$1");
    let text = INLINE_CODE.replace_all(&text, "$1");
    HEADING.replace_all(&text, "").into_owned()
}

fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) if first.is_lowercase() => first.to_uppercase().chain(chars).collect(),
        _ => text.to_string(),
    }
}

/// Normalizes raw provider output. Returns an empty string when nothing is
/// left after stripping boilerplate.
#[must_use]
pub fn normalize(raw: &str) -> String {
    let text = raw.replace("\r\n", "\n");
    let text = strip_intro(&text);
    let text = OUTRO_PHRASES.replace(&text, "");
    let text = flatten_list(&text);
    let text = strip_markdown(&text);
    let text = TRAILING_SPACES.replace_all(&text, "");
    let text = BLANK_LINE_RUN.replace_all(&text, "\n\n");
    let text = SPACE_RUN.replace_all(&text, " ");
    let text = capitalize_first(text.trim());

    if text.is_empty() || ends_with_terminal(&text) {
        return text;
    }
    let mut text = text.trim_end_matches([',', ';', ':', '-']).trim_end().to_string();
    text.push('.');
    text
}
