//! Label and summary extraction from raw note text

use regex_lite::Regex;
use std::sync::LazyLock;

static MARKUP_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("markup pattern is valid"));

static SENTENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^.!?]+[.!?]+").expect("sentence pattern is valid"));

const SENTENCE_TERMINATORS: &[char] = &['。', '！', '？', '.', '!', '?'];
const MAX_SENTENCE_TITLE_CHARS: usize = 60;
const TRUNCATED_TITLE_CHARS: usize = 50;
const SIMPLE_SUMMARY_SENTENCES: usize = 3;
const SIMPLE_SUMMARY_CHARS: usize = 200;

/// Remove `<...>` markup tags.
pub fn strip_markup(text: &str) -> String {
    MARKUP_TAG.replace_all(text, "").into_owned()
}

/// First `max` chars of `text`, with `...` appended when anything was cut.
pub fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// Headline for a note: its first sentence when that is short enough,
/// otherwise the first 50 chars.
pub fn extract_title(text: &str) -> String {
    let clean = strip_markup(text);
    let clean = clean.trim();

    if let Some(sentence) = first_sentence(clean) {
        if sentence.chars().count() <= MAX_SENTENCE_TITLE_CHARS {
            return sentence.to_string();
        }
    }

    truncate_chars(clean, TRUNCATED_TITLE_CHARS)
}

/// Leading run up to and including one sentence terminator, stopping early
/// at a newline. `None` when the text starts with a terminator or newline.
fn first_sentence(text: &str) -> Option<&str> {
    for (i, c) in text.char_indices() {
        if c == '\n' {
            return (i > 0).then(|| &text[..i]);
        }
        if SENTENCE_TERMINATORS.contains(&c) {
            return (i > 0).then(|| &text[..i + c.len_utf8()]);
        }
    }
    (!text.is_empty()).then_some(text)
}

/// Extractive summary used when no summarizer is available: the first three
/// terminated sentences, capped at 200 chars.
pub fn simple_summary(text: &str) -> String {
    let sentences: Vec<&str> = SENTENCE.find_iter(text).map(|m| m.as_str()).collect();
    let summary = if sentences.is_empty() {
        text.to_string()
    } else {
        sentences
            .into_iter()
            .take(SIMPLE_SUMMARY_SENTENCES)
            .collect::<Vec<_>>()
            .join(" ")
    };
    truncate_chars(&summary, SIMPLE_SUMMARY_CHARS)
}
