//! Tokenizer and stop-word filter

use std::collections::HashSet;
use std::sync::LazyLock;

/// Common English and Chinese function words.
const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for",
    "of", "with", "by", "from", "as", "is", "was", "are", "been", "be",
    "have", "has", "had", "do", "does", "did", "will", "would", "could",
    "should", "may", "might", "can", "this", "that", "these", "those",
    "的", "了", "在", "是", "我", "有", "和", "就", "不", "人", "都", "一",
    "一个", "上", "也", "很", "到", "说", "要", "去", "你", "会", "着", "没有",
    "看", "好", "自己", "这", "那",
];

static STOP_WORD_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| STOP_WORDS.iter().copied().collect());

/// Tokens of this many chars or fewer are discarded.
const MIN_TOKEN_CHARS: usize = 2;

pub fn is_stop_word(word: &str) -> bool {
    STOP_WORD_SET.contains(word)
}

/// Split text into normalized candidate keywords.
///
/// Lower-cases the input, turns every char that is not alphanumeric
/// (Latin, CJK and other scripts), `_` or whitespace into a separator, then
/// drops short tokens and stop words. Tokens keep first-occurrence order.
pub fn tokenize(text: &str) -> Vec<String> {
    let normalized: String = text
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '_' || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();

    normalized
        .split_whitespace()
        .filter(|word| word.chars().count() > MIN_TOKEN_CHARS)
        .filter(|word| !is_stop_word(word))
        .map(str::to_string)
        .collect()
}
