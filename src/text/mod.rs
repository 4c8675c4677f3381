//! Heuristic text analysis
//!
//! The deterministic half of the mind-map pipeline: tokenization with
//! stop-word filtering, frequency-based keyword extraction, rule-based
//! category inference and label extraction. Everything here is pure.

mod classify;
mod keywords;
mod title;
mod tokenize;

pub use classify::{category_icon, infer_category, CATEGORY_TABLE, FALLBACK_CATEGORY, FALLBACK_ICON};
pub use keywords::extract_top_keywords;
pub use title::{extract_title, simple_summary, strip_markup, truncate_chars};
pub use tokenize::{is_stop_word, tokenize};
