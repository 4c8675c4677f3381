//! Label fitting by estimated glyph width.

/// Leaf labels are cut once wider than this.
pub const LEAF_LABEL_MAX_WIDTH: f64 = 130.0;
const NARROW_WIDTH: f64 = 7.0;
const WIDE_WIDTH: f64 = 12.0;

/// East Asian wide characters and emoji render roughly twice as wide.
fn is_wide(c: char) -> bool {
    matches!(c as u32,
        0x1100..=0x115F
        | 0x2E80..=0xA4CF
        | 0xAC00..=0xD7A3
        | 0xF900..=0xFAFF
        | 0xFE30..=0xFE4F
        | 0xFF00..=0xFF60
        | 0xFFE0..=0xFFE6
        | 0x1F300..=0x1FAFF
        | 0x20000..=0x3FFFD)
}

pub fn estimate_width(text: &str) -> f64 {
    text.chars()
        .map(|c| if is_wide(c) { WIDE_WIDTH } else { NARROW_WIDTH })
        .sum()
}

/// Single-line leaf label, shortened char by char with a trailing `...`
/// until it fits [`LEAF_LABEL_MAX_WIDTH`].
pub fn fit_leaf_label(label: &str) -> String {
    if estimate_width(label) <= LEAF_LABEL_MAX_WIDTH {
        return label.to_string();
    }
    let mut chars: Vec<char> = label.chars().collect();
    while chars.pop().is_some() {
        let candidate: String = chars.iter().collect::<String>() + "...";
        if estimate_width(&candidate) <= LEAF_LABEL_MAX_WIDTH {
            return candidate;
        }
    }
    "...".to_string()
}

/// Internal labels with more than two words wrap after the second word.
pub fn wrap_internal_label(label: &str) -> Vec<String> {
    let words: Vec<&str> = label.split_whitespace().collect();
    if words.len() > 2 {
        vec![words[..2].join(" "), words[2..].join(" ")]
    } else {
        vec![label.to_string()]
    }
}
