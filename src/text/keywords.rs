//! Frequency-based keyword extraction

use super::tokenize::tokenize;
use std::collections::HashMap;

/// Return up to `n` most frequent tokens of `text`.
///
/// Ties keep first-occurrence order.
pub fn extract_top_keywords(text: &str, n: usize) -> Vec<String> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for word in tokenize(text) {
        match index.get(&word) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(word.clone(), counts.len());
                counts.push((word, 1));
            }
        }
    }

    // sort_by is stable
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.into_iter().take(n).map(|(word, _)| word).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orders_by_frequency() {
        let text = "protein cell gene cell protein cell";
        assert_eq!(extract_top_keywords(text, 5), vec!["cell", "protein", "gene"]);
    }

    #[test]
    fn ties_break_by_first_occurrence() {
        let text = "zeta alpha mango alpha zeta mango";
        assert_eq!(extract_top_keywords(text, 3), vec!["zeta", "alpha", "mango"]);
    }

    #[test]
    fn respects_limit() {
        let text = "one1 two2 three3 four4 five5 six6 seven7";
        assert_eq!(extract_top_keywords(text, 5).len(), 5);
        assert!(extract_top_keywords(text, 0).is_empty());
    }

    #[test]
    fn empty_for_unextractable_input() {
        assert!(extract_top_keywords("", 5).is_empty());
        assert!(extract_top_keywords("a an the of to", 5).is_empty());
    }
}
