//! Rule-based category inference
//!
//! A fixed bilingual trigger table scored by substring matching. The table
//! order is significant: it breaks score ties.

/// Category label used when nothing matches and no keyword is available.
pub const FALLBACK_CATEGORY: &str = "Other";

/// Icon for categories outside the icon table.
pub const FALLBACK_ICON: &str = "📁";

/// Categories and their trigger keywords, in tie-break order.
pub const CATEGORY_TABLE: &[(&str, &[&str])] = &[
    ("Chemistry", &["化学", "chemical", "chemistry", "元素", "element", "反应", "reaction", "分子", "molecule", "原子", "atom"]),
    ("Biology", &["生物", "biology", "biological", "细胞", "cell", "基因", "gene", "dna", "蛋白质", "protein", "生命", "life"]),
    ("Physics", &["物理", "physics", "physical", "力学", "force", "能量", "energy", "波", "wave", "光", "light"]),
    ("Mathematics", &["数学", "math", "mathematics", "方程", "equation", "函数", "function", "几何", "geometry", "代数", "algebra"]),
    ("History", &["历史", "history", "historical", "朝代", "dynasty", "战争", "war", "文化", "culture", "古代", "ancient"]),
    ("Literature", &["文学", "literature", "literary", "诗", "poem", "小说", "novel", "作家", "author", "散文", "essay"]),
    ("Programming", &["编程", "programming", "code", "函数", "function", "javascript", "python", "java", "algorithm", "算法"]),
    ("Technology", &["技术", "technology", "tech", "开发", "development", "web", "api", "database", "数据库", "server"]),
    ("Business", &["商业", "business", "marketing", "市场", "management", "管理", "finance", "金融", "economy", "经济"]),
    ("Art", &["艺术", "art", "artistic", "绘画", "painting", "设计", "design", "音乐", "music", "美术", "fine arts"]),
];

const CATEGORY_ICONS: &[(&str, &str)] = &[
    ("Chemistry", "🧪"),
    ("Biology", "🧬"),
    ("Physics", "⚛️"),
    ("Mathematics", "📐"),
    ("History", "📜"),
    ("Literature", "📚"),
    ("Programming", "💻"),
    ("Technology", "⚙️"),
    ("Business", "💼"),
    ("Art", "🎨"),
    ("Other", "📁"),
];

/// Pick a category label for a note.
///
/// Each category scores one point per trigger found as a substring of
/// `content` joined with `keywords`. Matching is case-sensitive against the
/// lower-case triggers; callers fold case themselves when they want to. The
/// highest nonzero score wins; ties go to the category declared first. With
/// no match, the first keyword (capitalized) becomes the label, or
/// [`FALLBACK_CATEGORY`] when there are no keywords.
pub fn infer_category(content: &str, keywords: &[String]) -> String {
    let haystack = format!("{} {}", content, keywords.join(" "));

    let mut best: Option<(&str, usize)> = None;
    for (category, triggers) in CATEGORY_TABLE {
        let score = triggers.iter().filter(|t| haystack.contains(*t)).count();
        if score == 0 {
            continue;
        }
        // strict > keeps the earlier category on ties
        if best.map_or(true, |(_, top)| score > top) {
            best = Some((category, score));
        }
    }

    if let Some((category, _)) = best {
        return category.to_string();
    }

    match keywords.first() {
        Some(first) => capitalize(first),
        None => FALLBACK_CATEGORY.to_string(),
    }
}

/// Icon shown in front of a category label.
pub fn category_icon(category: &str) -> &'static str {
    CATEGORY_ICONS
        .iter()
        .find(|(name, _)| *name == category)
        .map(|(_, icon)| *icon)
        .unwrap_or(FALLBACK_ICON)
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kw(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn highest_score_wins() {
        let content = "python code implements a sorting algorithm";
        assert_eq!(infer_category(content, &[]), "Programming");
    }

    #[test]
    fn ties_go_to_table_order() {
        // chemical + reaction (Chemistry) vs energy + light (Physics)
        let content = "this chemical reaction produces energy and releases light";
        assert_eq!(infer_category(content, &[]), "Chemistry");
    }

    #[test]
    fn keywords_contribute_to_score() {
        assert_eq!(infer_category("notes from today", &kw(&["dynasty", "war"])), "History");
    }

    #[test]
    fn matching_is_substring_based() {
        // "cellular" contains "cell"
        assert_eq!(infer_category("cellular respiration", &[]), "Biology");
    }

    #[test]
    fn matching_is_case_sensitive() {
        assert_eq!(infer_category("Chemical Reaction", &[]), "Other");
        assert_eq!(infer_category("Chemical Reaction", &kw(&["Chemical"])), "Chemical");
        assert_eq!(infer_category("chemical reaction", &[]), "Chemistry");
    }

    #[test]
    fn chinese_triggers_match() {
        assert_eq!(infer_category("市场营销与金融管理", &[]), "Business");
    }

    #[test]
    fn falls_back_to_capitalized_first_keyword() {
        assert_eq!(infer_category("gardening tips", &kw(&["gardening", "tips"])), "Gardening");
    }

    #[test]
    fn falls_back_to_other_without_keywords() {
        assert_eq!(infer_category("zzz", &[]), FALLBACK_CATEGORY);
    }

    #[test]
    fn deterministic_across_calls() {
        let content = "web server database migrations";
        let keywords = kw(&["server", "database"]);
        let first = infer_category(content, &keywords);
        for _ in 0..10 {
            assert_eq!(infer_category(content, &keywords), first);
        }
    }

    #[test]
    fn icons_cover_table_and_fall_back() {
        for (category, _) in CATEGORY_TABLE {
            assert_ne!(category_icon(category), FALLBACK_ICON);
        }
        assert_eq!(category_icon("Programming"), "💻");
        assert_eq!(category_icon("Gardening"), FALLBACK_ICON);
        assert_eq!(category_icon("Other"), FALLBACK_ICON);
    }
}
