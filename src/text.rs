use crate::record::Record;

/// Number of abstract characters shown in result listings before
/// truncation.
pub const ABSTRACT_PREVIEW_CHARS: usize = 250;

/// Split text into lowercase tokens.
///
/// A token is a maximal run of ASCII lowercase letters and digits after
/// lowercasing; every other character separates tokens and is discarded.
/// "Deep-Learning 2.0" tokenizes to ["deep", "learning", "2", "0"].
pub fn tokenize(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    for c in text.to_lowercase().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            current.push(c);
        } else if !current.is_empty() {
            tokens.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

/// Collapse a record into the single lowercase string the index is built
/// over.
///
/// The field order is fixed: title, authors, year, journal, abstract,
/// keywords, DOI. Bigrams cross field boundaries, so reordering fields
/// would change ranking. Absent fields contribute empty segments; the
/// separating spaces remain.
pub fn flatten(record: &Record) -> String {
    let segments = [
        record.title.clone(),
        record.authors.join(" "),
        record.year.map(|y| y.to_string()).unwrap_or_default(),
        record.journal.clone().unwrap_or_default(),
        record.abstract_text.clone().unwrap_or_default(),
        record.keywords.join(" "),
        record.doi.clone().unwrap_or_default(),
    ];
    segments.join(" ").to_lowercase()
}

/// Shorten an abstract for list output.
///
/// Truncation counts characters, not bytes, so multi-byte text is never
/// split mid-character.
pub fn abstract_preview(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars).collect();
    format!("{}...", cut.trim_end())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn record(raw: serde_json::Value) -> Record {
        Record::from_value(&raw)
    }

    #[test]
    fn tokenize_splits_on_punctuation() {
        assert_eq!(tokenize("Deep-Learning 2.0"), ["deep", "learning", "2", "0"]);
    }

    #[test]
    fn tokenize_lowercases() {
        assert_eq!(tokenize("GRAPH Neural"), ["graph", "neural"]);
    }

    #[test]
    fn tokenize_discards_non_ascii_letters() {
        assert_eq!(tokenize("naïve café"), ["na", "ve", "caf"]);
    }

    #[test]
    fn tokenize_empty_and_symbol_only_inputs() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("!!! --- ???").is_empty());
    }

    #[test]
    fn tokenize_keeps_digit_runs() {
        assert_eq!(tokenize("bert2020 v2"), ["bert2020", "v2"]);
    }

    #[test]
    fn flatten_uses_fixed_field_order() {
        let r = record(json!({
            "title": "Deep Learning",
            "authors": ["Smith", "Jones"],
            "year": 2015,
            "journal": "Nature",
            "abstract": "Representation learning.",
            "keywords": ["neural", "networks"],
            "doi": "10.1/dl",
        }));
        assert_eq!(
            flatten(&r),
            "deep learning smith jones 2015 nature \
             representation learning. neural networks 10.1/dl"
        );
    }

    #[test]
    fn flatten_absent_fields_leave_empty_segments() {
        let r = record(json!({"title": "Alpha"}));
        // Six separators remain between the seven (mostly empty) segments.
        assert_eq!(flatten(&r), format!("alpha{}", " ".repeat(6)));
    }

    #[test]
    fn flatten_is_stable() {
        let raw = json!({
            "title": "Graph Neural Networks",
            "authors": ["Kipf"],
            "year": 2019,
        });
        assert_eq!(flatten(&record(raw.clone())), flatten(&record(raw)));
    }

    #[test]
    fn preview_returns_short_text_unchanged() {
        assert_eq!(abstract_preview("short", 250), "short");
    }

    #[test]
    fn preview_at_exact_limit_is_unchanged() {
        let text = "a".repeat(250);
        assert_eq!(abstract_preview(&text, 250), text);
    }

    #[test]
    fn preview_truncates_and_marks() {
        let text = format!("{} tail", "a".repeat(260));
        let preview = abstract_preview(&text, 250);
        assert!(preview.ends_with("..."));
        assert_eq!(preview.chars().count(), 253);
    }

    #[test]
    fn preview_trims_trailing_space_before_marker() {
        let text = format!("{} {}", "a".repeat(249), "b".repeat(20));
        let preview = abstract_preview(&text, 250);
        assert_eq!(preview, format!("{}...", "a".repeat(249)));
    }

    #[test]
    fn preview_counts_characters_not_bytes() {
        let text = "é".repeat(300);
        let preview = abstract_preview(&text, 250);
        assert_eq!(preview.chars().count(), 253);
    }
}
