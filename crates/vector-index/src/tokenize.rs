use once_cell::sync::Lazy;
use regex::Regex;

/// Terms are runs of two or more word characters, matching the original
/// vectorizer's token pattern.
static TERM_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\w\w+\b").expect("valid regex"));

/// Lowercase and split text into index terms. Single-character tokens and
/// punctuation are discarded.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    TERM_PATTERN
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn lowercases_and_splits_on_punctuation() {
        assert_eq!(
            tokenize("Dell XPS-15, 16GB RAM!"),
            vec!["dell", "xps", "15", "16gb", "ram"]
        );
    }

    #[test]
    fn drops_single_character_tokens() {
        assert_eq!(tokenize("a i7 x"), vec!["i7"]);
    }

    #[test]
    fn empty_text_yields_no_terms() {
        assert!(tokenize("  !? ").is_empty());
    }
}
