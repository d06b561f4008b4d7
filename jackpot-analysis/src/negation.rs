//! "Has X but can't Y" style constructions.

use std::sync::LazyLock;

use jackpot_core::models::NegationPattern;
use regex::Regex;

use crate::tokenizer::is_stop_word;

const MIN_WORD_LEN: usize = 3;

static NEGATION_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)\bhas (\w+) but (?:can't|cannot|doesn't|does not) (\w+)",
        r"(?i)\bhas (\w+) but no (\w+)",
        r"(?i)\b(\w+) without (\w+)",
        r"(?i)\bnot a (\w+) but",
    ]
    .iter()
    .filter_map(|p| Regex::new(p).ok())
    .collect()
});

fn is_content_word(word: &str) -> bool {
    word.chars().count() >= MIN_WORD_LEN && !is_stop_word(word)
}

/// All negation constructions in the text, pattern by pattern.
/// Matches that capture a stop word or a word under three letters are skipped.
pub fn extract_negations(text: &str) -> Vec<NegationPattern> {
    let mut found = Vec::new();
    for pattern in NEGATION_PATTERNS.iter() {
        for caps in pattern.captures_iter(text) {
            let Some(attribute) = caps.get(1).map(|m| m.as_str().to_lowercase()) else {
                continue;
            };
            let negated = caps.get(2).map(|m| m.as_str().to_lowercase());
            if !is_content_word(&attribute) || negated.as_deref().is_some_and(|n| !is_content_word(n)) {
                continue;
            }
            found.push(NegationPattern {
                attribute,
                negated,
                matched_text: caps
                    .get(0)
                    .map(|m| m.as_str().to_string())
                    .unwrap_or_default(),
            });
        }
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn has_but_cannot() {
        let found = extract_negations("Has teeth but can't bite");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].attribute, "teeth");
        assert_eq!(found[0].negated.as_deref(), Some("bite"));
    }

    #[test]
    fn without_pattern() {
        let found = extract_negations("A city without cars");
        assert_eq!(found[0].attribute, "city");
        assert_eq!(found[0].negated.as_deref(), Some("cars"));
    }

    #[test]
    fn not_a_but_has_no_negated_part() {
        let found = extract_negations("Not a fruit but a vegetable");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].attribute, "fruit");
        assert!(found[0].negated.is_none());
    }

    #[test]
    fn short_and_stop_words_are_not_captured() {
        assert!(extract_negations("Life without it").is_empty());
        assert!(extract_negations("Go without me").is_empty());
        assert!(extract_negations("Has it but no way").is_empty());
        assert_eq!(extract_negations("Coffee without sugar").len(), 1);
    }

    #[test]
    fn plain_text_has_none() {
        assert!(extract_negations("Round and round").is_empty());
    }
}
