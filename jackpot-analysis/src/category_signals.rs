//! Signal words that shift the category estimate.

use jackpot_core::models::{Category, CategoryProbs};

use crate::tokenizer::{lemmatize, raw_tokens};

const PERSON_SIGNALS: &[&str] = &[
    "he", "she", "they", "her", "his", "their", "him", "them", "born", "said", "thinks",
    "believes", "played", "starred", "sang", "celebrity", "actor", "singer", "athlete",
    "person", "character", "star", "icon", "family", "parent", "child",
];

const PLACE_SIGNALS: &[&str] = &[
    "in", "at", "to", "from", "located", "found", "visit", "travel", "built", "city",
    "country", "landmark", "building", "location", "destination", "monument", "tower",
    "mountain", "island", "coast", "geographic", "famous", "historic", "ancient",
];

const THING_SIGNALS: &[&str] = &[
    "made", "created", "invented", "used", "played", "eaten", "contains", "game", "food",
    "brand", "product", "object", "item", "tool", "toy", "vehicle", "device", "invention",
];

fn signals_for(category: Category) -> &'static [&'static str] {
    match category {
        Category::Person => PERSON_SIGNALS,
        Category::Place => PLACE_SIGNALS,
        Category::Thing => THING_SIGNALS,
    }
}

/// Every (category, word) signal in the text, in token order.
/// A word may signal more than one category.
pub fn detect_signals(text: &str) -> Vec<(Category, String)> {
    let mut found = Vec::new();
    for token in raw_tokens(text) {
        let lemma = lemmatize(&token);
        for category in Category::ALL {
            let words = signals_for(category);
            if words.contains(&token.as_str()) || words.contains(&lemma.as_str()) {
                found.push((category, token.clone()));
            }
        }
    }
    found
}

/// Weighted signal count per category.
pub fn signal_mass(signals: &[(Category, String)], weight: f64) -> CategoryProbs {
    let mut mass = CategoryProbs::new(0.0, 0.0, 0.0);
    for (category, _) in signals {
        mass.set(*category, mass.get(*category) + weight);
    }
    mass
}

/// Blend catalog priors with the share of signal mass, then normalize.
/// No signal mass leaves the priors unchanged.
pub fn blend(priors: &CategoryProbs, mass: &CategoryProbs, prior_weight: f64) -> CategoryProbs {
    let total = mass.total();
    if total <= 0.0 {
        return *priors;
    }
    let signal_weight = 1.0 - prior_weight;
    let mut blended = CategoryProbs::new(0.0, 0.0, 0.0);
    for category in Category::ALL {
        blended.set(
            category,
            prior_weight * priors.get(category) + signal_weight * mass.get(category) / total,
        );
    }
    blended.normalized()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pronouns_signal_person() {
        let signals = detect_signals("She sang for her fans");
        let person = signals
            .iter()
            .filter(|(c, _)| *c == Category::Person)
            .count();
        assert_eq!(person, 3);
    }

    #[test]
    fn shared_words_signal_both_categories() {
        let signals = detect_signals("played");
        assert!(signals.contains(&(Category::Person, "played".to_string())));
        assert!(signals.contains(&(Category::Thing, "played".to_string())));
    }

    #[test]
    fn articles_carry_no_category() {
        assert!(detect_signals("The tower").iter().all(|(c, _)| *c != Category::Thing));
        assert!(detect_signals("A bridge an hour away").is_empty());
    }

    #[test]
    fn blend_without_signals_keeps_priors() {
        let priors = CategoryProbs::default();
        let mass = CategoryProbs::new(0.0, 0.0, 0.0);
        assert_eq!(blend(&priors, &mass, 0.7), priors);
    }

    #[test]
    fn blend_moves_toward_signal_share() {
        let priors = CategoryProbs::default();
        let mass = CategoryProbs::new(1.0, 0.0, 0.0);
        let blended = blend(&priors, &mass, 0.7);
        assert!((blended.thing - 0.72).abs() < 1e-9);
        assert!((blended.total() - 1.0).abs() < 1e-9);
    }
}
