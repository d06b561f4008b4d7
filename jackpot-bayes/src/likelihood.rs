//! P(clue | entity), up to a constant.

use jackpot_core::config::BayesConfig;
use jackpot_core::constants::MIN_LIKELIHOOD;
use jackpot_core::models::{ClueAnalysis, Entity};

/// Likelihood of one clue for one entity, with the signals behind it.
#[derive(Debug, Clone, PartialEq)]
pub struct Likelihood {
    pub value: f64,
    /// Independent clue-specific matches: keyword, polysemy, association, negation.
    pub signals: usize,
    /// One note per matched signal.
    pub evidence: Vec<String>,
    /// Context that moved the likelihood without being a clue match.
    pub notes: Vec<String>,
    /// Analyzer mass on the entity's category.
    pub category_mass: f64,
}

/// Score one entity against one analyzed clue.
pub fn compute(
    entity: &Entity,
    analysis: &ClueAnalysis,
    search_score: f64,
    config: &BayesConfig,
) -> Likelihood {
    let mut value = 1.0;
    let mut evidence = Vec::new();
    let mut notes = Vec::new();

    if let Some(note) = polysemy_match(entity, analysis) {
        value *= config.polysemy_bonus;
        evidence.push(note);
    }

    if search_score > 0.0 {
        value *= 1.0 + config.keyword_weight * search_score;
        if search_score > config.keyword_evidence_threshold {
            evidence.push(format!("strong keyword match ({search_score:.2})"));
        }
    }

    let associations: Vec<String> = entity
        .clue_associations
        .iter()
        .map(|a| a.to_lowercase())
        .collect();
    for keyword in &analysis.keywords {
        let matched = associations
            .iter()
            .find(|a| keyword.forms().any(|form| a.contains(form)));
        if let Some(association) = matched {
            value *= config.association_factor;
            evidence.push(format!("clue pattern '{}' in '{}'", keyword.surface, association));
        }
    }

    for pattern in &analysis.negation_patterns {
        let touches = associations.iter().any(|a| {
            contains_word(a, &pattern.attribute)
                || pattern
                    .negated
                    .as_deref()
                    .is_some_and(|negated| contains_word(a, negated))
        });
        if touches {
            value *= config.negation_factor;
            evidence.push(format!("negation pattern '{}'", pattern.matched_text));
        }
    }

    let category_mass = analysis.category_probs.get(entity.category);
    value *= 1.0 + config.category_weight * category_mass;
    if category_mass > config.category_evidence_threshold {
        notes.push(format!(
            "category '{}' indicated ({:.0}%)",
            entity.category,
            category_mass * 100.0
        ));
    }

    if entity.recency_score > config.recency_threshold {
        value *= 1.0 + config.recency_weight * entity.recency_score;
        notes.push(format!(
            "high cultural relevance ({:.0}%)",
            entity.recency_score * 100.0
        ));
    }

    Likelihood {
        value: value.max(MIN_LIKELIHOOD),
        signals: evidence.len(),
        evidence,
        notes,
        category_mass,
    }
}

/// Whole-word match inside a lowercased association.
fn contains_word(text: &str, word: &str) -> bool {
    !word.is_empty() && text.split(|c: char| !c.is_alphanumeric()).any(|t| t == word)
}

/// A detected polysemous meaning inside one of the entity's triggers, or a
/// keyword form that contains or is contained by a trigger.
fn polysemy_match(entity: &Entity, analysis: &ClueAnalysis) -> Option<String> {
    let triggers: Vec<String> = entity
        .polysemy_triggers
        .iter()
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect();
    if triggers.is_empty() {
        return None;
    }

    for term in &analysis.polysemous_terms {
        for meaning in &term.meanings {
            let meaning = meaning.to_lowercase();
            if meaning.is_empty() {
                continue;
            }
            if let Some(trigger) = triggers.iter().find(|t| t.contains(meaning.as_str())) {
                return Some(format!("polysemy match '{}' -> {}", term.term, trigger));
            }
        }
    }

    for keyword in &analysis.keywords {
        for form in keyword.forms().filter(|f| f.chars().count() >= 3) {
            if let Some(trigger) = triggers
                .iter()
                .find(|t| t.contains(form) || form.contains(t.as_str()))
            {
                return Some(format!("trigger match '{}' -> {}", keyword.surface, trigger));
            }
        }
    }
    None
}
