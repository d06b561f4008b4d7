use serde::{Deserialize, Serialize};

use super::Category;

fn default_recency() -> f64 {
    0.5
}

/// A catalogued candidate answer.
///
/// Entities are built at catalog load and never mutated afterwards.
/// `base_prior` is assigned by the catalog; values supplied by a source
/// are overwritten.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Canonical answer spelling.
    pub name: String,
    pub category: Category,
    #[serde(default)]
    pub aliases: Vec<String>,
    /// Dual-meaning hooks, e.g. "flavors/editions".
    #[serde(default)]
    pub polysemy_triggers: Vec<String>,
    /// Thematic hooks, e.g. "jail".
    #[serde(default)]
    pub clue_associations: Vec<String>,
    /// Cultural relevance in [0, 1].
    #[serde(default = "default_recency")]
    pub recency_score: f64,
    #[serde(default)]
    pub base_prior: f64,
}

impl Entity {
    pub fn new(name: impl Into<String>, category: Category) -> Self {
        Self {
            name: name.into(),
            category,
            aliases: Vec::new(),
            polysemy_triggers: Vec::new(),
            clue_associations: Vec::new(),
            recency_score: default_recency(),
            base_prior: 0.0,
        }
    }

    pub fn with_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases.extend(aliases.into_iter().map(Into::into));
        self
    }

    pub fn with_triggers<I, S>(mut self, triggers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.polysemy_triggers
            .extend(triggers.into_iter().map(Into::into));
        self
    }

    pub fn with_associations<I, S>(mut self, associations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.clue_associations
            .extend(associations.into_iter().map(Into::into));
        self
    }

    pub fn with_recency(mut self, recency: f64) -> Self {
        self.recency_score = recency.clamp(0.0, 1.0);
        self
    }

    /// Case-insensitive match against the canonical name or any alias.
    pub fn answers_to(&self, candidate: &str) -> bool {
        let candidate = candidate.trim();
        self.name.eq_ignore_ascii_case(candidate)
            || self.aliases.iter().any(|a| a.eq_ignore_ascii_case(candidate))
    }
}
