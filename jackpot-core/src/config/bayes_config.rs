use serde::{Deserialize, Serialize};

use super::defaults;

/// Likelihood and confidence weights for the Bayesian updater.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BayesConfig {
    /// Multiplier for a polysemy or keyword-to-trigger match. Default: 1.5.
    pub polysemy_bonus: f64,
    /// Search score weight: likelihood scales by `1 + w * score`. Default: 0.4.
    pub keyword_weight: f64,
    /// Search scores above this count as evidence. Default: 0.3.
    pub keyword_evidence_threshold: f64,
    /// Category alignment weight: factor is `1 + w * mass`. Default: 0.3.
    pub category_weight: f64,
    /// Category mass above this counts as evidence. Default: 0.5.
    pub category_evidence_threshold: f64,
    /// Multiplier per keyword matching a clue association. Default: 1.2.
    pub association_factor: f64,
    /// Recency weight: likelihood scales by `1 + w * recency`. Default: 0.1.
    pub recency_weight: f64,
    /// Recency only applies above this score. Default: 0.7.
    pub recency_threshold: f64,
    /// Multiplier when a negation pattern touches the entity. Default: 1.3.
    pub negation_factor: f64,
    /// Category mass above which other categories are penalized. Default: 0.8.
    pub contradiction_threshold: f64,
    /// Penalty multiplier for contradicted categories. Default: 0.2.
    pub contradiction_penalty: f64,
    /// Starting confidence for every entity. Default: 0.1.
    pub initial_confidence: f64,
    /// Confidence gained per matching signal. Default: 0.12.
    pub confidence_per_signal: f64,
    /// Signals counted per clue. Default: 4.
    pub max_counted_signals: usize,
    /// Confidence gained per unit of category mass. Default: 0.10.
    pub confidence_category_weight: f64,
    /// Cap on the confidence gained from likelihood strength. Default: 0.2.
    pub confidence_likelihood_cap: f64,
    /// Confidence never exceeds this. Default: 0.95.
    pub confidence_ceiling: f64,
    /// Entities returned by a ranking. Default: 10.
    pub rank_top_k: usize,
}

impl Default for BayesConfig {
    fn default() -> Self {
        Self {
            polysemy_bonus: defaults::DEFAULT_POLYSEMY_BONUS,
            keyword_weight: defaults::DEFAULT_KEYWORD_WEIGHT,
            keyword_evidence_threshold: defaults::DEFAULT_KEYWORD_EVIDENCE_THRESHOLD,
            category_weight: defaults::DEFAULT_CATEGORY_WEIGHT,
            category_evidence_threshold: defaults::DEFAULT_CATEGORY_EVIDENCE_THRESHOLD,
            association_factor: defaults::DEFAULT_ASSOCIATION_FACTOR,
            recency_weight: defaults::DEFAULT_RECENCY_WEIGHT,
            recency_threshold: defaults::DEFAULT_RECENCY_THRESHOLD,
            negation_factor: defaults::DEFAULT_NEGATION_FACTOR,
            contradiction_threshold: defaults::DEFAULT_CONTRADICTION_THRESHOLD,
            contradiction_penalty: defaults::DEFAULT_CONTRADICTION_PENALTY,
            initial_confidence: defaults::DEFAULT_INITIAL_CONFIDENCE,
            confidence_per_signal: defaults::DEFAULT_CONFIDENCE_PER_SIGNAL,
            max_counted_signals: defaults::DEFAULT_MAX_COUNTED_SIGNALS,
            confidence_category_weight: defaults::DEFAULT_CONFIDENCE_CATEGORY_WEIGHT,
            confidence_likelihood_cap: defaults::DEFAULT_CONFIDENCE_LIKELIHOOD_CAP,
            confidence_ceiling: defaults::DEFAULT_CONFIDENCE_CEILING,
            rank_top_k: defaults::DEFAULT_RANK_TOP_K,
        }
    }
}
