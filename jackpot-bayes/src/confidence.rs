//! Evidence-strength confidence. Independent of probability mass.

use jackpot_core::config::BayesConfig;

use crate::likelihood::Likelihood;

/// Confidence after one clue.
///
/// Unchanged when the clue matched nothing for this entity. Otherwise it
/// grows with the number of matched signals, the category mass and the
/// likelihood strength, and is capped at `confidence_ceiling`.
pub fn next_confidence(previous: f64, likelihood: &Likelihood, config: &BayesConfig) -> f64 {
    if likelihood.signals == 0 {
        return previous;
    }
    let counted = likelihood.signals.min(config.max_counted_signals) as f64;
    let signal_gain = config.confidence_per_signal * counted;
    let category_gain = config.confidence_category_weight * likelihood.category_mass;
    let strength_gain = (0.1 * (likelihood.value - 1.0)).clamp(0.0, config.confidence_likelihood_cap);
    (previous + signal_gain + category_gain + strength_gain).min(config.confidence_ceiling)
}
