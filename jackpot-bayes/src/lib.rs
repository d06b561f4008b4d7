//! # jackpot-bayes
//!
//! Maintains a posterior over every catalog entity across the clue
//! sequence. Each clue multiplies priors by a likelihood built from search
//! similarity, category alignment, polysemy and association matches, then
//! renormalizes. Confidence is tracked separately and never normalized.

pub mod confidence;
pub mod likelihood;
pub mod updater;

pub use likelihood::Likelihood;
pub use updater::BayesianUpdater;
