//! # jackpot-analysis
//!
//! Turns raw clue text into a [`ClueAnalysis`](jackpot_core::models::ClueAnalysis):
//! keywords in surface and normalized form, polysemous terms from a static
//! table and the catalog's own trigger phrases, a category estimate, and
//! negation patterns. Analysis never fails.

pub mod analyzer;
pub mod category_signals;
pub mod negation;
pub mod polysemy;
pub mod tokenizer;

pub use analyzer::ClueAnalyzer;
pub use polysemy::{EntityTriggerMatcher, PolysemyDetector, PolysemyTier, StaticPolysemyTable};
