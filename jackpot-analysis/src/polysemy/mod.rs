//! Two-tier polysemy detection: a fixed table of ambiguous words, then a
//! matcher against the catalog's own trigger phrases.

mod static_table;
mod trigger_matcher;

pub use static_table::StaticPolysemyTable;
pub use trigger_matcher::EntityTriggerMatcher;

use jackpot_core::models::{Keyword, PolysemousTerm};

/// One source of polysemy detections.
pub trait PolysemyTier: Send + Sync {
    fn detect(&self, keywords: &[Keyword]) -> Vec<PolysemousTerm>;

    fn name(&self) -> &str;
}

/// Runs every tier in order and merges detections by term.
pub struct PolysemyDetector {
    tiers: Vec<Box<dyn PolysemyTier>>,
}

impl PolysemyDetector {
    pub fn new(tiers: Vec<Box<dyn PolysemyTier>>) -> Self {
        Self { tiers }
    }

    /// Static table first, then the catalog trigger matcher.
    pub fn two_tier(trigger_vocabulary: Vec<String>) -> Self {
        Self::new(vec![
            Box::new(StaticPolysemyTable::new()),
            Box::new(EntityTriggerMatcher::new(trigger_vocabulary)),
        ])
    }

    /// Detections from all tiers. A term found by several tiers keeps the
    /// first tier's source and the union of meanings.
    pub fn detect(&self, keywords: &[Keyword]) -> Vec<PolysemousTerm> {
        let mut merged: Vec<PolysemousTerm> = Vec::new();
        for tier in &self.tiers {
            for found in tier.detect(keywords) {
                match merged.iter_mut().find(|t| t.term == found.term) {
                    Some(existing) => {
                        for meaning in found.meanings {
                            if !existing.meanings.contains(&meaning) {
                                existing.meanings.push(meaning);
                            }
                        }
                    }
                    None => merged.push(found),
                }
            }
        }
        merged
    }

    pub fn tier_names(&self) -> Vec<&str> {
        self.tiers.iter().map(|t| t.name()).collect()
    }
}
