use jackpot_core::config::AnalyzerConfig;
use jackpot_core::models::{CategoryProbs, ClueAnalysis, ClueStage};
use tracing::{debug, instrument};

use crate::category_signals::{blend, detect_signals, signal_mass};
use crate::negation::extract_negations;
use crate::polysemy::PolysemyDetector;
use crate::tokenizer::extract_keywords;

/// Extracts keywords, polysemy, category signals and negations from a clue.
///
/// The analysis is a pure function of the clue text, its index and the
/// earlier clues, so replaying a clue list reproduces it exactly.
pub struct ClueAnalyzer {
    config: AnalyzerConfig,
    priors: CategoryProbs,
    polysemy: PolysemyDetector,
}

impl ClueAnalyzer {
    pub fn new(config: AnalyzerConfig, priors: CategoryProbs, polysemy: PolysemyDetector) -> Self {
        Self {
            config,
            priors: priors.normalized(),
            polysemy,
        }
    }

    /// Analyzer with the default two-tier polysemy detector.
    pub fn with_triggers(
        config: AnalyzerConfig,
        priors: CategoryProbs,
        trigger_vocabulary: Vec<String>,
    ) -> Self {
        Self::new(config, priors, PolysemyDetector::two_tier(trigger_vocabulary))
    }

    /// Analyze one clue. `history` holds the clues before this one.
    #[instrument(skip(self, history), fields(history = history.len()))]
    pub fn analyze(&self, clue_text: &str, clue_index: usize, history: &[String]) -> ClueAnalysis {
        let keywords = extract_keywords(clue_text, self.config.min_token_len);
        let polysemous_terms = self.polysemy.detect(&keywords);

        let current = detect_signals(clue_text);
        let mut mass = signal_mass(&current, 1.0);
        for earlier in history {
            let earlier_mass = signal_mass(&detect_signals(earlier), self.config.history_signal_weight);
            for (category, value) in earlier_mass.iter() {
                mass.set(category, mass.get(category) + value);
            }
        }
        let category_probs = blend(&self.priors, &mass, self.config.category_prior_weight);

        let negation_patterns = extract_negations(clue_text);

        let mut category_signals: Vec<String> = Vec::new();
        for (_, word) in current {
            if !category_signals.contains(&word) {
                category_signals.push(word);
            }
        }

        debug!(
            keywords = keywords.len(),
            polysemous = polysemous_terms.len(),
            negations = negation_patterns.len(),
            dominant = %category_probs.dominant().0,
            "clue analyzed"
        );

        ClueAnalysis {
            clue_text: clue_text.to_string(),
            clue_index,
            stage: ClueStage::from_index(clue_index),
            keywords,
            polysemous_terms,
            category_probs,
            category_signals,
            negation_patterns,
        }
    }

    pub fn priors(&self) -> &CategoryProbs {
        &self.priors
    }
}
