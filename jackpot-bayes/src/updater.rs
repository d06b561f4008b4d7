use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;

use jackpot_catalog::{CategoryHint, EntityCatalog, SearchHit};
use jackpot_core::config::BayesConfig;
use jackpot_core::constants::MAX_CLUES;
use jackpot_core::errors::{ConfigurationError, JackpotError, JackpotResult};
use jackpot_core::models::{ClueAnalysis, EntityBelief, RankedEntity, SessionState};
use tracing::{debug, instrument, warn};

use crate::confidence::next_confidence;
use crate::likelihood::{self, Likelihood};

/// Sequential Bayesian updater over a shared catalog.
///
/// Stateless between calls: every update reads a [`SessionState`] and
/// returns the next one, so a caller can drop the result on cancellation.
#[derive(Debug, Clone)]
pub struct BayesianUpdater {
    catalog: Arc<EntityCatalog>,
    config: BayesConfig,
}

impl BayesianUpdater {
    pub fn new(catalog: Arc<EntityCatalog>, config: BayesConfig) -> Self {
        Self { catalog, config }
    }

    pub fn catalog(&self) -> &Arc<EntityCatalog> {
        &self.catalog
    }

    pub fn config(&self) -> &BayesConfig {
        &self.config
    }

    /// Fresh state: base priors, initial confidence, no clues.
    pub fn initial_state(&self, session_id: impl Into<String>) -> SessionState {
        let beliefs = self
            .catalog
            .entities()
            .iter()
            .map(|e| EntityBelief::new(e.base_prior, self.config.initial_confidence))
            .collect();
        let mut state = SessionState::new(session_id, beliefs);
        state.category_probs = self.catalog.category_priors();
        state
    }

    /// Candidate search for a clue: every keyword form, with the analyzer's
    /// dominant category as the hint.
    pub fn search(&self, analysis: &ClueAnalysis) -> Vec<SearchHit> {
        let forms = analysis.keyword_forms();
        self.catalog
            .search(&forms, Some(CategoryHint::from_probs(&analysis.category_probs)))
    }

    /// Fold one analyzed clue into `state` and return the next state.
    ///
    /// Every entity is rescored, not just the search hits. Fails with
    /// `OutOfTurns` once five clues are recorded.
    #[instrument(skip_all, fields(session = %state.session_id, clue = analysis.clue_index))]
    pub fn update(
        &self,
        state: &SessionState,
        analysis: &ClueAnalysis,
        hits: &[SearchHit],
    ) -> JackpotResult<SessionState> {
        if state.clue_count() >= MAX_CLUES {
            return Err(JackpotError::out_of_turns(state.clue_count(), MAX_CLUES));
        }
        if state.beliefs.len() != self.catalog.len() {
            return Err(ConfigurationError::InvalidConfig {
                reason: format!(
                    "session holds {} beliefs for a catalog of {}",
                    state.beliefs.len(),
                    self.catalog.len()
                ),
            }
            .into());
        }

        let mut next = state.clone();
        let clue_index = next.push_clue(analysis.clue_text.clone());
        if analysis.clue_index != clue_index {
            warn!(
                expected = clue_index,
                analyzed = analysis.clue_index,
                "clue analyzed with a different index than it was recorded at"
            );
        }

        let scores: HashMap<usize, f64> = hits.iter().map(|h| (h.index, h.score)).collect();
        let likelihoods: Vec<Likelihood> = self
            .catalog
            .entities()
            .iter()
            .enumerate()
            .map(|(i, entity)| {
                let score = scores.get(&i).copied().unwrap_or(0.0);
                likelihood::compute(entity, analysis, score, &self.config)
            })
            .collect();

        let mut unnormalized: Vec<f64> = next
            .beliefs
            .iter()
            .zip(&likelihoods)
            .map(|(belief, lk)| belief.probability * lk.value)
            .collect();

        let (dominant, mass) = analysis.category_probs.dominant();
        if mass > self.config.contradiction_threshold {
            for (i, entity) in self.catalog.entities().iter().enumerate() {
                if entity.category != dominant {
                    unnormalized[i] *= self.config.contradiction_penalty;
                }
            }
        }

        let total: f64 = unnormalized.iter().sum();
        let posterior: Vec<f64> = if total.is_finite() && total > 0.0 {
            unnormalized.iter().map(|p| p / total).collect()
        } else {
            warn!(total, "posterior collapsed, falling back to base priors");
            self.catalog.entities().iter().map(|e| e.base_prior).collect()
        };

        for ((belief, lk), probability) in next.beliefs.iter_mut().zip(&likelihoods).zip(posterior) {
            belief.probability = probability;
            belief.confidence = next_confidence(belief.confidence, lk, &self.config);
            belief.reasoning = reasoning(clue_index, &analysis.clue_text, lk);
            belief
                .evidence
                .extend(lk.evidence.iter().map(|e| format!("clue {clue_index}: {e}")));
        }
        next.category_probs = analysis.category_probs;

        debug!(
            hits = hits.len(),
            dominant = %dominant,
            mass,
            sum = next.probability_sum(),
            "posterior updated"
        );
        Ok(next)
    }

    /// Top `top_k` entities by probability, then confidence, then catalog order.
    pub fn rank(&self, state: &SessionState, top_k: usize) -> Vec<RankedEntity> {
        let mut order: Vec<usize> = (0..state.beliefs.len().min(self.catalog.len())).collect();
        order.sort_by(|&a, &b| {
            let (x, y) = (&state.beliefs[a], &state.beliefs[b]);
            y.probability
                .partial_cmp(&x.probability)
                .unwrap_or(Ordering::Equal)
                .then(y.confidence.partial_cmp(&x.confidence).unwrap_or(Ordering::Equal))
                .then(a.cmp(&b))
        });

        order
            .into_iter()
            .take(top_k)
            .filter_map(|i| {
                let entity = self.catalog.entity(i)?;
                let belief = &state.beliefs[i];
                Some(RankedEntity {
                    name: entity.name.clone(),
                    category: entity.category,
                    probability: belief.probability,
                    confidence: belief.confidence,
                    reasoning: belief.reasoning.clone(),
                    evidence: belief.evidence.clone(),
                })
            })
            .collect()
    }
}

fn reasoning(clue_index: usize, clue_text: &str, lk: &Likelihood) -> String {
    if lk.evidence.is_empty() && lk.notes.is_empty() {
        return format!("Weak match for '{}'", clue_text.trim());
    }
    let mut line = format!("Clue {clue_index}:");
    for part in lk.evidence.iter().chain(&lk.notes) {
        line.push_str(" | ");
        line.push_str(part);
    }
    line
}
