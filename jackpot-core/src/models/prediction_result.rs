use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::{
    AgentOutcome, CategoryProbs, ClueStage, HypothesisTrack, OracleSynthesis, RankedEntity,
    SessionStatus, VotingResult,
};

/// Guess-now advice for the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GuessRecommendation {
    pub should_guess: bool,
    pub threshold: f64,
    pub top_confidence: f64,
    pub rationale: String,
}

/// Everything returned for one submitted clue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PredictionResult {
    pub session_id: String,
    pub clue_index: usize,
    pub stage: ClueStage,
    pub status: SessionStatus,
    pub predictions: Vec<RankedEntity>,
    pub category_probs: CategoryProbs,
    pub agents: Vec<AgentOutcome>,
    pub voting: VotingResult,
    pub oracle: OracleSynthesis,
    pub guess: GuessRecommendation,
    /// Confidence history of every answer the vote has put first or second.
    pub hypotheses: Vec<HypothesisTrack>,
    /// True when any agent was absent or the oracle fell back.
    pub degraded: bool,
    pub latency_ms: u64,
}

impl PredictionResult {
    pub fn top_prediction(&self) -> Option<&RankedEntity> {
        self.predictions.first()
    }
}
