use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::{AgentStrategy, AgreementStrength, OracleGuess};

/// One agent's answer on an earlier clue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AgentSnapshot {
    pub agent: AgentStrategy,
    pub answer: String,
    pub confidence: f64,
    /// Start of the agent's reasoning, at most 50 characters.
    pub insight: String,
}

/// What the agents and the oracle concluded on one clue.
///
/// Carried forward so later clues can build on earlier conclusions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ClueInsight {
    pub clue_index: usize,
    pub clue_text: String,
    pub top_answer: Option<String>,
    /// Average confidence of the agents behind the top answer.
    pub top_confidence: f64,
    pub top_agents: Vec<AgentStrategy>,
    pub alt_answer: Option<String>,
    pub alt_confidence: Option<f64>,
    /// Change in `top_confidence` since the previous clue. None on the
    /// first recorded clue.
    pub confidence_delta: Option<f64>,
    pub agreement_strength: AgreementStrength,
    pub agent_snapshots: Vec<AgentSnapshot>,
    /// Oracle's first guess. None when the oracle fell back.
    pub oracle_pick: Option<OracleGuess>,
    pub key_theme: Option<String>,
}

/// Direction of an answer's confidence across clues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ConfidenceTrend {
    New,
    Rising,
    Falling,
    Stable,
}

/// Confidence history of one answer, oldest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct HypothesisTrack {
    /// Normalized answer key.
    pub answer: String,
    pub history: Vec<f64>,
    pub trend: ConfidenceTrend,
}
