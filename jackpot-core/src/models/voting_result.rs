use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::AgentStrategy;

/// How many responding agents back the recommended pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum AgreementStrength {
    Strong,
    Moderate,
    Weak,
    None,
}

impl AgreementStrength {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Strong => "strong",
            Self::Moderate => "moderate",
            Self::Weak => "weak",
            Self::None => "none",
        }
    }
}

/// Aggregated vote for one distinct answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct VoteTally {
    /// Display spelling, taken from the first agent to propose it.
    pub answer: String,
    pub weight: f64,
    pub agents: Vec<AgentStrategy>,
    pub avg_confidence: f64,
}

/// Outcome of the ensemble vote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct VotingResult {
    /// Ranked by weight, heaviest first.
    pub vote_breakdown: Vec<VoteTally>,
    pub recommended_pick: Option<String>,
    pub recommended_confidence: f64,
    pub agreement_strength: AgreementStrength,
    pub responding_agents: usize,
    /// Reasoning of the most confident agent backing the pick.
    pub key_insight: Option<String>,
}

impl VotingResult {
    /// Result when no agent responded.
    pub fn empty() -> Self {
        Self {
            vote_breakdown: Vec::new(),
            recommended_pick: None,
            recommended_confidence: 0.0,
            agreement_strength: AgreementStrength::None,
            responding_agents: 0,
            key_insight: None,
        }
    }
}
