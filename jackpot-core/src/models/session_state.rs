use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::{Category, CategoryProbs, ClueInsight};
use crate::constants::MAX_CLUES;

/// Lifecycle of a puzzle session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum SessionStatus {
    Empty,
    InProgress,
    Complete,
}

/// Current belief about one catalog entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityBelief {
    /// Normalized posterior. Sums to 1 across the catalog.
    pub probability: f64,
    /// Accumulated evidence strength in [0, 1]. Not a probability.
    pub confidence: f64,
    /// Evidence notes from every clue that moved this entity.
    pub evidence: Vec<String>,
    /// Reasoning line from the most recent clue.
    pub reasoning: String,
}

impl EntityBelief {
    pub fn new(probability: f64, confidence: f64) -> Self {
        Self {
            probability,
            confidence,
            evidence: Vec::new(),
            reasoning: String::new(),
        }
    }
}

/// Belief state of one puzzle.
///
/// `beliefs` is indexed by catalog position. The clue log only grows
/// through [`SessionState::push_clue`]; edits replay a fresh state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionState {
    pub session_id: String,
    clue_history: Vec<String>,
    pub beliefs: Vec<EntityBelief>,
    /// Category estimate from the most recent clue.
    pub category_probs: CategoryProbs,
    /// Agent and oracle conclusions, one per clue that ran the full pipeline.
    #[serde(default)]
    pub insights: Vec<ClueInsight>,
    pub created_at: DateTime<Utc>,
}

impl SessionState {
    pub fn new(session_id: impl Into<String>, beliefs: Vec<EntityBelief>) -> Self {
        Self {
            session_id: session_id.into(),
            clue_history: Vec::new(),
            beliefs,
            category_probs: CategoryProbs::default(),
            insights: Vec::new(),
            created_at: Utc::now(),
        }
    }

    pub fn clue_history(&self) -> &[String] {
        &self.clue_history
    }

    pub fn clue_count(&self) -> usize {
        self.clue_history.len()
    }

    /// Append a clue to the log. Returns the new 1-based clue index.
    pub fn push_clue(&mut self, clue_text: impl Into<String>) -> usize {
        self.clue_history.push(clue_text.into());
        self.clue_history.len()
    }

    pub fn status(&self) -> SessionStatus {
        match self.clue_count() {
            0 => SessionStatus::Empty,
            n if n >= MAX_CLUES => SessionStatus::Complete,
            _ => SessionStatus::InProgress,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.status() == SessionStatus::Complete
    }

    pub fn probability_sum(&self) -> f64 {
        self.beliefs.iter().map(|b| b.probability).sum()
    }

    pub fn probabilities(&self) -> Vec<f64> {
        self.beliefs.iter().map(|b| b.probability).collect()
    }
}

/// One row of a ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RankedEntity {
    pub name: String,
    pub category: Category,
    pub probability: f64,
    pub confidence: f64,
    pub reasoning: String,
    pub evidence: Vec<String>,
}
