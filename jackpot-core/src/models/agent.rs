use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// The fixed set of ensemble strategies.
///
/// Declaration order is the tie-break priority for voting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum AgentStrategy {
    Lateral,
    Wordsmith,
    PopCulture,
    Literal,
    WildCard,
}

impl AgentStrategy {
    pub const ALL: [AgentStrategy; 5] = [
        AgentStrategy::Lateral,
        AgentStrategy::Wordsmith,
        AgentStrategy::PopCulture,
        AgentStrategy::Literal,
        AgentStrategy::WildCard,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Lateral => "lateral",
            Self::Wordsmith => "wordsmith",
            Self::PopCulture => "pop_culture",
            Self::Literal => "literal",
            Self::WildCard => "wild_card",
        }
    }

    /// Role title used in prompts.
    pub fn title(self) -> &'static str {
        match self {
            Self::Lateral => "Lateral Thinker",
            Self::Wordsmith => "Wordsmith",
            Self::PopCulture => "Pop Culture Maven",
            Self::Literal => "Literal Analyst",
            Self::WildCard => "Wild Card",
        }
    }

    /// Position in the tie-break order, 0 first.
    pub fn priority(self) -> usize {
        self as usize
    }
}

impl fmt::Display for AgentStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One agent's guess for one clue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AgentPrediction {
    pub agent: AgentStrategy,
    pub answer: String,
    /// In [0, 1].
    pub confidence: f64,
    pub reasoning: String,
    pub latency_ms: u64,
}

/// Why an agent produced no prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum AbsenceReason {
    Timeout,
    Malformed,
    Failed,
    Cancelled,
    Unconfigured,
}

/// An agent either responded or is absent. Absence never fails a clue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum AgentOutcome {
    Responded(AgentPrediction),
    Absent {
        agent: AgentStrategy,
        reason: AbsenceReason,
    },
}

impl AgentOutcome {
    pub fn absent(agent: AgentStrategy, reason: AbsenceReason) -> Self {
        Self::Absent { agent, reason }
    }

    pub fn agent(&self) -> AgentStrategy {
        match self {
            Self::Responded(p) => p.agent,
            Self::Absent { agent, .. } => *agent,
        }
    }

    pub fn prediction(&self) -> Option<&AgentPrediction> {
        match self {
            Self::Responded(p) => Some(p),
            Self::Absent { .. } => None,
        }
    }

    pub fn is_present(&self) -> bool {
        matches!(self, Self::Responded(_))
    }
}
