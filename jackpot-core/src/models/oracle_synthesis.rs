use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// One oracle guess.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OracleGuess {
    pub answer: String,
    /// 0 to 100.
    pub confidence: u8,
    pub explanation: String,
}

/// Final synthesized answer list for a clue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OracleSynthesis {
    pub top_3: Vec<OracleGuess>,
    pub key_theme: String,
    pub blind_spot: String,
    pub misdirection_detected: Option<String>,
    /// Set when the result was built locally because the oracle call failed.
    pub degraded: bool,
    pub degradation_reason: Option<String>,
    pub latency_ms: u64,
}

impl OracleSynthesis {
    pub fn top_answer(&self) -> Option<&str> {
        self.top_3.first().map(|g| g.answer.as_str())
    }
}
