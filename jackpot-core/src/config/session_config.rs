use serde::{Deserialize, Serialize};

use super::defaults;

/// Session lifetime and guess-now schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Idle sessions older than this are removed by cleanup. Default: 300s.
    pub expiry_secs: u64,
    /// Confidence needed to recommend guessing, indexed by clue number.
    /// Rises with the clue index. Default: [0.50, 0.65, 0.75, 0.85, 0.0].
    pub guess_thresholds: Vec<f64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            expiry_secs: defaults::DEFAULT_SESSION_EXPIRY_SECS,
            guess_thresholds: defaults::DEFAULT_GUESS_THRESHOLDS.to_vec(),
        }
    }
}

impl SessionConfig {
    /// Threshold for a 1-based clue index. Past the schedule, always guess.
    pub fn guess_threshold(&self, clue_index: usize) -> f64 {
        clue_index
            .checked_sub(1)
            .and_then(|i| self.guess_thresholds.get(i))
            .copied()
            .unwrap_or(0.0)
    }
}
