use serde::{Deserialize, Serialize};

use super::defaults;

/// Clue analyzer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Tokens shorter than this are not keywords. Default: 3.
    pub min_token_len: usize,
    /// Weight kept on the catalog prior when blending in category signals. Default: 0.7.
    pub category_prior_weight: f64,
    /// Weight of signal words found in earlier clues. Default: 0.5.
    pub history_signal_weight: f64,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            min_token_len: defaults::DEFAULT_MIN_TOKEN_LEN,
            category_prior_weight: defaults::DEFAULT_CATEGORY_PRIOR_WEIGHT,
            history_signal_weight: defaults::DEFAULT_HISTORY_SIGNAL_WEIGHT,
        }
    }
}
