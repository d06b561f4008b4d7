use serde::{Deserialize, Serialize};

use super::defaults;

/// Agent fan-out and voting configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnsembleConfig {
    /// Per-agent timeout. Default: 5000ms.
    pub agent_timeout_ms: u64,
    /// Completion budget per agent call. Default: 150.
    pub agent_max_tokens: u32,
    /// Scale votes by per-stage strategy weights. Default: false.
    pub stage_weights_enabled: bool,
    /// Supporter share needed for strong agreement. Default: 0.8.
    pub strong_agreement_ratio: f64,
    /// Responders needed for strong agreement. Default: 3.
    pub strong_min_responders: usize,
    /// Supporters needed for moderate agreement. Default: 2.
    pub moderate_min_supporters: usize,
}

impl Default for EnsembleConfig {
    fn default() -> Self {
        Self {
            agent_timeout_ms: defaults::DEFAULT_AGENT_TIMEOUT_MS,
            agent_max_tokens: defaults::DEFAULT_AGENT_MAX_TOKENS,
            stage_weights_enabled: false,
            strong_agreement_ratio: defaults::DEFAULT_STRONG_AGREEMENT_RATIO,
            strong_min_responders: defaults::DEFAULT_STRONG_MIN_RESPONDERS,
            moderate_min_supporters: defaults::DEFAULT_MODERATE_MIN_SUPPORTERS,
        }
    }
}

/// Oracle synthesizer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OracleConfig {
    /// Oracle call timeout. Default: 8000ms.
    pub timeout_ms: u64,
    /// Completion budget for the oracle call. Default: 600.
    pub max_tokens: u32,
    /// Sampling temperature. Default: 0.3.
    pub temperature: f64,
    /// Bayesian candidates listed in the prompt. Default: 5.
    pub bayesian_candidates: usize,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            timeout_ms: defaults::DEFAULT_ORACLE_TIMEOUT_MS,
            max_tokens: defaults::DEFAULT_ORACLE_MAX_TOKENS,
            temperature: defaults::DEFAULT_ORACLE_TEMPERATURE,
            bayesian_candidates: defaults::DEFAULT_ORACLE_CANDIDATES,
        }
    }
}
