pub mod analyzer_config;
pub mod bayes_config;
pub mod catalog_config;
pub mod defaults;
pub mod ensemble_config;
pub mod llm_config;
pub mod observability_config;
pub mod session_config;

pub use analyzer_config::AnalyzerConfig;
pub use bayes_config::BayesConfig;
pub use catalog_config::CatalogConfig;
pub use ensemble_config::{EnsembleConfig, OracleConfig};
pub use llm_config::LlmConfig;
pub use observability_config::ObservabilityConfig;
pub use session_config::SessionConfig;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::MAX_CLUES;
use crate::errors::{ConfigurationError, JackpotResult};

/// Top-level configuration. Every section falls back to its defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct JackpotConfig {
    pub catalog: CatalogConfig,
    pub analyzer: AnalyzerConfig,
    pub bayes: BayesConfig,
    pub ensemble: EnsembleConfig,
    pub oracle: OracleConfig,
    pub session: SessionConfig,
    pub llm: LlmConfig,
    pub observability: ObservabilityConfig,
}

impl JackpotConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml(toml_str: &str) -> JackpotResult<Self> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn from_file(path: &Path) -> JackpotResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ConfigurationError::InvalidConfig {
                reason: format!("cannot read {}: {e}", path.display()),
            }
        })?;
        Self::from_toml(&content)
    }

    /// Reject values the engine cannot run with.
    pub fn validate(&self) -> JackpotResult<()> {
        let priors = [
            self.catalog.prior_thing,
            self.catalog.prior_place,
            self.catalog.prior_person,
        ];
        if priors.iter().any(|p| *p < 0.0) || priors.iter().sum::<f64>() <= 0.0 {
            return Err(invalid("category priors must be non-negative with a positive sum"));
        }
        if self.bayes.polysemy_bonus < 1.0 {
            return Err(invalid("polysemy_bonus must be >= 1.0"));
        }
        if !(0.0..=1.0).contains(&self.bayes.confidence_ceiling) {
            return Err(invalid("confidence_ceiling must be within [0, 1]"));
        }
        if self.bayes.contradiction_penalty <= 0.0 {
            return Err(invalid("contradiction_penalty must be positive"));
        }
        if self.session.guess_thresholds.len() != MAX_CLUES {
            return Err(invalid(&format!(
                "guess_thresholds must hold {MAX_CLUES} values, got {}",
                self.session.guess_thresholds.len()
            )));
        }
        Ok(())
    }
}

fn invalid(reason: &str) -> crate::errors::JackpotError {
    ConfigurationError::InvalidConfig {
        reason: reason.to_string(),
    }
    .into()
}
