use std::path::PathBuf;

use jackpot_core::errors::{ConfigurationError, JackpotResult};
use jackpot_core::models::Entity;
use jackpot_core::traits::IEntitySource;

/// A JSON file holding an array of entity records.
#[derive(Debug, Clone)]
pub struct JsonEntitySource {
    path: PathBuf,
}

impl JsonEntitySource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Parse an array of entity records.
    pub fn parse(json: &str) -> JackpotResult<Vec<Entity>> {
        serde_json::from_str(json).map_err(|e| {
            ConfigurationError::InvalidEntity {
                reason: format!("malformed entity JSON: {e}"),
            }
            .into()
        })
    }
}

impl IEntitySource for JsonEntitySource {
    fn load(&self) -> JackpotResult<Vec<Entity>> {
        let content = std::fs::read_to_string(&self.path).map_err(|e| {
            ConfigurationError::SourceUnavailable {
                source_name: self.path.display().to_string(),
                reason: e.to_string(),
            }
        })?;
        Self::parse(&content)
    }

    fn name(&self) -> &str {
        "json"
    }
}
