use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::JackpotResult;

/// A single prompt for a text-generation service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub system_prompt: String,
    pub user_prompt: String,
    pub temperature: f64,
    pub max_tokens: u32,
}

impl GenerationRequest {
    pub fn new(system_prompt: impl Into<String>, user_prompt: impl Into<String>) -> Self {
        Self {
            system_prompt: system_prompt.into(),
            user_prompt: user_prompt.into(),
            temperature: 0.2,
            max_tokens: 150,
        }
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

/// Prompt in, short text out. Treated as unreliable by every caller.
#[async_trait]
pub trait ITextGenerator: Send + Sync {
    async fn complete(&self, request: &GenerationRequest) -> JackpotResult<String>;

    /// Human-readable generator name.
    fn name(&self) -> &str;
}
