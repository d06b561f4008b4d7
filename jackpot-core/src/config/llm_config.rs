use serde::{Deserialize, Serialize};

use super::defaults;

/// OpenAI-compatible text generation endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Base URL, without the `/chat/completions` suffix.
    pub base_url: String,
    /// Model identifier sent with every request.
    pub model: String,
    /// Environment variable holding the API key.
    pub api_key_env: String,
    /// HTTP client timeout. Default: 30s.
    pub request_timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::DEFAULT_LLM_BASE_URL.to_string(),
            model: defaults::DEFAULT_LLM_MODEL.to_string(),
            api_key_env: defaults::DEFAULT_LLM_API_KEY_ENV.to_string(),
            request_timeout_secs: defaults::DEFAULT_LLM_REQUEST_TIMEOUT_SECS,
        }
    }
}
