use std::time::Duration;

use async_trait::async_trait;
use jackpot_core::config::LlmConfig;
use jackpot_core::errors::{ConfigurationError, ExternalServiceError, JackpotResult};
use jackpot_core::traits::{GenerationRequest, ITextGenerator};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f64,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Client for any `/chat/completions` endpoint speaking the OpenAI wire format.
#[derive(Debug, Clone)]
pub struct OpenAiCompatibleGenerator {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: String,
    timeout: Duration,
}

impl OpenAiCompatibleGenerator {
    pub fn new(
        base_url: &str,
        model: impl Into<String>,
        api_key: impl Into<String>,
        request_timeout: Duration,
    ) -> JackpotResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|e| ConfigurationError::InvalidConfig {
                reason: format!("cannot build HTTP client: {e}"),
            })?;
        Ok(Self {
            client,
            endpoint: format!("{}/chat/completions", base_url.trim_end_matches('/')),
            model: model.into(),
            api_key: api_key.into(),
            timeout: request_timeout,
        })
    }

    /// Build from config, reading the key from `api_key_env`.
    pub fn from_config(config: &LlmConfig) -> JackpotResult<Self> {
        let api_key = std::env::var(&config.api_key_env).map_err(|_| {
            ConfigurationError::InvalidConfig {
                reason: format!("environment variable {} is not set", config.api_key_env),
            }
        })?;
        Self::new(
            &config.base_url,
            config.model.clone(),
            api_key,
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn unavailable(&self, reason: String) -> jackpot_core::errors::JackpotError {
        ExternalServiceError::Unavailable {
            service: self.endpoint.clone(),
            reason,
        }
        .into()
    }
}

#[async_trait]
impl ITextGenerator for OpenAiCompatibleGenerator {
    async fn complete(&self, request: &GenerationRequest) -> JackpotResult<String> {
        let body = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &request.system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: &request.user_prompt,
                },
            ],
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ExternalServiceError::Timeout {
                        service: self.endpoint.clone(),
                        timeout_ms: self.timeout.as_millis() as u64,
                    }
                    .into()
                } else {
                    self.unavailable(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(self.unavailable(format!("HTTP {status}")));
        }

        let parsed: ChatResponse = response.json().await.map_err(|e| {
            ExternalServiceError::MalformedResponse {
                service: self.endpoint.clone(),
                reason: e.to_string(),
            }
        })?;
        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .ok_or_else(|| ExternalServiceError::MalformedResponse {
                service: self.endpoint.clone(),
                reason: "no completion content".to_string(),
            })?;

        debug!(model = %self.model, chars = content.len(), "completion received");
        Ok(content)
    }

    fn name(&self) -> &str {
        &self.model
    }
}
