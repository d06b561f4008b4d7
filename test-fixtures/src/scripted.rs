use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use jackpot_core::errors::{ExternalServiceError, JackpotResult};
use jackpot_core::models::AgentStrategy;
use jackpot_core::traits::{GenerationRequest, ITextGenerator};

/// A scripted reply.
#[derive(Debug, Clone)]
pub enum Scripted {
    Reply(String),
    /// Sleep, then reply. Used to trip timeouts.
    Delayed(Duration, String),
    /// Fail as an unavailable service.
    Fail(String),
}

/// Deterministic generator: the first rule whose needle appears in the
/// system prompt decides the response.
#[derive(Debug, Default)]
pub struct ScriptedGenerator {
    rules: Vec<(String, Scripted)>,
    fallback: Option<Scripted>,
    calls: AtomicUsize,
    requests: Mutex<Vec<GenerationRequest>>,
}

impl ScriptedGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Respond with `scripted` when the system prompt contains `needle`.
    pub fn on(mut self, needle: impl Into<String>, scripted: Scripted) -> Self {
        self.rules.push((needle.into(), scripted));
        self
    }

    /// Respond as one agent in the `ANSWER / CONFIDENCE / REASONING` format.
    pub fn on_agent(self, agent: AgentStrategy, answer: &str, confidence: u8) -> Self {
        self.on(agent.title(), Scripted::Reply(agent_reply(answer, confidence)))
    }

    /// Respond to the oracle prompt.
    pub fn on_oracle(self, scripted: Scripted) -> Self {
        self.on("Oracle", scripted)
    }

    /// Response for prompts no rule matches. Without one, they fail.
    pub fn otherwise(mut self, scripted: Scripted) -> Self {
        self.fallback = Some(scripted);
        self
    }

    /// Every agent gives the same answer.
    pub fn unanimous(answer: &str, confidence: u8) -> Self {
        AgentStrategy::ALL
            .into_iter()
            .fold(Self::new(), |g, agent| g.on_agent(agent, answer, confidence))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Requests received so far, in arrival order.
    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }
}

/// An agent reply in the expected line format.
pub fn agent_reply(answer: &str, confidence: u8) -> String {
    format!("ANSWER: {answer}\nCONFIDENCE: {confidence}\nREASONING: scripted")
}

#[async_trait]
impl ITextGenerator for ScriptedGenerator {
    async fn complete(&self, request: &GenerationRequest) -> JackpotResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }

        let scripted = self
            .rules
            .iter()
            .find(|(needle, _)| request.system_prompt.contains(needle.as_str()))
            .map(|(_, s)| s.clone())
            .or_else(|| self.fallback.clone());

        match scripted {
            Some(Scripted::Reply(text)) => Ok(text),
            Some(Scripted::Delayed(delay, text)) => {
                tokio::time::sleep(delay).await;
                Ok(text)
            }
            Some(Scripted::Fail(reason)) => Err(ExternalServiceError::Unavailable {
                service: "scripted".into(),
                reason,
            }
            .into()),
            None => Err(ExternalServiceError::Unavailable {
                service: "scripted".into(),
                reason: "no scripted response".into(),
            }
            .into()),
        }
    }

    fn name(&self) -> &str {
        "scripted"
    }
}
