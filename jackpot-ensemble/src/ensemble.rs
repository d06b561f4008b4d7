use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::future::join_all;
use jackpot_core::config::EnsembleConfig;
use jackpot_core::models::{AbsenceReason, AgentOutcome, AgentStrategy, Category, ClueInsight};
use jackpot_core::traits::{GenerationRequest, ITextGenerator};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::agents::{parse_response, system_prompt, temperature, user_prompt};

/// Runs the five strategies concurrently against one generator.
///
/// Each agent has its own timeout. A slow, failing or unparsable agent
/// becomes [`AgentOutcome::Absent`]; the others still count.
#[derive(Clone)]
pub struct AgentEnsemble {
    generator: Option<Arc<dyn ITextGenerator>>,
    config: EnsembleConfig,
}

impl std::fmt::Debug for AgentEnsemble {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AgentEnsemble")
            .field("generator", &self.generator.as_ref().map(|g| g.name().to_string()))
            .field("config", &self.config)
            .finish()
    }
}

impl AgentEnsemble {
    pub fn new(generator: Arc<dyn ITextGenerator>, config: EnsembleConfig) -> Self {
        Self {
            generator: Some(generator),
            config,
        }
    }

    /// Ensemble with no generator. Every agent reports `Unconfigured`.
    pub fn unconfigured(config: EnsembleConfig) -> Self {
        Self {
            generator: None,
            config,
        }
    }

    pub fn config(&self) -> &EnsembleConfig {
        &self.config
    }

    /// Query every strategy with the clues so far and the conclusions
    /// recorded for earlier clues.
    ///
    /// Outcomes come back in strategy priority order. Cancelling the token
    /// aborts in-flight calls; their agents report `Cancelled`.
    pub async fn predict(
        &self,
        clues: &[String],
        category_hint: Option<Category>,
        prior: &[ClueInsight],
        cancel: &CancellationToken,
    ) -> Vec<AgentOutcome> {
        let Some(generator) = self.generator.as_deref() else {
            debug!("no text generator configured, all agents absent");
            return AgentStrategy::ALL
                .into_iter()
                .map(|agent| AgentOutcome::absent(agent, AbsenceReason::Unconfigured))
                .collect();
        };

        let prompt = user_prompt(clues, category_hint, prior);
        let started = Instant::now();
        let calls = AgentStrategy::ALL
            .into_iter()
            .map(|agent| self.run_agent(generator, agent, &prompt, cancel));
        let outcomes = join_all(calls).await;

        let responded = outcomes.iter().filter(|o| o.is_present()).count();
        info!(
            responded,
            total = outcomes.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "agent fan-in complete"
        );
        outcomes
    }

    async fn run_agent(
        &self,
        generator: &dyn ITextGenerator,
        agent: AgentStrategy,
        prompt: &str,
        cancel: &CancellationToken,
    ) -> AgentOutcome {
        let request = GenerationRequest::new(system_prompt(agent), prompt)
            .with_temperature(temperature(agent))
            .with_max_tokens(self.config.agent_max_tokens);
        let timeout = Duration::from_millis(self.config.agent_timeout_ms);
        let started = Instant::now();

        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!(agent = %agent, "agent call cancelled");
                return AgentOutcome::absent(agent, AbsenceReason::Cancelled);
            }
            result = tokio::time::timeout(timeout, generator.complete(&request)) => result,
        };
        let latency_ms = started.elapsed().as_millis() as u64;

        match result {
            Err(_) => {
                warn!(agent = %agent, timeout_ms = self.config.agent_timeout_ms, "agent timed out");
                AgentOutcome::absent(agent, AbsenceReason::Timeout)
            }
            Ok(Err(e)) => {
                warn!(agent = %agent, error = %e, "agent call failed");
                AgentOutcome::absent(agent, AbsenceReason::Failed)
            }
            Ok(Ok(text)) => match parse_response(agent, &text, latency_ms) {
                Ok(prediction) => {
                    debug!(
                        agent = %agent,
                        answer = %prediction.answer,
                        confidence = prediction.confidence,
                        latency_ms,
                        "agent responded"
                    );
                    AgentOutcome::Responded(prediction)
                }
                Err(e) => {
                    warn!(agent = %agent, error = %e, "agent reply unparsable");
                    AgentOutcome::absent(agent, AbsenceReason::Malformed)
                }
            },
        }
    }
}
