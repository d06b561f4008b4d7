//! Meta-synthesis of the Bayesian ranking and the agent vote.

mod fallback;
mod parse;
mod prompt;

pub use fallback::fallback_synthesis;
pub use parse::parse_synthesis;
pub use prompt::{build_prompt, ORACLE_SYSTEM_PROMPT};

use std::sync::Arc;
use std::time::{Duration, Instant};

use jackpot_core::config::OracleConfig;
use jackpot_core::models::{ClueInsight, OracleSynthesis, RankedEntity, VotingResult};
use jackpot_core::traits::{GenerationRequest, ITextGenerator};
use tracing::{info, warn};

/// Produces the final top three for a clue. Never fails: any timeout,
/// transport error or unparsable reply yields a degraded local synthesis.
#[derive(Clone)]
pub struct OracleSynthesizer {
    generator: Option<Arc<dyn ITextGenerator>>,
    config: OracleConfig,
}

impl std::fmt::Debug for OracleSynthesizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OracleSynthesizer")
            .field("generator", &self.generator.as_ref().map(|g| g.name().to_string()))
            .field("config", &self.config)
            .finish()
    }
}

impl OracleSynthesizer {
    pub fn new(generator: Arc<dyn ITextGenerator>, config: OracleConfig) -> Self {
        Self {
            generator: Some(generator),
            config,
        }
    }

    /// Synthesizer that always falls back.
    pub fn unconfigured(config: OracleConfig) -> Self {
        Self {
            generator: None,
            config,
        }
    }

    pub fn config(&self) -> &OracleConfig {
        &self.config
    }

    /// Synthesize from the Bayesian candidates, the vote, the clue log and
    /// the conclusions recorded for earlier clues.
    pub async fn synthesize(
        &self,
        candidates: &[RankedEntity],
        voting: &VotingResult,
        clues: &[String],
        prior: &[ClueInsight],
    ) -> OracleSynthesis {
        let started = Instant::now();
        let Some(generator) = self.generator.as_deref() else {
            return fallback_synthesis(candidates, voting, "oracle not configured", 0);
        };

        let shown = &candidates[..candidates.len().min(self.config.bayesian_candidates)];
        let request = GenerationRequest::new(ORACLE_SYSTEM_PROMPT, build_prompt(shown, voting, clues, prior))
            .with_temperature(self.config.temperature)
            .with_max_tokens(self.config.max_tokens);
        let timeout = Duration::from_millis(self.config.timeout_ms);

        let reply = tokio::time::timeout(timeout, generator.complete(&request)).await;
        let latency_ms = started.elapsed().as_millis() as u64;

        let failure = match reply {
            Err(_) => format!("oracle timed out after {}ms", self.config.timeout_ms),
            Ok(Err(e)) => e.to_string(),
            Ok(Ok(text)) => match parse_synthesis(&text) {
                Ok(mut synthesis) => {
                    synthesis.latency_ms = latency_ms;
                    info!(
                        top = synthesis.top_answer().unwrap_or_default(),
                        theme = %synthesis.key_theme,
                        latency_ms,
                        "oracle synthesis"
                    );
                    return synthesis;
                }
                Err(e) => e.to_string(),
            },
        };

        warn!(reason = %failure, latency_ms, "oracle degraded to local synthesis");
        fallback_synthesis(candidates, voting, &failure, latency_ms)
    }
}
