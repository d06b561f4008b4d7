//! The per-clue prediction pipeline.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use jackpot_analysis::ClueAnalyzer;
use jackpot_bayes::BayesianUpdater;
use jackpot_catalog::EntityCatalog;
use jackpot_core::config::JackpotConfig;
use jackpot_core::constants::MAX_CLUES;
use jackpot_core::errors::{ConfigurationError, JackpotError, JackpotResult, SessionError};
use jackpot_core::models::{
    AbsenceReason, AgentOutcome, ClueInsight, DegradationEvent, OracleSynthesis,
    PredictionResult, SessionState,
};
use jackpot_core::traits::{IEntitySource, ITextGenerator};
use jackpot_ensemble::{trail, vote, AgentEnsemble, OracleSynthesizer};
use jackpot_observability::degradation::components;
use jackpot_observability::tracing_setup::events;
use jackpot_observability::{DegradationTracker, TrackedDegradation};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, Instrument};
use uuid::Uuid;

use crate::guess::recommend;
use crate::manager::{SessionEntry, SessionManager};

/// Owns the catalog, the pipeline stages and every live session.
pub struct PredictionEngine {
    catalog: Arc<EntityCatalog>,
    analyzer: ClueAnalyzer,
    updater: BayesianUpdater,
    ensemble: AgentEnsemble,
    oracle: OracleSynthesizer,
    sessions: SessionManager,
    degradations: Mutex<DegradationTracker>,
    has_generator: bool,
    config: JackpotConfig,
}

impl std::fmt::Debug for PredictionEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PredictionEngine")
            .field("catalog", &self.catalog)
            .field("sessions", &self.sessions.session_count())
            .field("has_generator", &self.has_generator)
            .finish()
    }
}

impl PredictionEngine {
    /// Build the engine over a loaded catalog.
    ///
    /// Without a generator every agent is absent and the oracle always
    /// falls back to the local synthesis.
    pub fn new(
        catalog: Arc<EntityCatalog>,
        config: JackpotConfig,
        generator: Option<Arc<dyn ITextGenerator>>,
    ) -> JackpotResult<Self> {
        config.validate()?;
        if catalog.is_empty() {
            return Err(ConfigurationError::EmptyCatalog.into());
        }

        let analyzer = ClueAnalyzer::with_triggers(
            config.analyzer.clone(),
            catalog.category_priors(),
            catalog.trigger_vocabulary().to_vec(),
        );
        let updater = BayesianUpdater::new(Arc::clone(&catalog), config.bayes.clone());
        let (ensemble, oracle) = match &generator {
            Some(g) => (
                AgentEnsemble::new(Arc::clone(g), config.ensemble.clone()),
                OracleSynthesizer::new(Arc::clone(g), config.oracle.clone()),
            ),
            None => (
                AgentEnsemble::unconfigured(config.ensemble.clone()),
                OracleSynthesizer::unconfigured(config.oracle.clone()),
            ),
        };

        info!(
            entities = catalog.len(),
            generator = generator.as_ref().map_or("none", |g| g.name()),
            "prediction engine ready"
        );

        Ok(Self {
            catalog,
            analyzer,
            updater,
            ensemble,
            oracle,
            sessions: SessionManager::new(),
            degradations: Mutex::new(DegradationTracker::new()),
            has_generator: generator.is_some(),
            config,
        })
    }

    /// Load the catalog from `source`, then build the engine.
    pub fn from_source(
        source: &dyn IEntitySource,
        config: JackpotConfig,
        generator: Option<Arc<dyn ITextGenerator>>,
    ) -> JackpotResult<Self> {
        let catalog = EntityCatalog::load(source, &config.catalog)?;
        Self::new(Arc::new(catalog), config, generator)
    }

    /// Start an empty session and return its id.
    pub fn create_session(&self) -> String {
        let session_id = Uuid::new_v4().to_string();
        self.sessions
            .insert(self.updater.initial_state(session_id.clone()));
        debug!(session_id = %session_id, "session created");
        session_id
    }

    /// Fold the next clue into a session.
    ///
    /// Rejected with `OutOfTurns` once the session holds five clues. The
    /// session is locked for the whole pipeline, so concurrent clues on the
    /// same session are applied one after the other. A repredict on the
    /// session cancels the clue and nothing is committed.
    pub async fn submit_clue(&self, session_id: &str, clue_text: &str) -> JackpotResult<PredictionResult> {
        let entry = self.sessions.get(session_id)?;
        let (generation, cancel) = self.sessions.begin_request(session_id);

        let result = self.advance(session_id, &entry, clue_text, &cancel).await;

        self.sessions.finish_request(session_id, generation);
        result
    }

    async fn advance(
        &self,
        session_id: &str,
        entry: &tokio::sync::Mutex<SessionEntry>,
        clue_text: &str,
        cancel: &CancellationToken,
    ) -> JackpotResult<PredictionResult> {
        let mut guard = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(cancelled(session_id)),
            guard = entry.lock() => guard,
        };
        let clue_index = guard.state.clue_count() + 1;
        if guard.state.clue_count() >= MAX_CLUES {
            return Err(JackpotError::out_of_turns(guard.state.clue_count(), MAX_CLUES));
        }

        let (next, result) = self
            .process_clue(&guard.state, clue_text, cancel)
            .instrument(jackpot_observability::clue_span!(session_id, clue_index))
            .await?;
        if cancel.is_cancelled() {
            return Err(cancelled(session_id));
        }
        guard.commit(next);
        Ok(result)
    }

    /// Discard a session and start a fresh one. Returns the new id.
    pub fn reset(&self, session_id: &str) -> JackpotResult<String> {
        self.sessions.remove(session_id)?;
        let new_id = self.create_session();
        events::session_reset(session_id, &new_id);
        Ok(new_id)
    }

    /// Rebuild a session from the full, edited clue list.
    ///
    /// Cancels every clue and repredict still in flight on the session,
    /// then replays from an empty state. Earlier clues take the Bayesian
    /// step only; the agents and the oracle run on the last one. Insights of
    /// the leading clues the edit left unchanged are kept. Commits only if
    /// nothing newer cancelled this one in the meantime.
    pub async fn repredict(&self, session_id: &str, clues: &[String]) -> JackpotResult<PredictionResult> {
        if clues.is_empty() || clues.len() > MAX_CLUES {
            return Err(SessionError::InvalidClueList {
                count: clues.len(),
                max: MAX_CLUES,
            }
            .into());
        }
        let entry = self.sessions.get(session_id)?;
        let (generation, cancel) = self.sessions.supersede(session_id);

        let result = self
            .replay(session_id, &entry, clues, &cancel)
            .instrument(jackpot_observability::repredict_span!(session_id, clues.len()))
            .await;

        self.sessions.finish_request(session_id, generation);
        result
    }

    async fn replay(
        &self,
        session_id: &str,
        entry: &tokio::sync::Mutex<SessionEntry>,
        clues: &[String],
        cancel: &CancellationToken,
    ) -> JackpotResult<PredictionResult> {
        let mut guard = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(cancelled(session_id)),
            guard = entry.lock() => guard,
        };

        let Some((last, earlier)) = clues.split_last() else {
            return Err(SessionError::InvalidClueList {
                count: 0,
                max: MAX_CLUES,
            }
            .into());
        };
        let mut state = self.updater.initial_state(session_id);
        state.insights = unchanged_insights(&guard.state, earlier);
        for clue in earlier {
            if cancel.is_cancelled() {
                return Err(cancelled(session_id));
            }
            state = self.fold_clue(&state, clue)?;
        }

        let (next, result) = self.process_clue(&state, last, cancel).await?;
        if cancel.is_cancelled() {
            return Err(cancelled(session_id));
        }
        guard.commit(next);
        debug!(session_id = %session_id, clues = clues.len(), "session replayed");
        Ok(result)
    }

    /// Remove sessions idle longer than `session.expiry_secs`.
    pub fn cleanup_stale_sessions(&self) -> usize {
        self.cleanup_idle(Duration::from_secs(self.config.session.expiry_secs))
    }

    /// Remove sessions idle longer than `idle`.
    pub fn cleanup_idle(&self, idle: Duration) -> usize {
        let removed = self.sessions.remove_idle(idle);
        if removed > 0 {
            events::sessions_expired(removed, self.sessions.session_count());
        }
        removed
    }

    /// Snapshot of a session's belief state.
    pub async fn session_state(&self, session_id: &str) -> JackpotResult<SessionState> {
        let entry = self.sessions.get(session_id)?;
        let guard = entry.lock().await;
        Ok(guard.state.clone())
    }

    pub fn session_count(&self) -> usize {
        self.sessions.session_count()
    }

    /// Recorded fallbacks of the agents and the oracle.
    pub fn degradations(&self) -> Vec<TrackedDegradation> {
        self.degradations
            .lock()
            .map(|t| t.events().iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn catalog(&self) -> &Arc<EntityCatalog> {
        &self.catalog
    }

    pub fn config(&self) -> &JackpotConfig {
        &self.config
    }

    /// Bayesian step only. Used for the clues a repredict replays.
    fn fold_clue(&self, state: &SessionState, clue_text: &str) -> JackpotResult<SessionState> {
        let analysis = self
            .analyzer
            .analyze(clue_text, state.clue_count() + 1, state.clue_history());
        let hits = self.updater.search(&analysis);
        self.updater.update(state, &analysis, &hits)
    }

    /// Full pipeline for one clue. Returns the next state without committing it.
    async fn process_clue(
        &self,
        state: &SessionState,
        clue_text: &str,
        cancel: &CancellationToken,
    ) -> JackpotResult<(SessionState, PredictionResult)> {
        let started = Instant::now();
        let session_id = state.session_id.clone();
        let clue_index = state.clue_count() + 1;

        let analysis = self
            .analyzer
            .analyze(clue_text, clue_index, state.clue_history());
        let hits = self.updater.search(&analysis);
        let mut next = self.updater.update(state, &analysis, &hits)?;
        let predictions = self.updater.rank(&next, self.config.bayes.rank_top_k);

        let (dominant, mass) = next.category_probs.dominant();
        let hint = (mass > self.catalog.config().category_filter_threshold).then_some(dominant);
        let clues = next.clue_history().to_vec();
        let prior = state.insights.as_slice();

        let agents = self
            .ensemble
            .predict(&clues, hint, prior, cancel)
            .instrument(jackpot_observability::agent_span!(clue_index))
            .await;
        if cancel.is_cancelled() {
            return Err(cancelled(&session_id));
        }
        let voting = vote(&agents, analysis.stage, self.ensemble.config());

        let oracle = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(cancelled(&session_id)),
            synthesis = self
                .oracle
                .synthesize(&predictions, &voting, &clues, prior)
                .instrument(jackpot_observability::oracle_span!(clue_index)) => synthesis,
        };

        let previous = prior.last().filter(|p| p.clue_index + 1 == clue_index);
        let insight = trail::capture(clue_index, clue_text, &agents, &voting, &oracle, previous);
        next.insights.retain(|i| i.clue_index < clue_index);
        next.insights.push(insight);
        let hypotheses = trail::hypothesis_tracks(&next.insights);

        let agents_failed = failed_agents(&agents);
        self.track_degradations(&agents_failed, &oracle);

        let guess = recommend(&self.config.session, clue_index, predictions.first());
        let degraded = oracle.degraded || agents.iter().any(|o| !o.is_present());
        let latency_ms = started.elapsed().as_millis() as u64;
        events::clue_processed(
            &session_id,
            clue_index,
            predictions.first().map(|p| p.name.as_str()),
            latency_ms,
        );

        let result = PredictionResult {
            session_id,
            clue_index,
            stage: analysis.stage,
            status: next.status(),
            predictions,
            category_probs: next.category_probs,
            agents,
            voting,
            oracle,
            guess,
            hypotheses,
            degraded,
            latency_ms,
        };
        Ok((next, result))
    }

    fn track_degradations(&self, agents_failed: &[String], oracle: &OracleSynthesis) {
        if !self.has_generator {
            return;
        }
        let Ok(mut tracker) = self.degradations.lock() else {
            return;
        };

        if agents_failed.is_empty() {
            tracker.mark_recovered(components::AGENTS);
        } else {
            tracker.record(DegradationEvent::new(
                components::AGENTS,
                agents_failed.join(", "),
                "vote over responding agents",
            ));
        }

        if oracle.degraded {
            tracker.record(DegradationEvent::new(
                components::ORACLE,
                oracle.degradation_reason.clone().unwrap_or_default(),
                "local synthesis from Bayesian leader and vote",
            ));
        } else {
            tracker.mark_recovered(components::ORACLE);
        }
    }
}

/// Insights for the leading clues that `clues` repeats unchanged.
fn unchanged_insights(previous: &SessionState, clues: &[String]) -> Vec<ClueInsight> {
    let unchanged = previous
        .clue_history()
        .iter()
        .zip(clues)
        .take_while(|(old, new)| old == new)
        .count();
    previous
        .insights
        .iter()
        .filter(|i| i.clue_index <= unchanged)
        .cloned()
        .collect()
}

/// `agent: reason` for every agent that should have answered and did not.
fn failed_agents(outcomes: &[AgentOutcome]) -> Vec<String> {
    outcomes
        .iter()
        .filter_map(|o| match o {
            AgentOutcome::Absent { reason, .. }
                if matches!(reason, AbsenceReason::Unconfigured | AbsenceReason::Cancelled) =>
            {
                None
            }
            AgentOutcome::Absent { agent, reason } => Some(format!("{agent}: {reason:?}")),
            AgentOutcome::Responded(_) => None,
        })
        .collect()
}

fn cancelled(session_id: &str) -> JackpotError {
    SessionError::Cancelled {
        session_id: session_id.to_string(),
    }
    .into()
}
