//! End-to-end pipeline tests: sessions, turns, replays and fallbacks.

use std::sync::Arc;
use std::time::Duration;

use jackpot_catalog::{EntityCatalog, StaticEntitySource};
use jackpot_core::config::{CatalogConfig, JackpotConfig};
use jackpot_core::constants::PROBABILITY_TOLERANCE;
use jackpot_core::errors::{JackpotError, SessionError};
use jackpot_core::models::{AgreementStrength, ConfidenceTrend, SessionStatus};
use jackpot_core::traits::ITextGenerator;
use jackpot_observability::degradation::components;
use jackpot_session::PredictionEngine;
use proptest::prelude::*;
use test_fixtures::{agent_reply, load_puzzle, trivia_catalog, Scripted, ScriptedGenerator};

const ORACLE_REPLY: &str = r#"{
    "top_3": [
        {"answer": "Monopoly", "confidence": 88, "explanation": "takeovers, rent and jail"},
        {"answer": "Wall Street", "confidence": 7, "explanation": "hostile takeover"},
        {"answer": "Alcatraz", "confidence": 5, "explanation": "jail"}
    ],
    "key_theme": "board game",
    "blind_spot": "none"
}"#;

fn fast_config() -> JackpotConfig {
    let mut config = JackpotConfig::default();
    config.ensemble.agent_timeout_ms = 200;
    config.oracle.timeout_ms = 200;
    config
}

fn engine_with(config: JackpotConfig, generator: Option<Arc<dyn ITextGenerator>>) -> PredictionEngine {
    let catalog = EntityCatalog::from_entities(trivia_catalog(), &CatalogConfig::default()).unwrap();
    PredictionEngine::new(Arc::new(catalog), config, generator).unwrap()
}

fn offline_engine() -> PredictionEngine {
    engine_with(fast_config(), None)
}

fn monopoly_clues() -> Vec<String> {
    load_puzzle("monopoly").clues
}

// ── Full puzzle ──

#[tokio::test]
async fn monopoly_is_called_by_the_third_clue() {
    let generator = ScriptedGenerator::unanimous("Monopoly", 85).on_oracle(Scripted::Reply(ORACLE_REPLY.into()));
    let engine = engine_with(fast_config(), Some(Arc::new(generator)));
    let session = engine.create_session();
    let clues = monopoly_clues();

    let mut results = Vec::new();
    for clue in &clues[..3] {
        results.push(engine.submit_clue(&session, clue).await.unwrap());
    }

    let third = &results[2];
    assert_eq!(third.clue_index, 3);
    assert_eq!(third.status, SessionStatus::InProgress);
    let top = third.top_prediction().unwrap();
    assert_eq!(top.name, "Monopoly");
    assert!(top.confidence >= 0.75, "confidence {}", top.confidence);
    assert!(third.guess.should_guess);
    assert_eq!(third.voting.agreement_strength, AgreementStrength::Strong);
    assert_eq!(third.oracle.top_answer(), Some("Monopoly"));
    assert!(!third.degraded);
    assert!(engine.degradations().is_empty());
}

#[tokio::test]
async fn fifth_clue_completes_the_session() {
    let engine = offline_engine();
    let session = engine.create_session();
    let mut last = None;
    for clue in monopoly_clues() {
        last = Some(engine.submit_clue(&session, &clue).await.unwrap());
    }

    let last = last.unwrap();
    assert_eq!(last.clue_index, 5);
    assert_eq!(last.status, SessionStatus::Complete);
    assert!(last.guess.should_guess);
    assert_eq!(last.top_prediction().unwrap().name, "Monopoly");
}

#[tokio::test]
async fn offline_engine_still_predicts() {
    let engine = offline_engine();
    let session = engine.create_session();
    let result = engine.submit_clue(&session, "Savors many flavors").await.unwrap();

    assert!(result.degraded);
    assert!(result.oracle.degraded);
    assert_eq!(result.voting.agreement_strength, AgreementStrength::None);
    assert_eq!(
        result.oracle.top_answer(),
        result.top_prediction().map(|p| p.name.as_str())
    );
    // Running without a generator is not a degradation event.
    assert!(engine.degradations().is_empty());
}

// ── Reasoning trail ──

fn is_oracle(system_prompt: &str) -> bool {
    system_prompt.contains("Oracle")
}

#[tokio::test]
async fn later_clues_see_earlier_conclusions() {
    let generator = Arc::new(
        ScriptedGenerator::unanimous("Monopoly", 85).on_oracle(Scripted::Reply(ORACLE_REPLY.into())),
    );
    let engine = engine_with(fast_config(), Some(generator.clone()));
    let session = engine.create_session();
    let clues = monopoly_clues();

    let mut last = None;
    for clue in &clues[..3] {
        last = Some(engine.submit_clue(&session, clue).await.unwrap());
    }
    let third = last.unwrap();

    let requests = generator.requests();
    let agent_prompts = |clue: usize| -> Vec<String> {
        requests
            .iter()
            .filter(|r| !is_oracle(&r.system_prompt))
            .filter(|r| r.user_prompt.contains(&format!("We are on Clue {clue} of 5.")))
            .map(|r| r.user_prompt.clone())
            .collect()
    };
    assert_eq!(agent_prompts(1).len(), 5);
    assert!(agent_prompts(1).iter().all(|p| !p.contains("PRIOR ANALYSIS:")));
    assert_eq!(agent_prompts(3).len(), 5);
    for prompt in agent_prompts(3) {
        assert!(prompt.contains("PRIOR ANALYSIS:"));
        assert!(prompt.contains("=== CLUE 1: \"Savors many flavors\" ==="));
        assert!(prompt.contains("  >> VOTE: Monopoly (5/5 agree, strong) [NEW]"));
        assert!(prompt.contains("  >> ORACLE: Monopoly (88%) - \"board game\""));
        assert!(prompt.contains("[TREND: Monopoly holding steady across 2 clues]"));
        assert!(!prompt.contains("=== CLUE 3"));
    }

    let oracle_prompts: Vec<&str> = requests
        .iter()
        .filter(|r| is_oracle(&r.system_prompt))
        .map(|r| r.user_prompt.as_str())
        .collect();
    assert_eq!(oracle_prompts.len(), 3);
    assert!(!oracle_prompts[0].contains("PRIOR CLUE ANALYSES:"));
    assert!(oracle_prompts[2].contains("PRIOR CLUE ANALYSES:"));
    assert!(oracle_prompts[2].contains("Clue 2: \"Round and round\"\n  Top Pick: Monopoly (85%)"));
    assert!(oracle_prompts[2].contains("Oracle Pick: Monopoly (88%)"));

    let state = engine.session_state(&session).await.unwrap();
    let indices: Vec<usize> = state.insights.iter().map(|i| i.clue_index).collect();
    assert_eq!(indices, vec![1, 2, 3]);
    assert_eq!(third.hypotheses[0].answer, "monopoly");
    assert_eq!(third.hypotheses[0].history.len(), 3);
    assert_eq!(third.hypotheses[0].trend, ConfidenceTrend::Stable);
}

#[tokio::test]
async fn repredict_rebuilds_the_trail_from_the_edit() {
    let generator = Arc::new(
        ScriptedGenerator::unanimous("Monopoly", 85).on_oracle(Scripted::Reply(ORACLE_REPLY.into())),
    );
    let engine = engine_with(fast_config(), Some(generator.clone()));
    let session = engine.create_session();
    let clues = monopoly_clues();

    engine.submit_clue(&session, &clues[0]).await.unwrap();
    engine.submit_clue(&session, "Tower of Paris").await.unwrap();
    engine.submit_clue(&session, &clues[2]).await.unwrap();
    engine.repredict(&session, &clues[..3]).await.unwrap();

    let state = engine.session_state(&session).await.unwrap();
    let kept: Vec<(usize, &str)> = state
        .insights
        .iter()
        .map(|i| (i.clue_index, i.clue_text.as_str()))
        .collect();
    assert_eq!(kept, vec![(1, "Savors many flavors"), (3, "A hostile takeover")]);

    // The replay queries the agents and the oracle once, for the last clue.
    let requests = generator.requests();
    let replay: Vec<_> = requests.iter().rev().take(6).collect();
    assert!(replay.iter().all(|r| !r.user_prompt.contains("Tower of Paris")));
    let agent_prompts: Vec<&str> = replay
        .iter()
        .filter(|r| !is_oracle(&r.system_prompt))
        .map(|r| r.user_prompt.as_str())
        .collect();
    assert_eq!(agent_prompts.len(), 5);
    for prompt in agent_prompts {
        assert!(prompt.contains("=== CLUE 1: \"Savors many flavors\" ==="));
        assert!(!prompt.contains("=== CLUE 2"));
    }
}

// ── Turns and reset ──

#[tokio::test]
async fn sixth_clue_is_rejected_until_reset() {
    let engine = offline_engine();
    let session = engine.create_session();
    for clue in monopoly_clues() {
        engine.submit_clue(&session, &clue).await.unwrap();
    }

    let err = engine.submit_clue(&session, "One more").await.unwrap_err();
    assert!(matches!(
        err,
        JackpotError::Session(SessionError::OutOfTurns { clue_count: 5, max: 5 })
    ));
    assert!(err.is_recoverable());
    assert_eq!(engine.session_state(&session).await.unwrap().clue_count(), 5);

    let fresh = engine.reset(&session).unwrap();
    assert_ne!(fresh, session);
    let result = engine.submit_clue(&fresh, "Savors many flavors").await.unwrap();
    assert_eq!(result.clue_index, 1);
    assert!(matches!(
        engine.submit_clue(&session, "Savors many flavors").await,
        Err(JackpotError::Session(SessionError::SessionNotFound { .. }))
    ));
}

#[tokio::test]
async fn unknown_sessions_are_rejected() {
    let engine = offline_engine();
    assert!(matches!(
        engine.submit_clue("missing", "clue").await,
        Err(JackpotError::Session(SessionError::SessionNotFound { .. }))
    ));
    assert!(engine.reset("missing").is_err());
    assert!(engine.repredict("missing", &monopoly_clues()).await.is_err());
}

// ── Repredict ──

#[tokio::test]
async fn repredict_matches_a_fresh_session_with_the_corrected_clues() {
    let engine = offline_engine();
    let clues = monopoly_clues();

    let edited = engine.create_session();
    for (i, clue) in clues.iter().enumerate() {
        let text = if i == 1 { "Tower of Paris" } else { clue.as_str() };
        engine.submit_clue(&edited, text).await.unwrap();
    }
    let replayed = engine.repredict(&edited, &clues).await.unwrap();

    let fresh = engine.create_session();
    let mut expected = None;
    for clue in &clues {
        expected = Some(engine.submit_clue(&fresh, clue).await.unwrap());
    }
    let expected = expected.unwrap();

    assert_eq!(replayed.clue_index, 5);
    assert_eq!(replayed.status, SessionStatus::Complete);
    assert_eq!(replayed.status, expected.status);
    assert_eq!(replayed.predictions, expected.predictions);
    assert_eq!(replayed.category_probs, expected.category_probs);
    let edited_state = engine.session_state(&edited).await.unwrap();
    let fresh_state = engine.session_state(&fresh).await.unwrap();
    assert_eq!(edited_state.clue_history(), fresh_state.clue_history());
    assert_eq!(edited_state.status(), SessionStatus::Complete);
    assert_eq!(edited_state.probabilities(), fresh_state.probabilities());
}

#[tokio::test]
async fn repredict_rejects_empty_and_oversized_lists() {
    let engine = offline_engine();
    let session = engine.create_session();
    let too_many = vec!["clue".to_string(); 6];

    for clues in [Vec::new(), too_many] {
        assert!(matches!(
            engine.repredict(&session, &clues).await,
            Err(JackpotError::Session(SessionError::InvalidClueList { .. }))
        ));
    }
}

#[tokio::test]
async fn newer_repredict_cancels_the_older_one() {
    let mut config = fast_config();
    config.ensemble.agent_timeout_ms = 2_000;
    let generator = ScriptedGenerator::new().otherwise(Scripted::Delayed(
        Duration::from_millis(300),
        agent_reply("Monopoly", 80),
    ));
    let engine = engine_with(config, Some(Arc::new(generator)));
    let session = engine.create_session();
    let clues = monopoly_clues();
    let first_list = clues[..2].to_vec();
    let second_list = clues[..3].to_vec();

    let first = engine.repredict(&session, &first_list);
    let second = async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        engine.repredict(&session, &second_list).await
    };
    let (first, second) = tokio::join!(first, second);

    assert!(matches!(
        first,
        Err(JackpotError::Session(SessionError::Cancelled { .. }))
    ));
    assert_eq!(second.unwrap().clue_index, 3);
    let state = engine.session_state(&session).await.unwrap();
    assert_eq!(state.clue_history(), second_list.as_slice());
}

#[tokio::test]
async fn repredict_cancels_a_clue_still_in_flight() {
    let mut config = fast_config();
    config.ensemble.agent_timeout_ms = 3_000;
    let generator = ScriptedGenerator::new().otherwise(Scripted::Delayed(
        Duration::from_millis(1_500),
        agent_reply("Ice Cream", 70),
    ));
    let engine = engine_with(config, Some(Arc::new(generator)));
    let session = engine.create_session();
    let corrected = vec!["Savors many flavors".to_string()];

    let started = std::time::Instant::now();
    let typo = engine.submit_clue(&session, "Savors many flavrs");
    let fix = async {
        tokio::time::sleep(Duration::from_millis(100)).await;
        engine.repredict(&session, &corrected).await
    };
    let (typo, fix) = tokio::join!(typo, fix);
    let elapsed = started.elapsed();

    assert!(matches!(
        typo,
        Err(JackpotError::Session(SessionError::Cancelled { .. }))
    ));
    assert_eq!(fix.unwrap().clue_index, 1);
    assert!(elapsed < Duration::from_millis(2_800), "took {elapsed:?}");
    let state = engine.session_state(&session).await.unwrap();
    assert_eq!(state.clue_history(), corrected.as_slice());
}

// ── Fallbacks ──

#[tokio::test]
async fn oracle_timeout_falls_back_to_the_bayesian_leader() {
    let generator = ScriptedGenerator::unanimous("Monopoly", 70).on_oracle(Scripted::Delayed(
        Duration::from_secs(2),
        ORACLE_REPLY.into(),
    ));
    let engine = engine_with(fast_config(), Some(Arc::new(generator)));
    let session = engine.create_session();
    let result = engine.submit_clue(&session, "Savors many flavors").await.unwrap();

    assert!(result.degraded);
    assert!(result.oracle.degraded);
    assert_eq!(
        result.oracle.top_3[0].answer,
        result.top_prediction().unwrap().name
    );
    let degradations = engine.degradations();
    assert_eq!(degradations.len(), 1);
    assert_eq!(degradations[0].event.component, components::ORACLE);
}

#[tokio::test]
async fn failing_agents_are_recorded_and_the_clue_still_succeeds() {
    let generator = ScriptedGenerator::new()
        .on_oracle(Scripted::Reply(ORACLE_REPLY.into()))
        .otherwise(Scripted::Fail("503".into()));
    let engine = engine_with(fast_config(), Some(Arc::new(generator)));
    let session = engine.create_session();
    let result = engine.submit_clue(&session, "Savors many flavors").await.unwrap();

    assert!(result.degraded);
    assert!(!result.oracle.degraded);
    assert_eq!(result.voting.responding_agents, 0);
    assert!(engine
        .degradations()
        .iter()
        .any(|d| d.event.component == components::AGENTS));
}

#[tokio::test]
async fn empty_catalog_never_becomes_an_engine() {
    let err = PredictionEngine::from_source(&StaticEntitySource::new(Vec::new()), JackpotConfig::default(), None)
        .unwrap_err();
    assert!(!err.is_recoverable());
}

// ── Concurrency and cleanup ──

#[tokio::test]
async fn sessions_advance_independently() {
    let engine = offline_engine();
    let a = engine.create_session();
    let b = engine.create_session();
    let (ra, rb) = tokio::join!(
        engine.submit_clue(&a, "Savors many flavors"),
        engine.submit_clue(&b, "Tower of Paris"),
    );
    assert_eq!(ra.unwrap().clue_index, 1);
    assert_eq!(rb.unwrap().clue_index, 1);
    assert_eq!(engine.session_count(), 2);
}

#[tokio::test]
async fn clues_on_one_session_are_serialized() {
    let engine = offline_engine();
    let session = engine.create_session();
    let (first, second) = tokio::join!(
        engine.submit_clue(&session, "Savors many flavors"),
        engine.submit_clue(&session, "Round and round"),
    );
    let mut indices = vec![first.unwrap().clue_index, second.unwrap().clue_index];
    indices.sort_unstable();
    assert_eq!(indices, vec![1, 2]);
}

#[tokio::test]
async fn idle_sessions_are_cleaned_up() {
    let engine = offline_engine();
    engine.create_session();
    engine.create_session();

    assert_eq!(engine.cleanup_stale_sessions(), 0);
    tokio::time::sleep(Duration::from_millis(5)).await;
    assert_eq!(engine.cleanup_idle(Duration::ZERO), 2);
    assert_eq!(engine.session_count(), 0);
}

// ── Properties ──

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn accepted_clues_never_exceed_five(count in 1usize..9) {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let (accepted, sum) = runtime.block_on(async {
            let engine = offline_engine();
            let session = engine.create_session();
            let mut accepted = 0;
            for i in 0..count {
                if engine.submit_clue(&session, &format!("clue number {i} about a game")).await.is_ok() {
                    accepted += 1;
                }
            }
            let state = engine.session_state(&session).await.unwrap();
            (accepted, state.probability_sum())
        });
        prop_assert_eq!(accepted, count.min(5));
        prop_assert!((sum - 1.0).abs() < PROBABILITY_TOLERANCE);
    }
}
