use jackpot_core::config::*;

#[test]
fn config_loads_from_empty_toml_with_all_defaults() {
    let config = JackpotConfig::from_toml("").unwrap();

    // Catalog defaults
    assert!((config.catalog.prior_thing - 0.60).abs() < f64::EPSILON);
    assert!((config.catalog.prior_place - 0.25).abs() < f64::EPSILON);
    assert!((config.catalog.prior_person - 0.15).abs() < f64::EPSILON);
    assert_eq!(config.catalog.search_top_k, 10);
    assert!((config.catalog.category_filter_threshold - 0.6).abs() < f64::EPSILON);

    // Bayes defaults
    assert!((config.bayes.polysemy_bonus - 1.5).abs() < f64::EPSILON);
    assert!((config.bayes.confidence_ceiling - 0.95).abs() < f64::EPSILON);
    assert!((config.bayes.initial_confidence - 0.1).abs() < f64::EPSILON);

    // Ensemble / oracle defaults
    assert_eq!(config.ensemble.agent_timeout_ms, 5_000);
    assert!(!config.ensemble.stage_weights_enabled);
    assert_eq!(config.oracle.timeout_ms, 8_000);

    // Session defaults
    assert_eq!(config.session.expiry_secs, 300);
    assert_eq!(config.session.guess_thresholds, vec![0.50, 0.65, 0.75, 0.85, 0.0]);

    // Observability defaults
    assert_eq!(config.observability.log_level, "info");
    assert!(!config.observability.json_logs);
}

#[test]
fn config_loads_partial_toml_with_overrides() {
    let toml = r#"
[bayes]
polysemy_bonus = 2.0

[ensemble]
agent_timeout_ms = 1500
"#;
    let config = JackpotConfig::from_toml(toml).unwrap();
    assert!((config.bayes.polysemy_bonus - 2.0).abs() < f64::EPSILON);
    assert_eq!(config.ensemble.agent_timeout_ms, 1500);
    // Non-overridden fields keep defaults
    assert!((config.bayes.confidence_ceiling - 0.95).abs() < f64::EPSILON);
    assert_eq!(config.ensemble.strong_min_responders, 3);
}

#[test]
fn config_rejects_short_guess_schedule() {
    let toml = r#"
[session]
guess_thresholds = [0.5, 0.4]
"#;
    let err = JackpotConfig::from_toml(toml).unwrap_err();
    assert!(!err.is_recoverable());
    assert!(err.to_string().contains("guess_thresholds"));
}

#[test]
fn config_rejects_bonus_below_one() {
    let toml = r#"
[bayes]
polysemy_bonus = 0.5
"#;
    assert!(JackpotConfig::from_toml(toml).is_err());
}

#[test]
fn config_rejects_malformed_toml() {
    let err = JackpotConfig::from_toml("[bayes\npolysemy_bonus = ").unwrap_err();
    assert!(matches!(err, jackpot_core::JackpotError::ConfigError(_)));
}

#[test]
fn config_roundtrips_through_toml() {
    let config = JackpotConfig::default();
    let serialized = toml::to_string(&config).unwrap();
    let back = JackpotConfig::from_toml(&serialized).unwrap();
    assert_eq!(back.catalog.search_top_k, config.catalog.search_top_k);
    assert_eq!(back.session.guess_thresholds, config.session.guess_thresholds);
    assert_eq!(back.llm.model, config.llm.model);
}

#[test]
fn guess_threshold_is_indexed_by_clue_number() {
    let session = SessionConfig::default();
    assert!((session.guess_threshold(1) - 0.50).abs() < f64::EPSILON);
    assert!((session.guess_threshold(4) - 0.85).abs() < f64::EPSILON);
    assert_eq!(session.guess_threshold(5), 0.0);
    assert_eq!(session.guess_threshold(0), 0.0);
    assert_eq!(session.guess_threshold(9), 0.0);
}
