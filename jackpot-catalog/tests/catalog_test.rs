//! Catalog construction, lookup and candidate search.

use jackpot_catalog::{CategoryHint, EntityCatalog, StaticEntitySource};
use jackpot_core::config::CatalogConfig;
use jackpot_core::errors::{ConfigurationError, JackpotError};
use jackpot_core::models::{Category, Entity};
use proptest::prelude::*;

fn trivia() -> EntityCatalog {
    EntityCatalog::from_entities(test_fixtures::trivia_catalog(), &CatalogConfig::default())
        .unwrap()
}

// ── Loading ──

#[test]
fn empty_catalog_is_refused() {
    let source = StaticEntitySource::new(Vec::new());
    let err = EntityCatalog::load(&source, &CatalogConfig::default()).unwrap_err();
    assert!(matches!(
        err,
        JackpotError::Configuration(ConfigurationError::EmptyCatalog)
    ));
    assert!(!err.is_recoverable());
}

#[test]
fn duplicate_names_are_refused_case_insensitively() {
    let entities = vec![
        Entity::new("Monopoly", Category::Thing),
        Entity::new("monopoly ", Category::Thing),
    ];
    let err = EntityCatalog::from_entities(entities, &CatalogConfig::default()).unwrap_err();
    assert!(matches!(
        err,
        JackpotError::Configuration(ConfigurationError::DuplicateEntity { .. })
    ));
}

#[test]
fn blank_names_are_refused() {
    let entities = vec![Entity::new("   ", Category::Place)];
    assert!(matches!(
        EntityCatalog::from_entities(entities, &CatalogConfig::default()),
        Err(JackpotError::Configuration(ConfigurationError::InvalidEntity { .. }))
    ));
}

#[test]
fn non_finite_recency_is_refused_and_out_of_range_is_clamped() {
    let bad = vec![Entity::new("Jenga", Category::Thing).with_recency(f64::NAN)];
    assert!(EntityCatalog::from_entities(bad, &CatalogConfig::default()).is_err());

    let loud = vec![Entity::new("Jenga", Category::Thing).with_recency(3.0)];
    let catalog = EntityCatalog::from_entities(loud, &CatalogConfig::default()).unwrap();
    assert_eq!(catalog.entities()[0].recency_score, 1.0);
}

#[test]
fn load_through_static_source() {
    let source = StaticEntitySource::new(test_fixtures::tiny_catalog());
    let catalog = EntityCatalog::load(&source, &CatalogConfig::default()).unwrap();
    assert_eq!(catalog.len(), 3);
    assert_eq!(catalog.category_count(Category::Person), 1);
}

// ── Priors ──

#[test]
fn base_priors_sum_to_one() {
    let catalog = trivia();
    let total: f64 = catalog.entities().iter().map(|e| e.base_prior).sum();
    assert!((total - 1.0).abs() < 1e-9);
}

#[test]
fn base_priors_follow_category_share_and_recency() {
    let entities = vec![
        Entity::new("Stale", Category::Thing).with_recency(0.0),
        Entity::new("Fresh", Category::Thing).with_recency(1.0),
        Entity::new("Rome", Category::Place).with_recency(0.0),
    ];
    let catalog = EntityCatalog::from_entities(entities, &CatalogConfig::default()).unwrap();
    let stale = catalog.get("Stale").unwrap().base_prior;
    let fresh = catalog.get("Fresh").unwrap().base_prior;
    let rome = catalog.get("Rome").unwrap().base_prior;

    assert!((fresh / stale - 1.1).abs() < 1e-9);
    // Thing prior .60 split over two entities vs place prior .25 for one.
    assert!((stale / rome - 0.3 / 0.25).abs() < 1e-9);
}

#[test]
fn source_supplied_prior_is_overwritten() {
    let mut entity = Entity::new("Jenga", Category::Thing);
    entity.base_prior = 42.0;
    let catalog = EntityCatalog::from_entities(vec![entity], &CatalogConfig::default()).unwrap();
    assert!((catalog.entities()[0].base_prior - 1.0).abs() < 1e-12);
}

// ── Lookup ──

#[test]
fn get_is_exact_and_resolve_is_forgiving() {
    let catalog = trivia();
    assert!(catalog.get("Alcatraz").is_some());
    assert!(catalog.get("alcatraz").is_none());

    assert_eq!(catalog.canonical_spelling("alcatraz"), Some("Alcatraz"));
    assert_eq!(catalog.canonical_spelling("The Rock"), Some("Alcatraz"));
    assert_eq!(catalog.canonical_spelling("oracle of omaha"), Some("Warren Buffett"));
    assert_eq!(catalog.canonical_spelling("Atlantis"), None);
}

#[test]
fn index_of_matches_catalog_order() {
    let catalog = trivia();
    let i = catalog.index_of("Monopoly").unwrap();
    assert_eq!(catalog.entity(i).unwrap().name, "Monopoly");
}

#[test]
fn trigger_vocabulary_is_lowercased_and_deduplicated() {
    let entities = vec![
        Entity::new("A", Category::Thing).with_triggers(["Go Around", "scoop"]),
        Entity::new("B", Category::Thing).with_triggers(["go around ", ""]),
    ];
    let catalog = EntityCatalog::from_entities(entities, &CatalogConfig::default()).unwrap();
    assert_eq!(catalog.trigger_vocabulary(), ["go around", "scoop"]);
}

// ── Search ──

#[test]
fn search_ranks_association_matches_first() {
    let catalog = trivia();
    let hits = catalog.search(&["hostile", "takeover"], None);
    assert_eq!(hits[0].name, "Monopoly");
    assert!(hits.windows(2).all(|w| w[0].score >= w[1].score));
}

#[test]
fn search_respects_top_k_and_min_score() {
    let config = CatalogConfig {
        search_top_k: 2,
        ..CatalogConfig::default()
    };
    let catalog = EntityCatalog::from_entities(test_fixtures::trivia_catalog(), &config).unwrap();
    let hits = catalog.search(&["round", "game", "tower", "flavors"], None);
    assert!(hits.len() <= 2);
    for hit in &hits {
        assert!(hit.score >= config.search_min_score);
    }
}

#[test]
fn empty_or_unknown_queries_return_nothing() {
    let catalog = trivia();
    assert!(catalog.search::<&str>(&[], None).is_empty());
    assert!(catalog.search(&["  "], None).is_empty());
    assert!(catalog.search(&["xylophone"], None).is_empty());
}

#[test]
fn confident_hint_filters_categories() {
    let catalog = trivia();
    let hint = CategoryHint::new(Category::Place, 0.9);
    let hits = catalog.search(&["tower", "paris"], Some(hint));
    assert!(!hits.is_empty());
    for hit in &hits {
        assert_eq!(catalog.entity(hit.index).unwrap().category, Category::Place);
    }
}

#[test]
fn weak_hint_is_ignored() {
    let catalog = trivia();
    let weak = CategoryHint::new(Category::Person, 0.4);
    assert_eq!(
        catalog.search(&["hostile", "takeover"], Some(weak)),
        catalog.search(&["hostile", "takeover"], None)
    );
}

#[test]
fn unknown_hint_category_is_ignored() {
    assert!(CategoryHint::parse("animal", 0.9).is_none());
    assert_eq!(
        CategoryHint::parse("PLACE", 0.9).map(|h| h.category),
        Some(Category::Place)
    );
}

#[test]
fn repeated_search_hits_the_cache_with_identical_results() {
    let catalog = trivia();
    let first = catalog.search(&["jail", "dice"], None);
    let second = catalog.search(&["JAIL", "dice"], None);
    assert_eq!(first, second);
}

// ── Properties ──

proptest! {
    #[test]
    fn search_never_exceeds_top_k(words in prop::collection::vec("[a-z]{2,10}", 0..6)) {
        let catalog = trivia();
        let hits = catalog.search(&words, None);
        prop_assert!(hits.len() <= catalog.config().search_top_k);
        for hit in &hits {
            prop_assert!(hit.score.is_finite());
        }
    }
}
