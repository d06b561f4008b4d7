use std::sync::Arc;

use criterion::{criterion_group, criterion_main, Criterion};

use jackpot_analysis::ClueAnalyzer;
use jackpot_bayes::BayesianUpdater;
use jackpot_catalog::EntityCatalog;
use jackpot_core::config::{AnalyzerConfig, BayesConfig, CatalogConfig};

fn setup() -> (BayesianUpdater, ClueAnalyzer) {
    let catalog = Arc::new(
        EntityCatalog::from_entities(test_fixtures::trivia_catalog(), &CatalogConfig::default())
            .unwrap(),
    );
    let analyzer = ClueAnalyzer::with_triggers(
        AnalyzerConfig::default(),
        catalog.category_priors(),
        catalog.trigger_vocabulary().to_vec(),
    );
    (BayesianUpdater::new(catalog, BayesConfig::default()), analyzer)
}

fn bench_single_update(c: &mut Criterion) {
    let (updater, analyzer) = setup();
    let state = updater.initial_state("bench");
    let analysis = analyzer.analyze("Savors many flavors", 1, &[]);

    c.bench_function("search_and_update_one_clue", |b| {
        b.iter(|| {
            let hits = updater.search(&analysis);
            updater.update(&state, &analysis, &hits).unwrap()
        })
    });
}

fn bench_full_puzzle(c: &mut Criterion) {
    let (updater, analyzer) = setup();
    let puzzle = test_fixtures::load_puzzle("monopoly");

    c.bench_function("five_clue_replay", |b| {
        b.iter(|| {
            let mut state = updater.initial_state("bench");
            for clue in &puzzle.clues {
                let analysis = analyzer.analyze(clue, state.clue_count() + 1, state.clue_history());
                let hits = updater.search(&analysis);
                state = updater.update(&state, &analysis, &hits).unwrap();
            }
            updater.rank(&state, 10)
        })
    });
}

criterion_group!(benches, bench_single_update, bench_full_puzzle);
criterion_main!(benches);
