//! Test fixture loader for Jackpot catalogs, puzzles and scripted generators.
//!
//! Provides typed deserialization of the fixture JSON files and a
//! deterministic [`ITextGenerator`] for pipeline tests across crates.

mod scripted;

pub use scripted::{agent_reply, Scripted, ScriptedGenerator};

use jackpot_core::models::{Category, Entity};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// The `test-fixtures` directory, found by walking up from the calling crate.
fn fixtures_root() -> PathBuf {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(&manifest_dir)
        .ancestors()
        .map(|dir| dir.join("test-fixtures"))
        .find(|dir| dir.is_dir())
        .unwrap_or_else(|| panic!("no test-fixtures directory above {manifest_dir}"))
}

/// Deserialize `test-fixtures/<relative_path>`. Panics on a missing or bad file.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixture_path(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("cannot read fixture {}: {e}", path.display()));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("cannot parse fixture {}: {e}", path.display()))
}

/// Absolute path of a fixture file.
pub fn fixture_path(relative_path: &str) -> PathBuf {
    fixtures_root().join(relative_path)
}

/// The fifteen-entity trivia catalog used by most tests.
pub fn trivia_catalog() -> Vec<Entity> {
    load_fixture("catalogs/trivia_catalog.json")
}

/// A small catalog with one entity per category.
pub fn tiny_catalog() -> Vec<Entity> {
    vec![
        Entity::new("Monopoly", Category::Thing)
            .with_triggers(["flavors/editions"])
            .with_associations(["jail", "rent"]),
        Entity::new("Paris", Category::Place).with_associations(["eiffel tower"]),
        Entity::new("Taylor Swift", Category::Person)
            .with_associations(["eras tour"])
            .with_recency(0.95),
    ]
}

/// A five-clue puzzle with its known answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Puzzle {
    pub answer: String,
    pub category: Category,
    pub clues: Vec<String>,
}

/// Load `puzzles/<name>.json`.
pub fn load_puzzle(name: &str) -> Puzzle {
    load_fixture(&format!("puzzles/{name}.json"))
}
