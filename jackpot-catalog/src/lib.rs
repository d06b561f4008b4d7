//! # jackpot-catalog
//!
//! In-memory entity catalog with TF-IDF candidate search.
//! Loaded once at startup from an [`IEntitySource`](jackpot_core::traits::IEntitySource)
//! and read-only afterwards.

pub mod catalog;
pub mod search;
pub mod sources;

pub use catalog::{CategoryHint, EntityCatalog, SearchHit};
pub use sources::{JsonEntitySource, SqliteEntitySource, StaticEntitySource};
