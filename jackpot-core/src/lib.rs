//! # jackpot-core
//!
//! Foundation crate for the Jackpot inference engine.
//! Defines all types, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::JackpotConfig;
pub use errors::{JackpotError, JackpotResult};
pub use models::{Category, CategoryProbs, Entity};
