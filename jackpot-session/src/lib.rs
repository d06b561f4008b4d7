//! # jackpot-session
//!
//! Puzzle sessions and the pipeline that advances them: analyze the clue,
//! update beliefs, fan out to the agents, vote, synthesize, and recommend
//! whether to guess. Sessions are independent; requests on one session
//! are serialized.

pub mod engine;
pub mod guess;
pub mod manager;

pub use engine::PredictionEngine;
pub use guess::recommend;
pub use manager::{SessionEntry, SessionManager};
