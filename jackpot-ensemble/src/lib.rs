//! # jackpot-ensemble
//!
//! Five prompt strategies queried concurrently against an
//! [`ITextGenerator`](jackpot_core::traits::ITextGenerator), a weighted vote
//! over their answers, and an oracle that synthesizes a final top three.
//! Every external failure is absorbed here: agents go absent, the oracle
//! degrades to a local fallback. [`trail`] carries each clue's conclusions
//! into the prompts for the clues after it.

pub mod agents;
pub mod ensemble;
pub mod llm;
pub mod oracle;
pub mod trail;
pub mod voting;

pub use ensemble::AgentEnsemble;
pub use llm::OpenAiCompatibleGenerator;
pub use oracle::OracleSynthesizer;
pub use voting::{normalize_answer, vote};
