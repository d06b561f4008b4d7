mod agent;
mod category;
mod clue_analysis;
mod degradation_event;
mod entity;
mod oracle_synthesis;
mod prediction_result;
mod reasoning_trail;
mod session_state;
mod voting_result;

pub use agent::{AbsenceReason, AgentOutcome, AgentPrediction, AgentStrategy};
pub use category::{Category, CategoryProbs};
pub use clue_analysis::{
    ClueAnalysis, ClueStage, Keyword, NegationPattern, PolysemousTerm, PolysemySource,
};
pub use degradation_event::DegradationEvent;
pub use entity::Entity;
pub use oracle_synthesis::{OracleGuess, OracleSynthesis};
pub use prediction_result::{GuessRecommendation, PredictionResult};
pub use reasoning_trail::{AgentSnapshot, ClueInsight, ConfidenceTrend, HypothesisTrack};
pub use session_state::{EntityBelief, RankedEntity, SessionState, SessionStatus};
pub use voting_result::{AgreementStrength, VoteTally, VotingResult};
