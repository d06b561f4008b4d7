//! Span definitions for the clue pipeline.

/// Span around one submitted clue.
#[macro_export]
macro_rules! clue_span {
    ($session_id:expr, $clue_index:expr) => {
        tracing::info_span!("jackpot.clue", session_id = %$session_id, clue_index = $clue_index)
    };
}

/// Span around one replay of a full clue list.
#[macro_export]
macro_rules! repredict_span {
    ($session_id:expr, $clue_count:expr) => {
        tracing::info_span!("jackpot.repredict", session_id = %$session_id, clue_count = $clue_count)
    };
}

/// Span around the agent fan-out.
#[macro_export]
macro_rules! agent_span {
    ($clue_index:expr) => {
        tracing::info_span!("jackpot.agents", clue_index = $clue_index)
    };
}

/// Span around the oracle call.
#[macro_export]
macro_rules! oracle_span {
    ($clue_index:expr) => {
        tracing::info_span!("jackpot.oracle", clue_index = $clue_index)
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const CLUE: &str = "jackpot.clue";
    pub const REPREDICT: &str = "jackpot.repredict";
    pub const AGENTS: &str = "jackpot.agents";
    pub const ORACLE: &str = "jackpot.oracle";
}
