/// Per-request session errors. Surfaced to the caller as a rejected request.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("out of turns: session already has {clue_count} of {max} clues")]
    OutOfTurns { clue_count: usize, max: usize },

    #[error("session not found: {session_id}")]
    SessionNotFound { session_id: String },

    #[error("request cancelled for session {session_id}")]
    Cancelled { session_id: String },

    #[error("clue list must hold 1..={max} clues, got {count}")]
    InvalidClueList { count: usize, max: usize },
}
