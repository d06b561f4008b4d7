//! Structured log events for session lifecycle and degradations.

/// A clue was folded into a session.
pub fn clue_processed(session_id: &str, clue_index: usize, top: Option<&str>, latency_ms: u64) {
    tracing::info!(
        event = "clue_processed",
        session_id = %session_id,
        clue_index,
        top = top.unwrap_or("-"),
        latency_ms,
        "clue processed"
    );
}

/// A session was replaced by a fresh one.
pub fn session_reset(old_id: &str, new_id: &str) {
    tracing::info!(event = "session_reset", old_id = %old_id, new_id = %new_id, "session reset");
}

/// Idle sessions were removed.
pub fn sessions_expired(removed: usize, remaining: usize) {
    tracing::info!(event = "sessions_expired", removed, remaining, "stale sessions removed");
}

/// A component fell back to a lower-quality result.
pub fn degradation_triggered(component: &str, failure: &str, fallback: &str) {
    tracing::warn!(
        event = "degradation_triggered",
        component = %component,
        failure = %failure,
        fallback = %fallback,
        "degradation triggered"
    );
}
