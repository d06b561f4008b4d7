//! Session table with one async mutex per session.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use jackpot_core::errors::{JackpotError, JackpotResult};
use jackpot_core::models::SessionState;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

/// A session's belief state plus its last activity time.
#[derive(Debug, Clone)]
pub struct SessionEntry {
    pub state: SessionState,
    pub last_activity: DateTime<Utc>,
}

impl SessionEntry {
    pub fn new(state: SessionState) -> Self {
        Self {
            state,
            last_activity: Utc::now(),
        }
    }

    /// Replace the state and refresh the activity time.
    pub fn commit(&mut self, state: SessionState) {
        self.state = state;
        self.touch();
    }

    pub fn touch(&mut self) {
        self.last_activity = Utc::now();
    }

    pub fn idle_duration(&self) -> chrono::Duration {
        Utc::now() - self.last_activity
    }
}

/// Token of one in-flight clue or repredict.
#[derive(Debug)]
struct ActiveRequest {
    generation: u64,
    token: CancellationToken,
}

/// Thread-safe session table.
///
/// Each session sits behind its own async mutex, so requests on one
/// session queue up while other sessions proceed. In-flight requests are
/// registered per session so a repredict can cancel them.
#[derive(Debug)]
pub struct SessionManager {
    sessions: DashMap<String, Arc<Mutex<SessionEntry>>>,
    requests: DashMap<String, Vec<ActiveRequest>>,
    generation: AtomicU64,
}

impl SessionManager {
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
            requests: DashMap::new(),
            generation: AtomicU64::new(0),
        }
    }

    /// Insert a session under its own id, replacing any previous one.
    pub fn insert(&self, state: SessionState) -> String {
        let session_id = state.session_id.clone();
        self.sessions
            .insert(session_id.clone(), Arc::new(Mutex::new(SessionEntry::new(state))));
        session_id
    }

    /// Handle to a session. The map shard is released before returning.
    pub fn get(&self, session_id: &str) -> JackpotResult<Arc<Mutex<SessionEntry>>> {
        self.sessions
            .get(session_id)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| JackpotError::session_not_found(session_id))
    }

    /// Remove a session and cancel everything in flight on it.
    pub fn remove(&self, session_id: &str) -> JackpotResult<()> {
        self.cancel_requests(session_id);
        self.sessions
            .remove(session_id)
            .map(|_| ())
            .ok_or_else(|| JackpotError::session_not_found(session_id))
    }

    pub fn contains(&self, session_id: &str) -> bool {
        self.sessions.contains_key(session_id)
    }

    /// Number of active sessions.
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    /// Get all session IDs.
    pub fn session_ids(&self) -> Vec<String> {
        self.sessions.iter().map(|r| r.key().clone()).collect()
    }

    /// Drop sessions idle for longer than `idle`. Busy sessions are kept.
    pub fn remove_idle(&self, idle: Duration) -> usize {
        let mut expired = Vec::new();
        self.sessions.retain(|session_id, entry| match entry.try_lock() {
            Ok(guard) if guard.idle_duration().to_std().is_ok_and(|d| d > idle) => {
                expired.push(session_id.clone());
                false
            }
            _ => true,
        });
        for session_id in &expired {
            self.cancel_requests(session_id);
        }
        expired.len()
    }

    /// Register a request on `session_id` alongside the ones already running.
    ///
    /// Returns the generation to hand back to [`finish_request`](Self::finish_request)
    /// and the token the request must watch.
    pub fn begin_request(&self, session_id: &str) -> (u64, CancellationToken) {
        let (generation, token) = self.next_request();
        self.requests
            .entry(session_id.to_string())
            .or_default()
            .push(ActiveRequest {
                generation,
                token: token.clone(),
            });
        (generation, token)
    }

    /// Register a request that replaces every request in flight on
    /// `session_id`. The earlier tokens are cancelled.
    pub fn supersede(&self, session_id: &str) -> (u64, CancellationToken) {
        let (generation, token) = self.next_request();
        let previous = self.requests.insert(
            session_id.to_string(),
            vec![ActiveRequest {
                generation,
                token: token.clone(),
            }],
        );
        for request in previous.into_iter().flatten() {
            request.token.cancel();
        }
        (generation, token)
    }

    /// Forget a finished request. Requests registered later are untouched.
    pub fn finish_request(&self, session_id: &str, generation: u64) {
        if let Some(mut active) = self.requests.get_mut(session_id) {
            active.retain(|r| r.generation != generation);
        }
        self.requests.remove_if(session_id, |_, active| active.is_empty());
    }

    /// Number of requests registered for the session.
    pub fn active_requests(&self, session_id: &str) -> usize {
        self.requests.get(session_id).map_or(0, |active| active.len())
    }

    fn next_request(&self) -> (u64, CancellationToken) {
        let generation = self.generation.fetch_add(1, Ordering::Relaxed) + 1;
        (generation, CancellationToken::new())
    }

    fn cancel_requests(&self, session_id: &str) {
        if let Some((_, active)) = self.requests.remove(session_id) {
            for request in active {
                request.token.cancel();
            }
        }
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new()
    }
}
