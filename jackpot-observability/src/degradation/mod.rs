//! Degradation tracking.

pub mod tracker;

pub use tracker::{DegradationTracker, RecoveryStatus, TrackedDegradation};

/// Component names used when recording degradations.
pub mod components {
    pub const ORACLE: &str = "oracle";
    pub const AGENTS: &str = "agents";
}
