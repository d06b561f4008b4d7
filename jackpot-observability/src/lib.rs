//! # jackpot-observability
//!
//! Subscriber setup, span and event helpers for the prediction pipeline,
//! and a tracker for components running on a fallback.

pub mod degradation;
pub mod tracing_setup;

pub use degradation::{DegradationTracker, RecoveryStatus, TrackedDegradation};
pub use tracing_setup::init_tracing;
