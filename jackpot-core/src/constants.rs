/// Jackpot engine version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Clues in a full puzzle. A session is complete after this many.
pub const MAX_CLUES: usize = 5;

/// Allowed drift of the posterior sum away from 1.0.
pub const PROBABILITY_TOLERANCE: f64 = 1e-6;

/// Number of ensemble agents dispatched per clue.
pub const AGENT_COUNT: usize = 5;

/// Number of guesses the oracle returns.
pub const ORACLE_TOP_N: usize = 3;

/// Maximum characters kept from an oracle explanation.
pub const MAX_EXPLANATION_CHARS: usize = 150;

/// Maximum characters kept from the oracle's theme and blind-spot fields.
pub const MAX_THEME_CHARS: usize = 100;

/// Floor applied to likelihoods so no entity is ever driven to exactly zero.
pub const MIN_LIKELIHOOD: f64 = 1e-9;
