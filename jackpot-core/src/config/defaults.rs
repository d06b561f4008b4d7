//! Default values for every configuration section.

// Catalog priors.
pub const DEFAULT_PRIOR_THING: f64 = 0.60;
pub const DEFAULT_PRIOR_PLACE: f64 = 0.25;
pub const DEFAULT_PRIOR_PERSON: f64 = 0.15;
pub const DEFAULT_RECENCY_PRIOR_BOOST: f64 = 0.1;

// Candidate search.
pub const DEFAULT_SEARCH_TOP_K: usize = 10;
pub const DEFAULT_SEARCH_MIN_SCORE: f64 = 0.1;
pub const DEFAULT_SEARCH_RECENCY_BOOST: f64 = 0.2;
pub const DEFAULT_CATEGORY_FILTER_THRESHOLD: f64 = 0.6;
pub const DEFAULT_SEARCH_CACHE_CAPACITY: u64 = 1_024;

// Clue analyzer.
pub const DEFAULT_MIN_TOKEN_LEN: usize = 3;
pub const DEFAULT_CATEGORY_PRIOR_WEIGHT: f64 = 0.7;
pub const DEFAULT_HISTORY_SIGNAL_WEIGHT: f64 = 0.5;

// Bayesian updater.
pub const DEFAULT_POLYSEMY_BONUS: f64 = 1.5;
pub const DEFAULT_KEYWORD_WEIGHT: f64 = 0.4;
pub const DEFAULT_KEYWORD_EVIDENCE_THRESHOLD: f64 = 0.3;
pub const DEFAULT_CATEGORY_WEIGHT: f64 = 0.3;
pub const DEFAULT_CATEGORY_EVIDENCE_THRESHOLD: f64 = 0.5;
pub const DEFAULT_ASSOCIATION_FACTOR: f64 = 1.2;
pub const DEFAULT_RECENCY_WEIGHT: f64 = 0.1;
pub const DEFAULT_RECENCY_THRESHOLD: f64 = 0.7;
pub const DEFAULT_NEGATION_FACTOR: f64 = 1.3;
pub const DEFAULT_CONTRADICTION_THRESHOLD: f64 = 0.8;
pub const DEFAULT_CONTRADICTION_PENALTY: f64 = 0.2;
pub const DEFAULT_INITIAL_CONFIDENCE: f64 = 0.1;
pub const DEFAULT_CONFIDENCE_PER_SIGNAL: f64 = 0.12;
pub const DEFAULT_MAX_COUNTED_SIGNALS: usize = 4;
pub const DEFAULT_CONFIDENCE_CATEGORY_WEIGHT: f64 = 0.10;
pub const DEFAULT_CONFIDENCE_LIKELIHOOD_CAP: f64 = 0.2;
pub const DEFAULT_CONFIDENCE_CEILING: f64 = 0.95;
pub const DEFAULT_RANK_TOP_K: usize = 10;

// Ensemble.
pub const DEFAULT_AGENT_TIMEOUT_MS: u64 = 5_000;
pub const DEFAULT_AGENT_MAX_TOKENS: u32 = 150;
pub const DEFAULT_STRONG_AGREEMENT_RATIO: f64 = 0.8;
pub const DEFAULT_STRONG_MIN_RESPONDERS: usize = 3;
pub const DEFAULT_MODERATE_MIN_SUPPORTERS: usize = 2;

// Oracle.
pub const DEFAULT_ORACLE_TIMEOUT_MS: u64 = 8_000;
pub const DEFAULT_ORACLE_MAX_TOKENS: u32 = 600;
pub const DEFAULT_ORACLE_TEMPERATURE: f64 = 0.3;
pub const DEFAULT_ORACLE_CANDIDATES: usize = 5;

// Session.
pub const DEFAULT_SESSION_EXPIRY_SECS: u64 = 300;
pub const DEFAULT_GUESS_THRESHOLDS: [f64; 5] = [0.50, 0.65, 0.75, 0.85, 0.0];

// Text generation endpoint.
pub const DEFAULT_LLM_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_LLM_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_LLM_API_KEY_ENV: &str = "JACKPOT_LLM_API_KEY";
pub const DEFAULT_LLM_REQUEST_TIMEOUT_SECS: u64 = 30;

// Observability.
pub const DEFAULT_LOG_LEVEL: &str = "info";
