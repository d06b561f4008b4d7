use serde::{Deserialize, Serialize};

use super::defaults;

/// Catalog priors and candidate-search tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Prior mass for the thing category. Default: 0.60.
    pub prior_thing: f64,
    /// Prior mass for the place category. Default: 0.25.
    pub prior_place: f64,
    /// Prior mass for the person category. Default: 0.15.
    pub prior_person: f64,
    /// Base priors are scaled by `1 + recency_prior_boost * recency`. Default: 0.1.
    pub recency_prior_boost: f64,
    /// Maximum hits returned per search. Default: 10.
    pub search_top_k: usize,
    /// Hits scoring below this are dropped. Default: 0.1.
    pub search_min_score: f64,
    /// Hit scores are scaled by `1 + search_recency_boost * recency`. Default: 0.2.
    pub search_recency_boost: f64,
    /// A category hint only restricts search above this mass. Default: 0.6.
    pub category_filter_threshold: f64,
    /// Entries kept in the search result cache. Default: 1024.
    pub search_cache_capacity: u64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            prior_thing: defaults::DEFAULT_PRIOR_THING,
            prior_place: defaults::DEFAULT_PRIOR_PLACE,
            prior_person: defaults::DEFAULT_PRIOR_PERSON,
            recency_prior_boost: defaults::DEFAULT_RECENCY_PRIOR_BOOST,
            search_top_k: defaults::DEFAULT_SEARCH_TOP_K,
            search_min_score: defaults::DEFAULT_SEARCH_MIN_SCORE,
            search_recency_boost: defaults::DEFAULT_SEARCH_RECENCY_BOOST,
            category_filter_threshold: defaults::DEFAULT_CATEGORY_FILTER_THRESHOLD,
            search_cache_capacity: defaults::DEFAULT_SEARCH_CACHE_CAPACITY,
        }
    }
}
