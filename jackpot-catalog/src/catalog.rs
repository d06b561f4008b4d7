use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use jackpot_core::config::CatalogConfig;
use jackpot_core::errors::{ConfigurationError, JackpotResult};
use jackpot_core::models::{Category, CategoryProbs, Entity};
use jackpot_core::traits::IEntitySource;
use moka::sync::Cache;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::search::{cosine_similarity, TfidfIndex};

/// One candidate returned by [`EntityCatalog::search`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    /// Catalog position of the entity.
    pub index: usize,
    pub name: String,
    /// Cosine similarity scaled by the recency boost.
    pub score: f64,
}

/// A category the caller believes the answer belongs to, with its mass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryHint {
    pub category: Category,
    pub confidence: f64,
}

impl CategoryHint {
    pub fn new(category: Category, confidence: f64) -> Self {
        Self {
            category,
            confidence,
        }
    }

    /// Unknown category names yield no hint.
    pub fn parse(category: &str, confidence: f64) -> Option<Self> {
        Category::parse(category).map(|c| Self::new(c, confidence))
    }

    /// The dominant category of a distribution.
    pub fn from_probs(probs: &CategoryProbs) -> Self {
        let (category, confidence) = probs.dominant();
        Self::new(category, confidence)
    }
}

/// Indexed, read-only store of candidate answers.
pub struct EntityCatalog {
    entities: Vec<Entity>,
    by_name: HashMap<String, usize>,
    by_alias: HashMap<String, usize>,
    triggers: Vec<String>,
    index: TfidfIndex,
    cache: Cache<String, Arc<Vec<SearchHit>>>,
    config: CatalogConfig,
}

impl fmt::Debug for EntityCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityCatalog")
            .field("entities", &self.entities.len())
            .field("aliases", &self.by_alias.len())
            .field("triggers", &self.triggers.len())
            .field("vocabulary", &self.index.vocabulary_size())
            .finish()
    }
}

impl EntityCatalog {
    /// Load every record from `source` and build the index.
    pub fn load(source: &dyn IEntitySource, config: &CatalogConfig) -> JackpotResult<Self> {
        let entities = source.load()?;
        info!(
            source = source.name(),
            count = entities.len(),
            "loading entity catalog"
        );
        Self::from_entities(entities, config)
    }

    /// Build the catalog from already-loaded records.
    ///
    /// Fails on an empty list, a blank or duplicate canonical name, or a
    /// non-finite recency score. Recency is clamped to [0, 1] and
    /// `base_prior` is recomputed for every entity.
    pub fn from_entities(mut entities: Vec<Entity>, config: &CatalogConfig) -> JackpotResult<Self> {
        if entities.is_empty() {
            return Err(ConfigurationError::EmptyCatalog.into());
        }

        let mut by_name = HashMap::with_capacity(entities.len());
        for (i, entity) in entities.iter_mut().enumerate() {
            entity.name = entity.name.trim().to_string();
            if entity.name.is_empty() {
                return Err(ConfigurationError::InvalidEntity {
                    reason: format!("entity #{i} has a blank name"),
                }
                .into());
            }
            if !entity.recency_score.is_finite() {
                return Err(ConfigurationError::InvalidEntity {
                    reason: format!("{} has a non-finite recency score", entity.name),
                }
                .into());
            }
            entity.recency_score = entity.recency_score.clamp(0.0, 1.0);
            if by_name.insert(entity.name.to_lowercase(), i).is_some() {
                return Err(ConfigurationError::DuplicateEntity {
                    name: entity.name.clone(),
                }
                .into());
            }
        }

        let mut by_alias: HashMap<String, usize> = HashMap::new();
        for (i, entity) in entities.iter().enumerate() {
            for alias in &entity.aliases {
                let key = alias.trim().to_lowercase();
                if key.is_empty() || by_name.contains_key(&key) {
                    continue;
                }
                match by_alias.get(&key) {
                    Some(&owner) if owner != i => {
                        warn!(alias = %key, kept = %entities[owner].name, "alias shared by multiple entities");
                    }
                    Some(_) => {}
                    None => {
                        by_alias.insert(key, i);
                    }
                }
            }
        }

        assign_base_priors(&mut entities, config);

        let mut triggers: Vec<String> = Vec::new();
        for trigger in entities.iter().flat_map(|e| e.polysemy_triggers.iter()) {
            let trigger = trigger.trim().to_lowercase();
            if !trigger.is_empty() && !triggers.contains(&trigger) {
                triggers.push(trigger);
            }
        }

        let documents: Vec<String> = entities.iter().map(search_document).collect();
        let index = TfidfIndex::build(&documents);

        debug!(
            entities = entities.len(),
            vocabulary = index.vocabulary_size(),
            triggers = triggers.len(),
            "entity catalog indexed"
        );

        Ok(Self {
            entities,
            by_name,
            by_alias,
            triggers,
            index,
            cache: Cache::new(config.search_cache_capacity),
            config: config.clone(),
        })
    }

    /// Rank entities by TF-IDF similarity to the keywords.
    ///
    /// The hint restricts the search only when its confidence exceeds
    /// `category_filter_threshold`.
    pub fn search<S: AsRef<str>>(
        &self,
        keywords: &[S],
        category_hint: Option<CategoryHint>,
    ) -> Vec<SearchHit> {
        let filter = category_hint
            .filter(|h| h.confidence > self.config.category_filter_threshold)
            .map(|h| h.category);
        let query = keywords
            .iter()
            .map(|k| k.as_ref().trim())
            .filter(|k| !k.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }

        let cache_key = format!("{}|{}", filter.map_or("*", Category::as_str), query);
        if let Some(hits) = self.cache.get(&cache_key) {
            return hits.as_ref().clone();
        }

        let hits = self.score(&query, filter);
        debug!(query = %query, filter = ?filter, hits = hits.len(), "catalog search");
        self.cache.insert(cache_key, Arc::new(hits.clone()));
        hits
    }

    fn score(&self, query: &str, filter: Option<Category>) -> Vec<SearchHit> {
        let query_vector = self.index.query_vector(query);
        if query_vector.is_empty() {
            return Vec::new();
        }

        let mut hits: Vec<SearchHit> = self
            .entities
            .par_iter()
            .enumerate()
            .filter(|(_, e)| filter.map_or(true, |c| e.category == c))
            .filter_map(|(i, e)| {
                let similarity = cosine_similarity(&query_vector, self.index.document(i)?);
                (similarity >= self.config.search_min_score).then(|| SearchHit {
                    index: i,
                    name: e.name.clone(),
                    score: similarity * (1.0 + self.config.search_recency_boost * e.recency_score),
                })
            })
            .collect();

        hits.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(Ordering::Equal)
                .then(a.index.cmp(&b.index))
        });
        hits.truncate(self.config.search_top_k);
        hits
    }

    /// Exact lookup by canonical name.
    pub fn get(&self, name: &str) -> Option<&Entity> {
        self.by_name
            .get(&name.to_lowercase())
            .map(|&i| &self.entities[i])
            .filter(|e| e.name == name)
    }

    /// Case-insensitive lookup by canonical name, then alias.
    pub fn resolve(&self, name: &str) -> Option<&Entity> {
        let key = name.trim().to_lowercase();
        self.by_name
            .get(&key)
            .or_else(|| self.by_alias.get(&key))
            .map(|&i| &self.entities[i])
    }

    /// Canonical spelling for a name or alias.
    pub fn canonical_spelling(&self, name: &str) -> Option<&str> {
        self.resolve(name).map(|e| e.name.as_str())
    }

    /// Catalog position of a canonical name or alias.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        let key = name.trim().to_lowercase();
        self.by_name
            .get(&key)
            .or_else(|| self.by_alias.get(&key))
            .copied()
    }

    /// Every polysemy trigger in the catalog, lowercased and deduplicated.
    pub fn trigger_vocabulary(&self) -> &[String] {
        &self.triggers
    }

    pub fn entity(&self, index: usize) -> Option<&Entity> {
        self.entities.get(index)
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn category_count(&self, category: Category) -> usize {
        self.entities
            .iter()
            .filter(|e| e.category == category)
            .count()
    }

    /// Catalog-wide category priors from configuration.
    pub fn category_priors(&self) -> CategoryProbs {
        CategoryProbs::new(
            self.config.prior_thing,
            self.config.prior_place,
            self.config.prior_person,
        )
        .normalized()
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }
}

/// Category prior split across the category, scaled by recency, normalized.
fn assign_base_priors(entities: &mut [Entity], config: &CatalogConfig) {
    let priors = CategoryProbs::new(config.prior_thing, config.prior_place, config.prior_person);
    let mut counts: HashMap<Category, usize> = HashMap::new();
    for entity in entities.iter() {
        *counts.entry(entity.category).or_insert(0) += 1;
    }

    for entity in entities.iter_mut() {
        let in_category = counts.get(&entity.category).copied().unwrap_or(1).max(1) as f64;
        entity.base_prior = priors.get(entity.category) / in_category
            * (1.0 + config.recency_prior_boost * entity.recency_score);
    }

    let total: f64 = entities.iter().map(|e| e.base_prior).sum();
    let n = entities.len() as f64;
    for entity in entities.iter_mut() {
        entity.base_prior = if total > 0.0 {
            entity.base_prior / total
        } else {
            1.0 / n
        };
    }
}

/// Name, name words, aliases, alias words, triggers and associations.
fn search_document(entity: &Entity) -> String {
    let mut parts: Vec<&str> = vec![entity.name.as_str()];
    parts.extend(entity.name.split_whitespace());
    for alias in &entity.aliases {
        parts.push(alias);
        parts.extend(alias.split_whitespace());
    }
    parts.extend(entity.polysemy_triggers.iter().map(String::as_str));
    parts.extend(entity.clue_associations.iter().map(String::as_str));
    parts.join(" ")
}
