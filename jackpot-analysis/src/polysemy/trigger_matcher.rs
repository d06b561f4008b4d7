use jackpot_core::models::{Keyword, PolysemousTerm, PolysemySource};

/// Matches keywords against the catalog's polysemy-trigger phrases.
///
/// A keyword form matches a trigger when either contains the other, so
/// "flavors" hits "flavors/editions" and "round" hits "go around". Forms
/// shorter than `min_form_len` are ignored.
#[derive(Debug, Clone)]
pub struct EntityTriggerMatcher {
    triggers: Vec<String>,
    min_form_len: usize,
}

impl EntityTriggerMatcher {
    pub fn new(triggers: Vec<String>) -> Self {
        Self {
            triggers: triggers.into_iter().map(|t| t.to_lowercase()).collect(),
            min_form_len: 3,
        }
    }

    pub fn with_min_form_len(mut self, min_form_len: usize) -> Self {
        self.min_form_len = min_form_len;
        self
    }

    fn matching_triggers(&self, keyword: &Keyword) -> Vec<String> {
        self.triggers
            .iter()
            .filter(|trigger| {
                keyword.forms().any(|form| {
                    form.chars().count() >= self.min_form_len
                        && (trigger.contains(form) || form.contains(trigger.as_str()))
                })
            })
            .cloned()
            .collect()
    }
}

impl super::PolysemyTier for EntityTriggerMatcher {
    fn detect(&self, keywords: &[Keyword]) -> Vec<PolysemousTerm> {
        keywords
            .iter()
            .filter_map(|k| {
                let meanings = self.matching_triggers(k);
                (!meanings.is_empty()).then(|| PolysemousTerm {
                    term: k.surface.clone(),
                    meanings,
                    source: PolysemySource::EntityTrigger,
                })
            })
            .collect()
    }

    fn name(&self) -> &str {
        "entity_trigger"
    }
}
