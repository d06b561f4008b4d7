use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::CategoryProbs;

/// Five-stage clue taxonomy, fixed by clue position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ClueStage {
    PolysemyTrap,
    Functional,
    PopCulturePivot,
    DirectHint,
    Giveaway,
}

impl ClueStage {
    /// Stage for a 1-based clue index. Out-of-range indices clamp to the ends.
    pub fn from_index(clue_index: usize) -> Self {
        match clue_index {
            0 | 1 => Self::PolysemyTrap,
            2 => Self::Functional,
            3 => Self::PopCulturePivot,
            4 => Self::DirectHint,
            _ => Self::Giveaway,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Self::PolysemyTrap => 1,
            Self::Functional => 2,
            Self::PopCulturePivot => 3,
            Self::DirectHint => 4,
            Self::Giveaway => 5,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::PolysemyTrap => "vague, dual-meaning wordplay",
            Self::Functional => "functional or attribute description",
            Self::PopCulturePivot => "pop-culture reference or pivot",
            Self::DirectHint => "direct hint",
            Self::Giveaway => "giveaway",
        }
    }
}

/// A content word from a clue in both surface and normalized form.
///
/// Both are kept: stripping "flavors" to "flavor" would miss a trigger
/// annotated as "flavors/editions".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Keyword {
    pub surface: String,
    pub normalized: String,
}

impl Keyword {
    pub fn new(surface: impl Into<String>, normalized: impl Into<String>) -> Self {
        Self {
            surface: surface.into(),
            normalized: normalized.into(),
        }
    }

    /// Surface form, then the normalized form when it differs.
    pub fn forms(&self) -> impl Iterator<Item = &str> {
        let normalized = (self.normalized != self.surface).then_some(self.normalized.as_str());
        std::iter::once(self.surface.as_str()).chain(normalized)
    }
}

/// Where a polysemous term was detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolysemySource {
    StaticTable,
    EntityTrigger,
}

/// A clue word with more than one plausible reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolysemousTerm {
    pub term: String,
    /// Candidate meanings. For entity-trigger matches these are the triggers.
    pub meanings: Vec<String>,
    pub source: PolysemySource,
}

/// A "has X but can't Y" construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NegationPattern {
    pub attribute: String,
    pub negated: Option<String>,
    pub matched_text: String,
}

/// Everything the analyzer extracts from one clue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClueAnalysis {
    pub clue_text: String,
    pub clue_index: usize,
    pub stage: ClueStage,
    pub keywords: Vec<Keyword>,
    pub polysemous_terms: Vec<PolysemousTerm>,
    pub category_probs: CategoryProbs,
    /// Signal words that shifted the category estimate.
    pub category_signals: Vec<String>,
    pub negation_patterns: Vec<NegationPattern>,
}

impl ClueAnalysis {
    /// Every distinct keyword form, surface forms first.
    pub fn keyword_forms(&self) -> Vec<&str> {
        let mut forms: Vec<&str> = Vec::new();
        for form in self.keywords.iter().flat_map(|k| k.forms()) {
            if !forms.contains(&form) {
                forms.push(form);
            }
        }
        forms
    }

    pub fn has_polysemy(&self) -> bool {
        !self.polysemous_terms.is_empty()
    }
}
