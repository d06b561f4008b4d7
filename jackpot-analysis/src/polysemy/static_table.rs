use std::collections::HashMap;

use jackpot_core::models::{Keyword, PolysemousTerm, PolysemySource};

const TABLE: &[(&str, &[&str])] = &[
    ("current", &["electricity", "water flow", "present time", "trending"]),
    ("court", &["basketball court", "legal court", "royal court", "courting"]),
    ("base", &["foundation", "military base", "baseball base", "alkaline"]),
    ("bank", &["financial institution", "river bank", "bank shot", "memory bank"]),
    ("rock", &["stone", "music genre", "to shake", "diamond"]),
    ("spring", &["season", "water source", "coil", "to jump"]),
    ("wave", &["ocean wave", "greeting gesture", "frequency", "to signal"]),
    ("pitcher", &["baseball player", "water container"]),
    ("bat", &["baseball bat", "flying mammal"]),
    ("ring", &["jewelry", "boxing ring", "phone ring", "to circle"]),
    ("nail", &["fingernail", "metal fastener", "to succeed perfectly"]),
    ("light", &["illumination", "not heavy", "to ignite"]),
    ("hard", &["difficult", "solid", "forceful"]),
    ("party", &["celebration", "political party", "group of people"]),
    ("suit", &["clothing", "lawsuit", "card suit", "to fit"]),
    ("jam", &["fruit preserve", "traffic jam", "music session", "to stick"]),
    ("hot", &["high temperature", "spicy", "trendy", "attractive"]),
    ("cool", &["low temperature", "calm", "trendy", "acceptable"]),
    ("sharp", &["pointed", "intelligent", "musical note", "distinct"]),
    ("flat", &["level surface", "apartment", "deflated", "musical note"]),
    ("key", &["door key", "musical key", "solution", "important"]),
    ("basic", &["fundamental", "alkaline chemistry", "mainstream"]),
    ("capital", &["city", "uppercase letter", "financial resources", "excellent"]),
    ("charge", &["electrical charge", "to accuse", "to attack", "price"]),
    ("crane", &["bird", "lifting machine", "to stretch neck"]),
    ("duck", &["waterfowl", "to dodge", "to lower head"]),
    ("club", &["weapon", "social group", "card suit", "nightclub"]),
    ("cross", &["religious symbol", "to traverse", "angry", "hybrid"]),
    ("spell", &["incantation", "period of time", "to write letters"]),
    ("saw", &["cutting tool", "past tense of see", "proverb"]),
    ("mean", &["average", "unkind", "to signify"]),
    ("state", &["condition", "us state", "country", "to declare"]),
];

/// Fixed table of common ambiguous words.
#[derive(Debug, Clone)]
pub struct StaticPolysemyTable {
    entries: HashMap<&'static str, &'static [&'static str]>,
}

impl StaticPolysemyTable {
    pub fn new() -> Self {
        Self {
            entries: TABLE.iter().copied().collect(),
        }
    }

    pub fn meanings(&self, word: &str) -> Option<&'static [&'static str]> {
        self.entries.get(word).copied()
    }
}

impl Default for StaticPolysemyTable {
    fn default() -> Self {
        Self::new()
    }
}

impl super::PolysemyTier for StaticPolysemyTable {
    fn detect(&self, keywords: &[Keyword]) -> Vec<PolysemousTerm> {
        keywords
            .iter()
            .filter_map(|k| {
                let meanings = k.forms().find_map(|f| self.meanings(f))?;
                Some(PolysemousTerm {
                    term: k.surface.clone(),
                    meanings: meanings.iter().map(|m| m.to_string()).collect(),
                    source: PolysemySource::StaticTable,
                })
            })
            .collect()
    }

    fn name(&self) -> &str {
        "static_table"
    }
}
