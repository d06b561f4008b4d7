use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::config::defaults;

/// Answer category of a puzzle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum Category {
    Thing,
    Place,
    Person,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Thing, Category::Place, Category::Person];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Thing => "thing",
            Self::Place => "place",
            Self::Person => "person",
        }
    }

    /// Lenient parse. Unknown strings yield `None` rather than an error.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "thing" => Some(Self::Thing),
            "place" => Some(Self::Place),
            "person" => Some(Self::Person),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Probability mass per category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CategoryProbs {
    pub thing: f64,
    pub place: f64,
    pub person: f64,
}

impl CategoryProbs {
    pub fn new(thing: f64, place: f64, person: f64) -> Self {
        Self {
            thing,
            place,
            person,
        }
    }

    pub fn uniform() -> Self {
        let third = 1.0 / 3.0;
        Self::new(third, third, third)
    }

    pub fn get(&self, category: Category) -> f64 {
        match category {
            Category::Thing => self.thing,
            Category::Place => self.place,
            Category::Person => self.person,
        }
    }

    pub fn set(&mut self, category: Category, value: f64) {
        match category {
            Category::Thing => self.thing = value,
            Category::Place => self.place = value,
            Category::Person => self.person = value,
        }
    }

    pub fn total(&self) -> f64 {
        self.thing + self.place + self.person
    }

    /// Rescale to sum to 1. A zero or non-finite total falls back to uniform.
    pub fn normalized(self) -> Self {
        let total = self.total();
        if total <= 0.0 || !total.is_finite() {
            return Self::uniform();
        }
        Self::new(self.thing / total, self.place / total, self.person / total)
    }

    /// Category with the most mass. Ties resolve in `Category::ALL` order.
    pub fn dominant(&self) -> (Category, f64) {
        Category::ALL
            .iter()
            .map(|c| (*c, self.get(*c)))
            .fold((Category::Thing, f64::MIN), |best, cur| {
                if cur.1 > best.1 {
                    cur
                } else {
                    best
                }
            })
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, f64)> + '_ {
        Category::ALL.iter().map(move |c| (*c, self.get(*c)))
    }
}

impl Default for CategoryProbs {
    fn default() -> Self {
        Self::new(
            defaults::DEFAULT_PRIOR_THING,
            defaults::DEFAULT_PRIOR_PLACE,
            defaults::DEFAULT_PRIOR_PERSON,
        )
    }
}
