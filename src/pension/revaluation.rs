//! CARE revaluation history
//!
//! Published revaluation percentages by scheme year. A year may have no
//! published figure, in which case it is skipped rather than counted as 0%.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RevaluationHistory {
    entries: BTreeMap<i32, Option<f64>>,
}

impl RevaluationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from (year, percentage) pairs in any order
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (i32, Option<f64>)>,
    {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    pub fn insert(&mut self, year: i32, revaluation_pct: Option<f64>) {
        self.entries.insert(year, revaluation_pct);
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Multiplicative factors in ascending year order, blanks skipped
    pub fn factors(&self) -> impl Iterator<Item = f64> + '_ {
        self.entries
            .values()
            .filter_map(|pct| pct.map(|p| 1.0 + p / 100.0))
    }

    /// Revalue an accrued CARE amount through every published year
    pub fn apply(&self, amount: f64) -> f64 {
        self.factors().fold(amount, |acc, factor| acc * factor)
    }
}
