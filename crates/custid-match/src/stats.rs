//! Aggregate figures over a collection of customer names.

use std::collections::BTreeSet;

use custid_model::is_redacted;
use serde::{Deserialize, Serialize};

/// How many known names are redacted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NameStatistics {
    /// Distinct names (exact string value).
    pub total_names: usize,
    /// Distinct names containing at least one mask character.
    pub redacted_names: usize,
    /// `redacted_names / total_names`, 0.0 for an empty collection.
    pub redacted_ratio: f64,
}

impl NameStatistics {
    pub fn from_names<'a, I>(names: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let distinct: BTreeSet<&str> = names.into_iter().collect();
        let total_names = distinct.len();
        let redacted_names = distinct.iter().filter(|name| is_redacted(name)).count();
        let redacted_ratio = if total_names == 0 {
            0.0
        } else {
            redacted_names as f64 / total_names as f64
        };
        Self {
            total_names,
            redacted_names,
            redacted_ratio,
        }
    }

    /// Ratio expressed as a percentage.
    pub fn redacted_percentage(&self) -> f64 {
        self.redacted_ratio * 100.0
    }
}
