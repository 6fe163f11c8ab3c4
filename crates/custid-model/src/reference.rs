//! Set of known customer names consulted during resolution.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Known customer names, unique by exact string value.
///
/// Iteration order is lexicographic, which keeps ranking deterministic no
/// matter the order names were added in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceSet {
    names: BTreeSet<String>,
}

impl ReferenceSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a name. Returns false when the exact string is already present.
    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        self.names.insert(name.into())
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for ReferenceSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<S: Into<String>> Extend<S> for ReferenceSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.names.extend(iter.into_iter().map(Into::into));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deduplicates_on_exact_value() {
        let mut set = ReferenceSet::new();
        assert!(set.insert("sitinuraini"));
        assert!(!set.insert("sitinuraini"));
        assert!(set.insert("SitiNurAini"));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn iterates_in_lexicographic_order() {
        let set: ReferenceSet = ["budisantoso", "ahmadrifai"].into_iter().collect();
        let names: Vec<&str> = set.iter().collect();
        assert_eq!(names, vec!["ahmadrifai", "budisantoso"]);
    }
}
