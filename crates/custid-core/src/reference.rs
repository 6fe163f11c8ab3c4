//! Per-run ownership of the known customer names.
//!
//! A [`ReferenceSetManager`] lives for exactly one import run. It is seeded
//! from historical records, consulted for every row, and grown with every name
//! resolved as a new identity, so later rows can match customers first seen
//! earlier in the same file. It is never shared between runs.

use anyhow::{Context, Result};
use custid_model::{ReferenceSet, is_blank};
use tracing::debug;

/// Supplier of historical customer names used to seed a run.
///
/// Implemented by persistence adapters; vectors and slices of names implement
/// it directly.
pub trait NameSource {
    /// Returns every known customer name. Duplicates are allowed.
    fn customer_names(&self) -> Result<Vec<String>>;
}

impl NameSource for [String] {
    fn customer_names(&self) -> Result<Vec<String>> {
        Ok(self.to_vec())
    }
}

impl NameSource for Vec<String> {
    fn customer_names(&self) -> Result<Vec<String>> {
        Ok(self.clone())
    }
}

impl NameSource for [&str] {
    fn customer_names(&self) -> Result<Vec<String>> {
        Ok(self.iter().map(|name| (*name).to_string()).collect())
    }
}

/// Append-only set of known names for one import run.
#[derive(Debug, Clone, Default)]
pub struct ReferenceSetManager {
    names: ReferenceSet,
    seeded: usize,
    proposed: usize,
}

impl ReferenceSetManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds historical names. Blank names are skipped.
    ///
    /// Returns the number of names that were not already present.
    pub fn seed<I, S>(&mut self, names: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut added = 0;
        for name in names {
            let name = name.into();
            if is_blank(&name) {
                continue;
            }
            if self.names.insert(name) {
                added += 1;
            }
        }
        self.seeded += added;
        debug!(added, total = self.names.len(), "reference set seeded");
        added
    }

    /// Seeds from a [`NameSource`].
    ///
    /// # Errors
    ///
    /// Propagates the source failure; the manager is left unchanged.
    pub fn seed_from<S>(&mut self, source: &S) -> Result<usize>
    where
        S: NameSource + ?Sized,
    {
        let names = source
            .customer_names()
            .context("load historical customer names")?;
        Ok(self.seed(names))
    }

    /// Adds a name first seen during this run.
    ///
    /// Deduplicates on exact, case-sensitive string equality. Returns true if
    /// the name was added.
    pub fn propose(&mut self, name: &str) -> bool {
        if is_blank(name) {
            return false;
        }
        let added = self.names.insert(name);
        if added {
            self.proposed += 1;
        }
        added
    }

    /// Current names, including every name proposed so far.
    pub fn snapshot(&self) -> &ReferenceSet {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Names that came from seeding.
    pub fn seeded_count(&self) -> usize {
        self.seeded
    }

    /// Names added by [`propose`](Self::propose) during the run.
    pub fn proposed_count(&self) -> usize {
        self.proposed
    }
}

#[cfg(test)]
mod tests {
    use anyhow::anyhow;

    use super::*;

    struct FailingSource;

    impl NameSource for FailingSource {
        fn customer_names(&self) -> Result<Vec<String>> {
            Err(anyhow!("connection refused"))
        }
    }

    #[test]
    fn seed_skips_blanks_and_duplicates() {
        let mut manager = ReferenceSetManager::new();
        let added = manager.seed(["ahmadrifai", "", "ahmadrifai", "  ", "budisantoso"]);
        assert_eq!(added, 2);
        assert_eq!(manager.len(), 2);
        assert_eq!(manager.seeded_count(), 2);
    }

    #[test]
    fn propose_deduplicates_exactly() {
        let mut manager = ReferenceSetManager::new();
        manager.seed(["ahmadrifai"]);
        assert!(!manager.propose("ahmadrifai"));
        assert!(manager.propose("AhmadRifai"));
        assert!(!manager.propose(""));
        assert_eq!(manager.len(), 2);
        assert_eq!(manager.proposed_count(), 1);
    }

    #[test]
    fn seed_from_slice_source() {
        let names = ["sitinuraini", "budisantoso"];
        let mut manager = ReferenceSetManager::new();
        let added = manager.seed_from(&names[..]).unwrap();
        assert_eq!(added, 2);
        assert!(manager.snapshot().contains("sitinuraini"));
    }

    #[test]
    fn seed_from_failing_source_leaves_set_untouched() {
        let mut manager = ReferenceSetManager::new();
        let err = manager.seed_from(&FailingSource).unwrap_err();
        assert!(format!("{err:#}").contains("connection refused"));
        assert!(manager.is_empty());
    }
}
