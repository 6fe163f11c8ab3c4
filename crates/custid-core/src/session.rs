//! One import run: rows resolved in order against a growing reference set.
//!
//! Rows must be fed sequentially. Each row is resolved against the reference
//! set as it stands after every previous row, and a name resolved as a new
//! identity is added before the next row is processed. Row N can therefore
//! match a customer first seen at row N-1.
//!
//! # Example
//!
//! ```
//! use custid_core::{ImportSession, ReferenceSetManager, ResolverConfig};
//!
//! let mut session = ImportSession::new(&ResolverConfig::default(), ReferenceSetManager::new());
//! let first = session.resolve_row(Some("sitinuraini"));
//! let second = session.resolve_row(Some("s***nuraini"));
//! assert_eq!(first.resolved_name, "sitinuraini");
//! assert_eq!(second.resolved_name, "sitinuraini");
//! ```

use std::fmt;

use custid_match::{ResolutionPolicy, SUGGESTION_PREFIX};
use custid_model::{ResolutionOutcome, ResolutionResult, is_blank};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::ResolverConfig;
use crate::logging::redact_value;
use crate::reference::ReferenceSetManager;

/// How a row's customer value was determined.
#[derive(Debug, Clone, PartialEq)]
pub enum RowStatus {
    /// Resolved by the policy.
    Resolved(ResolutionResult),
    /// Blank customer field replaced by the unknown-customer placeholder.
    Placeholder(ResolutionResult),
    /// Processing around the row failed; the original value is kept unchanged.
    Retained { error: String },
}

/// Outcome for one imported row.
#[derive(Debug, Clone, PartialEq)]
pub struct RowResolution {
    /// 1-based position of the row within the run.
    pub row: usize,
    /// Customer field as it appeared in the input.
    pub original: Option<String>,
    /// Value to persist in the customer field.
    pub resolved_name: String,
    pub status: RowStatus,
}

impl RowResolution {
    /// Resolution details, absent for retained rows.
    pub fn result(&self) -> Option<&ResolutionResult> {
        match &self.status {
            RowStatus::Resolved(result) | RowStatus::Placeholder(result) => Some(result),
            RowStatus::Retained { .. } => None,
        }
    }

    pub fn confidence(&self) -> Option<f64> {
        self.result().map(|result| result.confidence)
    }

    pub fn outcome(&self) -> Option<ResolutionOutcome> {
        self.result().map(|result| result.outcome)
    }

    /// Justification suitable for audit columns.
    pub fn reason(&self) -> &str {
        match &self.status {
            RowStatus::Resolved(result) | RowStatus::Placeholder(result) => &result.reason,
            RowStatus::Retained { error } => error,
        }
    }
}

/// Counters for a finished or ongoing run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub rows: usize,
    pub matched_existing: usize,
    /// Subset of `matched_existing` accepted from the suggestion bucket.
    pub suggestions_accepted: usize,
    pub new_identities: usize,
    pub placeholders: usize,
    pub retained: usize,
    /// Reference names available when the run started.
    pub seeded_names: usize,
    /// Reference names added by the run.
    pub added_names: usize,
}

impl fmt::Display for ImportSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} rows: {} matched ({} via suggestion), {} new, {} placeholder, {} retained",
            self.rows,
            self.matched_existing,
            self.suggestions_accepted,
            self.new_identities,
            self.placeholders,
            self.retained
        )
    }
}

/// Resolves the customer field of every row in one import run.
#[derive(Debug)]
pub struct ImportSession {
    policy: ResolutionPolicy,
    references: ReferenceSetManager,
    unknown_customer: String,
    summary: ImportSummary,
}

impl ImportSession {
    /// Starts a run with bulk-import options from `config` and a seeded manager.
    pub fn new(config: &ResolverConfig, references: ReferenceSetManager) -> Self {
        info!(
            reference_names = references.len(),
            min_confidence = config.bulk_import.min_confidence,
            strict = config.bulk_import.strict,
            "import session started"
        );
        let summary = ImportSummary {
            seeded_names: references.len(),
            ..ImportSummary::default()
        };
        Self {
            policy: ResolutionPolicy::new(config.bulk_import),
            references,
            unknown_customer: config.unknown_customer.clone(),
            summary,
        }
    }

    /// Resolves the next row's customer field.
    ///
    /// Blank or missing values become the unknown-customer placeholder. A
    /// name resolved as a new identity joins the reference set unless it is
    /// the placeholder itself.
    pub fn resolve_row(&mut self, customer: Option<&str>) -> RowResolution {
        self.summary.rows += 1;
        let row = self.summary.rows;
        let original = customer.map(str::to_string);

        let name = customer.unwrap_or_default();
        if is_blank(name) {
            let result = self.policy.resolve(name, self.references.snapshot());
            self.summary.placeholders += 1;
            debug!(row, "blank customer, using placeholder");
            return RowResolution {
                row,
                original,
                resolved_name: self.unknown_customer.clone(),
                status: RowStatus::Placeholder(result),
            };
        }

        let name = name.trim();
        let result = self.policy.resolve(name, self.references.snapshot());
        match result.outcome {
            ResolutionOutcome::MatchedExisting => {
                self.summary.matched_existing += 1;
                if result.reason.starts_with(SUGGESTION_PREFIX) {
                    self.summary.suggestions_accepted += 1;
                }
            }
            ResolutionOutcome::NewIdentity => {
                self.summary.new_identities += 1;
                if name != self.unknown_customer && self.references.propose(name) {
                    self.summary.added_names += 1;
                }
            }
        }
        debug!(
            row,
            customer = redact_value(name),
            resolved = redact_value(&result.resolved_name),
            outcome = %result.outcome,
            confidence = result.confidence,
            "row resolved"
        );
        RowResolution {
            row,
            original,
            resolved_name: result.resolved_name.clone(),
            status: RowStatus::Resolved(result),
        }
    }

    /// Records a row whose surrounding processing failed.
    ///
    /// The customer value is kept exactly as given and the reference set is
    /// not touched. The failure is logged, never propagated.
    pub fn retain_row(&mut self, original: &str, error: &dyn fmt::Display) -> RowResolution {
        self.summary.rows += 1;
        self.summary.retained += 1;
        let row = self.summary.rows;
        warn!(row, %error, "row kept unchanged");
        RowResolution {
            row,
            original: Some(original.to_string()),
            resolved_name: original.to_string(),
            status: RowStatus::Retained {
                error: error.to_string(),
            },
        }
    }

    pub fn references(&self) -> &ReferenceSetManager {
        &self.references
    }

    pub fn summary(&self) -> ImportSummary {
        self.summary
    }

    /// Ends the run, discarding the reference set.
    pub fn finish(self) -> ImportSummary {
        info!(
            rows = self.summary.rows,
            matched_existing = self.summary.matched_existing,
            new_identities = self.summary.new_identities,
            retained = self.summary.retained,
            added_names = self.summary.added_names,
            "import session finished"
        );
        self.summary
    }
}
