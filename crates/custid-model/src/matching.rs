//! Candidate match and resolution result types.
//!
//! These types carry the output of every resolution stage: a per-candidate
//! verdict, the ranked partition over a reference set, and the final decision
//! for one customer name.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Strategy that produced a candidate verdict.
///
/// Variants are listed in evaluation precedence: an exact match short-circuits
/// the censor-pattern check, which in turn takes precedence over general
/// similarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchStrategy {
    /// Case-insensitive string equality.
    Exact,
    /// Visible parts of a redacted name found in order inside the candidate.
    CensorPattern,
    /// Normalized edit-distance similarity.
    GeneralSimilarity,
}

impl MatchStrategy {
    /// Stable tag used in audit output.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::CensorPattern => "censor-pattern",
            Self::GeneralSimilarity => "general-similarity",
        }
    }
}

impl fmt::Display for MatchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Verdict for one redacted name against one reference name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateMatch {
    /// Reference-set member this verdict is about.
    pub reference_name: String,
    /// Confidence score (0.0 to 100.0).
    pub confidence: f64,
    /// Strategy that produced the confidence.
    pub strategy: MatchStrategy,
    /// Human-readable justification.
    pub reason: String,
    /// Whether the verdict counts as a match under the options it was evaluated with.
    pub is_match: bool,
}

/// Ranked partition of a reference set for one redacted name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RankedCandidates {
    /// Confirmed matches, highest confidence first.
    pub matches: Vec<CandidateMatch>,
    /// Non-matching candidates close enough to show for review.
    pub suggestions: Vec<CandidateMatch>,
    /// Inputs that produced no confirmed match.
    pub no_matches: Vec<String>,
}

impl RankedCandidates {
    /// Result for an input that could not be ranked at all.
    #[must_use]
    pub fn unmatched(input: &str) -> Self {
        Self {
            matches: Vec::new(),
            suggestions: Vec::new(),
            no_matches: vec![input.to_string()],
        }
    }

    #[must_use]
    pub fn top_match(&self) -> Option<&CandidateMatch> {
        self.matches.first()
    }

    #[must_use]
    pub fn top_suggestion(&self) -> Option<&CandidateMatch> {
        self.suggestions.first()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty() && self.suggestions.is_empty()
    }
}

/// Final outcome category for a resolved name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResolutionOutcome {
    /// The name was attributed to an already known customer.
    MatchedExisting,
    /// No suitable match; the name stands as a new customer identity.
    NewIdentity,
}

impl ResolutionOutcome {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MatchedExisting => "matched-existing",
            Self::NewIdentity => "new-identity",
        }
    }
}

impl fmt::Display for ResolutionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decision for one customer name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolutionResult {
    /// Name to persist for the row.
    pub resolved_name: String,
    /// Confidence score (0.0 to 100.0).
    pub confidence: f64,
    /// Human-readable justification.
    pub reason: String,
    pub outcome: ResolutionOutcome,
    /// Strategy behind a matched-existing outcome; `None` for new identities.
    pub strategy: Option<MatchStrategy>,
}

impl ResolutionResult {
    /// Builds a matched-existing result from a ranked candidate.
    ///
    /// `reason_prefix` is prepended to the candidate reason as `"{prefix}: {reason}"`.
    #[must_use]
    pub fn matched(candidate: CandidateMatch, reason_prefix: Option<&str>) -> Self {
        let reason = match reason_prefix {
            Some(prefix) => format!("{prefix}: {}", candidate.reason),
            None => candidate.reason,
        };
        Self {
            resolved_name: candidate.reference_name,
            confidence: candidate.confidence,
            reason,
            outcome: ResolutionOutcome::MatchedExisting,
            strategy: Some(candidate.strategy),
        }
    }

    /// Builds a new-identity result that keeps the input name.
    #[must_use]
    pub fn new_identity(name: &str, reason: impl Into<String>) -> Self {
        Self {
            resolved_name: name.to_string(),
            confidence: 100.0,
            reason: reason.into(),
            outcome: ResolutionOutcome::NewIdentity,
            strategy: None,
        }
    }

    #[must_use]
    pub fn is_new_identity(&self) -> bool {
        self.outcome == ResolutionOutcome::NewIdentity
    }
}
