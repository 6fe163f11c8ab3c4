//! Final resolution decision for one customer name.

use custid_model::{RankedCandidates, ReferenceSet, ResolutionOptions, ResolutionResult, is_blank};
use tracing::debug;

use crate::ranker::CandidateRanker;

/// Reason attached to blank input.
pub const EMPTY_NAME_REASON: &str = "empty/null customer name";
/// Reason attached when no candidate was good enough.
pub const NO_MATCH_REASON: &str = "no suitable match found";
/// Prefix marking a result accepted from the suggestion bucket.
pub const SUGGESTION_PREFIX: &str = "suggestion";

/// Share of `min_confidence` a top suggestion needs to be accepted in lenient mode.
const SUGGESTION_ACCEPT_FACTOR: f64 = 0.8;

/// Decides the identity a redacted customer name resolves to.
///
/// The policy never fails: a name without a suitable match resolves to
/// itself as a new identity.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResolutionPolicy {
    options: ResolutionOptions,
}

impl ResolutionPolicy {
    pub fn new(options: ResolutionOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ResolutionOptions {
        &self.options
    }

    /// Resolves `redacted` against the current reference set.
    ///
    /// 1. the top match, when there is one, is accepted
    /// 2. otherwise, outside strict mode, the top suggestion is accepted when
    ///    its confidence reaches 80% of `min_confidence`
    /// 3. otherwise the name becomes a new identity with confidence 100
    pub fn resolve(&self, redacted: &str, reference: &ReferenceSet) -> ResolutionResult {
        if is_blank(redacted) {
            return ResolutionResult::new_identity(redacted, EMPTY_NAME_REASON);
        }

        let ranker = CandidateRanker::new(self.options.match_options());
        let RankedCandidates {
            matches,
            suggestions,
            ..
        } = ranker.rank(redacted, reference, 1);

        if let Some(top) = matches.into_iter().next() {
            debug!(strategy = %top.strategy, confidence = top.confidence, "matched existing customer");
            return ResolutionResult::matched(top, None);
        }

        let suggestion_floor = self.options.min_confidence * SUGGESTION_ACCEPT_FACTOR;
        if !self.options.strict
            && let Some(top) = suggestions.into_iter().next()
            && top.confidence >= suggestion_floor
        {
            debug!(strategy = %top.strategy, confidence = top.confidence, "accepted suggestion");
            return ResolutionResult::matched(top, Some(SUGGESTION_PREFIX));
        }

        debug!(reference_size = reference.len(), "no suitable match, new identity");
        ResolutionResult::new_identity(redacted.trim(), NO_MATCH_REASON)
    }

    /// Full ranked lists for human review, limited to `max_results` per bucket.
    ///
    /// Nothing is applied; callers decide what to do with the candidates.
    pub fn find_matches(&self, redacted: &str, reference: &ReferenceSet) -> RankedCandidates {
        CandidateRanker::new(self.options.match_options()).rank(
            redacted,
            reference,
            self.options.max_results,
        )
    }
}

#[cfg(test)]
mod tests {
    use custid_model::{MatchStrategy, ResolutionOutcome};

    use super::*;

    fn reference(names: &[&str]) -> ReferenceSet {
        names.iter().copied().collect()
    }

    #[test]
    fn blank_input_is_a_new_identity() {
        let result = ResolutionPolicy::default().resolve("", &reference(&["budi"]));
        assert_eq!(result.outcome, ResolutionOutcome::NewIdentity);
        assert_eq!(result.reason, EMPTY_NAME_REASON);
    }

    #[test]
    fn top_match_is_accepted() {
        let result = ResolutionPolicy::default().resolve("a***rifai", &reference(&["ahmadrifai"]));
        assert_eq!(result.outcome, ResolutionOutcome::MatchedExisting);
        assert_eq!(result.resolved_name, "ahmadrifai");
        assert_eq!(result.strategy, Some(MatchStrategy::CensorPattern));
        assert!(!result.reason.starts_with(SUGGESTION_PREFIX));
    }

    #[test]
    fn lenient_mode_accepts_close_suggestion() {
        let result =
            ResolutionPolicy::default().resolve("f***iaawindy", &reference(&["friliawindy"]));
        assert_eq!(result.outcome, ResolutionOutcome::MatchedExisting);
        assert_eq!(result.resolved_name, "friliawindy");
        insta::assert_snapshot!(result.reason, @"suggestion: 67% name similarity");
    }

    #[test]
    fn strict_mode_ignores_suggestions() {
        let policy = ResolutionPolicy::new(ResolutionOptions::bulk_import().with_strict(true));
        let result = policy.resolve("f***iaawindy", &reference(&["friliawindy"]));
        assert_eq!(result.outcome, ResolutionOutcome::NewIdentity);
        assert_eq!(result.resolved_name, "f***iaawindy");
        assert_eq!(result.confidence, 100.0);
        assert_eq!(result.reason, NO_MATCH_REASON);
    }

    #[test]
    fn distant_suggestion_is_not_accepted() {
        // similarity 50 is a suggestion (>= 45) but below the acceptance floor of 60
        let result = ResolutionPolicy::default().resolve("budi", &reference(&["buxy"]));
        assert_eq!(result.outcome, ResolutionOutcome::NewIdentity);
    }

    #[test]
    fn find_matches_returns_ranked_lists() {
        let policy = ResolutionPolicy::new(ResolutionOptions::find_matches());
        let ranked = policy.find_matches(
            "a***rifai",
            &reference(&["ahmadrifai", "andirifai", "arifai", "budisantoso"]),
        );
        let names: Vec<&str> = ranked
            .matches
            .iter()
            .map(|m| m.reference_name.as_str())
            .collect();
        assert_eq!(names, vec!["arifai", "andirifai", "ahmadrifai"]);
        assert!(ranked.no_matches.is_empty());
    }
}
