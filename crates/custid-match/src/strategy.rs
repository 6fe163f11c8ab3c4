//! Per-candidate strategy evaluation.

use custid_model::{CandidateMatch, MatchOptions, MatchStrategy, fold_name, is_redacted};
use tracing::trace;

use crate::censor::match_censor;
use crate::similarity::similarity;

const EXACT_CONFIDENCE: f64 = 100.0;
/// Share of the minimum similarity a failed censor verdict needs to be kept as a near miss.
const NEAR_MISS_FACTOR: f64 = 0.8;

/// Runs every applicable strategy for one (redacted, candidate) pair.
///
/// Precedence:
/// 1. case-insensitive exact equality (short-circuits at 100)
/// 2. censor-pattern match; in strict mode it must also reach `min_similarity`
/// 3. general similarity at or above `min_similarity`
/// 4. censor near miss: redacted input whose censor confidence reaches 80% of
///    `min_similarity`, kept as a non-match for suggestion ranking
/// 5. the higher of the two confidences, as a non-match
///
/// The engine always returns a verdict so failed candidates can still be ranked.
#[derive(Debug, Clone, Copy, Default)]
pub struct MatchStrategyEngine {
    options: MatchOptions,
}

impl MatchStrategyEngine {
    pub fn new(options: MatchOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &MatchOptions {
        &self.options
    }

    /// Evaluates `candidate` as a possible identity for `redacted`.
    pub fn evaluate(&self, redacted: &str, candidate: &str) -> CandidateMatch {
        if fold_name(redacted) == fold_name(candidate) {
            return verdict(
                candidate,
                EXACT_CONFIDENCE,
                MatchStrategy::Exact,
                "exact match (case-insensitive)".to_string(),
                true,
            );
        }

        let min_similarity = self.options.min_similarity;
        let censor = match_censor(candidate, redacted);
        if censor.is_match {
            if !self.options.strict || censor.confidence >= min_similarity {
                return verdict(
                    candidate,
                    censor.confidence,
                    MatchStrategy::CensorPattern,
                    censor.reason,
                    true,
                );
            }
            trace!(
                confidence = censor.confidence,
                min_similarity, "strict mode: censor match below floor"
            );
        }

        let score = similarity(redacted, candidate);
        if score >= min_similarity {
            return verdict(
                candidate,
                score,
                MatchStrategy::GeneralSimilarity,
                similarity_reason(score),
                true,
            );
        }

        if is_redacted(redacted) && censor.confidence >= min_similarity * NEAR_MISS_FACTOR {
            return verdict(
                candidate,
                censor.confidence,
                MatchStrategy::CensorPattern,
                format!("near miss: {}", censor.reason),
                false,
            );
        }

        if censor.confidence > score {
            verdict(
                candidate,
                censor.confidence,
                MatchStrategy::CensorPattern,
                censor.reason,
                false,
            )
        } else {
            verdict(
                candidate,
                score,
                MatchStrategy::GeneralSimilarity,
                similarity_reason(score),
                false,
            )
        }
    }
}

fn verdict(
    candidate: &str,
    confidence: f64,
    strategy: MatchStrategy,
    reason: String,
    is_match: bool,
) -> CandidateMatch {
    trace!(%strategy, confidence, is_match, "candidate evaluated");
    CandidateMatch {
        reference_name: candidate.to_string(),
        confidence,
        strategy,
        reason,
        is_match,
    }
}

fn similarity_reason(score: f64) -> String {
    format!("{score:.0}% name similarity")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(min_similarity: f64, strict: bool) -> MatchStrategyEngine {
        MatchStrategyEngine::new(MatchOptions {
            min_similarity,
            strict,
        })
    }

    #[test]
    fn exact_match_short_circuits() {
        let result = engine(75.0, true).evaluate(" SitiNurAini", "sitinuraini");
        assert_eq!(result.strategy, MatchStrategy::Exact);
        assert_eq!(result.confidence, 100.0);
        assert!(result.is_match);
        assert_eq!(result.reference_name, "sitinuraini");
    }

    #[test]
    fn censor_match_is_adopted() {
        let result = engine(75.0, false).evaluate("a***rifai", "ahmadrifai");
        assert_eq!(result.strategy, MatchStrategy::CensorPattern);
        assert!(result.is_match);
        assert!((result.confidence - 80.0).abs() < 1e-9);
    }

    #[test]
    fn lenient_mode_accepts_censor_match_below_floor() {
        let result = engine(75.0, false).evaluate("s***nuraini", "sitinuraini");
        assert_eq!(result.strategy, MatchStrategy::CensorPattern);
        assert!(result.is_match);
        assert!(result.confidence < 75.0);
    }

    #[test]
    fn strict_mode_demotes_censor_match_below_floor_to_near_miss() {
        let result = engine(75.0, true).evaluate("s***nuraini", "sitinuraini");
        assert_eq!(result.strategy, MatchStrategy::CensorPattern);
        assert!(!result.is_match);
        assert!((result.confidence - 800.0 / 11.0).abs() < 1e-9);
        insta::assert_snapshot!(result.reason, @"near miss: all visible parts match, 73% character coverage");
    }

    #[test]
    fn strict_mode_keeps_censor_match_above_floor() {
        let result = engine(75.0, true).evaluate("a***rifai", "ahmadrifai");
        assert!(result.is_match);
        assert_eq!(result.strategy, MatchStrategy::CensorPattern);
    }

    #[test]
    fn general_similarity_match() {
        let result = engine(75.0, false).evaluate("johndoe123", "johndoe12");
        assert_eq!(result.strategy, MatchStrategy::GeneralSimilarity);
        assert!(result.is_match);
        assert!((result.confidence - 90.0).abs() < 1e-9);
        assert_eq!(result.reason, "90% name similarity");
    }

    #[test]
    fn unredacted_input_never_reports_censor_strategy() {
        let result = engine(75.0, false).evaluate("johndoe123", "budisantoso");
        assert_eq!(result.strategy, MatchStrategy::GeneralSimilarity);
        assert!(!result.is_match);
    }

    #[test]
    fn fallback_reports_higher_similarity() {
        let result = engine(75.0, false).evaluate("f***iaawindy", "friliawindy");
        assert_eq!(result.strategy, MatchStrategy::GeneralSimilarity);
        assert!(!result.is_match);
        assert!((result.confidence - 200.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn fallback_reports_higher_censor_confidence() {
        // censor 53.3 (possible match band) beats similarity 50, but stays under the near-miss floor of 80
        let result = engine(100.0, false).evaluate("ab*cd*zz", "abcdef");
        assert_eq!(result.strategy, MatchStrategy::CensorPattern);
        assert!(!result.is_match);
        assert!(result.reason.starts_with("possible match"));
    }
}
