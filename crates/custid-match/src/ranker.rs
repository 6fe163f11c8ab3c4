//! Ranking a whole reference set for one redacted name.

use std::cmp::Ordering;

use custid_model::{CandidateMatch, MatchOptions, RankedCandidates, ReferenceSet, is_blank};
use tracing::debug;

use crate::strategy::MatchStrategyEngine;

/// Share of the minimum similarity a non-match needs to be listed as a suggestion.
const SUGGESTION_FACTOR: f64 = 0.6;

/// Evaluates every reference name and partitions the verdicts.
///
/// - `matches`: verdicts flagged as a match
/// - `suggestions`: non-matches with confidence at least 60% of `min_similarity`
/// - `no_matches`: the input itself when no match survived
///
/// Both lists are ordered by confidence (highest first, ties by reference
/// name) and truncated to `max_results`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CandidateRanker {
    engine: MatchStrategyEngine,
}

impl CandidateRanker {
    pub fn new(options: MatchOptions) -> Self {
        Self {
            engine: MatchStrategyEngine::new(options),
        }
    }

    pub fn rank(
        &self,
        redacted: &str,
        reference: &ReferenceSet,
        max_results: usize,
    ) -> RankedCandidates {
        if is_blank(redacted) || reference.is_empty() {
            return RankedCandidates::unmatched(redacted);
        }

        let suggestion_floor = self.engine.options().min_similarity * SUGGESTION_FACTOR;
        let mut matches = Vec::new();
        let mut suggestions = Vec::new();
        for name in reference.iter() {
            let candidate = self.engine.evaluate(redacted, name);
            if candidate.is_match {
                matches.push(candidate);
            } else if candidate.confidence >= suggestion_floor {
                suggestions.push(candidate);
            }
        }
        debug!(
            reference_size = reference.len(),
            matches = matches.len(),
            suggestions = suggestions.len(),
            "reference set ranked"
        );

        sort_and_truncate(&mut matches, max_results);
        sort_and_truncate(&mut suggestions, max_results);

        let no_matches = if matches.is_empty() {
            vec![redacted.to_string()]
        } else {
            Vec::new()
        };
        RankedCandidates {
            matches,
            suggestions,
            no_matches,
        }
    }
}

fn sort_and_truncate(candidates: &mut Vec<CandidateMatch>, max_results: usize) {
    candidates.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.reference_name.cmp(&b.reference_name))
    });
    candidates.truncate(max_results);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference(names: &[&str]) -> ReferenceSet {
        names.iter().copied().collect()
    }

    fn ranker() -> CandidateRanker {
        CandidateRanker::new(MatchOptions {
            min_similarity: 75.0,
            strict: false,
        })
    }

    #[test]
    fn empty_reference_set_echoes_input() {
        let ranked = ranker().rank("a***rifai", &ReferenceSet::new(), 5);
        assert!(ranked.is_empty());
        assert_eq!(ranked.no_matches, vec!["a***rifai".to_string()]);
    }

    #[test]
    fn empty_input_echoes_input() {
        let ranked = ranker().rank("  ", &reference(&["ahmadrifai"]), 5);
        assert!(ranked.is_empty());
        assert_eq!(ranked.no_matches, vec!["  ".to_string()]);
    }

    #[test]
    fn matches_sorted_by_confidence() {
        let ranked = ranker().rank(
            "a***rifai",
            &reference(&["arifai", "ahmadrifai", "budisantoso"]),
            5,
        );
        let names: Vec<&str> = ranked
            .matches
            .iter()
            .map(|m| m.reference_name.as_str())
            .collect();
        // "arifai": both parts cover every character (95); "ahmadrifai": 80
        assert_eq!(names, vec!["arifai", "ahmadrifai"]);
        assert!(ranked.no_matches.is_empty());
    }

    #[test]
    fn truncates_each_bucket() {
        let ranked = ranker().rank(
            "a***rifai",
            &reference(&["arifai", "ahmadrifai", "andirifai"]),
            1,
        );
        assert_eq!(ranked.matches.len(), 1);
        assert_eq!(ranked.matches[0].reference_name, "arifai");
        assert!(ranked.suggestions.len() <= 1);
    }

    #[test]
    fn suggestions_are_disjoint_from_matches() {
        let ranked = ranker().rank(
            "f***iaawindy",
            &reference(&["friliawindy", "zzz"]),
            5,
        );
        assert!(ranked.matches.is_empty());
        assert_eq!(ranked.suggestions.len(), 1);
        assert_eq!(ranked.suggestions[0].reference_name, "friliawindy");
        assert!(!ranked.suggestions[0].is_match);
        assert_eq!(ranked.no_matches, vec!["f***iaawindy".to_string()]);
    }

    #[test]
    fn ties_break_on_reference_name() {
        let ranked = ranker().rank("budi", &reference(&["budy", "budx"]), 5);
        let names: Vec<&str> = ranked
            .matches
            .iter()
            .map(|m| m.reference_name.as_str())
            .collect();
        assert_eq!(names, vec!["budx", "budy"]);
    }
}
