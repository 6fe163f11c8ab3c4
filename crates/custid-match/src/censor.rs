//! Censorship-aware matching of redacted names.
//!
//! A redacted name such as `a***rifai` keeps a few visible fragments and masks
//! the rest. A candidate is consistent with it when the fragments occur in the
//! candidate in the same left-to-right order. Confidence comes from a banded
//! ladder over two ratios: how many fragments were found, and how much of the
//! candidate they cover.

use custid_model::{MASK_CHAR, fold_name};

/// All visible parts found with at least this character coverage: match.
const FULL_MIN_CHAR_RATIO: f64 = 0.7;
const FULL_MAX_CONFIDENCE: f64 = 95.0;

/// Most visible parts found with solid coverage: match.
const STRONG_MIN_PART_RATIO: f64 = 0.8;
const STRONG_MIN_CHAR_RATIO: f64 = 0.5;
const STRONG_MAX_CONFIDENCE: f64 = 85.0;
const STRONG_WEIGHT: f64 = 50.0;

/// Partial evidence: reported, never a match.
const POSSIBLE_MIN_PART_RATIO: f64 = 0.6;
const POSSIBLE_MIN_CHAR_RATIO: f64 = 0.3;
const POSSIBLE_MAX_CONFIDENCE: f64 = 75.0;
const POSSIBLE_WEIGHT: f64 = 40.0;

const WEAK_MAX_CONFIDENCE: f64 = 50.0;
const WEAK_WEIGHT: f64 = 30.0;

const NO_PATTERN_REASON: &str = "no censorship pattern found";
const NO_VISIBLE_REASON: &str = "no visible characters";

/// Outcome of comparing a redacted name against one candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct CensorVerdict {
    pub is_match: bool,
    /// Confidence score (0.0 to 100.0).
    pub confidence: f64,
    pub reason: String,
    /// Search statistics; `None` when the input had no usable pattern.
    pub coverage: Option<PatternCoverage>,
}

impl CensorVerdict {
    fn rejected(reason: &str) -> Self {
        Self {
            is_match: false,
            confidence: 0.0,
            reason: reason.to_string(),
            coverage: None,
        }
    }
}

/// Counts gathered while searching visible parts inside a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternCoverage {
    pub total_parts: usize,
    pub matched_parts: usize,
    /// Characters of the candidate covered by found parts.
    pub matched_chars: usize,
    /// Length of the candidate in characters.
    pub candidate_chars: usize,
}

impl PatternCoverage {
    #[must_use]
    pub fn all_parts_matched(&self) -> bool {
        self.total_parts > 0 && self.matched_parts == self.total_parts
    }

    #[must_use]
    pub fn part_ratio(&self) -> f64 {
        if self.total_parts == 0 {
            return 0.0;
        }
        self.matched_parts as f64 / self.total_parts as f64
    }

    #[must_use]
    pub fn char_ratio(&self) -> f64 {
        if self.candidate_chars == 0 {
            return 0.0;
        }
        self.matched_chars as f64 / self.candidate_chars as f64
    }
}

/// Splits a redacted name on runs of the mask character.
///
/// Empty fragments are dropped; order is preserved.
///
/// ```
/// use custid_match::visible_parts;
///
/// assert_eq!(visible_parts("f***iaa*windy"), vec!["f", "iaa", "windy"]);
/// assert!(visible_parts("****").is_empty());
/// ```
pub fn visible_parts(redacted: &str) -> Vec<&str> {
    redacted
        .split(MASK_CHAR)
        .filter(|part| !part.is_empty())
        .collect()
}

/// Checks whether `redacted` is consistent with `candidate`.
///
/// Both names are case-folded and trimmed. Visible parts are searched
/// greedily from left to right without overlap: each search starts where the
/// previous found part ended, and a part that is not found leaves the cursor
/// in place.
pub fn match_censor(candidate: &str, redacted: &str) -> CensorVerdict {
    let candidate = fold_name(candidate);
    let redacted = fold_name(redacted);

    if !redacted.contains(MASK_CHAR) {
        return CensorVerdict::rejected(NO_PATTERN_REASON);
    }
    let parts = visible_parts(&redacted);
    if parts.is_empty() {
        return CensorVerdict::rejected(NO_VISIBLE_REASON);
    }

    let coverage = search_parts(&candidate, &parts);
    let (is_match, confidence, reason) = grade(&coverage);
    CensorVerdict {
        is_match,
        confidence,
        reason,
        coverage: Some(coverage),
    }
}

fn search_parts(candidate: &str, parts: &[&str]) -> PatternCoverage {
    let mut cursor = 0;
    let mut matched_parts = 0;
    let mut matched_chars = 0;
    for part in parts {
        // cursor always sits on a char boundary: it only moves to the end of a found part
        if let Some(offset) = candidate[cursor..].find(part) {
            cursor += offset + part.len();
            matched_parts += 1;
            matched_chars += part.chars().count();
        }
    }
    PatternCoverage {
        total_parts: parts.len(),
        matched_parts,
        matched_chars,
        candidate_chars: candidate.chars().count(),
    }
}

fn grade(coverage: &PatternCoverage) -> (bool, f64, String) {
    let part_ratio = coverage.part_ratio();
    let char_ratio = coverage.char_ratio();
    let part_pct = part_ratio * 100.0;
    let char_pct = char_ratio * 100.0;

    if coverage.all_parts_matched() && char_ratio >= FULL_MIN_CHAR_RATIO {
        return (
            true,
            (char_ratio * 100.0).min(FULL_MAX_CONFIDENCE),
            format!("all visible parts match, {char_pct:.0}% character coverage"),
        );
    }
    if part_ratio >= STRONG_MIN_PART_RATIO && char_ratio >= STRONG_MIN_CHAR_RATIO {
        return (
            true,
            ((part_ratio + char_ratio) * STRONG_WEIGHT).min(STRONG_MAX_CONFIDENCE),
            format!("{part_pct:.0}% of visible parts match, {char_pct:.0}% character coverage"),
        );
    }
    if part_ratio >= POSSIBLE_MIN_PART_RATIO && char_ratio >= POSSIBLE_MIN_CHAR_RATIO {
        return (
            false,
            ((part_ratio + char_ratio) * POSSIBLE_WEIGHT).min(POSSIBLE_MAX_CONFIDENCE),
            format!(
                "possible match: {part_pct:.0}% of visible parts, {char_pct:.0}% character coverage"
            ),
        );
    }
    (
        false,
        ((part_ratio + char_ratio) * WEAK_WEIGHT).min(WEAK_MAX_CONFIDENCE),
        format!("weak pattern match: {part_pct:.0}% of visible parts, {char_pct:.0}% character coverage"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn no_mask_is_rejected_without_searching() {
        let verdict = match_censor("johndoe123", "johndoe123");
        assert!(!verdict.is_match);
        assert_eq!(verdict.confidence, 0.0);
        assert_eq!(verdict.reason, "no censorship pattern found");
        assert!(verdict.coverage.is_none());
    }

    #[test]
    fn mask_only_has_no_visible_characters() {
        let verdict = match_censor("ahmadrifai", " *** ");
        assert!(!verdict.is_match);
        assert_eq!(verdict.confidence, 0.0);
        assert_eq!(verdict.reason, "no visible characters");
    }

    #[test]
    fn full_band_uses_character_coverage() {
        // "s" + "nuraini" cover 8 of 11 characters
        let verdict = match_censor("sitinuraini", "s***nuraini");
        assert!(verdict.is_match);
        approx(verdict.confidence, 800.0 / 11.0);
        insta::assert_snapshot!(verdict.reason, @"all visible parts match, 73% character coverage");
    }

    #[test]
    fn full_band_is_capped() {
        // the visible part covers the whole candidate
        let verdict = match_censor("ahmad", "ahmad*");
        assert!(verdict.is_match);
        assert_eq!(verdict.confidence, 95.0);
    }

    #[test]
    fn strong_band_combines_ratios() {
        // 2/2 parts, 6/10 characters
        let verdict = match_censor("AhmadRifai", "a***rifai");
        assert!(verdict.is_match);
        approx(verdict.confidence, 80.0);
        insta::assert_snapshot!(verdict.reason, @"100% of visible parts match, 60% character coverage");
    }

    #[test]
    fn possible_band_never_matches() {
        // "ab" and "cd" found, "zz" missing: 2/3 parts, 4/6 characters
        let verdict = match_censor("abcdef", "ab*cd*zz");
        assert!(!verdict.is_match);
        approx(verdict.confidence, (2.0 / 3.0 + 4.0 / 6.0) * 40.0);
        insta::assert_snapshot!(verdict.reason, @"possible match: 67% of visible parts, 67% character coverage");
    }

    #[test]
    fn weak_band_when_nothing_is_found() {
        let verdict = match_censor("ahmadrifai", "x***q");
        assert!(!verdict.is_match);
        assert_eq!(verdict.confidence, 0.0);
        insta::assert_snapshot!(verdict.reason, @"weak pattern match: 0% of visible parts, 0% character coverage");
    }

    #[test]
    fn parts_must_appear_in_order() {
        // "ai" is found at the end, so "ah" has nothing left to match against
        let verdict = match_censor("ahmadrifai", "ai***ah");
        let coverage = verdict.coverage.unwrap();
        assert_eq!(coverage.matched_parts, 1);
        assert_eq!(coverage.matched_chars, 2);
        assert!(!verdict.is_match);
    }

    #[test]
    fn missing_part_does_not_move_the_cursor() {
        // "zz" is skipped, "mad" is still searched from the start
        let verdict = match_censor("ahmadrifai", "zz*mad*fai");
        let coverage = verdict.coverage.unwrap();
        assert_eq!(coverage.matched_parts, 2);
        assert_eq!(coverage.matched_chars, 6);
    }

    #[test]
    fn empty_candidate_has_zero_coverage() {
        let verdict = match_censor("", "a*b");
        let coverage = verdict.coverage.unwrap();
        assert_eq!(coverage.char_ratio(), 0.0);
        assert!(!verdict.is_match);
    }

    #[test]
    fn typo_in_visible_part_falls_to_weak_band() {
        // "iaawindy" does not occur in "friliawindy"; only "f" is found
        let verdict = match_censor("friliawindy", "f***iaawindy");
        let coverage = verdict.coverage.unwrap();
        assert_eq!(coverage.matched_parts, 1);
        assert_eq!(coverage.matched_chars, 1);
        approx(verdict.confidence, (0.5 + 1.0 / 11.0) * 30.0);
    }
}
