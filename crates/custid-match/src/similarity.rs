//! Edit-distance similarity between two names.

use rapidfuzz::distance::levenshtein;

const MAX_SCORE: f64 = 100.0;

/// Normalized Levenshtein similarity of two names, from 0.0 to 100.0.
///
/// Both names are lowercased and compared character by character with unit
/// costs for insertion, deletion, and substitution. The score is
/// `(max_len - distance) / max_len * 100`. Two empty names score 100; an empty
/// name against a non-empty one scores 0.
///
/// ```
/// use custid_match::similarity;
///
/// assert_eq!(similarity("Budi", "budi"), 100.0);
/// assert_eq!(similarity("budi", ""), 0.0);
/// assert_eq!(similarity("budi", "bude"), 75.0);
/// ```
pub fn similarity(a: &str, b: &str) -> f64 {
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return MAX_SCORE;
    }
    let distance = levenshtein::distance(a.chars(), b.chars());
    (max_len - distance) as f64 / max_len as f64 * MAX_SCORE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_ignoring_case_scores_full() {
        assert_eq!(similarity("SitiNurAini", "sitinuraini"), 100.0);
    }

    #[test]
    fn empty_inputs() {
        assert_eq!(similarity("", ""), 100.0);
        assert_eq!(similarity("", "x"), 0.0);
        assert_eq!(similarity("x", ""), 0.0);
    }

    #[test]
    fn counts_characters_not_bytes() {
        // one substitution over four characters, regardless of UTF-8 width
        assert_eq!(similarity("josé", "jose"), 75.0);
    }

    #[test]
    fn mask_characters_are_ordinary_characters() {
        // f [r i l -> * * *] i a [+a] w i n d y: four edits over twelve characters
        let score = similarity("friliawindy", "f***iaawindy");
        assert!((score - 200.0 / 3.0).abs() < 1e-9, "got {score}");
    }

    #[test]
    fn completely_different_names() {
        assert_eq!(similarity("abc", "xyz"), 0.0);
    }
}
