//! Resolution parameters.

use serde::{Deserialize, Serialize};

use crate::error::{CustidError, Result};

/// Confidence floor used by bulk imports.
pub const DEFAULT_MIN_CONFIDENCE: f64 = 75.0;
/// Confidence floor used by the interactive "find matches" lookup.
pub const FIND_MATCHES_MIN_CONFIDENCE: f64 = 70.0;
/// Number of ranked candidates returned per bucket by "find matches".
pub const FIND_MATCHES_LIMIT: usize = 10;

/// Options consumed by the per-candidate strategy evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchOptions {
    /// Minimum similarity (0.0 to 100.0) for a general-similarity match.
    pub min_similarity: f64,
    /// Require censor-pattern matches to reach `min_similarity` as well.
    pub strict: bool,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            min_similarity: DEFAULT_MIN_CONFIDENCE,
            strict: false,
        }
    }
}

/// Options for resolving a single customer name.
///
/// # Example
///
/// ```
/// use custid_model::ResolutionOptions;
///
/// let options = ResolutionOptions::bulk_import().with_strict(true);
/// assert_eq!(options.min_confidence, 75.0);
/// assert!(options.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolutionOptions {
    /// Confidence floor (0.0 to 100.0).
    pub min_confidence: f64,
    /// Strict mode: no suggestion fallback, censor matches must reach the floor.
    pub strict: bool,
    /// Maximum entries per ranked bucket for interactive lookups.
    pub max_results: usize,
}

impl Default for ResolutionOptions {
    fn default() -> Self {
        Self::bulk_import()
    }
}

impl ResolutionOptions {
    /// Parameters used while importing order files.
    #[must_use]
    pub fn bulk_import() -> Self {
        Self {
            min_confidence: DEFAULT_MIN_CONFIDENCE,
            strict: false,
            max_results: 1,
        }
    }

    /// Parameters used by the interactive lookup that returns full ranked lists.
    #[must_use]
    pub fn find_matches() -> Self {
        Self {
            min_confidence: FIND_MATCHES_MIN_CONFIDENCE,
            strict: false,
            max_results: FIND_MATCHES_LIMIT,
        }
    }

    #[must_use]
    pub fn with_min_confidence(mut self, min_confidence: f64) -> Self {
        self.min_confidence = min_confidence;
        self
    }

    #[must_use]
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    #[must_use]
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    /// Options handed to the strategy engine.
    #[must_use]
    pub fn match_options(&self) -> MatchOptions {
        MatchOptions {
            min_similarity: self.min_confidence,
            strict: self.strict,
        }
    }

    /// Checks that parameters are within range.
    ///
    /// # Errors
    ///
    /// Returns [`CustidError::InvalidOption`] when `min_confidence` is outside
    /// 0–100 or `max_results` is zero.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=100.0).contains(&self.min_confidence) {
            return Err(CustidError::InvalidOption {
                name: "min_confidence",
                message: format!("{} is outside 0-100", self.min_confidence),
            });
        }
        if self.max_results == 0 {
            return Err(CustidError::InvalidOption {
                name: "max_results",
                message: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets() {
        let bulk = ResolutionOptions::bulk_import();
        assert_eq!(bulk.min_confidence, 75.0);
        assert!(!bulk.strict);
        assert_eq!(bulk.max_results, 1);

        let find = ResolutionOptions::find_matches();
        assert_eq!(find.min_confidence, 70.0);
        assert_eq!(find.max_results, FIND_MATCHES_LIMIT);
    }

    #[test]
    fn match_options_follow_resolution_options() {
        let options = ResolutionOptions::bulk_import()
            .with_min_confidence(60.0)
            .with_strict(true);
        assert_eq!(
            options.match_options(),
            MatchOptions {
                min_similarity: 60.0,
                strict: true
            }
        );
    }

    #[test]
    fn rejects_out_of_range_confidence() {
        let err = ResolutionOptions::bulk_import()
            .with_min_confidence(120.0)
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("min_confidence"));
    }

    #[test]
    fn rejects_zero_max_results() {
        assert!(
            ResolutionOptions::find_matches()
                .with_max_results(0)
                .validate()
                .is_err()
        );
    }

    #[test]
    fn missing_fields_take_bulk_defaults() {
        let options: ResolutionOptions = serde_json::from_str(r#"{"strict": true}"#).unwrap();
        assert!(options.strict);
        assert_eq!(options.min_confidence, DEFAULT_MIN_CONFIDENCE);
        assert_eq!(options.max_results, 1);
    }
}
