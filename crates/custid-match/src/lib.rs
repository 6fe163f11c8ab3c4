//! Customer name matching for partially redacted marketplace exports.
//!
//! A marketplace hides parts of customer names (`f***iaawindy`). This crate
//! decides which previously seen name, if any, a redacted name belongs to.
//!
//! # Stages
//!
//! - [`similarity`]: normalized Levenshtein score between two names
//! - [`match_censor`]: ordered search of the visible parts of a redacted name
//! - [`MatchStrategyEngine`]: exact, censor-pattern, and similarity strategies
//!   combined into one verdict per candidate
//! - [`CandidateRanker`]: verdicts over a whole reference set, partitioned and ranked
//! - [`ResolutionPolicy`]: the final matched-existing / new-identity decision
//!
//! # Example
//!
//! ```
//! use custid_match::ResolutionPolicy;
//! use custid_model::{ReferenceSet, ResolutionOptions, ResolutionOutcome};
//!
//! let reference: ReferenceSet = ["ahmadrifai", "budisantoso"].into_iter().collect();
//! let policy = ResolutionPolicy::new(ResolutionOptions::bulk_import());
//!
//! let result = policy.resolve("a***rifai", &reference);
//! assert_eq!(result.outcome, ResolutionOutcome::MatchedExisting);
//! assert_eq!(result.resolved_name, "ahmadrifai");
//! ```

#![deny(unsafe_code)]

mod censor;
mod policy;
mod ranker;
mod similarity;
mod stats;
mod strategy;

pub use censor::{CensorVerdict, PatternCoverage, match_censor, visible_parts};
pub use policy::{EMPTY_NAME_REASON, NO_MATCH_REASON, ResolutionPolicy, SUGGESTION_PREFIX};
pub use ranker::CandidateRanker;
pub use similarity::similarity;
pub use stats::NameStatistics;
pub use strategy::MatchStrategyEngine;
