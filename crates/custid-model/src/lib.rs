pub mod error;
pub mod matching;
pub mod name;
pub mod options;
pub mod reference;

pub use error::{CustidError, Result};
pub use matching::{
    CandidateMatch, MatchStrategy, RankedCandidates, ResolutionOutcome, ResolutionResult,
};
pub use name::{MASK_CHAR, fold_name, is_blank, is_redacted};
pub use options::{
    DEFAULT_MIN_CONFIDENCE, FIND_MATCHES_LIMIT, FIND_MATCHES_MIN_CONFIDENCE, MatchOptions,
    ResolutionOptions,
};
pub use reference::ReferenceSet;
