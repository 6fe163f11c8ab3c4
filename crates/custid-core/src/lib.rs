//! Import-run orchestration: per-run reference sets, row sessions, and resolver
//! configuration.

pub mod config;
pub mod logging;
pub mod reference;
pub mod session;

pub use config::{ConfigError, DEFAULT_UNKNOWN_CUSTOMER, ResolverConfig};
pub use reference::{NameSource, ReferenceSetManager};
pub use session::{ImportSession, ImportSummary, RowResolution, RowStatus};
