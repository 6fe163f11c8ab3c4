//! CLI library components for the customer identity resolver.

pub mod logging;
pub mod pipeline;
