//! Resolver configuration loaded from TOML.
//!
//! Every field is optional; missing values fall back to the presets in
//! [`ResolutionOptions`].
//!
//! ```toml
//! unknown_customer = "Unknown Customer"
//!
//! [bulk_import]
//! min_confidence = 75.0
//! strict = false
//!
//! [find_matches]
//! min_confidence = 70.0
//! max_results = 10
//! ```

use std::path::{Path, PathBuf};

use custid_model::{CustidError, ResolutionOptions};
use serde::Deserialize;
use tracing::{debug, info};

/// Placeholder written for rows without a customer name.
pub const DEFAULT_UNKNOWN_CUSTOMER: &str = "Unknown Customer";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse TOML config {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error(transparent)]
    Invalid(#[from] CustidError),

    #[error("unknown customer placeholder must not be blank")]
    BlankPlaceholder,
}

/// Resolution parameters for bulk imports and interactive lookups.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolverConfig {
    pub bulk_import: ResolutionOptions,
    pub find_matches: ResolutionOptions,
    /// Name written for rows whose customer field is blank. Never added to the
    /// reference set.
    pub unknown_customer: String,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            bulk_import: ResolutionOptions::bulk_import(),
            find_matches: ResolutionOptions::find_matches(),
            unknown_customer: DEFAULT_UNKNOWN_CUSTOMER.to_string(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    unknown_customer: Option<String>,
    #[serde(default)]
    bulk_import: OptionsTable,
    #[serde(default)]
    find_matches: OptionsTable,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct OptionsTable {
    min_confidence: Option<f64>,
    strict: Option<bool>,
    max_results: Option<usize>,
}

impl OptionsTable {
    fn apply(&self, mut options: ResolutionOptions) -> ResolutionOptions {
        if let Some(min_confidence) = self.min_confidence {
            options.min_confidence = min_confidence;
        }
        if let Some(strict) = self.strict {
            options.strict = strict;
        }
        if let Some(max_results) = self.max_results {
            options.max_results = max_results;
        }
        options
    }
}

impl ResolverConfig {
    /// Loads and validates a config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid TOML, or
    /// contains out-of-range values.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::parse(&contents, path)?;
        info!(path = %path.display(), "loaded resolver config");
        Ok(config)
    }

    /// Loads a config file, falling back to defaults when it does not exist.
    ///
    /// # Errors
    ///
    /// Same as [`load`](Self::load), except for a missing file.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!(path = %path.display(), "no resolver config, using defaults");
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Parses config text. `origin` is only used in error messages.
    ///
    /// # Errors
    ///
    /// Returns an error for invalid TOML or out-of-range values.
    pub fn parse(contents: &str, origin: &Path) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(contents).map_err(|source| ConfigError::Toml {
            path: origin.to_path_buf(),
            source,
        })?;
        let defaults = Self::default();
        let config = Self {
            bulk_import: file.bulk_import.apply(defaults.bulk_import),
            find_matches: file.find_matches.apply(defaults.find_matches),
            unknown_customer: file
                .unknown_customer
                .map(|name| name.trim().to_string())
                .unwrap_or(defaults.unknown_customer),
        };
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    ///
    /// Returns an error for out-of-range options or a blank placeholder.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.bulk_import.validate()?;
        self.find_matches.validate()?;
        if self.unknown_customer.trim().is_empty() {
            return Err(ConfigError::BlankPlaceholder);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(contents: &str) -> Result<ResolverConfig, ConfigError> {
        ResolverConfig::parse(contents, Path::new("test.toml"))
    }

    #[test]
    fn empty_file_yields_presets() {
        assert_eq!(parse("").unwrap(), ResolverConfig::default());
    }

    #[test]
    fn partial_tables_keep_their_own_presets() {
        let config = parse(
            r#"
            [bulk_import]
            strict = true

            [find_matches]
            max_results = 3
            "#,
        )
        .unwrap();
        assert!(config.bulk_import.strict);
        assert_eq!(config.bulk_import.min_confidence, 75.0);
        assert_eq!(config.find_matches.min_confidence, 70.0);
        assert_eq!(config.find_matches.max_results, 3);
    }

    #[test]
    fn rejects_out_of_range_values() {
        let err = parse("[bulk_import]\nmin_confidence = 150.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_unknown_keys() {
        let err = parse("min_similarity = 10.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Toml { .. }));
    }

    #[test]
    fn rejects_blank_placeholder() {
        let err = parse("unknown_customer = \"  \"\n").unwrap_err();
        assert!(matches!(err, ConfigError::BlankPlaceholder));
    }
}
