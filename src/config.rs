//! Run configuration for certdays.
//!
//! Command-line arguments are parsed once into an immutable [`Config`] that is
//! handed by value to the checker. No configuration file is read.

use std::fmt;

/// Usage text printed when no site is given.
pub const MISSING_SITE: &str = "You have to provide site URL to check.";

/// Validated settings for a single run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Hostname to check, without scheme or port
    pub site: String,
}

impl Config {
    /// Builds a configuration from the `--site` argument.
    ///
    /// Surrounding whitespace is trimmed. An absent or blank site is a usage
    /// error and is rejected before any network activity.
    ///
    /// # Example
    ///
    /// ```
    /// # use certdays::config::Config;
    /// let config = Config::from_cli_args(Some("example.com".to_string()))?;
    /// assert_eq!(config.site, "example.com");
    /// # Ok::<(), certdays::config::ConfigError>(())
    /// ```
    pub fn from_cli_args(site: Option<String>) -> Result<Self, ConfigError> {
        let site = site.unwrap_or_default().trim().to_string();
        if site.is_empty() {
            return Err(ConfigError::Validation {
                field: "site".to_string(),
                reason: MISSING_SITE.to_string(),
            });
        }
        Ok(Config { site })
    }
}

/// Errors raised while building a [`Config`].
#[derive(Debug)]
pub enum ConfigError {
    /// A required value was missing or invalid
    Validation {
        /// Offending argument
        field: String,
        /// Message for the operator
        reason: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Validation { reason, .. } => write!(f, "{}", reason),
        }
    }
}

impl std::error::Error for ConfigError {}
