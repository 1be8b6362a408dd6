//! Policy configuration.
//!
//! Length bounds, passphrase policy and the optional-test threshold.

use std::str::FromStr;
use thiserror::Error;

pub const ENV_ALLOW_PASSPHRASES: &str = "PWD_POLICY_ALLOW_PASSPHRASES";
pub const ENV_MAX_LENGTH: &str = "PWD_POLICY_MAX_LENGTH";
pub const ENV_MIN_LENGTH: &str = "PWD_POLICY_MIN_LENGTH";
pub const ENV_MIN_PHRASE_LENGTH: &str = "PWD_POLICY_MIN_PHRASE_LENGTH";
pub const ENV_MIN_OPTIONAL_TESTS: &str = "PWD_POLICY_MIN_OPTIONAL_TESTS";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{field} must be at least 1")]
    ZeroLength { field: &'static str },
    #[error("min_length ({min}) is greater than max_length ({max})")]
    LengthBounds { min: usize, max: usize },
    #[error("min_optional_tests_to_pass ({required}) exceeds the number of optional tests ({available})")]
    OptionalThreshold { required: usize, available: usize },
    #[error("Invalid value for {var}: {value:?}")]
    InvalidEnv { var: &'static str, value: String },
}

/// Settings consulted by the rules and by the final verdict.
///
/// Lengths are counted in `char`s, not bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct PasswordConfig {
    /// Passwords at least `min_phrase_length` long skip the optional threshold.
    pub allow_passphrases: bool,
    pub max_length: usize,
    pub min_length: usize,
    pub min_phrase_length: usize,
    pub min_optional_tests_to_pass: usize,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            allow_passphrases: true,
            max_length: 128,
            min_length: 10,
            min_phrase_length: 20,
            min_optional_tests_to_pass: 4,
        }
    }
}

impl PasswordConfig {
    /// Builds a configuration from the defaults, overridden by environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `PWD_POLICY_ALLOW_PASSPHRASES` (`true`/`false`)
    /// - `PWD_POLICY_MAX_LENGTH`
    /// - `PWD_POLICY_MIN_LENGTH`
    /// - `PWD_POLICY_MIN_PHRASE_LENGTH`
    /// - `PWD_POLICY_MIN_OPTIONAL_TESTS`
    ///
    /// Unset variables keep their default value.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - A variable is set but cannot be parsed
    /// - The resulting configuration fails [`validate`](Self::validate)
    ///   against `optional_tests` optional tests
    pub fn from_env(optional_tests: usize) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(v) = env_override(ENV_ALLOW_PASSPHRASES)? {
            config.allow_passphrases = v;
        }
        if let Some(v) = env_override(ENV_MAX_LENGTH)? {
            config.max_length = v;
        }
        if let Some(v) = env_override(ENV_MIN_LENGTH)? {
            config.min_length = v;
        }
        if let Some(v) = env_override(ENV_MIN_PHRASE_LENGTH)? {
            config.min_phrase_length = v;
        }
        if let Some(v) = env_override(ENV_MIN_OPTIONAL_TESTS)? {
            config.min_optional_tests_to_pass = v;
        }

        config.validate(optional_tests)?;

        #[cfg(feature = "tracing")]
        tracing::info!("Password policy configuration loaded: {:?}", config);

        Ok(config)
    }

    /// Checks the invariants the evaluator assumes but does not enforce.
    ///
    /// `optional_tests` is the number of optional tests the configuration will
    /// be used with.
    pub fn validate(&self, optional_tests: usize) -> Result<(), ConfigError> {
        if self.min_length == 0 {
            return Err(ConfigError::ZeroLength { field: "min_length" });
        }
        if self.max_length == 0 {
            return Err(ConfigError::ZeroLength { field: "max_length" });
        }
        if self.min_length > self.max_length {
            return Err(ConfigError::LengthBounds {
                min: self.min_length,
                max: self.max_length,
            });
        }
        if self.min_optional_tests_to_pass > optional_tests {
            return Err(ConfigError::OptionalThreshold {
                required: self.min_optional_tests_to_pass,
                available: optional_tests,
            });
        }
        Ok(())
    }
}

fn env_override<T: FromStr>(var: &'static str) -> Result<Option<T>, ConfigError> {
    match std::env::var(var) {
        Ok(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidEnv { var, value }),
        Err(_) => Ok(None),
    }
}
