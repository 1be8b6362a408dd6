//! Length tests - enforce the configured minimum and maximum length.

use secrecy::{ExposeSecret, SecretString};
use super::{char_len, RuleFailure, RuleOutcome};
use crate::config::PasswordConfig;

/// Fails when the password is shorter than `min_length`.
pub fn minimum_length(config: &PasswordConfig, password: &SecretString, _params: &[String]) -> RuleOutcome {
    if char_len(password.expose_secret()) < config.min_length {
        return Err(RuleFailure::TooShort {
            min: config.min_length,
        });
    }
    Ok(())
}

/// Fails when the password is longer than `max_length`.
pub fn maximum_length(config: &PasswordConfig, password: &SecretString, _params: &[String]) -> RuleOutcome {
    if char_len(password.expose_secret()) > config.max_length {
        return Err(RuleFailure::TooLong {
            max: config.max_length,
        });
    }
    Ok(())
}
