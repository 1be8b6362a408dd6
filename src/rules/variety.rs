//! Character class test - requires at least one character matching a pattern.

use regex::Regex;
use secrecy::{ExposeSecret, SecretString};
use super::{RuleFailure, RuleOutcome};
use crate::config::PasswordConfig;

/// Checks that the password contains at least one match of a pattern.
///
/// # Parameters
/// * `params[0]` - regular expression, usually a character class
/// * `params[1]` - label used in the failure message
///
/// # Returns
/// - `Err(MissingParameter)` if either parameter is absent
/// - `Err(InvalidPattern)` if the pattern does not compile
/// - `Err(MissingCharacterClass)` if nothing in the password matches
/// - `Ok(())` otherwise
pub fn at_least_one_of(_config: &PasswordConfig, password: &SecretString, params: &[String]) -> RuleOutcome {
    let pattern = params
        .first()
        .ok_or(RuleFailure::MissingParameter { index: 0 })?;
    let label = params
        .get(1)
        .ok_or(RuleFailure::MissingParameter { index: 1 })?;

    let regex = Regex::new(pattern)?;
    if !regex.is_match(password.expose_secret()) {
        return Err(RuleFailure::MissingCharacterClass {
            label: label.clone(),
        });
    }
    Ok(())
}
