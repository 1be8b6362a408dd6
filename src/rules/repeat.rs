//! Repetition test - rejects runs of three or more identical characters.

use secrecy::{ExposeSecret, SecretString};
use super::{RuleFailure, RuleOutcome};
use crate::config::PasswordConfig;

const MAX_RUN: usize = 2;

/// Fails when any character repeats three or more times in a row.
pub fn prevent_repeating(_config: &PasswordConfig, password: &SecretString, _params: &[String]) -> RuleOutcome {
    let mut chars = password.expose_secret().chars();
    let Some(mut prev) = chars.next() else {
        return Ok(());
    };

    let mut longest = 1;
    let mut current = 1;
    for c in chars {
        if c == prev {
            current += 1;
            if current > MAX_RUN {
                return Err(RuleFailure::RepeatedCharacters);
            }
        } else {
            longest = longest.max(current);
            current = 1;
        }
        prev = c;
    }

    if longest.max(current) > MAX_RUN {
        return Err(RuleFailure::RepeatedCharacters);
    }
    Ok(())
}
