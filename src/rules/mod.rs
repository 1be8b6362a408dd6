//! Password tests
//!
//! Each test is a plain function plus the parameters it is run with. The same
//! function can back several tests, as the character-class tests do.

mod length;
mod repeat;
mod variety;

pub use length::{maximum_length, minimum_length};
pub use repeat::prevent_repeating;
pub use variety::at_least_one_of;

use crate::config::PasswordConfig;
use secrecy::SecretString;
use thiserror::Error;

/// Why a test rejected a password. The `Display` text is what ends up in the report.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RuleFailure {
    #[error("the password must be at least {min} characters long")]
    TooShort { min: usize },
    #[error("the password must be fewer than {max} characters")]
    TooLong { max: usize },
    #[error("the password may not contain sequences of three or more repeated characters")]
    RepeatedCharacters,
    #[error("the password must contain at least one {label}")]
    MissingCharacterClass { label: String },
    /// The test's pattern parameter does not compile.
    #[error("{0}")]
    InvalidPattern(#[from] regex::Error),
    #[error("missing rule parameter at position {index}")]
    MissingParameter { index: usize },
    #[error("{0}")]
    Custom(String),
}

impl RuleFailure {
    /// True when the failure comes from the test's setup rather than the password.
    pub fn is_misconfiguration(&self) -> bool {
        matches!(
            self,
            RuleFailure::InvalidPattern(_) | RuleFailure::MissingParameter { .. }
        )
    }
}

/// Result type for test functions.
/// - `Ok(())` - Test passed
/// - `Err(failure)` - Test failed, `failure` says why
pub type RuleOutcome = Result<(), RuleFailure>;

/// Signature shared by every test function.
pub type TestMethod = fn(&PasswordConfig, &SecretString, &[String]) -> RuleOutcome;

/// A test function bound to its parameters.
#[derive(Debug, Clone)]
pub struct PasswordTest {
    method: TestMethod,
    params: Vec<String>,
}

impl PasswordTest {
    pub fn new(method: TestMethod) -> Self {
        Self {
            method,
            params: Vec::new(),
        }
    }

    pub fn with_params<I, S>(method: TestMethod, params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            method,
            params: params.into_iter().map(Into::into).collect(),
        }
    }

    pub fn params(&self) -> &[String] {
        &self.params
    }

    /// Runs the test against `password`.
    pub fn run(&self, config: &PasswordConfig, password: &SecretString) -> RuleOutcome {
        (self.method)(config, password, &self.params)
    }
}

/// Required and optional tests, in evaluation order.
#[derive(Debug, Clone)]
pub struct TestConfig {
    pub required_tests: Vec<PasswordTest>,
    pub optional_tests: Vec<PasswordTest>,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            required_tests: default_required_tests(),
            optional_tests: default_optional_tests(),
        }
    }
}

/// Tests every password must pass to be considered strong.
pub fn default_required_tests() -> Vec<PasswordTest> {
    vec![
        PasswordTest::new(minimum_length),
        PasswordTest::new(maximum_length),
        PasswordTest::new(prevent_repeating),
    ]
}

/// Tests counted against `min_optional_tests_to_pass`.
///
/// Passphrases skip the count entirely when `allow_passphrases` is set.
pub fn default_optional_tests() -> Vec<PasswordTest> {
    vec![
        PasswordTest::with_params(at_least_one_of, ["[a-z]", "lowercase letter"]),
        PasswordTest::with_params(at_least_one_of, ["[A-Z]", "uppercase letter"]),
        PasswordTest::with_params(at_least_one_of, ["[0-9]", "number"]),
        PasswordTest::with_params(at_least_one_of, ["[^A-Za-z0-9]", "special character"]),
    ]
}

/// Length of the password as the tests see it.
pub(crate) fn char_len(password: &str) -> usize {
    password.chars().count()
}
