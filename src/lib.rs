//! Password strength policy library
//!
//! Evaluates a password against required tests, which must all pass, and
//! optional tests, of which a configurable number must pass. Long enough
//! passwords can be treated as passphrases and skip the optional count.
//!
//! # Features
//!
//! - `async` (default): Enables channel-based evaluation with cancellation support
//! - `tracing`: Enables logging via tracing crate
//! - `serde`: Serializes reports and (de)serializes configuration
//!
//! # Environment Variables
//!
//! Read by [`PasswordPolicy::from_env`]:
//!
//! - `PWD_POLICY_ALLOW_PASSPHRASES`
//! - `PWD_POLICY_MAX_LENGTH`
//! - `PWD_POLICY_MIN_LENGTH`
//! - `PWD_POLICY_MIN_PHRASE_LENGTH`
//! - `PWD_POLICY_MIN_OPTIONAL_TESTS`
//!
//! # Example
//!
//! ```rust
//! use pwd_policy::{evaluate_password, PasswordConfig, PasswordPolicy, TestConfig};
//! use secrecy::SecretString;
//!
//! let password = SecretString::new("Tr0ub4dor&3".to_string().into());
//!
//! // Default policy
//! let report = evaluate_password(&password);
//! assert!(report.strong);
//!
//! // Custom configuration
//! let config = PasswordConfig {
//!     min_length: 12,
//!     ..PasswordConfig::default()
//! };
//! let policy = PasswordPolicy::new(config, TestConfig::default()).expect("valid policy");
//! let report = policy.test_password(&password);
//! assert!(!report.strong);
//! println!("Errors: {:?}", report.errors);
//! ```

mod config;
mod evaluator;
mod report;
pub mod rules;

// Public API
pub use config::{ConfigError, PasswordConfig};
pub use evaluator::{evaluate_password, run_tests, PasswordPolicy};
pub use report::TestResult;
pub use rules::{PasswordTest, RuleFailure, RuleOutcome, TestConfig, TestMethod};

#[cfg(feature = "async")]
pub use evaluator::evaluate_password_tx;
