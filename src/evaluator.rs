//! Password policy evaluator - runs the tests and decides the verdict.

use secrecy::{ExposeSecret, SecretString};

#[cfg(feature = "async")]
use tokio::sync::mpsc;

#[cfg(feature = "async")]
use tokio_util::sync::CancellationToken;

use crate::config::{ConfigError, PasswordConfig};
use crate::report::TestResult;
use crate::rules::{char_len, PasswordTest, RuleOutcome, TestConfig};

/// A configuration together with the tests it drives.
///
/// Read-only once built, so a single policy can serve any number of
/// concurrent evaluations.
#[derive(Debug, Clone, Default)]
pub struct PasswordPolicy {
    config: PasswordConfig,
    tests: TestConfig,
}

impl PasswordPolicy {
    /// Builds a policy after checking `config` against `tests`.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - A length bound is zero
    /// - `min_length` is greater than `max_length`
    /// - `min_optional_tests_to_pass` exceeds the number of optional tests
    pub fn new(config: PasswordConfig, tests: TestConfig) -> Result<Self, ConfigError> {
        config.validate(tests.optional_tests.len())?;
        Ok(Self { config, tests })
    }

    /// Default tests with the configuration taken from the environment.
    ///
    /// See [`PasswordConfig::from_env`] for the variables read.
    pub fn from_env() -> Result<Self, ConfigError> {
        let tests = TestConfig::default();
        let config = PasswordConfig::from_env(tests.optional_tests.len())?;
        Ok(Self { config, tests })
    }

    pub fn config(&self) -> &PasswordConfig {
        &self.config
    }

    pub fn tests(&self) -> &TestConfig {
        &self.tests
    }

    /// Evaluates `password` and returns the full report.
    pub fn test_password(&self, password: &SecretString) -> TestResult {
        let mut report = run_tests(
            &self.config,
            &self.tests.required_tests,
            &self.tests.optional_tests,
            password,
        );

        // Long enough passwords are exempt from the optional threshold
        report.is_passphrase = self.config.allow_passphrases
            && char_len(password.expose_secret()) >= self.config.min_phrase_length;

        if !report.is_passphrase
            && report.optional_tests_passed < self.config.min_optional_tests_to_pass
        {
            report.strong = false;
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            "Password evaluated: strong={}, passphrase={}, failed={}, optional_passed={}",
            report.strong,
            report.is_passphrase,
            report.failed_tests.len(),
            report.optional_tests_passed
        );

        report
    }
}

/// Evaluates a password against the default policy.
///
/// # Arguments
/// * `password` - The password to evaluate
///
/// # Returns
/// A `TestResult` listing every test outcome and the final verdict.
pub fn evaluate_password(password: &SecretString) -> TestResult {
    PasswordPolicy::default().test_password(password)
}

/// Runs every required test, then every optional test, recording each outcome.
///
/// No test is skipped: a failure never stops the remaining tests from running.
/// Optional test indices are offset by `required.len()`. The passphrase
/// exemption and optional threshold are not applied here.
pub fn run_tests(
    config: &PasswordConfig,
    required: &[PasswordTest],
    optional: &[PasswordTest],
    password: &SecretString,
) -> TestResult {
    let mut report = TestResult::new();

    for (index, test) in required.iter().enumerate() {
        let failure = failure_message(index, test.run(config, password));
        report.record_required(index, failure);
    }

    for (offset, test) in optional.iter().enumerate() {
        let index = required.len() + offset;
        let failure = failure_message(index, test.run(config, password));
        report.record_optional(index, failure);
    }

    report
}

fn failure_message(index: usize, outcome: RuleOutcome) -> Option<String> {
    let failure = outcome.err()?;

    #[cfg(feature = "tracing")]
    {
        if failure.is_misconfiguration() {
            tracing::warn!("Password test {} is misconfigured: {}", index, failure);
        }
    }
    #[cfg(not(feature = "tracing"))]
    let _ = index;

    Some(failure.to_string())
}

/// Async version that sends the report via channel.
///
/// The token is checked once before evaluation; a cancelled request sends
/// nothing. An evaluation that has started always runs to completion.
#[cfg(feature = "async")]
pub async fn evaluate_password_tx(
    policy: &PasswordPolicy,
    password: &SecretString,
    token: CancellationToken,
    tx: mpsc::Sender<TestResult>,
) {
    if token.is_cancelled() {
        #[cfg(feature = "tracing")]
        tracing::info!("Password evaluation cancelled before start");
        return;
    }

    #[cfg(feature = "tracing")]
    tracing::info!("evaluation is about to start...");

    let report = policy.test_password(password);

    if let Err(e) = tx.send(report).await {
        #[cfg(feature = "tracing")]
        tracing::error!("Failed to send password report: {}", e);
        #[cfg(not(feature = "tracing"))]
        let _ = e;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{at_least_one_of, default_required_tests, RuleFailure};

    fn secret(s: &str) -> SecretString {
        SecretString::new(s.to_string().into())
    }

    fn always_fails(_: &PasswordConfig, _: &SecretString, _: &[String]) -> RuleOutcome {
        Err(RuleFailure::Custom("always fails".to_string()))
    }

    #[test]
    fn test_short_password_fails_minimum_length() {
        let report = evaluate_password(&secret("Ab1!xyz"));
        assert!(!report.strong);
        assert_eq!(report.failed_tests.first(), Some(&0));
        assert_eq!(
            report.required_test_errors,
            vec!["the password must be at least 10 characters long".to_string()]
        );
    }

    #[test]
    fn test_long_password_fails_maximum_length() {
        let pwd = "Ab1!".repeat(33);
        let report = evaluate_password(&secret(&pwd));
        assert!(!report.strong);
        assert!(report.failed_tests.contains(&1));
        assert!(report.is_passphrase);
    }

    #[test]
    fn test_repeated_characters_fail() {
        let report = evaluate_password(&secret("aaa1234567"));
        assert!(report.failed_tests.contains(&2));
        assert!(!report.strong);

        let report = evaluate_password(&secret("aa1234567B"));
        assert!(report.passed_tests.contains(&2));
    }

    #[test]
    fn test_passphrase_skips_optional_threshold() {
        let report = evaluate_password(&secret("correcthorsebatteryx"));
        assert!(report.is_passphrase);
        assert!(report.strong);
        assert_eq!(report.optional_tests_passed, 1);
        assert_eq!(report.failed_tests, vec![4, 5, 6]);
        assert_eq!(report.optional_test_errors.len(), 3);
    }

    #[test]
    fn test_passphrase_disabled() {
        let policy = PasswordPolicy::new(
            PasswordConfig {
                allow_passphrases: false,
                ..PasswordConfig::default()
            },
            TestConfig::default(),
        )
        .expect("valid policy");

        let report = policy.test_password(&secret("correcthorsebatteryx"));
        assert!(!report.is_passphrase);
        assert!(!report.strong);
    }

    #[test]
    fn test_passphrase_does_not_exempt_required_tests() {
        let report = evaluate_password(&secret("correcthorsebbbattery"));
        assert!(report.is_passphrase);
        assert!(!report.strong);
        assert_eq!(report.required_test_errors.len(), 1);
    }

    #[test]
    fn test_optional_threshold_not_met() {
        let report = evaluate_password(&secret("NoSymbol1234"));
        assert_eq!(report.optional_tests_passed, 3);
        assert!(!report.is_passphrase);
        assert!(!report.strong);
        assert_eq!(
            report.optional_test_errors,
            vec!["the password must contain at least one special character".to_string()]
        );
    }

    #[test]
    fn test_optional_threshold_is_a_count() {
        let policy = PasswordPolicy::new(
            PasswordConfig {
                min_optional_tests_to_pass: 3,
                ..PasswordConfig::default()
            },
            TestConfig::default(),
        )
        .expect("valid policy");

        let report = policy.test_password(&secret("NoSymbol1234"));
        assert!(report.strong);
        assert_eq!(report.failed_tests, vec![6]);
    }

    #[test]
    fn test_strong_mixed_password() {
        let report = evaluate_password(&secret("Tr0ub4dor&3"));
        assert_eq!(report.optional_tests_passed, 4);
        assert!(!report.is_passphrase);
        assert!(report.strong);
        assert!(report.errors.is_empty());
        assert_eq!(report.passed_tests, (0..7).collect::<Vec<_>>());
    }

    #[test]
    fn test_all_failures_are_reported() {
        let report = evaluate_password(&secret("aaa"));
        assert_eq!(report.failed_tests, vec![0, 2, 4, 5, 6]);
        assert_eq!(report.passed_tests, vec![1, 3]);
        assert_eq!(report.required_test_errors.len(), 2);
        assert_eq!(report.optional_test_errors.len(), 3);
        assert_eq!(
            report.errors,
            report
                .required_test_errors
                .iter()
                .chain(report.optional_test_errors.iter())
                .cloned()
                .collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_every_test_reported_once_in_its_range() {
        let tests = TestConfig::default();
        let required = tests.required_tests.len();
        let total = required + tests.optional_tests.len();

        for pwd in ["", "abc", "aaa1234567", "Tr0ub4dor&3", "correcthorsebatteryx"] {
            let report = evaluate_password(&secret(pwd));
            let mut seen: Vec<usize> = report
                .failed_tests
                .iter()
                .chain(report.passed_tests.iter())
                .copied()
                .collect();
            seen.sort_unstable();
            assert_eq!(seen, (0..total).collect::<Vec<_>>(), "password {:?}", pwd);
            assert_eq!(
                report.required_test_errors.len(),
                report.failed_tests.iter().filter(|&&i| i < required).count()
            );
        }
    }

    #[test]
    fn test_evaluation_is_repeatable() {
        let policy = PasswordPolicy::default();
        let pwd = secret("NoSymbol1234");
        assert_eq!(policy.test_password(&pwd), policy.test_password(&pwd));
    }

    #[test]
    fn test_broken_pattern_is_reported_as_failure() {
        let tests = TestConfig {
            required_tests: default_required_tests(),
            optional_tests: vec![PasswordTest::with_params(
                at_least_one_of,
                ["[0-9", "number"],
            )],
        };
        let policy = PasswordPolicy::new(
            PasswordConfig {
                min_optional_tests_to_pass: 1,
                ..PasswordConfig::default()
            },
            tests,
        )
        .expect("valid policy");

        let report = policy.test_password(&secret("Tr0ub4dor&3"));
        assert!(!report.strong);
        assert_eq!(report.failed_tests, vec![3]);
        assert!(!report.optional_test_errors[0].contains("must contain"));
    }

    #[test]
    fn test_run_tests_leaves_verdict_to_policy() {
        let config = PasswordConfig::default();
        let optional = vec![PasswordTest::new(always_fails)];
        let report = run_tests(&config, &[], &optional, &secret("x"));

        assert!(report.strong);
        assert!(!report.is_passphrase);
        assert_eq!(report.failed_tests, vec![0]);
        assert_eq!(report.errors, vec!["always fails".to_string()]);
    }

    #[test]
    fn test_custom_required_test() {
        let mut tests = TestConfig::default();
        tests.required_tests.push(PasswordTest::new(always_fails));
        let policy = PasswordPolicy::new(PasswordConfig::default(), tests).expect("valid policy");

        let report = policy.test_password(&secret("Tr0ub4dor&3"));
        assert!(!report.strong);
        assert_eq!(report.failed_tests, vec![3]);
        // Optional indices shift with the larger required tier
        assert_eq!(report.passed_tests, vec![0, 1, 2, 4, 5, 6, 7]);
    }

    #[test]
    fn test_new_rejects_inconsistent_config() {
        let result = PasswordPolicy::new(
            PasswordConfig {
                min_optional_tests_to_pass: 5,
                ..PasswordConfig::default()
            },
            TestConfig::default(),
        );
        assert!(matches!(result, Err(ConfigError::OptionalThreshold { .. })));
    }

    #[test]
    fn test_policy_shared_across_threads() {
        let policy = PasswordPolicy::default();
        std::thread::scope(|s| {
            let handles: Vec<_> = ["Tr0ub4dor&3", "NoSymbol1234"]
                .into_iter()
                .map(|pwd| {
                    let policy = &policy;
                    s.spawn(move || policy.test_password(&secret(pwd)).strong)
                })
                .collect();
            let verdicts: Vec<bool> = handles
                .into_iter()
                .map(|h| h.join().expect("thread panicked"))
                .collect();
            assert_eq!(verdicts, vec![true, false]);
        });
    }
}
