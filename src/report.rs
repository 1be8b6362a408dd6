//! Evaluation report returned for every password.

/// Outcome of one password evaluation.
///
/// Test indices are tier-qualified: required tests occupy `0..R`, optional
/// tests `R..R+O`, where `R` and `O` are the sizes of the two tiers.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct TestResult {
    /// Every failure message, required tier first.
    pub errors: Vec<String>,
    pub failed_tests: Vec<usize>,
    pub passed_tests: Vec<usize>,
    pub required_test_errors: Vec<String>,
    pub optional_test_errors: Vec<String>,
    pub is_passphrase: bool,
    pub strong: bool,
    pub optional_tests_passed: usize,
}

impl TestResult {
    /// Empty report. `strong` starts out true and is cleared by failures.
    pub fn new() -> Self {
        Self {
            errors: Vec::new(),
            failed_tests: Vec::new(),
            passed_tests: Vec::new(),
            required_test_errors: Vec::new(),
            optional_test_errors: Vec::new(),
            is_passphrase: false,
            strong: true,
            optional_tests_passed: 0,
        }
    }

    pub fn is_strong(&self) -> bool {
        self.strong
    }

    pub(crate) fn record_required(&mut self, index: usize, message: Option<String>) {
        match message {
            Some(message) => {
                self.strong = false;
                self.errors.push(message.clone());
                self.required_test_errors.push(message);
                self.failed_tests.push(index);
            }
            None => self.passed_tests.push(index),
        }
    }

    pub(crate) fn record_optional(&mut self, index: usize, message: Option<String>) {
        match message {
            Some(message) => {
                self.errors.push(message.clone());
                self.optional_test_errors.push(message);
                self.failed_tests.push(index);
            }
            None => {
                self.optional_tests_passed += 1;
                self.passed_tests.push(index);
            }
        }
    }
}

impl Default for TestResult {
    fn default() -> Self {
        Self::new()
    }
}
