//! Test modules for triez.
//!
//! Unit tests live next to the code they cover. This module holds the tests
//! that cut across components:
//! - Configuration loading and validation
//! - Error types and error reporting
//! - Property-based tests of the trie against simple reference models
//! - Shared fixtures and proptest strategies

pub mod config_tests;

/// Run a property over values drawn from `$strategy`.
///
/// `$test_fn` takes one generated value and returns
/// `Result<(), proptest::test_runner::TestCaseError>`.
#[macro_export]
macro_rules! run_proptest {
    ($strategy:expr, $test_fn:expr) => {
        proptest::proptest!(
            proptest::test_runner::Config::with_cases(100),
            |(value in $strategy)| {
                $test_fn(value)?;
            }
        );
    };
}
