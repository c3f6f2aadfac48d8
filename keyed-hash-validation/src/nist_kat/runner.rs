#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::unwrap_used)]
#![deny(clippy::panic)]
#![allow(clippy::arithmetic_side_effects)]
#![allow(clippy::print_stdout)]

//! KAT Test Runner
//!
//! Runs test closures, times them and collects the outcome into a
//! [`KatSummary`] that can be printed or inspected.

use super::{KatTestResult, NistKatError};
use std::collections::BTreeMap;
use std::time::Instant;
use tracing::{debug, warn};

/// Summary of KAT test execution
#[derive(Debug, Clone, Default)]
pub struct KatSummary {
    /// Total number of tests run
    pub total: usize,
    /// Number of tests passed
    pub passed: usize,
    /// Number of tests failed
    pub failed: usize,
    /// Individual test results
    pub results: Vec<KatTestResult>,
    /// Total execution time in microseconds
    pub total_time_us: u128,
}

impl KatSummary {
    /// Create a new empty summary
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a test result
    pub fn add_result(&mut self, result: KatTestResult) {
        self.total += 1;
        if result.passed {
            self.passed += 1;
        } else {
            self.failed += 1;
        }
        self.total_time_us += result.execution_time_us;
        self.results.push(result);
    }

    /// Check if all tests passed
    ///
    /// An empty summary counts as passing; callers that require coverage
    /// should also check `total`.
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }

    /// Get pass rate as percentage
    #[must_use]
    #[allow(clippy::cast_precision_loss)] // Precision loss acceptable for percentage display
    pub fn pass_rate(&self) -> f64 {
        if self.total == 0 { 0.0 } else { (self.passed as f64 / self.total as f64) * 100.0 }
    }

    /// Results that did not pass
    pub fn failures(&self) -> impl Iterator<Item = &KatTestResult> {
        self.results.iter().filter(|result| !result.passed)
    }

    /// `(passed, total)` per algorithm, sorted by algorithm name
    #[must_use]
    pub fn by_algorithm(&self) -> BTreeMap<&str, (usize, usize)> {
        let mut counts: BTreeMap<&str, (usize, usize)> = BTreeMap::new();
        for result in &self.results {
            let entry = counts.entry(result.algorithm.as_str()).or_default();
            if result.passed {
                entry.0 += 1;
            }
            entry.1 += 1;
        }
        counts
    }

    /// Print summary to stdout
    pub fn print(&self) {
        println!("\n========================================");
        println!("HMAC KAT Summary");
        println!("========================================");
        println!("Total Tests:  {}", self.total);
        println!("Passed:       {} ({:.1}%)", self.passed, self.pass_rate());
        println!("Failed:       {}", self.failed);
        println!("Total Time:   {} ms", self.total_time_us / 1000);

        if !self.results.is_empty() {
            println!("\nPer-Algorithm Breakdown:");
            println!("----------------------------------------");
            for (algorithm, (passed, total)) in self.by_algorithm() {
                println!("  {:<20} {}/{} passed", algorithm, passed, total);
            }
        }

        if self.failed > 0 {
            println!("\nFailed Tests:");
            println!("----------------------------------------");
            for result in self.failures() {
                println!("  {} - {}", result.algorithm, result.test_case);
                if let Some(ref err) = result.error_message {
                    println!("    Error: {}", err);
                }
            }
        }

        println!("========================================\n");
    }
}

/// KAT test runner
#[derive(Debug, Default)]
pub struct KatRunner {
    summary: KatSummary,
}

impl KatRunner {
    /// Create a new runner
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Run a test and record the result
    pub fn run_test<F>(&mut self, test_case: &str, algorithm: &str, test_fn: F)
    where
        F: FnOnce() -> Result<(), NistKatError>,
    {
        let start = Instant::now();
        let result = test_fn();
        let elapsed = start.elapsed().as_micros();

        let test_result = match result {
            Ok(()) => {
                debug!(algorithm, test_case, elapsed_us = elapsed, "KAT passed");
                KatTestResult::passed(test_case.to_string(), algorithm.to_string(), elapsed)
            }
            Err(e) => {
                warn!(algorithm, test_case, error = %e, "KAT failed");
                KatTestResult::failed(test_case.to_string(), algorithm.to_string(), e.to_string(), elapsed)
            }
        };

        self.summary.add_result(test_result);
    }

    /// Record a result produced elsewhere
    pub fn record(&mut self, result: KatTestResult) {
        self.summary.add_result(result);
    }

    /// Get the summary
    #[must_use]
    pub fn summary(&self) -> &KatSummary {
        &self.summary
    }

    /// Consume the runner and return the summary
    #[must_use]
    pub fn finish(self) -> KatSummary {
        self.summary
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Tests use unwrap for simplicity
mod tests {
    use super::*;

    #[test]
    fn test_runner_counts() {
        let mut runner = KatRunner::new();
        runner.run_test("ok-1", "HMAC-SHA1", || Ok(()));
        runner.run_test("ok-2", "HMAC-SHA256", || Ok(()));
        runner.run_test("bad", "HMAC-SHA1", || Err(NistKatError::ImplementationError("boom".to_string())));

        let summary = runner.finish();
        assert_eq!((summary.total, summary.passed, summary.failed), (3, 2, 1));
        assert!(!summary.all_passed());
        assert!((summary.pass_rate() - 200.0 / 3.0).abs() < 1e-9);

        let failures: Vec<_> = summary.failures().map(|r| r.test_case.as_str()).collect();
        assert_eq!(failures, ["bad"]);
        assert!(summary.results[2].error_message.as_deref().unwrap().contains("boom"));
    }

    #[test]
    fn test_by_algorithm_is_sorted() {
        let mut runner = KatRunner::new();
        runner.run_test("a", "HMAC-SHA256", || Ok(()));
        runner.run_test("b", "HMAC-SHA1", || Ok(()));
        runner.run_test("c", "HMAC-SHA1", || Err(NistKatError::HexError("odd".to_string())));

        let counts: Vec<_> = runner.summary().by_algorithm().into_iter().collect();
        assert_eq!(counts, vec![("HMAC-SHA1", (1, 2)), ("HMAC-SHA256", (1, 1))]);
    }

    #[test]
    fn test_empty_summary() {
        let summary = KatSummary::new();
        assert!(summary.all_passed());
        assert_eq!(summary.pass_rate(), 0.0);
    }

    #[test]
    fn test_record_external_result() {
        let mut runner = KatRunner::new();
        runner.record(KatTestResult::failed("x".to_string(), "HMAC-SHA1".to_string(), "e".to_string(), 5));
        assert_eq!(runner.summary().failed, 1);
        assert_eq!(runner.summary().total_time_us, 5);
    }
}
