pub(crate) mod console;
mod log;

pub use self::{console::ConsoleReporter, log::LogReporter};

use crate::{
    exit_status::ExitStatus,
    recorder::{CheckResult, RunSummary},
    test::{Location, TestCase, TestDesc},
};

/// The outcome of a test case.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Every check of the test case passed.
    Passed,

    /// At least one check of the test case failed, or the test case
    /// panicked or returned an error.
    Failed,

    /// The test case was skipped.
    Skipped {
        /// Where the test case was skipped.
        location: Location,
        /// Why the test case was skipped.
        reason: String,
    },
}

/// The result of running a single test case.
#[derive(Debug)]
pub struct TestCaseSummary {
    pub(crate) desc: &'static TestDesc,
    pub(crate) outcome: Outcome,
    pub(crate) checks: usize,
    pub(crate) failures: Vec<CheckResult>,
}

impl TestCaseSummary {
    /// Return the metadata of the test case.
    #[inline]
    pub fn desc(&self) -> &'static TestDesc {
        self.desc
    }

    /// Return the outcome of the test case.
    #[inline]
    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    /// Return the number of checks made by the test case.
    #[inline]
    pub fn checks(&self) -> usize {
        self.checks
    }

    /// Return the failed checks of the test case, in order.
    #[inline]
    pub fn failures(&self) -> &[CheckResult] {
        &self.failures[..]
    }
}

/// A report on a complete test run.
#[derive(Debug, Default)]
pub struct Report {
    pub(crate) passed: Vec<TestCaseSummary>,
    pub(crate) failed: Vec<TestCaseSummary>,
    pub(crate) skipped: Vec<TestCaseSummary>,
    pub(crate) summary: RunSummary,
}

impl Report {
    pub(crate) fn append(&mut self, result: TestCaseSummary) {
        match result.outcome {
            Outcome::Passed => self.passed.push(result),
            Outcome::Failed => self.failed.push(result),
            Outcome::Skipped { .. } => self.skipped.push(result),
        }
    }

    /// Return the test cases that passed.
    #[inline]
    pub fn passed(&self) -> &[TestCaseSummary] {
        &self.passed[..]
    }

    /// Return the test cases that failed.
    #[inline]
    pub fn failed(&self) -> &[TestCaseSummary] {
        &self.failed[..]
    }

    /// Return the test cases that were skipped.
    #[inline]
    pub fn skipped(&self) -> &[TestCaseSummary] {
        &self.skipped[..]
    }

    /// Return the check counters of the run.
    #[inline]
    pub fn summary(&self) -> RunSummary {
        self.summary
    }

    /// Return the number of test cases that ran to a verdict,
    /// i.e. excluding skipped ones.
    #[inline]
    pub fn tests_run(&self) -> usize {
        self.passed.len() + self.failed.len()
    }

    /// Return whether no check failed during the run.
    #[inline]
    pub fn is_passed(&self) -> bool {
        self.summary.is_passed()
    }

    /// Return the `N / M tests passed` line of the report.
    pub fn tally_line(&self) -> String {
        format!("{} / {} tests passed", self.passed.len(), self.tests_run())
    }

    /// Return an exit status used as a result of the test process.
    pub fn status(&self) -> ExitStatus {
        if self.is_passed() {
            ExitStatus::OK
        } else {
            ExitStatus::FAILED
        }
    }
}

/// Observer of the progress of a test run.
pub trait Reporter {
    /// Called once before the first test case runs.
    fn test_run_starting(&self, tests: &[&'static TestCase]);

    /// Called once after the last test case has completed.
    fn test_run_ended(&self, report: &Report);

    /// Called before a test case runs.
    fn test_case_starting(&self, desc: &TestDesc);

    /// Called after a test case has completed.
    fn test_case_ended(&self, summary: &TestCaseSummary);
}

macro_rules! impl_reporter_body {
    () => {
        fn test_run_starting(&self, tests: &[&'static TestCase]) {
            (**self).test_run_starting(tests)
        }

        fn test_run_ended(&self, report: &Report) {
            (**self).test_run_ended(report)
        }

        fn test_case_starting(&self, desc: &TestDesc) {
            (**self).test_case_starting(desc)
        }

        fn test_case_ended(&self, summary: &TestCaseSummary) {
            (**self).test_case_ended(summary)
        }
    };
}

impl<R: ?Sized> Reporter for &R
where
    R: Reporter,
{
    impl_reporter_body!();
}

impl<R: ?Sized> Reporter for Box<R>
where
    R: Reporter,
{
    impl_reporter_body!();
}

impl<R: ?Sized> Reporter for std::rc::Rc<R>
where
    R: Reporter,
{
    impl_reporter_body!();
}

impl<R: ?Sized> Reporter for std::sync::Arc<R>
where
    R: Reporter,
{
    impl_reporter_body!();
}
