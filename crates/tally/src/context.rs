use crate::{
    recorder::Recorder,
    report::{Outcome, TestCaseSummary},
    termination::Termination,
    test::{Location, TestDesc},
};
use maybe_unwind::Unwind;
use std::fmt;

#[derive(Debug)]
enum ExitReason {
    Skipped { location: Location, reason: String },
    Aborted,
}

/// Context values while running the test case.
///
/// Every check made through the context is forwarded to the recorder
/// of the current run and counted against the running test case.
pub struct Context<'a> {
    desc: &'static TestDesc,
    recorder: &'a mut Recorder,
    checks: usize,
    failures: usize,
    log_start: usize,
    exit_reason: Option<ExitReason>,
}

impl fmt::Debug for Context<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("desc", &self.desc)
            .field("checks", &self.checks)
            .field("failures", &self.failures)
            .finish()
    }
}

impl<'a> Context<'a> {
    pub(crate) fn new(desc: &'static TestDesc, recorder: &'a mut Recorder) -> Self {
        let log_start = recorder.log().len();
        Self {
            desc,
            recorder,
            checks: 0,
            failures: 0,
            log_start,
            exit_reason: None,
        }
    }

    /// Return the metadata of the running test case.
    #[inline]
    pub fn desc(&self) -> &'static TestDesc {
        self.desc
    }

    /// Return the number of checks made by the running test case so far.
    #[inline]
    pub fn checks(&self) -> usize {
        self.checks
    }

    /// Return the number of failed checks of the running test case so far.
    #[inline]
    pub fn failures(&self) -> usize {
        self.failures
    }

    pub(crate) fn record(
        &mut self,
        passed: bool,
        description: String,
        location: Option<Location>,
    ) -> bool {
        self.checks += 1;
        if passed {
            self.recorder.record_pass(description, location);
        } else {
            self.failures += 1;
            self.recorder.record_failure(description, location);
        }
        passed
    }

    pub(crate) fn finish(mut self, result: Result<anyhow::Result<()>, Unwind>) -> TestCaseSummary {
        match result {
            Ok(Ok(())) => (),
            Ok(Err(err)) => {
                self.record(false, format!("test returned an error: {:#}", err), None);
            }
            Err(unwind) => {
                let description = match unwind.location() {
                    Some(location) => format!("unexpected panic at {}: {}", location, unwind),
                    None => format!("unexpected panic: {}", unwind),
                };
                self.record(false, description, None);
            }
        }

        let outcome = match self.exit_reason.take() {
            _ if self.failures > 0 => Outcome::Failed,
            Some(ExitReason::Skipped { location, reason }) => {
                Outcome::Skipped { location, reason }
            }
            Some(ExitReason::Aborted) | None => Outcome::Passed,
        };

        TestCaseSummary {
            desc: self.desc,
            outcome,
            checks: self.checks,
            failures: self.recorder.log()[self.log_start..]
                .iter()
                .filter(|result| !result.passed)
                .cloned()
                .collect(),
        }
    }
}

hidden_item! {
    impl Context<'_> {
        #[inline(never)]
        pub fn skip<T>(&mut self, location: Location, reason: fmt::Arguments<'_>) -> T
        where
            T: Termination,
        {
            debug_assert!(self.exit_reason.is_none());
            self.exit_reason.replace(ExitReason::Skipped {
                location,
                reason: reason.to_string(),
            });
            T::exit()
        }

        #[inline(never)]
        pub fn fail<T>(&mut self, location: Location, reason: fmt::Arguments<'_>) -> T
        where
            T: Termination,
        {
            debug_assert!(self.exit_reason.is_none());
            self.record(false, format!("test aborted: {}", reason), Some(location));
            self.exit_reason.replace(ExitReason::Aborted);
            T::exit()
        }

        #[inline(never)]
        pub fn fixture_failed<T, E>(&mut self, location: Location, what: &str, err: E) -> T
        where
            T: Termination,
            E: fmt::Display,
        {
            debug_assert!(self.exit_reason.is_none());
            self.record(
                false,
                format!("fixture error: could not set up `{}`: {}", what, err),
                Some(location),
            );
            self.exit_reason.replace(ExitReason::Aborted);
            T::exit()
        }
    }
}
