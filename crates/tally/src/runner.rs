use crate::{
    config::Config,
    context::Context,
    crash::{self, Isolation, Reexec},
    exit_status::ExitStatus,
    recorder::Recorder,
    report::{ConsoleReporter, Report, Reporter, TestCaseSummary},
    stub,
    test::{TestCase, TestFn, TestKind},
};
use maybe_unwind::maybe_unwind;
use std::{
    collections::HashSet,
    fmt,
    panic::{self, AssertUnwindSafe},
    sync::Once,
};

/// The state of a test run.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RunState {
    /// No test case has been run yet.
    NotStarted,
    /// The test cases are being run.
    Running,
    /// Every registered test case has been run.
    Completed,
}

/// Runs registered test cases one at a time, in order.
///
/// A failed check, an error or a panic in one test case never prevents
/// the subsequent test cases from running.
pub struct Runner<'r> {
    recorder: Recorder,
    reporter: Box<dyn Reporter + 'r>,
    isolation: Box<dyn Isolation + 'r>,
    state: RunState,
}

impl fmt::Debug for Runner<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runner")
            .field("recorder", &self.recorder)
            .field("state", &self.state)
            .finish()
    }
}

impl<'r> Runner<'r> {
    /// Create a runner that reports to the console and isolates crash
    /// tests by re-executing the current binary.
    pub fn new(config: &Config) -> Self {
        Self {
            recorder: Recorder::new(config),
            reporter: Box::new(ConsoleReporter::new(config)),
            isolation: Box::new(Reexec::current_exe()),
            state: RunState::NotStarted,
        }
    }

    /// Replace the reporter.
    pub fn reporter<R>(self, reporter: R) -> Self
    where
        R: Reporter + 'r,
    {
        Self {
            reporter: Box::new(reporter),
            ..self
        }
    }

    /// Replace the recorder.
    pub fn recorder(self, recorder: Recorder) -> Self {
        Self { recorder, ..self }
    }

    /// Replace the way crash tests are isolated.
    pub fn isolation<I>(self, isolation: I) -> Self
    where
        I: Isolation + 'r,
    {
        Self {
            isolation: Box::new(isolation),
            ..self
        }
    }

    /// Return the state of the run.
    #[inline]
    pub fn state(&self) -> RunState {
        self.state
    }

    /// Return the recorder of the run.
    #[inline]
    pub fn checks(&self) -> &Recorder {
        &self.recorder
    }

    /// Run the specified test cases in order.
    ///
    /// A runner runs once; calling this method again is an error.
    pub fn run(&mut self, tests: &[&'static TestCase]) -> anyhow::Result<Report> {
        anyhow::ensure!(
            self.state == RunState::NotStarted,
            "the test run has already been started"
        );

        let mut unique_names = HashSet::new();
        for test in tests {
            anyhow::ensure!(
                unique_names.insert(test.desc.name()),
                "the test name '{}' is conflicted",
                test.desc.name()
            );
        }

        static SET_HOOK: Once = Once::new();
        SET_HOOK.call_once(|| {
            let prev_hook = panic::take_hook();
            panic::set_hook(Box::new(move |info| {
                if !maybe_unwind::capture_panic_info(info) {
                    prev_hook(info);
                }
            }));
        });

        self.state = RunState::Running;
        log::debug!("running {} test cases", tests.len());
        self.reporter.test_run_starting(tests);

        let mut report = Report::default();
        for &test in tests {
            self.reporter.test_case_starting(&test.desc);
            stub::reset_extern_stubs();
            let summary = match test.desc.kind {
                TestKind::Standard => self.run_standard(test, test.testfn),
                TestKind::Crash => self.run_crash(test),
            };
            log::trace!(
                "{}: {:?} ({} checks, {} failed)",
                test.desc.name(),
                summary.outcome(),
                summary.checks(),
                summary.failures().len()
            );
            self.reporter.test_case_ended(&summary);
            report.append(summary);
        }

        report.summary = self.recorder.summary();
        self.state = RunState::Completed;
        log::debug!("test run completed: {}", report.tally_line());
        self.reporter.test_run_ended(&report);

        Ok(report)
    }

    fn run_standard(&mut self, test: &'static TestCase, f: TestFn) -> TestCaseSummary {
        let mut ctx = Context::new(&test.desc, &mut self.recorder);
        let result = maybe_unwind(AssertUnwindSafe(|| f(&mut ctx)));
        ctx.finish(result)
    }

    fn run_crash(&mut self, test: &'static TestCase) -> TestCaseSummary {
        let result = self.isolation.run_isolated(&test.desc);

        let mut ctx = Context::new(&test.desc, &mut self.recorder);
        match result {
            Ok(exit) if exit.is_missing_case() => {
                ctx.record(
                    false,
                    format!(
                        "crash test '{}' was not found in the isolated process",
                        test.desc.name()
                    ),
                    Some(test.desc.location),
                );
            }
            Ok(exit) if exit.is_abnormal() => {
                ctx.record(
                    true,
                    format!("process terminated abnormally ({})", exit),
                    Some(test.desc.location),
                );
            }
            Ok(exit) => {
                let mut description = String::from(
                    "expected the process to terminate abnormally, but it exited successfully",
                );
                let captured = [("stdout", &exit.stdout), ("stderr", &exit.stderr)];
                for &(stream, output) in &captured {
                    if !output.is_empty() {
                        description.push_str(&format!("\n--- {} ---\n", stream));
                        description.push_str(output.trim_end());
                    }
                }
                ctx.record(false, description, Some(test.desc.location));
            }
            Err(err) => {
                ctx.record(
                    false,
                    format!("could not run the isolated process: {:#}", err),
                    Some(test.desc.location),
                );
            }
        }
        ctx.finish(Ok(Ok(())))
    }
}

/// Run the specified test cases with the default configuration and
/// return the exit status of the test process.
///
/// In a crash-test child process, only the requested test case is run.
pub fn test_main_inner(tests: &[&'static TestCase]) -> ExitStatus {
    if let Some(status) = crash::run_child(tests) {
        return status;
    }

    let mut runner = Runner::new(&Config::default());
    match runner.run(tests) {
        Ok(report) => report.status(),
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitStatus::FAILED
        }
    }
}
