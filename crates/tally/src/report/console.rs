use super::{Outcome, Report, Reporter, TestCaseSummary};
use crate::{
    config::Config,
    test::{TestCase, TestDesc},
};
use std::{
    cell::RefCell,
    fmt,
    io::{self, Write as _},
};
use termcolor::{Color, ColorSpec, StandardStream, WriteColor};

pub(crate) struct Colored<T> {
    val: T,
    spec: Option<ColorSpec>,
}

impl<T> Colored<T> {
    pub(crate) fn fg(mut self, color: Color) -> Self {
        self.spec
            .get_or_insert_with(ColorSpec::new)
            .set_fg(Some(color));
        self
    }

    pub(crate) fn fmt_colored<W: ?Sized>(&self, w: &mut W) -> io::Result<()>
    where
        T: fmt::Display,
        W: WriteColor,
    {
        if let Some(ref spec) = self.spec {
            w.set_color(spec)?;
        }
        write!(w, "{}", &self.val)?;
        if let Some(..) = self.spec {
            w.reset()?;
        }
        Ok(())
    }
}

pub(crate) fn colored<T>(val: T) -> Colored<T> {
    Colored { val, spec: None }
}

/// A reporter that prints the progress of the run to the standard output.
pub struct ConsoleReporter {
    stream: RefCell<Box<dyn WriteColor>>,
}

impl fmt::Debug for ConsoleReporter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConsoleReporter").finish()
    }
}

impl ConsoleReporter {
    /// Create a console reporter.
    pub fn new(config: &Config) -> Self {
        Self::with_output(StandardStream::stdout(config.color.choice()))
    }

    /// Create a reporter that prints to the specified stream.
    pub fn with_output<W>(output: W) -> Self
    where
        W: WriteColor + 'static,
    {
        Self {
            stream: RefCell::new(Box::new(output)),
        }
    }

    fn print_test_case_summary<W: ?Sized>(
        &self,
        w: &mut W,
        summary: &TestCaseSummary,
    ) -> io::Result<()>
    where
        W: WriteColor,
    {
        match summary.outcome {
            Outcome::Passed => {
                colored("[PASS]").fg(Color::Green).fmt_colored(w)?;
                writeln!(w, " {}", summary.desc.name())?;
            }
            Outcome::Failed => {
                colored("[FAIL]").fg(Color::Red).fmt_colored(w)?;
                writeln!(
                    w,
                    " {} ({} of {} checks failed)",
                    summary.desc.name(),
                    summary.failures.len(),
                    summary.checks,
                )?;
            }
            Outcome::Skipped { ref reason, .. } => {
                colored("[SKIP]").fg(Color::Yellow).fmt_colored(w)?;
                writeln!(w, " {}: {}", summary.desc.name(), reason)?;
            }
        }
        w.flush()
    }

    fn print_report<W: ?Sized>(&self, w: &mut W, report: &Report) -> io::Result<()>
    where
        W: WriteColor,
    {
        if !report.failed.is_empty() {
            writeln!(w)?;
            writeln!(w, "failures:")?;
            for result in &report.failed {
                writeln!(
                    w,
                    "---- {} at {} ----",
                    result.desc.name(),
                    result.desc.location
                )?;
                for failure in &result.failures {
                    writeln!(w, "{}", failure)?;
                }
                writeln!(w)?;
            }

            writeln!(w)?;
            writeln!(w, "failures:")?;
            for result in &report.failed {
                writeln!(w, "    {}", result.desc.name())?;
            }
        }

        writeln!(w)?;
        write!(w, "{}", report.tally_line())?;
        if !report.skipped.is_empty() {
            write!(w, " ({} skipped)", report.skipped.len())?;
        }
        writeln!(w)?;

        let status = if report.is_passed() {
            colored("ok").fg(Color::Green)
        } else {
            colored("FAILED").fg(Color::Red)
        };
        write!(w, "test result: ")?;
        status.fmt_colored(w)?;
        writeln!(
            w,
            ". {total} checks; {failed} failed",
            total = report.summary.total_checks,
            failed = report.summary.failed_checks,
        )?;

        w.flush()
    }
}

impl Reporter for ConsoleReporter {
    fn test_run_starting(&self, tests: &[&'static TestCase]) {
        let mut w = self.stream.borrow_mut();
        let suffix = match tests.len() {
            1 => "",
            _ => "s",
        };
        let _ = writeln!(w, "running {} test{}", tests.len(), suffix);
        let _ = w.flush();
    }

    fn test_run_ended(&self, report: &Report) {
        let mut w = self.stream.borrow_mut();
        let _ = self.print_report(&mut **w, report);
    }

    fn test_case_starting(&self, _: &TestDesc) {}

    fn test_case_ended(&self, summary: &TestCaseSummary) {
        let mut w = self.stream.borrow_mut();
        let _ = self.print_test_case_summary(&mut **w, summary);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        context::Context,
        recorder::{CheckResult, RunSummary},
        test::{Location, TestKind, TestName},
    };
    use std::{io::Write as _, rc::Rc};
    use termcolor::NoColor;

    #[derive(Clone, Default)]
    struct SharedBuf(Rc<RefCell<Vec<u8>>>);

    impl io::Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.borrow_mut().write(buf)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl SharedBuf {
        fn contents(&self) -> String {
            String::from_utf8(self.0.borrow().clone()).unwrap()
        }
    }

    const fn location(line: u32) -> Location {
        Location {
            file: "focal.rs",
            line,
            column: 1,
        }
    }

    fn noop(_: &mut Context<'_>) -> anyhow::Result<()> {
        Ok(())
    }

    static HEADER_IS_LOADED: TestCase = TestCase {
        desc: TestDesc {
            name: TestName {
                raw: "tally::header_is_loaded",
            },
            location: location(3),
            kind: TestKind::Standard,
        },
        testfn: noop,
    };

    static SHORT_READ_IS_REPORTED: TestCase = TestCase {
        desc: TestDesc {
            name: TestName {
                raw: "tally::short_read_is_reported",
            },
            location: location(10),
            kind: TestKind::Standard,
        },
        testfn: noop,
    };

    static NEEDS_A_DEVICE: TestCase = TestCase {
        desc: TestDesc {
            name: TestName {
                raw: "tally::needs_a_device",
            },
            location: location(20),
            kind: TestKind::Standard,
        },
        testfn: noop,
    };

    fn run(reporter: &ConsoleReporter, results: Vec<TestCaseSummary>, summary: RunSummary) {
        let tests: Vec<&'static TestCase> = results
            .iter()
            .map(|result| match result.desc.name() {
                "header_is_loaded" => &HEADER_IS_LOADED,
                "short_read_is_reported" => &SHORT_READ_IS_REPORTED,
                _ => &NEEDS_A_DEVICE,
            })
            .collect();
        reporter.test_run_starting(&tests);

        let mut report = Report::default();
        for result in results {
            reporter.test_case_starting(result.desc);
            reporter.test_case_ended(&result);
            report.append(result);
        }
        report.summary = summary;
        reporter.test_run_ended(&report);
    }

    fn passed(test: &'static TestCase, checks: usize) -> TestCaseSummary {
        TestCaseSummary {
            desc: &test.desc,
            outcome: Outcome::Passed,
            checks,
            failures: vec![],
        }
    }

    #[test]
    fn prints_every_outcome_and_the_failures() {
        let buf = SharedBuf::default();
        let reporter = ConsoleReporter::with_output(NoColor::new(buf.clone()));

        let failed = TestCaseSummary {
            desc: &SHORT_READ_IS_REPORTED.desc,
            outcome: Outcome::Failed,
            checks: 2,
            failures: vec![CheckResult {
                description: "truncated header: expected `-1`, found `0`".into(),
                passed: false,
                location: Some(location(12)),
            }],
        };
        let skipped = TestCaseSummary {
            desc: &NEEDS_A_DEVICE.desc,
            outcome: Outcome::Skipped {
                location: location(21),
                reason: "no device attached".into(),
            },
            checks: 0,
            failures: vec![],
        };
        run(
            &reporter,
            vec![passed(&HEADER_IS_LOADED, 2), failed, skipped],
            RunSummary {
                total_checks: 4,
                failed_checks: 1,
            },
        );

        assert_eq!(
            buf.contents(),
            "\
running 3 tests
[PASS] header_is_loaded
[FAIL] short_read_is_reported (1 of 2 checks failed)
[SKIP] needs_a_device: no device attached

failures:
---- short_read_is_reported at focal.rs:10:1 ----
focal.rs:12:1: truncated header: expected `-1`, found `0`


failures:
    short_read_is_reported

1 / 2 tests passed (1 skipped)
test result: FAILED. 4 checks; 1 failed
"
        );
    }

    #[test]
    fn passing_run_has_no_failures_section() {
        let buf = SharedBuf::default();
        let reporter = ConsoleReporter::with_output(NoColor::new(buf.clone()));

        run(
            &reporter,
            vec![passed(&HEADER_IS_LOADED, 3)],
            RunSummary {
                total_checks: 3,
                failed_checks: 0,
            },
        );

        assert_eq!(
            buf.contents(),
            "\
running 1 test
[PASS] header_is_loaded

1 / 1 tests passed
test result: ok. 3 checks; 0 failed
"
        );
    }
}
