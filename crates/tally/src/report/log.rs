use super::{Outcome, Report, Reporter, TestCaseSummary};
use crate::test::{TestCase, TestDesc};

/// A reporter that forwards the progress of the run to the `log` facade.
#[derive(Debug, Clone)]
pub struct LogReporter {
    _p: (),
}

impl LogReporter {
    /// Create a log reporter.
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self { _p: () }
    }
}

impl Reporter for LogReporter {
    fn test_run_starting(&self, tests: &[&'static TestCase]) {
        let suffix = match tests.len() {
            1 => "",
            _ => "s",
        };
        ::log::info!("running {} test{}", tests.len(), suffix);
    }

    fn test_run_ended(&self, report: &Report) {
        if report.is_passed() {
            ::log::info!("{}; test status: ok", report.tally_line());
        } else {
            ::log::error!(
                "{}; test status: FAILED ({} of {} checks failed)",
                report.tally_line(),
                report.summary.failed_checks,
                report.summary.total_checks,
            );
        }
    }

    fn test_case_starting(&self, desc: &TestDesc) {
        ::log::info!("start: {}", desc.name());
    }

    fn test_case_ended(&self, summary: &TestCaseSummary) {
        match summary.outcome {
            Outcome::Passed => ::log::info!("{}: ok", summary.desc.name()),
            Outcome::Failed => {
                for failure in &summary.failures {
                    ::log::error!("{}: {}", summary.desc.name(), failure);
                }
                ::log::error!("{}: FAILED", summary.desc.name())
            }
            Outcome::Skipped { ref reason, .. } => {
                ::log::info!("{}: skipped ({})", summary.desc.name(), reason)
            }
        }
    }
}
