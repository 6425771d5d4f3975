use crate::{
    config::Config,
    report::console::colored,
    test::Location,
};
use std::{
    fmt,
    io::{self, Write as _},
};
use termcolor::{Color, NoColor, StandardStream, WriteColor};

/// The outcome of a single check.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckResult {
    /// Human readable description of the check.
    pub description: String,
    /// Whether the checked condition held.
    pub passed: bool,
    /// Where the check was made, if known.
    pub location: Option<Location>,
}

impl fmt::Display for CheckResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.location {
            Some(ref location) => write!(f, "{}: {}", location, self.description),
            None => f.write_str(&self.description),
        }
    }
}

/// Aggregated check counters of a test run.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// The number of checks performed so far.
    pub total_checks: usize,
    /// The number of checks that failed, never greater than `total_checks`.
    pub failed_checks: usize,
}

impl RunSummary {
    /// Return the number of checks that passed.
    #[inline]
    pub fn passed_checks(&self) -> usize {
        self.total_checks - self.failed_checks
    }

    /// Return whether no check has failed.
    #[inline]
    pub fn is_passed(&self) -> bool {
        self.failed_checks == 0
    }
}

/// Records the results of every check made during a test run.
///
/// Failures never terminate the process: they are counted, appended
/// to the log and written to the diagnostic stream right away, so that
/// they are visible even if the code under test crashes afterwards.
///
/// Passed checks are only counted. A verbose recorder also reports them
/// and keeps them in the log, which then grows with every check made.
pub struct Recorder {
    summary: RunSummary,
    log: Vec<CheckResult>,
    diagnostics: Box<dyn WriteColor>,
    verbose: bool,
}

impl fmt::Debug for Recorder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Recorder")
            .field("summary", &self.summary)
            .field("log", &self.log)
            .field("verbose", &self.verbose)
            .finish()
    }
}

impl Recorder {
    /// Create a recorder that writes its diagnostics to the standard error.
    pub fn new(config: &Config) -> Self {
        Self::with_diagnostics(
            StandardStream::stderr(config.color.choice()),
            config.verbose,
        )
    }

    /// Create a recorder that writes its diagnostics to the specified stream.
    pub fn with_diagnostics<W>(diagnostics: W, verbose: bool) -> Self
    where
        W: WriteColor + 'static,
    {
        Self {
            summary: RunSummary::default(),
            log: vec![],
            diagnostics: Box::new(diagnostics),
            verbose,
        }
    }

    /// Create a recorder that discards its diagnostics.
    pub fn silent() -> Self {
        Self::with_diagnostics(NoColor::new(io::sink()), false)
    }

    /// Record a passed check.
    pub fn record_pass(&mut self, description: impl Into<String>, location: Option<Location>) {
        self.summary.total_checks += 1;
        if !self.verbose {
            return;
        }
        let result = CheckResult {
            description: description.into(),
            passed: true,
            location,
        };
        let _ = self.write_diagnostic(&result);
        self.log.push(result);
    }

    /// Record a failed check.
    pub fn record_failure(&mut self, description: impl Into<String>, location: Option<Location>) {
        self.summary.total_checks += 1;
        self.summary.failed_checks += 1;
        let result = CheckResult {
            description: description.into(),
            passed: false,
            location,
        };
        let _ = self.write_diagnostic(&result);
        self.log.push(result);
    }

    /// Return the current counters.
    #[inline]
    pub fn summary(&self) -> RunSummary {
        self.summary
    }

    /// Return the checks recorded so far, in order.
    ///
    /// Passed checks are listed only if the recorder is verbose.
    #[inline]
    pub fn log(&self) -> &[CheckResult] {
        &self.log[..]
    }

    /// Iterate over the failed checks recorded so far, in order.
    pub fn failures(&self) -> impl Iterator<Item = &CheckResult> + '_ {
        self.log.iter().filter(|result| !result.passed)
    }

    fn write_diagnostic(&mut self, result: &CheckResult) -> io::Result<()> {
        let w = &mut *self.diagnostics;
        let tag = if result.passed {
            colored("[OK]").fg(Color::Green)
        } else {
            colored("[FAIL]").fg(Color::Red)
        };
        tag.fmt_colored(w)?;
        writeln!(w, " {}", result)?;
        w.flush()
    }
}
