//! Out-of-process execution of crash tests.
//!
//! A crash test verifies that the code under test terminates the process
//! (an abort, a fatal signal, a panic escaping `main`). The runner cannot
//! survive that in-process, so it re-executes the test binary with the
//! name of the case in `TALLY_CRASH_TEST` and waits for the child.

use crate::{
    config::Config,
    context::Context,
    exit_status::ExitStatus,
    recorder::Recorder,
    test::{TestCase, TestDesc},
};
use anyhow::Context as _;
use std::{
    env, fmt,
    path::PathBuf,
    process::{self, Command, Stdio},
};

/// The environment variable that selects the crash test run by a child.
pub const CRASH_TEST_ENV: &str = "TALLY_CRASH_TEST";

/// How an isolated test process terminated.
#[derive(Debug, Clone, PartialEq)]
pub struct ChildExit {
    /// The exit code, if the process exited.
    pub code: Option<i32>,
    /// The signal that killed the process, if any.
    pub signal: Option<i32>,
    /// The captured standard output of the process.
    pub stdout: String,
    /// The captured standard error of the process.
    pub stderr: String,
}

impl ChildExit {
    /// A process that exited with the specified code.
    pub fn exited(code: i32) -> Self {
        Self {
            code: Some(code),
            signal: None,
            stdout: String::new(),
            stderr: String::new(),
        }
    }

    /// A process killed by the specified signal.
    pub fn killed(signal: i32) -> Self {
        Self {
            code: None,
            signal: Some(signal),
            stdout: String::new(),
            stderr: String::new(),
        }
    }

    fn from_output(output: process::Output) -> Self {
        #[cfg(unix)]
        let signal = {
            use std::os::unix::process::ExitStatusExt as _;
            output.status.signal()
        };
        #[cfg(not(unix))]
        let signal = None;

        Self {
            code: output.status.code(),
            signal,
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }

    /// Return whether the process terminated other than by a successful exit.
    pub fn is_abnormal(&self) -> bool {
        self.code != Some(0)
    }

    pub(crate) fn is_missing_case(&self) -> bool {
        self.code == Some(ExitStatus::CRASH_CASE_MISSING.code())
    }
}

impl fmt::Display for ChildExit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.code, self.signal) {
            (_, Some(signal)) => write!(f, "killed by signal {}", signal),
            (Some(code), None) => write!(f, "exit code {}", code),
            (None, None) => f.write_str("unknown termination"),
        }
    }
}

/// The way a crash test is isolated from the running process.
pub trait Isolation {
    /// Run the specified test case in a separate process and wait for it.
    fn run_isolated(&mut self, desc: &TestDesc) -> anyhow::Result<ChildExit>;
}

impl<I: ?Sized> Isolation for &mut I
where
    I: Isolation,
{
    fn run_isolated(&mut self, desc: &TestDesc) -> anyhow::Result<ChildExit> {
        (**self).run_isolated(desc)
    }
}

impl<I: ?Sized> Isolation for Box<I>
where
    I: Isolation,
{
    fn run_isolated(&mut self, desc: &TestDesc) -> anyhow::Result<ChildExit> {
        (**self).run_isolated(desc)
    }
}

/// Isolation by re-executing a test binary.
#[derive(Debug, Default)]
pub struct Reexec {
    program: Option<PathBuf>,
}

impl Reexec {
    /// Re-execute the currently running binary.
    pub fn current_exe() -> Self {
        Self { program: None }
    }

    /// Execute the specified binary, which must be a tally test binary
    /// registering the same test cases.
    pub fn program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: Some(program.into()),
        }
    }
}

impl Isolation for Reexec {
    fn run_isolated(&mut self, desc: &TestDesc) -> anyhow::Result<ChildExit> {
        let program = match self.program {
            Some(ref program) => program.clone(),
            None => env::current_exe().context("cannot locate the running test binary")?,
        };

        log::debug!("spawn {} for crash test {}", program.display(), desc.name());
        let output = Command::new(&program)
            .env(CRASH_TEST_ENV, desc.name())
            .stdin(Stdio::null())
            .output()
            .with_context(|| format!("failed to spawn {}", program.display()))?;

        let exit = ChildExit::from_output(output);
        log::trace!(
            "crash test {} ({}) stdout:\n{}\nstderr:\n{}",
            desc.name(),
            exit,
            exit.stdout,
            exit.stderr
        );

        Ok(exit)
    }
}

/// Run the crash test requested through the environment, if any.
///
/// Returns `None` in the parent process. In a child, the selected test
/// case is run without any panic isolation; if it comes back, the child
/// exits successfully, which the parent reports as a failure.
pub(crate) fn run_child(tests: &[&'static TestCase]) -> Option<ExitStatus> {
    let name = env::var(CRASH_TEST_ENV).ok()?;

    let test = match tests.iter().copied().find(|test| test.desc.name() == name) {
        Some(test) => test,
        None => {
            eprintln!("crash test `{}` is not registered in this binary", name);
            return Some(ExitStatus::CRASH_CASE_MISSING);
        }
    };

    let mut recorder = Recorder::new(&Config::default());
    let mut ctx = Context::new(&test.desc, &mut recorder);
    if let Err(err) = (test.testfn)(&mut ctx) {
        eprintln!("crash test `{}` returned an error: {:#}", name, err);
    }
    Some(ExitStatus::OK)
}
