/// Exit status code used as a result of the test process.
///
/// A run exits with `0` if no check failed and with `1` otherwise,
/// regardless of how many checks failed.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ExitStatus(pub(crate) i32);

impl ExitStatus {
    /// Every check passed.
    pub const OK: Self = Self(0);

    /// At least one check failed, or the run could not be performed.
    pub const FAILED: Self = Self(1);

    /// Used by a crash-test child process that could not find the test
    /// case it was asked to run.
    pub(crate) const CRASH_CASE_MISSING: Self = Self(86);

    /// Return whether the status is successful or not.
    #[inline]
    pub fn success(self) -> bool {
        self.code() == 0
    }

    /// Return the raw exit code.
    #[inline]
    pub fn code(self) -> i32 {
        self.0
    }

    /// Terminate the test process with the exit code.
    ///
    /// This method **should not** be called before the cleanup
    /// of the test process has completed.
    #[inline]
    pub fn exit(self) -> ! {
        std::process::exit(self.code());
    }
}
