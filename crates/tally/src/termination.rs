/// Return values accepted from test functions.
///
/// A test function may return `()` or `Result<(), E>`. An `Err` is
/// recorded as a failed check of the test case that returned it.
pub trait Termination: sealed::Sealed {
    /// The value returned when a test case exits early through
    /// `skip!`, `fail!` or `fixture!`.
    #[doc(hidden)]
    fn exit() -> Self;

    #[doc(hidden)]
    fn into_result(self) -> anyhow::Result<()>;
}

impl Termination for () {
    fn exit() -> Self {}

    #[inline]
    fn into_result(self) -> anyhow::Result<()> {
        Ok(())
    }
}

impl<E> Termination for Result<(), E>
where
    E: Into<anyhow::Error>,
{
    fn exit() -> Self {
        Ok(())
    }

    #[inline]
    fn into_result(self) -> anyhow::Result<()> {
        self.map_err(Into::into)
    }
}

mod sealed {
    pub trait Sealed {}

    impl Sealed for () {}

    impl<E> Sealed for Result<(), E> where E: Into<anyhow::Error> {}
}
