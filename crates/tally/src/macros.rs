macro_rules! hidden_item {
    ( $( $item:item )* ) => {
        $(
            #[doc(hidden)]
            $item
        )*
    };
}

/// Check that a boolean expression holds, recording the expression text
/// as the description of the check.
///
/// The test case keeps running when the check fails.
#[macro_export]
macro_rules! check {
    ( $ctx:ident, $cond:expr ) => {
        $ctx.expect_true($cond, $crate::_test_reexports::stringify!($cond))
    };
    ( $ctx:ident, $cond:expr, $($arg:tt)+ ) => {
        $ctx.expect_true($cond, $crate::_test_reexports::format_args!($($arg)+))
    };
}

/// Check that two expressions are equal, recording both expression texts
/// as the description of the check.
///
/// The test case keeps running when the check fails.
#[macro_export]
macro_rules! check_eq {
    ( $ctx:ident, $actual:expr, $expected:expr ) => {
        $ctx.expect_eq(
            $actual,
            $expected,
            $crate::_test_reexports::concat!(
                $crate::_test_reexports::stringify!($actual),
                " == ",
                $crate::_test_reexports::stringify!($expected)
            ),
        )
    };
    ( $ctx:ident, $actual:expr, $expected:expr, $($arg:tt)+ ) => {
        $ctx.expect_eq($actual, $expected, $crate::_test_reexports::format_args!($($arg)+))
    };
}

/// Mark the current test case as skipped and then terminate its execution.
///
/// This macro can usually be used to disable some test cases that may not
/// success depending on the runtime context, such as a missing device
/// or a fixture file that is not available.
#[macro_export]
macro_rules! skip {
    ( $ctx:ident ) => {
        $crate::skip!($ctx, "explicitly skipped");
    };
    ( $ctx:ident, $($arg:tt)+ ) => {{
        use $crate::_test_reexports as __tally;
        return $ctx.skip(__tally::location!(), __tally::format_args!($($arg)+));
    }};
}

/// Record a failure and then terminate the execution of the current test case.
#[macro_export]
macro_rules! fail {
    ( $ctx:ident ) => {
        $crate::fail!($ctx, "explicitly failed");
    };
    ( $ctx:ident, $($arg:tt)+ ) => {{
        use $crate::_test_reexports as __tally;
        return $ctx.fail(__tally::location!(), __tally::format_args!($($arg)+));
    }};
}

/// Unwrap the result of a setup step.
///
/// If the step fails, the error is recorded as a failure and the current
/// test case terminates; the remaining test cases still run.
#[macro_export]
macro_rules! fixture {
    ( $ctx:ident, $setup:expr ) => {
        match $setup {
            $crate::_test_reexports::Result::Ok(val) => val,
            $crate::_test_reexports::Result::Err(err) => {
                return $ctx.fixture_failed(
                    $crate::_test_reexports::location!(),
                    $crate::_test_reexports::stringify!($setup),
                    err,
                );
            }
        }
    };
}

/// Define a `main` function that runs the listed test cases in order.
///
/// ```no_run
/// # use tally::{test_main, Context};
/// #[tally::test]
/// fn first(ctx: &mut Context<'_>) {
///     tally::check!(ctx, 1 + 1 == 2);
/// }
///
/// #[tally::test]
/// fn second(ctx: &mut Context<'_>) {
///     tally::check_eq!(ctx, "a".len(), 1);
/// }
///
/// test_main!(first, second);
/// ```
#[macro_export]
macro_rules! test_main {
    ( $($test:path),* $(,)? ) => {
        fn main() {
            use $crate::_test_main_reexports as __tally;
            let tests: &[&'static __tally::TestCase] = &[ $($test),* ];
            __tally::test_main_inner(tests).exit()
        }
    };
}

#[doc(hidden)] // private API
#[macro_export]
macro_rules! __test_name {
    ($name:ident) => {{
        use $crate::_test_reexports as __tally;
        __tally::TestName {
            raw: __tally::concat!(__tally::module_path!(), "::", __tally::stringify!($name)),
        }
    }};
}

#[doc(hidden)] // private API
#[macro_export]
macro_rules! __test_fn {
    ($path:path) => {{
        use $crate::_test_reexports as __tally;
        |ctx: &mut __tally::Context<'_>| __tally::Termination::into_result($path(ctx))
    }};
}

#[doc(hidden)] // private API
#[macro_export]
macro_rules! __location {
    () => {{
        use $crate::_test_reexports as __tally;
        __tally::Location {
            file: __tally::file!(),
            line: __tally::line!(),
            column: __tally::column!(),
        }
    }};
}
