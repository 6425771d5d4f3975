/*!
A non-terminating unit testing harness for Rust.

A failed check is recorded and reported, but never stops the test case
or the run: every test case runs, every failure is listed, and the
process exits with a nonzero status if any check failed.

```no_run
use tally::{check, check_eq, Context};

#[tally::test]
fn arithmetic(ctx: &mut Context<'_>) {
    check_eq!(ctx, 2 + 2, 4);
    check!(ctx, 10 % 3 == 1);
}
# fn main() {}
```

A test binary declared with `harness = false` generates its entry point
with `tally::test_harness!()`, or lists its cases explicitly with
`tally::test_main!(..)`.
!*/

#![doc(html_root_url = "https://docs.rs/tally/0.1.0-dev")]
#![deny(missing_docs)]
#![forbid(clippy::unimplemented, clippy::todo)]

#[macro_use]
mod macros;
mod config;
mod context;
pub mod crash;
mod exit_status;
mod expect;
mod harness;
mod recorder;
mod report;
mod runner;
mod stub;
mod termination;

pub use crate::{
    config::{ColorConfig, Config},
    context::Context,
    exit_status::ExitStatus,
    expect::Nullable,
    recorder::{CheckResult, Recorder, RunSummary},
    report::{ConsoleReporter, LogReporter, Outcome, Report, Reporter, TestCaseSummary},
    runner::{RunState, Runner},
    stub::{Stub, StubInvocationRecord},
    termination::Termination,
    test::{Location, TestCase, TestDesc, TestFn, TestKind, TestName},
};

/// Generate a single test case.
///
/// `#[tally::test(crash)]` declares a crash test, which passes only if
/// its body terminates the process abnormally.
pub use tally_macros::test;

hidden_item! {
    /// Re-exported items for #[test]
    pub mod _test_reexports {
        pub use crate::{
            __location as location, //
            __test_fn as test_fn,
            __test_name as test_name,
            termination::Termination,
            context::Context,
            test::{Location, TestCase, TestDesc, TestKind, TestName},
        };
        pub use std::{column, concat, file, format_args, line, module_path, result::Result, stringify};
    }

    /// Re-exported items for test_main!()
    pub mod _test_main_reexports {
        pub use crate::{
            runner::test_main_inner,
            test::TestCase,
        };
    }

    /// Re-exported items for stub_fn!()
    pub mod _stub_reexports {
        pub use crate::stub::register_extern_stub;
    }

    /// Re-exported items for test_harness!() and __test_case_harness!()
    #[cfg(feature = "harness")]
    pub mod _test_harness_reexports {
        pub use {
            crate::harness::{TEST_CASES, main},
            linkme::{self, distributed_slice},
        };
    }
}

#[doc(hidden)] // private API
#[cfg(feature = "harness")]
#[macro_export]
macro_rules! __test_case {
    ( $item:item ) => {
        $crate::__test_case_harness!($item);
    };
}

#[doc(hidden)] // private API
#[cfg(not(feature = "harness"))]
#[macro_export]
macro_rules! __test_case {
    ( $item:item ) => {
        /* stub */
    };
}
