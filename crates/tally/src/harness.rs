#![cfg(feature = "harness")]

use crate::{runner::test_main_inner, test::TestCase};
use linkme::distributed_slice;

#[doc(hidden)]
#[distributed_slice]
pub static TEST_CASES: [&'static TestCase] = [..];

#[doc(hidden)] // private API.
#[macro_export]
macro_rules! __test_case_harness {
    ( $item:item ) => {
        #[$crate::_test_harness_reexports::distributed_slice(
            $crate::_test_harness_reexports::TEST_CASES
        )]
        #[linkme(crate = $crate::_test_harness_reexports::linkme)]
        $item
    };
}

/// Run every test case registered in the binary.
///
/// The link order of the registered cases is unspecified, so they are
/// run sorted by their location in the source.
#[doc(hidden)]
pub fn main() {
    let mut tests: Vec<&'static TestCase> = TEST_CASES.iter().copied().collect();
    tests.sort_by_key(|test| test.desc.location);
    test_main_inner(&tests[..]).exit()
}

/// Generate the main function for running test application.
#[macro_export]
macro_rules! test_harness {
    () => {
        fn main() {
            $crate::_test_harness_reexports::main()
        }
    };
}
