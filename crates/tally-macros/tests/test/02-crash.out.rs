#[allow(non_upper_case_globals)]
const case_crash: & ::tally::_test_reexports::TestCase = {
    #[allow(unused_imports)]
    use ::tally::_test_reexports as __tally;

    fn case_crash(_: &mut Context<'_>) {
        std::process::abort();
    }

    &__tally::TestCase {
        desc: __tally::TestDesc {
            name: __tally::test_name!(case_crash),
            location: __tally::location!(),
            kind: __tally::TestKind::Crash,
        },
        testfn: __tally::test_fn!(case_crash),
    }
};

::tally::__test_case! {
    #[allow(non_upper_case_globals)]
    static __TEST_CASE_case_crash: & ::tally::_test_reexports::TestCase = case_crash;
}
