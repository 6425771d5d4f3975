#[allow(non_upper_case_globals)]
const return_result: & ::tally::_test_reexports::TestCase = {
    #[allow(unused_imports)]
    use ::tally::_test_reexports as __tally;

    fn return_result(_: &mut Context<'_>) -> std::io::Result<()>
    where
        std::io::Result<()>: __tally::Termination
    {
        Ok(())
    }

    &__tally::TestCase {
        desc: __tally::TestDesc {
            name: __tally::test_name!(return_result),
            location: __tally::location!(),
            kind: __tally::TestKind::Standard,
        },
        testfn: __tally::test_fn!(return_result),
    }
};

::tally::__test_case! {
    #[allow(non_upper_case_globals)]
    static __TEST_CASE_return_result: & ::tally::_test_reexports::TestCase = return_result;
}
