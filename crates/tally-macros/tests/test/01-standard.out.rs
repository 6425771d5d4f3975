#[allow(non_upper_case_globals)]
const case_standard: & ::tally::_test_reexports::TestCase = {
    #[allow(unused_imports)]
    use ::tally::_test_reexports as __tally;

    fn case_standard(ctx: &mut Context<'_>) {
        let mut vec = vec![0usize; 5];
        check_eq!(ctx, vec.len(), 5);
        vec.resize(10, 0);
        check!(ctx, vec.capacity() >= 10);
    }

    &__tally::TestCase {
        desc: __tally::TestDesc {
            name: __tally::test_name!(case_standard),
            location: __tally::location!(),
            kind: __tally::TestKind::Standard,
        },
        testfn: __tally::test_fn!(case_standard),
    }
};

::tally::__test_case! {
    #[allow(non_upper_case_globals)]
    static __TEST_CASE_case_standard: & ::tally::_test_reexports::TestCase = case_standard;
}
