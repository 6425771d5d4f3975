#[allow(non_upper_case_globals)]
const attributes: & path::to::tally::_test_reexports::TestCase = {
    #[allow(unused_imports)]
    use path::to::tally::_test_reexports as __tally;

    #[allow(missing_docs)]
    fn attributes(ctx: &mut Context<'_>) {
        #[allow(unused_variables)]
        let foo = 10;
        check!(ctx, true);
    }

    &__tally::TestCase {
        desc: __tally::TestDesc {
            name: __tally::test_name!(attributes),
            location: __tally::location!(),
            kind: __tally::TestKind::Standard,
        },
        testfn: __tally::test_fn!(attributes),
    }
};

path::to::tally::__test_case! {
    #[allow(non_upper_case_globals)]
    static __TEST_CASE_attributes: & path::to::tally::_test_reexports::TestCase = attributes;
}
