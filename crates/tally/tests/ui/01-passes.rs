use tally::{check, check_eq, Context};

tally::test_main!(sync_case, fallible_case, crash_case);

#[tally::test]
fn sync_case(ctx: &mut Context<'_>) {
    check_eq!(ctx, 1 + 1, 2);
}

#[tally::test]
fn fallible_case(ctx: &mut Context<'_>) -> std::io::Result<()> {
    check!(ctx, true, "fallible");
    Ok(())
}

#[tally::test(crash)]
fn crash_case(_: &mut Context<'_>) {
    std::process::abort();
}
