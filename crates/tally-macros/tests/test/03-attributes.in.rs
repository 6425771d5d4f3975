#[tally(crate = path::to::tally)]
#[allow(missing_docs)]
fn attributes(ctx: &mut Context<'_>) {
    #[allow(unused_variables)]
    let foo = 10;
    check!(ctx, true);
}
