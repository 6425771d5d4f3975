fn case_standard(ctx: &mut Context<'_>) {
    let mut vec = vec![0usize; 5];
    check_eq!(ctx, vec.len(), 5);
    vec.resize(10, 0);
    check!(ctx, vec.capacity() >= 10);
}
