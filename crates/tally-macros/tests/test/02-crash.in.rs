fn case_crash(_: &mut Context<'_>) {
    std::process::abort();
}
