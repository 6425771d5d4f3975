extern crate proc_macro;

mod test;

use proc_macro::TokenStream;

/// Generate a single test case.
#[proc_macro_attribute]
pub fn test(args: TokenStream, item: TokenStream) -> TokenStream {
    crate::test::test(args.into(), item.into()).into()
}
