use proc_macro2::TokenStream;
use quote::{quote, quote_spanned, ToTokens, TokenStreamExt as _};
use syn::{
    ext::IdentExt as _,
    parse::{Error, Parse, ParseStream, Result},
    spanned::Spanned as _,
    Attribute, Ident, ItemFn, Path, Token,
};

macro_rules! try_quote {
    ($e:expr) => {
        match $e {
            Ok(parsed) => parsed,
            Err(err) => return err.to_compile_error(),
        }
    };
}

pub(crate) fn test(args: TokenStream, item: TokenStream) -> TokenStream {
    let mut item = try_quote!(syn::parse2::<ItemFn>(item));

    match &item.sig.generics {
        generics if generics.params.is_empty() => (),
        generics => {
            return Error::new_spanned(generics, "test functions cannot take generic parameters")
                .to_compile_error()
        }
    }

    if let Some(ref asyncness) = item.sig.asyncness {
        return Error::new_spanned(asyncness, "test functions cannot be async").to_compile_error();
    }

    let args = try_quote!(syn::parse2::<Args>(args));

    // extract tally-specific attributes.
    let params = try_quote!(Params::from_attrs(&mut item.attrs));

    // append bounds to where clause.
    if let syn::ReturnType::Type(_, ref ty) = item.sig.output {
        let where_clause = item.sig.generics.make_where_clause();
        where_clause
            .predicates
            .push(syn::parse_quote!(#ty: __tally::Termination));
    }

    Generated {
        item: &item,
        params: &params,
        args: &args,
    }
    .to_token_stream()
}

#[derive(Copy, Clone)]
enum Kind {
    Standard,
    Crash,
}

struct Args {
    kind: Kind,
}

mod kw {
    syn::custom_keyword!(crash);
}

impl Parse for Args {
    fn parse(input: ParseStream) -> Result<Self> {
        if input.is_empty() {
            return Ok(Self {
                kind: Kind::Standard,
            });
        }

        let span = input.span();
        input
            .parse::<kw::crash>()
            .map_err(|_| Error::new(span, "only 'crash' is accepted"))?;
        if !input.is_empty() {
            return Err(input.error("unexpected token after 'crash'"));
        }

        Ok(Self { kind: Kind::Crash })
    }
}

struct Params {
    crate_path: Path,
}

impl Params {
    fn from_attrs(attrs: &mut Vec<Attribute>) -> Result<Self> {
        let mut crate_path = None;

        let mut parse_attr = |input: ParseStream<'_>| -> Result<()> {
            match input.call(Ident::parse_any)? {
                id if id == "crate" => {
                    let _: Token![=] = input.parse()?;
                    let path = input.call(Path::parse_mod_style)?;
                    crate_path.replace(path);
                    Ok(())
                }
                id => Err(Error::new_spanned(id, "unknown parameter name")),
            }
        };

        let mut errors = Errors::default();
        attrs.retain(|attr| {
            if !attr.path.is_ident("tally") {
                return true;
            }
            errors.append_if_error(attr.parse_args_with(&mut parse_attr));
            false
        });
        errors.into_result()?;

        Ok(Self {
            crate_path: crate_path.unwrap_or_else(|| syn::parse_quote!(::tally)),
        })
    }
}

#[derive(Default)]
struct Errors(Option<Error>);

impl Errors {
    fn append_if_error(&mut self, res: Result<()>) {
        match (self.0.as_mut(), res) {
            (Some(errors), Err(error)) => errors.combine(error),
            (None, Err(error)) => self.0 = Some(error),
            (_, Ok(())) => (),
        }
    }

    fn into_result(self) -> Result<()> {
        match self.0 {
            None => Ok(()),
            Some(err) => Err(err),
        }
    }
}

struct Generated<'a> {
    params: &'a Params,
    args: &'a Args,
    item: &'a ItemFn,
}

impl ToTokens for Generated<'_> {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        let crate_path = &self.params.crate_path;
        let item = &*self.item;
        let ident = &self.item.sig.ident;
        let location = quote_spanned!(self.item.sig.span() => __tally::location!());

        let kind = match self.args.kind {
            Kind::Standard => quote!(__tally::TestKind::Standard),
            Kind::Crash => quote!(__tally::TestKind::Crash),
        };

        let test_case_id = quote::format_ident!("__TEST_CASE_{}", ident);

        tokens.append_all(Some(quote! {
            #[allow(non_upper_case_globals)]
            const #ident: & #crate_path::_test_reexports::TestCase = {
                #[allow(unused_imports)]
                use #crate_path::_test_reexports as __tally;

                #item

                &__tally::TestCase {
                    desc: __tally::TestDesc {
                        name: __tally::test_name!(#ident),
                        location: #location,
                        kind: #kind,
                    },
                    testfn: __tally::test_fn!(#ident),
                }
            };
        }));

        tokens.append_all(Some(quote! {
            #crate_path::__test_case! {
                #[allow(non_upper_case_globals)]
                static #test_case_id: & #crate_path::_test_reexports::TestCase = #ident;
            }
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use syn::{parse::Parser as _, Item};

    fn parse_items(input: ParseStream) -> Result<Vec<Item>> {
        let mut items = vec![];
        while !input.is_empty() {
            items.push(input.parse()?);
        }
        Ok(items)
    }

    fn read_file<P: AsRef<Path>>(path: P) -> TokenStream {
        let content = std::fs::read_to_string(path).unwrap();
        let items = parse_items.parse_str(&content).unwrap();
        quote!(#(#items)*)
    }

    fn test_expanded(name: &str, args: TokenStream) {
        let item = read_file(format!("tests/test/{}.in.rs", name));
        let expected = read_file(format!("tests/test/{}.out.rs", name));
        let output = test(args, item);
        assert_eq!(expected.to_string(), output.to_string());
    }

    #[test]
    fn test_standard() {
        test_expanded("01-standard", TokenStream::new());
    }

    #[test]
    fn test_crash() {
        test_expanded("02-crash", quote!(crash));
    }

    #[test]
    fn attributes() {
        test_expanded("03-attributes", TokenStream::new());
    }

    #[test]
    fn return_result() {
        test_expanded("04-return-result", TokenStream::new());
    }

    #[test]
    fn reject_unknown_args() {
        let item = quote! {
            fn case(ctx: &mut Context<'_>) {}
        };
        let output = test(quote!(fork), item).to_string();
        assert!(output.contains("compile_error"), "{}", output);
        assert!(output.contains("is accepted"), "{}", output);
    }

    #[test]
    fn reject_async() {
        let item = quote! {
            async fn case(ctx: &mut Context<'_>) {}
        };
        let output = test(TokenStream::new(), item).to_string();
        assert!(output.contains("test functions cannot be async"), "{}", output);
    }

    #[test]
    fn reject_generics() {
        let item = quote! {
            fn case<T>(ctx: &mut Context<'_>) {}
        };
        let output = test(TokenStream::new(), item).to_string();
        assert!(
            output.contains("test functions cannot take generic parameters"),
            "{}",
            output
        );
    }
}
