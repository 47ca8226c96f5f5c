use proc_macro::TokenStream;
use quote::ToTokens;
use std::env::var_os;
use syn::parse::Parse;

mod autowired;

/// Registers the `#[autowired]` field attribute and checks how it's used.
///
/// Expands to nothing: injectors are generated by `autowire-codegen` from a build script.
/// Annotated fields must be visible to their module (`pub` or `pub(..)`), declared in a
/// non-generic struct with named fields, and use only the `name`, `required`, `path` and
/// `default` arguments.
#[proc_macro_derive(Autowired, attributes(autowired))]
pub fn derive_autowired(item: TokenStream) -> TokenStream {
    expand_with(item, autowired::expand)
}

fn expand_with<F, I, K>(input: TokenStream, f: F) -> TokenStream
where
    F: FnOnce(I) -> syn::Result<K>,
    I: Parse,
    K: ToTokens,
{
    expand(syn::parse(input).and_then(f))
}

fn expand<T>(result: syn::Result<T>) -> TokenStream
where
    T: ToTokens,
{
    match result {
        Ok(tokens) => {
            let tokens = tokens.into_token_stream();
            if var_os("MACROS_DEBUG").is_some() {
                eprintln!("{tokens}");
            }
            tokens.into()
        }
        Err(err) => err.into_compile_error().into(),
    }
}
