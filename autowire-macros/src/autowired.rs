use proc_macro2::TokenStream;
use syn::{Data, DeriveInput, Error, Fields, Lit, Visibility};

const ATTRIBUTE: &str = "autowired";

fn check_args(attr: &syn::Attribute) -> syn::Result<()> {
    if matches!(attr.meta, syn::Meta::Path(_)) {
        return Ok(());
    }

    let mut seen = vec![];
    attr.parse_nested_meta(|meta| {
        let Some(ident) = meta.path.get_ident() else {
            return Err(meta.error("expected `name`, `required`, `path` or `default`"));
        };
        let key = ident.to_string();
        if seen.contains(&key) {
            return Err(meta.error(format!("`{key}` is specified more than once")));
        }

        match key.as_str() {
            "name" | "path" => {
                let Lit::Str(value) = meta.value()?.parse::<Lit>()? else {
                    return Err(meta.error(format!("`{key}` expects a string literal")));
                };
                if value.value().is_empty() {
                    return Err(Error::new_spanned(value, "value can't be empty"));
                }
            }
            "required" => {
                meta.value()?.parse::<syn::LitBool>()?;
            }
            "default" => {
                meta.value()?.parse::<syn::Expr>()?;
            }
            _ => return Err(meta.error("expected `name`, `required`, `path` or `default`")),
        }
        seen.push(key);
        Ok(())
    })
}

pub(crate) fn expand(input: DeriveInput) -> syn::Result<TokenStream> {
    let Data::Struct(data) = &input.data else {
        return Err(Error::new_spanned(&input.ident, "`Autowired` can only be derived for structs"));
    };
    let Fields::Named(fields) = &data.fields else {
        return Err(Error::new_spanned(&input.ident, "`Autowired` requires a struct with named fields"));
    };

    let mut errors: Option<Error> = None;
    let mut push = |err: Error| {
        errors = Some(match errors.take() {
            Some(mut errors) => {
                errors.combine(err);
                errors
            }
            None => err,
        });
    };

    let annotated = fields
        .named
        .iter()
        .filter_map(|field| {
            let attrs = field.attrs.iter().filter(|attr| attr.path().is_ident(ATTRIBUTE)).collect::<Vec<_>>();
            let ident = field.ident.as_ref()?;
            (!attrs.is_empty()).then_some((field, ident, attrs))
        })
        .collect::<Vec<_>>();

    if !annotated.is_empty() && !input.generics.params.is_empty() {
        push(Error::new_spanned(&input.generics, "autowired fields can't be declared in a generic struct"));
    }

    for (field, ident, attrs) in annotated {
        if matches!(field.vis, Visibility::Inherited) {
            push(Error::new_spanned(
                ident,
                format!(
                    "The autowired fields can't be private, please check field [{ident}] in [{}]",
                    input.ident
                ),
            ));
        }
        for attr in attrs {
            if let Err(err) = check_args(attr) {
                push(err);
            }
        }
    }

    match errors {
        Some(errors) => Err(errors),
        None => Ok(TokenStream::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::expand;

    use syn::parse_quote;

    #[test]
    fn test_expand_valid() {
        let tokens = expand(parse_quote! {
            pub struct Profile {
                #[autowired]
                pub name: Option<String>,
                #[autowired(name = "years", default = -1)]
                pub(crate) age: i32,
                #[autowired(required = true, path = "/service/hello")]
                pub hello: Option<std::sync::Arc<dyn HelloService>>,
                untouched: u8,
            }
        })
        .unwrap();

        assert!(tokens.is_empty());
    }

    #[test]
    fn test_expand_private_field() {
        let err = expand(parse_quote! {
            pub struct Profile {
                #[autowired]
                name: Option<String>,
            }
        })
        .unwrap_err();

        assert_eq!(
            err.to_string(),
            "The autowired fields can't be private, please check field [name] in [Profile]"
        );
    }

    #[test]
    fn test_expand_invalid_arguments() {
        let err = expand(parse_quote! {
            pub struct Profile {
                #[autowired(key = "name")]
                pub name: Option<String>,
            }
        })
        .unwrap_err();
        assert!(err.to_string().contains("expected `name`"));

        let err = expand(parse_quote! {
            pub struct Profile {
                #[autowired(name = "a", name = "b")]
                pub name: Option<String>,
            }
        })
        .unwrap_err();
        assert!(err.to_string().contains("more than once"));

        let err = expand(parse_quote! {
            pub struct Profile {
                #[autowired(name = "")]
                pub name: Option<String>,
            }
        })
        .unwrap_err();
        assert_eq!(err.to_string(), "value can't be empty");
    }

    #[test]
    fn test_expand_unsupported_items() {
        assert!(expand(parse_quote! { pub struct Tuple(pub i32); }).is_err());
        assert!(expand(parse_quote! { pub enum Kind { A } }).is_err());
        assert!(expand(parse_quote! {
            pub struct Holder<T> {
                #[autowired]
                pub age: i32,
                pub value: T,
            }
        })
        .is_err());
    }
}
