use syn::{
    parse::{Parse, ParseStream},
    Attribute, Expr, ExprLit, ExprUnary, Lit, LitBool, LitStr, Token, UnOp,
};

use crate::{
    attr_parsing::{combine_attribute, parse_assignment_attribute, parse_attrs, Combine},
    symbol::{AutowiredArgs, DefaultValue},
};

pub(crate) const ATTRIBUTE: &str = "autowired";

pub(crate) mod kw {
    syn::custom_keyword!(name);
    syn::custom_keyword!(required);
    syn::custom_keyword!(path);
    syn::custom_keyword!(default);
}

#[derive(Default)]
pub(crate) struct AutowiredAttr {
    name: Option<(kw::name, LitStr)>,
    required: Option<(kw::required, LitBool)>,
    path: Option<(kw::path, LitStr)>,
    default: Option<(kw::default, Expr)>,
}

impl Parse for AutowiredAttr {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut args = Self::default();

        while !input.is_empty() {
            let lh = input.lookahead1();
            if lh.peek(kw::name) {
                parse_assignment_attribute(input, &mut args.name)?;
            } else if lh.peek(kw::required) {
                parse_assignment_attribute(input, &mut args.required)?;
            } else if lh.peek(kw::path) {
                parse_assignment_attribute(input, &mut args.path)?;
            } else if lh.peek(kw::default) {
                parse_assignment_attribute(input, &mut args.default)?;
            } else {
                return Err(lh.error());
            }

            if !input.is_empty() {
                input.parse::<Token![,]>()?;
            }
        }

        Ok(args)
    }
}

impl Combine for AutowiredAttr {
    fn combine(mut self, other: Self) -> syn::Result<Self> {
        let Self {
            name,
            required,
            path,
            default,
        } = other;
        combine_attribute(&mut self.name, name)?;
        combine_attribute(&mut self.required, required)?;
        combine_attribute(&mut self.path, path)?;
        combine_attribute(&mut self.default, default)?;
        Ok(self)
    }
}

fn non_empty(value: Option<(impl Sized, LitStr)>) -> syn::Result<Option<String>> {
    match value {
        Some((_, lit)) if lit.value().is_empty() => Err(syn::Error::new_spanned(lit, "value can't be empty")),
        Some((_, lit)) => Ok(Some(lit.value())),
        None => Ok(None),
    }
}

impl AutowiredAttr {
    fn into_args(self) -> syn::Result<AutowiredArgs> {
        Ok(AutowiredArgs {
            name: non_empty(self.name)?,
            required: self.required.is_some_and(|(_, lit)| lit.value),
            path: non_empty(self.path)?,
            default: self.default.map(|(_, expr)| parse_default(&expr)).transpose()?,
        })
    }
}

fn parse_literal(lit: &Lit, negative: bool) -> syn::Result<DefaultValue> {
    match lit {
        Lit::Int(int) => {
            let val = int.base10_parse::<i128>()?;
            Ok(DefaultValue::Int(if negative { -val } else { val }))
        }
        Lit::Float(float) => {
            let val = float.base10_parse::<f64>()?;
            Ok(DefaultValue::Float(if negative { -val } else { val }))
        }
        Lit::Bool(val) if !negative => Ok(DefaultValue::Bool(val.value)),
        Lit::Char(val) if !negative => Ok(DefaultValue::Char(val.value())),
        Lit::Str(val) if !negative => Ok(DefaultValue::Str(val.value())),
        _ => Err(syn::Error::new_spanned(lit, "expected a bool, number, char or string literal")),
    }
}

pub(crate) fn parse_default(expr: &Expr) -> syn::Result<DefaultValue> {
    match expr {
        Expr::Lit(ExprLit { lit, .. }) => parse_literal(lit, false),
        Expr::Unary(ExprUnary {
            op: UnOp::Neg(_), expr, ..
        }) => match expr.as_ref() {
            Expr::Lit(ExprLit { lit, .. }) => parse_literal(lit, true),
            _ => Err(syn::Error::new_spanned(expr, "expected a number literal")),
        },
        _ => Err(syn::Error::new_spanned(expr, "expected a literal")),
    }
}

pub(crate) fn parse_field_attrs(attrs: &[Attribute]) -> Option<syn::Result<AutowiredArgs>> {
    parse_attrs::<AutowiredAttr>(ATTRIBUTE, attrs).map(|result| {
        result
            .map_err(|(err, attr)| syn::Error::new_spanned(attr, err))
            .and_then(AutowiredAttr::into_args)
    })
}

#[cfg(test)]
mod tests {
    use super::{parse_default, parse_field_attrs};
    use crate::symbol::{AutowiredArgs, DefaultValue};

    use syn::{parse_quote, Attribute, Expr};

    fn attrs(field: syn::Field) -> Vec<Attribute> {
        field.attrs
    }

    #[test]
    fn test_bare_attribute() {
        let field = parse_quote! {
            #[autowired]
            pub name: Option<String>
        };
        let args = parse_field_attrs(&attrs(field)).unwrap().unwrap();

        assert_eq!(args, AutowiredArgs::default());
    }

    #[test]
    fn test_not_annotated() {
        let field = parse_quote! {
            #[serde(default)]
            pub name: Option<String>
        };

        assert!(parse_field_attrs(&attrs(field)).is_none());
    }

    #[test]
    fn test_all_arguments() {
        let field = parse_quote! {
            #[autowired(name = "sex", required = true, path = "/service/hello", default = true)]
            pub boy: bool
        };
        let args = parse_field_attrs(&attrs(field)).unwrap().unwrap();

        assert_eq!(
            args,
            AutowiredArgs {
                name: Some("sex".into()),
                required: true,
                path: Some("/service/hello".into()),
                default: Some(DefaultValue::Bool(true)),
            }
        );
    }

    #[test]
    fn test_combined_attributes() {
        let field = parse_quote! {
            #[autowired(name = "age")]
            #[autowired(default = -3,)]
            pub age: i32
        };
        let args = parse_field_attrs(&attrs(field)).unwrap().unwrap();

        assert_eq!(args.name.as_deref(), Some("age"));
        assert_eq!(args.default, Some(DefaultValue::Int(-3)));
    }

    #[test]
    fn test_duplicated_argument() {
        let field = parse_quote! {
            #[autowired(name = "a", name = "b")]
            pub age: i32
        };
        let err = parse_field_attrs(&attrs(field)).unwrap().unwrap_err();
        assert!(err.to_string().contains("specified more than once"));

        let field = parse_quote! {
            #[autowired(required = true)]
            #[autowired(required = false)]
            pub age: i32
        };
        assert!(parse_field_attrs(&attrs(field)).unwrap().is_err());
    }

    #[test]
    fn test_unknown_argument() {
        let field = parse_quote! {
            #[autowired(desc = "age")]
            pub age: i32
        };

        assert!(parse_field_attrs(&attrs(field)).unwrap().is_err());
    }

    #[test]
    fn test_empty_name() {
        let field = parse_quote! {
            #[autowired(name = "")]
            pub age: i32
        };

        assert!(parse_field_attrs(&attrs(field)).unwrap().is_err());
    }

    #[test]
    fn test_parse_default() {
        let cases: [(Expr, DefaultValue); 5] = [
            (parse_quote!(7), DefaultValue::Int(7)),
            (parse_quote!(-1.5), DefaultValue::Float(-1.5)),
            (parse_quote!('x'), DefaultValue::Char('x')),
            (parse_quote!(false), DefaultValue::Bool(false)),
            (parse_quote!("name"), DefaultValue::Str("name".into())),
        ];
        for (expr, expected) in cases {
            assert_eq!(parse_default(&expr).unwrap(), expected);
        }

        assert!(parse_default(&parse_quote!(-true)).is_err());
        assert!(parse_default(&parse_quote!(i32::MAX)).is_err());
    }
}
