use proc_macro2::{Literal, Span, TokenStream};
use std::path::PathBuf;
use quote::{format_ident, quote};
use syn::{parse_quote, Ident, Path};
use tracing::debug;

use crate::{
    capability::{AccessorKind, Classification},
    injector_spec::{Assignment, InjectorSpec},
    symbol::DefaultValue,
};

const HEADER: &str = "// @generated by autowire-codegen. DO NOT EDIT.";

/// Rendered injector of one owner, ready for a [`crate::Writer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceUnit {
    /// Module path of the owner
    pub package: String,
    /// Name of the generated injector type
    pub name: String,
    pub owner: String,
    pub text: String,
}

impl SourceUnit {
    /// File name of the unit, the snake cased injector name.
    #[must_use]
    pub fn file_name(&self) -> String {
        let mut out = String::with_capacity(self.name.len() + 4);
        let chars = self.name.chars().collect::<Vec<_>>();
        for (i, &ch) in chars.iter().enumerate() {
            if ch.is_uppercase() && i > 0 {
                let prev = chars[i - 1];
                let next_lower = chars.get(i + 1).is_some_and(|next| next.is_lowercase());
                if prev.is_lowercase() || prev.is_ascii_digit() || (prev.is_uppercase() && next_lower) {
                    out.push('_');
                }
            }
            out.extend(ch.to_lowercase());
        }
        out.push_str(".rs");
        out
    }

    /// Path of the unit under an output directory: package segments after `crate` become
    /// directories, e.g. `ui/profile_autowired.rs` for `crate::ui::Profile`.
    #[must_use]
    pub fn relative_path(&self) -> PathBuf {
        let mut path = self
            .package
            .split("::")
            .filter(|segment| !segment.is_empty())
            .skip_while(|segment| *segment == "crate")
            .collect::<PathBuf>();
        path.push(self.file_name());
        path
    }
}

/// Renders [`InjectorSpec`]s into Rust source implementing the runtime's `Injector`.
#[derive(Debug, Clone)]
pub struct Emitter {
    runtime: Path,
}

impl Default for Emitter {
    fn default() -> Self {
        Self::new(parse_quote!(::autowire))
    }
}

/// Converts a literal to tokens, negative numbers as a negation of their magnitude.
fn default_tokens(accessor: AccessorKind, default: &DefaultValue) -> TokenStream {
    match default {
        DefaultValue::Bool(val) => quote! { #val },
        DefaultValue::Char(val) => {
            let lit = Literal::character(*val);
            quote! { #lit }
        }
        DefaultValue::Int(val) => {
            let lit = Literal::u128_unsuffixed(val.unsigned_abs());
            if val.is_negative() {
                quote! { -#lit }
            } else {
                quote! { #lit }
            }
        }
        DefaultValue::Float(val) => {
            let lit = match accessor {
                #[allow(clippy::cast_possible_truncation)]
                AccessorKind::Float => Literal::f32_unsuffixed(val.abs() as f32),
                _ => Literal::f64_unsuffixed(val.abs()),
            };
            if val.is_sign_negative() {
                quote! { -#lit }
            } else {
                quote! { #lit }
            }
        }
        DefaultValue::Str(val) => quote! { #val },
    }
}

impl Emitter {
    /// `runtime` is the path generated code reaches the runtime crate with, `::autowire` by default.
    #[inline]
    #[must_use]
    pub fn new(runtime: Path) -> Self {
        Self { runtime }
    }

    fn render_assignment(&self, assignment: &Assignment, owner_name: &str) -> TokenStream {
        let runtime = &self.runtime;
        let Assignment { field, classification } = assignment;
        let ident = &field.ident;
        let name = field.name();

        match classification {
            Classification::ServiceProvider { service, path } => {
                let resolve = match path {
                    Some(path) => quote! { target.#ident = #runtime::resolve_by_path::<#service>(#path); },
                    None => quote! { target.#ident = #runtime::resolve_by_type::<#service>(); },
                };
                if !field.required {
                    return resolve;
                }

                let site = field.site_hint();
                quote! {
                    #resolve
                    if target.#ident.is_none() {
                        return ::core::result::Result::Err(
                            #runtime::MissingServiceError::new(#name, #owner_name, #site).into()
                        );
                    }
                }
            }
            Classification::CarrierValue { accessor, default } => {
                let key = &field.key;
                let getter = Ident::new(accessor.getter(), Span::call_site());
                let extract = match default {
                    Some(default) => {
                        let default = default_tokens(*accessor, default);
                        quote! { target.#ident = target.carrier().#getter(#key, #default); }
                    }
                    None => quote! { target.#ident = target.carrier().#getter(#key); },
                };
                if !(field.required && *accessor == AccessorKind::String) {
                    return extract;
                }

                quote! {
                    #extract
                    if target.#ident.is_none() {
                        return ::core::result::Result::Err(#runtime::InjectError::MissingValue {
                            key: #key,
                            field: #name,
                            owner: #owner_name,
                        });
                    }
                }
            }
        }
    }

    /// # Errors
    /// Returns an error if the rendered tokens don't form a Rust file, e.g. the runtime path is malformed.
    pub fn render(&self, spec: &InjectorSpec) -> syn::Result<SourceUnit> {
        let runtime = &self.runtime;
        let owner = spec.owner.path();
        let owner_name = spec.owner.qualified_name();
        let injector = format_ident!("{}", spec.type_name);
        let doc = format!(" Injector of autowired fields of [`{owner_name}`].");

        let carrier_import = if spec.has_carrier_values() {
            quote! { use #runtime::CarrierHost as _; }
        } else {
            quote! {}
        };
        let statements = spec
            .assignments
            .iter()
            .map(|assignment| self.render_assignment(assignment, owner_name));

        let tokens = quote! {
            #[doc = #doc]
            #[derive(Default)]
            pub struct #injector;

            impl #runtime::Injector for #injector {
                fn inject(
                    &self,
                    target: &mut dyn ::core::any::Any,
                ) -> ::core::result::Result<(), #runtime::InjectError> {
                    #carrier_import

                    let ::core::option::Option::Some(target) = target.downcast_mut::<#owner>() else {
                        return ::core::result::Result::Err(#runtime::InjectError::TargetMismatch {
                            expected: #owner_name,
                        });
                    };
                    #( #statements )*
                    ::core::result::Result::Ok(())
                }
            }

            impl #runtime::Autowired for #owner {
                type Injector = #injector;
            }
        };

        let file = syn::parse2::<syn::File>(tokens)?;
        let text = format!("{HEADER}\n\n{}", prettyplease::unparse(&file));
        debug!(injector = %spec.type_name, owner = owner_name, "Rendered");

        Ok(SourceUnit {
            package: spec.package.clone(),
            name: spec.type_name.clone(),
            owner: owner_name.to_owned(),
            text,
        })
    }
}
