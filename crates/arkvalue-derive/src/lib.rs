//! Procedural macros for the arkvalue user type system.
//!
//! Provides `#[derive(UserType)]` to auto-generate `UserType` implementations
//! for Rust types, so they can be stored in the `User` arm of a value.
//!
//! # Auto-detected trait impls
//!
//! Use `#[user_impl(...)]` on the type to declare which Rust traits back the
//! value hooks:
//! - `Display` → `user_fmt`
//! - `PartialEq` → `user_eq`
//! - `PartialOrd` → `user_lt`
//!
//! Hooks that are not declared keep the trait defaults (identity equality,
//! never-less ordering, `<TypeName>` rendering).
//!
//! # Other attributes
//!
//! - `#[user(name = "...")]` — type name reported by `type_name`
//! - `#[user(truthy = "method")]` — a `fn(&self) -> bool` used as `user_truthy`
//!
//! The type must implement `Clone`; `clone_boxed` is built on it.
//!
//! # Example
//!
//! ```ignore
//! use arkvalue::UserType;
//!
//! #[derive(UserType, Clone, PartialEq, PartialOrd)]
//! #[user_impl(Display, PartialEq, PartialOrd)]
//! #[user(truthy = "is_nonzero")]
//! struct Vec2 {
//!     x: f64,
//!     y: f64,
//! }
//! ```

use proc_macro::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, LitStr, Meta, parse_macro_input};

/// Derive `arkvalue::UserType` for a struct or enum.
#[proc_macro_derive(UserType, attributes(user, user_impl))]
pub fn derive_user_type(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;

    if let Data::Union(_) = &input.data {
        return syn::Error::new_spanned(&input.ident, "UserType cannot be derived for unions")
            .to_compile_error()
            .into();
    }

    // Parse #[user_impl(...)] attribute for trait detection
    let trait_impls = parse_user_impl_attrs(&input);

    let options = match parse_user_attrs(&input) {
        Ok(options) => options,
        Err(err) => return err.to_compile_error().into(),
    };

    let type_name_str = options.name.unwrap_or_else(|| name.to_string());

    // Generate hook impls based on #[user_impl(...)]
    let fmt_impl = if trait_impls.iter().any(|t| t == "Display") {
        quote! {
            fn user_fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                ::std::fmt::Display::fmt(self, f)
            }
        }
    } else {
        quote! {}
    };

    let eq_impl = if trait_impls.iter().any(|t| t == "PartialEq") {
        quote! {
            fn user_eq(&self, other: &dyn arkvalue::UserType) -> bool {
                other.as_any().downcast_ref::<Self>().is_some_and(|o| self == o)
            }
        }
    } else {
        quote! {}
    };

    let ord_impl = if trait_impls.iter().any(|t| t == "PartialOrd") {
        quote! {
            fn user_lt(&self, other: &dyn arkvalue::UserType) -> bool {
                other.as_any().downcast_ref::<Self>()
                    .and_then(|o| ::std::cmp::PartialOrd::partial_cmp(self, o))
                    .is_some_and(|c| c == ::std::cmp::Ordering::Less)
            }
        }
    } else {
        quote! {}
    };

    let truthy_impl = match &options.truthy {
        Some(method) => quote! {
            fn user_truthy(&self) -> bool {
                self.#method()
            }
        },
        None => quote! {},
    };

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let expanded = quote! {
        impl #impl_generics arkvalue::UserType for #name #ty_generics #where_clause {
            fn type_name(&self) -> &'static str {
                #type_name_str
            }

            #fmt_impl
            #eq_impl
            #ord_impl
            #truthy_impl

            fn clone_boxed(&self) -> ::std::boxed::Box<dyn arkvalue::UserType> {
                ::std::boxed::Box::new(::std::clone::Clone::clone(self))
            }

            fn as_any(&self) -> &dyn ::std::any::Any {
                self
            }

            fn as_any_mut(&mut self) -> &mut dyn ::std::any::Any {
                self
            }
        }
    };

    expanded.into()
}

// ==================== Internal types ====================

#[derive(Default)]
struct UserOptions {
    name: Option<String>,
    truthy: Option<syn::Ident>,
}

// ==================== Attribute parsing ====================

/// Parse `#[user_impl(Display, PartialEq, PartialOrd, ...)]` attributes
fn parse_user_impl_attrs(input: &DeriveInput) -> Vec<String> {
    let mut impls = Vec::new();
    for attr in &input.attrs {
        if attr.path().is_ident("user_impl") {
            if let Meta::List(list) = &attr.meta {
                let _ = list.parse_nested_meta(|meta| {
                    if let Some(ident) = meta.path.get_ident() {
                        impls.push(ident.to_string());
                    }
                    Ok(())
                });
            }
        }
    }
    impls
}

/// Parse `#[user(name = "...", truthy = "...")]` attributes
fn parse_user_attrs(input: &DeriveInput) -> syn::Result<UserOptions> {
    let mut options = UserOptions::default();
    for attr in &input.attrs {
        if !attr.path().is_ident("user") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                let lit: LitStr = meta.value()?.parse()?;
                options.name = Some(lit.value());
                Ok(())
            } else if meta.path.is_ident("truthy") {
                let lit: LitStr = meta.value()?.parse()?;
                options.truthy = Some(syn::Ident::new(&lit.value(), lit.span()));
                Ok(())
            } else {
                Err(meta.error("unsupported user attribute, expected `name` or `truthy`"))
            }
        })?;
    }
    Ok(options)
}
