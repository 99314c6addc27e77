//! Derive macros for `zeropii`.
//!
//! This crate generates the schema and traversal code behind
//! `#[derive(Aggregate)]`. It:
//! - reads `#[pii(...)]` field attributes
//! - emits an `Aggregate` implementation (`describe()` + `walk()`)
//! - emits a `Field` implementation so the struct can be nested or sequenced
//! - emits a `Debug` implementation that hides sensitive fields
//!
//! It does **not** define sensitivity kinds, ciphers or masking rules. Those
//! live in the main `zeropii` crate and are applied at runtime.

// <https://doc.rust-lang.org/rustc/lints/listing/allowed-by-default.html>
#![warn(
    anonymous_parameters,
    bare_trait_objects,
    elided_lifetimes_in_paths,
    missing_copy_implementations,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unsafe_code,
    unused_extern_crates,
    unused_import_braces
)]
// <https://rust-lang.github.io/rust-clippy/stable>
#![warn(
    clippy::all,
    clippy::cargo,
    clippy::dbg_macro,
    clippy::float_cmp_const,
    clippy::get_unwrap,
    clippy::mem_forget,
    clippy::nursery,
    clippy::pedantic,
    clippy::todo,
    clippy::unwrap_used,
    clippy::uninlined_format_args
)]
// Allow some clippy lints
#![allow(
    clippy::default_trait_access,
    clippy::doc_markdown,
    clippy::module_name_repetitions,
    clippy::multiple_crate_versions,
    clippy::must_use_candidate,
    clippy::needless_pass_by_value,
    clippy::cargo_common_metadata,
    clippy::missing_errors_doc,
    clippy::missing_const_for_fn,
    clippy::redundant_pub_crate,
    clippy::option_if_let_else
)]
// Allow some lints while testing
#![cfg_attr(test, allow(clippy::unwrap_used))]

#[allow(unused_extern_crates)]
extern crate proc_macro;

use proc_macro2::TokenStream;
use proc_macro_crate::{crate_name, FoundCrate};
use quote::{format_ident, quote};
use syn::{ext::IdentExt, parse_macro_input, spanned::Spanned, Data, DeriveInput, Result};

mod container;
mod derive_struct;
mod generics;
mod strategy;
mod transform;
mod types;
use container::{parse_container_options, ContainerOptions};
use derive_struct::derive_struct;
use generics::{add_debug_bounds, add_field_bounds};

/// Derives `zeropii::Aggregate` and `zeropii::Field` for structs.
///
/// # Container Attributes
///
/// - `#[pii(skip_debug)]` - Opt out of `Debug` impl generation.
///
/// # Field Attributes
///
/// - **No annotation**: The field is not sensitive. Its shape comes from its
///   `Field` impl: strings and scalars are left alone, nested aggregates,
///   `Option`s and `Vec`s of aggregates are walked. The field type must
///   implement `zeropii::Field`.
///
/// - `#[pii]`: The field carries generic PII. It must be a string field
///   (`String`, `Option<String>`, `Box<String>`); anything else is a schema
///   error reported before traversal. Known scalars are rejected at compile
///   time.
///
/// - `#[pii(Classification)]`: As `#[pii]`, with the semantic kind taken from
///   the classification marker (`Email`, `PhoneNumber`, `DocumentNumber`,
///   `DateOfBirth`, or your own `Classification` impl).
///
/// - `#[pii(skip)]`: The field is opaque. Use this for foreign types that do
///   not implement `Field`.
///
/// Enums and unions are rejected at compile time.
///
/// # Additional Generated Impls
///
/// - `Debug`: when *not* building with `cfg(any(test, feature = "testing"))`,
///   sensitive fields are formatted as `"[REDACTED]"`. Use
///   `#[pii(skip_debug)]` on the container to opt out.
#[proc_macro_derive(Aggregate, attributes(pii))]
pub fn derive_aggregate(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.into_compile_error().into(),
    }
}

/// Returns the token stream to reference the zeropii crate root.
///
/// Handles crate renaming (e.g., `pii = { package = "zeropii", ... }`).
/// Inside zeropii itself the crate refers to itself through
/// `extern crate self as zeropii`, so the absolute path still resolves.
fn crate_root() -> TokenStream {
    match crate_name("zeropii") {
        Ok(FoundCrate::Name(name)) => {
            let ident = format_ident!("{}", name);
            quote! { ::#ident }
        }
        Ok(FoundCrate::Itself) | Err(_) => quote! { ::zeropii },
    }
}

fn crate_path(item: &str) -> TokenStream {
    let root = crate_root();
    let item_ident = syn::parse_str::<syn::Path>(item).expect("zeropii crate path should parse");
    quote! { #root::#item_ident }
}

fn expand(input: DeriveInput) -> Result<TokenStream> {
    let DeriveInput {
        ident,
        generics,
        data,
        attrs,
        ..
    } = input;

    let ContainerOptions { skip_debug } = parse_container_options(&attrs)?;

    let root = crate_root();

    let output = match data {
        Data::Struct(data) => derive_struct(&ident, data, &generics)?,
        Data::Enum(e) => {
            return Err(syn::Error::new(
                e.enum_token.span(),
                "`Aggregate` cannot be derived for enums: an aggregate has a fixed set of fields",
            ));
        }
        Data::Union(u) => {
            return Err(syn::Error::new(
                u.union_token.span(),
                "`Aggregate` cannot be derived for unions",
            ));
        }
    };

    let field_generics = add_field_bounds(generics.clone(), &output.used_generics);
    let (impl_generics, ty_generics, where_clause) = field_generics.split_for_impl();
    let debug_redacted_generics = add_debug_bounds(generics.clone(), &output.debug_redacted_generics);
    let (debug_redacted_impl_generics, debug_redacted_ty_generics, debug_redacted_where_clause) =
        debug_redacted_generics.split_for_impl();
    let debug_unredacted_generics = add_debug_bounds(generics, &output.debug_unredacted_generics);
    let (
        debug_unredacted_impl_generics,
        debug_unredacted_ty_generics,
        debug_unredacted_where_clause,
    ) = debug_unredacted_generics.split_for_impl();

    let descriptors = &output.descriptors;
    let walks = &output.walks;
    let debug_redacted_body = &output.debug_redacted_body;
    let debug_unredacted_body = &output.debug_unredacted_body;
    let owner = ident.unraw().to_string();

    let debug_impl = if skip_debug {
        quote! {}
    } else {
        quote! {
            #[cfg(any(test, feature = "testing"))]
            impl #debug_unredacted_impl_generics ::core::fmt::Debug for #ident #debug_unredacted_ty_generics #debug_unredacted_where_clause {
                fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                    #debug_unredacted_body
                }
            }

            #[cfg(not(any(test, feature = "testing")))]
            #[allow(unused_variables)]
            impl #debug_redacted_impl_generics ::core::fmt::Debug for #ident #debug_redacted_ty_generics #debug_redacted_where_clause {
                fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                    #debug_redacted_body
                }
            }
        }
    };

    Ok(quote! {
        impl #impl_generics #root::Aggregate for #ident #ty_generics #where_clause {
            fn describe() -> #root::Schema {
                #root::Schema::new(
                    #owner,
                    ::core::any::type_name::<Self>(),
                    ::std::vec![#(#descriptors),*],
                )
            }

            #[allow(unused_variables)]
            fn walk<V: #root::FieldVisitor>(
                &mut self,
                visitor: &mut V,
            ) -> ::core::result::Result<(), V::Error> {
                #(#walks)*
                ::core::result::Result::Ok(())
            }
        }

        impl #impl_generics #root::Field for #ident #ty_generics #where_clause {
            fn shape() -> #root::FieldShape {
                #root::FieldShape::Nested(<Self as #root::Aggregate>::describe)
            }

            fn walk_field<V: #root::FieldVisitor>(
                &mut self,
                visitor: &mut V,
            ) -> ::core::result::Result<(), V::Error> {
                <Self as #root::Aggregate>::walk(self, visitor)
            }
        }

        #debug_impl
    })
}
