//! Generic type parameter handling and trait bound management.
//!
//! Bounds are added only for generics that appear in described fields.
//!
//! ## PhantomData Handling
//!
//! `PhantomData<T>` fields are skipped when collecting generics, so
//!
//! ```ignore
//! struct Tagged<T> {
//!     #[pii]
//!     value: String,
//!     _marker: PhantomData<T>,
//! }
//! ```
//!
//! does not require `T: Field`.

use syn::{parse_quote, Ident};

use crate::crate_path;

pub(crate) fn collect_generics_from_type(
    ty: &syn::Type,
    generics: &syn::Generics,
    result: &mut Vec<Ident>,
) {
    let syn::Type::Path(path) = ty else {
        return;
    };
    let Some(segment) = path.path.segments.last() else {
        return;
    };
    if segment.ident == "PhantomData" {
        return;
    }

    if let syn::PathArguments::AngleBracketed(args) = &segment.arguments {
        for arg in &args.args {
            if let syn::GenericArgument::Type(inner_ty) = arg {
                collect_generics_from_type(inner_ty, generics, result);
            }
        }
    }

    for param in generics.type_params() {
        if segment.ident == param.ident && !result.iter().any(|g| g == &param.ident) {
            result.push(param.ident.clone());
        }
    }
}

/// Adds `Field` bounds to generic parameters used in described fields.
pub(crate) fn add_field_bounds(mut generics: syn::Generics, used_generics: &[Ident]) -> syn::Generics {
    for param in generics.type_params_mut() {
        if used_generics.iter().any(|g| g == &param.ident) {
            let field_path = crate_path("Field");
            param.bounds.push(parse_quote!(#field_path));
        }
    }
    generics
}

pub(crate) fn add_debug_bounds(mut generics: syn::Generics, used_generics: &[Ident]) -> syn::Generics {
    for param in generics.type_params_mut() {
        if used_generics.iter().any(|g| g == &param.ident) {
            param.bounds.push(parse_quote!(::core::fmt::Debug));
        }
    }
    generics
}
