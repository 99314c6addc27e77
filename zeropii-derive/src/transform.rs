//! Per-field code generation shared by named and tuple structs.
//!
//! Every field yields two pieces of generated code: its entry in the
//! `describe()` schema and its step in `walk()`. Both are emitted in
//! declaration order so the schema and the walk always agree.

use proc_macro2::{Ident, Span, TokenStream};
use quote::quote_spanned;
use syn::Result;

use crate::{crate_root, generics::collect_generics_from_type, strategy::Strategy, types::is_scalar_type};

/// Accumulated state during field processing.
pub(crate) struct DeriveContext<'a> {
    pub(crate) generics: &'a syn::Generics,
    /// Struct name as written, used in schema errors.
    pub(crate) owner: &'a str,
    pub(crate) used_generics: &'a mut Vec<Ident>,
    pub(crate) debug_redacted_generics: &'a mut Vec<Ident>,
    pub(crate) debug_unredacted_generics: &'a mut Vec<Ident>,
}

pub(crate) struct FieldTokens {
    pub(crate) descriptor: TokenStream,
    pub(crate) walk: TokenStream,
    pub(crate) is_sensitive: bool,
}

/// Generates the descriptor and walk step for a single field.
///
/// | Annotation | Descriptor | Walk |
/// |------------|------------|------|
/// | None | `plain`, shape from `Field` | `walk_field` (no-op for strings and scalars) |
/// | `#[pii]` / `#[pii(Class)]` | `sensitive`, shape from `Field` | `visit_sensitive` |
/// | `#[pii(skip)]` | `plain`, `Opaque` | nothing |
pub(crate) fn generate_field(
    ctx: &mut DeriveContext<'_>,
    ty: &syn::Type,
    access: &TokenStream,
    name: &str,
    span: Span,
    strategy: &Strategy,
) -> Result<FieldTokens> {
    let root = crate_root();
    let owner = ctx.owner;

    match strategy {
        Strategy::Structural => {
            collect_generics_from_type(ty, ctx.generics, ctx.used_generics);
            collect_generics_from_type(ty, ctx.generics, ctx.debug_redacted_generics);
            collect_generics_from_type(ty, ctx.generics, ctx.debug_unredacted_generics);
            Ok(FieldTokens {
                descriptor: quote_spanned! { span =>
                    #root::FieldDescriptor::plain(#name, <#ty as #root::Field>::shape())
                },
                walk: quote_spanned! { span =>
                    #root::__private::walk_field(&mut #access, #name, visitor)?;
                },
                is_sensitive: false,
            })
        }
        Strategy::Sensitive(classification) => {
            if is_scalar_type(ty) {
                return Err(syn::Error::new(
                    span,
                    "scalar fields cannot carry PII: only string fields can be \
                    encrypted or masked. Remove #[pii] from this field.",
                ));
            }
            collect_generics_from_type(ty, ctx.generics, ctx.used_generics);
            collect_generics_from_type(ty, ctx.generics, ctx.debug_unredacted_generics);
            let kind = match classification {
                Some(path) => quote_spanned! { span =>
                    <#path as #root::Classification>::KIND
                },
                None => quote_spanned! { span =>
                    #root::SensitivityKind::GenericPii
                },
            };
            Ok(FieldTokens {
                descriptor: quote_spanned! { span =>
                    #root::FieldDescriptor::sensitive(#name, #kind, <#ty as #root::Field>::shape())
                },
                walk: quote_spanned! { span =>
                    #root::__private::visit_sensitive(&mut #access, #owner, #name, #kind, visitor)?;
                },
                is_sensitive: true,
            })
        }
        Strategy::Skip => {
            collect_generics_from_type(ty, ctx.generics, ctx.debug_redacted_generics);
            collect_generics_from_type(ty, ctx.generics, ctx.debug_unredacted_generics);
            Ok(FieldTokens {
                descriptor: quote_spanned! { span =>
                    #root::FieldDescriptor::plain(#name, #root::FieldShape::Opaque)
                },
                walk: TokenStream::new(),
                is_sensitive: false,
            })
        }
    }
}
