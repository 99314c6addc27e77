//! Struct-specific `Aggregate` derivation.
//!
//! This module generates the schema, the traversal and the PII-safe `Debug`
//! body for struct fields, and collects generic parameters that require
//! trait bounds.

use proc_macro2::{Ident, TokenStream};
use quote::{format_ident, quote, quote_spanned};
use syn::{ext::IdentExt, spanned::Spanned, DataStruct, Fields, Index, Result};

use crate::{
    strategy::parse_field_strategy,
    transform::{generate_field, DeriveContext},
};

pub(crate) struct StructDeriveOutput {
    pub(crate) descriptors: Vec<TokenStream>,
    pub(crate) walks: Vec<TokenStream>,
    pub(crate) used_generics: Vec<Ident>,
    pub(crate) debug_redacted_body: TokenStream,
    pub(crate) debug_redacted_generics: Vec<Ident>,
    pub(crate) debug_unredacted_body: TokenStream,
    pub(crate) debug_unredacted_generics: Vec<Ident>,
}

#[derive(Default)]
struct Collected {
    descriptors: Vec<TokenStream>,
    walks: Vec<TokenStream>,
    used_generics: Vec<Ident>,
    debug_redacted_fields: Vec<TokenStream>,
    debug_unredacted_fields: Vec<TokenStream>,
    debug_redacted_generics: Vec<Ident>,
    debug_unredacted_generics: Vec<Ident>,
}

pub(crate) fn derive_struct(
    name: &Ident,
    data: DataStruct,
    generics: &syn::Generics,
) -> Result<StructDeriveOutput> {
    match data.fields {
        Fields::Named(fields) => derive_named_struct(name, fields, generics),
        Fields::Unnamed(fields) => derive_unnamed_struct(name, fields, generics),
        Fields::Unit => Ok(StructDeriveOutput {
            descriptors: Vec::new(),
            walks: Vec::new(),
            used_generics: Vec::new(),
            debug_redacted_body: quote! { f.write_str(stringify!(#name)) },
            debug_redacted_generics: Vec::new(),
            debug_unredacted_body: quote! { f.write_str(stringify!(#name)) },
            debug_unredacted_generics: Vec::new(),
        }),
    }
}

fn derive_named_struct(
    name: &Ident,
    fields: syn::FieldsNamed,
    generics: &syn::Generics,
) -> Result<StructDeriveOutput> {
    let owner = name.unraw().to_string();
    let mut collected = Collected::default();
    let mut bindings = Vec::new();

    let mut ctx = DeriveContext {
        generics,
        owner: &owner,
        used_generics: &mut collected.used_generics,
        debug_redacted_generics: &mut collected.debug_redacted_generics,
        debug_unredacted_generics: &mut collected.debug_unredacted_generics,
    };

    for field in fields.named {
        let span = field.span();
        let strategy = parse_field_strategy(&field.attrs)?;
        let Some(ident) = field.ident else {
            return Err(syn::Error::new(span, "named field should have an identifier"));
        };
        let field_name = ident.unraw().to_string();
        let access = quote! { self.#ident };
        let tokens = generate_field(&mut ctx, &field.ty, &access, &field_name, span, &strategy)?;

        let debug_redacted_field = if tokens.is_sensitive {
            quote_spanned! { span =>
                debug.field(#field_name, &"[REDACTED]");
            }
        } else {
            quote_spanned! { span =>
                debug.field(#field_name, #ident);
            }
        };
        let debug_unredacted_field = quote_spanned! { span =>
            debug.field(#field_name, #ident);
        };

        collected.descriptors.push(tokens.descriptor);
        collected.walks.push(tokens.walk);
        collected.debug_redacted_fields.push(debug_redacted_field);
        collected.debug_unredacted_fields.push(debug_unredacted_field);
        bindings.push(ident);
    }

    let Collected {
        descriptors,
        walks,
        used_generics,
        debug_redacted_fields,
        debug_unredacted_fields,
        debug_redacted_generics,
        debug_unredacted_generics,
    } = collected;

    Ok(StructDeriveOutput {
        descriptors,
        walks,
        used_generics,
        debug_redacted_body: quote! {
            match self {
                Self { #(#bindings),* } => {
                    let mut debug = f.debug_struct(stringify!(#name));
                    #(#debug_redacted_fields)*
                    debug.finish()
                }
            }
        },
        debug_redacted_generics,
        debug_unredacted_body: quote! {
            match self {
                Self { #(#bindings),* } => {
                    let mut debug = f.debug_struct(stringify!(#name));
                    #(#debug_unredacted_fields)*
                    debug.finish()
                }
            }
        },
        debug_unredacted_generics,
    })
}

fn derive_unnamed_struct(
    name: &Ident,
    fields: syn::FieldsUnnamed,
    generics: &syn::Generics,
) -> Result<StructDeriveOutput> {
    let owner = name.unraw().to_string();
    let mut collected = Collected::default();
    let mut bindings = Vec::new();

    let mut ctx = DeriveContext {
        generics,
        owner: &owner,
        used_generics: &mut collected.used_generics,
        debug_redacted_generics: &mut collected.debug_redacted_generics,
        debug_unredacted_generics: &mut collected.debug_unredacted_generics,
    };

    for (index, field) in fields.unnamed.into_iter().enumerate() {
        let span = field.span();
        let strategy = parse_field_strategy(&field.attrs)?;
        let binding = format_ident!("field_{index}");
        let member = Index::from(index);
        let field_name = index.to_string();
        let access = quote! { self.#member };
        let tokens = generate_field(&mut ctx, &field.ty, &access, &field_name, span, &strategy)?;

        let debug_redacted_field = if tokens.is_sensitive {
            quote_spanned! { span =>
                debug.field(&"[REDACTED]");
            }
        } else {
            quote_spanned! { span =>
                debug.field(#binding);
            }
        };
        let debug_unredacted_field = quote_spanned! { span =>
            debug.field(#binding);
        };

        collected.descriptors.push(tokens.descriptor);
        collected.walks.push(tokens.walk);
        collected.debug_redacted_fields.push(debug_redacted_field);
        collected.debug_unredacted_fields.push(debug_unredacted_field);
        bindings.push(binding);
    }

    let Collected {
        descriptors,
        walks,
        used_generics,
        debug_redacted_fields,
        debug_unredacted_fields,
        debug_redacted_generics,
        debug_unredacted_generics,
    } = collected;

    Ok(StructDeriveOutput {
        descriptors,
        walks,
        used_generics,
        debug_redacted_body: quote! {
            match self {
                Self ( #(#bindings),* ) => {
                    let mut debug = f.debug_tuple(stringify!(#name));
                    #(#debug_redacted_fields)*
                    debug.finish()
                }
            }
        },
        debug_redacted_generics,
        debug_unredacted_body: quote! {
            match self {
                Self ( #(#bindings),* ) => {
                    let mut debug = f.debug_tuple(stringify!(#name));
                    #(#debug_unredacted_fields)*
                    debug.finish()
                }
            }
        },
        debug_unredacted_generics,
    })
}
