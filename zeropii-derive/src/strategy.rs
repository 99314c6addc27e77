//! Parsing of `#[pii(...)]` field attributes.
//!
//! This module maps attribute syntax to traversal decisions and produces
//! structured errors for invalid forms.

use proc_macro2::Span;
use syn::{spanned::Spanned, Attribute, Meta, Result};

/// Field handling strategy based on `#[pii(...)]` attributes.
///
/// ## Strategy Mapping
///
/// | Attribute | Strategy | Behavior |
/// |-----------|----------|----------|
/// | None | `Structural` | Described by shape; nested aggregates are walked |
/// | `#[pii]` | `Sensitive(None)` | Sensitive leaf, generic PII |
/// | `#[pii(Class)]` | `Sensitive(Some(Class))` | Sensitive leaf of the marker's kind |
/// | `#[pii(skip)]` | `Skip` | Opaque, never described or walked |
#[derive(Clone, Debug)]
pub(crate) enum Strategy {
    /// No annotation.
    ///
    /// The field's shape comes from its `Field` impl. Strings and scalars are
    /// inert, aggregates and sequences of aggregates are walked.
    Structural,
    /// `#[pii]` or `#[pii(Classification)]`: the field carries PII.
    ///
    /// `None` means the kind defaults to generic PII.
    Sensitive(Option<syn::Path>),
    /// `#[pii(skip)]`: foreign types that do not implement `Field`
    /// (e.g. a third-party timestamp) pass through as opaque values.
    Skip,
}

fn set_strategy(target: &mut Option<Strategy>, next: Strategy, span: Span) -> Result<()> {
    if target.is_some() {
        return Err(syn::Error::new(
            span,
            "multiple #[pii] attributes specified on the same field",
        ));
    }
    *target = Some(next);
    Ok(())
}

pub(crate) fn parse_field_strategy(attrs: &[Attribute]) -> Result<Strategy> {
    let mut strategy: Option<Strategy> = None;
    for attr in attrs {
        if !attr.path().is_ident("pii") {
            continue;
        }

        match &attr.meta {
            Meta::Path(_) => {
                set_strategy(&mut strategy, Strategy::Sensitive(None), attr.span())?;
            }
            Meta::List(list) => match syn::parse2::<syn::Path>(list.tokens.clone()) {
                Ok(path) if path.is_ident("skip") => {
                    set_strategy(&mut strategy, Strategy::Skip, attr.span())?;
                }
                Ok(path) => {
                    set_strategy(&mut strategy, Strategy::Sensitive(Some(path)), attr.span())?;
                }
                Err(_) => {
                    return Err(syn::Error::new(
                        attr.span(),
                        "expected a classification type (e.g., #[pii(Email)]) or `skip`",
                    ));
                }
            },
            Meta::NameValue(_) => {
                return Err(syn::Error::new(
                    attr.span(),
                    "name-value syntax is not supported for #[pii]",
                ));
            }
        }
    }

    Ok(strategy.unwrap_or(Strategy::Structural))
}
