//! Evaluation of `#[cfg(...)]` attributes against a set of enabled features.

use std::collections::BTreeSet;

use syn::punctuated::Punctuated;
use syn::{Attribute, Expr, ExprLit, ImplItem, Item, Lit, Meta, Token};
use tracing::debug;

/// Decides which items survive `#[cfg]` filtering.
///
/// Only `feature = "..."`, `test`, `doc`, `all`, `any` and `not` are
/// understood. Any other predicate is assumed to hold.
#[derive(Debug, Clone, Default)]
pub struct CfgEvaluator {
    features: BTreeSet<String>,
}

impl CfgEvaluator {
    /// Creates an evaluator with the given features enabled.
    #[must_use]
    pub fn new<I, S>(features: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            features: features.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns `true` if every `cfg` attribute in `attrs` holds.
    #[must_use]
    pub fn is_enabled(&self, attrs: &[Attribute]) -> bool {
        attrs
            .iter()
            .filter(|attr| attr.path().is_ident("cfg"))
            .all(|attr| match attr.parse_args::<Meta>() {
                Ok(meta) => self.eval(&meta),
                Err(e) => {
                    debug!("Unparsable cfg predicate, assuming enabled: {e}");
                    true
                }
            })
    }

    /// Strips disabled items and impl items from `file`.
    ///
    /// Returns `false` when the whole file is disabled by an inner
    /// `#![cfg(...)]` attribute.
    pub fn retain(&self, file: &mut syn::File) -> bool {
        if !self.is_enabled(&file.attrs) {
            return false;
        }

        file.items.retain(|item| self.is_enabled(item_attrs(item)));
        for item in &mut file.items {
            if let Item::Impl(item_impl) = item {
                item_impl
                    .items
                    .retain(|impl_item| self.is_enabled(impl_item_attrs(impl_item)));
            }
        }

        true
    }

    fn eval(&self, meta: &Meta) -> bool {
        match meta {
            Meta::Path(path) => !(path.is_ident("test") || path.is_ident("doc")),
            Meta::NameValue(nv) if nv.path.is_ident("feature") => match &nv.value {
                Expr::Lit(ExprLit {
                    lit: Lit::Str(name),
                    ..
                }) => self.features.contains(&name.value()),
                _ => true,
            },
            Meta::NameValue(_) => true,
            Meta::List(list) => {
                let Ok(nested) =
                    list.parse_args_with(Punctuated::<Meta, Token![,]>::parse_terminated)
                else {
                    return true;
                };

                if list.path.is_ident("all") {
                    nested.iter().all(|m| self.eval(m))
                } else if list.path.is_ident("any") {
                    nested.iter().any(|m| self.eval(m))
                } else if list.path.is_ident("not") && nested.len() == 1 {
                    !self.eval(&nested[0])
                } else {
                    true
                }
            }
        }
    }
}

fn item_attrs(item: &Item) -> &[Attribute] {
    match item {
        Item::Const(i) => &i.attrs,
        Item::Enum(i) => &i.attrs,
        Item::ExternCrate(i) => &i.attrs,
        Item::Fn(i) => &i.attrs,
        Item::ForeignMod(i) => &i.attrs,
        Item::Impl(i) => &i.attrs,
        Item::Macro(i) => &i.attrs,
        Item::Mod(i) => &i.attrs,
        Item::Static(i) => &i.attrs,
        Item::Struct(i) => &i.attrs,
        Item::Trait(i) => &i.attrs,
        Item::TraitAlias(i) => &i.attrs,
        Item::Type(i) => &i.attrs,
        Item::Union(i) => &i.attrs,
        Item::Use(i) => &i.attrs,
        _ => &[],
    }
}

fn impl_item_attrs(item: &ImplItem) -> &[Attribute] {
    match item {
        ImplItem::Const(i) => &i.attrs,
        ImplItem::Fn(i) => &i.attrs,
        ImplItem::Type(i) => &i.attrs,
        ImplItem::Macro(i) => &i.attrs,
        _ => &[],
    }
}
