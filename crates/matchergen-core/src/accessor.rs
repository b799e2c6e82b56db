//! Discovery of accessor methods on a target type.
//!
//! An accessor is a method of an inherent `impl` block for the target type
//! that is `pub`, takes `&self` and nothing else, and returns exactly one
//! value. Accessors are reported in traversal order: file order, then
//! declaration order within a file.

use std::fmt;

use proc_macro2::{Ident, Span};
use quote::ToTokens;
use syn::ext::IdentExt;
use syn::visit::Visit;
use syn::{
    FnArg, GenericParam, ImplItemFn, ItemFn, ItemImpl, ItemMod, PathArguments, ReturnType, Type,
    TypeImplTrait, Visibility,
};
use tracing::{debug, info};

use crate::package::SourcePackage;

/// An eligible accessor method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Accessor {
    /// Method name, as declared.
    pub name: Ident,
    /// Declared return type, verbatim.
    pub return_type: Type,
}

impl Accessor {
    /// Creates a new accessor.
    #[must_use]
    pub fn new(name: Ident, return_type: Type) -> Self {
        Self { name, return_type }
    }

    /// Name of the matcher field holding the expected value: the method name
    /// with its first letter lower-cased.
    #[must_use]
    pub fn field_name(&self) -> String {
        lower_first(&self.name.unraw().to_string())
    }

    /// Identifier for [`Accessor::field_name`], escaped when it collides with
    /// a keyword.
    #[must_use]
    pub fn field_ident(&self) -> Ident {
        let name = self.field_name();
        match name.as_str() {
            "self" | "super" | "crate" => Ident::new(&format!("{name}_"), Span::call_site()),
            _ if syn::parse_str::<Ident>(&name).is_err() => Ident::new_raw(&name, Span::call_site()),
            _ => Ident::new(&name, Span::call_site()),
        }
    }

    /// Token rendering of the return type.
    #[must_use]
    pub fn return_type_text(&self) -> String {
        self.return_type.to_token_stream().to_string()
    }
}

impl fmt::Display for Accessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}() -> {}", self.name, self.return_type_text())
    }
}

/// Returns the accessors of `type_name` across every file of `package`.
#[must_use]
pub fn extract_accessors(package: &SourcePackage, type_name: &str) -> Vec<Accessor> {
    let mut visitor = AccessorVisitor {
        type_name,
        accessors: Vec::new(),
    };

    for file in package.files() {
        debug!("Scanning {} for {}", file.path.display(), type_name);
        visitor.visit_file(&file.ast);
    }

    info!(
        "found accessors for struct {}: [{}]",
        type_name,
        visitor
            .accessors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    );

    visitor.accessors
}

/// Why a method on the target type is not an accessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Ineligible {
    NotPublic,
    NoReceiver,
    ExtraParameters(usize),
    ReceiverShape,
    NoReturnValue,
    Generic,
    Async,
    Unsafe,
    ImplTrait,
    ReservedName,
}

impl fmt::Display for Ineligible {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotPublic => write!(f, "not public"),
            Self::NoReceiver => write!(f, "no self receiver"),
            Self::ExtraParameters(n) => write!(f, "takes {n} parameter(s) besides self"),
            Self::ReceiverShape => write!(f, "receiver is not &self"),
            Self::NoReturnValue => write!(f, "returns no value"),
            Self::Generic => write!(f, "has type or const parameters"),
            Self::Async => write!(f, "is async"),
            Self::Unsafe => write!(f, "is unsafe"),
            Self::ImplTrait => write!(f, "returns an `impl Trait` type"),
            Self::ReservedName => write!(f, "field name `{COMPARATOR_FIELD}` is reserved"),
        }
    }
}

/// Name of the matcher field holding the comparator.
const COMPARATOR_FIELD: &str = "comparator";

struct AccessorVisitor<'a> {
    type_name: &'a str,
    accessors: Vec<Accessor>,
}

impl<'ast> Visit<'ast> for AccessorVisitor<'_> {
    fn visit_item_impl(&mut self, node: &'ast ItemImpl) {
        if node.trait_.is_some() || !names_type(&node.self_ty, self.type_name) {
            return;
        }
        // A matcher names the target without generic arguments.
        if !node.generics.params.is_empty() || has_generic_args(&node.self_ty) {
            debug!("Skipping generic impl of {}", self.type_name);
            return;
        }

        for method in node.items.iter().filter_map(|item| match item {
            syn::ImplItem::Fn(method) => Some(method),
            _ => None,
        }) {
            let name = &method.sig.ident;
            match check_method(method, self.type_name) {
                Ok(return_type) => {
                    debug!("Accessor {}::{}", self.type_name, name);
                    self.accessors
                        .push(Accessor::new(name.clone(), return_type.clone()));
                }
                Err(reason) => debug!("Skipping {}::{}: {}", self.type_name, name, reason),
            }
        }
    }

    // Inline modules are separate namespaces.
    fn visit_item_mod(&mut self, _node: &'ast ItemMod) {}

    fn visit_item_fn(&mut self, _node: &'ast ItemFn) {}
}

fn check_method<'m>(method: &'m ImplItemFn, type_name: &str) -> Result<&'m Type, Ineligible> {
    let sig = &method.sig;

    if !matches!(method.vis, Visibility::Public(_)) {
        return Err(Ineligible::NotPublic);
    }
    if lower_first(&sig.ident.unraw().to_string()) == COMPARATOR_FIELD {
        return Err(Ineligible::ReservedName);
    }
    if sig.asyncness.is_some() {
        return Err(Ineligible::Async);
    }
    if sig.unsafety.is_some() {
        return Err(Ineligible::Unsafe);
    }
    if sig
        .generics
        .params
        .iter()
        .any(|p| !matches!(p, GenericParam::Lifetime(_)))
    {
        return Err(Ineligible::Generic);
    }

    let Some(FnArg::Receiver(receiver)) = sig.inputs.first() else {
        return Err(Ineligible::NoReceiver);
    };
    if sig.inputs.len() != 1 {
        return Err(Ineligible::ExtraParameters(sig.inputs.len() - 1));
    }
    match receiver.ty.as_ref() {
        Type::Reference(reference)
            if reference.mutability.is_none()
                && (is_self(&reference.elem) || names_type(&reference.elem, type_name)) => {}
        _ => return Err(Ineligible::ReceiverShape),
    }

    match &sig.output {
        ReturnType::Type(_, ty) if contains_impl_trait(ty) => Err(Ineligible::ImplTrait),
        ReturnType::Type(_, ty) if !is_unit(ty) => Ok(ty),
        _ => Err(Ineligible::NoReturnValue),
    }
}

fn has_generic_args(ty: &Type) -> bool {
    match ty {
        Type::Path(path) => path
            .path
            .segments
            .last()
            .is_some_and(|segment| !matches!(segment.arguments, PathArguments::None)),
        Type::Group(group) => has_generic_args(&group.elem),
        Type::Paren(paren) => has_generic_args(&paren.elem),
        _ => false,
    }
}

fn contains_impl_trait(ty: &Type) -> bool {
    struct Finder(bool);

    impl<'ast> Visit<'ast> for Finder {
        fn visit_type_impl_trait(&mut self, _node: &'ast TypeImplTrait) {
            self.0 = true;
        }
    }

    let mut finder = Finder(false);
    finder.visit_type(ty);
    finder.0
}

fn names_type(ty: &Type, type_name: &str) -> bool {
    match ty {
        Type::Path(path) if path.qself.is_none() => path
            .path
            .segments
            .last()
            .is_some_and(|segment| segment.ident == type_name),
        Type::Group(group) => names_type(&group.elem, type_name),
        Type::Paren(paren) => names_type(&paren.elem, type_name),
        _ => false,
    }
}

fn is_self(ty: &Type) -> bool {
    matches!(ty, Type::Path(path) if path.qself.is_none() && path.path.is_ident("Self"))
}

fn is_unit(ty: &Type) -> bool {
    match ty {
        Type::Tuple(tuple) => tuple.elems.is_empty(),
        Type::Never(_) => true,
        Type::Paren(paren) => is_unit(&paren.elem),
        _ => false,
    }
}

fn lower_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
