//! Synthesis of matcher source code from discovered accessors.

use proc_macro2::{Ident, Span, TokenStream};
use quote::{format_ident, quote};
use syn::visit_mut::{self, VisitMut};
use syn::{Lifetime, Type, TypeBareFn, TypePath, TypeReference};

use crate::accessor::Accessor;

/// Name of the lifetime given to matchers that hold borrowed values.
const MATCHER_LIFETIME: &str = "'m";

/// Module paths the generated code refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packages {
    /// Module that owns the target types. Imported with a glob.
    pub source_module: syn::Path,
    /// Path at which the generated code reaches `matchergen-runtime`.
    pub runtime: syn::Path,
}

impl Packages {
    /// Creates a new set of module paths.
    #[must_use]
    pub fn new(source_module: syn::Path, runtime: syn::Path) -> Self {
        Self {
            source_module,
            runtime,
        }
    }

    /// Parses both paths from strings such as `crate::model`.
    ///
    /// # Errors
    ///
    /// Returns an error if either string is not a valid path.
    pub fn parse(source_module: &str, runtime: &str) -> Result<Self, syn::Error> {
        Ok(Self::new(
            syn::parse_str(source_module)?,
            syn::parse_str(runtime)?,
        ))
    }
}

impl Default for Packages {
    fn default() -> Self {
        Self::new(syn::parse_quote!(super), syn::parse_quote!(matchergen_runtime))
    }
}

/// Everything needed to synthesize one matcher.
#[derive(Debug, Clone)]
pub struct MatcherSpec {
    /// Target type name.
    pub type_name: Ident,
    /// Accessors in discovery order.
    pub accessors: Vec<Accessor>,
}

impl MatcherSpec {
    /// Creates a new spec.
    #[must_use]
    pub fn new(type_name: Ident, accessors: Vec<Accessor>) -> Self {
        Self {
            type_name,
            accessors,
        }
    }

    /// Name of the generated matcher type.
    #[must_use]
    pub fn matcher_name(&self) -> Ident {
        format_ident!("{}Matcher", self.type_name)
    }
}

/// Items emitted once at the top of every generated file.
#[must_use]
pub fn prelude(packages: &Packages) -> TokenStream {
    let source = &packages.source_module;
    quote! {
        #[allow(unused_imports)]
        use #source::*;
    }
}

/// Synthesizes the matcher type, its constructor and its `Matcher` impl.
#[must_use]
pub fn synthesize(spec: &MatcherSpec, packages: &Packages) -> TokenStream {
    let target = &spec.type_name;
    let matcher = spec.matcher_name();
    let runtime = &packages.runtime;

    let mut rewriter = FieldTypeRewriter {
        target,
        borrows: false,
    };
    let field_types: Vec<Type> = spec
        .accessors
        .iter()
        .map(|accessor| {
            let mut ty = accessor.return_type.clone();
            rewriter.visit_type_mut(&mut ty);
            ty
        })
        .collect();
    let fields: Vec<Ident> = spec.accessors.iter().map(Accessor::field_ident).collect();
    let labels: Vec<String> = spec.accessors.iter().map(Accessor::field_name).collect();
    let methods: Vec<&Ident> = spec.accessors.iter().map(|a| &a.name).collect();

    let generics = if rewriter.borrows {
        let lifetime = Lifetime::new(MATCHER_LIFETIME, Span::call_site());
        quote! { <#lifetime> }
    } else {
        TokenStream::new()
    };
    let binding = if spec.accessors.is_empty() {
        quote! { _ }
    } else {
        quote! { target }
    };
    let doc = format!(" Matches [`{target}`] values by comparing the results of its accessors.");

    quote! {
        #[doc = #doc]
        pub struct #matcher #generics {
            comparator: #runtime::Comparator,
            #( #fields: #field_types, )*
        }

        impl #generics #matcher #generics {
            /// Creates a matcher expecting the given accessor results.
            #[allow(clippy::too_many_arguments, clippy::new_without_default)]
            #[must_use]
            pub fn new(#( #fields: #field_types ),*) -> Self {
                Self {
                    comparator: #runtime::Comparator::new(),
                    #( #fields, )*
                }
            }
        }

        impl #generics #runtime::Matcher for #matcher #generics {
            fn matches(&mut self, arg: &dyn #runtime::Candidate) -> bool {
                self.comparator = #runtime::Comparator::new();

                let ::core::option::Option::Some(#binding) =
                    #runtime::Candidate::as_any(arg).downcast_ref::<#target>()
                else {
                    self.comparator.equal(
                        "type",
                        &::core::any::type_name::<#target>(),
                        &#runtime::Candidate::type_name(arg),
                    );
                    return self.comparator.matches();
                };

                #( self.comparator.equal(#labels, &self.#fields, &target.#methods()); )*

                self.comparator.matches()
            }

            fn describe_actual(&self) -> ::std::string::String {
                self.comparator.describe_got()
            }

            fn describe_expected(&self) -> ::std::string::String {
                self.comparator.describe_wanted()
            }
        }
    }
}

/// Makes an accessor's return type usable as a struct field.
///
/// Elided and named lifetimes become the matcher lifetime, `Self` becomes
/// the target type.
struct FieldTypeRewriter<'a> {
    target: &'a Ident,
    borrows: bool,
}

impl VisitMut for FieldTypeRewriter<'_> {
    fn visit_type_reference_mut(&mut self, node: &mut TypeReference) {
        if node.lifetime.is_none() {
            node.lifetime = Some(Lifetime::new(MATCHER_LIFETIME, Span::call_site()));
            self.borrows = true;
        }
        visit_mut::visit_type_reference_mut(self, node);
    }

    fn visit_lifetime_mut(&mut self, node: &mut Lifetime) {
        if node.ident != "static" {
            *node = Lifetime::new(MATCHER_LIFETIME, node.span());
            self.borrows = true;
        }
    }

    fn visit_type_path_mut(&mut self, node: &mut TypePath) {
        if node.qself.is_none() {
            if let Some(first) = node.path.segments.first_mut() {
                if first.ident == "Self" {
                    first.ident = self.target.clone();
                }
            }
        }
        visit_mut::visit_type_path_mut(self, node);
    }

    // Function pointer signatures keep their own lifetimes.
    fn visit_type_bare_fn_mut(&mut self, _node: &mut TypeBareFn) {}
}
