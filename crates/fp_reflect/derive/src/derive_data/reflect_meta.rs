use proc_macro2::TokenStream;
use quote::{ToTokens, quote};
use syn::{Generics, Ident, ImplGenerics, Path, Type, TypeGenerics};

use super::TypeAttributes;

/// Type level data shared by every generated impl.
pub(crate) struct ReflectMeta<'a> {
    fp_reflect_path: Path,
    attrs: TypeAttributes,
    ident: &'a Ident,
    generics: &'a Generics,
    // Field types that mention a type parameter, they need explicit bounds.
    active_types: Vec<Type>,
}

impl core::fmt::Debug for ReflectMeta<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ReflectMeta")
            .field("fp_reflect_path", &self.fp_reflect_path.to_token_stream())
            .field("ident", &self.ident)
            .field("attrs", &self.attrs)
            .finish()
    }
}

impl<'a> ReflectMeta<'a> {
    pub fn new(attrs: TypeAttributes, ident: &'a Ident, generics: &'a Generics) -> Self {
        Self {
            fp_reflect_path: crate::path::fp_reflect(),
            attrs,
            ident,
            generics,
            active_types: Vec::new(),
        }
    }

    /// Records the field types of a struct, keeping the generic ones.
    pub(super) fn set_active_types<'t>(&mut self, types: impl Iterator<Item = &'t Type>) {
        let params: Vec<&Ident> = self.generics.type_params().map(|p| &p.ident).collect();
        if params.is_empty() {
            return;
        }
        for ty in types {
            if mentions_any(&params, ty.to_token_stream()) && !self.active_types.contains(ty) {
                self.active_types.push(ty.clone());
            }
        }
    }

    #[inline]
    pub fn fp_reflect_path(&self) -> &Path {
        &self.fp_reflect_path
    }

    #[inline]
    pub fn attrs(&self) -> &TypeAttributes {
        &self.attrs
    }

    #[inline]
    pub fn ident(&self) -> &'a Ident {
        self.ident
    }

    #[inline]
    pub fn generics(&self) -> &'a Generics {
        self.generics
    }

    #[inline]
    pub fn impl_with_generic(&self) -> bool {
        self.generics.type_params().next().is_some()
    }

    /// Returns `impl_generics`, `ty_generics` and the full `where` clause.
    ///
    /// Bounds added for generic types:
    ///
    /// - every type parameter: `TypePath`.
    /// - `Self: Any + Send + Sync`.
    /// - with `add_field_bounds`, every field type mentioning a type
    ///   parameter: `FromReflect + Typed`, plus `GetTypeMeta` with
    ///   `add_get_type_meta`.
    pub fn split_generics(
        &self,
        add_field_bounds: bool,
        add_get_type_meta: bool,
    ) -> (ImplGenerics<'a>, TypeGenerics<'a>, TokenStream) {
        use crate::path::fp::{AnyFP, SendFP, SyncFP};

        let (impl_generics, ty_generics, where_clause) = self.generics.split_for_impl();

        let mut predicates = Vec::<TokenStream>::new();

        if let Some(where_clause) = where_clause {
            predicates.extend(where_clause.predicates.iter().map(ToTokens::to_token_stream));
        }

        if self.impl_with_generic() {
            let type_path_ = crate::path::type_path_(&self.fp_reflect_path);
            predicates.extend(self.generics.type_params().map(|param| {
                let ident = &param.ident;
                quote!(#ident: #type_path_)
            }));
            predicates.push(quote!(Self: #AnyFP + #SendFP + #SyncFP));
        }

        if add_field_bounds && !self.active_types.is_empty() {
            let from_reflect_ = crate::path::from_reflect_(&self.fp_reflect_path);
            let typed_ = crate::path::typed_(&self.fp_reflect_path);
            let get_type_meta = if add_get_type_meta {
                let get_type_meta_ = crate::path::get_type_meta_(&self.fp_reflect_path);
                quote!(+ #get_type_meta_)
            } else {
                crate::utils::empty()
            };
            predicates.extend(
                self.active_types
                    .iter()
                    .map(|ty| quote!(#ty: #from_reflect_ + #typed_ #get_type_meta)),
            );
        }

        (impl_generics, ty_generics, quote! { where #(#predicates,)* })
    }

    /// The `TypeInfo` expression of an opaque type.
    pub fn to_opaque_info_tokens(&self) -> TokenStream {
        let type_info_ = crate::path::type_info_(&self.fp_reflect_path);
        let opaque_info_ = crate::path::opaque_info_(&self.fp_reflect_path);

        quote! {
            #type_info_::Opaque(#opaque_info_::new::<Self>())
        }
    }
}

/// Does any of `idents` appear in `tokens`?
fn mentions_any(idents: &[&Ident], tokens: TokenStream) -> bool {
    tokens.into_iter().any(|tree| match tree {
        proc_macro2::TokenTree::Ident(ident) => idents.contains(&&ident),
        proc_macro2::TokenTree::Group(group) => mentions_any(idents, group.stream()),
        _ => false,
    })
}
