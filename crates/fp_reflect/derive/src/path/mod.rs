//! Paths of the `fp_reflect` items the generated code refers to.
//!
//! Kept in one place so that moving an item only touches this module.

use proc_macro2::TokenStream;
use quote::quote;

// -----------------------------------------------------------------------------
// Crate Path

/// Returns how the caller reaches `fp_reflect`.
///
/// 1. A crate depending on `fp_reflect` gets `::fp_reflect`.
/// 2. A crate depending on `flatpath` gets `::flatpath::reflect`.
/// 3. Otherwise `::fp_reflect` is returned, which may be wrong.
///
/// This reads the caller's manifest, so it is called once per derive and
/// the result passed around.
pub(crate) fn fp_reflect() -> syn::Path {
    fp_macro_utils::Manifest::shared(|manifest| manifest.get_crate_path("fp_reflect"))
}

// -----------------------------------------------------------------------------
// Modules

pub(crate) mod fp;

// -----------------------------------------------------------------------------
// Items

macro_rules! define_paths {
    ($($name:ident => $($segment:ident)::+;)*) => {
        $(
            #[inline(always)]
            pub(crate) fn $name(fp_reflect_path: &syn::Path) -> TokenStream {
                quote! { #fp_reflect_path::$($segment)::+ }
            }
        )*
    };
}

define_paths! {
    reflect_ => Reflect;
    from_reflect_ => FromReflect;
    macro_utils_ => __macro_exports::macro_utils;

    type_path_ => info::TypePath;
    typed_ => info::Typed;
    type_info_ => info::TypeInfo;
    struct_info_ => info::StructInfo;
    opaque_info_ => info::OpaqueInfo;
    named_field_ => info::NamedField;
    field_attributes_ => info::FieldAttributes;
    reflect_kind_ => info::ReflectKind;

    struct_ => ops::Struct;
    struct_field_iter_ => ops::StructFieldIter;
    reflect_ref_ => ops::ReflectRef;
    reflect_mut_ => ops::ReflectMut;

    concat_ => impls::concat;
    generic_type_path_cell_ => impls::GenericTypePathCell;
    generic_type_info_cell_ => impls::GenericTypeInfoCell;
    non_generic_type_info_cell_ => impls::NonGenericTypeInfoCell;

    type_meta_ => registry::TypeMeta;
    get_type_meta_ => registry::GetTypeMeta;
    from_type_ => registry::FromType;
    type_registry_ => registry::TypeRegistry;
    type_trait_default_ => registry::TypeTraitDefault;
    type_trait_serialize_ => registry::TypeTraitSerialize;
    type_trait_deserialize_ => registry::TypeTraitDeserialize;
}

#[cfg(feature = "auto_register")]
#[inline(always)]
pub(crate) fn auto_register_(fp_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #fp_reflect_path::__macro_exports::auto_register
    }
}
