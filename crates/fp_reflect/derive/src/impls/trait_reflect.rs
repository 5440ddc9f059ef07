use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::ReflectMeta;
use crate::path::fp::{AnyFP, ResultFP};

/// Generates the `Reflect` impl for the kind `reflect_kind_token`
/// (`Struct` or `Opaque`).
pub(crate) fn impl_trait_reflect(meta: &ReflectMeta, reflect_kind_token: TokenStream) -> TokenStream {
    let fp_reflect_path = meta.fp_reflect_path();

    let reflect_ = crate::path::reflect_(fp_reflect_path);
    let from_reflect_ = crate::path::from_reflect_(fp_reflect_path);
    let macro_utils_ = crate::path::macro_utils_(fp_reflect_path);
    let reflect_kind_ = crate::path::reflect_kind_(fp_reflect_path);
    let reflect_ref_ = crate::path::reflect_ref_(fp_reflect_path);
    let reflect_mut_ = crate::path::reflect_mut_(fp_reflect_path);

    let ident = meta.ident();
    let (impl_generics, ty_generics, where_clause) = meta.split_generics(true, false);

    quote! {
        impl #impl_generics #reflect_ for #ident #ty_generics #where_clause {
            #[inline(always)]
            fn as_any(&self) -> &dyn #AnyFP {
                self
            }

            #[inline(always)]
            fn as_any_mut(&mut self) -> &mut dyn #AnyFP {
                self
            }

            #[inline(always)]
            fn into_any(self: #macro_utils_::Box<Self>) -> #macro_utils_::Box<dyn #AnyFP> {
                self
            }

            #[inline(always)]
            fn as_reflect(&self) -> &dyn #reflect_ {
                self
            }

            #[inline(always)]
            fn as_reflect_mut(&mut self) -> &mut dyn #reflect_ {
                self
            }

            #[inline(always)]
            fn into_reflect(self: #macro_utils_::Box<Self>) -> #macro_utils_::Box<dyn #reflect_> {
                self
            }

            fn set(
                &mut self,
                value: #macro_utils_::Box<dyn #reflect_>,
            ) -> #ResultFP<(), #macro_utils_::Box<dyn #reflect_>> {
                *self = <Self as #from_reflect_>::take_from_reflect(value)?;
                #ResultFP::Ok(())
            }

            #[inline]
            fn reflect_kind(&self) -> #reflect_kind_ {
                #reflect_kind_::#reflect_kind_token
            }

            #[inline]
            fn reflect_ref(&self) -> #reflect_ref_<'_> {
                #reflect_ref_::#reflect_kind_token(self)
            }

            #[inline]
            fn reflect_mut(&mut self) -> #reflect_mut_<'_> {
                #reflect_mut_::#reflect_kind_token(self)
            }
        }
    }
}

/// Generates the `FromReflect` impl, a checked downcast.
pub(crate) fn impl_trait_from_reflect(meta: &ReflectMeta) -> TokenStream {
    let from_reflect_ = crate::path::from_reflect_(meta.fp_reflect_path());

    let ident = meta.ident();
    let (impl_generics, ty_generics, where_clause) = meta.split_generics(true, false);

    quote! {
        impl #impl_generics #from_reflect_ for #ident #ty_generics #where_clause {}
    }
}
