use proc_macro2::{Span, TokenStream};
use quote::{quote, quote_spanned};
use syn::Ident;

use crate::derive_data::ReflectMeta;

/// Generates the `GetTypeMeta` impl.
///
/// The available-trait flags pick the inserted type traits;
/// `register_deps_tokens` is the `register_dependencies` fn, if any.
pub(crate) fn impl_trait_get_type_meta(
    meta: &ReflectMeta,
    register_deps_tokens: TokenStream,
) -> TokenStream {
    let fp_reflect_path = meta.fp_reflect_path();
    let get_type_meta_ = crate::path::get_type_meta_(fp_reflect_path);
    let type_meta_ = crate::path::type_meta_(fp_reflect_path);
    let from_type_ = crate::path::from_type_(fp_reflect_path);
    let macro_utils_ = crate::path::macro_utils_(fp_reflect_path);

    let outer_ = Ident::new("__outer", Span::call_site());
    let flags = &meta.attrs().avail_traits;
    let trait_counter = flags.count();

    // Generic types only get the type traits their arguments allow.
    let mut extra_bounds = Vec::<TokenStream>::new();

    let insert_default = match flags.default {
        Some(span) => {
            let type_trait_default_ = crate::path::type_trait_default_(fp_reflect_path);
            extra_bounds.push(quote!(Self: ::core::default::Default));
            quote_spanned! { span =>
                #type_meta_::insert_trait::<#type_trait_default_>(&mut #outer_, #from_type_::<Self>::from_type());
            }
        }
        None => crate::utils::empty(),
    };

    let insert_serialize = match flags.serialize {
        Some(span) => {
            let type_trait_serialize_ = crate::path::type_trait_serialize_(fp_reflect_path);
            extra_bounds.push(quote!(Self: #macro_utils_::ErasedSerialize));
            quote_spanned! { span =>
                #type_meta_::insert_trait::<#type_trait_serialize_>(&mut #outer_, #from_type_::<Self>::from_type());
            }
        }
        None => crate::utils::empty(),
    };

    let insert_deserialize = match flags.deserialize {
        Some(span) => {
            let type_trait_deserialize_ = crate::path::type_trait_deserialize_(fp_reflect_path);
            extra_bounds.push(quote!(Self: for<'de> #macro_utils_::Deserialize<'de>));
            quote_spanned! { span =>
                #type_meta_::insert_trait::<#type_trait_deserialize_>(&mut #outer_, #from_type_::<Self>::from_type());
            }
        }
        None => crate::utils::empty(),
    };

    let ident = meta.ident();
    let (impl_generics, ty_generics, mut where_clause) = meta.split_generics(true, true);
    if meta.impl_with_generic() {
        where_clause.extend(quote! { #(#extra_bounds,)* });
    }

    quote! {
        impl #impl_generics #get_type_meta_ for #ident #ty_generics #where_clause {
            fn get_type_meta() -> #type_meta_ {
                let mut #outer_ = #type_meta_::with_capacity::<Self>(#trait_counter);
                #insert_default
                #insert_serialize
                #insert_deserialize
                #outer_
            }

            #register_deps_tokens
        }
    }
}
