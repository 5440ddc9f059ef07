use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::ReflectMeta;
use crate::path::fp::OptionFP;

fn static_path_cell(meta: &ReflectMeta, generator: TokenStream) -> TokenStream {
    let path_cell_ = crate::path::generic_type_path_cell_(meta.fp_reflect_path());

    quote! {
        static CELL: #path_cell_ = #path_cell_::new();
        CELL.get_or_insert::<Self>(|| {
            #generator
        })
    }
}

/// Joins `base` with the paths (or names) of the type parameters:
/// `base<T0, T1>`.
fn generic_path(meta: &ReflectMeta, base: TokenStream, item: TokenStream) -> TokenStream {
    let concat_ = crate::path::concat_(meta.fp_reflect_path());
    let type_path_ = crate::path::type_path_(meta.fp_reflect_path());

    let mut pieces = vec![base, quote!("<")];
    for (i, param) in meta.generics().type_params().enumerate() {
        if i > 0 {
            pieces.push(quote!(", "));
        }
        let ident = &param.ident;
        pieces.push(quote!(<#ident as #type_path_>::#item()));
    }
    pieces.push(quote!(">"));

    quote! {
        #concat_(&[#(#pieces),*])
    }
}

/// Generates the `TypePath` impl.
///
/// Paths follow `module_path!()` unless `#[reflect(type_path = "...")]`
/// is given, in which case the module is everything before the last `::`.
pub(crate) fn impl_trait_type_path(meta: &ReflectMeta) -> TokenStream {
    let trait_type_path_ = crate::path::type_path_(meta.fp_reflect_path());
    let ident = meta.ident();

    let (base_path, type_ident, module_path) = match &meta.attrs().type_path {
        Some(custom) => {
            let text = custom.value();
            match text.rsplit_once("::") {
                Some((module, name)) => (
                    quote!(#text),
                    name.to_string(),
                    quote!(#OptionFP::Some(#module)),
                ),
                None => (quote!(#text), text.clone(), quote!(#OptionFP::None)),
            }
        }
        None => {
            let name = ident.to_string();
            let suffix = format!("::{name}");
            (
                quote!(::core::concat!(::core::module_path!(), #suffix)),
                name,
                quote!(#OptionFP::Some(::core::module_path!())),
            )
        }
    };

    let (type_path, type_name, inline_flag) = if meta.impl_with_generic() {
        (
            static_path_cell(meta, generic_path(meta, base_path, quote!(type_path))),
            static_path_cell(meta, generic_path(meta, quote!(#type_ident), quote!(type_name))),
            crate::utils::empty(),
        )
    } else {
        (base_path, quote!(#type_ident), quote! { #[inline] })
    };

    let (impl_generics, ty_generics, where_clause) = meta.split_generics(false, false);

    quote! {
        impl #impl_generics #trait_type_path_ for #ident #ty_generics #where_clause {
            #inline_flag
            fn type_path() -> &'static str {
                #type_path
            }

            #inline_flag
            fn type_name() -> &'static str {
                #type_name
            }

            #[inline]
            fn type_ident() -> &'static str {
                #type_ident
            }

            #[inline]
            fn module_path() -> #OptionFP<&'static str> {
                #module_path
            }
        }
    }
}
