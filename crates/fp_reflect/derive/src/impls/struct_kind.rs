use proc_macro2::TokenStream;
use quote::{ToTokens, quote};

use super::{get_auto_register_impl, impl_trait_from_reflect, impl_trait_get_type_meta};
use super::{impl_trait_reflect, impl_trait_type_path, impl_trait_typed};

use crate::derive_data::{ReflectStruct, StructField};
use crate::path::fp::OptionFP;

/// Implements reflection for a struct with named fields.
pub(crate) fn impl_struct(info: &ReflectStruct) -> TokenStream {
    let meta = info.meta();

    let type_path_trait_tokens = impl_trait_type_path(meta);
    let typed_trait_tokens = impl_trait_typed(meta, info.to_info_tokens());
    let struct_trait_tokens = impl_trait_struct(info);
    let reflect_trait_tokens = impl_trait_reflect(meta, quote!(Struct));
    let from_reflect_tokens = impl_trait_from_reflect(meta);
    let get_type_meta_tokens = impl_trait_get_type_meta(meta, get_registry_dependencies(info));
    let auto_register_tokens = get_auto_register_impl(meta);

    quote! {
        #type_path_trait_tokens

        #typed_trait_tokens

        #struct_trait_tokens

        #reflect_trait_tokens

        #from_reflect_tokens

        #get_type_meta_tokens

        #auto_register_tokens
    }
}

/// Generates the `Struct` impl.
fn impl_trait_struct(info: &ReflectStruct) -> TokenStream {
    let meta = info.meta();

    let fp_reflect_path = meta.fp_reflect_path();
    let struct_ = crate::path::struct_(fp_reflect_path);
    let reflect_ = crate::path::reflect_(fp_reflect_path);
    let struct_field_iter_ = crate::path::struct_field_iter_(fp_reflect_path);
    let option_ = OptionFP.to_token_stream();

    let fields: Vec<&StructField> = info.active_fields().collect();
    let field_names: Vec<String> = fields.iter().map(|field| field.name()).collect();
    let field_idents: Vec<_> = fields.iter().map(|field| field.ident()).collect();
    let field_indices: Vec<usize> = fields
        .iter()
        .filter_map(|field| field.reflection_index)
        .collect();
    let field_count = fields.len();

    let ident = meta.ident();
    let (impl_generics, ty_generics, where_clause) = meta.split_generics(true, false);

    quote! {
        impl #impl_generics #struct_ for #ident #ty_generics #where_clause {
            fn field(&self, name: &str) -> #option_<&dyn #reflect_> {
                match name {
                    #(#field_names => #option_::Some(&self.#field_idents as &dyn #reflect_),)*
                    _ => #option_::None,
                }
            }

            fn field_mut(&mut self, name: &str) -> #option_<&mut dyn #reflect_> {
                match name {
                    #(#field_names => #option_::Some(&mut self.#field_idents as &mut dyn #reflect_),)*
                    _ => #option_::None,
                }
            }

            fn field_at(&self, index: usize) -> #option_<&dyn #reflect_> {
                match index {
                    #(#field_indices => #option_::Some(&self.#field_idents as &dyn #reflect_),)*
                    _ => #option_::None,
                }
            }

            fn field_at_mut(&mut self, index: usize) -> #option_<&mut dyn #reflect_> {
                match index {
                    #(#field_indices => #option_::Some(&mut self.#field_idents as &mut dyn #reflect_),)*
                    _ => #option_::None,
                }
            }

            fn name_at(&self, index: usize) -> #option_<&str> {
                match index {
                    #(#field_indices => #option_::Some(#field_names),)*
                    _ => #option_::None,
                }
            }

            #[inline]
            fn field_len(&self) -> usize {
                #field_count
            }

            #[inline]
            fn iter_fields(&self) -> #struct_field_iter_<'_> {
                #struct_field_iter_::new(self)
            }
        }
    }
}

/// Generates `register_dependencies`, registering every reflected field type.
fn get_registry_dependencies(info: &ReflectStruct) -> TokenStream {
    let type_registry_ = crate::path::type_registry_(info.meta().fp_reflect_path());

    let mut field_types = Vec::new();
    for field in info.active_fields() {
        if !field_types.contains(&field.ty()) {
            field_types.push(field.ty());
        }
    }

    if field_types.is_empty() {
        return crate::utils::empty();
    }

    quote! {
        fn register_dependencies(registry: &mut #type_registry_) {
            #(registry.register::<#field_types>();)*
        }
    }
}
