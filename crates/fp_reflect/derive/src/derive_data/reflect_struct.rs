use proc_macro2::TokenStream;
use quote::quote;
use syn::ext::IdentExt;
use syn::{Field, Ident, Type};

use super::{FieldAttributes, ReflectMeta};

/// A struct field with its parsed attributes.
pub(crate) struct StructField<'a> {
    pub data: &'a Field,
    pub attrs: FieldAttributes,
    /// Index among the reflected fields, `None` for ignored fields.
    pub reflection_index: Option<usize>,
}

impl StructField<'_> {
    #[inline]
    pub fn ident(&self) -> &Ident {
        // Only structs with named fields reach this point.
        match &self.data.ident {
            Some(ident) => ident,
            None => unreachable!("struct fields are named"),
        }
    }

    #[inline]
    pub fn ty(&self) -> &Type {
        &self.data.ty
    }

    /// The field name as seen through reflection, without a `r#` prefix.
    #[inline]
    pub fn name(&self) -> String {
        self.ident().unraw().to_string()
    }
}

/// A struct with named fields.
pub(crate) struct ReflectStruct<'a> {
    meta: ReflectMeta<'a>,
    fields: Vec<StructField<'a>>,
}

impl<'a> ReflectStruct<'a> {
    pub fn new(
        mut meta: ReflectMeta<'a>,
        fields: impl Iterator<Item = &'a Field>,
    ) -> syn::Result<Self> {
        let mut reflection_index = 0;
        let mut parsed = Vec::new();

        for data in fields {
            let attrs = FieldAttributes::parse_attrs(&data.attrs)?;
            let index = if attrs.ignore.is_some() {
                None
            } else {
                reflection_index += 1;
                Some(reflection_index - 1)
            };
            parsed.push(StructField {
                data,
                attrs,
                reflection_index: index,
            });
        }

        meta.set_active_types(
            parsed
                .iter()
                .filter(|field| field.reflection_index.is_some())
                .map(StructField::ty),
        );

        Ok(Self {
            meta,
            fields: parsed,
        })
    }

    #[inline]
    pub fn meta(&self) -> &ReflectMeta<'a> {
        &self.meta
    }

    /// Reflected fields, in declaration order.
    pub fn active_fields(&self) -> impl Iterator<Item = &StructField<'a>> {
        self.fields
            .iter()
            .filter(|field| field.reflection_index.is_some())
    }

    /// The `TypeInfo` expression of this struct.
    pub fn to_info_tokens(&self) -> TokenStream {
        let fp_reflect_path = self.meta.fp_reflect_path();
        let type_info_ = crate::path::type_info_(fp_reflect_path);
        let struct_info_ = crate::path::struct_info_(fp_reflect_path);
        let named_field_ = crate::path::named_field_(fp_reflect_path);
        let field_attributes_ = crate::path::field_attributes_(fp_reflect_path);

        let fields = self.active_fields().map(|field| {
            let ty = field.ty();
            let name = field.name();
            let attributes = field.attrs.to_tokens(&field_attributes_);
            quote! {
                #named_field_::new::<#ty>(#name).with_attributes(#attributes)
            }
        });

        quote! {
            #type_info_::Struct(#struct_info_::new::<Self>(&[
                #(#fields,)*
            ]))
        }
    }
}
