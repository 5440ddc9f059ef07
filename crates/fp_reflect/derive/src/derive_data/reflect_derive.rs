use syn::spanned::Spanned;
use syn::{Data, DeriveInput, Fields, GenericParam};

use super::{ReflectMeta, ReflectStruct, TypeAttributes};

/// The shape the derive generates code for.
pub(crate) enum ReflectDerive<'a> {
    Struct(ReflectStruct<'a>),
    Opaque(ReflectMeta<'a>),
}

impl<'a> ReflectDerive<'a> {
    pub fn from_input(input: &'a DeriveInput) -> syn::Result<Self> {
        for param in &input.generics.params {
            match param {
                GenericParam::Type(_) => {}
                GenericParam::Lifetime(lifetime) => {
                    return Err(syn::Error::new(
                        lifetime.span(),
                        "reflected types cannot have lifetime parameters",
                    ));
                }
                GenericParam::Const(param) => {
                    return Err(syn::Error::new(
                        param.span(),
                        "reflected types cannot have const parameters",
                    ));
                }
            }
        }

        let attrs = TypeAttributes::parse_attrs(&input.attrs)?;
        let opaque = attrs.opaque.is_some();
        let meta = ReflectMeta::new(attrs, &input.ident, &input.generics);

        if opaque {
            return Ok(Self::Opaque(meta));
        }

        match &input.data {
            Data::Struct(data) => match &data.fields {
                Fields::Named(fields) => {
                    ReflectStruct::new(meta, fields.named.iter()).map(Self::Struct)
                }
                Fields::Unit => Ok(Self::Opaque(meta)),
                Fields::Unnamed(fields) => Err(syn::Error::new(
                    fields.span(),
                    "tuple structs must be marked `#[reflect(opaque)]`",
                )),
            },
            Data::Enum(data) => Err(syn::Error::new(
                data.enum_token.span(),
                "enums must be marked `#[reflect(opaque)]`",
            )),
            Data::Union(data) => Err(syn::Error::new(
                data.union_token.span(),
                "unions cannot be reflected",
            )),
        }
    }
}
