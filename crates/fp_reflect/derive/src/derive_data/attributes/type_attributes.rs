use proc_macro2::Span;
use syn::meta::ParseNestedMeta;
use syn::{Attribute, LitStr};

use super::TraitAvailableFlags;
use crate::REFLECT_ATTRIBUTE_NAME;

/// Type level `#[reflect(...)]` attributes.
#[derive(Default, Debug)]
pub(crate) struct TypeAttributes {
    pub avail_traits: TraitAvailableFlags,
    pub opaque: Option<Span>,
    pub auto_register: Option<Span>,
    pub type_path: Option<LitStr>,
}

impl TypeAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();
        for attr in attrs {
            if attr.path().is_ident(REFLECT_ATTRIBUTE_NAME) {
                attr.parse_nested_meta(|meta| this.parse_meta(meta))?;
            }
        }
        Ok(this)
    }

    fn parse_meta(&mut self, meta: ParseNestedMeta) -> syn::Result<()> {
        let Some(ident) = meta.path.get_ident() else {
            return Err(meta.error("expected an identifier"));
        };
        let span = ident.span();

        match ident.to_string().as_str() {
            "default" => self.avail_traits.default = Some(span),
            "serialize" => self.avail_traits.serialize = Some(span),
            "deserialize" => self.avail_traits.deserialize = Some(span),
            "serde" => {
                self.avail_traits.serialize = Some(span);
                self.avail_traits.deserialize = Some(span);
            }
            "opaque" => self.opaque = Some(span),
            "auto_register" => self.auto_register = Some(span),
            "type_path" => {
                let path: LitStr = meta.value()?.parse()?;
                let text = path.value();
                if text.is_empty() || text.starts_with("::") || text.ends_with("::") {
                    return Err(syn::Error::new(
                        path.span(),
                        "`type_path` must be a non-empty path without leading or trailing `::`",
                    ));
                }
                self.type_path = Some(path);
            }
            "flatten" | "base" | "rename" | "skip" | "skip_serializing" | "skip_deserializing"
            | "since" | "until" | "ignore" => {
                return Err(meta.error(format_args!("`{ident}` can only be used on fields")));
            }
            _ => {
                return Err(meta.error(
                    "unknown attribute, expected one of: `default`, `serialize`, `deserialize`, \
                     `serde`, `opaque`, `auto_register`, `type_path`",
                ));
            }
        }
        Ok(())
    }
}
