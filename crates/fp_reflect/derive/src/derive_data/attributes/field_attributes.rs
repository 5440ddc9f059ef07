use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::meta::ParseNestedMeta;
use syn::{Attribute, Lit, LitStr};

use crate::REFLECT_ATTRIBUTE_NAME;

/// Field level `#[reflect(...)]` attributes.
#[derive(Default, Debug)]
pub(crate) struct FieldAttributes {
    pub ignore: Option<Span>,
    pub flatten: Option<Span>,
    pub base: Option<Span>,
    pub rename: Option<LitStr>,
    pub skip_serializing: bool,
    pub skip_deserializing: bool,
    pub since: Option<f64>,
    pub until: Option<f64>,
}

impl FieldAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();
        for attr in attrs {
            if attr.path().is_ident(REFLECT_ATTRIBUTE_NAME) {
                attr.parse_nested_meta(|meta| this.parse_meta(meta))?;
            }
        }

        if let (Some(_), Some(span)) = (this.flatten, this.base) {
            return Err(syn::Error::new(span, "a field cannot be both `flatten` and `base`"));
        }
        if let (Some(since), Some(until)) = (this.since, this.until)
            && until <= since
        {
            return Err(syn::Error::new(
                Span::call_site(),
                "`until` must be greater than `since`",
            ));
        }
        Ok(this)
    }

    fn parse_meta(&mut self, meta: ParseNestedMeta) -> syn::Result<()> {
        let Some(ident) = meta.path.get_ident() else {
            return Err(meta.error("expected an identifier"));
        };
        let span = ident.span();

        match ident.to_string().as_str() {
            "ignore" => self.ignore = Some(span),
            "flatten" => self.flatten = Some(span),
            "base" => self.base = Some(span),
            "rename" => {
                let name: LitStr = meta.value()?.parse()?;
                if name.value().is_empty() {
                    return Err(syn::Error::new(name.span(), "`rename` cannot be empty"));
                }
                self.rename = Some(name);
            }
            "skip" => {
                self.skip_serializing = true;
                self.skip_deserializing = true;
            }
            "skip_serializing" => self.skip_serializing = true,
            "skip_deserializing" => self.skip_deserializing = true,
            "since" => self.since = Some(parse_version(&meta)?),
            "until" => self.until = Some(parse_version(&meta)?),
            _ => {
                return Err(meta.error(
                    "unknown field attribute, expected one of: `flatten`, `base`, `rename`, \
                     `skip`, `skip_serializing`, `skip_deserializing`, `since`, `until`, `ignore`",
                ));
            }
        }
        Ok(())
    }

    /// The `FieldAttributes` constructor expression, e.g.
    ///
    /// ```ignore
    /// _path_::FieldAttributes::new().with_flatten().with_since(1.1f64)
    /// ```
    pub fn to_tokens(&self, field_attributes_: &TokenStream) -> TokenStream {
        let mut tokens = quote! { #field_attributes_::new() };
        if self.flatten.is_some() {
            tokens.extend(quote! { .with_flatten() });
        }
        if self.base.is_some() {
            tokens.extend(quote! { .with_base() });
        }
        if let Some(rename) = &self.rename {
            tokens.extend(quote! { .with_rename(#rename) });
        }
        if self.skip_serializing {
            tokens.extend(quote! { .with_skip_serializing() });
        }
        if self.skip_deserializing {
            tokens.extend(quote! { .with_skip_deserializing() });
        }
        if let Some(since) = self.since {
            tokens.extend(quote! { .with_since(#since) });
        }
        if let Some(until) = self.until {
            tokens.extend(quote! { .with_until(#until) });
        }
        tokens
    }
}

/// Parses `= 1.1` or `= 2`.
fn parse_version(meta: &ParseNestedMeta) -> syn::Result<f64> {
    match meta.value()?.parse::<Lit>()? {
        Lit::Float(lit) => lit.base10_parse(),
        Lit::Int(lit) => lit.base10_parse(),
        lit => Err(syn::Error::new(lit.span(), "expected a version number")),
    }
}
