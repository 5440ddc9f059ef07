use core::any::TypeId;

use crate::info::{TypeInfo, Typed};

// -----------------------------------------------------------------------------
// FieldAttributes

/// Mapping markers of a struct field, set through `#[reflect(...)]`.
///
/// | attribute                 | accessor                |
/// |---------------------------|-------------------------|
/// | `flatten`                 | [`flatten`]             |
/// | `base`                    | [`base`]                |
/// | `rename = "name"`         | [`rename`]              |
/// | `skip`                    | both `skip_*` flags     |
/// | `skip_serializing`        | [`skip_serializing`]    |
/// | `skip_deserializing`      | [`skip_deserializing`]  |
/// | `since = 1.1`             | [`since`]               |
/// | `until = 2.0`             | [`until`]               |
///
/// ```
/// use fp_reflect::info::FieldAttributes;
///
/// const ATTRS: FieldAttributes = FieldAttributes::new()
///     .with_flatten()
///     .with_rename("bag");
///
/// assert!(ATTRS.flatten());
/// assert_eq!(ATTRS.rename(), Some("bag"));
/// assert!(!ATTRS.skip_serializing());
/// ```
///
/// [`flatten`]: FieldAttributes::flatten
/// [`base`]: FieldAttributes::base
/// [`rename`]: FieldAttributes::rename
/// [`skip_serializing`]: FieldAttributes::skip_serializing
/// [`skip_deserializing`]: FieldAttributes::skip_deserializing
/// [`since`]: FieldAttributes::since
/// [`until`]: FieldAttributes::until
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FieldAttributes {
    flatten: bool,
    base: bool,
    rename: Option<&'static str>,
    skip_serializing: bool,
    skip_deserializing: bool,
    since: Option<f64>,
    until: Option<f64>,
}

impl FieldAttributes {
    #[inline]
    pub const fn new() -> Self {
        Self {
            flatten: false,
            base: false,
            rename: None,
            skip_serializing: false,
            skip_deserializing: false,
            since: None,
            until: None,
        }
    }

    /// The field's own fields are hoisted into the parent.
    #[inline]
    pub const fn with_flatten(mut self) -> Self {
        self.flatten = true;
        self
    }

    /// The field plays the role of a parent type: its fields follow the
    /// owner's own fields.
    #[inline]
    pub const fn with_base(mut self) -> Self {
        self.base = true;
        self
    }

    #[inline]
    pub const fn with_rename(mut self, name: &'static str) -> Self {
        self.rename = Some(name);
        self
    }

    #[inline]
    pub const fn with_skip_serializing(mut self) -> Self {
        self.skip_serializing = true;
        self
    }

    #[inline]
    pub const fn with_skip_deserializing(mut self) -> Self {
        self.skip_deserializing = true;
        self
    }

    #[inline]
    pub const fn with_since(mut self, version: f64) -> Self {
        self.since = Some(version);
        self
    }

    #[inline]
    pub const fn with_until(mut self, version: f64) -> Self {
        self.until = Some(version);
        self
    }

    #[inline(always)]
    pub const fn flatten(&self) -> bool {
        self.flatten
    }

    #[inline(always)]
    pub const fn base(&self) -> bool {
        self.base
    }

    #[inline(always)]
    pub const fn rename(&self) -> Option<&'static str> {
        self.rename
    }

    #[inline(always)]
    pub const fn skip_serializing(&self) -> bool {
        self.skip_serializing
    }

    #[inline(always)]
    pub const fn skip_deserializing(&self) -> bool {
        self.skip_deserializing
    }

    /// First version the field exists in, inclusive.
    #[inline(always)]
    pub const fn since(&self) -> Option<f64> {
        self.since
    }

    /// Version the field was removed in, exclusive.
    #[inline(always)]
    pub const fn until(&self) -> Option<f64> {
        self.until
    }
}

// -----------------------------------------------------------------------------
// NamedField

/// A field of a struct: its name, type and [`FieldAttributes`].
#[derive(Clone, Debug)]
pub struct NamedField {
    name: &'static str,
    // `TypeInfo` is created on first access; the pointer delays it and lets
    // recursive types refer to themselves.
    type_info: fn() -> &'static TypeInfo,
    attributes: FieldAttributes,
}

impl NamedField {
    #[inline]
    pub const fn new<T: Typed>(name: &'static str) -> Self {
        Self {
            name,
            type_info: T::type_info,
            attributes: FieldAttributes::new(),
        }
    }

    #[inline]
    pub const fn with_attributes(mut self, attributes: FieldAttributes) -> Self {
        self.attributes = attributes;
        self
    }

    /// The Rust identifier of the field.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub fn type_info(&self) -> &'static TypeInfo {
        (self.type_info)()
    }

    /// The id of the field's reflected type.
    #[inline]
    pub fn ty_id(&self) -> TypeId {
        self.type_info().ty_id()
    }

    #[inline]
    pub const fn attributes(&self) -> &FieldAttributes {
        &self.attributes
    }
}
