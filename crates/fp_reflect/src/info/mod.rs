//! Static type information.
//!
//! - [`TypePath`] / [`DynamicTypePath`]: stable type names, without a `::` prefix.
//! - [`Type`]: a [`TypeId`](core::any::TypeId) paired with its [`TypePathTable`].
//! - [`Typed`] / [`DynamicTyped`]: access to the [`TypeInfo`] of a type.
//! - [`TypeInfo`]: one of
//!     - [`StructInfo`]: named fields, in declaration order, each a [`NamedField`]
//!       carrying its [`FieldAttributes`].
//!     - [`OptionInfo`]: `Option<T>`, with constructors for both variants.
//!     - [`ListInfo`]: `Vec<T>`, with a constructor from items.
//!     - [`OpaqueInfo`]: values only reachable through registered codecs.
//! - [`ReflectKind`]: the kind tag of a [`TypeInfo`].

// -----------------------------------------------------------------------------
// Modules

mod field_info;
mod list_info;
mod opaque_info;
mod option_info;
mod struct_info;
mod type_info;
mod type_path;
mod typed;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use type_path::impl_type_fn;

// -----------------------------------------------------------------------------
// Exports

pub use field_info::{FieldAttributes, NamedField};
pub use list_info::ListInfo;
pub use opaque_info::OpaqueInfo;
pub use option_info::OptionInfo;
pub use struct_info::StructInfo;
pub use type_info::{ReflectKind, ReflectKindError, TypeInfo};
pub use type_path::{DynamicTypePath, Type, TypePath, TypePathTable};
pub use typed::{DynamicTyped, Typed};
