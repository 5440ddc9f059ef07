//! Runtime registry of reflected types.
//!
//! - [`TypeTrait`]: a capability attached to a type, stored type-erased.
//! - [`FromType`]: builds a `TypeTrait` for a concrete type.
//! - [`TypeMeta`]: the [`TypeInfo`] of a type plus its `TypeTrait` table.
//! - [`GetTypeMeta`]: builds the `TypeMeta` of a type, implemented by the derive.
//! - [`TypeRegistry`]: all registered `TypeMeta`s, by id, path or name.
//! - Type traits:
//!     - [`TypeTraitDefault`]: creates a default value.
//!     - [`TypeTraitSerialize`]: serializes a value with its own `serde` impl.
//!     - [`TypeTraitDeserialize`]: deserializes a value with its own `serde` impl.
//!
//! ## auto_register
//!
//! With the `auto_register` feature, types marked `#[reflect(auto_register)]`
//! are collected through [`inventory`] and registered by
//! [`TypeRegistry::auto_register`]. Platforms without `inventory` support
//! make that call a no-op returning `false`.
//!
//! [`TypeInfo`]: crate::info::TypeInfo
//! [`inventory`]: https://docs.rs/inventory

// -----------------------------------------------------------------------------
// Modules

mod from_type;
mod traits;
mod type_meta;
mod type_registry;
mod type_trait;

// -----------------------------------------------------------------------------
// Exports

pub use from_type::FromType;
pub use traits::TypeTraitDefault;
pub use traits::{TypeTraitDeserialize, TypeTraitSerialize};
pub use type_meta::{GetTypeMeta, TypeMeta};
pub use type_registry::TypeRegistry;
pub use type_trait::TypeTrait;
