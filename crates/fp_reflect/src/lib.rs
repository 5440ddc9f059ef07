//! Runtime reflection for `flatpath`.
//!
//! Types deriving [`Reflect`](derive::Reflect) describe themselves through
//! static [`TypeInfo`](info::TypeInfo), expose their fields through the
//! [`ops`] traits and register capabilities (default construction, serde
//! codecs) in a [`TypeRegistry`](registry::TypeRegistry).
//!
//! ```
//! use fp_reflect::derive::Reflect;
//! use fp_reflect::info::{Typed, TypeInfo};
//! use fp_reflect::ops::ReflectRef;
//! use fp_reflect::Reflect;
//!
//! #[derive(Reflect, Default)]
//! #[reflect(default)]
//! struct Item {
//!     item_name: String,
//!     #[reflect(flatten)]
//!     part: Option<Part>,
//! }
//!
//! #[derive(Reflect, Default)]
//! #[reflect(default)]
//! struct Part {
//!     part_name: String,
//! }
//!
//! let TypeInfo::Struct(info) = Item::type_info() else { unreachable!() };
//! assert_eq!(info.field_names(), &["item_name", "part"]);
//! assert!(info.field("part").unwrap().attributes().flatten());
//!
//! let item = Item { item_name: "Brush".into(), part: None };
//! let ReflectRef::Struct(fields) = item.reflect_ref() else { unreachable!() };
//! assert_eq!(fields.field("item_name").unwrap().downcast_ref::<String>().unwrap(), "Brush");
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

// -----------------------------------------------------------------------------
// Extern Self

// The derive macro resolves this crate as `fp_reflect`, which must also
// hold for code inside the crate itself.
extern crate self as fp_reflect;

// -----------------------------------------------------------------------------
// no_std support

// `core` and `alloc` paths are preferred, `std` is only reached for
// synchronization and thread-locals.
extern crate alloc;
extern crate std;

// -----------------------------------------------------------------------------
// Modules

mod reflection;

pub mod impls;
pub mod info;
pub mod ops;
pub mod registry;

// -----------------------------------------------------------------------------
// Top-Level exports

pub mod __macro_exports;

pub use fp_reflect_derive as derive;
pub use reflection::{FromReflect, Reflect};
