//! Field-path flattening for reflected structs.
//!
//! A field marked `#[reflect(flatten)]` does not become a nested object in
//! the document: its own members are hoisted into the parent, recursively.
//! Each type gets an immutable [`BoundFieldTable`](flatten::BoundFieldTable)
//! mapping document member names to field paths, built once and shared.
//!
//! ```
//! use fp_flat::context::FlatContext;
//! use fp_flat::policy::FieldNamingPolicy;
//! use fp_flat::serde::{DeserializeDriver, SerializeDriver};
//! use fp_reflect::derive::Reflect;
//! use fp_reflect::info::Typed;
//! use serde_core::de::DeserializeSeed;
//!
//! #[derive(Reflect, Default, Debug, PartialEq)]
//! #[reflect(default)]
//! struct Owner {
//!     name: String,
//!     #[reflect(flatten)]
//!     bag: Option<Bag>,
//! }
//!
//! #[derive(Reflect, Default, Debug, PartialEq)]
//! #[reflect(default)]
//! struct Bag {
//!     item_name: String,
//! }
//!
//! let ctx = FlatContext::builder()
//!     .register::<Owner>()
//!     .naming_policy(FieldNamingPolicy::LowerCamelCase)
//!     .build();
//!
//! let owner = Owner {
//!     name: "Douglas".into(),
//!     bag: Some(Bag { item_name: "Brush".into() }),
//! };
//! let json = serde_json::to_string(&SerializeDriver::new(&owner, &ctx)).unwrap();
//! assert_eq!(json, r#"{"name":"Douglas","itemName":"Brush"}"#);
//!
//! let mut de = serde_json::Deserializer::from_str(&json);
//! let value = DeserializeDriver::new(Owner::type_info(), &ctx)
//!     .deserialize(&mut de)
//!     .unwrap();
//! assert_eq!(value.take::<Owner>().unwrap(), owner);
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

// -----------------------------------------------------------------------------
// no_std support

// `core` and `alloc` paths are preferred, `std` is only reached for
// synchronization and thread-locals.
extern crate alloc;
extern crate std;

// -----------------------------------------------------------------------------
// Modules

pub mod context;
pub mod flatten;
pub mod policy;
pub mod serde;

// -----------------------------------------------------------------------------
// Top-level exports

pub use context::{FlatContext, FlatContextBuilder};
pub use flatten::{FlatAdapter, FlatAdapterFactory, FlattenError};
