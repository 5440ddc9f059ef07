//! Small containers shared by the `flatpath` crates.
//!
//! - [`hash`]: hash maps and sets with a fixed, seed-stable hasher.
//! - [`TypeIdMap`] / [`TypeIdSet`]: containers keyed by [`TypeId`](core::any::TypeId)
//!   that skip rehashing the already well distributed id.
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

// -----------------------------------------------------------------------------
// Modules

mod typeid_map;

pub mod hash;

// -----------------------------------------------------------------------------
// Top-level exports

pub use typeid_map::{TypeIdMap, TypeIdSet};
