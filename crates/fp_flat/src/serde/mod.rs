//! Codec dispatch between reflected values and serde.
//!
//! A value is encoded by the first applicable of:
//!
//! 1. its registered [`TypeTraitSerialize`] / [`TypeTraitDeserialize`];
//! 2. the [`FlatAdapter`] of its struct type;
//! 3. the serde option or sequence forms for `Option<T>` and `Vec<T>`.
//!
//! Opaque types without registered codecs cannot be (de)serialized,
//! annotate them with `#[reflect(serde)]`.
//!
//! [`TypeTraitSerialize`]: fp_reflect::registry::TypeTraitSerialize
//! [`TypeTraitDeserialize`]: fp_reflect::registry::TypeTraitDeserialize
//! [`FlatAdapter`]: crate::flatten::FlatAdapter

// -----------------------------------------------------------------------------
// Modules

mod codec;
mod info_stack;

pub(crate) mod de;
pub(crate) mod ser;

// -----------------------------------------------------------------------------
// Exports

pub use codec::Codec;
pub use de::{DeserializeDriver, Ident};
pub use ser::SerializeDriver;

pub(crate) use info_stack::traced;
