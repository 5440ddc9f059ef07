//! Reflection for foreign types, plus the helpers used to implement it.
//!
//! - [`concat`]: joins string pieces, used to build generic type paths.
//! - [`NonGenericTypeInfoCell`]: backs [`Typed`] for non-generic types.
//! - [`GenericTypeInfoCell`] / [`GenericTypePathCell`]: back [`Typed`] and
//!   [`TypePath`] for generic types.
//!
//! ## Implemented types
//!
//! - opaque: `()`, `bool`, `char`, `i8`-`i128`, `isize`, `u8`-`u128`,
//!   `usize`, `f32`, `f64`, `String`. All of them register default
//!   construction and serde codecs.
//! - `Option<T>`: [`Optional`](crate::ops::Optional).
//! - `Vec<T>`: [`List`](crate::ops::List).
//! - `Box<T>`: reflects as `T`, which keeps recursive types expressible.
//!
//! [`Typed`]: crate::info::Typed
//! [`TypePath`]: crate::info::TypePath

// -----------------------------------------------------------------------------
// Modules

mod boxed;
mod cell;
mod option;
mod primitives;
mod vec;

// -----------------------------------------------------------------------------
// Exports

pub use cell::{GenericTypeCell, NonGenericTypeCell};
pub use cell::{GenericTypeInfoCell, GenericTypePathCell, NonGenericTypeInfoCell};

/// Concatenates string pieces into one allocation.
///
/// ```
/// use fp_reflect::impls::concat;
///
/// assert_eq!(concat(&["Vec", "<", "u8", ">"]), "Vec<u8>");
/// ```
pub fn concat(pieces: &[&str]) -> alloc::string::String {
    let len = pieces.iter().map(|s| s.len()).sum();
    let mut out = alloc::string::String::with_capacity(len);
    pieces.iter().for_each(|s| out.push_str(s));
    out
}
