//! Kind traits: typed views of a reflected value.
//!
//! - [`Struct`]: named fields, by name or by declaration index.
//! - [`Optional`]: a value that may be absent, e.g. `Option<T>`.
//! - [`List`]: an ordered sequence, e.g. `Vec<T>`.
//!
//! [`Reflect::reflect_ref`] and [`Reflect::reflect_mut`] return these views
//! wrapped in [`ReflectRef`] / [`ReflectMut`].
//!
//! [`Reflect::reflect_ref`]: crate::Reflect::reflect_ref
//! [`Reflect::reflect_mut`]: crate::Reflect::reflect_mut

// -----------------------------------------------------------------------------
// Modules

mod kind;
mod list_ops;
mod option_ops;
mod struct_ops;

// -----------------------------------------------------------------------------
// Exports

pub use kind::{ReflectMut, ReflectRef};
pub use list_ops::{List, ListItemIter};
pub use option_ops::Optional;
pub use struct_ops::{Struct, StructFieldIter};
