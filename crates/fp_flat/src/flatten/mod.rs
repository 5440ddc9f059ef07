//! The flattening engine.
//!
//! - [`DescriptorProvider`]: lists a struct's fields, inherited ones included,
//!   with member names and directions.
//! - [`FlattenResolver`]: builds a [`BoundFieldTable`], hoisting the members
//!   of `#[reflect(flatten)]` fields into their parent.
//! - [`BoundField`]: one member, a field path plus a leaf [`Codec`]. Writes
//!   stop at absent intermediates, reads construct them.
//! - [`FlatAdapter`]: reads and writes whole values through a table.
//! - [`FlatAdapterFactory`]: creates adapters for struct types.
//!
//! Flattening through lists is not supported.
//!
//! [`Codec`]: crate::serde::Codec

// -----------------------------------------------------------------------------
// Modules

mod adapter;
mod bound_field;
mod descriptor;
mod error;
mod factory;
mod resolver;
mod table;

// -----------------------------------------------------------------------------
// Exports

pub use adapter::FlatAdapter;
pub use bound_field::BoundField;
pub use descriptor::{DescriptorProvider, FieldDescriptor, FieldStep};
pub use error::FlattenError;
pub use factory::FlatAdapterFactory;
pub use resolver::FlattenResolver;
pub use table::{BoundFieldTable, FieldArena, StepId};

// -----------------------------------------------------------------------------
// Internal API

use fp_reflect::info::{StructInfo, TypeInfo};

/// Looks through `Option` layers down to a struct.
///
/// Boxes need no unwrapping, they share the info of their pointee.
pub(crate) fn unwrap_struct(mut info: &'static TypeInfo) -> Option<&'static StructInfo> {
    loop {
        match info {
            TypeInfo::Struct(info) => return Some(info),
            TypeInfo::Optional(option) => info = option.some_info(),
            TypeInfo::List(_) | TypeInfo::Opaque(_) => return None,
        }
    }
}
