//! Naming and exclusion policies consulted while describing fields.
//!
//! - [`NamingPolicy`]: derives a document member name from a field, unless the
//!   field carries `#[reflect(rename = "...")]`.
//! - [`ExclusionPolicy`]: decides, per direction, whether a field or a type
//!   takes part in (de)serialization. [`Excluder`] is the default one.

// -----------------------------------------------------------------------------
// Modules

mod exclusion;
mod naming;

// -----------------------------------------------------------------------------
// Exports

pub use exclusion::{Excluder, ExclusionPolicy, ExclusionStrategy};
pub use naming::{FieldNamingPolicy, NamingPolicy};
