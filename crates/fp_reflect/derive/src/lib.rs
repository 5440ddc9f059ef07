//! The derive macro of `fp_reflect`, see [`Reflect`].
#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(clippy::std_instead_of_core, reason = "proc-macro lib")]
#![allow(clippy::std_instead_of_alloc, reason = "proc-macro lib")]

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

static REFLECT_ATTRIBUTE_NAME: &str = "reflect";

// -----------------------------------------------------------------------------
// Modules

mod derive_data;
mod impls;
mod path;
mod utils;

// -----------------------------------------------------------------------------
// Macros

/// # Reflection Derivation
///
/// `#[derive(Reflect)]` implements:
///
/// - `TypePath`
/// - `Typed`
/// - `Reflect`
/// - `FromReflect`
/// - `GetTypeMeta`
/// - `Struct` (for `struct T { ... }`)
///
/// Unit structs (`struct T;`) and types marked `opaque` reflect as `Opaque`.
/// Tuple structs and enums must be marked `opaque`.
///
/// ## Type attributes
///
/// ```rust, ignore
/// #[derive(Reflect, Default, Serialize, Deserialize)]
/// #[reflect(default, serde, type_path = "shop::Brush")]
/// struct Brush { /* ... */ }
/// ```
///
/// - `default`: registers `TypeTraitDefault`, requires `Default`. Types
///   reached through a flattened path need it to be built on demand.
/// - `serialize` / `deserialize`: register the `serde` codecs of the type.
/// - `serde`: `serialize` + `deserialize`.
/// - `opaque`: fields are not inspected.
/// - `auto_register`: registers the type in `TypeRegistry::auto_register`.
///   Ignored for generic types and without the `auto_register` feature.
/// - `type_path = "a::b::Name"`: overrides the `module_path!()` based path.
///
/// ## Field attributes
///
/// ```rust, ignore
/// #[derive(Reflect)]
/// struct Brush {
///     #[reflect(flatten)]
///     battery: Option<Battery>,
///     #[reflect(rename = "brushName", since = 1.1)]
///     name: String,
///     #[reflect(ignore)]
///     cache: Vec<u8>,
/// }
/// ```
///
/// - `flatten`: the field's own fields are hoisted into the owner's document.
/// - `base`: the field acts as a parent type; its fields follow the owner's.
/// - `rename = "name"`: the document name of the field.
/// - `skip`: `skip_serializing` + `skip_deserializing`.
/// - `skip_serializing` / `skip_deserializing`: exclude one direction.
/// - `since = 1.0` / `until = 2.0`: the version range the field exists in.
/// - `ignore`: removes the field from reflection entirely.
#[proc_macro_derive(Reflect, attributes(reflect))]
pub fn derive_reflect(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    impls::match_reflect_impls(ast)
}
