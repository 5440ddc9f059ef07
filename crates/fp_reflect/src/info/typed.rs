use crate::info::{TypeInfo, TypePath};

// -----------------------------------------------------------------------------
// Typed

/// Static access to the [`TypeInfo`] of a type.
///
/// Implemented by [`#[derive(Reflect)]`](crate::derive::Reflect). Manual
/// implementations keep the info in a
/// [`NonGenericTypeInfoCell`](crate::impls::NonGenericTypeInfoCell) or a
/// [`GenericTypeInfoCell`](crate::impls::GenericTypeInfoCell):
///
/// ```
/// use fp_reflect::impls::NonGenericTypeInfoCell;
/// use fp_reflect::info::{OpaqueInfo, TypeInfo, TypePath, Typed};
///
/// struct Token;
///
/// impl TypePath for Token {
///     fn type_path() -> &'static str { "my_crate::Token" }
///     fn type_name() -> &'static str { "Token" }
///     fn type_ident() -> &'static str { "Token" }
/// }
///
/// impl Typed for Token {
///     fn type_info() -> &'static TypeInfo {
///         static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
///         CELL.get_or_init(|| TypeInfo::Opaque(OpaqueInfo::new::<Self>()))
///     }
/// }
///
/// assert_eq!(Token::type_info().type_path(), "my_crate::Token");
/// ```
///
/// `Box<T>` reports the info of `T`: a boxed field reflects as its pointee.
pub trait Typed: TypePath {
    /// Returns the compile-time info of this type.
    fn type_info() -> &'static TypeInfo;
}

// -----------------------------------------------------------------------------
// DynamicTyped

/// Dynamic dispatch for [`Typed`], implemented for every `Typed` type.
pub trait DynamicTyped {
    /// See [`Typed::type_info`].
    fn reflect_type_info(&self) -> &'static TypeInfo;
}

impl<T: Typed> DynamicTyped for T {
    #[inline]
    fn reflect_type_info(&self) -> &'static TypeInfo {
        Self::type_info()
    }
}
