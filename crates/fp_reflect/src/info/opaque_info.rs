use crate::info::{Type, TypePath, impl_type_fn};

/// Information of a type without reflected structure.
///
/// Values of such types are only reachable through the codecs registered
/// for them, see [`TypeTraitSerialize`](crate::registry::TypeTraitSerialize).
#[derive(Clone, Debug)]
pub struct OpaqueInfo {
    ty: Type,
}

impl OpaqueInfo {
    impl_type_fn!(ty);

    #[inline]
    pub const fn new<T: TypePath + ?Sized>() -> Self {
        Self { ty: Type::of::<T>() }
    }
}
