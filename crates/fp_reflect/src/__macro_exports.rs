//! Items the derive macro refers to. Not public API.

pub mod macro_utils {
    pub use ::alloc::boxed::Box;
    pub use ::core::option::Option::{self, None, Some};
    pub use ::core::result::Result::{self, Err, Ok};

    pub use ::erased_serde::Serialize as ErasedSerialize;
    pub use ::serde_core::Deserialize;
}

#[cfg(feature = "auto_register")]
pub mod auto_register {
    pub use ::inventory;

    use crate::derive::Reflect;
    use crate::registry::{GetTypeMeta, TypeRegistry};

    /// A registration function collected by `#[reflect(auto_register)]`.
    pub struct __AutoRegisterFunc(pub fn(&mut TypeRegistry));

    inventory::collect!(__AutoRegisterFunc);

    pub trait __RegisterType {
        fn __register(registry: &mut TypeRegistry);
    }

    impl<T: GetTypeMeta> __RegisterType for T {
        #[inline]
        fn __register(registry: &mut TypeRegistry) {
            registry.register::<T>();
        }
    }

    /// Registered together with the user types: finding it in a registry
    /// after [`__register_types`] proves `inventory` works here.
    #[derive(Reflect)]
    #[reflect(opaque, auto_register)]
    pub struct __AvailFlag;

    pub fn __register_types(registry: &mut TypeRegistry) {
        for func in inventory::iter::<__AutoRegisterFunc> {
            (func.0)(registry);
        }
    }
}
