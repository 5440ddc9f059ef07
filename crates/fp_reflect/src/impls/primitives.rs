use alloc::string::String;

use crate::FromReflect;
use crate::impls::NonGenericTypeInfoCell;
use crate::info::{OpaqueInfo, TypeInfo, TypePath, Typed};
use crate::reflection::impl_reflect_cast_fn;
use crate::registry::{FromType, GetTypeMeta, TypeMeta};
use crate::registry::{TypeTraitDefault, TypeTraitDeserialize, TypeTraitSerialize};

/// Implements opaque reflection for types with `Default` and serde support.
macro_rules! impl_reflect_opaque {
    ($($ty:ident)*) => {
        $( impl_reflect_opaque!(@impl $ty, stringify!($ty), stringify!($ty), None); )*
    };
    (@impl $ty:ty, $path:expr, $ident:expr, $module:expr) => {
        impl TypePath for $ty {
            #[inline]
            fn type_path() -> &'static str {
                $path
            }

            #[inline]
            fn type_name() -> &'static str {
                $ident
            }

            #[inline]
            fn type_ident() -> &'static str {
                $ident
            }

            #[inline]
            fn module_path() -> Option<&'static str> {
                $module
            }
        }

        impl Typed for $ty {
            fn type_info() -> &'static TypeInfo {
                static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
                CELL.get_or_init(|| TypeInfo::Opaque(OpaqueInfo::new::<Self>()))
            }
        }

        impl crate::Reflect for $ty {
            impl_reflect_cast_fn!(Opaque);
        }

        impl FromReflect for $ty {}

        impl GetTypeMeta for $ty {
            fn get_type_meta() -> TypeMeta {
                let mut meta = TypeMeta::with_capacity::<Self>(3);
                meta.insert_trait(<TypeTraitDefault as FromType<Self>>::from_type());
                meta.insert_trait(<TypeTraitSerialize as FromType<Self>>::from_type());
                meta.insert_trait(<TypeTraitDeserialize as FromType<Self>>::from_type());
                meta
            }
        }
    };
}

impl_reflect_opaque!(
    bool char
    u8 u16 u32 u64 u128 usize
    i8 i16 i32 i64 i128 isize
    f32 f64
);

impl_reflect_opaque!(@impl (), "()", "()", None);
impl_reflect_opaque!(@impl String, "alloc::string::String", "String", Some("alloc::string"));

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::string::String;

    use crate::Reflect;
    use crate::info::{ReflectKind, TypePath, Typed};
    use crate::registry::{GetTypeMeta, TypeTraitDefault, TypeTraitSerialize};

    #[test]
    fn primitive_paths() {
        assert_eq!(<u32 as TypePath>::type_path(), "u32");
        assert_eq!(<u32 as TypePath>::module_path(), None);
        assert_eq!(String::type_path(), "alloc::string::String");
        assert_eq!(String::module_path(), Some("alloc::string"));
        assert_eq!(<()>::type_name(), "()");
    }

    #[test]
    fn primitives_are_opaque() {
        assert_eq!(f64::type_info().kind(), ReflectKind::Opaque);
        assert_eq!(true.reflect_kind(), ReflectKind::Opaque);
    }

    #[test]
    fn primitive_meta_carries_codecs() {
        let meta = i64::get_type_meta();
        assert!(meta.has_trait::<TypeTraitSerialize>());

        let zero = meta.get_trait::<TypeTraitDefault>().unwrap().default();
        assert_eq!(zero.take::<i64>().unwrap(), 0);
    }
}
