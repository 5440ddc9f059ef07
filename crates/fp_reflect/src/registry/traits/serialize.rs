use serde_core::ser::Error as _;
use serde_core::{Serialize, Serializer};

use crate::Reflect;
use crate::info::Typed;
use crate::registry::FromType;

/// Serializes a reflected value through the `serde` impl of its type.
///
/// The value is downcast to the type this trait was built for; a value of
/// another type is reported as a serializer error.
///
/// ```
/// use fp_reflect::Reflect;
/// use fp_reflect::registry::{FromType, TypeTraitSerialize};
///
/// let codec = <TypeTraitSerialize as FromType<u32>>::from_type();
///
/// let mut out = Vec::new();
/// codec.serialize(&7_u32, &mut serde_json::Serializer::new(&mut out)).unwrap();
/// assert_eq!(out, b"7");
///
/// let mut out = Vec::new();
/// assert!(codec.serialize(&7_i8, &mut serde_json::Serializer::new(&mut out)).is_err());
/// ```
#[derive(Clone)]
pub struct TypeTraitSerialize {
    type_path: fn() -> &'static str,
    fun: fn(&dyn Reflect) -> Option<&dyn erased_serde::Serialize>,
}

impl<T: erased_serde::Serialize + Typed + Reflect> FromType<T> for TypeTraitSerialize {
    fn from_type() -> Self {
        Self {
            type_path: T::type_path,
            fun: |value| {
                value
                    .downcast_ref::<T>()
                    .map(|value| value as &dyn erased_serde::Serialize)
            },
        }
    }
}

impl TypeTraitSerialize {
    /// Serializes `value` with the `Serialize` impl of its type.
    pub fn serialize<S: Serializer>(
        &self,
        value: &dyn Reflect,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match (self.fun)(value) {
            Some(value) => value.serialize(serializer),
            None => Err(S::Error::custom(format_args!(
                "serializer of `{}` received a value of type `{}`",
                (self.type_path)(),
                value.reflect_type_path(),
            ))),
        }
    }

    /// Path of the type this serializer was built for.
    #[inline]
    pub fn type_path(&self) -> &'static str {
        (self.type_path)()
    }
}
