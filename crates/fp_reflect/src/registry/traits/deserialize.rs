use alloc::boxed::Box;

use serde_core::{Deserialize, Deserializer};

use crate::Reflect;
use crate::info::Typed;
use crate::registry::FromType;

/// Deserializes a reflected value through the `serde` impl of its type.
///
/// ```
/// use core::any::TypeId;
/// use fp_reflect::registry::{TypeRegistry, TypeTraitDeserialize};
///
/// let registry = TypeRegistry::new();
/// let codec = registry
///     .get_type_trait::<TypeTraitDeserialize>(TypeId::of::<String>())
///     .unwrap();
///
/// let mut de = serde_json::Deserializer::from_str(r#""Battery""#);
/// let value = codec.deserialize(&mut de).unwrap();
/// assert_eq!(value.take::<String>().unwrap(), "Battery");
/// ```
#[derive(Clone)]
pub struct TypeTraitDeserialize {
    func: fn(
        deserializer: &mut dyn erased_serde::Deserializer,
    ) -> Result<Box<dyn Reflect>, erased_serde::Error>,
}

impl TypeTraitDeserialize {
    /// Deserializes one value of the type this was built for.
    #[inline(always)]
    pub fn deserialize<'de, D: Deserializer<'de>>(
        &self,
        deserializer: D,
    ) -> Result<Box<dyn Reflect>, D::Error> {
        let mut erased = <dyn erased_serde::Deserializer>::erase(deserializer);
        (self.func)(&mut erased).map_err(<D::Error as serde_core::de::Error>::custom)
    }
}

impl<T: for<'a> Deserialize<'a> + Typed + Reflect> FromType<T> for TypeTraitDeserialize {
    fn from_type() -> Self {
        Self {
            func: |deserializer| Ok(Box::new(T::deserialize(deserializer)?)),
        }
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::string::{String, ToString};

    use super::TypeTraitDeserialize;
    use crate::registry::FromType;

    #[test]
    fn type_mismatch_is_a_deserializer_error() {
        let codec = <TypeTraitDeserialize as FromType<u8>>::from_type();
        let mut de = serde_json::Deserializer::from_str(r#""not a number""#);
        let err = codec.deserialize(&mut de).unwrap_err();
        assert!(err.to_string().contains("invalid type"));

        let codec = <TypeTraitDeserialize as FromType<String>>::from_type();
        let mut de = serde_json::Deserializer::from_str(r#""ok""#);
        assert!(codec.deserialize(&mut de).unwrap().is::<String>());
    }
}
