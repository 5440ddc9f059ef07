use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use fp_reflect::Reflect;
use fp_reflect::info::{ListInfo, OptionInfo, TypeInfo};
use fp_reflect::ops::ReflectRef;
use fp_reflect::registry::{TypeRegistry, TypeTraitDeserialize, TypeTraitSerialize};
use serde_core::de::{SeqAccess, Visitor};
use serde_core::ser::SerializeSeq;
use serde_core::{Deserializer, Serializer};

use super::{DeserializeDriver, SerializeDriver, de, ser, traced};
use crate::context::FlatContext;
use crate::flatten::FlattenError;

// -----------------------------------------------------------------------------
// Codec

/// The value conversion of one type.
///
/// Registered serde type traits win, other types are dispatched on their
/// kind at call time.
///
/// ```
/// use fp_flat::serde::Codec;
/// use fp_reflect::info::Typed;
/// use fp_reflect::registry::TypeRegistry;
///
/// let registry = TypeRegistry::new();
/// assert!(Codec::lookup(String::type_info(), &registry).has_type_traits());
/// assert!(!Codec::lookup(<Option<String>>::type_info(), &registry).has_type_traits());
/// ```
#[derive(Clone)]
pub struct Codec {
    info: &'static TypeInfo,
    serialize: Option<TypeTraitSerialize>,
    deserialize: Option<TypeTraitDeserialize>,
}

impl Codec {
    pub fn lookup(info: &'static TypeInfo, registry: &TypeRegistry) -> Self {
        let meta = registry.get(info.ty_id());
        Self {
            info,
            serialize: meta.and_then(|meta| meta.get_trait::<TypeTraitSerialize>()).cloned(),
            deserialize: meta.and_then(|meta| meta.get_trait::<TypeTraitDeserialize>()).cloned(),
        }
    }

    #[inline]
    pub fn info(&self) -> &'static TypeInfo {
        self.info
    }

    /// Returns `true` if a registered serde codec was found.
    #[inline]
    pub fn has_type_traits(&self) -> bool {
        self.serialize.is_some() || self.deserialize.is_some()
    }

    pub fn serialize<S: Serializer>(
        &self,
        value: &dyn Reflect,
        ctx: &FlatContext,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        traced(self.info, || match &self.serialize {
            Some(codec) => codec.serialize(value, serializer),
            None => serialize_by_kind(value, ctx, serializer),
        })
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        &self,
        ctx: &FlatContext,
        deserializer: D,
    ) -> Result<Box<dyn Reflect>, D::Error> {
        traced(self.info, || match &self.deserialize {
            Some(codec) => codec.deserialize(deserializer),
            None => deserialize_by_kind(self.info, ctx, deserializer),
        })
    }
}

impl fmt::Debug for Codec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Codec")
            .field("type_path", &self.info.type_path())
            .field("serialize", &self.serialize.is_some())
            .field("deserialize", &self.deserialize.is_some())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Serialization

fn serialize_by_kind<S: Serializer>(
    value: &dyn Reflect,
    ctx: &FlatContext,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match value.reflect_ref() {
        ReflectRef::Struct(_) => ctx
            .adapter(value.reflect_type_info())
            .map_err(ser::make_custom_error::<S::Error>)?
            .write_map(value, ctx, serializer),
        ReflectRef::Optional(option) => match option.value() {
            Some(inner) => serializer.serialize_some(&SerializeDriver::new(inner, ctx)),
            None => serializer.serialize_none(),
        },
        ReflectRef::List(list) => {
            let mut seq = serializer.serialize_seq(Some(list.len()))?;
            for item in list.iter() {
                seq.serialize_element(&SerializeDriver::new(item, ctx))?;
            }
            seq.end()
        }
        ReflectRef::Opaque(_) => Err(ser::make_custom_error(FlattenError::NoCodec {
            type_path: value.reflect_type_path(),
        })),
    }
}

// -----------------------------------------------------------------------------
// Deserialization

fn deserialize_by_kind<'de, D: Deserializer<'de>>(
    info: &'static TypeInfo,
    ctx: &FlatContext,
    deserializer: D,
) -> Result<Box<dyn Reflect>, D::Error> {
    match info {
        TypeInfo::Struct(_) => ctx
            .adapter(info)
            .map_err(de::make_custom_error::<D::Error>)?
            .read_map(ctx, deserializer),
        TypeInfo::Optional(info) => deserializer.deserialize_option(OptionVisitor { info, ctx }),
        TypeInfo::List(info) => deserializer.deserialize_seq(ListVisitor { info, ctx }),
        TypeInfo::Opaque(_) => Err(de::make_custom_error(FlattenError::NoCodec {
            type_path: info.type_path(),
        })),
    }
}

struct OptionVisitor<'a> {
    info: &'static OptionInfo,
    ctx: &'a FlatContext,
}

impl<'de> Visitor<'de> for OptionVisitor<'_> {
    type Value = Box<dyn Reflect>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an optional value of type ")?;
        formatter.write_str(self.info.type_path())
    }

    #[inline]
    fn visit_none<E: serde_core::de::Error>(self) -> Result<Self::Value, E> {
        Ok(self.info.none())
    }

    #[inline]
    fn visit_unit<E: serde_core::de::Error>(self) -> Result<Self::Value, E> {
        Ok(self.info.none())
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        use serde_core::de::DeserializeSeed;

        let value = DeserializeDriver::new(self.info.some_info(), self.ctx).deserialize(deserializer)?;
        self.info.wrap_some(value).map_err(|value| {
            de::make_custom_error(FlattenError::TypeMismatch {
                expected: self.info.some_info().type_path(),
                found: value.reflect_type_path(),
            })
        })
    }
}

struct ListVisitor<'a> {
    info: &'static ListInfo,
    ctx: &'a FlatContext,
}

impl<'de> Visitor<'de> for ListVisitor<'_> {
    type Value = Box<dyn Reflect>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a sequence of type ")?;
        formatter.write_str(self.info.type_path())
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let item_info = self.info.item_info();
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or_default().min(64));
        while let Some(item) = seq.next_element_seed(DeserializeDriver::new(item_info, self.ctx))? {
            items.push(item);
        }

        self.info.from_items(items).map_err(|value| {
            de::make_custom_error(FlattenError::TypeMismatch {
                expected: item_info.type_path(),
                found: value.reflect_type_path(),
            })
        })
    }
}
