use alloc::boxed::Box;
use alloc::string::{String, ToString};
use core::fmt::{self, Display};

use fp_reflect::Reflect;
use fp_reflect::info::TypeInfo;
use serde_core::de::{DeserializeSeed, Error, Visitor};
use serde_core::{Deserialize, Deserializer};

use super::Codec;
use crate::context::FlatContext;

// -----------------------------------------------------------------------------
// Errors

/// Creates a deserialization error, with the type stack appended when the
/// `debug` feature is active.
#[inline]
pub(crate) fn make_custom_error<E: Error>(msg: impl Display) -> E {
    #[cfg(all(feature = "debug", debug_assertions))]
    {
        super::info_stack::TYPE_INFO_STACK
            .with_borrow(|stack| E::custom(format_args!("{msg} (stack: {stack:?})")))
    }
    #[cfg(not(all(feature = "debug", debug_assertions)))]
    {
        E::custom(msg)
    }
}

// -----------------------------------------------------------------------------
// Ident

/// A document member name.
///
/// Names are written as strings and read back the same way.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Ident(pub String);

impl<'de> Deserialize<'de> for Ident {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct IdentVisitor;

        impl<'de> Visitor<'de> for IdentVisitor {
            type Value = Ident;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a member name")
            }

            #[inline]
            fn visit_str<E: Error>(self, value: &str) -> Result<Self::Value, E> {
                Ok(Ident(value.to_string()))
            }

            #[inline]
            fn visit_string<E: Error>(self, value: String) -> Result<Self::Value, E> {
                Ok(Ident(value))
            }
        }

        deserializer.deserialize_str(IdentVisitor)
    }
}

// -----------------------------------------------------------------------------
// DeserializeDriver

/// Deserializes a value of a given type through the codecs of a
/// [`FlatContext`].
///
/// ```
/// use fp_flat::context::FlatContext;
/// use fp_flat::serde::DeserializeDriver;
/// use fp_reflect::info::Typed;
/// use serde_core::de::DeserializeSeed;
///
/// let ctx = FlatContext::builder().register::<Vec<Option<u8>>>().build();
/// let mut de = serde_json::Deserializer::from_str("[1,null]");
///
/// let value = DeserializeDriver::new(<Vec<Option<u8>>>::type_info(), &ctx)
///     .deserialize(&mut de)
///     .unwrap();
/// assert_eq!(value.take::<Vec<Option<u8>>>().unwrap(), [Some(1), None]);
/// ```
pub struct DeserializeDriver<'a> {
    info: &'static TypeInfo,
    ctx: &'a FlatContext,
}

impl<'a> DeserializeDriver<'a> {
    #[inline]
    pub fn new(info: &'static TypeInfo, ctx: &'a FlatContext) -> Self {
        Self { info, ctx }
    }
}

impl<'de> DeserializeSeed<'de> for DeserializeDriver<'_> {
    type Value = Box<dyn Reflect>;

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        Codec::lookup(self.info, self.ctx.registry()).deserialize(self.ctx, deserializer)
    }
}
