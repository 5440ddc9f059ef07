use core::fmt::Display;

use fp_reflect::Reflect;
use serde_core::ser::Error;
use serde_core::{Serialize, Serializer};

use super::Codec;
use crate::context::FlatContext;

// -----------------------------------------------------------------------------
// Errors

/// Creates a serialization error, with the type stack appended when the
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
// SerializeDriver

/// Serializes any reflected value through the codecs of a [`FlatContext`].
///
/// ```
/// use fp_flat::context::FlatContext;
/// use fp_flat::serde::SerializeDriver;
///
/// let ctx = FlatContext::new();
/// let value = vec![Some(1_u8), None];
///
/// let json = serde_json::to_string(&SerializeDriver::new(&value, &ctx)).unwrap();
/// assert_eq!(json, "[1,null]");
/// ```
pub struct SerializeDriver<'a> {
    value: &'a dyn Reflect,
    ctx: &'a FlatContext,
}

impl<'a> SerializeDriver<'a> {
    #[inline]
    pub fn new(value: &'a dyn Reflect, ctx: &'a FlatContext) -> Self {
        Self { value, ctx }
    }
}

impl Serialize for SerializeDriver<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        Codec::lookup(self.value.reflect_type_info(), self.ctx.registry()).serialize(
            self.value,
            self.ctx,
            serializer,
        )
    }
}
