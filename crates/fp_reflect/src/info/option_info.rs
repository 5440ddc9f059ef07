use alloc::boxed::Box;

use crate::info::{Type, TypeInfo, TypePath, Typed, impl_type_fn};
use crate::ops::Optional;
use crate::{FromReflect, Reflect};

/// Information of an optional type, `Option<T>`.
///
/// Besides the inner type it carries constructors for both variants, which
/// lets type-erased code build an `Option<T>` without naming `T`.
///
/// ```
/// use fp_reflect::Reflect;
/// use fp_reflect::info::Typed;
///
/// let info = <Option<String>>::type_info().as_optional().unwrap();
/// assert!(info.some_info().type_is::<String>());
///
/// let none = info.none();
/// assert_eq!(none.take::<Option<String>>().unwrap(), None);
///
/// let some = info.wrap_some("x".to_string().into_boxed_reflect()).unwrap();
/// assert_eq!(some.take::<Option<String>>().unwrap().as_deref(), Some("x"));
/// ```
#[derive(Clone, Debug)]
pub struct OptionInfo {
    ty: Type,
    some_info: fn() -> &'static TypeInfo,
    none: fn() -> Box<dyn Reflect>,
    wrap_some: fn(Box<dyn Reflect>) -> Result<Box<dyn Reflect>, Box<dyn Reflect>>,
}

impl OptionInfo {
    impl_type_fn!(ty);

    pub fn new<TOption, TSome>() -> Self
    where
        TOption: Optional + TypePath + From<Option<TSome>>,
        TSome: FromReflect + Typed,
    {
        Self {
            ty: Type::of::<TOption>(),
            some_info: TSome::type_info,
            none: || Box::new(TOption::from(None)),
            wrap_some: |value| {
                let value = TSome::take_from_reflect(value)?;
                Ok(Box::new(TOption::from(Some(value))))
            },
        }
    }

    /// The info of the value inside `Some`.
    #[inline]
    pub fn some_info(&self) -> &'static TypeInfo {
        (self.some_info)()
    }

    /// Creates the absent value.
    #[inline]
    pub fn none(&self) -> Box<dyn Reflect> {
        (self.none)()
    }

    /// Wraps `value` in `Some`, handing it back on a type mismatch.
    #[inline]
    pub fn wrap_some(&self, value: Box<dyn Reflect>) -> Result<Box<dyn Reflect>, Box<dyn Reflect>> {
        (self.wrap_some)(value)
    }
}
