use alloc::boxed::Box;
use core::any::{Any, TypeId};

use crate::info::{DynamicTypePath, DynamicTyped, ReflectKind};
use crate::ops::{ReflectMut, ReflectRef};

// -----------------------------------------------------------------------------
// Reflect

/// The foundational trait of the reflection layer.
///
/// A `Reflect` value knows its [`TypeInfo`](crate::info::TypeInfo), can be
/// viewed through one of the kind traits ([`Struct`], [`Optional`], [`List`])
/// and can be overwritten with another type-erased value of the same type.
///
/// Prefer [`#[derive(Reflect)]`](crate::derive::Reflect) over a manual
/// implementation.
///
/// ## Type identity
///
/// [`Any::type_id`] on a `Box<dyn Reflect>` reports the box. Use
/// [`Reflect::ty_id`] instead, which also sees through reflected boxes:
///
/// ```rust
/// # use fp_reflect::Reflect;
/// # use core::any::{Any, TypeId};
/// let x: Box<dyn Reflect> = 32_i32.into_boxed_reflect();
///
/// assert!(x.type_id() != TypeId::of::<i32>());
/// assert!(x.ty_id() == TypeId::of::<i32>());
///
/// let boxed: Box<dyn Reflect> = Box::new(32_i32).into_boxed_reflect();
/// assert!(boxed.ty_id() == TypeId::of::<i32>());
/// ```
///
/// ## Kind casting
///
/// ```rust
/// # use fp_reflect::{Reflect, ops::ReflectRef};
/// let value = Some(3_u8);
/// let ReflectRef::Optional(option) = value.reflect_ref() else { unreachable!() };
/// assert_eq!(option.value().unwrap().downcast_ref::<u8>(), Some(&3));
/// ```
///
/// [`Struct`]: crate::ops::Struct
/// [`Optional`]: crate::ops::Optional
/// [`List`]: crate::ops::List
pub trait Reflect: DynamicTypePath + DynamicTyped + Send + Sync + Any {
    /// Returns the value as [`Any`], looking through reflected boxes.
    fn as_any(&self) -> &dyn Any;

    /// Mutable counterpart of [`Reflect::as_any`].
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Owned counterpart of [`Reflect::as_any`].
    fn into_any(self: Box<Self>) -> Box<dyn Any>;

    /// Casts this value to `&dyn Reflect`.
    fn as_reflect(&self) -> &dyn Reflect;

    /// Casts this value to `&mut dyn Reflect`.
    fn as_reflect_mut(&mut self) -> &mut dyn Reflect;

    /// Casts this boxed value to `Box<dyn Reflect>`.
    fn into_reflect(self: Box<Self>) -> Box<dyn Reflect>;

    /// Boxes this value as `Box<dyn Reflect>`.
    ///
    /// ```
    /// use fp_reflect::Reflect;
    ///
    /// let r = 32.into_boxed_reflect();
    /// assert!(r.is::<i32>());
    /// ```
    #[inline(always)]
    fn into_boxed_reflect(self) -> Box<dyn Reflect>
    where
        Self: Sized,
    {
        Box::new(self)
    }

    /// Returns the [`TypeId`] of the underlying type.
    #[inline]
    fn ty_id(&self) -> TypeId {
        self.as_any().type_id()
    }

    /// Overwrites `self` with `value` if both have the same type.
    ///
    /// Returns `value` back on mismatch, `self` is left untouched then.
    ///
    /// ```
    /// use fp_reflect::Reflect;
    ///
    /// let mut x = 1_u64;
    /// x.set(2_u64.into_boxed_reflect()).unwrap();
    /// assert_eq!(x, 2);
    ///
    /// assert!(x.set("3".to_string().into_boxed_reflect()).is_err());
    /// assert_eq!(x, 2);
    /// ```
    fn set(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>>;

    /// Returns the kind of this value.
    fn reflect_kind(&self) -> ReflectKind;

    /// Views this value through its kind trait.
    fn reflect_ref(&self) -> ReflectRef<'_>;

    /// Mutably views this value through its kind trait.
    fn reflect_mut(&mut self) -> ReflectMut<'_>;
}

impl dyn Reflect {
    /// Returns `true` if the underlying value is of type `T`.
    ///
    /// ```
    /// # use fp_reflect::Reflect;
    /// let x: Box<dyn Reflect> = 10.into_boxed_reflect();
    /// assert!(x.is::<i32>());
    /// ```
    #[inline(always)]
    pub fn is<T: Any>(&self) -> bool {
        self.ty_id() == TypeId::of::<T>()
    }

    /// Downcasts the value to `&T`.
    #[inline]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.as_any().downcast_ref()
    }

    /// Downcasts the value to `&mut T`.
    ///
    /// ```
    /// # use fp_reflect::Reflect;
    /// let mut x: Box<dyn Reflect> = 10.into_boxed_reflect();
    /// *x.downcast_mut::<i32>().unwrap() += 2;
    /// assert_eq!(x.downcast_ref::<i32>(), Some(&12));
    /// ```
    #[inline]
    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut()
    }

    /// Downcasts the value to `Box<T>`, returning the original box on mismatch.
    pub fn downcast<T: Any>(self: Box<dyn Reflect>) -> Result<Box<T>, Box<dyn Reflect>> {
        if !self.is::<T>() {
            return Err(self);
        }
        match self.into_any().downcast::<T>() {
            Ok(value) => Ok(value),
            Err(_) => unreachable!("type id was checked before downcasting"),
        }
    }

    /// Downcasts and unboxes the value, returning the original box on mismatch.
    ///
    /// ```
    /// # use fp_reflect::Reflect;
    /// let x: Box<dyn Reflect> = 10.into_boxed_reflect();
    /// assert_eq!(x.take::<i32>().unwrap(), 10);
    /// ```
    #[inline]
    pub fn take<T: Any>(self: Box<dyn Reflect>) -> Result<T, Box<dyn Reflect>> {
        self.downcast::<T>().map(|value| *value)
    }
}

impl core::fmt::Debug for dyn Reflect {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Reflect({})", self.reflect_type_path())
    }
}

// -----------------------------------------------------------------------------
// Auxiliary macro

/// Implements the casting methods of [`Reflect`] for a sized type of the given kind.
macro_rules! impl_reflect_cast_fn {
    ($kind:ident) => {
        #[inline(always)]
        fn as_any(&self) -> &dyn ::core::any::Any {
            self
        }

        #[inline(always)]
        fn as_any_mut(&mut self) -> &mut dyn ::core::any::Any {
            self
        }

        #[inline(always)]
        fn into_any(
            self: ::alloc::boxed::Box<Self>,
        ) -> ::alloc::boxed::Box<dyn ::core::any::Any> {
            self
        }

        #[inline(always)]
        fn as_reflect(&self) -> &dyn $crate::Reflect {
            self
        }

        #[inline(always)]
        fn as_reflect_mut(&mut self) -> &mut dyn $crate::Reflect {
            self
        }

        #[inline(always)]
        fn into_reflect(
            self: ::alloc::boxed::Box<Self>,
        ) -> ::alloc::boxed::Box<dyn $crate::Reflect> {
            self
        }

        fn set(
            &mut self,
            value: ::alloc::boxed::Box<dyn $crate::Reflect>,
        ) -> Result<(), ::alloc::boxed::Box<dyn $crate::Reflect>> {
            *self = <Self as $crate::FromReflect>::take_from_reflect(value)?;
            Ok(())
        }

        #[inline]
        fn reflect_kind(&self) -> $crate::info::ReflectKind {
            $crate::info::ReflectKind::$kind
        }

        #[inline]
        fn reflect_ref(&self) -> $crate::ops::ReflectRef<'_> {
            $crate::ops::ReflectRef::$kind(self)
        }

        #[inline]
        fn reflect_mut(&mut self) -> $crate::ops::ReflectMut<'_> {
            $crate::ops::ReflectMut::$kind(self)
        }
    };
}

pub(crate) use impl_reflect_cast_fn;

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::string::String;
    use core::any::TypeId;

    use crate::Reflect;
    use crate::info::ReflectKind;

    #[test]
    fn boxed_values_report_pointee() {
        let mut boxed: Box<u16> = Box::new(5);
        assert_eq!(boxed.ty_id(), TypeId::of::<u16>());
        assert_eq!(boxed.reflect_kind(), ReflectKind::Opaque);

        let value: &mut dyn Reflect = &mut boxed;
        assert_eq!(value.downcast_ref::<u16>(), Some(&5));

        value.set(Box::new(7_u16)).unwrap();
        assert_eq!(*boxed, 7);
    }

    #[test]
    fn take_returns_original_on_mismatch() {
        let value = String::from("flat").into_boxed_reflect();
        let value = value.take::<u8>().unwrap_err();
        assert_eq!(value.take::<String>().unwrap(), "flat");
    }
}
