use alloc::boxed::Box;

use crate::Reflect;

/// Rebuilds a concrete value from a type-erased one.
///
/// The default implementation is a checked downcast, which is all a plain
/// type needs. Wrappers that reflect as their contents, like `Box<T>`,
/// override it to rebuild themselves around the inner value.
///
/// # Examples
///
/// ```
/// use fp_reflect::{FromReflect, Reflect};
///
/// let value = 10_u32.into_boxed_reflect();
/// assert_eq!(u32::take_from_reflect(value).unwrap(), 10);
///
/// let value = 10_u32.into_boxed_reflect();
/// let boxed = Box::<u32>::take_from_reflect(value).unwrap();
/// assert_eq!(*boxed, 10);
///
/// let value = "ten".to_string().into_boxed_reflect();
/// assert!(u32::take_from_reflect(value).is_err());
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` does not implement `FromReflect` so cannot be created through reflection",
    note = "consider annotating `{Self}` with `#[derive(Reflect)]`"
)]
pub trait FromReflect: Reflect + Sized {
    /// Takes `Self` out of `reflect`, or hands the value back on mismatch.
    fn take_from_reflect(reflect: Box<dyn Reflect>) -> Result<Self, Box<dyn Reflect>> {
        reflect.take::<Self>()
    }
}
