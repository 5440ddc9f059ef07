use crate::Reflect;

/// A value that may be absent.
///
/// ```
/// use fp_reflect::ops::Optional;
///
/// let mut value: Option<u8> = Some(1);
/// assert!(!value.is_none());
///
/// *value.value_mut().unwrap().downcast_mut::<u8>().unwrap() = 9;
/// assert_eq!(value, Some(9));
///
/// let empty: Option<u8> = None;
/// assert!(empty.value().is_none());
/// ```
pub trait Optional: Reflect {
    /// Returns the present value.
    fn value(&self) -> Option<&dyn Reflect>;

    /// Returns the present value mutably.
    fn value_mut(&mut self) -> Option<&mut dyn Reflect>;

    /// Returns `true` if no value is present.
    #[inline]
    fn is_none(&self) -> bool {
        self.value().is_none()
    }
}
