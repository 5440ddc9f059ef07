use crate::info::Typed;

/// Builds a [`TypeTrait`] for the type `T`.
///
/// The derive macro uses this to fill [`TypeMeta`]:
///
/// ```
/// use fp_reflect::registry::{FromType, TypeMeta, TypeTraitDefault};
///
/// let mut meta = TypeMeta::of::<u16>();
/// meta.insert_trait(<TypeTraitDefault as FromType<u16>>::from_type());
/// assert!(meta.has_trait::<TypeTraitDefault>());
/// ```
///
/// [`TypeTrait`]: crate::registry::TypeTrait
/// [`TypeMeta`]: crate::registry::TypeMeta
pub trait FromType<T: Typed> {
    fn from_type() -> Self;
}
