use alloc::boxed::Box;
use core::any::{Any, TypeId};
use core::ops::{Deref, DerefMut};

use fp_utils::TypeIdMap;

use crate::info::{Type, TypeInfo, Typed};
use crate::registry::{TypeRegistry, TypeTrait};

// -----------------------------------------------------------------------------
// TypeMeta

/// The registered form of a type: its [`TypeInfo`] and a [`TypeTrait`] table.
///
/// Usually produced by [`GetTypeMeta`], which the derive implements.
///
/// ```
/// use fp_reflect::registry::{FromType, TypeMeta, TypeTraitDefault};
///
/// let mut meta = TypeMeta::of::<String>();
/// meta.insert_trait(<TypeTraitDefault as FromType<String>>::from_type());
///
/// let value = meta.get_trait::<TypeTraitDefault>().unwrap().default();
/// assert_eq!(value.take::<String>().unwrap(), "");
/// ```
pub struct TypeMeta {
    ty: &'static Type,
    type_info: &'static TypeInfo,
    trait_table: TypeIdMap<Box<dyn TypeTrait>>,
}

impl TypeMeta {
    #[inline]
    pub fn of<T: Typed>() -> Self {
        Self::with_capacity::<T>(0)
    }

    /// Like [`TypeMeta::of`], with room for `capacity` type traits.
    #[inline]
    pub fn with_capacity<T: Typed>(capacity: usize) -> Self {
        let type_info = T::type_info();
        Self {
            ty: type_info.ty(),
            type_info,
            trait_table: TypeIdMap::with_capacity(capacity),
        }
    }

    #[inline(always)]
    pub const fn type_info(&self) -> &'static TypeInfo {
        self.type_info
    }

    #[inline(always)]
    pub const fn ty(&self) -> &'static Type {
        self.ty
    }

    crate::info::impl_type_fn!();

    /// Inserts a type trait, replacing one of the same type.
    #[inline]
    pub fn insert_trait<T: TypeTrait>(&mut self, data: T) {
        self.trait_table.insert(TypeId::of::<T>(), Box::new(data));
    }

    pub fn remove_trait<T: TypeTrait>(&mut self) -> Option<Box<T>> {
        let data: Box<dyn Any> = self.trait_table.remove(&TypeId::of::<T>())?;
        data.downcast::<T>().ok()
    }

    #[inline]
    pub fn get_trait<T: TypeTrait>(&self) -> Option<&T> {
        self.trait_table
            .get(&TypeId::of::<T>())
            .and_then(|data| data.deref().downcast_ref())
    }

    #[inline]
    pub fn get_trait_mut<T: TypeTrait>(&mut self) -> Option<&mut T> {
        self.trait_table
            .get_mut(&TypeId::of::<T>())
            .and_then(|data| data.deref_mut().downcast_mut())
    }

    #[inline]
    pub fn has_trait<T: TypeTrait>(&self) -> bool {
        self.trait_table.contains(&TypeId::of::<T>())
    }

    #[inline]
    pub fn trait_len(&self) -> usize {
        self.trait_table.len()
    }
}

impl Clone for TypeMeta {
    fn clone(&self) -> Self {
        let mut trait_table = TypeIdMap::with_capacity(self.trait_len());
        for (id, data) in self.trait_table.iter() {
            trait_table.insert(*id, (**data).clone_type_trait());
        }

        Self {
            ty: self.ty,
            type_info: self.type_info,
            trait_table,
        }
    }
}

impl core::fmt::Debug for TypeMeta {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TypeMeta")
            .field("type_path", &self.type_path())
            .field("trait_len", &self.trait_len())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// GetTypeMeta

/// Builds the [`TypeMeta`] of a type for registration in a [`TypeRegistry`].
///
/// [`#[derive(Reflect)]`](crate::derive::Reflect) implements it; the
/// `#[reflect(default, serialize, deserialize)]` flags select the type
/// traits that are inserted.
///
/// ```
/// use fp_reflect::derive::Reflect;
/// use fp_reflect::registry::{GetTypeMeta, TypeTraitDefault, TypeTraitSerialize};
///
/// #[derive(Reflect, Default)]
/// #[reflect(default)]
/// struct Battery {
///     volts: f32,
/// }
///
/// let meta = Battery::get_type_meta();
/// assert!(meta.has_trait::<TypeTraitDefault>());
/// assert!(!meta.has_trait::<TypeTraitSerialize>());
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` does not implement `GetTypeMeta` so cannot be registered",
    note = "consider annotating `{Self}` with `#[derive(Reflect)]`"
)]
pub trait GetTypeMeta: Typed {
    /// Returns the type meta of this type.
    fn get_type_meta() -> TypeMeta;

    /// Registers the types this type refers to, such as its field types.
    fn register_dependencies(_registry: &mut TypeRegistry) {}
}
