use alloc::string::String;
use core::any::TypeId;

use fp_utils::TypeIdMap;
use fp_utils::hash::{FixedHashState, HashMap, HashSet};

use crate::info::{TypeInfo, Typed};
use crate::registry::{FromType, GetTypeMeta, TypeMeta, TypeTrait};

// -----------------------------------------------------------------------------
// TypeRegistry

/// The central store of [`TypeMeta`]s.
///
/// Entries are keyed by the [`TypeId`] of the reflected type. Since
/// `Box<T>` reflects as `T`, registering `Box<T>` registers `T`.
///
/// ```
/// use core::any::TypeId;
/// use fp_reflect::derive::Reflect;
/// use fp_reflect::registry::{TypeRegistry, TypeTraitDefault};
///
/// #[derive(Reflect, Default)]
/// #[reflect(default)]
/// struct Brush {
///     name: Option<String>,
///     bristles: u32,
/// }
///
/// let mut registry = TypeRegistry::new();
/// registry.register::<Brush>();
///
/// assert!(registry.contains(TypeId::of::<Brush>()));
/// assert!(registry.contains(TypeId::of::<Option<String>>()));
/// assert!(registry.get_type_trait::<TypeTraitDefault>(TypeId::of::<Brush>()).is_some());
/// ```
pub struct TypeRegistry {
    type_meta_table: TypeIdMap<TypeMeta>,
    type_path_to_id: HashMap<&'static str, TypeId>,
    type_name_to_id: HashMap<&'static str, TypeId>,
    ambiguous_names: HashSet<&'static str>,
}

impl Default for TypeRegistry {
    /// See [`TypeRegistry::new`].
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl TypeRegistry {
    /// Creates a registry without any type.
    #[inline]
    pub const fn empty() -> Self {
        Self {
            type_meta_table: TypeIdMap::new(),
            type_path_to_id: HashMap::with_hasher(FixedHashState),
            type_name_to_id: HashMap::with_hasher(FixedHashState),
            ambiguous_names: HashSet::with_hasher(FixedHashState),
        }
    }

    /// Creates a registry holding the primitive types:
    ///
    /// - `()` `bool` `char`
    /// - `i8 - i128` `isize`
    /// - `u8 - u128` `usize`
    /// - `f32` `f64`
    /// - `String`
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register::<()>();
        registry.register::<bool>();
        registry.register::<char>();
        registry.register::<u8>();
        registry.register::<u16>();
        registry.register::<u32>();
        registry.register::<u64>();
        registry.register::<u128>();
        registry.register::<usize>();
        registry.register::<i8>();
        registry.register::<i16>();
        registry.register::<i32>();
        registry.register::<i64>();
        registry.register::<i128>();
        registry.register::<isize>();
        registry.register::<f32>();
        registry.register::<f64>();
        registry.register::<String>();
        registry
    }

    // The type must not be registered yet.
    fn add_new_type_indices(
        type_meta: &TypeMeta,
        type_path_to_id: &mut HashMap<&'static str, TypeId>,
        type_name_to_id: &mut HashMap<&'static str, TypeId>,
        ambiguous_names: &mut HashSet<&'static str>,
    ) {
        let ty = type_meta.ty();
        let type_name = ty.name();

        if !ambiguous_names.contains(type_name) {
            if type_name_to_id.contains_key(type_name) {
                type_name_to_id.remove(type_name);
                ambiguous_names.insert(type_name);
            } else {
                type_name_to_id.insert(type_name, ty.id());
            }
        }

        type_path_to_id.insert(ty.path(), ty.id());
    }

    fn register_internal(&mut self, type_id: TypeId, get_type_meta: impl FnOnce() -> TypeMeta) -> bool {
        self.type_meta_table.try_insert(type_id, || {
            let meta = get_type_meta();
            Self::add_new_type_indices(
                &meta,
                &mut self.type_path_to_id,
                &mut self.type_name_to_id,
                &mut self.ambiguous_names,
            );
            meta
        })
    }

    /// Registers `T` and, recursively, its dependencies.
    ///
    /// Does nothing if `T` is already registered.
    pub fn register<T: GetTypeMeta>(&mut self) {
        if self.register_internal(T::type_info().ty_id(), T::get_type_meta) {
            T::register_dependencies(self);
        }
    }

    /// Inserts or replaces a [`TypeMeta`], without its dependencies.
    pub fn insert_type_meta(&mut self, type_meta: TypeMeta) {
        if !self.type_meta_table.contains(&type_meta.ty_id()) {
            Self::add_new_type_indices(
                &type_meta,
                &mut self.type_path_to_id,
                &mut self.type_name_to_id,
                &mut self.ambiguous_names,
            );
        }
        self.type_meta_table.insert(type_meta.ty_id(), type_meta);
    }

    /// Registers every type marked `#[reflect(auto_register)]`.
    ///
    /// Returns `true` if static registration works on this platform. Without
    /// the `auto_register` feature this does nothing and returns `false`.
    ///
    /// ```no_run
    /// use core::any::TypeId;
    /// use fp_reflect::derive::Reflect;
    /// use fp_reflect::registry::TypeRegistry;
    ///
    /// #[derive(Reflect, Default)]
    /// #[reflect(default, auto_register)]
    /// struct Douglas {
    ///     name: String,
    /// }
    ///
    /// let mut registry = TypeRegistry::empty();
    /// assert!(registry.auto_register());
    /// assert!(registry.contains(TypeId::of::<Douglas>()));
    /// ```
    #[cfg(feature = "auto_register")]
    pub fn auto_register(&mut self) -> bool {
        use crate::__macro_exports::auto_register;

        if self.contains(TypeId::of::<auto_register::__AvailFlag>()) {
            return true;
        }
        auto_register::__register_types(self);
        self.contains(TypeId::of::<auto_register::__AvailFlag>())
    }

    /// Registers every type marked `#[reflect(auto_register)]`.
    ///
    /// The `auto_register` feature is disabled: does nothing and returns `false`.
    #[cfg(not(feature = "auto_register"))]
    #[inline(always)]
    pub fn auto_register(&mut self) -> bool {
        false
    }

    /// Adds the type trait `D` to the registered type `T`.
    ///
    /// # Panics
    ///
    /// Panics if `T` is not registered.
    ///
    /// ```
    /// use core::any::TypeId;
    /// use fp_reflect::registry::{TypeRegistry, TypeTraitSerialize};
    ///
    /// let mut registry = TypeRegistry::new();
    /// registry.register::<Vec<u8>>();
    /// registry.register_type_trait::<Vec<u8>, TypeTraitSerialize>();
    ///
    /// assert!(registry.get_type_trait::<TypeTraitSerialize>(TypeId::of::<Vec<u8>>()).is_some());
    /// ```
    pub fn register_type_trait<T: Typed, D: TypeTrait + FromType<T>>(&mut self) {
        match self.type_meta_table.get_mut(&T::type_info().ty_id()) {
            Some(type_meta) => type_meta.insert_trait(D::from_type()),
            None => panic!(
                "type trait `{}` added to the unregistered type `{}`",
                core::any::type_name::<D>(),
                T::type_path(),
            ),
        }
    }

    #[inline]
    pub fn contains(&self, type_id: TypeId) -> bool {
        self.type_meta_table.contains(&type_id)
    }

    #[inline]
    pub fn get(&self, type_id: TypeId) -> Option<&TypeMeta> {
        self.type_meta_table.get(&type_id)
    }

    #[inline]
    pub fn get_mut(&mut self, type_id: TypeId) -> Option<&mut TypeMeta> {
        self.type_meta_table.get_mut(&type_id)
    }

    /// Looks a type up by its [type path](crate::info::TypePath::type_path).
    pub fn get_with_type_path(&self, type_path: &str) -> Option<&TypeMeta> {
        self.get(*self.type_path_to_id.get(type_path)?)
    }

    /// Looks a type up by its [type name](crate::info::TypePath::type_name).
    ///
    /// Returns `None` for ambiguous names.
    pub fn get_with_type_name(&self, type_name: &str) -> Option<&TypeMeta> {
        self.get(*self.type_name_to_id.get(type_name)?)
    }

    /// Returns `true` if several registered types share `type_name`.
    ///
    /// ```
    /// # use fp_reflect::registry::TypeRegistry;
    /// mod shop {
    ///     #[derive(fp_reflect::derive::Reflect)]
    ///     pub struct Part { pub id: u32 }
    /// }
    /// mod garage {
    ///     #[derive(fp_reflect::derive::Reflect)]
    ///     pub struct Part { pub id: u32 }
    /// }
    ///
    /// let mut registry = TypeRegistry::empty();
    /// registry.register::<shop::Part>();
    /// registry.register::<garage::Part>();
    ///
    /// assert!(registry.is_ambiguous("Part"));
    /// assert!(registry.get_with_type_name("Part").is_none());
    /// ```
    pub fn is_ambiguous(&self, type_name: &str) -> bool {
        self.ambiguous_names.contains(type_name)
    }

    /// Returns the type trait `T` of the type with the given id.
    pub fn get_type_trait<T: TypeTrait>(&self, type_id: TypeId) -> Option<&T> {
        self.get(type_id)?.get_trait::<T>()
    }

    pub fn get_type_info(&self, type_id: TypeId) -> Option<&'static TypeInfo> {
        self.get(type_id).map(TypeMeta::type_info)
    }

    /// Iterates all registered types in arbitrary order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &TypeMeta> {
        self.type_meta_table.values()
    }
}

impl core::fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_set().entries(self.type_path_to_id.keys()).finish()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::string::String;
    use alloc::vec::Vec;
    use core::any::TypeId;

    use super::TypeRegistry;
    use crate::registry::TypeTraitDefault;

    #[test]
    fn new_registers_primitives() {
        let registry = TypeRegistry::new();
        assert!(registry.contains(TypeId::of::<u128>()));
        assert!(registry.contains(TypeId::of::<String>()));
        assert!(registry.get_with_type_path("alloc::string::String").is_some());
        assert!(!registry.contains(TypeId::of::<Vec<u8>>()));
    }

    #[test]
    fn boxes_register_their_pointee() {
        let mut registry = TypeRegistry::empty();
        registry.register::<Box<Option<u8>>>();
        assert!(registry.contains(TypeId::of::<Option<u8>>()));
        assert!(registry.contains(TypeId::of::<u8>()));
        assert!(!registry.contains(TypeId::of::<Box<Option<u8>>>()));

        let default = registry
            .get_type_trait::<TypeTraitDefault>(TypeId::of::<Option<u8>>())
            .unwrap();
        assert_eq!(default.default().take::<Option<u8>>().unwrap(), None);
    }

    #[test]
    #[should_panic = "unregistered type"]
    fn type_trait_needs_registration() {
        let mut registry = TypeRegistry::empty();
        registry.register_type_trait::<u8, TypeTraitDefault>();
    }
}
