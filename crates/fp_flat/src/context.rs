//! Shared configuration of flattened (de)serialization.
//!
//! A [`FlatContext`] owns the [`TypeRegistry`], the naming and exclusion
//! policies and the memoized [`FlatAdapter`]s. It is built once through
//! [`FlatContextBuilder`] and can be shared between threads.
//!
//! ```
//! use fp_flat::context::FlatContext;
//! use fp_flat::policy::FieldNamingPolicy;
//! use fp_flat::serde::SerializeDriver;
//! use fp_reflect::derive::Reflect;
//!
//! #[derive(Reflect, Default)]
//! #[reflect(default)]
//! struct Battery {
//!     cell_count: u8,
//!     #[reflect(since = 2.0)]
//!     chemistry: String,
//! }
//!
//! let ctx = FlatContext::builder()
//!     .register::<Battery>()
//!     .naming_policy(FieldNamingPolicy::ScreamingSnakeCase)
//!     .version(1.0)
//!     .build();
//!
//! let battery = Battery { cell_count: 4, chemistry: "LiFePO4".into() };
//! let json = serde_json::to_string(&SerializeDriver::new(&battery, &ctx)).unwrap();
//! assert_eq!(json, r#"{"CELL_COUNT":4}"#);
//! ```

use alloc::boxed::Box;
use alloc::sync::Arc;
use core::fmt;
use std::sync::{PoisonError, RwLock};

use fp_reflect::Reflect;
use fp_reflect::info::TypeInfo;
use fp_reflect::registry::{GetTypeMeta, TypeRegistry, TypeTraitDefault};
use fp_utils::TypeIdMap;

use crate::flatten::{FlatAdapter, FlatAdapterFactory, FlattenError};
use crate::policy::{Excluder, ExclusionPolicy, ExclusionStrategy, FieldNamingPolicy, NamingPolicy};

// -----------------------------------------------------------------------------
// FlatContext

pub struct FlatContext {
    registry: TypeRegistry,
    naming: Box<dyn NamingPolicy>,
    exclusion: Box<dyn ExclusionPolicy>,
    serialize_nulls: bool,
    adapters: RwLock<TypeIdMap<Arc<FlatAdapter>>>,
}

impl FlatContext {
    /// A context over [`TypeRegistry::new`] with default settings.
    #[inline]
    pub fn new() -> Self {
        Self::builder().build()
    }

    #[inline]
    pub fn builder() -> FlatContextBuilder {
        FlatContextBuilder::new()
    }

    #[inline]
    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    #[inline]
    pub fn naming(&self) -> &dyn NamingPolicy {
        &*self.naming
    }

    #[inline]
    pub fn exclusion(&self) -> &dyn ExclusionPolicy {
        &*self.exclusion
    }

    /// Whether absent members are written as null rather than omitted.
    #[inline]
    pub fn serialize_nulls(&self) -> bool {
        self.serialize_nulls
    }

    /// Returns the adapter of the struct type `info`, building it on first use.
    ///
    /// Tables are built outside the cache lock. When two threads race on the
    /// same type, the first adapter stored wins and both get it.
    ///
    /// ```
    /// use std::sync::Arc;
    /// use fp_flat::context::FlatContext;
    /// use fp_reflect::derive::Reflect;
    /// use fp_reflect::info::Typed;
    ///
    /// #[derive(Reflect)]
    /// struct Part {
    ///     part_name: String,
    /// }
    ///
    /// let ctx = FlatContext::new();
    /// let first = ctx.adapter(Part::type_info()).unwrap();
    /// let second = ctx.adapter(Part::type_info()).unwrap();
    /// assert!(Arc::ptr_eq(&first, &second));
    ///
    /// assert!(ctx.adapter(u8::type_info()).is_err());
    /// ```
    pub fn adapter(&self, info: &'static TypeInfo) -> Result<Arc<FlatAdapter>, FlattenError> {
        let type_id = info.ty_id();
        let cached = self
            .adapters
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
            .cloned();
        if let Some(adapter) = cached {
            return Ok(adapter);
        }

        let Some(adapter) = FlatAdapterFactory::create(info, self)? else {
            return Err(FlattenError::NotAStruct {
                type_path: info.type_path(),
            });
        };

        let mut adapters = self.adapters.write().unwrap_or_else(PoisonError::into_inner);
        Ok(adapters
            .get_or_insert(type_id, || Arc::new(adapter))
            .clone())
    }

    /// Creates the default value of `info` through its registered
    /// [`TypeTraitDefault`].
    pub fn construct(&self, info: &'static TypeInfo) -> Result<Box<dyn Reflect>, FlattenError> {
        match self.registry.get_type_trait::<TypeTraitDefault>(info.ty_id()) {
            Some(constructor) => Ok(constructor.default()),
            None => Err(FlattenError::NoConstructor {
                type_path: info.type_path(),
            }),
        }
    }
}

impl Default for FlatContext {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for FlatContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cached = self
            .adapters
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len();
        f.debug_struct("FlatContext")
            .field("registry", &self.registry)
            .field("serialize_nulls", &self.serialize_nulls)
            .field("cached_adapters", &cached)
            .finish_non_exhaustive()
    }
}

// -----------------------------------------------------------------------------
// FlatContextBuilder

/// Collects the configuration of a [`FlatContext`].
///
/// Defaults: [`TypeRegistry::new`], [`FieldNamingPolicy::Identity`], an
/// [`Excluder`] without version, nulls written.
pub struct FlatContextBuilder {
    registry: TypeRegistry,
    naming: Box<dyn NamingPolicy>,
    excluder: Excluder,
    exclusion: Option<Box<dyn ExclusionPolicy>>,
    serialize_nulls: bool,
}

impl FlatContextBuilder {
    pub fn new() -> Self {
        Self {
            registry: TypeRegistry::new(),
            naming: Box::new(FieldNamingPolicy::Identity),
            excluder: Excluder::new(),
            exclusion: None,
            serialize_nulls: true,
        }
    }

    /// Replaces the registry, types registered so far are dropped.
    pub fn registry(mut self, registry: TypeRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Registers `T` and its dependencies.
    pub fn register<T: GetTypeMeta>(mut self) -> Self {
        self.registry.register::<T>();
        self
    }

    /// Registers every type marked `#[reflect(auto_register)]`.
    ///
    /// Does nothing without the `auto_register` feature.
    pub fn auto_register(mut self) -> Self {
        if !self.registry.auto_register() {
            log::warn!("automatic type registration is unavailable");
        }
        self
    }

    pub fn naming_policy(mut self, policy: impl NamingPolicy + 'static) -> Self {
        self.naming = Box::new(policy);
        self
    }

    /// Replaces the default [`Excluder`].
    ///
    /// [`version`](Self::version), [`exclude_type`](Self::exclude_type) and
    /// [`add_exclusion_strategy`](Self::add_exclusion_strategy) have no
    /// effect afterwards.
    pub fn exclusion_policy(mut self, policy: impl ExclusionPolicy + 'static) -> Self {
        self.exclusion = Some(Box::new(policy));
        self
    }

    /// Sets the version `since`/`until` field attributes are checked against.
    pub fn version(mut self, version: f64) -> Self {
        self.excluder = self.excluder.with_version(version);
        self
    }

    /// Excludes fields of type `T` in both directions.
    pub fn exclude_type<T: ?Sized + 'static>(mut self) -> Self {
        self.excluder = self.excluder.with_excluded_type::<T>();
        self
    }

    pub fn add_exclusion_strategy(
        mut self,
        strategy: impl ExclusionStrategy + 'static,
        serialize: bool,
        deserialize: bool,
    ) -> Self {
        self.excluder = self.excluder.with_strategy(strategy, serialize, deserialize);
        self
    }

    /// Writes absent members as null (`true`, the default) or omits them.
    pub fn serialize_nulls(mut self, serialize_nulls: bool) -> Self {
        self.serialize_nulls = serialize_nulls;
        self
    }

    pub fn build(self) -> FlatContext {
        let exclusion = match self.exclusion {
            Some(policy) => policy,
            None => Box::new(self.excluder),
        };

        FlatContext {
            registry: self.registry,
            naming: self.naming,
            exclusion,
            serialize_nulls: self.serialize_nulls,
            adapters: RwLock::new(TypeIdMap::new()),
        }
    }
}

impl Default for FlatContextBuilder {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::string::{String, ToString};
    use alloc::sync::Arc;
    use alloc::vec::Vec;
    use core::sync::atomic::{AtomicUsize, Ordering};

    use fp_reflect::derive::Reflect;
    use fp_reflect::info::{NamedField, StructInfo, TypeInfo, Typed};
    use serde_core::de::DeserializeSeed;

    use super::FlatContext;
    use crate::policy::{ExclusionPolicy, ExclusionStrategy};
    use crate::serde::{DeserializeDriver, SerializeDriver};

    #[derive(Reflect, Default, Debug, PartialEq)]
    #[reflect(default)]
    struct Account {
        login: String,
        #[reflect(skip_serializing)]
        password: String,
        #[reflect(until = 2.0)]
        legacy_id: u32,
        #[reflect(flatten)]
        profile: Option<Profile>,
    }

    #[derive(Reflect, Default, Debug, PartialEq)]
    #[reflect(default)]
    struct Profile {
        display_name: String,
        avatar: Vec<u8>,
    }

    fn to_json(value: &dyn fp_reflect::Reflect, ctx: &FlatContext) -> String {
        serde_json::to_string(&SerializeDriver::new(value, ctx)).unwrap()
    }

    fn from_json<T: Typed + 'static>(json: &str, ctx: &FlatContext) -> T {
        let mut de = serde_json::Deserializer::from_str(json);
        DeserializeDriver::new(T::type_info(), ctx)
            .deserialize(&mut de)
            .unwrap()
            .take::<T>()
            .unwrap()
    }

    fn account() -> Account {
        Account {
            login: "douglas".into(),
            password: "hunter2".into(),
            legacy_id: 7,
            profile: Some(Profile {
                display_name: "Doug".into(),
                avatar: [1, 2].into(),
            }),
        }
    }

    #[test]
    fn exclusions_follow_direction_and_version() {
        let ctx = FlatContext::builder()
            .register::<Account>()
            .version(2.0)
            .exclude_type::<Vec<u8>>()
            .build();

        assert_eq!(to_json(&account(), &ctx), r#"{"login":"douglas","display_name":"Doug"}"#);

        let json = r#"{"login":"d","password":"p","legacy_id":3,"avatar":[9],"display_name":"D"}"#;
        let read = from_json::<Account>(json, &ctx);
        assert_eq!(read.password, "p");
        assert_eq!(read.legacy_id, 0);
        assert_eq!(read.profile.unwrap().avatar, Vec::<u8>::new());
    }

    struct NoLogin;

    impl ExclusionStrategy for NoLogin {
        fn should_skip_field(&self, declaring: &StructInfo, field: &NamedField) -> bool {
            declaring.type_is::<Account>() && field.name() == "login"
        }

        fn should_skip_type(&self, info: &TypeInfo) -> bool {
            info.type_is::<Option<Profile>>()
        }
    }

    #[test]
    fn strategies_and_flatten_fields() {
        let ctx = FlatContext::builder()
            .register::<Account>()
            .add_exclusion_strategy(NoLogin, true, false)
            .build();

        // the skipped flatten field takes its members along
        assert_eq!(to_json(&account(), &ctx), r#"{"legacy_id":7}"#);

        let read = from_json::<Account>(r#"{"login":"l","display_name":"D"}"#, &ctx);
        assert_eq!(read.login, "l");
        assert_eq!(read.profile.unwrap().display_name, "D");
    }

    struct Everything;

    impl ExclusionPolicy for Everything {
        fn exclude_field(&self, _: &StructInfo, _: &NamedField, _: bool) -> bool {
            true
        }

        fn exclude_type(&self, _: &TypeInfo, _: bool) -> bool {
            false
        }
    }

    #[test]
    fn custom_policies() {
        let ctx = FlatContext::builder()
            .register::<Account>()
            .exclusion_policy(Everything)
            .version(0.0)
            .build();
        assert_eq!(to_json(&account(), &ctx), "{}");

        let ctx = FlatContext::builder()
            .register::<Account>()
            .naming_policy(|field: &NamedField| field.name().replace('_', ""))
            .build();
        let json = to_json(&account(), &ctx);
        assert!(json.contains(r#""legacyid":7"#));
        assert!(json.contains(r#""displayname":"Doug""#));
    }

    #[test]
    fn adapters_are_built_once() {
        static CALLS: AtomicUsize = AtomicUsize::new(0);

        let ctx = FlatContext::builder()
            .register::<Account>()
            .naming_policy(|field: &NamedField| {
                CALLS.fetch_add(1, Ordering::Relaxed);
                field.name().to_string()
            })
            .build();

        let first = ctx.adapter(Account::type_info()).unwrap();
        let calls = CALLS.load(Ordering::Relaxed);
        let second = ctx.adapter(Account::type_info()).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(CALLS.load(Ordering::Relaxed), calls);
    }

    #[test]
    fn adapters_are_shared_between_threads() {
        let ctx = FlatContext::builder().register::<Account>().build();
        let expected = to_json(&account(), &ctx);

        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| scope.spawn(|| to_json(&account(), &ctx)))
                .collect();
            for handle in handles {
                assert_eq!(handle.join().unwrap(), expected);
            }
        });
    }

    #[test]
    fn construct_needs_a_default() {
        let ctx = FlatContext::builder().register::<Account>().build();
        assert!(ctx.construct(Account::type_info()).unwrap().is::<Account>());

        let err = ctx.construct(<Option<u8>>::type_info()).unwrap_err();
        assert!(err.to_string().contains("no default constructor"));
    }
}
