use alloc::sync::Arc;
use alloc::vec::Vec;
use core::any::TypeId;
use core::fmt;

use fp_reflect::info::{NamedField, StructInfo, TypeInfo};
use fp_utils::TypeIdSet;

// -----------------------------------------------------------------------------
// ExclusionPolicy

/// Decides which fields and types take part in (de)serialization.
///
/// Both questions are asked once per direction: `serialize` is `true` when
/// writing documents and `false` when reading them. A field excluded in both
/// directions is not described at all.
pub trait ExclusionPolicy: Send + Sync {
    /// `declaring` is the struct that declares `field`.
    fn exclude_field(&self, declaring: &StructInfo, field: &NamedField, serialize: bool) -> bool;

    fn exclude_type(&self, info: &TypeInfo, serialize: bool) -> bool;
}

// -----------------------------------------------------------------------------
// ExclusionStrategy

/// A user hook plugged into an [`Excluder`], see
/// [`Excluder::with_strategy`].
///
/// ```
/// use fp_flat::policy::{Excluder, ExclusionPolicy, ExclusionStrategy};
/// use fp_reflect::derive::Reflect;
/// use fp_reflect::info::{NamedField, StructInfo, TypeInfo, Typed};
///
/// struct NoSecrets;
///
/// impl ExclusionStrategy for NoSecrets {
///     fn should_skip_field(&self, _: &StructInfo, field: &NamedField) -> bool {
///         field.name().starts_with("secret")
///     }
///
///     fn should_skip_type(&self, _: &TypeInfo) -> bool {
///         false
///     }
/// }
///
/// #[derive(Reflect)]
/// struct Account {
///     login: String,
///     secret_key: String,
/// }
///
/// let excluder = Excluder::new().with_strategy(NoSecrets, true, false);
/// let info = Account::type_info().as_struct().unwrap();
/// let secret = info.field("secret_key").unwrap();
///
/// assert!(excluder.exclude_field(info, secret, true));
/// assert!(!excluder.exclude_field(info, secret, false));
/// ```
pub trait ExclusionStrategy: Send + Sync {
    fn should_skip_field(&self, declaring: &StructInfo, field: &NamedField) -> bool;

    fn should_skip_type(&self, info: &TypeInfo) -> bool;
}

// -----------------------------------------------------------------------------
// Excluder

/// The default [`ExclusionPolicy`].
///
/// A field is excluded in one direction when any of these holds:
///
/// - it carries `#[reflect(skip)]` or the `skip_*` flag of that direction;
/// - a version is configured and the field's `since`/`until` range misses
///   it, fields exist for `since <= version < until`;
/// - a strategy registered for the direction skips it.
///
/// A type is excluded when it was added by
/// [`with_excluded_type`](Excluder::with_excluded_type) or a strategy of the
/// direction skips it.
#[derive(Clone, Default)]
pub struct Excluder {
    version: Option<f64>,
    excluded_types: TypeIdSet,
    serialize_strategies: Vec<Arc<dyn ExclusionStrategy>>,
    deserialize_strategies: Vec<Arc<dyn ExclusionStrategy>>,
}

impl Excluder {
    #[inline]
    pub const fn new() -> Self {
        Self {
            version: None,
            excluded_types: TypeIdSet::new(),
            serialize_strategies: Vec::new(),
            deserialize_strategies: Vec::new(),
        }
    }

    /// Sets the document version compared against `since`/`until`.
    pub fn with_version(mut self, version: f64) -> Self {
        self.version = Some(version);
        self
    }

    pub fn with_excluded_type_id(mut self, type_id: TypeId) -> Self {
        self.excluded_types.insert(type_id);
        self
    }

    /// Excludes every field whose type is `T`, in both directions.
    pub fn with_excluded_type<T: ?Sized + 'static>(self) -> Self {
        self.with_excluded_type_id(TypeId::of::<T>())
    }

    /// Adds `strategy` to the selected directions.
    pub fn with_strategy(
        mut self,
        strategy: impl ExclusionStrategy + 'static,
        serialize: bool,
        deserialize: bool,
    ) -> Self {
        let strategy: Arc<dyn ExclusionStrategy> = Arc::new(strategy);
        if serialize {
            self.serialize_strategies.push(strategy.clone());
        }
        if deserialize {
            self.deserialize_strategies.push(strategy);
        }
        self
    }

    #[inline]
    pub fn version(&self) -> Option<f64> {
        self.version
    }

    fn strategies(&self, serialize: bool) -> &[Arc<dyn ExclusionStrategy>] {
        if serialize {
            &self.serialize_strategies
        } else {
            &self.deserialize_strategies
        }
    }

    fn is_valid_version(&self, field: &NamedField) -> bool {
        let Some(version) = self.version else {
            return true;
        };
        let attrs = field.attributes();
        if attrs.since().is_some_and(|since| since > version) {
            return false;
        }
        if attrs.until().is_some_and(|until| until <= version) {
            return false;
        }
        true
    }
}

impl ExclusionPolicy for Excluder {
    fn exclude_field(&self, declaring: &StructInfo, field: &NamedField, serialize: bool) -> bool {
        let attrs = field.attributes();
        let skipped = if serialize {
            attrs.skip_serializing()
        } else {
            attrs.skip_deserializing()
        };

        skipped
            || !self.is_valid_version(field)
            || self
                .strategies(serialize)
                .iter()
                .any(|strategy| strategy.should_skip_field(declaring, field))
    }

    fn exclude_type(&self, info: &TypeInfo, serialize: bool) -> bool {
        self.excluded_types.contains(&info.ty_id())
            || self
                .strategies(serialize)
                .iter()
                .any(|strategy| strategy.should_skip_type(info))
    }
}

impl fmt::Debug for Excluder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Excluder")
            .field("version", &self.version)
            .field("excluded_types", &self.excluded_types)
            .field("serialize_strategies", &self.serialize_strategies.len())
            .field("deserialize_strategies", &self.deserialize_strategies.len())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::string::String;

    use fp_reflect::derive::Reflect;
    use fp_reflect::info::{NamedField, StructInfo, TypeInfo, Typed};

    use super::{Excluder, ExclusionPolicy, ExclusionStrategy};

    #[derive(Reflect)]
    struct Sample {
        plain: u32,
        #[reflect(skip_serializing)]
        write_only: u32,
        #[reflect(skip)]
        hidden: u32,
        #[reflect(since = 1.1)]
        added: u32,
        #[reflect(until = 2.0)]
        removed: u32,
        label: String,
    }

    fn field(name: &str) -> (&'static StructInfo, &'static NamedField) {
        let info = Sample::type_info().as_struct().unwrap();
        (info, info.field(name).unwrap())
    }

    fn excluded(excluder: &Excluder, name: &str) -> (bool, bool) {
        let (info, field) = field(name);
        (
            excluder.exclude_field(info, field, true),
            excluder.exclude_field(info, field, false),
        )
    }

    #[test]
    fn skip_flags_follow_direction() {
        let excluder = Excluder::new();
        assert_eq!(excluded(&excluder, "plain"), (false, false));
        assert_eq!(excluded(&excluder, "write_only"), (true, false));
        assert_eq!(excluded(&excluder, "hidden"), (true, true));
    }

    #[test]
    fn versions() {
        let unversioned = Excluder::new();
        assert_eq!(excluded(&unversioned, "added"), (false, false));
        assert_eq!(excluded(&unversioned, "removed"), (false, false));

        let old = Excluder::new().with_version(1.0);
        assert_eq!(excluded(&old, "added"), (true, true));
        assert_eq!(excluded(&old, "removed"), (false, false));

        let current = Excluder::new().with_version(1.1);
        assert_eq!(excluded(&current, "added"), (false, false));

        let new = Excluder::new().with_version(2.0);
        assert_eq!(excluded(&new, "added"), (false, false));
        assert_eq!(excluded(&new, "removed"), (true, true));
    }

    #[test]
    fn excluded_types() {
        let excluder = Excluder::new().with_excluded_type::<String>();
        assert!(excluder.exclude_type(String::type_info(), true));
        assert!(excluder.exclude_type(String::type_info(), false));
        assert!(!excluder.exclude_type(u32::type_info(), true));
    }

    struct SkipStrings;

    impl ExclusionStrategy for SkipStrings {
        fn should_skip_field(&self, _: &StructInfo, field: &NamedField) -> bool {
            field.name() == "label"
        }

        fn should_skip_type(&self, info: &TypeInfo) -> bool {
            info.type_is::<String>()
        }
    }

    #[test]
    fn strategies_follow_direction() {
        let excluder = Excluder::new().with_strategy(SkipStrings, false, true);
        assert_eq!(excluded(&excluder, "label"), (false, true));
        assert!(!excluder.exclude_type(String::type_info(), true));
        assert!(excluder.exclude_type(String::type_info(), false));
    }
}
