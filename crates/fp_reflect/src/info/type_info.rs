use core::{error, fmt};

use crate::info::{ListInfo, OpaqueInfo, OptionInfo, StructInfo, Type};

// -----------------------------------------------------------------------------
// ReflectKind

/// The kind of a reflected type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReflectKind {
    Struct,
    Optional,
    List,
    Opaque,
}

impl fmt::Display for ReflectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Struct => f.pad("Struct"),
            Self::Optional => f.pad("Optional"),
            Self::List => f.pad("List"),
            Self::Opaque => f.pad("Opaque"),
        }
    }
}

/// Returned by the `as_*` casts of [`TypeInfo`] on a kind mismatch.
#[derive(Debug)]
pub struct ReflectKindError {
    pub expected: ReflectKind,
    pub received: ReflectKind,
}

impl fmt::Display for ReflectKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "reflect kind mismatch: expected {}, received {}",
            self.expected, self.received
        )
    }
}

impl error::Error for ReflectKindError {}

// -----------------------------------------------------------------------------
// TypeInfo

/// Compile-time information of a reflected type.
///
/// ```
/// use fp_reflect::info::{ReflectKind, Typed};
///
/// let info = <Option<Vec<u8>>>::type_info();
/// assert_eq!(info.kind(), ReflectKind::Optional);
///
/// let inner = info.as_optional().unwrap().some_info();
/// assert_eq!(inner.kind(), ReflectKind::List);
/// assert!(inner.as_list().unwrap().item_info().type_is::<u8>());
///
/// assert!(info.as_struct().is_err());
/// ```
#[derive(Debug, Clone)]
pub enum TypeInfo {
    Struct(StructInfo),
    Optional(OptionInfo),
    List(ListInfo),
    Opaque(OpaqueInfo),
}

macro_rules! impl_cast_method {
    ($name:ident : $kind:ident => $info:ident) => {
        pub const fn $name(&self) -> Result<&$info, ReflectKindError> {
            match self {
                Self::$kind(info) => Ok(info),
                _ => Err(ReflectKindError {
                    expected: ReflectKind::$kind,
                    received: self.kind(),
                }),
            }
        }
    };
}

impl TypeInfo {
    impl_cast_method!(as_struct: Struct => StructInfo);
    impl_cast_method!(as_optional: Optional => OptionInfo);
    impl_cast_method!(as_list: List => ListInfo);
    impl_cast_method!(as_opaque: Opaque => OpaqueInfo);

    pub const fn ty(&self) -> &Type {
        match self {
            Self::Struct(info) => info.ty(),
            Self::Optional(info) => info.ty(),
            Self::List(info) => info.ty(),
            Self::Opaque(info) => info.ty(),
        }
    }

    crate::info::impl_type_fn!();

    pub const fn kind(&self) -> ReflectKind {
        match self {
            Self::Struct(_) => ReflectKind::Struct,
            Self::Optional(_) => ReflectKind::Optional,
            Self::List(_) => ReflectKind::List,
            Self::Opaque(_) => ReflectKind::Opaque,
        }
    }

    /// Returns `true` if values of this type can be absent.
    #[inline]
    pub const fn is_optional(&self) -> bool {
        matches!(self, Self::Optional(_))
    }
}
