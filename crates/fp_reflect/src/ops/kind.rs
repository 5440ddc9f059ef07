use crate::Reflect;
use crate::info::ReflectKind;
use crate::ops::{List, Optional, Struct};

// -----------------------------------------------------------------------------
// ReflectRef

/// An immutable view of a reflected value through its kind trait.
pub enum ReflectRef<'a> {
    Struct(&'a dyn Struct),
    Optional(&'a dyn Optional),
    List(&'a dyn List),
    Opaque(&'a dyn Reflect),
}

impl ReflectRef<'_> {
    pub fn kind(&self) -> ReflectKind {
        match self {
            Self::Struct(_) => ReflectKind::Struct,
            Self::Optional(_) => ReflectKind::Optional,
            Self::List(_) => ReflectKind::List,
            Self::Opaque(_) => ReflectKind::Opaque,
        }
    }
}

// -----------------------------------------------------------------------------
// ReflectMut

/// A mutable view of a reflected value through its kind trait.
pub enum ReflectMut<'a> {
    Struct(&'a mut dyn Struct),
    Optional(&'a mut dyn Optional),
    List(&'a mut dyn List),
    Opaque(&'a mut dyn Reflect),
}

impl ReflectMut<'_> {
    pub fn kind(&self) -> ReflectKind {
        match self {
            Self::Struct(_) => ReflectKind::Struct,
            Self::Optional(_) => ReflectKind::Optional,
            Self::List(_) => ReflectKind::List,
            Self::Opaque(_) => ReflectKind::Opaque,
        }
    }
}
