use alloc::boxed::Box;
use core::any::Any;

use crate::impls::{GenericTypePathCell, concat};
use crate::info::{ReflectKind, TypeInfo, TypePath, Typed};
use crate::ops::{ReflectMut, ReflectRef};
use crate::registry::{GetTypeMeta, TypeMeta, TypeRegistry};
use crate::{FromReflect, Reflect};

// A box keeps its own type path but otherwise reflects as its pointee:
// same info, same type id, same kind view. Recursive types such as
// `struct Node { next: Option<Box<Node>> }` rely on this.

impl<T: TypePath> TypePath for Box<T> {
    fn type_path() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| concat(&["alloc::boxed::Box<", T::type_path(), ">"]))
    }

    fn type_name() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| concat(&["Box<", T::type_name(), ">"]))
    }

    #[inline]
    fn type_ident() -> &'static str {
        "Box"
    }

    #[inline]
    fn module_path() -> Option<&'static str> {
        Some("alloc::boxed")
    }
}

impl<T: Typed> Typed for Box<T> {
    #[inline]
    fn type_info() -> &'static TypeInfo {
        T::type_info()
    }
}

impl<T: FromReflect + Typed> Reflect for Box<T> {
    #[inline]
    fn as_any(&self) -> &dyn Any {
        T::as_any(self)
    }

    #[inline]
    fn as_any_mut(&mut self) -> &mut dyn Any {
        T::as_any_mut(self)
    }

    #[inline]
    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        T::into_any(*self)
    }

    #[inline]
    fn as_reflect(&self) -> &dyn Reflect {
        T::as_reflect(self)
    }

    #[inline]
    fn as_reflect_mut(&mut self) -> &mut dyn Reflect {
        T::as_reflect_mut(self)
    }

    #[inline]
    fn into_reflect(self: Box<Self>) -> Box<dyn Reflect> {
        T::into_reflect(*self)
    }

    #[inline]
    fn set(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>> {
        T::set(self, value)
    }

    #[inline]
    fn reflect_kind(&self) -> ReflectKind {
        T::reflect_kind(self)
    }

    #[inline]
    fn reflect_ref(&self) -> ReflectRef<'_> {
        T::reflect_ref(self)
    }

    #[inline]
    fn reflect_mut(&mut self) -> ReflectMut<'_> {
        T::reflect_mut(self)
    }
}

impl<T: FromReflect + Typed> FromReflect for Box<T> {
    #[inline]
    fn take_from_reflect(reflect: Box<dyn Reflect>) -> Result<Self, Box<dyn Reflect>> {
        T::take_from_reflect(reflect).map(Box::new)
    }
}

impl<T: FromReflect + GetTypeMeta> GetTypeMeta for Box<T> {
    #[inline]
    fn get_type_meta() -> TypeMeta {
        T::get_type_meta()
    }

    #[inline]
    fn register_dependencies(registry: &mut TypeRegistry) {
        T::register_dependencies(registry);
    }
}
