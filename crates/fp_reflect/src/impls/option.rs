use crate::impls::{GenericTypeInfoCell, GenericTypePathCell, concat};
use crate::info::{OptionInfo, TypeInfo, TypePath, Typed};
use crate::ops::Optional;
use crate::reflection::impl_reflect_cast_fn;
use crate::registry::{FromType, GetTypeMeta, TypeMeta, TypeRegistry, TypeTraitDefault};
use crate::{FromReflect, Reflect};

impl<T: TypePath> TypePath for Option<T> {
    fn type_path() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| concat(&["core::option::Option<", T::type_path(), ">"]))
    }

    fn type_name() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| concat(&["Option<", T::type_name(), ">"]))
    }

    #[inline]
    fn type_ident() -> &'static str {
        "Option"
    }

    #[inline]
    fn module_path() -> Option<&'static str> {
        Some("core::option")
    }
}

impl<T: FromReflect + Typed> Typed for Option<T> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| TypeInfo::Optional(OptionInfo::new::<Self, T>()))
    }
}

impl<T: FromReflect + Typed> Reflect for Option<T> {
    impl_reflect_cast_fn!(Optional);
}

impl<T: FromReflect + Typed> FromReflect for Option<T> {}

impl<T: FromReflect + Typed> Optional for Option<T> {
    #[inline]
    fn value(&self) -> Option<&dyn Reflect> {
        self.as_ref().map(|value| value as &dyn Reflect)
    }

    #[inline]
    fn value_mut(&mut self) -> Option<&mut dyn Reflect> {
        self.as_mut().map(|value| value as &mut dyn Reflect)
    }
}

impl<T: FromReflect + GetTypeMeta> GetTypeMeta for Option<T> {
    fn get_type_meta() -> TypeMeta {
        let mut meta = TypeMeta::with_capacity::<Self>(1);
        meta.insert_trait(<TypeTraitDefault as FromType<Self>>::from_type());
        meta
    }

    fn register_dependencies(registry: &mut TypeRegistry) {
        registry.register::<T>();
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::string::String;

    use crate::Reflect;
    use crate::info::{ReflectKind, TypePath, Typed};
    use crate::ops::ReflectMut;

    #[test]
    fn option_type_path() {
        assert_eq!(
            <Option<String>>::type_path(),
            "core::option::Option<alloc::string::String>"
        );
        assert_eq!(<Option<u8>>::type_name(), "Option<u8>");
        assert_eq!(<Option<Box<u8>>>::type_name(), "Option<Box<u8>>");
    }

    #[test]
    fn boxed_inner_reports_pointee_info() {
        let info = <Option<Box<u16>>>::type_info().as_optional().unwrap();
        assert!(info.some_info().type_is::<u16>());

        let value = info.wrap_some(7_u16.into_boxed_reflect()).unwrap();
        assert_eq!(*value.take::<Option<Box<u16>>>().unwrap().unwrap(), 7);
    }

    #[test]
    fn set_through_optional_view() {
        let mut value: Option<u8> = None;
        assert_eq!(value.reflect_kind(), ReflectKind::Optional);

        let ReflectMut::Optional(option) = value.reflect_mut() else {
            panic!("expected an optional");
        };
        assert!(option.is_none());
        option.set(Box::new(Some(3_u8))).unwrap();
        assert_eq!(value, Some(3));
    }
}
