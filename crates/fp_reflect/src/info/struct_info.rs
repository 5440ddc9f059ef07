use alloc::boxed::Box;

use fp_utils::hash::{FixedHashState, HashMap};

use crate::info::{NamedField, Type, TypePath, impl_type_fn};
use crate::ops::Struct;

/// Information of a struct with named fields.
///
/// Fields keep their declaration order; `#[reflect(ignore)]` fields are not
/// part of it.
///
/// ```
/// use fp_reflect::derive::Reflect;
/// use fp_reflect::info::Typed;
///
/// #[derive(Reflect)]
/// struct Battery {
///     volts: f32,
///     #[reflect(ignore)]
///     _cache: (),
///     label: String,
/// }
///
/// let info = Battery::type_info().as_struct().unwrap();
/// assert_eq!(info.field_names(), &["volts", "label"]);
/// assert_eq!(info.index_of("label"), Some(1));
/// assert!(info.field_at(1).unwrap().type_info().type_is::<String>());
/// ```
#[derive(Clone, Debug)]
pub struct StructInfo {
    ty: Type,
    fields: Box<[NamedField]>,
    field_names: Box<[&'static str]>,
    field_indices: HashMap<&'static str, usize>,
}

impl StructInfo {
    impl_type_fn!(ty);

    pub fn new<T: Struct + TypePath>(fields: &[NamedField]) -> Self {
        let field_names: Box<[&'static str]> = fields.iter().map(NamedField::name).collect();
        let mut field_indices = HashMap::with_capacity_and_hasher(fields.len(), FixedHashState);
        field_indices.extend(field_names.iter().enumerate().map(|(i, name)| (*name, i)));

        Self {
            ty: Type::of::<T>(),
            fields: fields.into(),
            field_names,
            field_indices,
        }
    }

    pub fn field(&self, name: &str) -> Option<&NamedField> {
        self.fields.get(self.index_of(name)?)
    }

    #[inline]
    pub fn field_at(&self, index: usize) -> Option<&NamedField> {
        self.fields.get(index)
    }

    /// Iterates fields in declaration order.
    #[inline]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &NamedField> {
        self.fields.iter()
    }

    #[inline]
    pub fn field_names(&self) -> &[&'static str] {
        &self.field_names
    }

    #[inline]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.field_indices.get(name).copied()
    }

    #[inline]
    pub fn field_len(&self) -> usize {
        self.fields.len()
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;

    use crate::derive::Reflect;
    use crate::info::Typed;
    use crate::ops::Struct;

    #[derive(Reflect)]
    struct Socket {
        r#type: String,
        volts: u16,
    }

    #[test]
    fn raw_identifiers_lose_their_prefix() {
        let info = Socket::type_info().as_struct().unwrap();
        assert_eq!(info.field_names(), &["type", "volts"]);
        assert_eq!(info.index_of("type"), Some(0));

        let mut socket = Socket {
            r#type: "schuko".into(),
            volts: 230,
        };
        assert_eq!(socket.name_at(0), Some("type"));
        let field = socket.field("type").unwrap();
        assert_eq!(field.downcast_ref::<String>().map(String::as_str), Some("schuko"));

        let volts = socket.field_mut("volts").unwrap();
        assert!(volts.set(alloc::boxed::Box::new(110_u16)).is_ok());
        assert_eq!(socket.volts, 110);
    }
}
