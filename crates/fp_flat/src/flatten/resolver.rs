use alloc::vec::Vec;
use core::any::TypeId;

use fp_reflect::info::StructInfo;
use fp_reflect::registry::TypeRegistry;

use super::table::TableBuilder;
use super::{BoundField, BoundFieldTable, DescriptorProvider, FlattenError, StepId};
use crate::serde::Codec;

/// Builds the [`BoundFieldTable`] of a struct.
///
/// Every described field either becomes a member, or, when marked
/// `#[reflect(flatten)]`, contributes the members of its own type under its
/// path. Members keep declaration order. A name produced twice fails the
/// whole build with [`FlattenError::Collision`], a struct flattening into
/// itself with [`FlattenError::Cycle`].
///
/// Flattened members are written only if the flatten field is written too,
/// the same holds for reading.
///
/// ```
/// use fp_flat::flatten::{DescriptorProvider, FlattenResolver};
/// use fp_flat::policy::{Excluder, FieldNamingPolicy};
/// use fp_reflect::derive::Reflect;
/// use fp_reflect::info::Typed;
/// use fp_reflect::registry::TypeRegistry;
///
/// #[derive(Reflect)]
/// struct Owner {
///     name: String,
///     #[reflect(flatten)]
///     bag: Option<Bag>,
/// }
///
/// #[derive(Reflect)]
/// struct Bag {
///     item_name: String,
/// }
///
/// let registry = TypeRegistry::new();
/// let excluder = Excluder::new();
/// let provider = DescriptorProvider::new(&FieldNamingPolicy::LowerCamelCase, &excluder);
///
/// let info = Owner::type_info().as_struct().unwrap();
/// let table = FlattenResolver::new(provider, &registry).build(info).unwrap();
///
/// assert!(table.names().eq(["name", "itemName"]));
/// assert_eq!(table.arena().dotted(table.get("itemName").unwrap().path()), "Owner.bag.item_name");
/// ```
pub struct FlattenResolver<'a> {
    provider: DescriptorProvider<'a>,
    registry: &'a TypeRegistry,
}

struct Frame {
    prefix: Vec<StepId>,
    visiting: Vec<TypeId>,
    serialize: bool,
    deserialize: bool,
}

impl<'a> FlattenResolver<'a> {
    #[inline]
    pub fn new(provider: DescriptorProvider<'a>, registry: &'a TypeRegistry) -> Self {
        Self { provider, registry }
    }

    pub fn build(&self, info: &'static StructInfo) -> Result<BoundFieldTable, FlattenError> {
        let mut builder = TableBuilder::new(info.type_path());
        let mut frame = Frame {
            prefix: Vec::new(),
            visiting: Vec::from([info.ty_id()]),
            serialize: true,
            deserialize: true,
        };

        self.build_into(info, &mut frame, &mut builder)?;

        let table = builder.finish();
        log::debug!(
            "built {} members over {} field steps for `{}`",
            table.len(),
            table.arena().len(),
            info.type_path(),
        );
        Ok(table)
    }

    fn build_into(
        &self,
        info: &'static StructInfo,
        frame: &mut Frame,
        builder: &mut TableBuilder,
    ) -> Result<(), FlattenError> {
        for descriptor in self.provider.descriptors(info)? {
            let mark = frame.prefix.len();
            let directions = (frame.serialize, frame.deserialize);

            frame
                .prefix
                .extend(descriptor.steps.iter().map(|step| builder.arena.intern(*step)));
            frame.serialize &= descriptor.serialize;
            frame.deserialize &= descriptor.deserialize;

            let field = descriptor.field();
            if field.attributes().flatten() {
                match super::unwrap_struct(field.type_info()) {
                    Some(target) if frame.visiting.contains(&target.ty_id()) => {
                        return Err(FlattenError::Cycle {
                            type_path: builder.type_path(),
                            path: builder.arena.dotted(&frame.prefix),
                        });
                    }
                    Some(target) => {
                        frame.visiting.push(target.ty_id());
                        self.build_into(target, frame, builder)?;
                        frame.visiting.pop();
                    }
                    None => log::debug!(
                        "flattened field `{}` of type `{}` has no struct members",
                        builder.arena.dotted(&frame.prefix),
                        field.type_info().type_path(),
                    ),
                }
            } else {
                let leaf = field.type_info();
                builder.insert(BoundField::new(
                    descriptor.name,
                    frame.prefix.as_slice().into(),
                    frame.serialize,
                    frame.deserialize,
                    leaf,
                    Codec::lookup(leaf, self.registry),
                ))?;
            }

            frame.prefix.truncate(mark);
            (frame.serialize, frame.deserialize) = directions;
        }
        Ok(())
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::string::{String, ToString};
    use alloc::vec::Vec;

    use fp_reflect::derive::Reflect;
    use fp_reflect::info::Typed;
    use fp_reflect::registry::TypeRegistry;

    use super::FlattenResolver;
    use crate::flatten::{BoundFieldTable, DescriptorProvider, FlattenError};
    use crate::policy::{Excluder, FieldNamingPolicy};

    #[derive(Reflect)]
    struct Owner {
        name: String,
        #[reflect(flatten)]
        bag: Option<Bag>,
    }

    #[derive(Reflect)]
    struct Bag {
        item_name: String,
        #[reflect(flatten)]
        part: Option<Part>,
    }

    #[derive(Reflect)]
    struct Part {
        part_name: String,
    }

    fn build<T: Typed>() -> Result<BoundFieldTable, FlattenError> {
        let registry = TypeRegistry::new();
        let excluder = Excluder::new();
        let provider = DescriptorProvider::new(&FieldNamingPolicy::LowerCamelCase, &excluder);
        FlattenResolver::new(provider, &registry).build(T::type_info().as_struct().unwrap())
    }

    #[test]
    fn nested_flattening_hoists_leaves() {
        let table = build::<Owner>().unwrap();
        assert_eq!(table.names().collect::<Vec<_>>(), ["name", "itemName", "partName"]);

        let part_name = table.get("partName").unwrap();
        assert_eq!(part_name.path().len(), 3);
        assert_eq!(table.arena().dotted(part_name.path()), "Owner.bag.part.part_name");
        assert!(part_name.leaf_info().type_is::<String>());

        // `bag` is shared by two paths
        assert_eq!(table.arena().len(), 5);
    }

    #[derive(Reflect)]
    struct Clash {
        name: String,
        #[reflect(flatten)]
        inner: Inner,
    }

    #[derive(Reflect)]
    struct Inner {
        name: String,
    }

    #[test]
    fn flattened_collision() {
        let err = build::<Clash>().unwrap_err();
        let FlattenError::Collision { name, path, .. } = &err else {
            panic!("unexpected {err:?}");
        };
        assert_eq!(name, "name");
        assert_eq!(path, "Clash.inner.name");
    }

    #[derive(Reflect)]
    struct Renamed {
        #[reflect(rename = "id")]
        left: u32,
        #[reflect(rename = "id")]
        right: u32,
    }

    #[test]
    fn rename_collision() {
        let err = build::<Renamed>().unwrap_err();
        assert!(matches!(err, FlattenError::Collision { ref path, .. } if path == "Renamed.right"));
        assert!(err.to_string().contains("`id`"));
    }

    #[derive(Reflect)]
    struct Node {
        value: u32,
        #[reflect(flatten)]
        next: Option<Box<Node>>,
    }

    #[derive(Reflect)]
    struct Ping {
        #[reflect(flatten)]
        pong: Option<Pong>,
    }

    #[derive(Reflect)]
    struct Pong {
        #[reflect(flatten)]
        ping: Option<Box<Ping>>,
    }

    #[test]
    fn cycles_are_reported() {
        let err = build::<Node>().unwrap_err();
        assert!(matches!(err, FlattenError::Cycle { ref path, .. } if path == "Node.next"));

        let err = build::<Ping>().unwrap_err();
        assert!(matches!(err, FlattenError::Cycle { ref path, .. } if path == "Ping.pong.ping"));
    }

    #[derive(Reflect)]
    struct Loose {
        id: u32,
        #[reflect(flatten)]
        tags: Vec<String>,
        #[reflect(flatten)]
        count: u8,
    }

    #[test]
    fn non_struct_targets_add_nothing() {
        let table = build::<Loose>().unwrap();
        assert_eq!(table.names().collect::<Vec<_>>(), ["id"]);
    }

    #[derive(Reflect)]
    struct Sealed {
        #[reflect(flatten, skip_deserializing)]
        bag: Bag,
    }

    #[test]
    fn flattened_members_inherit_directions() {
        let table = build::<Sealed>().unwrap();
        for field in table.iter() {
            assert!(field.serialize());
            assert!(!field.deserialize());
        }
        assert_eq!(table.len(), 2);
    }
}
