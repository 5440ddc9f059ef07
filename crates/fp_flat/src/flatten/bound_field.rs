use alloc::boxed::Box;
use core::fmt;

use fp_reflect::Reflect;
use fp_reflect::info::{ReflectKind, TypeInfo};
use fp_reflect::ops::{ReflectMut, ReflectRef, Struct};
use serde_core::de::Visitor;
use serde_core::{Deserializer, Serialize, Serializer};

use super::{FieldArena, FieldStep, FlattenError, StepId};
use crate::context::FlatContext;
use crate::serde::{Codec, de, ser};

// -----------------------------------------------------------------------------
// BoundField

/// One document member: a field path from the root value to a leaf field.
///
/// Paths index into the [`FieldArena`] of the table holding the member.
#[derive(Debug)]
pub struct BoundField {
    name: Box<str>,
    path: Box<[StepId]>,
    serialize: bool,
    deserialize: bool,
    leaf: &'static TypeInfo,
    codec: Codec,
}

impl BoundField {
    pub(crate) fn new(
        name: impl Into<Box<str>>,
        path: Box<[StepId]>,
        serialize: bool,
        deserialize: bool,
        leaf: &'static TypeInfo,
        codec: Codec,
    ) -> Self {
        debug_assert!(!path.is_empty());
        Self {
            name: name.into(),
            path,
            serialize,
            deserialize,
            leaf,
            codec,
        }
    }

    /// The document member name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn path(&self) -> &[StepId] {
        &self.path
    }

    #[inline]
    pub fn serialize(&self) -> bool {
        self.serialize
    }

    #[inline]
    pub fn deserialize(&self) -> bool {
        self.deserialize
    }

    /// The type of the last field of the path.
    #[inline]
    pub fn leaf_info(&self) -> &'static TypeInfo {
        self.leaf
    }

    #[inline]
    pub fn codec(&self) -> &Codec {
        &self.codec
    }

    fn split_path(&self) -> Result<(StepId, &[StepId]), FlattenError> {
        match self.path.split_last() {
            Some((last, intermediates)) => Ok((*last, intermediates)),
            None => Err(FlattenError::MissingField {
                type_path: self.leaf.type_path(),
                index: 0,
            }),
        }
    }

    // -------------------------------------------------------------------------
    // Writing

    /// Finds the leaf value, `None` if an intermediate is absent.
    pub fn locate<'v>(
        &self,
        arena: &FieldArena,
        root: &'v dyn Reflect,
    ) -> Result<Option<&'v dyn Reflect>, FlattenError> {
        let (last, intermediates) = self.split_path()?;

        let mut current = root;
        for id in intermediates {
            let field = field_ref(current, arena.get(*id))?;
            match present(field) {
                Some(value) => current = value,
                None => return Ok(None),
            }
        }
        field_ref(current, arena.get(last)).map(Some)
    }

    /// Returns `true` if the member would be written as null.
    pub fn is_absent(&self, arena: &FieldArena, root: &dyn Reflect) -> Result<bool, FlattenError> {
        Ok(match self.locate(arena, root)? {
            Some(leaf) => present(leaf).is_none(),
            None => true,
        })
    }

    /// Writes the leaf value of `root` as an optional value.
    ///
    /// An absent intermediate is written as none, nothing below it is read.
    pub fn write<S: Serializer>(
        &self,
        arena: &FieldArena,
        root: &dyn Reflect,
        ctx: &FlatContext,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match self.locate(arena, root).map_err(ser::make_custom_error::<S::Error>)? {
            Some(leaf) => serializer.serialize_some(&LeafWriter {
                codec: &self.codec,
                leaf,
                ctx,
            }),
            None => serializer.serialize_none(),
        }
    }

    // -------------------------------------------------------------------------
    // Reading

    /// Reads one optional value with the leaf codec and stores it in `root`.
    ///
    /// Absent intermediates are constructed on the way down. A null for a
    /// leaf that cannot hold one leaves the field as it is.
    pub fn read<'de, D: Deserializer<'de>>(
        &self,
        arena: &FieldArena,
        root: &mut dyn Reflect,
        ctx: &FlatContext,
        deserializer: D,
    ) -> Result<(), D::Error> {
        let decoded = deserializer.deserialize_option(LeafVisitor {
            codec: &self.codec,
            ctx,
        })?;
        self.assign(arena, root, decoded, ctx)
            .map_err(de::make_custom_error)
    }

    /// Stores a decoded leaf value, `None` standing for a document null.
    pub fn assign(
        &self,
        arena: &FieldArena,
        root: &mut dyn Reflect,
        decoded: Option<Box<dyn Reflect>>,
        ctx: &FlatContext,
    ) -> Result<(), FlattenError> {
        let (last, intermediates) = self.split_path()?;

        let mut current = root;
        for id in intermediates {
            let field = field_mut(current, arena.get(*id))?;
            current = construct_absent(field, ctx)?;
        }
        let field = field_mut(current, arena.get(last))?;

        let value = match (decoded, self.leaf) {
            (Some(value), _) => value,
            (None, TypeInfo::Optional(info)) => info.none(),
            (None, _) => {
                log::trace!(
                    "null for `{}` of type `{}` skipped",
                    self.name,
                    self.leaf.type_path(),
                );
                return Ok(());
            }
        };

        let expected = field.reflect_type_path();
        field.set(value).map_err(|value| FlattenError::TypeMismatch {
            expected,
            found: value.reflect_type_path(),
        })
    }
}

// -----------------------------------------------------------------------------
// Path walking

fn as_struct<'v>(value: &'v dyn Reflect, step: &FieldStep) -> Result<&'v dyn Struct, FlattenError> {
    match value.reflect_ref() {
        ReflectRef::Struct(target) if target.ty_id() == step.owner.ty_id() => Ok(target),
        _ => Err(FlattenError::TypeMismatch {
            expected: step.owner.type_path(),
            found: value.reflect_type_path(),
        }),
    }
}

fn field_ref<'v>(value: &'v dyn Reflect, step: &FieldStep) -> Result<&'v dyn Reflect, FlattenError> {
    as_struct(value, step)?
        .field_at(step.index)
        .ok_or(FlattenError::MissingField {
            type_path: step.owner.type_path(),
            index: step.index,
        })
}

fn field_mut<'v>(
    value: &'v mut dyn Reflect,
    step: &FieldStep,
) -> Result<&'v mut dyn Reflect, FlattenError> {
    let found = value.reflect_type_path();
    let target = match value.reflect_mut() {
        ReflectMut::Struct(target) if target.ty_id() == step.owner.ty_id() => target,
        _ => {
            return Err(FlattenError::TypeMismatch {
                expected: step.owner.type_path(),
                found,
            });
        }
    };
    target
        .field_at_mut(step.index)
        .ok_or(FlattenError::MissingField {
            type_path: step.owner.type_path(),
            index: step.index,
        })
}

/// Looks through `Option` layers, `None` if one of them is absent.
fn present(value: &dyn Reflect) -> Option<&dyn Reflect> {
    match value.reflect_ref() {
        ReflectRef::Optional(option) => option.value().and_then(present),
        _ => Some(value),
    }
}

/// Looks through `Option` layers, filling absent ones with default values.
fn construct_absent<'v>(
    value: &'v mut dyn Reflect,
    ctx: &FlatContext,
) -> Result<&'v mut dyn Reflect, FlattenError> {
    if value.reflect_kind() != ReflectKind::Optional {
        return Ok(value);
    }

    let found = value.reflect_type_path();
    let ReflectMut::Optional(option) = value.reflect_mut() else {
        return Err(FlattenError::NotAStruct { type_path: found });
    };

    if option.is_none() {
        let TypeInfo::Optional(info) = option.reflect_type_info() else {
            return Err(FlattenError::NotAStruct { type_path: found });
        };
        let some_info = info.some_info();
        log::trace!("constructing absent `{}`", some_info.type_path());

        let mismatch = |value: Box<dyn Reflect>| FlattenError::TypeMismatch {
            expected: found,
            found: value.reflect_type_path(),
        };
        let inner = info.wrap_some(ctx.construct(some_info)?).map_err(mismatch)?;
        option.set(inner).map_err(mismatch)?;
    }

    match option.value_mut() {
        Some(inner) => construct_absent(inner, ctx),
        None => Err(FlattenError::TypeMismatch {
            expected: found,
            found: "None",
        }),
    }
}

// -----------------------------------------------------------------------------
// LeafWriter / LeafVisitor

struct LeafWriter<'a> {
    codec: &'a Codec,
    leaf: &'a dyn Reflect,
    ctx: &'a FlatContext,
}

impl Serialize for LeafWriter<'_> {
    #[inline]
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.codec.serialize(self.leaf, self.ctx, serializer)
    }
}

/// Decodes a leaf, mapping a document null to `None` whatever the leaf type.
struct LeafVisitor<'a> {
    codec: &'a Codec,
    ctx: &'a FlatContext,
}

impl<'de> Visitor<'de> for LeafVisitor<'_> {
    type Value = Option<Box<dyn Reflect>>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a value of type ")?;
        formatter.write_str(self.codec.info().type_path())
    }

    #[inline]
    fn visit_none<E: serde_core::de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    #[inline]
    fn visit_unit<E: serde_core::de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        self.codec.deserialize(self.ctx, deserializer).map(Some)
    }
}
