use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::any::TypeId;

use fp_utils::hash::{FixedHashState, HashMap};

use super::descriptor::{FieldStep, dotted_steps};
use super::{BoundField, FlattenError};

// -----------------------------------------------------------------------------
// FieldArena

/// Index of a [`FieldStep`] in a [`FieldArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StepId(u32);

impl StepId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Append-only storage of the field steps of one table.
///
/// Paths are sequences of [`StepId`]s. A step shared by several paths, such
/// as a flattened field, is stored once.
#[derive(Debug, Default)]
pub struct FieldArena {
    steps: Vec<FieldStep>,
    interned: HashMap<(TypeId, usize), StepId>,
}

impl FieldArena {
    pub fn new() -> Self {
        Self {
            steps: Vec::new(),
            interned: HashMap::with_hasher(FixedHashState),
        }
    }

    /// Returns the id of `step`, storing it first if it is new.
    pub fn intern(&mut self, step: FieldStep) -> StepId {
        let key = (step.owner.ty_id(), step.index);
        if let Some(id) = self.interned.get(&key) {
            return *id;
        }
        let id = StepId(self.steps.len() as u32);
        self.steps.push(step);
        self.interned.insert(key, id);
        id
    }

    /// # Panics
    ///
    /// Panics if `id` comes from another arena.
    #[inline]
    pub fn get(&self, id: StepId) -> &FieldStep {
        &self.steps[id.index()]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Renders a path as `Root.field.field`.
    pub fn dotted(&self, path: &[StepId]) -> String {
        let Some(first) = path.first() else {
            return String::new();
        };
        let root = self.get(*first).owner;
        dotted_steps(root, path.iter().map(|id| self.get(*id)))
    }
}

// -----------------------------------------------------------------------------
// BoundFieldTable

/// The document members of one type, in serialization order.
///
/// Built by [`FlattenResolver`](super::FlattenResolver), immutable afterwards.
#[derive(Debug)]
pub struct BoundFieldTable {
    fields: Box<[BoundField]>,
    index: HashMap<Box<str>, usize>,
    arena: FieldArena,
}

impl BoundFieldTable {
    /// Looks a member up by its document name.
    #[inline]
    pub fn get(&self, name: &str) -> Option<&BoundField> {
        self.index.get(name).map(|&i| &self.fields[i])
    }

    /// Iterates members in serialization order.
    #[inline]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &BoundField> {
        self.fields.iter()
    }

    #[inline]
    pub fn names(&self) -> impl ExactSizeIterator<Item = &str> {
        self.fields.iter().map(BoundField::name)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// The steps the member paths refer to.
    #[inline]
    pub fn arena(&self) -> &FieldArena {
        &self.arena
    }
}

// -----------------------------------------------------------------------------
// TableBuilder

pub(super) struct TableBuilder {
    type_path: &'static str,
    fields: Vec<BoundField>,
    index: HashMap<Box<str>, usize>,
    pub arena: FieldArena,
}

impl TableBuilder {
    pub fn new(type_path: &'static str) -> Self {
        Self {
            type_path,
            fields: Vec::new(),
            index: HashMap::with_hasher(FixedHashState),
            arena: FieldArena::new(),
        }
    }

    #[inline]
    pub fn type_path(&self) -> &'static str {
        self.type_path
    }

    pub fn insert(&mut self, field: BoundField) -> Result<(), FlattenError> {
        if self.index.contains_key(field.name()) {
            return Err(FlattenError::Collision {
                type_path: self.type_path,
                name: field.name().into(),
                path: self.arena.dotted(field.path()),
            });
        }
        self.index.insert(field.name().into(), self.fields.len());
        self.fields.push(field);
        Ok(())
    }

    pub fn finish(self) -> BoundFieldTable {
        BoundFieldTable {
            fields: self.fields.into_boxed_slice(),
            index: self.index,
            arena: self.arena,
        }
    }
}
