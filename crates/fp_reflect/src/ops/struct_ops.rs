use crate::Reflect;

// -----------------------------------------------------------------------------
// Struct

/// Field access of a struct with named fields.
///
/// Indices follow the declaration order recorded in
/// [`StructInfo`](crate::info::StructInfo).
///
/// ```
/// use fp_reflect::derive::Reflect;
/// use fp_reflect::ops::Struct;
///
/// #[derive(Reflect)]
/// struct Part {
///     part_name: String,
///     weight: u32,
/// }
///
/// let mut part = Part { part_name: "Battery".into(), weight: 20 };
///
/// assert_eq!(part.field_len(), 2);
/// assert_eq!(part.name_at(1), Some("weight"));
/// *part.field_at_mut(1).unwrap().downcast_mut::<u32>().unwrap() += 1;
/// assert_eq!(part.weight, 21);
///
/// let names: Vec<_> = part.iter_fields().map(|(name, _)| name).collect();
/// assert_eq!(names, ["part_name", "weight"]);
/// ```
pub trait Struct: Reflect {
    /// Returns the field named `name`.
    fn field(&self, name: &str) -> Option<&dyn Reflect>;

    /// Returns the field named `name` mutably.
    fn field_mut(&mut self, name: &str) -> Option<&mut dyn Reflect>;

    /// Returns the field at `index`.
    fn field_at(&self, index: usize) -> Option<&dyn Reflect>;

    /// Returns the field at `index` mutably.
    fn field_at_mut(&mut self, index: usize) -> Option<&mut dyn Reflect>;

    /// Returns the name of the field at `index`.
    fn name_at(&self, index: usize) -> Option<&str>;

    /// Returns the number of reflected fields.
    fn field_len(&self) -> usize;

    /// Iterates `(name, value)` pairs in declaration order.
    fn iter_fields(&self) -> StructFieldIter<'_>;
}

// -----------------------------------------------------------------------------
// StructFieldIter

/// Iterator over the fields of a [`Struct`].
pub struct StructFieldIter<'a> {
    target: &'a dyn Struct,
    index: usize,
}

impl<'a> StructFieldIter<'a> {
    #[inline]
    pub const fn new(target: &'a dyn Struct) -> Self {
        Self { target, index: 0 }
    }
}

impl<'a> Iterator for StructFieldIter<'a> {
    type Item = (&'a str, &'a dyn Reflect);

    fn next(&mut self) -> Option<Self::Item> {
        let name = self.target.name_at(self.index)?;
        let value = self.target.field_at(self.index)?;
        self.index += 1;
        Some((name, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.target.field_len().saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for StructFieldIter<'_> {}
