use alloc::string::String;
use alloc::vec::Vec;

use fp_reflect::info::{NamedField, StructInfo, TypeInfo};

use super::FlattenError;
use crate::policy::{ExclusionPolicy, NamingPolicy};

// -----------------------------------------------------------------------------
// FieldStep

/// One field access: field `index` of a value of type `owner`.
#[derive(Clone, Copy, Debug)]
pub struct FieldStep {
    pub owner: &'static StructInfo,
    pub index: usize,
    pub field: &'static NamedField,
}

impl FieldStep {
    #[inline]
    pub const fn new(owner: &'static StructInfo, index: usize, field: &'static NamedField) -> Self {
        Self {
            owner,
            index,
            field,
        }
    }
}

// -----------------------------------------------------------------------------
// FieldDescriptor

/// A field as seen from the struct it was described for.
///
/// Inherited fields are reached through the `base` fields leading to their
/// declaring struct, so `steps` holds those base steps followed by the field
/// itself.
#[derive(Clone, Debug)]
pub struct FieldDescriptor {
    pub steps: Vec<FieldStep>,
    /// The document member name.
    pub name: String,
    pub serialize: bool,
    pub deserialize: bool,
}

impl FieldDescriptor {
    /// The described field, the last step.
    #[inline]
    pub fn field(&self) -> &'static NamedField {
        self.last_step().field
    }

    /// The struct declaring the field.
    #[inline]
    pub fn declaring(&self) -> &'static StructInfo {
        self.last_step().owner
    }

    #[inline]
    pub fn type_info(&self) -> &'static TypeInfo {
        self.field().type_info()
    }

    fn last_step(&self) -> &FieldStep {
        match self.steps.last() {
            Some(step) => step,
            None => unreachable!("descriptors hold at least one step"),
        }
    }
}

// -----------------------------------------------------------------------------
// DescriptorProvider

/// Lists the fields of a struct with their member names and directions.
///
/// Fields come in declaration order, the struct's own fields first. Fields
/// marked `#[reflect(base)]` are not listed themselves: the fields of their
/// struct follow, recursively, as if the struct inherited them.
///
/// ```
/// use fp_flat::flatten::DescriptorProvider;
/// use fp_flat::policy::{Excluder, FieldNamingPolicy};
/// use fp_reflect::derive::Reflect;
/// use fp_reflect::info::Typed;
///
/// #[derive(Reflect)]
/// struct Tool {
///     tool_name: String,
/// }
///
/// #[derive(Reflect)]
/// struct Drill {
///     #[reflect(base)]
///     tool: Tool,
///     #[reflect(rename = "rpm")]
///     max_speed: u32,
///     #[reflect(skip)]
///     serial: u64,
/// }
///
/// let excluder = Excluder::new();
/// let provider = DescriptorProvider::new(&FieldNamingPolicy::LowerCamelCase, &excluder);
/// let info = Drill::type_info().as_struct().unwrap();
/// let names: Vec<_> = provider
///     .descriptors(info)
///     .unwrap()
///     .into_iter()
///     .map(|d| d.name)
///     .collect();
///
/// assert_eq!(names, ["rpm", "toolName"]);
/// ```
#[derive(Clone, Copy)]
pub struct DescriptorProvider<'a> {
    naming: &'a dyn NamingPolicy,
    exclusion: &'a dyn ExclusionPolicy,
}

impl<'a> DescriptorProvider<'a> {
    #[inline]
    pub fn new(naming: &'a dyn NamingPolicy, exclusion: &'a dyn ExclusionPolicy) -> Self {
        Self { naming, exclusion }
    }

    /// Describes the fields of `info`.
    ///
    /// Fails with [`FlattenError::Cycle`] if a struct is its own base.
    pub fn descriptors(&self, info: &'static StructInfo) -> Result<Vec<FieldDescriptor>, FlattenError> {
        let mut out = Vec::with_capacity(info.field_len());
        let mut prefix = Vec::new();
        self.collect(info, info, &mut prefix, (true, true), &mut out)?;
        Ok(out)
    }

    fn collect(
        &self,
        root: &'static StructInfo,
        owner: &'static StructInfo,
        prefix: &mut Vec<FieldStep>,
        (serialize, deserialize): (bool, bool),
        out: &mut Vec<FieldDescriptor>,
    ) -> Result<(), FlattenError> {
        let mut bases = Vec::new();

        for (index, field) in owner.iter().enumerate() {
            let Some((ser, de)) = self.directions(owner, field) else {
                continue;
            };
            let step = FieldStep::new(owner, index, field);
            let directions = (serialize && ser, deserialize && de);

            if field.attributes().base() {
                bases.push((step, directions));
                continue;
            }

            let name = match field.attributes().rename() {
                Some(name) => name.into(),
                None => self.naming.translate_name(field),
            };

            let mut steps = Vec::with_capacity(prefix.len() + 1);
            steps.extend_from_slice(prefix);
            steps.push(step);

            out.push(FieldDescriptor {
                steps,
                name,
                serialize: directions.0,
                deserialize: directions.1,
            });
        }

        for (step, directions) in bases {
            let Some(base) = super::unwrap_struct(step.field.type_info()) else {
                log::warn!(
                    "base field `{}::{}` of type `{}` is not a struct, skipped",
                    owner.type_path(),
                    step.field.name(),
                    step.field.type_info().type_path(),
                );
                continue;
            };

            let id = base.ty_id();
            if id == root.ty_id() || prefix.iter().any(|s| s.owner.ty_id() == id) {
                return Err(FlattenError::Cycle {
                    type_path: root.type_path(),
                    path: dotted_steps(root, prefix.iter().chain([&step])),
                });
            }

            prefix.push(step);
            self.collect(root, base, prefix, directions, out)?;
            prefix.pop();
        }

        Ok(())
    }

    /// `None` if the field is excluded both ways.
    fn directions(&self, owner: &StructInfo, field: &NamedField) -> Option<(bool, bool)> {
        let excluded = |serialize| {
            self.exclusion.exclude_type(field.type_info(), serialize)
                || self.exclusion.exclude_field(owner, field, serialize)
        };
        let serialize = !excluded(true);
        let deserialize = !excluded(false);
        (serialize || deserialize).then_some((serialize, deserialize))
    }
}

/// `Root.field.field`, for error messages.
pub(crate) fn dotted_steps<'a>(
    root: &StructInfo,
    steps: impl IntoIterator<Item = &'a FieldStep>,
) -> String {
    let mut out = String::from(root.type_ident());
    for step in steps {
        out.push('.');
        out.push_str(step.field.name());
    }
    out
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::vec::Vec;

    use fp_reflect::derive::Reflect;
    use fp_reflect::info::Typed;

    use super::{DescriptorProvider, FieldDescriptor};
    use crate::flatten::FlattenError;
    use crate::policy::{Excluder, FieldNamingPolicy};

    #[derive(Reflect)]
    struct Vehicle {
        wheels: u8,
        #[reflect(base)]
        machine: Machine,
    }

    #[derive(Reflect)]
    struct Machine {
        serial_no: u64,
        #[reflect(skip_deserializing)]
        built_by: String,
    }

    #[derive(Reflect)]
    struct Car {
        #[reflect(base)]
        vehicle: Vehicle,
        #[reflect(skip_serializing)]
        seats: u8,
        #[reflect(rename = "NAME")]
        model_name: String,
    }

    fn describe<T: Typed>(naming: FieldNamingPolicy) -> Vec<FieldDescriptor> {
        let info = T::type_info().as_struct().unwrap();
        DescriptorProvider::new(&naming, &Excluder::new())
            .descriptors(info)
            .unwrap()
    }

    #[test]
    fn own_fields_come_before_inherited_ones() {
        let names: Vec<String> = describe::<Car>(FieldNamingPolicy::Identity)
            .into_iter()
            .map(|d| d.name)
            .collect();
        assert_eq!(names, ["seats", "NAME", "wheels", "serial_no", "built_by"]);
    }

    #[test]
    fn inherited_fields_carry_their_base_steps() {
        let descriptors = describe::<Car>(FieldNamingPolicy::UpperCamelCase);
        let serial = &descriptors[3];
        assert_eq!(serial.name, "SerialNo");
        assert_eq!(serial.steps.len(), 3);
        assert!(serial.declaring().type_is::<Machine>());
        assert_eq!(serial.steps[0].field.name(), "vehicle");
        assert_eq!(serial.steps[1].field.name(), "machine");
        assert!(serial.type_info().type_is::<u64>());
    }

    #[test]
    fn directions_are_kept_per_field() {
        let descriptors = describe::<Car>(FieldNamingPolicy::Identity);
        let seats = &descriptors[0];
        assert!(!seats.serialize && seats.deserialize);
        let built_by = &descriptors[4];
        assert!(built_by.serialize && !built_by.deserialize);
    }

    #[derive(Reflect)]
    struct Looping {
        #[reflect(base)]
        inner: Option<alloc::boxed::Box<Looping>>,
    }

    #[test]
    fn self_base_is_a_cycle() {
        let info = Looping::type_info().as_struct().unwrap();
        let err = DescriptorProvider::new(&FieldNamingPolicy::Identity, &Excluder::new())
            .descriptors(info)
            .unwrap_err();
        assert!(matches!(err, FlattenError::Cycle { ref path, .. } if path == "Looping.inner"));
    }
}
