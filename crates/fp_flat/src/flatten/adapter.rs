use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use fp_reflect::Reflect;
use fp_reflect::info::StructInfo;
use fp_reflect::registry::TypeTraitDefault;
use serde_core::de::{DeserializeSeed, IgnoredAny, MapAccess, Visitor};
use serde_core::ser::SerializeMap;
use serde_core::{Deserializer, Serialize, Serializer};

use super::{BoundField, BoundFieldTable, FieldArena, FlattenError};
use crate::context::FlatContext;
use crate::serde::{Ident, de, ser};

// -----------------------------------------------------------------------------
// FlatAdapter

/// Reads and writes values of one struct type through its
/// [`BoundFieldTable`].
///
/// Values are written as a document map holding the members in table order.
/// Reading starts from a default value and fills in the members found in
/// the document, unknown ones are skipped. Every member value is optional,
/// an absent one is written as none.
pub struct FlatAdapter {
    info: &'static StructInfo,
    table: BoundFieldTable,
    constructor: Option<TypeTraitDefault>,
}

impl FlatAdapter {
    pub fn new(
        info: &'static StructInfo,
        table: BoundFieldTable,
        constructor: Option<TypeTraitDefault>,
    ) -> Self {
        Self {
            info,
            table,
            constructor,
        }
    }

    #[inline]
    pub fn info(&self) -> &'static StructInfo {
        self.info
    }

    #[inline]
    pub fn table(&self) -> &BoundFieldTable {
        &self.table
    }

    /// Creates the value members are read into.
    pub fn construct(&self) -> Result<Box<dyn Reflect>, FlattenError> {
        match &self.constructor {
            Some(constructor) => Ok(constructor.default()),
            None => Err(FlattenError::NoConstructor {
                type_path: self.info.type_path(),
            }),
        }
    }

    /// Writes `value` as an optional map, `None` as null.
    ///
    /// Pairs with [`read`](Self::read).
    pub fn write<S: Serializer>(
        &self,
        value: Option<&dyn Reflect>,
        ctx: &FlatContext,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(value) => serializer.serialize_some(&MapWriter {
                adapter: self,
                value,
                ctx,
            }),
            None => serializer.serialize_none(),
        }
    }

    /// Writes `value` as a map holding the members in table order.
    ///
    /// Pairs with [`read_map`](Self::read_map).
    pub fn write_map<S: Serializer>(
        &self,
        value: &dyn Reflect,
        ctx: &FlatContext,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        if value.ty_id() != self.info.ty_id() {
            return Err(ser::make_custom_error(FlattenError::TypeMismatch {
                expected: self.info.type_path(),
                found: value.reflect_type_path(),
            }));
        }

        let arena = self.table.arena();
        let mut members = Vec::with_capacity(self.table.len());
        for field in self.table.iter().filter(|field| field.serialize()) {
            if !ctx.serialize_nulls()
                && field.is_absent(arena, value).map_err(ser::make_custom_error::<S::Error>)?
            {
                continue;
            }
            members.push(field);
        }

        let mut map = serializer.serialize_map(Some(members.len()))?;
        for field in members {
            map.serialize_entry(
                field.name(),
                &MemberWriter {
                    field,
                    arena,
                    root: value,
                    ctx,
                },
            )?;
        }
        map.end()
    }

    /// Reads an optional map, `None` for a document null.
    pub fn read<'de, D: Deserializer<'de>>(
        &self,
        ctx: &FlatContext,
        deserializer: D,
    ) -> Result<Option<Box<dyn Reflect>>, D::Error> {
        deserializer.deserialize_option(OptionalVisitor { adapter: self, ctx })
    }

    /// Reads a map into a freshly constructed value.
    pub fn read_map<'de, D: Deserializer<'de>>(
        &self,
        ctx: &FlatContext,
        deserializer: D,
    ) -> Result<Box<dyn Reflect>, D::Error> {
        deserializer.deserialize_map(MapVisitor { adapter: self, ctx })
    }
}

impl fmt::Debug for FlatAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlatAdapter")
            .field("type_path", &self.info.type_path())
            .field("table", &self.table)
            .field("constructor", &self.constructor.is_some())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Writing

struct MapWriter<'a> {
    adapter: &'a FlatAdapter,
    value: &'a dyn Reflect,
    ctx: &'a FlatContext,
}

impl Serialize for MapWriter<'_> {
    #[inline]
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.adapter.write_map(self.value, self.ctx, serializer)
    }
}

struct MemberWriter<'a> {
    field: &'a BoundField,
    arena: &'a FieldArena,
    root: &'a dyn Reflect,
    ctx: &'a FlatContext,
}

impl Serialize for MemberWriter<'_> {
    #[inline]
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.field.write(self.arena, self.root, self.ctx, serializer)
    }
}

// -----------------------------------------------------------------------------
// Reading

struct OptionalVisitor<'a> {
    adapter: &'a FlatAdapter,
    ctx: &'a FlatContext,
}

impl<'de> Visitor<'de> for OptionalVisitor<'_> {
    type Value = Option<Box<dyn Reflect>>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an optional map of type ")?;
        formatter.write_str(self.adapter.info.type_path())
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
        self.adapter.read_map(self.ctx, deserializer).map(Some)
    }
}

struct MapVisitor<'a> {
    adapter: &'a FlatAdapter,
    ctx: &'a FlatContext,
}

impl<'de> Visitor<'de> for MapVisitor<'_> {
    type Value = Box<dyn Reflect>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map of type ")?;
        formatter.write_str(self.adapter.info.type_path())
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let adapter = self.adapter;
        let arena = adapter.table.arena();
        let mut instance = adapter.construct().map_err(de::make_custom_error::<A::Error>)?;

        while let Some(Ident(key)) = map.next_key::<Ident>()? {
            match adapter.table.get(&key) {
                Some(field) if field.deserialize() => map.next_value_seed(MemberReader {
                    field,
                    arena,
                    root: &mut *instance,
                    ctx: self.ctx,
                })?,
                _ => {
                    map.next_value::<IgnoredAny>()?;
                }
            }
        }

        Ok(instance)
    }
}

struct MemberReader<'a> {
    field: &'a BoundField,
    arena: &'a FieldArena,
    root: &'a mut dyn Reflect,
    ctx: &'a FlatContext,
}

impl<'de> DeserializeSeed<'de> for MemberReader<'_> {
    type Value = ();

    #[inline]
    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<(), D::Error> {
        self.field.read(self.arena, self.root, self.ctx, deserializer)
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::string::{String, ToString};
    use alloc::vec;
    use alloc::vec::Vec;

    use fp_reflect::derive::Reflect;
    use fp_reflect::info::Typed;
    use serde::{Deserialize, Serialize};

    use crate::context::FlatContext;
    use crate::policy::FieldNamingPolicy;

    #[derive(Reflect, Default, Debug, PartialEq, Clone)]
    #[reflect(default)]
    struct Owner {
        name: String,
        #[reflect(flatten)]
        bag: Option<Bag>,
    }

    #[derive(Reflect, Default, Debug, PartialEq, Clone)]
    #[reflect(default)]
    struct Bag {
        item_name: String,
        #[reflect(flatten)]
        part: Option<Part>,
    }

    #[derive(Reflect, Default, Debug, PartialEq, Clone)]
    #[reflect(default)]
    struct Part {
        part_name: String,
    }

    /// `Owner` written out by hand.
    #[derive(Reflect, Default, Debug, PartialEq)]
    #[reflect(default)]
    struct FlatOwner {
        name: String,
        item_name: String,
        part_name: String,
    }

    fn douglas() -> Owner {
        Owner {
            name: "Douglas".into(),
            bag: Some(Bag {
                item_name: "Brush".into(),
                part: Some(Part {
                    part_name: "Battery".into(),
                }),
            }),
        }
    }

    fn context() -> FlatContext {
        FlatContext::builder()
            .register::<Owner>()
            .register::<FlatOwner>()
            .naming_policy(FieldNamingPolicy::LowerCamelCase)
            .build()
    }

    fn write<T: fp_reflect::Reflect + Typed>(value: &T, ctx: &FlatContext) -> String {
        let adapter = ctx.adapter(T::type_info()).unwrap();
        let mut out = Vec::new();
        let mut ser = serde_json::Serializer::new(&mut out);
        adapter
            .write(Some(value as &dyn fp_reflect::Reflect), ctx, &mut ser)
            .unwrap();
        String::from_utf8(out).unwrap()
    }

    fn read<T: fp_reflect::FromReflect + Typed>(json: &str, ctx: &FlatContext) -> Option<T> {
        let adapter = ctx.adapter(T::type_info()).unwrap();
        let mut de = serde_json::Deserializer::from_str(json);
        adapter
            .read(ctx, &mut de)
            .unwrap()
            .map(|value| value.take::<T>().unwrap())
    }

    const DOUGLAS: &str = r#"{"name":"Douglas","itemName":"Brush","partName":"Battery"}"#;

    #[test]
    fn flattened_and_hand_inlined_types_agree() {
        let ctx = context();
        assert_eq!(write(&douglas(), &ctx), DOUGLAS);

        let flat = FlatOwner {
            name: "Douglas".into(),
            item_name: "Brush".into(),
            part_name: "Battery".into(),
        };
        assert_eq!(write(&flat, &ctx), DOUGLAS);

        assert_eq!(read::<Owner>(DOUGLAS, &ctx), Some(douglas()));
        assert_eq!(read::<FlatOwner>(DOUGLAS, &ctx), Some(flat));
    }

    #[test]
    fn absent_intermediates_write_null() {
        let ctx = context();
        let owner = Owner {
            name: "Douglas".into(),
            bag: None,
        };
        assert_eq!(
            write(&owner, &ctx),
            r#"{"name":"Douglas","itemName":null,"partName":null}"#
        );

        let owner = Owner {
            name: "Douglas".into(),
            bag: Some(Bag {
                item_name: "Brush".into(),
                part: None,
            }),
        };
        assert_eq!(
            write(&owner, &ctx),
            r#"{"name":"Douglas","itemName":"Brush","partName":null}"#
        );
    }

    #[test]
    fn reading_constructs_intermediates() {
        let ctx = context();
        let owner = read::<Owner>(r#"{"partName":"Battery"}"#, &ctx).unwrap();
        assert_eq!(owner.name, "");
        let bag = owner.bag.unwrap();
        assert_eq!(bag.item_name, "");
        assert_eq!(bag.part.unwrap().part_name, "Battery");

        let owner = read::<Owner>(r#"{"name":"Douglas"}"#, &ctx).unwrap();
        assert_eq!(owner.bag, None);
    }

    #[test]
    fn null_and_unknown_members() {
        let ctx = context();
        assert_eq!(read::<Owner>("null", &ctx), None);

        let json = r#"{"name":"Douglas","colour":{"deep":[1,2,null]},"itemName":"Brush","partName":"Battery","extra":3}"#;
        assert_eq!(read::<Owner>(json, &ctx), Some(douglas()));
    }

    #[test]
    fn writing_is_stable() {
        let ctx = context();
        let value = douglas();
        assert_eq!(write(&value, &ctx), write(&value, &ctx));
        assert_eq!(write(&value.clone(), &ctx), DOUGLAS);
    }

    #[derive(Reflect, Debug, PartialEq)]
    #[reflect(default)]
    struct Gauge {
        label: String,
        #[reflect(flatten)]
        reading: Option<Reading>,
    }

    impl Default for Gauge {
        fn default() -> Self {
            Self {
                label: "gauge".to_string(),
                reading: None,
            }
        }
    }

    #[derive(Reflect, Debug, PartialEq)]
    #[reflect(default)]
    struct Reading {
        volts: f32,
        note: Option<String>,
    }

    impl Default for Reading {
        fn default() -> Self {
            Self {
                volts: 12.5,
                note: Some("factory".to_string()),
            }
        }
    }

    #[test]
    fn nulls_skip_primitives_and_clear_options() {
        let ctx = FlatContext::builder().register::<Gauge>().build();

        let gauge = read::<Gauge>(r#"{"label":null,"volts":null,"note":null}"#, &ctx).unwrap();
        assert_eq!(gauge.label, "gauge");
        assert_eq!(
            gauge.reading,
            Some(Reading {
                volts: 12.5,
                note: None,
            })
        );

        let gauge = read::<Gauge>(r#"{"volts":3.0}"#, &ctx).unwrap();
        assert_eq!(gauge.reading.unwrap().note.as_deref(), Some("factory"));
    }

    #[test]
    fn skip_nulls_when_configured() {
        let ctx = FlatContext::builder()
            .register::<Gauge>()
            .serialize_nulls(false)
            .build();

        let gauge = Gauge::default();
        assert_eq!(write(&gauge, &ctx), r#"{"label":"gauge"}"#);

        let gauge = Gauge {
            label: "g".into(),
            reading: Some(Reading {
                volts: 1.5,
                note: None,
            }),
        };
        assert_eq!(write(&gauge, &ctx), r#"{"label":"g","volts":1.5}"#);
    }

    #[derive(Reflect, Default, Debug, PartialEq)]
    #[reflect(default)]
    struct Kit {
        #[reflect(rename = "kit")]
        title: String,
        tools: Vec<Tool>,
        #[reflect(flatten)]
        spare: Option<alloc::boxed::Box<Part>>,
        stamp: Stamp,
    }

    #[derive(Reflect, Default, Debug, PartialEq)]
    #[reflect(default)]
    struct Tool {
        tool_name: String,
        #[reflect(flatten)]
        part: Part,
    }

    #[derive(Reflect, Serialize, Deserialize, Default, Debug, PartialEq, Clone, Copy)]
    #[reflect(opaque, default, serde)]
    struct Stamp(u32);

    #[test]
    fn nested_values_use_their_own_tables() {
        let ctx = FlatContext::builder()
            .register::<Kit>()
            .naming_policy(FieldNamingPolicy::LowerCamelCase)
            .build();

        let kit = Kit {
            title: "Workshop".into(),
            tools: vec![Tool {
                tool_name: "Drill".into(),
                part: Part {
                    part_name: "Chuck".into(),
                },
            }],
            spare: Some(alloc::boxed::Box::new(Part {
                part_name: "Fuse".into(),
            })),
            stamp: Stamp(7),
        };
        let json = write(&kit, &ctx);
        assert_eq!(
            json,
            r#"{"kit":"Workshop","tools":[{"toolName":"Drill","partName":"Chuck"}],"partName":"Fuse","stamp":7}"#
        );
        assert_eq!(read::<Kit>(&json, &ctx), Some(kit));
    }

    #[derive(Reflect)]
    struct NoDefault {
        value: u8,
    }

    #[test]
    fn reading_needs_a_constructor() {
        let ctx = FlatContext::builder().register::<NoDefault>().build();
        let adapter = ctx.adapter(NoDefault::type_info()).unwrap();
        let mut de = serde_json::Deserializer::from_str(r#"{"value":1}"#);
        let err = adapter.read(&ctx, &mut de).unwrap_err();
        assert!(err.to_string().contains("no default constructor"));
    }

    #[derive(Reflect, Default, Debug, PartialEq)]
    #[reflect(default)]
    struct Vehicle {
        wheels: u8,
    }

    #[derive(Reflect, Default, Debug, PartialEq)]
    #[reflect(default)]
    struct Machine {
        cc: u32,
    }

    #[derive(Reflect, Default, Debug, PartialEq)]
    #[reflect(default)]
    struct Engine {
        hp: u32,
        #[reflect(base)]
        machine: Machine,
    }

    #[derive(Reflect, Default, Debug, PartialEq)]
    #[reflect(default)]
    struct Car {
        seats: u8,
        #[reflect(base)]
        vehicle: Option<Vehicle>,
        #[reflect(flatten)]
        engine: Option<Engine>,
    }

    fn car() -> Car {
        Car {
            seats: 2,
            vehicle: Some(Vehicle { wheels: 4 }),
            engine: Some(Engine {
                hp: 9,
                machine: Machine { cc: 7 },
            }),
        }
    }

    const CAR: &str = r#"{"seats":2,"hp":9,"cc":7,"wheels":4}"#;

    #[test]
    fn inherited_fields_round_trip() {
        let ctx = FlatContext::builder().register::<Car>().build();
        assert_eq!(write(&car(), &ctx), CAR);
        assert_eq!(read::<Car>(CAR, &ctx), Some(car()));

        let bare = Car {
            seats: 1,
            vehicle: None,
            engine: None,
        };
        assert_eq!(
            write(&bare, &ctx),
            r#"{"seats":1,"hp":null,"cc":null,"wheels":null}"#
        );

        let read_back = read::<Car>(r#"{"wheels":3}"#, &ctx).unwrap();
        assert_eq!(read_back.vehicle, Some(Vehicle { wheels: 3 }));
        assert_eq!(read_back.engine, None);
    }

    #[test]
    fn malformed_documents_are_errors() {
        let ctx = FlatContext::builder().register::<Car>().build();
        let adapter = ctx.adapter(Car::type_info()).unwrap();

        for json in [
            "[1]",
            "7",
            r#"{"seats":1"#,
            r#"{"hp":[1]}"#,
            r#"{"seats":"two"}"#,
            r#"{"wheels":{"count":4}}"#,
        ] {
            let mut de = serde_json::Deserializer::from_str(json);
            assert!(adapter.read(&ctx, &mut de).is_err(), "{json}");
        }
    }

    fn ron_round_trip<T>(value: &T, ctx: &FlatContext) -> String
    where
        T: fp_reflect::FromReflect + Typed + core::fmt::Debug + PartialEq,
    {
        use crate::serde::{DeserializeDriver, SerializeDriver};

        let text = ron::to_string(&SerializeDriver::new(value, ctx)).unwrap();
        let read_back = ron::Options::default()
            .from_str_seed(&text, DeserializeDriver::new(T::type_info(), ctx))
            .unwrap();
        assert_eq!(&read_back.take::<T>().unwrap(), value, "{text}");
        text
    }

    #[test]
    fn tagged_options_round_trip() {
        let ctx = FlatContext::builder()
            .register::<Owner>()
            .register::<Gauge>()
            .register::<Kit>()
            .register::<Car>()
            .naming_policy(FieldNamingPolicy::LowerCamelCase)
            .build();

        let text = ron_round_trip(&douglas(), &ctx);
        assert!(text.contains(r#"Some("Brush")"#));

        let owner = Owner {
            name: "Douglas".into(),
            bag: None,
        };
        let text = ron::to_string(&crate::serde::SerializeDriver::new(&owner, &ctx)).unwrap();
        assert!(text.contains(r#"Some("Douglas")"#));
        assert!(text.contains("None"));

        ron_round_trip(
            &Gauge {
                label: "g".into(),
                reading: Some(Reading {
                    volts: 1.5,
                    note: None,
                }),
            },
            &ctx,
        );
        ron_round_trip(
            &Kit {
                title: "Workshop".into(),
                tools: vec![Tool {
                    tool_name: "Drill".into(),
                    part: Part {
                        part_name: "Chuck".into(),
                    },
                }],
                spare: Some(alloc::boxed::Box::new(Part {
                    part_name: "Fuse".into(),
                })),
                stamp: Stamp(7),
            },
            &ctx,
        );
        ron_round_trip(&car(), &ctx);
    }
}
