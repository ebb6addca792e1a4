#![doc = include_str!("../README.md")]
#![no_std]

// -----------------------------------------------------------------------------
// no_std support

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod error;
mod leaf;

pub use error::JsonError;

use alloc::string::String;

use treeform_codec::info::Category;
use treeform_codec::registry::CodecRegistry;
use treeform_codec::{structural, Reflect, Tree, Typed};

// -----------------------------------------------------------------------------
// Registry

/// Builds a [`CodecRegistry`] populated for JSON.
///
/// The registry carries leaf functions for JSON's primitive repertoire
/// (booleans, sized integers, floats, characters, strings, null) and the
/// structural codecs for records, sequences, mappings, and alternatives.
/// Callers register their own record and union types on top, and may shadow
/// any entry by registering a more specific one.
pub fn registry() -> CodecRegistry {
    let mut registry = CodecRegistry::empty();
    leaf::register(&mut registry);

    registry.register_serializer(Category::Record, structural::serialize_record);
    registry.register_deserializer(Category::Record, structural::deserialize_record);
    registry.register_serializer(Category::Sequence, structural::serialize_sequence);
    registry.register_deserializer(Category::Sequence, structural::deserialize_sequence);
    registry.register_serializer(Category::Mapping, structural::serialize_mapping);
    registry.register_deserializer(Category::Mapping, structural::deserialize_mapping);
    registry.register_serializer(Category::Alternative, structural::serialize_alternative);

    registry
}

// -----------------------------------------------------------------------------
// Text-level entry points

/// Serializes `value` to compact JSON text.
pub fn to_string(registry: &CodecRegistry, value: &dyn Reflect) -> Result<String, JsonError> {
    let tree = registry.serialize(value)?;
    Ok(serde_json::to_string(&tree)?)
}

/// Serializes `value` to pretty-printed JSON text.
pub fn to_string_pretty(
    registry: &CodecRegistry,
    value: &dyn Reflect,
) -> Result<String, JsonError> {
    let tree = registry.serialize(value)?;
    Ok(serde_json::to_string_pretty(&tree)?)
}

/// Deserializes a `T` from JSON text.
pub fn from_str<T: Typed>(registry: &CodecRegistry, text: &str) -> Result<T, JsonError> {
    let tree: Tree = serde_json::from_str(text)?;
    Ok(registry.deserialize_as::<T>(&tree)?)
}

/// Serializes `value` into an in-memory [`serde_json::Value`], for callers
/// that compose JSON documents rather than emit text.
pub fn to_json(
    registry: &CodecRegistry,
    value: &dyn Reflect,
) -> Result<serde_json::Value, JsonError> {
    let tree = registry.serialize(value)?;
    Ok(serde_json::to_value(&tree)?)
}

/// Deserializes a `T` from an in-memory [`serde_json::Value`].
pub fn from_json<T: Typed>(
    registry: &CodecRegistry,
    json: serde_json::Value,
) -> Result<T, JsonError> {
    let tree: Tree = serde_json::from_value(json)?;
    Ok(registry.deserialize_as::<T>(&tree)?)
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::borrow::ToOwned;
    use alloc::string::String;
    use alloc::vec::Vec;

    use treeform_codec::error::DeserializeError;
    use treeform_codec::info::Category;
    use treeform_codec::registry::SerializeDriver;
    use treeform_codec::{reflect_record, reflect_union, Reflect, Tree};

    use crate::{from_str, registry, to_string};

    #[derive(Debug, PartialEq)]
    struct Item {
        name: String,
        price: f64,
        qty: i64,
    }

    reflect_record!(Item {
        name: String,
        price: f64,
        qty: i64 = 1,
    });

    #[derive(Debug, PartialEq)]
    struct Order {
        id: u32,
        items: Vec<Item>,
        note: Option<String>,
    }

    reflect_record!(Order {
        id: u32,
        items: Vec<Item>,
        note: Option<String>,
    });

    #[derive(Debug, PartialEq)]
    enum Id {
        Number(i64),
        Label(String),
    }

    reflect_union!(Id {
        Number(i64),
        Label(String),
    });

    fn item_registry() -> treeform_codec::CodecRegistry {
        let mut registry = registry();
        registry.register::<Order>();
        registry
    }

    #[test]
    fn record_round_trip_keeps_field_order() {
        let registry = item_registry();
        let item = Item {
            name: "Apple".to_owned(),
            price: 0.2,
            qty: 20,
        };

        let text = to_string(&registry, &item).unwrap();
        assert_eq!(text, r#"{"name":"Apple","price":0.2,"qty":20}"#);
        assert_eq!(from_str::<Item>(&registry, &text).unwrap(), item);
    }

    #[test]
    fn absent_field_with_default_is_filled_in() {
        let registry = item_registry();
        let item: Item = from_str(&registry, r#"{"name":"Apple","price":0.2}"#).unwrap();
        assert_eq!(item.qty, 1);
    }

    #[test]
    fn absent_required_field_is_an_error() {
        let registry = item_registry();
        let error = from_str::<Item>(&registry, r#"{"name":"Apple"}"#).unwrap_err();
        assert_eq!(
            alloc::string::ToString::to_string(&error),
            "record `Item` is missing required field `price`"
        );
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let registry = item_registry();
        let item: Item =
            from_str(&registry, r#"{"name":"Apple","price":0.2,"qty":3,"color":"red"}"#).unwrap();
        assert_eq!(item.qty, 3);
    }

    #[test]
    fn field_errors_carry_record_and_field_context() {
        let registry = item_registry();
        let error = from_str::<Item>(&registry, r#"{"name":"Apple","price":true}"#).unwrap_err();
        assert_eq!(
            alloc::string::ToString::to_string(&error),
            "field `price` of record `Item` could not be deserialized"
        );
    }

    #[test]
    fn nested_records_and_options_round_trip() {
        let registry = item_registry();
        let order = Order {
            id: 7,
            items: alloc::vec![Item {
                name: "Apple".to_owned(),
                price: 0.2,
                qty: 20,
            }],
            note: None,
        };

        let text = to_string(&registry, &order).unwrap();
        assert_eq!(
            text,
            r#"{"id":7,"items":[{"name":"Apple","price":0.2,"qty":20}],"note":null}"#
        );
        assert_eq!(from_str::<Order>(&registry, &text).unwrap(), order);

        let with_note: Order = from_str(
            &registry,
            r#"{"id":7,"items":[],"note":"rush"}"#,
        )
        .unwrap();
        assert_eq!(with_note.note.as_deref(), Some("rush"));
    }

    #[test]
    fn union_resolution_follows_declaration_order() {
        let registry = registry();

        // An integer input satisfies `Number` first.
        assert_eq!(from_str::<Id>(&registry, "5").unwrap(), Id::Number(5));
        assert_eq!(
            from_str::<Id>(&registry, r#""five""#).unwrap(),
            Id::Label("five".to_owned())
        );
        assert_eq!(to_string(&registry, &Id::Number(5)).unwrap(), "5");
    }

    #[test]
    fn exhausted_union_reports_every_branch() {
        let registry = registry();
        match from_str::<Id>(&registry, "true").unwrap_err() {
            crate::JsonError::Deserialize(DeserializeError::ExhaustedAlternatives {
                causes,
                ..
            }) => assert_eq!(causes.len(), 2),
            other => panic!("expected an exhausted-alternatives error, got {other}"),
        }
    }

    #[test]
    fn malformed_text_is_a_syntax_error() {
        let registry = registry();
        assert!(matches!(
            from_str::<Id>(&registry, "{not json").unwrap_err(),
            crate::JsonError::Syntax { .. }
        ));
    }

    #[test]
    fn value_level_glue_round_trips() {
        let registry = item_registry();
        let item = Item {
            name: "Apple".to_owned(),
            price: 0.2,
            qty: 20,
        };

        let json = crate::to_json(&registry, &item).unwrap();
        assert_eq!(json["qty"], serde_json::json!(20));
        assert_eq!(crate::from_json::<Item>(&registry, json).unwrap(), item);
    }

    #[test]
    fn string_keyed_maps_round_trip() {
        use alloc::collections::BTreeMap;

        let registry = registry();
        let mut scores: BTreeMap<String, i64> = BTreeMap::new();
        scores.insert("alpha".to_owned(), 1);
        scores.insert("beta".to_owned(), 2);

        let text = to_string(&registry, &scores).unwrap();
        assert_eq!(text, r#"{"alpha":1,"beta":2}"#);
        assert_eq!(
            from_str::<BTreeMap<String, i64>>(&registry, &text).unwrap(),
            scores
        );
    }

    #[test]
    fn a_concrete_entry_shadows_the_record_fallback() {
        fn serialize_item_as_name(
            _: &SerializeDriver<'_>,
            value: &dyn Reflect,
        ) -> Result<Tree, treeform_codec::SerializeError> {
            let item = value.downcast_ref::<Item>().ok_or(
                treeform_codec::SerializeError::UnsupportedType {
                    type_name: value.type_name(),
                },
            )?;
            Ok(Tree::String(item.name.clone()))
        }

        let mut registry = item_registry();
        registry.register_serializer(Category::of::<Item>(), serialize_item_as_name);

        let item = Item {
            name: "Apple".to_owned(),
            price: 0.2,
            qty: 20,
        };
        assert_eq!(to_string(&registry, &item).unwrap(), r#""Apple""#);
    }
}
