use alloc::boxed::Box;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::error::{DeserializeError, SerializeError};
use crate::info::TypeSpec;
use crate::reflection::{Reflect, ReflectRef};
use crate::registry::{DeserializeDriver, SerializeDriver};
use crate::tree::{Tree, TreeMapping};

/// Serializes any string-keyed mapping-shaped value, entry by entry, in the
/// collection's own iteration order. Register under
/// [`Category::Mapping`](crate::info::Category::Mapping).
pub fn serialize_mapping(
    driver: &SerializeDriver<'_>,
    value: &dyn Reflect,
) -> Result<Tree, SerializeError> {
    let ReflectRef::Mapping(entries) = value.reflect_ref() else {
        return Err(SerializeError::UnsupportedType {
            type_name: value.type_name(),
        });
    };
    let mut mapping = TreeMapping::with_capacity(entries.len());
    for (key, entry) in entries.entries() {
        mapping.insert(key, driver.serialize(entry)?);
    }
    Ok(Tree::Mapping(mapping))
}

/// Rebuilds a declared mapping target from a mapping tree: every value is
/// deserialized against the declared value spec, then the collection is
/// rebuilt through the spec's collector. Register under
/// [`Category::Mapping`](crate::info::Category::Mapping).
pub fn deserialize_mapping(
    driver: &DeserializeDriver<'_>,
    spec: &TypeSpec,
    tree: &Tree,
) -> Result<Box<dyn Reflect>, DeserializeError> {
    let TypeSpec::Mapping(mapping) = spec else {
        return Err(DeserializeError::UnregisteredTarget {
            target: spec.to_string(),
        });
    };
    let Tree::Mapping(entries) = tree else {
        return Err(DeserializeError::UnexpectedTree {
            target: spec.to_string(),
            expected: "a mapping",
            found: tree.kind(),
        });
    };
    let mut values: Vec<(String, Box<dyn Reflect>)> = Vec::with_capacity(entries.len());
    for (key, entry) in entries.iter() {
        values.push((String::from(key), driver.deserialize(mapping.value(), entry)?));
    }
    mapping.collect(values)
}
