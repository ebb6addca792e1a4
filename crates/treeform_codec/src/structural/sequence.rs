use alloc::boxed::Box;
use alloc::string::ToString;
use alloc::vec::Vec;

use crate::error::{DeserializeError, SerializeError};
use crate::info::TypeSpec;
use crate::reflection::{Reflect, ReflectRef};
use crate::registry::{DeserializeDriver, SerializeDriver};
use crate::tree::Tree;

/// Serializes any sequence-shaped value, element by element, in order.
/// Register under [`Category::Sequence`](crate::info::Category::Sequence).
pub fn serialize_sequence(
    driver: &SerializeDriver<'_>,
    value: &dyn Reflect,
) -> Result<Tree, SerializeError> {
    let ReflectRef::Sequence(sequence) = value.reflect_ref() else {
        return Err(SerializeError::UnsupportedType {
            type_name: value.type_name(),
        });
    };
    let mut elements = Vec::with_capacity(sequence.len());
    for element in sequence.elements() {
        elements.push(driver.serialize(element)?);
    }
    Ok(Tree::Sequence(elements))
}

/// Rebuilds a declared sequence target from a sequence tree: every element
/// is deserialized against the declared element spec, then the collection is
/// rebuilt through the spec's collector. Register under
/// [`Category::Sequence`](crate::info::Category::Sequence).
pub fn deserialize_sequence(
    driver: &DeserializeDriver<'_>,
    spec: &TypeSpec,
    tree: &Tree,
) -> Result<Box<dyn Reflect>, DeserializeError> {
    let TypeSpec::Sequence(sequence) = spec else {
        return Err(DeserializeError::UnregisteredTarget {
            target: spec.to_string(),
        });
    };
    let Tree::Sequence(elements) = tree else {
        return Err(DeserializeError::UnexpectedTree {
            target: spec.to_string(),
            expected: "a sequence",
            found: tree.kind(),
        });
    };
    let mut values: Vec<Box<dyn Reflect>> = Vec::with_capacity(elements.len());
    for element in elements {
        values.push(driver.deserialize(sequence.element(), element)?);
    }
    sequence.collect(values)
}
