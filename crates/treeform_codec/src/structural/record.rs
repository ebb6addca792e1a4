use alloc::boxed::Box;
use alloc::string::ToString;
use alloc::vec::Vec;

use crate::error::{DeserializeError, SerializeError};
use crate::info::TypeSpec;
use crate::reflection::{Reflect, ReflectRef};
use crate::registry::{DeserializeDriver, SerializeDriver};
use crate::tree::{Tree, TreeMapping};

// -----------------------------------------------------------------------------
// Serialization

/// Serializes any record-shaped value into a mapping tree.
///
/// Fields are emitted in declaration order, one mapping entry per field, so
/// output is deterministic for a given record type. Register under
/// [`Category::Record`](crate::info::Category::Record).
pub fn serialize_record(
    driver: &SerializeDriver<'_>,
    value: &dyn Reflect,
) -> Result<Tree, SerializeError> {
    let ReflectRef::Record(record) = value.reflect_ref() else {
        return Err(SerializeError::UnsupportedType {
            type_name: value.type_name(),
        });
    };
    let info = record.record_info();
    let mut mapping = TreeMapping::with_capacity(info.fields().len());
    for field in info.fields() {
        let field_value =
            record
                .field(field.name())
                .ok_or(SerializeError::MissingFieldValue {
                    record: info.name(),
                    field: field.name(),
                })?;
        mapping.insert(field.name(), driver.serialize(field_value)?);
    }
    Ok(Tree::Mapping(mapping))
}

// -----------------------------------------------------------------------------
// Deserialization

/// Rebuilds a registered record from a mapping tree.
///
/// For each declared field, in order: the input entry under the field's name
/// is deserialized against the field's spec; an absent entry falls back to
/// the field's default, or fails with `MissingField` if it has none. Input
/// keys matching no declared field are ignored, so inputs written by newer
/// schema revisions still load. Register under
/// [`Category::Record`](crate::info::Category::Record).
pub fn deserialize_record(
    driver: &DeserializeDriver<'_>,
    spec: &TypeSpec,
    tree: &Tree,
) -> Result<Box<dyn Reflect>, DeserializeError> {
    let TypeSpec::Concrete(target) = spec else {
        return Err(DeserializeError::UnregisteredTarget {
            target: spec.to_string(),
        });
    };
    let info = driver
        .registry()
        .record_info(target.id())
        .ok_or_else(|| DeserializeError::UnregisteredTarget {
            target: spec.to_string(),
        })?;
    let Tree::Mapping(mapping) = tree else {
        return Err(DeserializeError::UnexpectedTree {
            target: spec.to_string(),
            expected: "a mapping",
            found: tree.kind(),
        });
    };

    let mut values: Vec<Box<dyn Reflect>> = Vec::with_capacity(info.fields().len());
    for field in info.fields() {
        match mapping.get(field.name()) {
            Some(entry) => {
                let value =
                    driver
                        .deserialize(field.spec(), entry)
                        .map_err(|cause| DeserializeError::Field {
                            record: info.name(),
                            field: field.name(),
                            cause: Box::new(cause),
                        })?;
                values.push(value);
            }
            None => match field.default() {
                Some(default) => values.push(default()),
                None => {
                    return Err(DeserializeError::MissingField {
                        record: info.name(),
                        field: field.name(),
                    });
                }
            },
        }
    }
    info.construct(values)
}
