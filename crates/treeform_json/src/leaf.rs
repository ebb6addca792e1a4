//! Leaf conversion functions for JSON's primitive repertoire.
//!
//! Each function handles one concrete Rust type and is registered under its
//! [`Category::Concrete`] key. JSON distinguishes integers from floats, so
//! the float targets accept either tree kind while integer targets demand an
//! integer and enforce the target's range.

use alloc::boxed::Box;
use alloc::string::{String, ToString};

use treeform_codec::error::{DeserializeError, SerializeError};
use treeform_codec::info::{Category, TypeSpec};
use treeform_codec::registry::{CodecRegistry, DeserializeDriver, SerializeDriver};
use treeform_codec::{Reflect, Tree};

// -----------------------------------------------------------------------------
// Registration

pub(crate) fn register(registry: &mut CodecRegistry) {
    registry.register_serializer(Category::of::<bool>(), serialize_bool);
    registry.register_deserializer(Category::of::<bool>(), deserialize_bool);
    registry.register_serializer(Category::of::<char>(), serialize_char);
    registry.register_deserializer(Category::of::<char>(), deserialize_char);
    registry.register_serializer(Category::of::<String>(), serialize_string);
    registry.register_deserializer(Category::of::<String>(), deserialize_string);
    registry.register_serializer(Category::of::<()>(), serialize_unit);
    registry.register_deserializer(Category::of::<()>(), deserialize_unit);

    registry.register_serializer(Category::of::<i8>(), serialize_int::<i8>);
    registry.register_serializer(Category::of::<i16>(), serialize_int::<i16>);
    registry.register_serializer(Category::of::<i32>(), serialize_int::<i32>);
    registry.register_serializer(Category::of::<i64>(), serialize_int::<i64>);
    registry.register_serializer(Category::of::<isize>(), serialize_int::<isize>);
    registry.register_serializer(Category::of::<u8>(), serialize_int::<u8>);
    registry.register_serializer(Category::of::<u16>(), serialize_int::<u16>);
    registry.register_serializer(Category::of::<u32>(), serialize_int::<u32>);
    registry.register_serializer(Category::of::<u64>(), serialize_int::<u64>);
    registry.register_serializer(Category::of::<usize>(), serialize_int::<usize>);

    registry.register_deserializer(Category::of::<i8>(), deserialize_int::<i8>);
    registry.register_deserializer(Category::of::<i16>(), deserialize_int::<i16>);
    registry.register_deserializer(Category::of::<i32>(), deserialize_int::<i32>);
    registry.register_deserializer(Category::of::<i64>(), deserialize_int::<i64>);
    registry.register_deserializer(Category::of::<isize>(), deserialize_int::<isize>);
    registry.register_deserializer(Category::of::<u8>(), deserialize_int::<u8>);
    registry.register_deserializer(Category::of::<u16>(), deserialize_int::<u16>);
    registry.register_deserializer(Category::of::<u32>(), deserialize_int::<u32>);
    registry.register_deserializer(Category::of::<u64>(), deserialize_int::<u64>);
    registry.register_deserializer(Category::of::<usize>(), deserialize_int::<usize>);

    registry.register_serializer(Category::of::<f32>(), serialize_f32);
    registry.register_deserializer(Category::of::<f32>(), deserialize_f32);
    registry.register_serializer(Category::of::<f64>(), serialize_f64);
    registry.register_deserializer(Category::of::<f64>(), deserialize_f64);
}

// -----------------------------------------------------------------------------
// Helpers

fn expect<T: 'static>(value: &dyn Reflect) -> Result<&T, SerializeError> {
    value
        .downcast_ref::<T>()
        .ok_or(SerializeError::UnsupportedType {
            type_name: value.type_name(),
        })
}

fn unexpected(spec: &TypeSpec, expected: &'static str, found: &Tree) -> DeserializeError {
    DeserializeError::UnexpectedTree {
        target: spec.to_string(),
        expected,
        found: found.kind(),
    }
}

// -----------------------------------------------------------------------------
// Booleans, characters, strings, null

fn serialize_bool(_: &SerializeDriver<'_>, value: &dyn Reflect) -> Result<Tree, SerializeError> {
    Ok(Tree::Bool(*expect::<bool>(value)?))
}

fn deserialize_bool(
    _: &DeserializeDriver<'_>,
    spec: &TypeSpec,
    tree: &Tree,
) -> Result<Box<dyn Reflect>, DeserializeError> {
    match tree {
        Tree::Bool(value) => Ok(Box::new(*value)),
        other => Err(unexpected(spec, "a boolean", other)),
    }
}

fn serialize_char(_: &SerializeDriver<'_>, value: &dyn Reflect) -> Result<Tree, SerializeError> {
    Ok(Tree::String(String::from(*expect::<char>(value)?)))
}

fn deserialize_char(
    _: &DeserializeDriver<'_>,
    spec: &TypeSpec,
    tree: &Tree,
) -> Result<Box<dyn Reflect>, DeserializeError> {
    match tree {
        Tree::String(value) => {
            let mut chars = value.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Ok(Box::new(c)),
                _ => Err(unexpected(spec, "a single-character string", tree)),
            }
        }
        other => Err(unexpected(spec, "a single-character string", other)),
    }
}

fn serialize_string(_: &SerializeDriver<'_>, value: &dyn Reflect) -> Result<Tree, SerializeError> {
    Ok(Tree::String(expect::<String>(value)?.clone()))
}

fn deserialize_string(
    _: &DeserializeDriver<'_>,
    spec: &TypeSpec,
    tree: &Tree,
) -> Result<Box<dyn Reflect>, DeserializeError> {
    match tree {
        Tree::String(value) => Ok(Box::new(value.clone())),
        other => Err(unexpected(spec, "a string", other)),
    }
}

fn serialize_unit(_: &SerializeDriver<'_>, value: &dyn Reflect) -> Result<Tree, SerializeError> {
    expect::<()>(value)?;
    Ok(Tree::Null)
}

fn deserialize_unit(
    _: &DeserializeDriver<'_>,
    spec: &TypeSpec,
    tree: &Tree,
) -> Result<Box<dyn Reflect>, DeserializeError> {
    match tree {
        Tree::Null => Ok(Box::new(())),
        other => Err(unexpected(spec, "null", other)),
    }
}

// -----------------------------------------------------------------------------
// Integers

// One generic body covers every integer width; monomorphized instances are
// registered as plain function pointers.
fn serialize_int<T>(_: &SerializeDriver<'_>, value: &dyn Reflect) -> Result<Tree, SerializeError>
where
    T: Reflect + Copy + TryInto<i64>,
{
    let name = value.type_name();
    let value = *expect::<T>(value)?;
    match value.try_into() {
        Ok(value) => Ok(Tree::Integer(value)),
        Err(_) => Err(SerializeError::Unrepresentable {
            type_name: name,
            reason: "exceeds the signed 64-bit range",
        }),
    }
}

fn deserialize_int<T>(
    _: &DeserializeDriver<'_>,
    spec: &TypeSpec,
    tree: &Tree,
) -> Result<Box<dyn Reflect>, DeserializeError>
where
    T: Reflect + TryFrom<i64>,
{
    match tree {
        Tree::Integer(value) => match T::try_from(*value) {
            Ok(value) => Ok(Box::new(value)),
            Err(_) => Err(DeserializeError::OutOfRange {
                target: core::any::type_name::<T>(),
                found: *value,
            }),
        },
        other => Err(unexpected(spec, "an integer", other)),
    }
}

// -----------------------------------------------------------------------------
// Floats

fn serialize_f32(_: &SerializeDriver<'_>, value: &dyn Reflect) -> Result<Tree, SerializeError> {
    Ok(Tree::Float(f64::from(*expect::<f32>(value)?)))
}

fn serialize_f64(_: &SerializeDriver<'_>, value: &dyn Reflect) -> Result<Tree, SerializeError> {
    Ok(Tree::Float(*expect::<f64>(value)?))
}

// Float targets accept an integer tree: JSON renders `20.0` as `20`, so a
// round-tripped whole-valued float comes back as an integer.
fn deserialize_f32(
    _: &DeserializeDriver<'_>,
    spec: &TypeSpec,
    tree: &Tree,
) -> Result<Box<dyn Reflect>, DeserializeError> {
    match tree {
        Tree::Float(value) => Ok(Box::new(*value as f32)),
        Tree::Integer(value) => Ok(Box::new(*value as f32)),
        other => Err(unexpected(spec, "a number", other)),
    }
}

fn deserialize_f64(
    _: &DeserializeDriver<'_>,
    spec: &TypeSpec,
    tree: &Tree,
) -> Result<Box<dyn Reflect>, DeserializeError> {
    match tree {
        Tree::Float(value) => Ok(Box::new(*value)),
        Tree::Integer(value) => Ok(Box::new(*value as f64)),
        other => Err(unexpected(spec, "a number", other)),
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use treeform_codec::error::{DeserializeError, SerializeError};
    use treeform_codec::Tree;

    use crate::registry;

    #[test]
    fn integer_targets_enforce_their_range() {
        let registry = registry();
        assert_eq!(registry.deserialize_as::<u8>(&Tree::Integer(255)).unwrap(), 255);
        assert!(matches!(
            registry.deserialize_as::<u8>(&Tree::Integer(256)).unwrap_err(),
            DeserializeError::OutOfRange { found: 256, .. }
        ));
        assert!(matches!(
            registry.deserialize_as::<u64>(&Tree::Integer(-1)).unwrap_err(),
            DeserializeError::OutOfRange { found: -1, .. }
        ));
    }

    #[test]
    fn huge_unsigned_values_are_unrepresentable() {
        let registry = registry();
        assert!(matches!(
            registry.serialize(&u64::MAX).unwrap_err(),
            SerializeError::Unrepresentable { .. }
        ));
        assert_eq!(
            registry.serialize(&(i64::MAX as u64)).unwrap(),
            Tree::Integer(i64::MAX)
        );
    }

    #[test]
    fn float_targets_accept_integers() {
        let registry = registry();
        assert_eq!(registry.deserialize_as::<f64>(&Tree::Integer(20)).unwrap(), 20.0);
        assert_eq!(registry.deserialize_as::<f64>(&Tree::Float(0.5)).unwrap(), 0.5);
        assert!(matches!(
            registry.deserialize_as::<i64>(&Tree::Float(0.5)).unwrap_err(),
            DeserializeError::UnexpectedTree { .. }
        ));
    }

    #[test]
    fn chars_are_single_character_strings() {
        let registry = registry();
        assert_eq!(registry.serialize(&'x').unwrap(), Tree::from("x"));
        assert_eq!(registry.deserialize_as::<char>(&Tree::from("x")).unwrap(), 'x');
        assert!(registry.deserialize_as::<char>(&Tree::from("xy")).is_err());
    }
}
