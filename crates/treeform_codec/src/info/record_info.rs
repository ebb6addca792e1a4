use alloc::boxed::Box;
use alloc::vec::Vec;
use core::any::Any;

use crate::error::DeserializeError;
use crate::info::{ConcreteType, ConstructFn, DefaultFn, TypeSpec};
use crate::reflection::Reflect;

// -----------------------------------------------------------------------------
// RecordInfo

/// The descriptor of a record type: its ordered fields plus a constructor.
///
/// This is the whole contract the record codec needs. Serialization walks
/// [`fields`](RecordInfo::fields) in declared order and reads each value off
/// the instance; deserialization gathers one value per field (input, declared
/// default, or error) and hands them to
/// [`construct`](RecordInfo::construct) in the same order.
///
/// Descriptors are produced by [`Record::record_info`](crate::Record) and are
/// synthesized fresh on each call.
#[derive(Clone, Debug)]
pub struct RecordInfo {
    ty: ConcreteType,
    fields: Vec<FieldInfo>,
    construct: ConstructFn,
}

impl RecordInfo {
    pub fn new(ty: ConcreteType, fields: Vec<FieldInfo>, construct: ConstructFn) -> Self {
        Self {
            ty,
            fields,
            construct,
        }
    }

    /// The described record type.
    #[inline]
    pub const fn ty(&self) -> ConcreteType {
        self.ty
    }

    /// The record's display name.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.ty.name()
    }

    /// The fields, in declaration order.
    #[inline]
    pub fn fields(&self) -> &[FieldInfo] {
        &self.fields
    }

    /// Looks a field up by name.
    pub fn field(&self, name: &str) -> Option<&FieldInfo> {
        self.fields.iter().find(|field| field.name() == name)
    }

    /// Builds an instance from one value per field, in declaration order.
    #[inline]
    pub fn construct(
        &self,
        values: Vec<Box<dyn Reflect>>,
    ) -> Result<Box<dyn Reflect>, DeserializeError> {
        (self.construct)(values)
    }
}

// -----------------------------------------------------------------------------
// FieldInfo

/// One named field of a record: its declared type and optional default.
#[derive(Clone, Debug)]
pub struct FieldInfo {
    name: &'static str,
    spec: TypeSpec,
    default: Option<DefaultFn>,
}

impl FieldInfo {
    /// A required field.
    pub fn new(name: &'static str, spec: TypeSpec) -> Self {
        Self {
            name,
            spec,
            default: None,
        }
    }

    /// An optional field: when the input mapping has no entry under `name`,
    /// the record codec substitutes `default()` instead of failing.
    pub fn with_default(name: &'static str, spec: TypeSpec, default: DefaultFn) -> Self {
        Self {
            name,
            spec,
            default: Some(default),
        }
    }

    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// The field's declared target type.
    #[inline]
    pub const fn spec(&self) -> &TypeSpec {
        &self.spec
    }

    /// The declared default, if any.
    #[inline]
    pub const fn default(&self) -> Option<DefaultFn> {
        self.default
    }
}

// -----------------------------------------------------------------------------
// next_field

/// Pops and downcasts the next constructor argument.
///
/// Generated record constructors consume their argument list through this
/// helper; a type mismatch means a conversion function produced a value the
/// field did not declare, reported against the record and field by name.
pub fn next_field<T: Any>(
    values: &mut dyn Iterator<Item = Box<dyn Reflect>>,
    record: &'static str,
    field: &'static str,
) -> Result<T, DeserializeError> {
    let value = values.next().ok_or(DeserializeError::MissingField {
        record,
        field,
    })?;
    value.take::<T>().map_err(|actual| DeserializeError::Field {
        record,
        field,
        cause: Box::new(DeserializeError::MismatchedValue {
            expected: core::any::type_name::<T>(),
            found: actual.type_name(),
        }),
    })
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::vec;
    use alloc::vec::Vec;

    use super::next_field;
    use crate::error::DeserializeError;
    use crate::reflection::Reflect;

    #[test]
    fn next_field_downcasts_in_order() {
        let values: Vec<Box<dyn Reflect>> = vec![Box::new(3_i64), Box::new(true)];
        let mut values = values.into_iter();
        assert_eq!(next_field::<i64>(&mut values, "pair", "left").unwrap(), 3);
        assert!(next_field::<bool>(&mut values, "pair", "right").unwrap());
    }

    #[test]
    fn next_field_reports_mismatches_against_the_field() {
        let values: Vec<Box<dyn Reflect>> = vec![Box::new(3_i64)];
        let mut values = values.into_iter();
        let error = next_field::<bool>(&mut values, "pair", "left").unwrap_err();
        assert!(matches!(
            error,
            DeserializeError::Field {
                record: "pair",
                field: "left",
                ..
            }
        ));
    }
}
