use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

use crate::error::DeserializeError;
use crate::info::{MappingSpec, SequenceSpec, TypeSpec};
use crate::reflection::{MappingValue, Reflect, ReflectRef, SequenceValue, Typed};
use crate::registry::CodecRegistry;

// -----------------------------------------------------------------------------
// Vec<T>

impl<T: Reflect> Reflect for Vec<T> {
    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Sequence(self)
    }
}

impl<T: Reflect> SequenceValue for Vec<T> {
    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn elements(&self) -> Box<dyn Iterator<Item = &dyn Reflect> + '_> {
        Box::new(self.iter().map(|element| element as &dyn Reflect))
    }
}

impl<T: Typed> Typed for Vec<T> {
    fn type_spec() -> TypeSpec {
        TypeSpec::Sequence(SequenceSpec::new(T::type_spec(), collect_vec::<T>))
    }

    fn register_dependencies(registry: &mut CodecRegistry) {
        T::register_dependencies(registry);
    }
}

fn collect_vec<T: Reflect>(
    elements: Vec<Box<dyn Reflect>>,
) -> Result<Box<dyn Reflect>, DeserializeError> {
    let mut collected = Vec::with_capacity(elements.len());
    for element in elements {
        collected.push(element.take::<T>().map_err(mismatched::<T>)?);
    }
    Ok(Box::new(collected))
}

// -----------------------------------------------------------------------------
// BTreeMap<String, T>

impl<T: Reflect> Reflect for BTreeMap<String, T> {
    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Mapping(self)
    }
}

impl<T: Reflect> MappingValue for BTreeMap<String, T> {
    fn len(&self) -> usize {
        BTreeMap::len(self)
    }

    fn entries(&self) -> Box<dyn Iterator<Item = (&str, &dyn Reflect)> + '_> {
        Box::new(
            self.iter()
                .map(|(key, value)| (key.as_str(), value as &dyn Reflect)),
        )
    }
}

impl<T: Typed> Typed for BTreeMap<String, T> {
    fn type_spec() -> TypeSpec {
        TypeSpec::Mapping(MappingSpec::new(T::type_spec(), collect_btree_map::<T>))
    }

    fn register_dependencies(registry: &mut CodecRegistry) {
        T::register_dependencies(registry);
    }
}

fn collect_btree_map<T: Reflect>(
    entries: Vec<(String, Box<dyn Reflect>)>,
) -> Result<Box<dyn Reflect>, DeserializeError> {
    let mut collected = BTreeMap::new();
    for (key, value) in entries {
        collected.insert(key, value.take::<T>().map_err(mismatched::<T>)?);
    }
    Ok(Box::new(collected))
}

fn mismatched<T>(actual: Box<dyn Reflect>) -> DeserializeError {
    DeserializeError::MismatchedValue {
        expected: core::any::type_name::<T>(),
        found: actual.type_name(),
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use crate::info::TypeSpec;
    use crate::reflection::{Reflect, ReflectRef};

    #[test]
    fn vec_projects_as_a_sequence() {
        let values = vec![1_i64, 2, 3];
        let ReflectRef::Sequence(sequence) = values.reflect_ref() else {
            panic!("expected a sequence projection");
        };
        assert_eq!(sequence.len(), 3);
        assert!(matches!(TypeSpec::of::<Vec<i64>>(), TypeSpec::Sequence(_)));
    }

    #[test]
    fn nested_containers_nest_their_specs() {
        let TypeSpec::Sequence(outer) = TypeSpec::of::<Vec<Vec<bool>>>() else {
            panic!("expected a sequence spec");
        };
        assert!(matches!(outer.element(), TypeSpec::Sequence(_)));
    }
}
