use alloc::boxed::Box;
use alloc::string::ToString;
use core::any::TypeId;

use hashbrown::HashMap;

use crate::error::{DeserializeError, SerializeError};
use crate::info::{Category, RecordInfo, TypeSpec};
use crate::reflection::{Record, Reflect, Typed};
use crate::registry::{DeserializeDriver, SerializeDriver};
use crate::tree::Tree;

// -----------------------------------------------------------------------------
// Entry function types

/// A registered serialization function.
///
/// Called with the dispatching driver and the value its category matched;
/// recurses into child values through [`SerializeDriver::serialize`].
pub type SerializeFn = fn(&SerializeDriver<'_>, &dyn Reflect) -> Result<Tree, SerializeError>;

/// A registered deserialization function.
///
/// Called with the dispatching driver, the admitted target spec, and the
/// input tree; recurses through [`DeserializeDriver::deserialize`].
pub type DeserializeFn =
    fn(&DeserializeDriver<'_>, &TypeSpec, &Tree) -> Result<Box<dyn Reflect>, DeserializeError>;

// -----------------------------------------------------------------------------
// CodecRegistry

/// The central store of conversion functions and record descriptors.
///
/// Serialization and deserialization entries live in separate tables because
/// the two sides key differently: serialization matches the *runtime* value,
/// deserialization matches the *declared* target. Both tables resolve by
/// specificity, lowest [`Category::rank`] first, first-registered winning
/// ties.
///
/// Registries carry no default entries; a format adapter builds one with the
/// leaf functions of its wire format (see `treeform_json::registry`).
///
/// # Example
///
/// ```
/// use treeform_codec::{reflect_record, CodecRegistry};
///
/// struct Point {
///     x: i64,
///     y: i64,
/// }
///
/// reflect_record!(Point {
///     x: i64,
///     y: i64,
/// });
///
/// let mut registry = CodecRegistry::empty();
/// registry.register::<Point>();
/// assert!(registry.record_info(core::any::TypeId::of::<Point>()).is_some());
/// ```
#[derive(Default)]
pub struct CodecRegistry {
    serializers: alloc::vec::Vec<(Category, SerializeFn)>,
    deserializers: alloc::vec::Vec<(Category, DeserializeFn)>,
    records: HashMap<TypeId, fn() -> RecordInfo>,
    max_depth: Option<usize>,
}

impl CodecRegistry {
    /// Creates a registry with no entries and no depth limit.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Installs a nesting depth limit.
    ///
    /// Without a limit, a cyclic runtime value (possible with shared
    /// interior-mutable structures) would recurse until the stack overflows;
    /// with one, conversion fails with a `DepthLimitExceeded` error instead.
    pub fn with_max_depth(mut self, limit: usize) -> Self {
        self.max_depth = Some(limit);
        self
    }

    #[inline]
    pub(crate) const fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    // -------------------------------------------------------------------------
    // Registration

    /// Registers a serialization function under `category`.
    ///
    /// Entries registered earlier win ties against later entries of the same
    /// rank, so register overrides before the functions they shadow.
    pub fn register_serializer(&mut self, category: Category, func: SerializeFn) {
        self.serializers.push((category, func));
    }

    /// Registers a deserialization function under `category`.
    ///
    /// Registering under [`Category::Alternative`] is legal but inert:
    /// alternative targets are resolved structurally by the union resolver
    /// and never dispatched through the table.
    pub fn register_deserializer(&mut self, category: Category, func: DeserializeFn) {
        self.deserializers.push((category, func));
    }

    /// Registers everything `T` needs for deserialization, cascading through
    /// its component types.
    pub fn register<T: Typed>(&mut self) {
        T::register_dependencies(self);
    }

    /// Inserts `T`'s record descriptor, without cascading.
    ///
    /// Returns `false` if `T` was already present. Generated
    /// `register_dependencies` implementations insert the record *before*
    /// recursing into field types and stop when this returns `false`, so
    /// self-referential records terminate.
    pub fn register_record<T: Record>(&mut self) -> bool {
        match self.records.entry(TypeId::of::<T>()) {
            hashbrown::hash_map::Entry::Occupied(_) => false,
            hashbrown::hash_map::Entry::Vacant(entry) => {
                entry.insert(<T as Record>::record_info as fn() -> RecordInfo);
                true
            }
        }
    }

    /// Synthesizes the descriptor registered for `ty`, if any.
    pub fn record_info(&self, ty: TypeId) -> Option<RecordInfo> {
        self.records.get(&ty).map(|info| info())
    }

    // -------------------------------------------------------------------------
    // Dispatch

    /// Converts a runtime value into a [`Tree`].
    ///
    /// Dispatches on the value's runtime category; fails with
    /// `UnsupportedType` when no registered entry matches.
    pub fn serialize(&self, value: &dyn Reflect) -> Result<Tree, SerializeError> {
        SerializeDriver::root(self).serialize(value)
    }

    /// Rebuilds a value of the declared target type from a [`Tree`].
    pub fn deserialize(
        &self,
        spec: &TypeSpec,
        tree: &Tree,
    ) -> Result<Box<dyn Reflect>, DeserializeError> {
        DeserializeDriver::root(self).deserialize(spec, tree)
    }

    /// [`deserialize`](Self::deserialize) followed by a downcast to `T`.
    pub fn deserialize_as<T: Typed>(&self, tree: &Tree) -> Result<T, DeserializeError> {
        let value = self.deserialize(&T::type_spec(), tree)?;
        value
            .take::<T>()
            .map_err(|actual| DeserializeError::MismatchedValue {
                expected: core::any::type_name::<T>(),
                found: actual.type_name(),
            })
    }

    /// Finds the most specific serialization entry matching `value`.
    pub(crate) fn serializer_for(&self, value: &dyn Reflect) -> Option<(Category, SerializeFn)> {
        let mut best: Option<(Category, SerializeFn)> = None;
        for (category, func) in &self.serializers {
            if category.matches(value)
                && best.is_none_or(|(winner, _)| category.rank() < winner.rank())
            {
                best = Some((*category, *func));
            }
        }
        best
    }

    /// Finds the most specific deserialization entry admitting `spec`.
    pub(crate) fn deserializer_for(&self, spec: &TypeSpec) -> Option<(Category, DeserializeFn)> {
        let mut best: Option<(Category, DeserializeFn)> = None;
        for (category, func) in &self.deserializers {
            if self.admits(category, spec)
                && best.is_none_or(|(winner, _)| category.rank() < winner.rank())
            {
                best = Some((*category, *func));
            }
        }
        best
    }

    /// Whether an entry registered under `category` can produce the declared
    /// target `spec`. The deserialization-side half of the type relation.
    fn admits(&self, category: &Category, spec: &TypeSpec) -> bool {
        match (category, spec) {
            (Category::Concrete(entry), TypeSpec::Concrete(target)) => entry == target,
            (Category::Sequence, TypeSpec::Sequence(_)) => true,
            (Category::Mapping, TypeSpec::Mapping(_)) => true,
            // A record entry covers every concrete target with a registered
            // descriptor, unless a dedicated concrete entry shadows it.
            (Category::Record, TypeSpec::Concrete(target)) => {
                self.records.contains_key(&target.id())
            }
            // Alternative targets never reach the table; see `register_deserializer`.
            (Category::Alternative, _) => false,
            (Category::Any, _) => true,
            _ => false,
        }
    }
}

impl CodecRegistry {
    pub(crate) fn unregistered_target(spec: &TypeSpec) -> DeserializeError {
        DeserializeError::UnregisteredTarget {
            target: spec.to_string(),
        }
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;

    use super::CodecRegistry;
    use crate::error::{DeserializeError, SerializeError};
    use crate::info::{Category, TypeSpec};
    use crate::reflection::Reflect;
    use crate::registry::{DeserializeDriver, SerializeDriver};
    use crate::tree::Tree;

    fn serialize_i64(
        _: &SerializeDriver<'_>,
        value: &dyn Reflect,
    ) -> Result<Tree, SerializeError> {
        match value.downcast_ref::<i64>() {
            Some(value) => Ok(Tree::Integer(*value)),
            None => Err(SerializeError::UnsupportedType {
                type_name: value.type_name(),
            }),
        }
    }

    fn serialize_any_as_null(
        _: &SerializeDriver<'_>,
        _: &dyn Reflect,
    ) -> Result<Tree, SerializeError> {
        Ok(Tree::Null)
    }

    fn deserialize_i64(
        _: &DeserializeDriver<'_>,
        spec: &TypeSpec,
        tree: &Tree,
    ) -> Result<Box<dyn Reflect>, DeserializeError> {
        match tree {
            Tree::Integer(value) => Ok(Box::new(*value)),
            other => Err(DeserializeError::UnexpectedTree {
                target: alloc::string::ToString::to_string(spec),
                expected: "an integer",
                found: other.kind(),
            }),
        }
    }

    #[test]
    fn concrete_entry_beats_any_fallback() {
        let mut registry = CodecRegistry::empty();
        registry.register_serializer(Category::Any, serialize_any_as_null);
        registry.register_serializer(Category::of::<i64>(), serialize_i64);

        assert_eq!(registry.serialize(&5_i64).unwrap(), Tree::Integer(5));
        assert_eq!(registry.serialize(&true).unwrap(), Tree::Null);
    }

    #[test]
    fn unmatched_value_is_unsupported() {
        let mut registry = CodecRegistry::empty();
        registry.register_serializer(Category::of::<i64>(), serialize_i64);

        assert!(matches!(
            registry.serialize(&true).unwrap_err(),
            SerializeError::UnsupportedType { .. }
        ));
    }

    #[test]
    fn deserialize_as_round_trips_a_leaf() {
        let mut registry = CodecRegistry::empty();
        registry.register_deserializer(Category::of::<i64>(), deserialize_i64);

        let value: i64 = registry.deserialize_as(&Tree::Integer(42)).unwrap();
        assert_eq!(value, 42);
    }

    #[test]
    fn unmatched_target_is_unregistered() {
        let registry = CodecRegistry::empty();
        assert!(matches!(
            registry.deserialize_as::<i64>(&Tree::Integer(42)).unwrap_err(),
            DeserializeError::UnregisteredTarget { .. }
        ));
    }
}
