use alloc::boxed::Box;
use core::any::{Any, TypeId};

use crate::info::RecordInfo;

// -----------------------------------------------------------------------------
// Reflect

/// The foundational trait for values the codec can see.
///
/// A `Reflect` value carries just enough runtime structure for the dispatch
/// engine: its concrete [`TypeId`] (for exact-type matching) and a borrowed
/// [shape projection](Reflect::reflect_ref) (for category matching and for the
/// structural codecs to walk records, sequences, mappings, and alternatives).
///
/// Leaf types only implement [`reflect_ref`](Reflect::reflect_ref); everything
/// else has a sensible default. Use [`reflect_record!`](crate::reflect_record)
/// and [`reflect_union!`](crate::reflect_union) for composite types rather
/// than implementing by hand.
///
/// # Examples
///
/// ```
/// use treeform_codec::Reflect;
///
/// let value: &dyn Reflect = &42_i64;
/// assert!(value.is::<i64>());
/// assert_eq!(value.downcast_ref::<i64>(), Some(&42));
/// ```
pub trait Reflect: Any {
    /// A short name for the type, used in error messages.
    ///
    /// Defaults to [`core::any::type_name`]; composite implementations
    /// override it with the bare identifier.
    fn type_name(&self) -> &'static str {
        core::any::type_name::<Self>()
    }

    /// Returns the [`TypeId`] of the underlying concrete type.
    ///
    /// Calling `Any::type_id` on a `Box<dyn Reflect>` yields the id of the
    /// container, not the value; this method always resolves through the
    /// vtable to the concrete type. Do not override it.
    #[inline]
    fn ty_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    /// Projects the value's shape for category matching and structural
    /// traversal.
    fn reflect_ref(&self) -> ReflectRef<'_>;
}

impl dyn Reflect {
    /// Returns `true` if the underlying value is of type `T`.
    #[inline]
    pub fn is<T: Any>(&self) -> bool {
        self.ty_id() == TypeId::of::<T>()
    }

    /// Downcasts the value to type `T` by reference.
    ///
    /// Returns `None` if the underlying value is not a `T`.
    #[inline]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        <dyn Any>::downcast_ref(self)
    }

    /// Downcasts the value to type `T`, unboxing and consuming the trait
    /// object.
    ///
    /// Returns `Err(self)` if the underlying value is not a `T`, so the
    /// caller can still report its actual type.
    pub fn take<T: Any>(self: Box<dyn Reflect>) -> Result<T, Box<dyn Reflect>> {
        if !self.is::<T>() {
            return Err(self);
        }
        let this: Box<dyn Any> = self;
        match this.downcast::<T>() {
            Ok(value) => Ok(*value),
            // `is` has already verified the type id.
            Err(_) => unreachable!("type id was checked before downcasting"),
        }
    }
}

impl core::fmt::Debug for dyn Reflect {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "<{} as dyn Reflect>", self.type_name())
    }
}

// -----------------------------------------------------------------------------
// ReflectRef

/// A borrowed, shape-classified view of a [`Reflect`] value.
///
/// This is what [`Category::matches`](crate::info::Category::matches) inspects
/// on the serialization side, and what the [`structural`](crate::structural)
/// codecs traverse.
pub enum ReflectRef<'a> {
    /// A leaf with no traversable structure (numbers, strings, booleans, ...).
    Opaque,
    /// A record: named, ordered, typed fields.
    Record(&'a dyn RecordValue),
    /// A homogeneous sequence.
    Sequence(&'a dyn SequenceValue),
    /// A string-keyed mapping.
    Mapping(&'a dyn MappingValue),
    /// An alternative ("one of") value, exposing its active branch.
    Alternative(AlternativeRef<'a>),
}

impl ReflectRef<'_> {
    /// A short description of the shape, used for trace logging.
    pub const fn kind(&self) -> &'static str {
        match self {
            ReflectRef::Opaque => "opaque",
            ReflectRef::Record(_) => "record",
            ReflectRef::Sequence(_) => "sequence",
            ReflectRef::Mapping(_) => "mapping",
            ReflectRef::Alternative(_) => "alternative",
        }
    }
}

/// The active branch of an alternative-shaped value.
pub enum AlternativeRef<'a> {
    /// The "absence" branch (e.g. `Option::None`); serializes to
    /// [`Tree::Null`](crate::Tree::Null).
    Absent,
    /// A value-carrying branch; serializes as the inner value, untagged.
    Value(&'a dyn Reflect),
}

// -----------------------------------------------------------------------------
// Shape access traits

/// Instance-side record introspection: the `get` half of the introspector
/// contract. The static half lives on [`Record`](crate::Record).
pub trait RecordValue: Reflect {
    /// The descriptor of this record's type.
    ///
    /// Synthesized fresh on every call; memoization is an implementation
    /// choice of the record type, not a requirement of the core.
    fn record_info(&self) -> RecordInfo;

    /// Returns the named field's value, or `None` if the descriptor and the
    /// instance disagree.
    fn field(&self, name: &str) -> Option<&dyn Reflect>;
}

/// Element access for sequence-shaped values.
pub trait SequenceValue: Reflect {
    fn len(&self) -> usize;

    /// Iterates elements in order.
    fn elements(&self) -> Box<dyn Iterator<Item = &dyn Reflect> + '_>;
}

/// Entry access for string-keyed mapping-shaped values.
pub trait MappingValue: Reflect {
    fn len(&self) -> usize;

    /// Iterates entries in the collection's own order.
    fn entries(&self) -> Box<dyn Iterator<Item = (&str, &dyn Reflect)> + '_>;
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;

    use super::Reflect;

    #[test]
    fn take_preserves_the_value_on_mismatch() {
        let boxed: Box<dyn Reflect> = Box::new(7_i64);
        let boxed = boxed.take::<bool>().unwrap_err();
        assert_eq!(boxed.take::<i64>().unwrap(), 7);
    }
}
