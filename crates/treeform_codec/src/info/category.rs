use core::any::{Any, TypeId};
use core::fmt;

use crate::reflection::{Reflect, ReflectRef};

// -----------------------------------------------------------------------------
// ConcreteType

/// A concrete runtime type: its [`TypeId`] paired with a display name.
///
/// Equality and dispatch use only the id; the name exists for diagnostics.
#[derive(Clone, Copy, Debug)]
pub struct ConcreteType {
    id: TypeId,
    name: &'static str,
}

impl ConcreteType {
    /// Describes `T` using [`core::any::type_name`] as the display name.
    pub fn of<T: Any>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: core::any::type_name::<T>(),
        }
    }

    /// Describes `T` with an explicit short display name.
    pub fn with_name<T: Any>(name: &'static str) -> Self {
        Self {
            id: TypeId::of::<T>(),
            name,
        }
    }

    #[inline]
    pub const fn id(&self) -> TypeId {
        self.id
    }

    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for ConcreteType {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ConcreteType {}

impl fmt::Display for ConcreteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

// -----------------------------------------------------------------------------
// Category

/// The dispatch key a conversion function is registered under.
///
/// Categories form a closed set: one extensible exact-type arm plus the
/// polymorphic shape arms. Dispatch is an explicit ranked match over this
/// enum, so the specificity rule below is enforced by code rather than by
/// incidental library behavior.
///
/// # Specificity
///
/// When several registered entries match the same value, the entry with the
/// lowest [`rank`](Category::rank) wins, most to least specific:
///
/// 1. [`Concrete`](Category::Concrete) — the exact runtime type;
/// 2. [`Sequence`](Category::Sequence) / [`Mapping`](Category::Mapping) —
///    parameterized shapes;
/// 3. [`Alternative`](Category::Alternative) — union-shaped values;
/// 4. [`Record`](Category::Record) — any record type;
/// 5. [`Any`](Category::Any) — the universal fallback.
///
/// Ties within one rank break by registration order: the first registered
/// entry wins. Both rules are part of the public contract because they are
/// observable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Category {
    /// Exactly one runtime type. Rust declares no subtyping, so the match is
    /// an id comparison.
    Concrete(ConcreteType),
    /// Any sequence-shaped value or target.
    Sequence,
    /// Any string-keyed mapping-shaped value or target.
    Mapping,
    /// Any alternative-shaped value. On the deserialization side this
    /// category is never consulted: alternative *targets* are handled
    /// structurally by the union resolver, because matching alone cannot
    /// select which branch to reconstruct from an untyped tree.
    Alternative,
    /// Any record type, i.e. any value exposing a field descriptor.
    Record,
    /// Matches everything. Lowest precedence.
    Any,
}

impl Category {
    /// Shorthand for a [`Concrete`](Category::Concrete) category of `T`.
    pub fn of<T: Any>() -> Self {
        Category::Concrete(ConcreteType::of::<T>())
    }

    /// The specificity rank; lower is more specific. See the type-level
    /// documentation for the full ordering.
    pub const fn rank(&self) -> u8 {
        match self {
            Category::Concrete(_) => 0,
            Category::Sequence | Category::Mapping => 1,
            Category::Alternative => 2,
            Category::Record => 3,
            Category::Any => 4,
        }
    }

    /// Whether a runtime value belongs to this category.
    ///
    /// This is the serialization-side half of the type relation; the
    /// deserialization side is keyed on the requested target instead and
    /// lives in the registry.
    pub fn matches(&self, value: &dyn Reflect) -> bool {
        match self {
            Category::Concrete(ty) => value.ty_id() == ty.id(),
            Category::Sequence => matches!(value.reflect_ref(), ReflectRef::Sequence(_)),
            Category::Mapping => matches!(value.reflect_ref(), ReflectRef::Mapping(_)),
            Category::Alternative => matches!(value.reflect_ref(), ReflectRef::Alternative(_)),
            Category::Record => matches!(value.reflect_ref(), ReflectRef::Record(_)),
            Category::Any => true,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Concrete(ty) => write!(f, "concrete `{ty}`"),
            Category::Sequence => f.write_str("any sequence"),
            Category::Mapping => f.write_str("any mapping"),
            Category::Alternative => f.write_str("any alternative"),
            Category::Record => f.write_str("any record"),
            Category::Any => f.write_str("any value"),
        }
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::{Category, ConcreteType};
    use crate::reflection::Reflect;

    #[test]
    fn specificity_order_is_total() {
        let concrete = Category::of::<i64>();
        assert!(concrete.rank() < Category::Sequence.rank());
        assert!(Category::Sequence.rank() < Category::Alternative.rank());
        assert!(Category::Alternative.rank() < Category::Record.rank());
        assert!(Category::Record.rank() < Category::Any.rank());
    }

    #[test]
    fn concrete_matches_exact_type_only() {
        let category = Category::of::<i64>();
        assert!(category.matches(&42_i64 as &dyn Reflect));
        assert!(!category.matches(&42_i32 as &dyn Reflect));
    }

    #[test]
    fn concrete_type_equality_ignores_names() {
        assert_eq!(ConcreteType::of::<bool>(), ConcreteType::with_name::<bool>("flag"));
        assert_ne!(ConcreteType::of::<bool>(), ConcreteType::of::<i64>());
    }
}
