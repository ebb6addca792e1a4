use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::error::DeserializeError;
use crate::info::{Category, ConcreteType};
use crate::reflection::{Reflect, Typed};

// -----------------------------------------------------------------------------
// Function pointer aliases

/// Builds a concrete value from constructor arguments in declared order.
pub type ConstructFn = fn(Vec<Box<dyn Reflect>>) -> Result<Box<dyn Reflect>, DeserializeError>;

/// Rebuilds a concrete sequence from its deserialized elements.
pub type CollectSequenceFn = ConstructFn;

/// Rebuilds a concrete mapping from its deserialized entries.
pub type CollectMappingFn =
    fn(Vec<(String, Box<dyn Reflect>)>) -> Result<Box<dyn Reflect>, DeserializeError>;

/// Wraps a resolved union branch (identified by its declared index) into the
/// union's concrete representation, e.g. `Some(..)` or an enum variant.
pub type InjectFn = fn(usize, Box<dyn Reflect>) -> Result<Box<dyn Reflect>, DeserializeError>;

/// Produces a field's declared default value.
pub type DefaultFn = fn() -> Box<dyn Reflect>;

// -----------------------------------------------------------------------------
// TypeSpec

/// The declared target descriptor supplied to `deserialize`.
///
/// A `TypeSpec` is what a record field, union branch, or sequence element
/// *declares*. It projects onto a dispatch [`Category`], and for the
/// parameterized shapes additionally carries the type arguments and the
/// construction function pointers needed to rebuild concrete Rust values —
/// the input tree is untyped, so everything about the result type must come
/// from here.
///
/// Specs are immutable values synthesized on demand by
/// [`Typed::type_spec`]; nothing in the core caches them.
#[derive(Clone, Debug)]
pub enum TypeSpec {
    /// An exact type: a primitive leaf or a registered record.
    Concrete(ConcreteType),
    /// A sequence of a declared element type.
    Sequence(SequenceSpec),
    /// A string-keyed mapping of a declared value type.
    Mapping(MappingSpec),
    /// One of a fixed set of declared branches, resolved by backtracking.
    Alternative(AlternativeSpec),
}

impl TypeSpec {
    /// The declared descriptor of `T`; shorthand for [`Typed::type_spec`].
    pub fn of<T: Typed>() -> Self {
        T::type_spec()
    }

    /// The "absence" target: deserializes only from `Tree::Null`, producing
    /// the unit value. Used as the first branch of optional targets.
    pub fn absent() -> Self {
        TypeSpec::Concrete(ConcreteType::with_name::<()>("null"))
    }

    /// Projects onto the dispatch key this spec is resolved under.
    pub const fn category(&self) -> Category {
        match self {
            TypeSpec::Concrete(ty) => Category::Concrete(*ty),
            TypeSpec::Sequence(_) => Category::Sequence,
            TypeSpec::Mapping(_) => Category::Mapping,
            TypeSpec::Alternative(_) => Category::Alternative,
        }
    }
}

impl fmt::Display for TypeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeSpec::Concrete(ty) => write!(f, "{ty}"),
            TypeSpec::Sequence(spec) => write!(f, "sequence of {}", spec.element()),
            TypeSpec::Mapping(spec) => write!(f, "mapping of {}", spec.value()),
            TypeSpec::Alternative(spec) => write!(f, "{spec}"),
        }
    }
}

// -----------------------------------------------------------------------------
// SequenceSpec

/// Target descriptor for "sequence of T".
#[derive(Clone, Debug)]
pub struct SequenceSpec {
    element: Box<TypeSpec>,
    collect: CollectSequenceFn,
}

impl SequenceSpec {
    pub fn new(element: TypeSpec, collect: CollectSequenceFn) -> Self {
        Self {
            element: Box::new(element),
            collect,
        }
    }

    /// The declared element type.
    #[inline]
    pub fn element(&self) -> &TypeSpec {
        &self.element
    }

    /// Rebuilds the concrete collection from deserialized elements.
    #[inline]
    pub fn collect(
        &self,
        elements: Vec<Box<dyn Reflect>>,
    ) -> Result<Box<dyn Reflect>, DeserializeError> {
        (self.collect)(elements)
    }
}

// -----------------------------------------------------------------------------
// MappingSpec

/// Target descriptor for "mapping from string keys to V".
#[derive(Clone, Debug)]
pub struct MappingSpec {
    value: Box<TypeSpec>,
    collect: CollectMappingFn,
}

impl MappingSpec {
    pub fn new(value: TypeSpec, collect: CollectMappingFn) -> Self {
        Self {
            value: Box::new(value),
            collect,
        }
    }

    /// The declared value type.
    #[inline]
    pub fn value(&self) -> &TypeSpec {
        &self.value
    }

    /// Rebuilds the concrete mapping from deserialized entries.
    #[inline]
    pub fn collect(
        &self,
        entries: Vec<(String, Box<dyn Reflect>)>,
    ) -> Result<Box<dyn Reflect>, DeserializeError> {
        (self.collect)(entries)
    }
}

// -----------------------------------------------------------------------------
// AlternativeSpec

/// Target descriptor for "exactly one of T1..Tn".
///
/// Branch order is the declaration order and is significant: the union
/// resolver tries branches front to back and keeps the first success, so an
/// input satisfying several branches resolves to the earliest one.
#[derive(Clone, Debug)]
pub struct AlternativeSpec {
    branches: Vec<TypeSpec>,
    inject: Option<InjectFn>,
}

impl AlternativeSpec {
    /// An ad-hoc alternative: the resolved branch value is returned as-is.
    pub fn new(branches: Vec<TypeSpec>) -> Self {
        Self {
            branches,
            inject: None,
        }
    }

    /// An alternative backed by a concrete union representation: the
    /// resolved branch value is passed through `inject` before returning.
    pub fn with_inject(branches: Vec<TypeSpec>, inject: InjectFn) -> Self {
        Self {
            branches,
            inject: Some(inject),
        }
    }

    /// The declared branches, in declaration order.
    #[inline]
    pub fn branches(&self) -> &[TypeSpec] {
        &self.branches
    }

    /// Wraps a resolved branch value into the union's representation.
    #[inline]
    pub fn inject(
        &self,
        branch: usize,
        value: Box<dyn Reflect>,
    ) -> Result<Box<dyn Reflect>, DeserializeError> {
        match self.inject {
            Some(inject) => inject(branch, value),
            None => Ok(value),
        }
    }
}

impl fmt::Display for AlternativeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("one of [")?;
        for (index, branch) in self.branches.iter().enumerate() {
            if index > 0 {
                f.write_str(" | ")?;
            }
            write!(f, "{branch}")?;
        }
        f.write_str("]")
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::TypeSpec;
    use crate::info::{AlternativeSpec, Category};

    #[test]
    fn display_is_human_readable() {
        let spec = TypeSpec::Alternative(AlternativeSpec::new(alloc::vec![
            TypeSpec::absent(),
            TypeSpec::of::<i64>(),
        ]));
        assert_eq!(spec.to_string(), "one of [null | i64]");
    }

    #[test]
    fn category_projection() {
        assert_eq!(TypeSpec::of::<bool>().category(), Category::of::<bool>());
        assert_eq!(
            TypeSpec::of::<alloc::vec::Vec<i64>>().category(),
            Category::Sequence
        );
    }
}
