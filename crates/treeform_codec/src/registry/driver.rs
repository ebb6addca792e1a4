use alloc::boxed::Box;

use crate::error::{DeserializeError, SerializeError};
use crate::info::TypeSpec;
use crate::reflection::Reflect;
use crate::registry::{CodecRegistry, union};
use crate::tree::Tree;

// -----------------------------------------------------------------------------
// SerializeDriver

/// The dispatch context threaded through one serialization pass.
///
/// Conversion functions receive a driver and recurse into child values with
/// [`serialize`](SerializeDriver::serialize); the driver re-dispatches each
/// child against the registry and tracks nesting depth.
pub struct SerializeDriver<'a> {
    registry: &'a CodecRegistry,
    depth: usize,
}

impl<'a> SerializeDriver<'a> {
    pub(crate) const fn root(registry: &'a CodecRegistry) -> Self {
        Self { registry, depth: 0 }
    }

    /// The registry this pass dispatches against.
    #[inline]
    pub const fn registry(&self) -> &'a CodecRegistry {
        self.registry
    }

    /// Dispatches `value` to the most specific matching entry.
    pub fn serialize(&self, value: &dyn Reflect) -> Result<Tree, SerializeError> {
        if let Some(limit) = self.registry.max_depth()
            && self.depth >= limit
        {
            return Err(SerializeError::DepthLimitExceeded { limit });
        }
        match self.registry.serializer_for(value) {
            Some((category, func)) => {
                log::trace!(
                    "serializing `{}` ({}) via {category} entry",
                    value.type_name(),
                    value.reflect_ref().kind(),
                );
                func(&self.descend(), value)
            }
            None => Err(SerializeError::UnsupportedType {
                type_name: value.type_name(),
            }),
        }
    }

    const fn descend(&self) -> Self {
        Self {
            registry: self.registry,
            depth: self.depth + 1,
        }
    }
}

// -----------------------------------------------------------------------------
// DeserializeDriver

/// The dispatch context threaded through one deserialization pass.
pub struct DeserializeDriver<'a> {
    registry: &'a CodecRegistry,
    depth: usize,
}

impl<'a> DeserializeDriver<'a> {
    pub(crate) const fn root(registry: &'a CodecRegistry) -> Self {
        Self { registry, depth: 0 }
    }

    /// The registry this pass dispatches against.
    #[inline]
    pub const fn registry(&self) -> &'a CodecRegistry {
        self.registry
    }

    /// Rebuilds a value of the declared target `spec` from `tree`.
    ///
    /// Alternative targets are intercepted here and routed to the union
    /// resolver; everything else dispatches to the most specific admitting
    /// entry.
    pub fn deserialize(
        &self,
        spec: &TypeSpec,
        tree: &Tree,
    ) -> Result<Box<dyn Reflect>, DeserializeError> {
        if let Some(limit) = self.registry.max_depth()
            && self.depth >= limit
        {
            return Err(DeserializeError::DepthLimitExceeded { limit });
        }
        if let TypeSpec::Alternative(alternative) = spec {
            return union::resolve(self, alternative, tree);
        }
        match self.registry.deserializer_for(spec) {
            Some((category, func)) => {
                log::trace!("deserializing `{spec}` from {} via {category} entry", tree.kind());
                func(&self.descend(), spec, tree)
            }
            None => Err(CodecRegistry::unregistered_target(spec)),
        }
    }

    const fn descend(&self) -> Self {
        Self {
            registry: self.registry,
            depth: self.depth + 1,
        }
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;

    use crate::error::SerializeError;
    use crate::info::Category;
    use crate::reflection::Reflect;
    use crate::registry::{CodecRegistry, SerializeDriver};
    use crate::tree::Tree;

    // A self-nesting value whose entry recurses through the driver, so the
    // depth limit has something to trip on.
    struct Nested(Option<Box<Nested>>);

    impl Reflect for Nested {
        fn type_name(&self) -> &'static str {
            "Nested"
        }

        fn reflect_ref(&self) -> crate::reflection::ReflectRef<'_> {
            crate::reflection::ReflectRef::Opaque
        }
    }

    fn serialize_nested(
        driver: &SerializeDriver<'_>,
        value: &dyn Reflect,
    ) -> Result<Tree, SerializeError> {
        let nested = value.downcast_ref::<Nested>().ok_or(
            SerializeError::UnsupportedType {
                type_name: value.type_name(),
            },
        )?;
        match &nested.0 {
            Some(inner) => driver.serialize(inner.as_ref()),
            None => Ok(Tree::Null),
        }
    }

    fn chain(depth: usize) -> Nested {
        let mut value = Nested(None);
        for _ in 0..depth {
            value = Nested(Some(Box::new(value)));
        }
        value
    }

    #[test]
    fn depth_limit_trips_on_deep_values() {
        let mut registry = CodecRegistry::empty().with_max_depth(8);
        registry.register_serializer(Category::of::<Nested>(), serialize_nested);

        assert!(registry.serialize(&chain(3)).is_ok());
        assert!(matches!(
            registry.serialize(&chain(20)).unwrap_err(),
            SerializeError::DepthLimitExceeded { limit: 8 }
        ));
    }

    #[test]
    fn no_limit_by_default() {
        let mut registry = CodecRegistry::empty();
        registry.register_serializer(Category::of::<Nested>(), serialize_nested);

        assert_eq!(registry.serialize(&chain(64)).unwrap(), Tree::Null);
    }
}
