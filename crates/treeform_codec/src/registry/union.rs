use alloc::boxed::Box;
use alloc::string::ToString;
use alloc::vec::Vec;

use crate::error::DeserializeError;
use crate::info::AlternativeSpec;
use crate::reflection::Reflect;
use crate::registry::DeserializeDriver;
use crate::tree::Tree;

// -----------------------------------------------------------------------------
// Union resolution

/// Resolves an alternative target by backtracking over its declared branches.
///
/// Branches are attempted front to back against the whole input tree; the
/// first one to deserialize wins and is passed through the spec's injection.
/// Declaration order is therefore a tie-breaker the caller controls: an input
/// admissible under several branches resolves to the earliest.
///
/// When every branch fails the rejections are aggregated into
/// [`DeserializeError::ExhaustedAlternatives`], one cause per branch in
/// declared order.
pub(crate) fn resolve(
    driver: &DeserializeDriver<'_>,
    spec: &AlternativeSpec,
    tree: &Tree,
) -> Result<Box<dyn Reflect>, DeserializeError> {
    let branches = spec.branches();
    let mut causes = Vec::with_capacity(branches.len());
    for (index, branch) in branches.iter().enumerate() {
        match driver.deserialize(branch, tree) {
            Ok(value) => {
                log::trace!("resolved `{spec}` to branch {index} (`{branch}`)");
                return spec.inject(index, value);
            }
            Err(cause) => causes.push(cause),
        }
    }
    Err(DeserializeError::ExhaustedAlternatives {
        target: spec.to_string(),
        causes,
    })
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::vec;

    use crate::error::DeserializeError;
    use crate::info::{AlternativeSpec, Category, TypeSpec};
    use crate::reflection::Reflect;
    use crate::registry::{CodecRegistry, DeserializeDriver};
    use crate::tree::Tree;

    fn deserialize_i64(
        _: &DeserializeDriver<'_>,
        _: &TypeSpec,
        tree: &Tree,
    ) -> Result<Box<dyn Reflect>, DeserializeError> {
        match tree {
            Tree::Integer(value) => Ok(Box::new(*value)),
            other => Err(DeserializeError::UnexpectedTree {
                target: alloc::string::String::from("i64"),
                expected: "an integer",
                found: other.kind(),
            }),
        }
    }

    fn deserialize_f64(
        _: &DeserializeDriver<'_>,
        _: &TypeSpec,
        tree: &Tree,
    ) -> Result<Box<dyn Reflect>, DeserializeError> {
        match tree {
            Tree::Integer(value) => Ok(Box::new(*value as f64)),
            Tree::Float(value) => Ok(Box::new(*value)),
            other => Err(DeserializeError::UnexpectedTree {
                target: alloc::string::String::from("f64"),
                expected: "a number",
                found: other.kind(),
            }),
        }
    }

    fn registry() -> CodecRegistry {
        let mut registry = CodecRegistry::empty();
        registry.register_deserializer(Category::of::<i64>(), deserialize_i64);
        registry.register_deserializer(Category::of::<f64>(), deserialize_f64);
        registry
    }

    fn union_of(branches: vec::Vec<TypeSpec>) -> TypeSpec {
        TypeSpec::Alternative(AlternativeSpec::new(branches))
    }

    #[test]
    fn first_declared_branch_wins() {
        let registry = registry();
        let tree = Tree::Integer(5);

        // Both leaves accept an integer tree; declaration order decides.
        let spec = union_of(vec![
            TypeSpec::Concrete(crate::info::ConcreteType::of::<f64>()),
            TypeSpec::Concrete(crate::info::ConcreteType::of::<i64>()),
        ]);
        let value = registry.deserialize(&spec, &tree).unwrap();
        assert!(value.is::<f64>());

        let spec = union_of(vec![
            TypeSpec::Concrete(crate::info::ConcreteType::of::<i64>()),
            TypeSpec::Concrete(crate::info::ConcreteType::of::<f64>()),
        ]);
        let value = registry.deserialize(&spec, &tree).unwrap();
        assert!(value.is::<i64>());
    }

    #[test]
    fn exhaustion_keeps_one_cause_per_branch() {
        let registry = registry();
        let spec = union_of(vec![
            TypeSpec::Concrete(crate::info::ConcreteType::of::<i64>()),
            TypeSpec::Concrete(crate::info::ConcreteType::of::<f64>()),
        ]);

        let error = registry.deserialize(&spec, &Tree::from("five")).unwrap_err();
        match error {
            DeserializeError::ExhaustedAlternatives { causes, .. } => {
                assert_eq!(causes.len(), 2);
            }
            other => panic!("expected exhaustion, got {other}"),
        }
    }
}
