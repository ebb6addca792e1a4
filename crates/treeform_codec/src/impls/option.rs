use alloc::boxed::Box;
use alloc::vec;

use crate::error::DeserializeError;
use crate::info::{AlternativeSpec, TypeSpec};
use crate::reflection::{AlternativeRef, Reflect, ReflectRef, Typed};
use crate::registry::CodecRegistry;

// `Option<T>` is the canonical alternative: absent-or-T, with absence
// declared first so a null input never reaches the value branch.

impl<T: Reflect> Reflect for Option<T> {
    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Alternative(match self {
            Some(value) => AlternativeRef::Value(value),
            None => AlternativeRef::Absent,
        })
    }
}

impl<T: Typed> Typed for Option<T> {
    fn type_spec() -> TypeSpec {
        TypeSpec::Alternative(AlternativeSpec::with_inject(
            vec![TypeSpec::absent(), T::type_spec()],
            inject_option::<T>,
        ))
    }

    fn register_dependencies(registry: &mut CodecRegistry) {
        T::register_dependencies(registry);
    }
}

fn inject_option<T: Typed>(
    branch: usize,
    value: Box<dyn Reflect>,
) -> Result<Box<dyn Reflect>, DeserializeError> {
    if branch == 0 {
        return Ok(Box::new(None::<T>));
    }
    let value = value
        .take::<T>()
        .map_err(|actual| DeserializeError::MismatchedValue {
            expected: core::any::type_name::<T>(),
            found: actual.type_name(),
        })?;
    Ok(Box::new(Some(value)))
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use crate::info::TypeSpec;
    use crate::reflection::{AlternativeRef, Reflect, ReflectRef};

    #[test]
    fn absence_is_the_first_branch() {
        assert_eq!(TypeSpec::of::<Option<i64>>().to_string(), "one of [null | i64]");
    }

    #[test]
    fn projection_tracks_the_active_branch() {
        let none: Option<i64> = None;
        assert!(matches!(
            none.reflect_ref(),
            ReflectRef::Alternative(AlternativeRef::Absent)
        ));
        assert!(matches!(
            Some(5_i64).reflect_ref(),
            ReflectRef::Alternative(AlternativeRef::Value(_))
        ));
    }
}
