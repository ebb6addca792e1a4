use crate::error::SerializeError;
use crate::reflection::{AlternativeRef, Reflect, ReflectRef};
use crate::registry::SerializeDriver;
use crate::tree::Tree;

/// Serializes any alternative-shaped value: the absence branch becomes
/// [`Tree::Null`], a value branch serializes as the inner value, untagged.
/// Register under [`Category::Alternative`](crate::info::Category::Alternative).
///
/// There is no deserialization counterpart. An alternative *target* cannot be
/// rebuilt by a single dispatched entry since the untyped tree does not say
/// which branch it came from; the driver routes such targets through the
/// backtracking union resolver instead.
pub fn serialize_alternative(
    driver: &SerializeDriver<'_>,
    value: &dyn Reflect,
) -> Result<Tree, SerializeError> {
    let ReflectRef::Alternative(branch) = value.reflect_ref() else {
        return Err(SerializeError::UnsupportedType {
            type_name: value.type_name(),
        });
    };
    match branch {
        AlternativeRef::Absent => Ok(Tree::Null),
        AlternativeRef::Value(inner) => driver.serialize(inner),
    }
}
