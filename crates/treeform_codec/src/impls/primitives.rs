use alloc::string::String;

use crate::info::{ConcreteType, TypeSpec};
use crate::reflection::{Reflect, ReflectRef, Typed};

// Leaves expose no structure; they serialize through per-type entries a
// format adapter registers. The short name doubles as the display name of
// the concrete category.
macro_rules! impl_leaf {
    ($($ty:ty => $name:literal),* $(,)?) => {
        $(
            impl Reflect for $ty {
                fn type_name(&self) -> &'static str {
                    $name
                }

                fn reflect_ref(&self) -> ReflectRef<'_> {
                    ReflectRef::Opaque
                }
            }

            impl Typed for $ty {
                fn type_spec() -> TypeSpec {
                    TypeSpec::Concrete(ConcreteType::with_name::<$ty>($name))
                }
            }
        )*
    };
}

impl_leaf! {
    bool => "bool",
    char => "char",
    u8 => "u8",
    u16 => "u16",
    u32 => "u32",
    u64 => "u64",
    usize => "usize",
    i8 => "i8",
    i16 => "i16",
    i32 => "i32",
    i64 => "i64",
    isize => "isize",
    f32 => "f32",
    f64 => "f64",
    String => "String",
}

// The unit type doubles as the "absence" target, so it shares the spec the
// alternative machinery uses for absent branches.
impl Reflect for () {
    fn type_name(&self) -> &'static str {
        "null"
    }

    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Opaque
    }
}

impl Typed for () {
    fn type_spec() -> TypeSpec {
        TypeSpec::absent()
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use crate::info::TypeSpec;
    use crate::reflection::Reflect;

    #[test]
    fn leaves_use_short_names() {
        assert_eq!((&5_i64 as &dyn Reflect).type_name(), "i64");
        assert_eq!(TypeSpec::of::<f64>().to_string(), "f64");
    }

    #[test]
    fn unit_is_the_absence_target() {
        assert_eq!(
            TypeSpec::of::<()>().category(),
            TypeSpec::absent().category()
        );
    }
}
