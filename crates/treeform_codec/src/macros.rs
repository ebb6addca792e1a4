//! Declarative implementations of the reflection traits for user types.

/// Implements [`Reflect`], [`RecordValue`], [`Typed`], and [`Record`] for a
/// plain struct, turning it into a record the structural codecs understand.
///
/// Fields are declared in the order they should appear in serialized output.
/// A field may carry a default after `=`; such a field becomes optional on
/// input.
///
/// # Examples
///
/// ```
/// use treeform_codec::reflect_record;
///
/// struct Item {
///     name: String,
///     price: f64,
///     qty: i64,
/// }
///
/// reflect_record!(Item {
///     name: String,
///     price: f64,
///     qty: i64 = 1,
/// });
/// ```
///
/// [`Reflect`]: crate::Reflect
/// [`RecordValue`]: crate::RecordValue
/// [`Typed`]: crate::Typed
/// [`Record`]: crate::Record
#[macro_export]
macro_rules! reflect_record {
    ($ty:ident { $($field:ident : $fty:ty $(= $default:expr)?),* $(,)? }) => {
        impl $crate::Reflect for $ty {
            fn type_name(&self) -> &'static str {
                ::core::stringify!($ty)
            }

            fn reflect_ref(&self) -> $crate::ReflectRef<'_> {
                $crate::ReflectRef::Record(self)
            }
        }

        impl $crate::RecordValue for $ty {
            fn record_info(&self) -> $crate::info::RecordInfo {
                <Self as $crate::Record>::record_info()
            }

            fn field(&self, name: &str) -> ::core::option::Option<&dyn $crate::Reflect> {
                match name {
                    $(
                        ::core::stringify!($field) => {
                            ::core::option::Option::Some(&self.$field as &dyn $crate::Reflect)
                        }
                    )*
                    _ => ::core::option::Option::None,
                }
            }
        }

        impl $crate::Typed for $ty {
            fn type_spec() -> $crate::info::TypeSpec {
                $crate::info::TypeSpec::Concrete(
                    $crate::info::ConcreteType::with_name::<$ty>(::core::stringify!($ty)),
                )
            }

            fn register_dependencies(registry: &mut $crate::CodecRegistry) {
                // Insert before recursing so self-referential records
                // terminate.
                if registry.register_record::<$ty>() {
                    $(<$fty as $crate::Typed>::register_dependencies(registry);)*
                }
            }
        }

        impl $crate::Record for $ty {
            fn record_info() -> $crate::info::RecordInfo {
                $crate::info::RecordInfo::new(
                    $crate::info::ConcreteType::with_name::<$ty>(::core::stringify!($ty)),
                    $crate::__private::vec![
                        $($crate::reflect_record!(@field $field, $fty $(, $default)?),)*
                    ],
                    |values| {
                        let mut values = values.into_iter();
                        ::core::result::Result::Ok($crate::__private::Box::new($ty {
                            $(
                                $field: $crate::info::next_field::<$fty>(
                                    &mut values,
                                    ::core::stringify!($ty),
                                    ::core::stringify!($field),
                                )?,
                            )*
                        }))
                    },
                )
            }
        }
    };
    (@field $field:ident, $fty:ty) => {
        $crate::info::FieldInfo::new(
            ::core::stringify!($field),
            <$fty as $crate::Typed>::type_spec(),
        )
    };
    (@field $field:ident, $fty:ty, $default:expr) => {
        $crate::info::FieldInfo::with_default(
            ::core::stringify!($field),
            <$fty as $crate::Typed>::type_spec(),
            || -> $crate::__private::Box<dyn $crate::Reflect> {
                $crate::__private::Box::<$fty>::new($default)
            },
        )
    };
}

/// Implements [`Reflect`] and [`Typed`] for a newtype-variant enum, turning
/// it into an alternative over its variants' payload types.
///
/// Variants are tried in declaration order on input; the first that
/// deserializes wins, so put the more specific payload types first.
/// Serialization emits the active variant's payload, untagged.
///
/// # Examples
///
/// ```
/// use treeform_codec::reflect_union;
///
/// enum Id {
///     Number(i64),
///     Label(String),
/// }
///
/// reflect_union!(Id {
///     Number(i64),
///     Label(String),
/// });
/// ```
///
/// [`Reflect`]: crate::Reflect
/// [`Typed`]: crate::Typed
#[macro_export]
macro_rules! reflect_union {
    ($ty:ident { $($variant:ident($vty:ty)),* $(,)? }) => {
        impl $crate::Reflect for $ty {
            fn type_name(&self) -> &'static str {
                ::core::stringify!($ty)
            }

            fn reflect_ref(&self) -> $crate::ReflectRef<'_> {
                match self {
                    $(
                        $ty::$variant(value) => $crate::ReflectRef::Alternative(
                            $crate::AlternativeRef::Value(value as &dyn $crate::Reflect),
                        ),
                    )*
                }
            }
        }

        impl $crate::Typed for $ty {
            fn type_spec() -> $crate::info::TypeSpec {
                $crate::info::TypeSpec::Alternative($crate::info::AlternativeSpec::with_inject(
                    $crate::__private::vec![$(<$vty as $crate::Typed>::type_spec()),*],
                    |branch, value| {
                        let mut index = 0usize;
                        $(
                            if branch == index {
                                let value = value.take::<$vty>().map_err(|actual| {
                                    $crate::DeserializeError::MismatchedValue {
                                        expected: ::core::any::type_name::<$vty>(),
                                        found: actual.type_name(),
                                    }
                                })?;
                                return ::core::result::Result::Ok(
                                    $crate::__private::Box::new($ty::$variant(value)),
                                );
                            }
                            index += 1;
                        )*
                        let _ = index;
                        ::core::unreachable!("branch index out of range")
                    },
                ))
            }

            fn register_dependencies(registry: &mut $crate::CodecRegistry) {
                $(<$vty as $crate::Typed>::register_dependencies(registry);)*
            }
        }
    };
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::vec::Vec;
    use core::any::TypeId;

    use crate::info::TypeSpec;
    use crate::reflection::{Record, RecordValue, Typed};
    use crate::registry::CodecRegistry;

    struct Item {
        name: String,
        qty: i64,
    }

    reflect_record!(Item {
        name: String,
        qty: i64 = 1,
    });

    struct Order {
        items: Vec<Item>,
    }

    reflect_record!(Order {
        items: Vec<Item>,
    });

    enum Id {
        Number(i64),
        Label(String),
    }

    reflect_union!(Id {
        Number(i64),
        Label(String),
    });

    #[test]
    fn record_descriptor_lists_fields_in_order() {
        let info = <Item as Record>::record_info();
        assert_eq!(info.name(), "Item");
        let names: Vec<&str> = info.fields().iter().map(|field| field.name()).collect();
        assert_eq!(names, ["name", "qty"]);
        assert!(info.field("name").unwrap().default().is_none());
        assert!(info.field("qty").unwrap().default().is_some());
    }

    #[test]
    fn record_field_access_matches_the_descriptor() {
        let item = Item {
            name: String::from("Apple"),
            qty: 20,
        };
        assert_eq!(item.field("qty").unwrap().downcast_ref::<i64>(), Some(&20));
        assert!(item.field("missing").is_none());
    }

    #[test]
    fn registration_cascades_through_field_types() {
        let mut registry = CodecRegistry::empty();
        registry.register::<Order>();
        assert!(registry.record_info(TypeId::of::<Order>()).is_some());
        assert!(registry.record_info(TypeId::of::<Item>()).is_some());
    }

    #[test]
    fn union_spec_declares_variants_in_order() {
        let TypeSpec::Alternative(spec) = Id::type_spec() else {
            panic!("expected an alternative spec");
        };
        assert_eq!(spec.branches().len(), 2);
        let injected = spec
            .inject(0, alloc::boxed::Box::new(7_i64))
            .unwrap()
            .take::<Id>()
            .unwrap();
        assert!(matches!(injected, Id::Number(7)));
    }
}
