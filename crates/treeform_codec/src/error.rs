use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;

use thiserror::Error;

// -----------------------------------------------------------------------------
// SerializeError

/// Errors produced while converting a runtime value into a [`Tree`].
///
/// [`Tree`]: crate::Tree
#[derive(Debug, Error)]
pub enum SerializeError {
    /// No registered serialization entry matches the value's runtime category.
    ///
    /// This signals an unsupported runtime type: either the type was never
    /// meant to be serialized, or the registry was built without the
    /// corresponding leaf function.
    #[error("no serializer registered for value of type `{type_name}`")]
    UnsupportedType { type_name: &'static str },

    /// A record instance did not yield a value for one of its declared fields.
    ///
    /// The field descriptor and the instance disagree, which is a bug in the
    /// introspection implementation rather than in the input.
    #[error("record `{record}` did not yield a value for declared field `{field}`")]
    MissingFieldValue {
        record: &'static str,
        field: &'static str,
    },

    /// The value is supported in principle but this particular instance has
    /// no tree representation (e.g. a `u64` above the signed 64-bit range).
    #[error("value of type `{type_name}` cannot be represented: {reason}")]
    Unrepresentable {
        type_name: &'static str,
        reason: &'static str,
    },

    /// The configured nesting depth limit was exceeded.
    ///
    /// Only produced when a limit was installed via
    /// [`CodecRegistry::with_max_depth`](crate::registry::CodecRegistry::with_max_depth).
    #[error("nesting depth limit of {limit} exceeded during serialization")]
    DepthLimitExceeded { limit: usize },
}

// -----------------------------------------------------------------------------
// DeserializeError

/// Errors produced while rebuilding a runtime value from a [`Tree`].
///
/// Except for [`ExhaustedAlternatives`], which aggregates the failures the
/// union resolver collected while backtracking, every variant propagates
/// unchanged to the caller: the core never retries or masks a failure.
///
/// [`Tree`]: crate::Tree
/// [`ExhaustedAlternatives`]: DeserializeError::ExhaustedAlternatives
#[derive(Debug, Error)]
pub enum DeserializeError {
    /// No deserialization entry is registered for the requested target type.
    #[error("no deserializer registered for target `{target}`")]
    UnregisteredTarget { target: String },

    /// The matched function received a tree of the wrong shape, e.g. a
    /// sequence where the target demands a mapping.
    #[error("expected {expected} but found {found} while deserializing `{target}`")]
    UnexpectedTree {
        target: String,
        expected: &'static str,
        found: &'static str,
    },

    /// An integer tree value does not fit the target type's range.
    #[error("integer `{found}` is out of range for target `{target}`")]
    OutOfRange { target: &'static str, found: i64 },

    /// A constructor, collector, or union injection received a value of the
    /// wrong concrete type. Indicates a mismatch between a declared
    /// [`TypeSpec`](crate::info::TypeSpec) and the function registered for it.
    #[error("expected a value of type `{expected}`, found `{found}`")]
    MismatchedValue {
        expected: &'static str,
        found: &'static str,
    },

    /// A required record field was absent from the input mapping and the
    /// descriptor declares no default for it.
    #[error("record `{record}` is missing required field `{field}`")]
    MissingField {
        record: &'static str,
        field: &'static str,
    },

    /// Context wrapper: deserializing one field of a record failed.
    #[error("field `{field}` of record `{record}` could not be deserialized")]
    Field {
        record: &'static str,
        field: &'static str,
        #[source]
        cause: Box<DeserializeError>,
    },

    /// Every declared alternative of a union target was tried and rejected.
    ///
    /// `causes` holds exactly one entry per attempted branch, in declared
    /// order, so the caller can diagnose each rejection without re-running.
    #[error("no alternative of `{target}` matched the input ({} branches tried)", causes.len())]
    ExhaustedAlternatives {
        target: String,
        causes: Vec<DeserializeError>,
    },

    /// The configured nesting depth limit was exceeded.
    #[error("nesting depth limit of {limit} exceeded during deserialization")]
    DepthLimitExceeded { limit: usize },
}
