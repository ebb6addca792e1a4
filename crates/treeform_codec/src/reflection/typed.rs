use crate::info::{RecordInfo, TypeSpec};
use crate::reflection::{Reflect, RecordValue};
use crate::registry::CodecRegistry;

// -----------------------------------------------------------------------------
// Typed

/// The static side of reflection: what a *declared* occurrence of a type
/// (a record field, a union branch, a sequence element) looks like to the
/// deserializer.
///
/// Where [`Reflect`] answers "what is this value, at runtime",
/// `Typed` answers "what should be rebuilt here" — the [`TypeSpec`] it yields
/// carries the dispatch category plus the construction functions Rust needs
/// to produce a concrete value again.
pub trait Typed: Reflect {
    /// The declared type descriptor, synthesized on demand.
    fn type_spec() -> TypeSpec;

    /// Registers everything this type needs for deserialization into
    /// `registry`, cascading through component types.
    ///
    /// Leaves have nothing to register; records insert their descriptor and
    /// recurse into their field types. Registration is idempotent, and a
    /// record inserts itself *before* recursing so self-referential types
    /// terminate.
    fn register_dependencies(registry: &mut CodecRegistry) {
        let _ = registry;
    }
}

// -----------------------------------------------------------------------------
// Record

/// The static descriptor contract of the record introspector: `fields` and
/// `construct`, bundled in a [`RecordInfo`].
///
/// Implemented by [`reflect_record!`](crate::reflect_record); the instance
/// side (`get`) lives on [`RecordValue`].
pub trait Record: RecordValue + Typed {
    /// The record's field descriptor and constructor.
    fn record_info() -> RecordInfo;
}
