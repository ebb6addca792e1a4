//! Shape-driven conversion functions for records, sequences, mappings, and
//! alternatives.
//!
//! These are ordinary registry entries, written against the polymorphic
//! [`Category`](crate::info::Category) arms rather than any concrete type. A
//! format adapter registers them once and they cover every composite type;
//! only the leaves differ per format.

// -----------------------------------------------------------------------------
// Modules

mod alternative;
mod mapping;
mod record;
mod sequence;

// -----------------------------------------------------------------------------
// Exports

pub use alternative::serialize_alternative;
pub use mapping::{deserialize_mapping, serialize_mapping};
pub use record::{deserialize_record, serialize_record};
pub use sequence::{deserialize_sequence, serialize_sequence};
