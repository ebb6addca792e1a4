//! The dynamic value surface the dispatch engine works on.
//!
//! ## Menu
//!
//! - [`Reflect`]: the foundational trait every codec-visible value implements.
//! - [`ReflectRef`]: a borrowed projection of a value's shape.
//! - [`RecordValue`] / [`SequenceValue`] / [`MappingValue`]: shape-specific
//!   access used by the structural codecs.
//! - [`Typed`]: the static side, yielding a value's declared
//!   [`TypeSpec`](crate::info::TypeSpec).
//! - [`Record`]: the static descriptor contract of the record introspector.

// -----------------------------------------------------------------------------
// Modules

mod reflect;
mod typed;

// -----------------------------------------------------------------------------
// Exports

pub use reflect::{AlternativeRef, MappingValue, RecordValue, Reflect, ReflectRef, SequenceValue};
pub use typed::{Record, Typed};
