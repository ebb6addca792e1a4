//! The codec registry and its dispatch drivers.
//!
//! A [`CodecRegistry`] holds conversion functions keyed by
//! [`Category`](crate::info::Category) plus an index of record descriptors.
//! The entry points [`serialize`](CodecRegistry::serialize) and
//! [`deserialize`](CodecRegistry::deserialize) spin up a driver that performs
//! the ranked dispatch, tracks nesting depth, and routes alternative targets
//! through the backtracking union resolver.

// -----------------------------------------------------------------------------
// Modules

mod codec_registry;
mod driver;
mod union;

// -----------------------------------------------------------------------------
// Exports

pub use codec_registry::{CodecRegistry, DeserializeFn, SerializeFn};
pub use driver::{DeserializeDriver, SerializeDriver};
