#![doc = include_str!("../README.md")]
#![no_std]

// -----------------------------------------------------------------------------
// no_std support

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod impls;
mod macros;
mod reflection;
mod serde;

pub mod error;
pub mod info;
pub mod registry;
pub mod structural;
pub mod tree;

// -----------------------------------------------------------------------------
// Top-Level exports

pub use error::{DeserializeError, SerializeError};
pub use reflection::{
    AlternativeRef, MappingValue, Record, RecordValue, Reflect, ReflectRef, SequenceValue, Typed,
};
pub use registry::CodecRegistry;
pub use tree::{Tree, TreeMapping};

// -----------------------------------------------------------------------------
// Macro support

// Runtime items the exported macros expand to. Not public API.
#[doc(hidden)]
pub mod __private {
    pub use alloc::boxed::Box;
    pub use alloc::vec;
    pub use alloc::vec::Vec;
}
