//! Type descriptors: the dispatch keys and target specifications the registry
//! resolves against.
//!
//! ## Menu
//!
//! - [`Category`]: the closed dispatch key an entry is registered under.
//! - [`ConcreteType`]: a `TypeId` plus display name, the "exact type" arm.
//! - [`TypeSpec`]: the declared target descriptor a caller supplies to
//!   `deserialize`, carrying type arguments and construction functions.
//! - [`RecordInfo`] / [`FieldInfo`]: the record descriptor the introspector
//!   yields — ordered fields, optional defaults, and a constructor.

// -----------------------------------------------------------------------------
// Modules

mod category;
mod record_info;
mod type_spec;

// -----------------------------------------------------------------------------
// Exports

pub use category::{Category, ConcreteType};
pub use record_info::{FieldInfo, RecordInfo, next_field};
pub use type_spec::{AlternativeSpec, MappingSpec, SequenceSpec, TypeSpec};
pub use type_spec::{CollectMappingFn, CollectSequenceFn, ConstructFn, DefaultFn, InjectFn};
