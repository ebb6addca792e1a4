//! [`Reflect`](crate::Reflect) and [`Typed`](crate::Typed) implementations
//! for primitives and the common containers.

mod collections;
mod option;
mod primitives;
