//! Dynamic value model shared by the `subview` crates.
//!
//! [`Value`](dynamic::Value) is a small, owned, dynamically typed container
//! type: scalars, strings, arrays and ordered maps. [`Kind`] is its runtime
//! class hierarchy, and [`digest`] fingerprints values so that holders of a
//! shared value can tell whether it changed behind their back.

#![deny(unsafe_code)]

extern crate alloc;

pub mod digest;
pub mod dynamic;
pub mod kind;

pub use digest::{Digest, digest};
pub use dynamic::Value;
pub use kind::Kind;
