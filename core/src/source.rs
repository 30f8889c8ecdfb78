//! The containers views are taken over.
//!
//! A [`Source`] is anything that can hand out a ranged slice of itself,
//! answer whether it supports an operation, and fingerprint its current
//! contents. [`SharedValue`] (a `Rc<RefCell<Value>>`) is the source the crate
//! ships: the owner keeps mutating it through the `RefCell`, views only ever
//! borrow it immutably.

use alloc::rc::Rc;
use core::cell::RefCell;

use subview_values::{Digest, Value, digest};

use crate::api::error::ExtractError;
use crate::ops;

/// A mutable container a view can project a sub-range of.
pub trait Source {
    /// Runtime type name, used in construction error messages.
    fn type_name(&self) -> &'static str;

    /// `self[offset, length]`.
    fn extract_range(&self, offset: &Value, length: &Value) -> Result<Value, ExtractError>;

    /// Whether the container itself supports `op`.
    fn responds_to(&self, op: &str) -> bool;

    /// Content digest of the current state.
    fn digest(&self) -> Digest;

    /// An owned copy of the current state.
    fn snapshot(&self) -> Value;
}

impl Source for RefCell<Value> {
    fn type_name(&self) -> &'static str {
        self.borrow().type_name()
    }

    fn extract_range(&self, offset: &Value, length: &Value) -> Result<Value, ExtractError> {
        ops::extract_range(&self.borrow(), offset, length)
    }

    fn responds_to(&self, op: &str) -> bool {
        ops::responds_to(&self.borrow(), op)
    }

    fn digest(&self) -> Digest {
        digest(&self.borrow())
    }

    fn snapshot(&self) -> Value {
        self.borrow().clone()
    }
}

/// A value shared between its owner and any number of views.
pub type SharedValue = Rc<RefCell<Value>>;

/// Wrap `value` so that it can serve as a view source.
pub fn shared(value: impl Into<Value>) -> SharedValue {
    Rc::new(RefCell::new(value.into()))
}
