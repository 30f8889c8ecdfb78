//! Bounded views.
//!
//! A [`SubView`] stands for `source[offset, length]` without copying it.
//! Every non-destructive operation is answered by re-extracting the slice,
//! projecting it with the specialization's projection operation and running
//! the operation on the result, so a view always reflects the current state
//! of its source. Destructive operations are rejected before the source is
//! even looked at.
//!
//! ```
//! use subview_core::{SubArray, SubView, shared};
//! use subview_core::values::Value;
//!
//! let src = shared(vec![2, 4, 6, 8, 10]);
//! let view = SubView::<SubArray>::new(src.clone(), -3, 2).unwrap();
//!
//! assert_eq!(view, Value::from(vec![6, 8]));
//! assert_eq!(view.invoke("+", &[Value::from(vec![9])]).unwrap(), Value::from(vec![6, 8, 9]));
//! assert!(view.invoke("push", &[Value::Int(5)]).unwrap_err().is_rejected());
//! ```

mod forward;
mod guard;
mod stale;

pub use guard::{BASE_DESTRUCTIVE, DestructiveGuard};
pub use stale::Snapshot;

use alloc::rc::Rc;
use core::marker::PhantomData;

use subview_values::{Digest, Value};
use tracing::debug;

use crate::api::error::ConstructionError;
use crate::source::Source;
use crate::specialization::Specialization;
use crate::verbosity::{self, Verbosity};

/// A read-only view of `source[offset, length]`, projected according to `S`.
///
/// `A` is the type of an optional user attribute carried along with the view.
pub struct SubView<S: Specialization, A = Value> {
    source: Rc<dyn Source>,
    offset: Value,
    length: Value,
    digest: Digest,
    attr: Option<A>,
    _spec: PhantomData<fn() -> S>,
}

static_assertions::assert_not_impl_any!(SubView<crate::specialization::SubArray>: Send, Sync);

impl<S: Specialization, A> SubView<S, A> {
    /// Create a view of `source[offset, length]`.
    ///
    /// The extraction is tried once up front, so a view never exists over a
    /// source that cannot produce its slice. The bounds are kept verbatim and
    /// never re-validated.
    pub fn new(
        source: Rc<dyn Source>,
        offset: impl Into<Value>,
        length: impl Into<Value>,
    ) -> Result<Self, ConstructionError> {
        Self::build(source, offset.into(), length.into(), None)
    }

    /// Like [`new`](Self::new), with a user attribute attached.
    pub fn with_attr(
        source: Rc<dyn Source>,
        offset: impl Into<Value>,
        length: impl Into<Value>,
        attr: impl Into<A>,
    ) -> Result<Self, ConstructionError> {
        Self::build(source, offset.into(), length.into(), Some(attr.into()))
    }

    fn build(
        source: Rc<dyn Source>,
        offset: Value,
        length: Value,
        attr: Option<A>,
    ) -> Result<Self, ConstructionError> {
        if let Err(err) = source.extract_range(&offset, &length) {
            let err = ConstructionError::from_extract(err, &offset, &length);
            debug!(specialization = S::NAME, kind = %err.kind(), "rejected source: {err}");
            return Err(err);
        }
        if !source.responds_to(S::PROJECTION) {
            let err = ConstructionError::wrong_source_type(source.type_name(), S::NAME);
            debug!(specialization = S::NAME, kind = %err.kind(), "rejected source: {err}");
            return Err(err);
        }

        let digest = source.digest();
        debug!(
            specialization = S::NAME,
            ?offset,
            ?length,
            digest,
            "created view"
        );
        Ok(SubView {
            source,
            offset,
            length,
            digest,
            attr,
            _spec: PhantomData,
        })
    }

    // ============================================================================
    // Accessors
    // ============================================================================

    /// `(offset, length)` exactly as given at construction.
    pub fn bounds(&self) -> (&Value, &Value) {
        (&self.offset, &self.length)
    }

    pub fn offset(&self) -> &Value {
        &self.offset
    }

    pub fn length(&self) -> &Value {
        &self.length
    }

    pub fn attr(&self) -> Option<&A> {
        self.attr.as_ref()
    }

    pub fn attr_mut(&mut self) -> Option<&mut A> {
        self.attr.as_mut()
    }

    /// Replace the attribute, returning the previous one.
    pub fn set_attr(&mut self, attr: impl Into<A>) -> Option<A> {
        self.attr.replace(attr.into())
    }

    pub fn take_attr(&mut self) -> Option<A> {
        self.attr.take()
    }

    pub fn specialization(&self) -> &'static str {
        S::NAME
    }

    /// Digest of the source taken when the view was created.
    pub fn cached_digest(&self) -> Digest {
        self.digest
    }

    /// Whether two views read the same source object.
    pub fn shares_source_with<T: Specialization, B>(&self, other: &SubView<T, B>) -> bool {
        Rc::ptr_eq(&self.source, &other.source)
    }

    // ============================================================================
    // Verbosity
    // ============================================================================

    /// Staleness diagnostics flag of `S`.
    pub fn verbose() -> Verbosity {
        verbosity::get_verbosity::<S>()
    }

    pub fn set_verbose(value: impl Into<Verbosity>) -> Verbosity {
        verbosity::set_verbosity::<S>(value)
    }
}

impl<S: Specialization, A: Clone> Clone for SubView<S, A> {
    fn clone(&self) -> Self {
        SubView {
            source: Rc::clone(&self.source),
            offset: self.offset.clone(),
            length: self.length.clone(),
            digest: self.digest,
            attr: self.attr.clone(),
            _spec: PhantomData,
        }
    }
}
