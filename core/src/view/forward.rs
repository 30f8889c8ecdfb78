//! Forwarding operations to the projected slice.

use alloc::string::String;
use core::cmp::Ordering;
use core::fmt;

use subview_values::{Kind, Value};
use tracing::trace;

use super::guard::DestructiveGuard;
use super::stale::Snapshot;
use super::SubView;
use crate::api::error::{ExtractError, InvokeError, OpError};
use crate::ops;
use crate::ops::object::value_ordering;
use crate::specialization::Specialization;

impl<S: Specialization, A> SubView<S, A> {
    /// Run `op` on the current projection of the slice.
    ///
    /// Destructive operations fail with [`InvokeError::Rejected`] without
    /// reading the source. Everything else sees a freshly extracted and
    /// projected slice; its failures come back unchanged as
    /// [`InvokeError::Op`].
    pub fn invoke(&self, op: &str, args: &[Value]) -> Result<Value, InvokeError> {
        if DestructiveGuard::<S>::of().is_destructive(op) {
            trace!(specialization = S::NAME, op, "rejected destructive operation");
            return Err(InvokeError::Rejected {
                op: op.into(),
                specialization: S::NAME,
            });
        }
        let mut projected = self.project()?;
        Ok(ops::call(&mut projected, op, args)?)
    }

    /// Whether `invoke(op, ..)` would find an operation to run.
    ///
    /// Always false for destructive operations, and false when the slice can
    /// no longer be projected.
    pub fn responds_to(&self, op: &str) -> bool {
        if DestructiveGuard::<S>::of().is_destructive(op) {
            return false;
        }
        self.project()
            .is_ok_and(|projected| ops::responds_to(&projected, op))
    }

    /// The current slice, projected. The result is an owned copy; changing
    /// it does not touch the source.
    pub fn project(&self) -> Result<Value, OpError> {
        self.check_stale();
        let slice = self
            .source
            .extract_range(&self.offset, &self.length)
            .map_err(|err| self.extract_error(err))?;
        ops::call_ref(&slice, S::PROJECTION, &[])
    }

    /// An immutable copy of the current projection.
    pub fn snapshot(&self) -> Result<Snapshot, OpError> {
        self.project().map(Snapshot)
    }

    /// `<NAME>[<offset>,<length>]<slice>`, checking the source for changes.
    pub fn inspect(&self) -> String {
        self.check_stale();
        self.render()
    }

    fn render(&self) -> String {
        alloc::format!(
            "{}[{:?},{:?}]{}",
            S::NAME,
            self.offset,
            self.length,
            self.render_slice()
        )
    }

    /// Bounds were validated at construction, so this only happens when the
    /// source changed shape since.
    fn extract_error(&self, err: ExtractError) -> OpError {
        match err {
            ExtractError::Unsupported => OpError::Undefined {
                op: "[]".into(),
                receiver: self.source.type_name(),
            },
            ExtractError::Arity { given } => OpError::Arity {
                op: "[]".into(),
                given,
                expected: "1",
            },
            ExtractError::BoundsType => OpError::ArgumentType {
                op: "[]".into(),
                expected: "Int",
                found: if ops::slice::bound(&self.offset).is_none() {
                    self.offset.type_name()
                } else {
                    self.length.type_name()
                },
            },
        }
    }

    // ============================================================================
    // Identity-like operations, all answered by the projection
    // ============================================================================

    /// `projection == other`
    pub fn eq_value(&self, other: &Value) -> Result<bool, InvokeError> {
        self.test("==", other)
    }

    /// `projection === other`
    pub fn case_eq(&self, other: &Value) -> Result<bool, InvokeError> {
        self.test("===", other)
    }

    /// Whether the projection is a `kind` or a descendant of it.
    pub fn is_a(&self, kind: Kind) -> Result<bool, InvokeError> {
        self.test("is_a?", &Value::Kind(kind))
    }

    /// Whether the projection is exactly a `kind`.
    pub fn instance_of(&self, kind: Kind) -> Result<bool, InvokeError> {
        self.test("instance_of?", &Value::Kind(kind))
    }

    /// `projection <=> other`; `None` when the two are not comparable.
    pub fn compare(&self, other: &Value) -> Result<Option<Ordering>, InvokeError> {
        let result = self.invoke("<=>", core::slice::from_ref(other))?;
        Ok(value_ordering(&result))
    }

    /// `projection =~ pattern`
    pub fn pattern_match(&self, pattern: &Value) -> Result<Value, InvokeError> {
        self.invoke("=~", core::slice::from_ref(pattern))
    }

    /// `projection.to_s`
    pub fn to_s(&self) -> Result<String, InvokeError> {
        match self.invoke("to_s", &[])? {
            Value::Str(s) => Ok(s),
            other => Ok(alloc::format!("{other}")),
        }
    }

    fn test(&self, op: &str, arg: &Value) -> Result<bool, InvokeError> {
        let result = self.invoke(op, core::slice::from_ref(arg))?;
        Ok(result.is_truthy())
    }
}

// ============================================================================
// Trait impls delegate to the current projection
// ============================================================================

/// A view equals whatever its projection equals. A view whose slice cannot
/// be projected equals nothing.
impl<S: Specialization, A> PartialEq<Value> for SubView<S, A> {
    fn eq(&self, other: &Value) -> bool {
        self.eq_value(other).unwrap_or(false)
    }
}

impl<S: Specialization, A> PartialEq<SubView<S, A>> for Value {
    fn eq(&self, other: &SubView<S, A>) -> bool {
        other.eq_value(self).unwrap_or(false)
    }
}

impl<S: Specialization, A> PartialOrd<Value> for SubView<S, A> {
    fn partial_cmp(&self, other: &Value) -> Option<Ordering> {
        self.compare(other).ok().flatten()
    }
}

/// The projection's `to_s`, or `#<error>` if that fails.
impl<S: Specialization, A> fmt::Display for SubView<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_s() {
            Ok(s) => f.write_str(&s),
            Err(err) => write!(f, "#<{err}>"),
        }
    }
}

/// Same as [`SubView::inspect`], without the staleness check.
impl<S: Specialization, A> fmt::Debug for SubView<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
