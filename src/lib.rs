//! subview - bounded, read-only views over shared mutable containers
//!
//! # Overview
//!
//! A view stands for a sub-range `(offset, length)` of a container it does
//! not own. It never copies the range: every read re-extracts the slice from
//! the container, so the view always reflects the container's current state.
//! Operations that would mutate the slice are rejected outright.
//!
//! Because the container may keep changing, every view remembers a digest of
//! the container taken when the view was created, and warns through
//! `tracing` (target `subview::stale`) when it notices the container has
//! changed since. The warning is informational only; it never changes a
//! result.
//!
//! # Quick Start
//!
//! ```
//! use subview::{SubArray, SubView, Value, shared};
//!
//! let src = shared(vec![2, 4, 6, 8, 10]);
//! let view = SubView::<SubArray>::new(src.clone(), -3, 2)?;
//!
//! // Non-destructive operations run on the current slice.
//! assert_eq!(view, Value::from(vec![6, 8]));
//! assert_eq!(view.invoke("+", &[Value::from(vec![9])])?, Value::from(vec![6, 8, 9]));
//!
//! // Destructive ones never reach the container.
//! assert!(view.invoke("push", &[Value::Int(5)]).unwrap_err().is_rejected());
//!
//! // The view follows the container; its bounds never change.
//! src.borrow_mut().as_array_mut().unwrap().push(Value::Int(12));
//! assert_eq!(view, Value::from(vec![8, 10]));
//! assert_eq!(view.bounds(), (&Value::Int(-3), &Value::Int(2)));
//! # Ok::<(), subview::Error>(())
//! ```
//!
//! # Specializations
//!
//! The specialization decides what the slice is projected into before an
//! operation runs on it, and which operation names are destructive:
//!
//! - [`SubObject`]: the slice itself,
//! - [`SubArray`]: the slice as an array, with array mutators rejected,
//! - [`SubString`]: the slice as a string.
//!
//! Implement [`Specialization`] for your own marker type to add more.
//!
//! # Staleness diagnostics
//!
//! Diagnostics are off unless enabled, either per specialization
//! (`SubView::<SubArray>::set_verbose(true)`) or for every specialization
//! without its own setting ([`set_fallback_verbosity`]).

pub use subview_core::api::{
    BASE_DESTRUCTIVE, ConstructionError, ConstructionErrorKind, DestructiveGuard, ExtractError,
    InvokeError, OpError, SharedValue, Snapshot, Source, SpecId, Specialization, SubArray,
    SubObject, SubString, SubView, Verbosity, VerbosityRegistry, fallback_verbosity,
    get_verbosity, is_verbose, set_fallback_verbosity, set_verbosity, shared,
};
pub use subview_core::ops;
pub use subview_core::values::{self, Kind, Value};

/// Any failure from creating or using a view.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Construction(#[from] ConstructionError),
    #[error(transparent)]
    Invoke(#[from] InvokeError),
}

impl From<OpError> for Error {
    fn from(err: OpError) -> Self {
        Error::Invoke(InvokeError::Op(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn first_two(src: &SharedValue) -> Result<Value, Error> {
        let view = SubView::<SubArray>::new(src.clone(), 0, 2)?;
        Ok(view.invoke("sum", &[])?)
    }

    #[test]
    fn test_error_unifies_construction_and_invoke() {
        assert_eq!(first_two(&shared(vec![1, 2, 3])), Ok(Value::Int(3)));

        let err = first_two(&shared("abc")).unwrap_err();
        assert!(matches!(err, Error::Construction(_)));
        assert_eq!(err.to_string(), "wrong source class Str for this class SubArray");

        let err = first_two(&shared(vec![Value::str("a"), Value::Int(1)])).unwrap_err();
        assert!(matches!(err, Error::Invoke(InvokeError::Op(_))));
    }
}
