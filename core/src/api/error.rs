//! Public error types.
//!
//! Construction failures are a closed set of kinds with fixed message
//! templates. Operation failures come from the native operation table and
//! are passed through views untouched; the only error a view adds on its own
//! is [`InvokeError::Rejected`].

use alloc::string::String;
use core::fmt;

use subview_values::Value;
use thiserror::Error;

// ============================================================================
// Construction
// ============================================================================

/// Why a view could not be created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstructionErrorKind {
    /// The source has no ranged extraction at all.
    NoExtractionCapability,
    /// The source's ranged extraction does not take an `(offset, length)` pair.
    WrongArity,
    /// The source rejected the types of `offset` / `length`.
    InvalidBoundsType,
    /// The source lacks the projection operation of the specialization.
    WrongSourceType,
}

impl fmt::Display for ConstructionErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConstructionErrorKind::NoExtractionCapability => "no extraction capability",
            ConstructionErrorKind::WrongArity => "wrong arity",
            ConstructionErrorKind::InvalidBoundsType => "invalid bounds type",
            ConstructionErrorKind::WrongSourceType => "wrong source type",
        };
        f.write_str(name)
    }
}

/// A view could not be created. No partially built view ever exists.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ConstructionError {
    kind: ConstructionErrorKind,
    message: String,
}

impl ConstructionError {
    pub fn kind(&self) -> ConstructionErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Classify a failed sanity extraction.
    pub(crate) fn from_extract(err: ExtractError, offset: &Value, length: &Value) -> Self {
        match err {
            ExtractError::Unsupported => Self {
                kind: ConstructionErrorKind::NoExtractionCapability,
                message: "source does not accept #[] method".into(),
            },
            ExtractError::Arity { .. } => Self {
                kind: ConstructionErrorKind::WrongArity,
                message: "source does not accept #[i, j]-type method".into(),
            },
            ExtractError::BoundsType => Self {
                kind: ConstructionErrorKind::InvalidBoundsType,
                message: alloc::format!("wrong type for (pos, size)=({offset:?}, {length:?})"),
            },
        }
    }

    pub(crate) fn wrong_source_type(source: &str, specialization: &str) -> Self {
        Self {
            kind: ConstructionErrorKind::WrongSourceType,
            message: alloc::format!(
                "wrong source class {source} for this class {specialization}"
            ),
        }
    }
}

// ============================================================================
// Ranged extraction
// ============================================================================

/// Failure of a source's ranged extraction, `source[offset, length]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ExtractError {
    #[error("ranged extraction is not supported")]
    Unsupported,
    #[error("ranged extraction does not accept {given} arguments")]
    Arity { given: usize },
    #[error("ranged extraction rejected the bound types")]
    BoundsType,
}

// ============================================================================
// Operations
// ============================================================================

/// Failure of a native operation on a value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OpError {
    #[error("undefined method `{op}' for {receiver}")]
    Undefined { op: String, receiver: &'static str },

    #[error("wrong number of arguments for `{op}' (given {given}, expected {expected})")]
    Arity {
        op: String,
        given: usize,
        expected: &'static str,
    },

    #[error("`{op}': no implicit conversion of {found} into {expected}")]
    ArgumentType {
        op: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("`{op}': {message}")]
    Argument { op: String, message: String },

    #[error("index {index} outside of bounds: -{len}...{len}")]
    Index { index: i64, len: usize },

    #[error("key not found: {key}")]
    KeyNotFound { key: String },

    #[error("divided by 0")]
    ZeroDivision,
}

/// Failure of an operation invoked through a view.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvokeError {
    /// The operation is destructive; views never forward those.
    #[error("`{op}' is destructive and cannot be called on {specialization}")]
    Rejected {
        op: String,
        specialization: &'static str,
    },

    /// The projected value's own failure, unchanged.
    #[error(transparent)]
    Op(#[from] OpError),
}

impl InvokeError {
    pub fn is_rejected(&self) -> bool {
        matches!(self, InvokeError::Rejected { .. })
    }
}
