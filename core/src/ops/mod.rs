//! Native operations on dynamic values.
//!
//! Every operation a value supports is a named native function registered in
//! one process-wide table, keyed by the kind that defines it. Lookups walk the
//! receiver's kind ancestry (`Int` → `Numeric` → `Object`), so a package
//! registered for `Numeric` is shared by integers and floats and can shadow
//! the generic `Object` definitions.
//!
//! Packages:
//! - `object`: equality, type tests, comparison, conversion (all kinds)
//! - `numeric`: arithmetic and numeric comparison
//! - `string`: string queries and in-place edits
//! - `array`: array queries and in-place edits
//! - `map`: map lookups and in-place edits
//! - `class`: operations on first-class kinds
//!
//! Operations come in two flavours: [`NativeOp::Read`] only looks at its
//! receiver, [`NativeOp::Write`] mutates it in place.

use alloc::vec::Vec;

use hashbrown::HashMap;
use lazy_static::lazy_static;
use subview_values::{Kind, Value};

use crate::api::error::OpError;

pub mod array;
pub mod class;
pub mod map;
pub mod numeric;
pub mod object;
pub mod slice;
pub mod string;

pub use slice::extract_range;

/// Signature of an operation that only reads its receiver.
pub type ReadFn = fn(&Value, &[Value]) -> Result<Value, OpError>;

/// Signature of an operation that mutates its receiver in place.
pub type WriteFn = fn(&mut Value, &[Value]) -> Result<Value, OpError>;

#[derive(Clone, Copy)]
pub enum NativeOp {
    Read(ReadFn),
    Write(WriteFn),
}

impl NativeOp {
    pub fn is_write(&self) -> bool {
        matches!(self, NativeOp::Write(_))
    }
}

// ============================================================================
// Table
// ============================================================================

/// Operation table: kind → operation name → native function.
#[derive(Default)]
pub struct OpTable {
    by_kind: HashMap<Kind, HashMap<&'static str, NativeOp>>,
}

impl OpTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `op` under `name` for `kind`.
    ///
    /// # Panics
    ///
    /// Panics in debug builds on duplicate registration within a kind, which
    /// indicates a bug in a package (two functions with the same name).
    pub fn register(&mut self, kind: Kind, name: &'static str, op: NativeOp) {
        let previous = self.by_kind.entry(kind).or_default().insert(name, op);
        debug_assert!(previous.is_none(), "duplicate operation {kind}#{name}");
    }

    pub fn read(&mut self, kind: Kind, name: &'static str, f: ReadFn) {
        self.register(kind, name, NativeOp::Read(f));
    }

    pub fn write(&mut self, kind: Kind, name: &'static str, f: WriteFn) {
        self.register(kind, name, NativeOp::Write(f));
    }

    /// Find `name` on `kind` or its nearest ancestor defining it.
    pub fn lookup(&self, kind: Kind, name: &str) -> Option<NativeOp> {
        kind.ancestors()
            .into_iter()
            .find_map(|k| self.by_kind.get(&k)?.get(name).copied())
    }

    /// Every operation name visible on `kind`, sorted.
    pub fn names(&self, kind: Kind) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = kind
            .ancestors()
            .into_iter()
            .filter_map(|k| self.by_kind.get(&k))
            .flat_map(|ops| ops.keys().copied())
            .collect();
        names.sort_unstable();
        names.dedup();
        names
    }
}

fn build_table() -> OpTable {
    let mut table = OpTable::new();
    object::register_object_ops(&mut table);
    numeric::register_numeric_ops(&mut table);
    string::register_string_ops(&mut table);
    array::register_array_ops(&mut table);
    map::register_map_ops(&mut table);
    class::register_class_ops(&mut table);
    table
}

lazy_static! {
    static ref OPS: OpTable = build_table();
}

/// The process-wide operation table.
pub fn table() -> &'static OpTable {
    &OPS
}

// ============================================================================
// Dispatch
// ============================================================================

/// Call `op` on `receiver`, mutating it if the operation is destructive.
pub fn call(receiver: &mut Value, op: &str, args: &[Value]) -> Result<Value, OpError> {
    match lookup(receiver, op)? {
        NativeOp::Read(f) => f(receiver, args),
        NativeOp::Write(f) => f(receiver, args),
    }
}

/// Call `op` on `receiver` without touching it.
///
/// Destructive operations run against a private copy, so the caller sees the
/// operation's return value but `receiver` is left as it was.
pub fn call_ref(receiver: &Value, op: &str, args: &[Value]) -> Result<Value, OpError> {
    match lookup(receiver, op)? {
        NativeOp::Read(f) => f(receiver, args),
        NativeOp::Write(f) => f(&mut receiver.clone(), args),
    }
}

/// Whether `receiver` has an operation called `op`.
pub fn responds_to(receiver: &Value, op: &str) -> bool {
    table().lookup(receiver.kind(), op).is_some()
}

fn lookup(receiver: &Value, op: &str) -> Result<NativeOp, OpError> {
    table()
        .lookup(receiver.kind(), op)
        .ok_or_else(|| OpError::Undefined {
            op: op.into(),
            receiver: receiver.type_name(),
        })
}

// ============================================================================
// Argument helpers shared by the packages
// ============================================================================

pub(crate) fn check_arity(
    op: &str,
    args: &[Value],
    min: usize,
    max: usize,
    expected: &'static str,
) -> Result<(), OpError> {
    if args.len() < min || args.len() > max {
        return Err(OpError::Arity {
            op: op.into(),
            given: args.len(),
            expected,
        });
    }
    Ok(())
}

/// Exactly one argument.
pub(crate) fn unary<'a>(op: &str, args: &'a [Value]) -> Result<&'a Value, OpError> {
    check_arity(op, args, 1, 1, "1")?;
    Ok(&args[0])
}

pub(crate) fn nullary(op: &str, args: &[Value]) -> Result<(), OpError> {
    check_arity(op, args, 0, 0, "0")
}

pub(crate) fn type_error(op: &str, expected: &'static str, found: &Value) -> OpError {
    OpError::ArgumentType {
        op: op.into(),
        expected,
        found: found.type_name(),
    }
}

/// Integer argument; floats truncate toward zero.
pub(crate) fn int_arg(op: &str, value: &Value) -> Result<i64, OpError> {
    slice::bound(value).ok_or_else(|| type_error(op, "Int", value))
}

pub(crate) fn str_arg<'a>(op: &str, value: &'a Value) -> Result<&'a str, OpError> {
    value.as_str().ok_or_else(|| type_error(op, "Str", value))
}

pub(crate) fn array_arg<'a>(op: &str, value: &'a Value) -> Result<&'a [Value], OpError> {
    value.as_array().ok_or_else(|| type_error(op, "Array", value))
}

pub(crate) fn kind_arg(op: &str, value: &Value) -> Result<Kind, OpError> {
    value.as_kind().ok_or_else(|| type_error(op, "Class", value))
}

pub(crate) fn too_big(op: &str) -> OpError {
    OpError::Argument {
        op: op.into(),
        message: "argument too big".into(),
    }
}

/// Item count of `unit` items repeated `times` times, rejected when the
/// result at `item_size` bytes per item could not fit in one allocation.
pub(crate) fn repeat_len(
    op: &str,
    unit: usize,
    times: usize,
    item_size: usize,
) -> Result<usize, OpError> {
    unit.checked_mul(times)
        .filter(|len| {
            len.checked_mul(item_size)
                .is_some_and(|bytes| bytes <= isize::MAX as usize)
        })
        .ok_or_else(|| too_big(op))
}

/// Receiver accessors for the packages. Dispatch guarantees the kind, so a
/// mismatch means a package was registered under the wrong kind.
pub(crate) fn receiver_error(op: &str, receiver: &Value) -> OpError {
    OpError::Undefined {
        op: op.into(),
        receiver: receiver.type_name(),
    }
}

#[cfg(test)]
mod ops_test;
