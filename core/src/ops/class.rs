//! Operations on first-class kinds (`Int`, `Array`, ...).

use subview_values::{Kind, Value};

use super::{OpTable, nullary, receiver_error, unary};
use crate::api::error::OpError;

fn this(op: &str, receiver: &Value) -> Result<Kind, OpError> {
    receiver.as_kind().ok_or_else(|| receiver_error(op, receiver))
}

/// `Kind === value` is a type test on `value`.
fn case_eq(receiver: &Value, args: &[Value]) -> Result<Value, OpError> {
    let value = unary("===", args)?;
    Ok(Value::Bool(value.kind().is_a(this("===", receiver)?)))
}

fn name(receiver: &Value, args: &[Value]) -> Result<Value, OpError> {
    nullary("name", args)?;
    Ok(Value::str(this("name", receiver)?.name()))
}

fn superclass(receiver: &Value, args: &[Value]) -> Result<Value, OpError> {
    nullary("superclass", args)?;
    Ok(Value::from(this("superclass", receiver)?.superclass()))
}

pub fn register_class_ops(table: &mut OpTable) {
    table.read(Kind::Class, "===", case_eq);
    table.read(Kind::Class, "name", name);
    table.read(Kind::Class, "superclass", superclass);
}
