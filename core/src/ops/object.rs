//! Operations every value supports.

use core::cmp::Ordering;

use subview_values::{Kind, Value, digest};

use super::{OpTable, call_ref, kind_arg, nullary, responds_to, str_arg, unary};
use crate::api::error::OpError;

/// Encode an ordering the way `<=>` returns it.
pub fn ordering_value(ordering: Option<Ordering>) -> Value {
    match ordering {
        Some(Ordering::Less) => Value::Int(-1),
        Some(Ordering::Equal) => Value::Int(0),
        Some(Ordering::Greater) => Value::Int(1),
        None => Value::Nil,
    }
}

/// Decode a `<=>` result back into an ordering.
pub fn value_ordering(value: &Value) -> Option<Ordering> {
    match value.as_int()? {
        n if n < 0 => Some(Ordering::Less),
        0 => Some(Ordering::Equal),
        _ => Some(Ordering::Greater),
    }
}

fn eq(receiver: &Value, args: &[Value]) -> Result<Value, OpError> {
    let other = unary("==", args)?;
    Ok(Value::Bool(receiver == other))
}

fn ne(receiver: &Value, args: &[Value]) -> Result<Value, OpError> {
    // Honors kind-specific `==` (numeric equality across Int and Float)
    let equal = call_ref(receiver, "==", args)?;
    Ok(Value::Bool(!equal.is_truthy()))
}

fn case_eq(receiver: &Value, args: &[Value]) -> Result<Value, OpError> {
    unary("===", args)?;
    call_ref(receiver, "==", args)
}

fn eql(receiver: &Value, args: &[Value]) -> Result<Value, OpError> {
    let other = unary("eql?", args)?;
    Ok(Value::Bool(receiver == other))
}

fn is_a(receiver: &Value, args: &[Value]) -> Result<Value, OpError> {
    let kind = kind_arg("is_a?", unary("is_a?", args)?)?;
    Ok(Value::Bool(receiver.kind().is_a(kind)))
}

fn instance_of(receiver: &Value, args: &[Value]) -> Result<Value, OpError> {
    let kind = kind_arg("instance_of?", unary("instance_of?", args)?)?;
    Ok(Value::Bool(receiver.kind() == kind))
}

fn spaceship(receiver: &Value, args: &[Value]) -> Result<Value, OpError> {
    let other = unary("<=>", args)?;
    if receiver.kind() != other.kind() {
        return Ok(Value::Nil);
    }
    Ok(ordering_value(Some(receiver.cmp(other))))
}

fn pattern_match(_receiver: &Value, args: &[Value]) -> Result<Value, OpError> {
    unary("=~", args)?;
    Ok(Value::Nil)
}

fn to_s(receiver: &Value, args: &[Value]) -> Result<Value, OpError> {
    nullary("to_s", args)?;
    Ok(Value::Str(alloc::format!("{receiver}")))
}

fn inspect(receiver: &Value, args: &[Value]) -> Result<Value, OpError> {
    nullary("inspect", args)?;
    Ok(Value::Str(receiver.inspect()))
}

fn itself(receiver: &Value, args: &[Value]) -> Result<Value, OpError> {
    nullary("itself", args)?;
    Ok(receiver.clone())
}

fn dup(receiver: &Value, args: &[Value]) -> Result<Value, OpError> {
    nullary("dup", args)?;
    Ok(receiver.clone())
}

fn hash(receiver: &Value, args: &[Value]) -> Result<Value, OpError> {
    nullary("hash", args)?;
    Ok(Value::Int(digest(receiver) as i64))
}

fn is_nil(receiver: &Value, args: &[Value]) -> Result<Value, OpError> {
    nullary("nil?", args)?;
    Ok(Value::Bool(receiver.is_nil()))
}

fn not(receiver: &Value, args: &[Value]) -> Result<Value, OpError> {
    nullary("!", args)?;
    Ok(Value::Bool(!receiver.is_truthy()))
}

fn class(receiver: &Value, args: &[Value]) -> Result<Value, OpError> {
    nullary("class", args)?;
    Ok(Value::Kind(receiver.kind()))
}

fn respond_to(receiver: &Value, args: &[Value]) -> Result<Value, OpError> {
    let name = str_arg("respond_to?", unary("respond_to?", args)?)?;
    Ok(Value::Bool(responds_to(receiver, name)))
}

pub fn register_object_ops(table: &mut OpTable) {
    table.read(Kind::Object, "==", eq);
    table.read(Kind::Object, "!=", ne);
    table.read(Kind::Object, "===", case_eq);
    table.read(Kind::Object, "eql?", eql);
    table.read(Kind::Object, "is_a?", is_a);
    table.read(Kind::Object, "kind_of?", is_a);
    table.read(Kind::Object, "instance_of?", instance_of);
    table.read(Kind::Object, "<=>", spaceship);
    table.read(Kind::Object, "=~", pattern_match);
    table.read(Kind::Object, "to_s", to_s);
    table.read(Kind::Object, "inspect", inspect);
    table.read(Kind::Object, "itself", itself);
    table.read(Kind::Object, "dup", dup);
    table.read(Kind::Object, "hash", hash);
    table.read(Kind::Object, "nil?", is_nil);
    table.read(Kind::Object, "!", not);
    table.read(Kind::Object, "class", class);
    table.read(Kind::Object, "respond_to?", respond_to);
}
