//! `Map` operations.
//!
//! Maps are ordered by key. Indexing takes exactly one key; a two-argument
//! `[]` is an arity error, which is what makes a map an unsuitable view
//! source.

use alloc::collections::BTreeMap;

use subview_values::{Kind, Value};

use super::{OpTable, check_arity, nullary, receiver_error, type_error, unary};
use crate::api::error::OpError;

fn entries<'a>(op: &str, receiver: &'a Value) -> Result<&'a BTreeMap<Value, Value>, OpError> {
    receiver.as_map().ok_or_else(|| receiver_error(op, receiver))
}

fn entries_mut<'a>(
    op: &str,
    receiver: &'a mut Value,
) -> Result<&'a mut BTreeMap<Value, Value>, OpError> {
    match receiver {
        Value::Map(map) => Ok(map),
        other => Err(receiver_error(op, other)),
    }
}

fn index(receiver: &Value, args: &[Value]) -> Result<Value, OpError> {
    check_arity("[]", args, 1, 1, "1")?;
    Ok(entries("[]", receiver)?
        .get(&args[0])
        .cloned()
        .unwrap_or_default())
}

fn fetch(receiver: &Value, args: &[Value]) -> Result<Value, OpError> {
    let key = unary("fetch", args)?;
    entries("fetch", receiver)?
        .get(key)
        .cloned()
        .ok_or_else(|| OpError::KeyNotFound { key: key.inspect() })
}

fn has_key(receiver: &Value, args: &[Value]) -> Result<Value, OpError> {
    let key = unary("key?", args)?;
    Ok(Value::Bool(entries("key?", receiver)?.contains_key(key)))
}

fn keys(receiver: &Value, args: &[Value]) -> Result<Value, OpError> {
    nullary("keys", args)?;
    Ok(Value::Array(entries("keys", receiver)?.keys().cloned().collect()))
}

fn values(receiver: &Value, args: &[Value]) -> Result<Value, OpError> {
    nullary("values", args)?;
    Ok(Value::Array(entries("values", receiver)?.values().cloned().collect()))
}

fn size(receiver: &Value, args: &[Value]) -> Result<Value, OpError> {
    nullary("size", args)?;
    Ok(Value::Int(entries("size", receiver)?.len() as i64))
}

fn is_empty(receiver: &Value, args: &[Value]) -> Result<Value, OpError> {
    nullary("empty?", args)?;
    Ok(Value::Bool(entries("empty?", receiver)?.is_empty()))
}

fn to_h(receiver: &Value, args: &[Value]) -> Result<Value, OpError> {
    nullary("to_h", args)?;
    Ok(Value::Map(entries("to_h", receiver)?.clone()))
}

fn store(receiver: &mut Value, args: &[Value]) -> Result<Value, OpError> {
    check_arity("[]=", args, 2, 2, "2")?;
    entries_mut("[]=", receiver)?.insert(args[0].clone(), args[1].clone());
    Ok(args[1].clone())
}

fn delete(receiver: &mut Value, args: &[Value]) -> Result<Value, OpError> {
    let key = unary("delete", args)?;
    Ok(entries_mut("delete", receiver)?
        .remove(key)
        .unwrap_or_default())
}

fn clear(receiver: &mut Value, args: &[Value]) -> Result<Value, OpError> {
    nullary("clear", args)?;
    entries_mut("clear", receiver)?.clear();
    Ok(receiver.clone())
}

fn replace(receiver: &mut Value, args: &[Value]) -> Result<Value, OpError> {
    let with = unary("replace", args)?;
    let with = with
        .as_map()
        .ok_or_else(|| type_error("replace", "Map", with))?
        .clone();
    *entries_mut("replace", receiver)? = with;
    Ok(receiver.clone())
}

pub fn register_map_ops(table: &mut OpTable) {
    table.read(Kind::Map, "[]", index);
    table.read(Kind::Map, "fetch", fetch);
    table.read(Kind::Map, "key?", has_key);
    table.read(Kind::Map, "include?", has_key);
    table.read(Kind::Map, "keys", keys);
    table.read(Kind::Map, "values", values);
    table.read(Kind::Map, "size", size);
    table.read(Kind::Map, "length", size);
    table.read(Kind::Map, "empty?", is_empty);
    table.read(Kind::Map, "to_h", to_h);

    table.write(Kind::Map, "[]=", store);
    table.write(Kind::Map, "delete", delete);
    table.write(Kind::Map, "clear", clear);
    table.write(Kind::Map, "replace", replace);
}
