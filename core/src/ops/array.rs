//! `Array` operations.

use alloc::{string::String, vec::Vec};

use subview_values::{Kind, Value};

use super::slice::{extract_range, resolve_index};
use super::{
    OpTable, array_arg, call_ref, check_arity, int_arg, nullary, receiver_error, repeat_len,
    str_arg, too_big, type_error, unary,
};
use crate::api::error::{ExtractError, OpError};

fn items<'a>(op: &str, receiver: &'a Value) -> Result<&'a [Value], OpError> {
    receiver.as_array().ok_or_else(|| receiver_error(op, receiver))
}

fn items_mut<'a>(op: &str, receiver: &'a mut Value) -> Result<&'a mut Vec<Value>, OpError> {
    match receiver {
        Value::Array(items) => Ok(items),
        other => Err(receiver_error(op, other)),
    }
}

fn count_arg(op: &str, value: &Value) -> Result<usize, OpError> {
    let n = int_arg(op, value)?;
    if n < 0 {
        return Err(OpError::Argument {
            op: op.into(),
            message: alloc::format!("negative array size ({n})"),
        });
    }
    usize::try_from(n).map_err(|_| too_big(op))
}

// ============================================================================
// Queries
// ============================================================================

fn to_ary(receiver: &Value, args: &[Value]) -> Result<Value, OpError> {
    nullary("to_ary", args)?;
    Ok(Value::Array(items("to_ary", receiver)?.to_vec()))
}

fn size(receiver: &Value, args: &[Value]) -> Result<Value, OpError> {
    nullary("size", args)?;
    Ok(Value::Int(items("size", receiver)?.len() as i64))
}

fn is_empty(receiver: &Value, args: &[Value]) -> Result<Value, OpError> {
    nullary("empty?", args)?;
    Ok(Value::Bool(items("empty?", receiver)?.is_empty()))
}

/// `a[i]` or `a[start, length]`.
fn index(receiver: &Value, args: &[Value]) -> Result<Value, OpError> {
    check_arity("[]", args, 1, 2, "1..2")?;
    let elems = items("[]", receiver)?;
    if let [offset, length] = args {
        return extract_range(receiver, offset, length).map_err(|err| match err {
            ExtractError::BoundsType => {
                let bad = if int_arg("[]", offset).is_err() { offset } else { length };
                type_error("[]", "Int", bad)
            }
            _ => receiver_error("[]", receiver),
        });
    }
    at_index(elems, int_arg("[]", &args[0])?)
}

fn at_index(elems: &[Value], i: i64) -> Result<Value, OpError> {
    Ok(resolve_index(elems.len(), i).map_or(Value::Nil, |at| elems[at].clone()))
}

fn at(receiver: &Value, args: &[Value]) -> Result<Value, OpError> {
    let i = int_arg("at", unary("at", args)?)?;
    at_index(items("at", receiver)?, i)
}

fn fetch(receiver: &Value, args: &[Value]) -> Result<Value, OpError> {
    let i = int_arg("fetch", unary("fetch", args)?)?;
    let elems = items("fetch", receiver)?;
    match resolve_index(elems.len(), i) {
        Some(at) => Ok(elems[at].clone()),
        None => Err(OpError::Index {
            index: i,
            len: elems.len(),
        }),
    }
}

fn first(receiver: &Value, args: &[Value]) -> Result<Value, OpError> {
    check_arity("first", args, 0, 1, "0..1")?;
    let elems = items("first", receiver)?;
    match args.first() {
        None => Ok(elems.first().cloned().unwrap_or_default()),
        Some(n) => {
            let n = count_arg("first", n)?.min(elems.len());
            Ok(Value::Array(elems[..n].to_vec()))
        }
    }
}

fn last(receiver: &Value, args: &[Value]) -> Result<Value, OpError> {
    check_arity("last", args, 0, 1, "0..1")?;
    let elems = items("last", receiver)?;
    match args.first() {
        None => Ok(elems.last().cloned().unwrap_or_default()),
        Some(n) => {
            let n = count_arg("last", n)?.min(elems.len());
            Ok(Value::Array(elems[elems.len() - n..].to_vec()))
        }
    }
}

fn concat_new(receiver: &Value, args: &[Value]) -> Result<Value, OpError> {
    let other = array_arg("+", unary("+", args)?)?;
    let mut out = items("+", receiver)?.to_vec();
    out.extend_from_slice(other);
    Ok(Value::Array(out))
}

fn difference(receiver: &Value, args: &[Value]) -> Result<Value, OpError> {
    let other = array_arg("-", unary("-", args)?)?;
    let out = items("-", receiver)?
        .iter()
        .filter(|v| !other.contains(v))
        .cloned()
        .collect();
    Ok(Value::Array(out))
}

/// `a * n` repeats, `a * sep` joins.
fn times(receiver: &Value, args: &[Value]) -> Result<Value, OpError> {
    let arg = unary("*", args)?;
    if arg.as_str().is_some() {
        return join(receiver, args);
    }
    let n = count_arg("*", arg)?;
    let elems = items("*", receiver)?;
    let len = repeat_len("*", elems.len(), n, core::mem::size_of::<Value>())?;
    let mut out = Vec::new();
    out.try_reserve_exact(len).map_err(|_| too_big("*"))?;
    out.extend(elems.iter().cycle().take(len).cloned());
    Ok(Value::Array(out))
}

fn includes(receiver: &Value, args: &[Value]) -> Result<Value, OpError> {
    let needle = unary("include?", args)?;
    Ok(Value::Bool(items("include?", receiver)?.contains(needle)))
}

fn position(receiver: &Value, args: &[Value]) -> Result<Value, OpError> {
    let needle = unary("index", args)?;
    let at = items("index", receiver)?.iter().position(|v| v == needle);
    Ok(Value::from(at.map(|i| i as i64)))
}

fn reverse(receiver: &Value, args: &[Value]) -> Result<Value, OpError> {
    nullary("reverse", args)?;
    Ok(Value::Array(items("reverse", receiver)?.iter().rev().cloned().collect()))
}

fn sort(receiver: &Value, args: &[Value]) -> Result<Value, OpError> {
    nullary("sort", args)?;
    let mut out = items("sort", receiver)?.to_vec();
    out.sort();
    Ok(Value::Array(out))
}

fn min(receiver: &Value, args: &[Value]) -> Result<Value, OpError> {
    nullary("min", args)?;
    Ok(items("min", receiver)?.iter().min().cloned().unwrap_or_default())
}

fn max(receiver: &Value, args: &[Value]) -> Result<Value, OpError> {
    nullary("max", args)?;
    Ok(items("max", receiver)?.iter().max().cloned().unwrap_or_default())
}

/// Sums with numeric `+`, so mixed Int/Float promotes like scalar addition.
fn sum(receiver: &Value, args: &[Value]) -> Result<Value, OpError> {
    nullary("sum", args)?;
    items("sum", receiver)?
        .iter()
        .try_fold(Value::Int(0), |acc, v| {
            call_ref(&acc, "+", core::slice::from_ref(v))
        })
}

fn join(receiver: &Value, args: &[Value]) -> Result<Value, OpError> {
    check_arity("join", args, 0, 1, "0..1")?;
    let sep = match args.first() {
        Some(sep) => str_arg("join", sep)?,
        None => "",
    };
    let mut out = String::new();
    for (i, item) in items("join", receiver)?.iter().enumerate() {
        if i > 0 {
            out.push_str(sep);
        }
        out.push_str(&alloc::format!("{item}"));
    }
    Ok(Value::Str(out))
}

fn take(receiver: &Value, args: &[Value]) -> Result<Value, OpError> {
    let n = count_arg("take", unary("take", args)?)?;
    let elems = items("take", receiver)?;
    Ok(Value::Array(elems[..n.min(elems.len())].to_vec()))
}

fn drop_first(receiver: &Value, args: &[Value]) -> Result<Value, OpError> {
    let n = count_arg("drop", unary("drop", args)?)?;
    let elems = items("drop", receiver)?;
    Ok(Value::Array(elems[n.min(elems.len())..].to_vec()))
}

fn dedup(elems: &[Value]) -> Vec<Value> {
    let mut out: Vec<Value> = Vec::with_capacity(elems.len());
    for v in elems {
        if !out.contains(v) {
            out.push(v.clone());
        }
    }
    out
}

fn uniq(receiver: &Value, args: &[Value]) -> Result<Value, OpError> {
    nullary("uniq", args)?;
    Ok(Value::Array(dedup(items("uniq", receiver)?)))
}

fn compact(receiver: &Value, args: &[Value]) -> Result<Value, OpError> {
    nullary("compact", args)?;
    let out = items("compact", receiver)?
        .iter()
        .filter(|v| !v.is_nil())
        .cloned()
        .collect();
    Ok(Value::Array(out))
}

fn flatten_into(elems: &[Value], out: &mut Vec<Value>) {
    for v in elems {
        match v {
            Value::Array(inner) => flatten_into(inner, out),
            other => out.push(other.clone()),
        }
    }
}

fn flatten(receiver: &Value, args: &[Value]) -> Result<Value, OpError> {
    nullary("flatten", args)?;
    let mut out = Vec::new();
    flatten_into(items("flatten", receiver)?, &mut out);
    Ok(Value::Array(out))
}

// ============================================================================
// In-place edits
// ============================================================================

fn push(receiver: &mut Value, args: &[Value]) -> Result<Value, OpError> {
    items_mut("push", receiver)?.extend_from_slice(args);
    Ok(receiver.clone())
}

fn shovel(receiver: &mut Value, args: &[Value]) -> Result<Value, OpError> {
    let v = unary("<<", args)?;
    items_mut("<<", receiver)?.push(v.clone());
    Ok(receiver.clone())
}

fn pop(receiver: &mut Value, args: &[Value]) -> Result<Value, OpError> {
    nullary("pop", args)?;
    Ok(items_mut("pop", receiver)?.pop().unwrap_or_default())
}

fn shift(receiver: &mut Value, args: &[Value]) -> Result<Value, OpError> {
    nullary("shift", args)?;
    let elems = items_mut("shift", receiver)?;
    if elems.is_empty() {
        return Ok(Value::Nil);
    }
    Ok(elems.remove(0))
}

fn unshift(receiver: &mut Value, args: &[Value]) -> Result<Value, OpError> {
    items_mut("unshift", receiver)?.splice(0..0, args.iter().cloned());
    Ok(receiver.clone())
}

fn insert(receiver: &mut Value, args: &[Value]) -> Result<Value, OpError> {
    check_arity("insert", args, 1, usize::MAX, "1+")?;
    let at = int_arg("insert", &args[0])?;
    let elems = items_mut("insert", receiver)?;
    let len = elems.len();
    // -1 inserts after the last element
    let position = if at < 0 { at + len as i64 + 1 } else { at };
    if position < 0 {
        return Err(OpError::Index { index: at, len });
    }
    let position = position as usize;
    if position > len {
        elems.resize(position, Value::Nil);
    }
    elems.splice(position..position, args[1..].iter().cloned());
    Ok(receiver.clone())
}

fn concat(receiver: &mut Value, args: &[Value]) -> Result<Value, OpError> {
    let mut extra = Vec::new();
    for arg in args {
        extra.extend_from_slice(array_arg("concat", arg)?);
    }
    items_mut("concat", receiver)?.extend(extra);
    Ok(receiver.clone())
}

fn clear(receiver: &mut Value, args: &[Value]) -> Result<Value, OpError> {
    nullary("clear", args)?;
    items_mut("clear", receiver)?.clear();
    Ok(receiver.clone())
}

fn delete(receiver: &mut Value, args: &[Value]) -> Result<Value, OpError> {
    let needle = unary("delete", args)?;
    let elems = items_mut("delete", receiver)?;
    let before = elems.len();
    elems.retain(|v| v != needle);
    Ok(if elems.len() == before {
        Value::Nil
    } else {
        needle.clone()
    })
}

fn delete_at(receiver: &mut Value, args: &[Value]) -> Result<Value, OpError> {
    let i = int_arg("delete_at", unary("delete_at", args)?)?;
    let elems = items_mut("delete_at", receiver)?;
    Ok(match resolve_index(elems.len(), i) {
        Some(at) => elems.remove(at),
        None => Value::Nil,
    })
}

fn fill(receiver: &mut Value, args: &[Value]) -> Result<Value, OpError> {
    let v = unary("fill", args)?;
    items_mut("fill", receiver)?.fill(v.clone());
    Ok(receiver.clone())
}

fn replace(receiver: &mut Value, args: &[Value]) -> Result<Value, OpError> {
    let with = array_arg("replace", unary("replace", args)?)?.to_vec();
    *items_mut("replace", receiver)? = with;
    Ok(receiver.clone())
}

fn store(receiver: &mut Value, args: &[Value]) -> Result<Value, OpError> {
    check_arity("[]=", args, 2, 2, "2")?;
    let i = int_arg("[]=", &args[0])?;
    let elems = items_mut("[]=", receiver)?;
    let len = elems.len();
    let position = if i < 0 { i + len as i64 } else { i };
    if position < 0 {
        return Err(OpError::Index { index: i, len });
    }
    let position = position as usize;
    if position >= len {
        elems.resize(position + 1, Value::Nil);
    }
    elems[position] = args[1].clone();
    Ok(args[1].clone())
}

fn reverse_bang(receiver: &mut Value, args: &[Value]) -> Result<Value, OpError> {
    nullary("reverse!", args)?;
    items_mut("reverse!", receiver)?.reverse();
    Ok(receiver.clone())
}

fn sort_bang(receiver: &mut Value, args: &[Value]) -> Result<Value, OpError> {
    nullary("sort!", args)?;
    items_mut("sort!", receiver)?.sort();
    Ok(receiver.clone())
}

fn uniq_bang(receiver: &mut Value, args: &[Value]) -> Result<Value, OpError> {
    nullary("uniq!", args)?;
    let elems = items_mut("uniq!", receiver)?;
    let unique = dedup(elems);
    if unique.len() == elems.len() {
        return Ok(Value::Nil);
    }
    *elems = unique;
    Ok(receiver.clone())
}

fn compact_bang(receiver: &mut Value, args: &[Value]) -> Result<Value, OpError> {
    nullary("compact!", args)?;
    let elems = items_mut("compact!", receiver)?;
    let before = elems.len();
    elems.retain(|v| !v.is_nil());
    if elems.len() == before {
        return Ok(Value::Nil);
    }
    Ok(receiver.clone())
}

pub fn register_array_ops(table: &mut OpTable) {
    table.read(Kind::Array, "to_ary", to_ary);
    table.read(Kind::Array, "to_a", to_ary);
    table.read(Kind::Array, "size", size);
    table.read(Kind::Array, "length", size);
    table.read(Kind::Array, "empty?", is_empty);
    table.read(Kind::Array, "[]", index);
    table.read(Kind::Array, "at", at);
    table.read(Kind::Array, "fetch", fetch);
    table.read(Kind::Array, "first", first);
    table.read(Kind::Array, "last", last);
    table.read(Kind::Array, "+", concat_new);
    table.read(Kind::Array, "-", difference);
    table.read(Kind::Array, "*", times);
    table.read(Kind::Array, "include?", includes);
    table.read(Kind::Array, "index", position);
    table.read(Kind::Array, "reverse", reverse);
    table.read(Kind::Array, "sort", sort);
    table.read(Kind::Array, "min", min);
    table.read(Kind::Array, "max", max);
    table.read(Kind::Array, "sum", sum);
    table.read(Kind::Array, "join", join);
    table.read(Kind::Array, "take", take);
    table.read(Kind::Array, "drop", drop_first);
    table.read(Kind::Array, "uniq", uniq);
    table.read(Kind::Array, "compact", compact);
    table.read(Kind::Array, "flatten", flatten);

    table.write(Kind::Array, "push", push);
    table.write(Kind::Array, "append", push);
    table.write(Kind::Array, "<<", shovel);
    table.write(Kind::Array, "pop", pop);
    table.write(Kind::Array, "shift", shift);
    table.write(Kind::Array, "unshift", unshift);
    table.write(Kind::Array, "prepend", unshift);
    table.write(Kind::Array, "insert", insert);
    table.write(Kind::Array, "concat", concat);
    table.write(Kind::Array, "clear", clear);
    table.write(Kind::Array, "delete", delete);
    table.write(Kind::Array, "delete_at", delete_at);
    table.write(Kind::Array, "fill", fill);
    table.write(Kind::Array, "replace", replace);
    table.write(Kind::Array, "[]=", store);
    table.write(Kind::Array, "reverse!", reverse_bang);
    table.write(Kind::Array, "sort!", sort_bang);
    table.write(Kind::Array, "uniq!", uniq_bang);
    table.write(Kind::Array, "compact!", compact_bang);
}
