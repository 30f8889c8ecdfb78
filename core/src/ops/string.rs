//! `Str` operations.
//!
//! Positions and lengths are in characters, not bytes.

use alloc::{string::String, vec::Vec};

use subview_values::{Kind, Value};

use super::slice::{extract_range, resolve_index};
use super::{
    OpTable, check_arity, int_arg, nullary, receiver_error, repeat_len, str_arg, too_big,
    type_error, unary,
};
use crate::api::error::{ExtractError, OpError};

fn text<'a>(op: &str, receiver: &'a Value) -> Result<&'a str, OpError> {
    receiver.as_str().ok_or_else(|| receiver_error(op, receiver))
}

fn text_mut<'a>(op: &str, receiver: &'a mut Value) -> Result<&'a mut String, OpError> {
    match receiver {
        Value::Str(s) => Ok(s),
        other => Err(receiver_error(op, other)),
    }
}

/// Character index of the first occurrence of `needle`.
fn char_index(haystack: &str, needle: &str) -> Option<usize> {
    haystack
        .find(needle)
        .map(|byte| haystack[..byte].chars().count())
}

// ============================================================================
// Queries
// ============================================================================

fn to_str(receiver: &Value, args: &[Value]) -> Result<Value, OpError> {
    nullary("to_str", args)?;
    Ok(Value::str(text("to_str", receiver)?))
}

fn size(receiver: &Value, args: &[Value]) -> Result<Value, OpError> {
    nullary("size", args)?;
    Ok(Value::Int(text("size", receiver)?.chars().count() as i64))
}

fn is_empty(receiver: &Value, args: &[Value]) -> Result<Value, OpError> {
    nullary("empty?", args)?;
    Ok(Value::Bool(text("empty?", receiver)?.is_empty()))
}

/// `s[i]` or `s[start, length]`.
fn index(receiver: &Value, args: &[Value]) -> Result<Value, OpError> {
    check_arity("[]", args, 1, 2, "1..2")?;
    let s = text("[]", receiver)?;
    if let [offset, length] = args {
        return extract_range(receiver, offset, length).map_err(|err| match err {
            ExtractError::BoundsType => {
                let bad = if int_arg("[]", offset).is_err() { offset } else { length };
                type_error("[]", "Int", bad)
            }
            _ => receiver_error("[]", receiver),
        });
    }
    let i = int_arg("[]", &args[0])?;
    let chars: Vec<char> = s.chars().collect();
    Ok(match resolve_index(chars.len(), i) {
        Some(at) => Value::Str(chars[at].into()),
        None => Value::Nil,
    })
}

fn add(receiver: &Value, args: &[Value]) -> Result<Value, OpError> {
    let other = str_arg("+", unary("+", args)?)?;
    let mut out = String::from(text("+", receiver)?);
    out.push_str(other);
    Ok(Value::Str(out))
}

fn repeat(receiver: &Value, args: &[Value]) -> Result<Value, OpError> {
    let times = int_arg("*", unary("*", args)?)?;
    if times < 0 {
        return Err(OpError::Argument {
            op: "*".into(),
            message: "negative argument".into(),
        });
    }
    let times = usize::try_from(times).map_err(|_| too_big("*"))?;
    let s = text("*", receiver)?;
    let len = repeat_len("*", s.len(), times, 1)?;
    let mut out = String::new();
    out.try_reserve_exact(len).map_err(|_| too_big("*"))?;
    if !s.is_empty() {
        out.extend(core::iter::repeat_n(s, times));
    }
    Ok(Value::Str(out))
}

fn upcase(receiver: &Value, args: &[Value]) -> Result<Value, OpError> {
    nullary("upcase", args)?;
    Ok(Value::Str(text("upcase", receiver)?.to_uppercase()))
}

fn downcase(receiver: &Value, args: &[Value]) -> Result<Value, OpError> {
    nullary("downcase", args)?;
    Ok(Value::Str(text("downcase", receiver)?.to_lowercase()))
}

fn reverse(receiver: &Value, args: &[Value]) -> Result<Value, OpError> {
    nullary("reverse", args)?;
    Ok(Value::Str(text("reverse", receiver)?.chars().rev().collect()))
}

fn strip(receiver: &Value, args: &[Value]) -> Result<Value, OpError> {
    nullary("strip", args)?;
    Ok(Value::str(text("strip", receiver)?.trim()))
}

fn chars(receiver: &Value, args: &[Value]) -> Result<Value, OpError> {
    nullary("chars", args)?;
    let s = text("chars", receiver)?;
    Ok(Value::Array(s.chars().map(|c| Value::Str(c.into())).collect()))
}

fn includes(receiver: &Value, args: &[Value]) -> Result<Value, OpError> {
    let needle = str_arg("include?", unary("include?", args)?)?;
    Ok(Value::Bool(text("include?", receiver)?.contains(needle)))
}

fn starts_with(receiver: &Value, args: &[Value]) -> Result<Value, OpError> {
    let prefix = str_arg("start_with?", unary("start_with?", args)?)?;
    Ok(Value::Bool(text("start_with?", receiver)?.starts_with(prefix)))
}

fn ends_with(receiver: &Value, args: &[Value]) -> Result<Value, OpError> {
    let suffix = str_arg("end_with?", unary("end_with?", args)?)?;
    Ok(Value::Bool(text("end_with?", receiver)?.ends_with(suffix)))
}

fn find(receiver: &Value, args: &[Value]) -> Result<Value, OpError> {
    let needle = str_arg("index", unary("index", args)?)?;
    let at = char_index(text("index", receiver)?, needle);
    Ok(Value::from(at.map(|i| i as i64)))
}

/// Literal pattern match: character position of the first match, or `nil`.
fn pattern_match(receiver: &Value, args: &[Value]) -> Result<Value, OpError> {
    let pattern = str_arg("=~", unary("=~", args)?)?;
    let at = char_index(text("=~", receiver)?, pattern);
    Ok(Value::from(at.map(|i| i as i64)))
}

// ============================================================================
// In-place edits
// ============================================================================

fn append(receiver: &mut Value, args: &[Value]) -> Result<Value, OpError> {
    check_arity("concat", args, 1, usize::MAX, "1+")?;
    let s = text_mut("concat", receiver)?;
    for arg in args {
        s.push_str(str_arg("concat", arg)?);
    }
    Ok(receiver.clone())
}

fn clear(receiver: &mut Value, args: &[Value]) -> Result<Value, OpError> {
    nullary("clear", args)?;
    text_mut("clear", receiver)?.clear();
    Ok(receiver.clone())
}

fn replace(receiver: &mut Value, args: &[Value]) -> Result<Value, OpError> {
    let with = str_arg("replace", unary("replace", args)?)?;
    *text_mut("replace", receiver)? = with.into();
    Ok(receiver.clone())
}

fn insert(receiver: &mut Value, args: &[Value]) -> Result<Value, OpError> {
    check_arity("insert", args, 2, 2, "2")?;
    let at = int_arg("insert", &args[0])?;
    let piece = str_arg("insert", &args[1])?;
    let s = text_mut("insert", receiver)?;
    let len = s.chars().count();
    // -1 inserts at the very end
    let position = if at < 0 { at + len as i64 + 1 } else { at };
    if position < 0 || position > len as i64 {
        return Err(OpError::Index { index: at, len });
    }
    let byte = s
        .char_indices()
        .nth(position as usize)
        .map_or(s.len(), |(b, _)| b);
    s.insert_str(byte, piece);
    Ok(receiver.clone())
}

fn prepend(receiver: &mut Value, args: &[Value]) -> Result<Value, OpError> {
    let piece = str_arg("prepend", unary("prepend", args)?)?;
    text_mut("prepend", receiver)?.insert_str(0, piece);
    Ok(receiver.clone())
}

fn transform_in_place(
    op: &str,
    receiver: &mut Value,
    args: &[Value],
    f: fn(&str) -> String,
) -> Result<Value, OpError> {
    nullary(op, args)?;
    let s = text_mut(op, receiver)?;
    let changed = f(s);
    if changed == *s {
        return Ok(Value::Nil);
    }
    *s = changed;
    Ok(receiver.clone())
}

fn upcase_bang(receiver: &mut Value, args: &[Value]) -> Result<Value, OpError> {
    transform_in_place("upcase!", receiver, args, str::to_uppercase)
}

fn downcase_bang(receiver: &mut Value, args: &[Value]) -> Result<Value, OpError> {
    transform_in_place("downcase!", receiver, args, str::to_lowercase)
}

fn reverse_bang(receiver: &mut Value, args: &[Value]) -> Result<Value, OpError> {
    nullary("reverse!", args)?;
    let s = text_mut("reverse!", receiver)?;
    *s = s.chars().rev().collect();
    Ok(receiver.clone())
}

fn strip_bang(receiver: &mut Value, args: &[Value]) -> Result<Value, OpError> {
    transform_in_place("strip!", receiver, args, |s| s.trim().into())
}

/// Strings are always UTF-8 here; only the argument count is checked.
fn force_encoding(receiver: &mut Value, args: &[Value]) -> Result<Value, OpError> {
    unary("force_encoding", args)?;
    text_mut("force_encoding", receiver)?;
    Ok(receiver.clone())
}

pub fn register_string_ops(table: &mut OpTable) {
    table.read(Kind::Str, "to_str", to_str);
    table.read(Kind::Str, "size", size);
    table.read(Kind::Str, "length", size);
    table.read(Kind::Str, "empty?", is_empty);
    table.read(Kind::Str, "[]", index);
    table.read(Kind::Str, "+", add);
    table.read(Kind::Str, "*", repeat);
    table.read(Kind::Str, "upcase", upcase);
    table.read(Kind::Str, "downcase", downcase);
    table.read(Kind::Str, "reverse", reverse);
    table.read(Kind::Str, "strip", strip);
    table.read(Kind::Str, "chars", chars);
    table.read(Kind::Str, "include?", includes);
    table.read(Kind::Str, "start_with?", starts_with);
    table.read(Kind::Str, "end_with?", ends_with);
    table.read(Kind::Str, "index", find);
    table.read(Kind::Str, "=~", pattern_match);

    table.write(Kind::Str, "<<", append);
    table.write(Kind::Str, "concat", append);
    table.write(Kind::Str, "clear", clear);
    table.write(Kind::Str, "replace", replace);
    table.write(Kind::Str, "insert", insert);
    table.write(Kind::Str, "prepend", prepend);
    table.write(Kind::Str, "upcase!", upcase_bang);
    table.write(Kind::Str, "downcase!", downcase_bang);
    table.write(Kind::Str, "reverse!", reverse_bang);
    table.write(Kind::Str, "strip!", strip_bang);
    table.write(Kind::Str, "force_encoding", force_encoding);
}
