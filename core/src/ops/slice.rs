//! Index and range resolution for sequences (strings and arrays).
//!
//! Sequences index from the start with non-negative positions and from the
//! end with negative ones. A range is a `(start, length)` pair:
//!
//! - a negative `start` counts from the end,
//! - a `start` before the beginning or past the end, or a negative
//!   `length`, yields `nil` rather than an error,
//! - `start == len` yields an empty sequence,
//! - `length` is clamped to what is left.

use alloc::string::String;

use subview_values::Value;

use crate::api::error::ExtractError;

/// Numeric bound: integers as-is, finite floats truncated toward zero.
pub fn bound(value: &Value) -> Option<i64> {
    match value {
        Value::Int(i) => Some(*i),
        Value::Float(x) if x.is_finite() => Some(x.trunc() as i64),
        _ => None,
    }
}

/// Resolve a possibly negative index against a sequence of `len` elements.
pub fn resolve_index(len: usize, index: i64) -> Option<usize> {
    let len = i64::try_from(len).ok()?;
    let index = if index < 0 { index + len } else { index };
    (0..len).contains(&index).then_some(index as usize)
}

/// Resolve `(start, length)` to a half-open element range `start..end`.
pub fn resolve_range(len: usize, start: i64, length: i64) -> Option<(usize, usize)> {
    let len = i64::try_from(len).ok()?;
    let start = if start < 0 { start + len } else { start };
    if start < 0 || start > len || length < 0 {
        return None;
    }
    let end = start.saturating_add(length).min(len);
    Some((start as usize, end as usize))
}

/// `receiver[offset, length]`, the ranged extraction every source builds on.
///
/// Strings slice by character, arrays by element. Maps only take a single
/// key and report an arity error; every other kind has no extraction at all.
pub fn extract_range(
    receiver: &Value,
    offset: &Value,
    length: &Value,
) -> Result<Value, ExtractError> {
    match receiver {
        Value::Str(_) | Value::Array(_) => {
            let (Some(start), Some(count)) = (bound(offset), bound(length)) else {
                return Err(ExtractError::BoundsType);
            };
            Ok(slice_sequence(receiver, start, count))
        }
        Value::Map(_) => Err(ExtractError::Arity { given: 2 }),
        _ => Err(ExtractError::Unsupported),
    }
}

fn slice_sequence(receiver: &Value, start: i64, count: i64) -> Value {
    match receiver {
        Value::Str(s) => {
            let len = s.chars().count();
            match resolve_range(len, start, count) {
                Some((from, to)) => {
                    Value::Str(s.chars().skip(from).take(to - from).collect::<String>())
                }
                None => Value::Nil,
            }
        }
        Value::Array(items) => match resolve_range(items.len(), start, count) {
            Some((from, to)) => Value::Array(items[from..to].to_vec()),
            None => Value::Nil,
        },
        _ => Value::Nil,
    }
}
