//! Arithmetic and comparison for `Int` and `Float`.
//!
//! Mixed `Int`/`Float` operands promote to `Float`. Integer operations that
//! overflow also fall back to `Float` instead of wrapping.

use core::cmp::Ordering;

use subview_values::{Kind, Value};

use super::object::ordering_value;
use super::{OpTable, nullary, type_error, unary};
use crate::api::error::OpError;

#[derive(Clone, Copy)]
enum Num {
    Int(i64),
    Float(f64),
}

impl Num {
    fn of(value: &Value) -> Option<Num> {
        match value {
            Value::Int(i) => Some(Num::Int(*i)),
            Value::Float(x) => Some(Num::Float(*x)),
            _ => None,
        }
    }

    fn as_f64(self) -> f64 {
        match self {
            Num::Int(i) => i as f64,
            Num::Float(x) => x,
        }
    }
}

fn operands(op: &str, receiver: &Value, args: &[Value]) -> Result<(Num, Num), OpError> {
    let other = unary(op, args)?;
    let lhs = Num::of(receiver).ok_or_else(|| type_error(op, "Numeric", receiver))?;
    let rhs = Num::of(other).ok_or_else(|| type_error(op, "Numeric", other))?;
    Ok((lhs, rhs))
}

fn arith(
    op: &str,
    receiver: &Value,
    args: &[Value],
    int: fn(i64, i64) -> Option<i64>,
    float: fn(f64, f64) -> f64,
) -> Result<Value, OpError> {
    Ok(match operands(op, receiver, args)? {
        (Num::Int(a), Num::Int(b)) => match int(a, b) {
            Some(n) => Value::Int(n),
            None => Value::Float(float(a as f64, b as f64)),
        },
        (a, b) => Value::Float(float(a.as_f64(), b.as_f64())),
    })
}

fn add(receiver: &Value, args: &[Value]) -> Result<Value, OpError> {
    arith("+", receiver, args, i64::checked_add, |a, b| a + b)
}

fn sub(receiver: &Value, args: &[Value]) -> Result<Value, OpError> {
    arith("-", receiver, args, i64::checked_sub, |a, b| a - b)
}

fn mul(receiver: &Value, args: &[Value]) -> Result<Value, OpError> {
    arith("*", receiver, args, i64::checked_mul, |a, b| a * b)
}

/// Integer division floors toward negative infinity.
fn div(receiver: &Value, args: &[Value]) -> Result<Value, OpError> {
    if let (Num::Int(_), Num::Int(0)) = operands("/", receiver, args)? {
        return Err(OpError::ZeroDivision);
    }
    arith("/", receiver, args, floor_div, |a, b| a / b)
}

/// Modulo takes the sign of the divisor.
fn rem(receiver: &Value, args: &[Value]) -> Result<Value, OpError> {
    if let (Num::Int(_), Num::Int(0)) = operands("%", receiver, args)? {
        return Err(OpError::ZeroDivision);
    }
    arith("%", receiver, args, floor_mod, |a, b| {
        let r = a % b;
        if r != 0.0 && (r < 0.0) != (b < 0.0) { r + b } else { r }
    })
}

fn floor_div(a: i64, b: i64) -> Option<i64> {
    let q = a.checked_div(b)?;
    if a % b != 0 && (a < 0) != (b < 0) {
        q.checked_sub(1)
    } else {
        Some(q)
    }
}

fn floor_mod(a: i64, b: i64) -> Option<i64> {
    let r = a.checked_rem(b)?;
    if r != 0 && (r < 0) != (b < 0) {
        Some(r + b)
    } else {
        Some(r)
    }
}

fn compare(op: &str, receiver: &Value, args: &[Value]) -> Result<Option<Ordering>, OpError> {
    Ok(match operands(op, receiver, args)? {
        (Num::Int(a), Num::Int(b)) => Some(a.cmp(&b)),
        (a, b) => a.as_f64().partial_cmp(&b.as_f64()),
    })
}

fn eq(receiver: &Value, args: &[Value]) -> Result<Value, OpError> {
    let other = unary("==", args)?;
    if Num::of(other).is_none() {
        return Ok(Value::Bool(false));
    }
    Ok(Value::Bool(compare("==", receiver, args)? == Some(Ordering::Equal)))
}

fn spaceship(receiver: &Value, args: &[Value]) -> Result<Value, OpError> {
    let other = unary("<=>", args)?;
    if Num::of(other).is_none() {
        return Ok(Value::Nil);
    }
    Ok(ordering_value(compare("<=>", receiver, args)?))
}

fn lt(receiver: &Value, args: &[Value]) -> Result<Value, OpError> {
    Ok(Value::Bool(compare("<", receiver, args)? == Some(Ordering::Less)))
}

fn le(receiver: &Value, args: &[Value]) -> Result<Value, OpError> {
    let ord = compare("<=", receiver, args)?;
    Ok(Value::Bool(matches!(ord, Some(Ordering::Less | Ordering::Equal))))
}

fn gt(receiver: &Value, args: &[Value]) -> Result<Value, OpError> {
    Ok(Value::Bool(compare(">", receiver, args)? == Some(Ordering::Greater)))
}

fn ge(receiver: &Value, args: &[Value]) -> Result<Value, OpError> {
    let ord = compare(">=", receiver, args)?;
    Ok(Value::Bool(matches!(ord, Some(Ordering::Greater | Ordering::Equal))))
}

fn abs(receiver: &Value, args: &[Value]) -> Result<Value, OpError> {
    nullary("abs", args)?;
    Ok(match receiver {
        Value::Int(i) => i
            .checked_abs()
            .map_or(Value::Float((*i as f64).abs()), Value::Int),
        Value::Float(x) => Value::Float(x.abs()),
        other => return Err(type_error("abs", "Numeric", other)),
    })
}

fn is_zero(receiver: &Value, args: &[Value]) -> Result<Value, OpError> {
    nullary("zero?", args)?;
    let num = Num::of(receiver).ok_or_else(|| type_error("zero?", "Numeric", receiver))?;
    Ok(Value::Bool(num.as_f64() == 0.0))
}

fn to_i(receiver: &Value, args: &[Value]) -> Result<Value, OpError> {
    nullary("to_i", args)?;
    match receiver {
        Value::Int(i) => Ok(Value::Int(*i)),
        Value::Float(x) if x.is_finite() => Ok(Value::Int(x.trunc() as i64)),
        Value::Float(x) => Err(OpError::Argument {
            op: "to_i".into(),
            message: alloc::format!("{x} is not finite"),
        }),
        other => Err(type_error("to_i", "Numeric", other)),
    }
}

fn to_f(receiver: &Value, args: &[Value]) -> Result<Value, OpError> {
    nullary("to_f", args)?;
    let num = Num::of(receiver).ok_or_else(|| type_error("to_f", "Numeric", receiver))?;
    Ok(Value::Float(num.as_f64()))
}

pub fn register_numeric_ops(table: &mut OpTable) {
    table.read(Kind::Numeric, "+", add);
    table.read(Kind::Numeric, "-", sub);
    table.read(Kind::Numeric, "*", mul);
    table.read(Kind::Numeric, "/", div);
    table.read(Kind::Numeric, "%", rem);
    table.read(Kind::Numeric, "==", eq);
    table.read(Kind::Numeric, "<=>", spaceship);
    table.read(Kind::Numeric, "<", lt);
    table.read(Kind::Numeric, "<=", le);
    table.read(Kind::Numeric, ">", gt);
    table.read(Kind::Numeric, ">=", ge);
    table.read(Kind::Numeric, "abs", abs);
    table.read(Kind::Numeric, "zero?", is_zero);
    table.read(Kind::Numeric, "to_i", to_i);
    table.read(Kind::Numeric, "to_f", to_f);
}
