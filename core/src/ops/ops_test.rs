use super::*;
use crate::api::error::OpError;
use alloc::vec;
use pretty_assertions::assert_eq;

fn ok(receiver: &Value, op: &str, args: &[Value]) -> Value {
    call_ref(receiver, op, args).unwrap()
}

#[test]
fn test_lookup_walks_kind_ancestry() {
    let table = table();
    // Int finds Numeric's `==`, which shadows Object's.
    assert!(table.lookup(Kind::Int, "+").is_some());
    assert!(table.lookup(Kind::Int, "inspect").is_some());
    assert!(table.lookup(Kind::Int, "push").is_none());
    assert!(table.lookup(Kind::Array, "push").unwrap().is_write());
    assert!(!table.lookup(Kind::Array, "+").unwrap().is_write());

    let names = table.names(Kind::Float);
    assert!(names.contains(&"abs"));
    assert!(names.contains(&"respond_to?"));
    assert!(names.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_undefined_operation() {
    let err = call_ref(&Value::Int(1), "upcase", &[]).unwrap_err();
    assert_eq!(
        err,
        OpError::Undefined {
            op: "upcase".into(),
            receiver: "Int"
        }
    );
    assert_eq!(err.to_string(), "undefined method `upcase' for Int");
}

#[test]
fn test_object_equality_and_type_tests() {
    let s = Value::str("abc");
    assert_eq!(ok(&s, "==", &[Value::str("abc")]), Value::Bool(true));
    assert_eq!(ok(&s, "!=", &[Value::str("abd")]), Value::Bool(true));
    assert_eq!(ok(&s, "===", &[Value::str("abc")]), Value::Bool(true));
    assert_eq!(ok(&s, "is_a?", &[Value::Kind(Kind::Object)]), Value::Bool(true));
    assert_eq!(ok(&s, "kind_of?", &[Value::Kind(Kind::Str)]), Value::Bool(true));
    assert_eq!(
        ok(&s, "instance_of?", &[Value::Kind(Kind::Object)]),
        Value::Bool(false)
    );
    assert_eq!(ok(&s, "class", &[]), Value::Kind(Kind::Str));
    assert_eq!(ok(&Value::Nil, "nil?", &[]), Value::Bool(true));
    assert_eq!(ok(&Value::Nil, "!", &[]), Value::Bool(true));
    assert_eq!(ok(&s, "respond_to?", &[Value::str("upcase")]), Value::Bool(true));
    assert_eq!(ok(&s, "respond_to?", &[Value::str("push")]), Value::Bool(false));
}

#[test]
fn test_object_comparison() {
    let a = Value::str("a");
    assert_eq!(ok(&a, "<=>", &[Value::str("b")]), Value::Int(-1));
    assert_eq!(ok(&a, "<=>", &[Value::str("a")]), Value::Int(0));
    assert_eq!(ok(&a, "<=>", &[Value::Int(1)]), Value::Nil);
    assert_eq!(ok(&Value::Int(1), "=~", &[Value::str("1")]), Value::Nil);
}

#[test]
fn test_object_conversions() {
    assert_eq!(ok(&Value::Float(1.0), "to_s", &[]), Value::str("1.0"));
    assert_eq!(ok(&Value::str("x"), "inspect", &[]), Value::str("\"x\""));
    assert_eq!(ok(&Value::Nil, "to_s", &[]), Value::str(""));
    let v = Value::from(vec![1, 2]);
    assert_eq!(ok(&v, "itself", &[]), v);
    assert_eq!(ok(&v, "hash", &[]), ok(&v.clone(), "hash", &[]));
}

#[test]
fn test_numeric_arithmetic() {
    let seven = Value::Int(7);
    assert_eq!(ok(&seven, "+", &[Value::Int(2)]), Value::Int(9));
    assert_eq!(ok(&seven, "/", &[Value::Int(2)]), Value::Int(3));
    assert_eq!(ok(&Value::Int(-7), "/", &[Value::Int(2)]), Value::Int(-4));
    assert_eq!(ok(&Value::Int(-7), "%", &[Value::Int(3)]), Value::Int(2));
    assert_eq!(ok(&seven, "+", &[Value::Float(0.5)]), Value::Float(7.5));
    assert_eq!(
        ok(&Value::Int(i64::MAX), "+", &[Value::Int(1)]),
        Value::Float(i64::MAX as f64 + 1.0)
    );
    assert_eq!(
        call_ref(&seven, "/", &[Value::Int(0)]),
        Err(OpError::ZeroDivision)
    );
    assert_eq!(
        call_ref(&seven, "+", &[Value::str("1")]),
        Err(OpError::ArgumentType {
            op: "+".into(),
            expected: "Numeric",
            found: "Str"
        })
    );
}

#[test]
fn test_numeric_comparison() {
    let one = Value::Int(1);
    assert_eq!(ok(&one, "==", &[Value::Float(1.0)]), Value::Bool(true));
    assert_eq!(ok(&one, "!=", &[Value::Float(1.0)]), Value::Bool(false));
    assert_eq!(ok(&one, "==", &[Value::str("1")]), Value::Bool(false));
    assert_eq!(ok(&one, "<=>", &[Value::Float(2.0)]), Value::Int(-1));
    assert_eq!(ok(&one, "<=>", &[Value::str("1")]), Value::Nil);
    assert_eq!(ok(&one, "<", &[Value::Int(2)]), Value::Bool(true));
    assert_eq!(ok(&one, ">=", &[Value::Int(1)]), Value::Bool(true));
    assert_eq!(ok(&Value::Float(-2.5), "abs", &[]), Value::Float(2.5));
    assert_eq!(ok(&Value::Float(2.9), "to_i", &[]), Value::Int(2));
}

#[test]
fn test_string_queries() {
    let s = Value::str("héllo");
    assert_eq!(ok(&s, "size", &[]), Value::Int(5));
    assert_eq!(ok(&s, "[]", &[Value::Int(1), Value::Int(3)]), Value::str("éll"));
    assert_eq!(ok(&s, "[]", &[Value::Int(-1)]), Value::str("o"));
    assert_eq!(ok(&s, "[]", &[Value::Int(9)]), Value::Nil);
    assert_eq!(ok(&s, "upcase", &[]), Value::str("HÉLLO"));
    assert_eq!(ok(&s, "+", &[Value::str("!")]), Value::str("héllo!"));
    assert_eq!(ok(&s, "index", &[Value::str("l")]), Value::Int(2));
    assert_eq!(ok(&s, "=~", &[Value::str("lo")]), Value::Int(3));
    assert_eq!(ok(&s, "=~", &[Value::str("z")]), Value::Nil);
    assert_eq!(ok(&Value::str("ab"), "*", &[Value::Int(3)]), Value::str("ababab"));
}

#[test]
fn test_string_edits_mutate_only_through_call() {
    let mut s = Value::str("abc");
    assert_eq!(call(&mut s, "<<", &[Value::str("d")]).unwrap(), Value::str("abcd"));
    assert_eq!(s, Value::str("abcd"));

    call(&mut s, "insert", &[Value::Int(-1), Value::str("!")]).unwrap();
    assert_eq!(s, Value::str("abcd!"));

    // No change reports nil, like the bang methods everywhere.
    let mut upper = Value::str("ABC");
    assert_eq!(call(&mut upper, "upcase!", &[]).unwrap(), Value::Nil);

    let original = Value::str("abc");
    assert_eq!(ok(&original, "upcase!", &[]), Value::str("ABC"));
    assert_eq!(original, Value::str("abc"));
}

#[test]
fn test_array_queries() {
    let a = Value::from(vec![2, 4, 6, 8, 10]);
    assert_eq!(
        ok(&a, "[]", &[Value::Int(-3), Value::Int(2)]),
        Value::from(vec![6, 8])
    );
    assert_eq!(ok(&a, "[]", &[Value::Int(-1)]), Value::Int(10));
    assert_eq!(ok(&a, "first", &[]), Value::Int(2));
    assert_eq!(ok(&a, "last", &[Value::Int(2)]), Value::from(vec![8, 10]));
    assert_eq!(ok(&a, "sum", &[]), Value::Int(30));
    assert_eq!(ok(&a, "include?", &[Value::Int(6)]), Value::Bool(true));
    assert_eq!(ok(&a, "take", &[Value::Int(2)]), Value::from(vec![2, 4]));
    assert_eq!(ok(&a, "drop", &[Value::Int(4)]), Value::from(vec![10]));
    assert_eq!(
        call_ref(&a, "fetch", &[Value::Int(5)]),
        Err(OpError::Index { index: 5, len: 5 })
    );
}

#[test]
fn test_array_combinators() {
    let a = Value::from(vec![3, 1, 2, 1]);
    assert_eq!(ok(&a, "sort", &[]), Value::from(vec![1, 1, 2, 3]));
    assert_eq!(ok(&a, "uniq", &[]), Value::from(vec![3, 1, 2]));
    assert_eq!(ok(&a, "-", &[Value::from(vec![1])]), Value::from(vec![3, 2]));
    assert_eq!(ok(&a, "max", &[]), Value::Int(3));
    assert_eq!(
        ok(&a, "+", &[Value::from(vec![9])]),
        Value::from(vec![3, 1, 2, 1, 9])
    );
    assert_eq!(ok(&a, "*", &[Value::str(",")]), Value::str("3,1,2,1"));

    let mixed = Value::array([Value::Int(1), Value::Float(2.5)]);
    assert_eq!(ok(&mixed, "sum", &[]), Value::Float(3.5));

    let nested = Value::array([
        Value::Int(1),
        Value::Nil,
        Value::from(vec![Value::Int(2), Value::from(vec![3])]),
    ]);
    assert_eq!(ok(&nested, "flatten", &[]), Value::array([
        Value::Int(1),
        Value::Nil,
        Value::Int(2),
        Value::Int(3)
    ]));
    assert_eq!(ok(&nested, "compact", &[]).as_array().unwrap().len(), 2);
    assert_eq!(ok(&nested, "join", &[Value::str("-")]), Value::str("1--[2, [3]]"));
}

#[test]
fn test_repetition() {
    let too_big = || OpError::Argument {
        op: "*".into(),
        message: "argument too big".into(),
    };

    let a = Value::from(vec![1, 2]);
    assert_eq!(ok(&a, "*", &[Value::Int(2)]), Value::from(vec![1, 2, 1, 2]));
    assert_eq!(ok(&a, "*", &[Value::Int(0)]), Value::Array(vec![]));
    assert_eq!(
        call_ref(&Value::from(vec![1]), "*", &[Value::Int(-1)]),
        Err(OpError::Argument {
            op: "*".into(),
            message: "negative array size (-1)".into(),
        })
    );
    assert_eq!(
        call_ref(&Value::from(vec![1]), "*", &[Value::Int(i64::MAX)]),
        Err(too_big())
    );
    let empty = Value::Array(vec![]);
    assert_eq!(ok(&empty, "*", &[Value::Int(i64::MAX)]), empty);

    assert_eq!(
        call_ref(&Value::str("ab"), "*", &[Value::Int(i64::MAX)]),
        Err(too_big())
    );
    assert_eq!(
        call_ref(&Value::str("ab"), "*", &[Value::Int(-2)]),
        Err(OpError::Argument {
            op: "*".into(),
            message: "negative argument".into(),
        })
    );
    assert_eq!(ok(&Value::str(""), "*", &[Value::Int(i64::MAX)]), Value::str(""));
}

#[test]
fn test_array_edits() {
    let mut a = Value::from(vec![1, 2]);
    call(&mut a, "push", &[Value::Int(3), Value::Int(4)]).unwrap();
    assert_eq!(a, Value::from(vec![1, 2, 3, 4]));
    assert_eq!(call(&mut a, "pop", &[]).unwrap(), Value::Int(4));
    assert_eq!(call(&mut a, "shift", &[]).unwrap(), Value::Int(1));
    assert_eq!(a, Value::from(vec![2, 3]));

    call(&mut a, "insert", &[Value::Int(-1), Value::Int(9)]).unwrap();
    assert_eq!(a, Value::from(vec![2, 3, 9]));

    call(&mut a, "[]=", &[Value::Int(5), Value::Int(7)]).unwrap();
    assert_eq!(
        a,
        Value::array([
            Value::Int(2),
            Value::Int(3),
            Value::Int(9),
            Value::Nil,
            Value::Nil,
            Value::Int(7)
        ])
    );
    assert_eq!(call(&mut a, "compact!", &[]).unwrap(), Value::from(vec![2, 3, 9, 7]));
    assert_eq!(call(&mut a, "compact!", &[]).unwrap(), Value::Nil);
    assert_eq!(call(&mut a, "delete", &[Value::Int(42)]).unwrap(), Value::Nil);
    call(&mut a, "clear", &[]).unwrap();
    assert_eq!(a, Value::Array(vec![]));
}

#[test]
fn test_map_operations() {
    let m = Value::map([("a", 1), ("b", 2)]);
    assert_eq!(ok(&m, "[]", &[Value::str("a")]), Value::Int(1));
    assert_eq!(ok(&m, "[]", &[Value::str("z")]), Value::Nil);
    assert_eq!(ok(&m, "keys", &[]), Value::from(vec!["a", "b"]));
    assert_eq!(ok(&m, "key?", &[Value::str("b")]), Value::Bool(true));
    assert_eq!(
        call_ref(&m, "fetch", &[Value::str("z")]),
        Err(OpError::KeyNotFound { key: "\"z\"".into() })
    );
    assert_eq!(
        call_ref(&m, "[]", &[Value::Int(0), Value::Int(1)]),
        Err(OpError::Arity {
            op: "[]".into(),
            given: 2,
            expected: "1"
        })
    );

    let mut m = m;
    call(&mut m, "[]=", &[Value::str("c"), Value::Int(3)]).unwrap();
    assert_eq!(call(&mut m, "delete", &[Value::str("a")]).unwrap(), Value::Int(1));
    assert_eq!(m, Value::map([("b", 2), ("c", 3)]));
}

#[test]
fn test_class_operations() {
    let numeric = Value::Kind(Kind::Numeric);
    assert_eq!(ok(&numeric, "===", &[Value::Int(3)]), Value::Bool(true));
    assert_eq!(ok(&numeric, "===", &[Value::str("3")]), Value::Bool(false));
    assert_eq!(ok(&Value::Kind(Kind::Int), "superclass", &[]), numeric);
    assert_eq!(ok(&Value::Kind(Kind::Object), "superclass", &[]), Value::Nil);
    assert_eq!(ok(&numeric, "name", &[]), Value::str("Numeric"));
}

#[test]
fn test_responds_to() {
    assert!(responds_to(&Value::from(vec![1]), "push"));
    assert!(responds_to(&Value::Int(1), "to_s"));
    assert!(!responds_to(&Value::Int(1), "push"));
    assert!(!responds_to(&Value::Nil, "to_ary"));
}
