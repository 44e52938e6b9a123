// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Dynamic values for the ready-made comprehensions and for YAML run definitions.
//!
//! `Value` is totally ordered so that it can live in a set or serve as a map
//! key: values are ordered first by kind (in declaration order of the
//! variants) and then by content, with floats compared by IEEE total order.
//! Values of different kinds are never equal, so `Int(1) != Float(1.0)`.

use serde::Deserialize;
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::errors::{EngineError, Result};

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Value {
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<Value>),
    Tuple(Vec<Value>),
    Set(BTreeSet<Value>),
    Map(BTreeMap<Value, Value>),
}

impl Value {
    /// Short name of the value's kind, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::None => "none",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "str",
            Value::List(_) => "list",
            Value::Tuple(_) => "tuple",
            Value::Set(_) => "set",
            Value::Map(_) => "map",
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Value::None => 0,
            Value::Bool(_) => 1,
            Value::Int(_) => 2,
            Value::Float(_) => 3,
            Value::Str(_) => 4,
            Value::List(_) => 5,
            Value::Tuple(_) => 6,
            Value::Set(_) => 7,
            Value::Map(_) => 8,
        }
    }

    pub fn tuple(items: impl IntoIterator<Item = Value>) -> Value {
        Value::Tuple(items.into_iter().collect())
    }

    pub fn as_int(&self) -> Result<i64> {
        match self {
            Value::Int(i) => Ok(*i),
            other => Err(other.mismatch("int")),
        }
    }

    /// Numeric value as a float; ints are widened.
    pub fn as_float(&self) -> Result<f64> {
        match self {
            Value::Float(f) => Ok(*f),
            Value::Int(i) => Ok(*i as f64),
            other => Err(other.mismatch("float")),
        }
    }

    pub fn as_bool(&self) -> Result<bool> {
        match self {
            Value::Bool(b) => Ok(*b),
            other => Err(other.mismatch("bool")),
        }
    }

    pub fn as_str(&self) -> Result<&str> {
        match self {
            Value::Str(s) => Ok(s),
            other => Err(other.mismatch("str")),
        }
    }

    fn mismatch(&self, expected: &'static str) -> EngineError {
        EngineError::TypeMismatch {
            expected,
            found: self.kind().to_string(),
        }
    }

    fn invalid(&self, op: &'static str, other: &Value) -> EngineError {
        EngineError::InvalidOperands {
            op,
            left: self.kind().to_string(),
            right: other.kind().to_string(),
        }
    }

    /// `+`: numeric addition (int + float widens), or concatenation of strings,
    /// lists and tuples.
    pub fn add(&self, other: &Value) -> Result<Value> {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a
                .checked_add(*b)
                .map(Value::Int)
                .ok_or(EngineError::Overflow { op: "+" }),
            (Value::Int(_) | Value::Float(_), Value::Int(_) | Value::Float(_)) => {
                Ok(Value::Float(self.as_float()? + other.as_float()?))
            }
            (Value::Str(a), Value::Str(b)) => Ok(Value::Str(format!("{}{}", a, b))),
            (Value::List(a), Value::List(b)) => Ok(Value::List(concat(a, b))),
            (Value::Tuple(a), Value::Tuple(b)) => Ok(Value::Tuple(concat(a, b))),
            _ => Err(self.invalid("+", other)),
        }
    }

    /// `*`: numeric multiplication (int * float widens).
    pub fn mul(&self, other: &Value) -> Result<Value> {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a
                .checked_mul(*b)
                .map(Value::Int)
                .ok_or(EngineError::Overflow { op: "*" }),
            (Value::Int(_) | Value::Float(_), Value::Int(_) | Value::Float(_)) => {
                Ok(Value::Float(self.as_float()? * other.as_float()?))
            }
            _ => Err(self.invalid("*", other)),
        }
    }
}

fn concat(a: &[Value], b: &[Value]) -> Vec<Value> {
    a.iter().chain(b.iter()).cloned().collect()
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Value::None, Value::None) => Ordering::Equal,
            (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
            (Value::Int(a), Value::Int(b)) => a.cmp(b),
            (Value::Float(a), Value::Float(b)) => a.total_cmp(b),
            (Value::Str(a), Value::Str(b)) => a.cmp(b),
            (Value::List(a), Value::List(b)) | (Value::Tuple(a), Value::Tuple(b)) => a.cmp(b),
            (Value::Set(a), Value::Set(b)) => a.cmp(b),
            (Value::Map(a), Value::Map(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Value {}

fn write_seq<'v>(
    f: &mut fmt::Formatter<'_>,
    items: impl Iterator<Item = &'v Value>,
) -> fmt::Result {
    for (i, item) in items.enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::None => write!(f, "None"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{:?}", x),
            Value::Str(s) => write!(f, "{:?}", s),
            Value::List(items) => {
                write!(f, "[")?;
                write_seq(f, items.iter())?;
                write!(f, "]")
            }
            Value::Tuple(items) => {
                write!(f, "(")?;
                write_seq(f, items.iter())?;
                if items.len() == 1 {
                    write!(f, ",")?;
                }
                write!(f, ")")
            }
            Value::Set(items) if items.is_empty() => write!(f, "set()"),
            Value::Set(items) => {
                write!(f, "{{")?;
                write_seq(f, items.iter())?;
                write!(f, "}}")
            }
            Value::Map(entries) => {
                write!(f, "{{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", key, value)?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<char> for Value {
    fn from(c: char) -> Self {
        Value::Str(c.to_string())
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl<A: Into<Value>, B: Into<Value>> From<(A, B)> for Value {
    fn from((a, b): (A, B)) -> Self {
        Value::Tuple(vec![a.into(), b.into()])
    }
}

impl From<BTreeSet<Value>> for Value {
    fn from(items: BTreeSet<Value>) -> Self {
        Value::Set(items)
    }
}

impl From<BTreeMap<Value, Value>> for Value {
    fn from(entries: BTreeMap<Value, Value>) -> Self {
        Value::Map(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_promotes_and_concatenates() {
        assert_eq!(Value::Int(2).add(&Value::Int(3)), Ok(Value::Int(5)));
        assert_eq!(Value::Int(2).add(&Value::Float(0.5)), Ok(Value::Float(2.5)));
        assert_eq!(Value::from("ab").add(&Value::from("c")), Ok(Value::from("abc")));
        assert_eq!(
            Value::List(vec![1.into()]).add(&Value::List(vec![2.into()])),
            Ok(Value::List(vec![1.into(), 2.into()]))
        );
    }

    #[test]
    fn test_mismatched_operands_are_rejected() {
        assert_eq!(
            Value::Int(1).add(&Value::from("x")),
            Err(EngineError::InvalidOperands {
                op: "+",
                left: "int".to_string(),
                right: "str".to_string(),
            })
        );
        assert!(Value::from("x").mul(&Value::Int(2)).is_err());
    }

    #[test]
    fn test_integer_overflow_is_reported() {
        assert_eq!(
            Value::Int(i64::MAX).add(&Value::Int(1)),
            Err(EngineError::Overflow { op: "+" })
        );
        assert_eq!(
            Value::Int(i64::MAX).mul(&Value::Int(2)),
            Err(EngineError::Overflow { op: "*" })
        );
    }

    #[test]
    fn test_ordering_is_total() {
        let mut set = BTreeSet::new();
        for v in [Value::Float(f64::NAN), Value::Float(1.0), Value::Int(1), Value::None] {
            set.insert(v);
        }
        set.insert(Value::Float(f64::NAN));
        assert_eq!(set.len(), 4);
        assert_ne!(Value::Int(1), Value::Float(1.0));
        assert!(Value::None < Value::Bool(false));
    }

    #[test]
    fn test_display() {
        let tuple = Value::from((1, "a"));
        assert_eq!(tuple.to_string(), r#"(1, "a")"#);
        assert_eq!(Value::tuple([Value::Int(1)]).to_string(), "(1,)");
        assert_eq!(Value::Set(BTreeSet::new()).to_string(), "set()");
        let map: BTreeMap<Value, Value> = [(Value::Int(1), Value::Int(1)), (Value::Int(2), Value::Int(4))]
            .into_iter()
            .collect();
        assert_eq!(Value::Map(map).to_string(), "{1: 1, 2: 4}");
    }

    #[test]
    fn test_deserializes_from_yaml() {
        let values: Vec<Value> = serde_yaml::from_str("[1, 2.5, true, null, abc, [1, 2], {k: 3}]").unwrap();
        assert_eq!(values[0], Value::Int(1));
        assert_eq!(values[1], Value::Float(2.5));
        assert_eq!(values[2], Value::Bool(true));
        assert_eq!(values[3], Value::None);
        assert_eq!(values[4], Value::from("abc"));
        assert_eq!(values[5], Value::List(vec![1.into(), 2.into()]));
        let expected: BTreeMap<Value, Value> = [(Value::from("k"), Value::Int(3))].into_iter().collect();
        assert_eq!(values[6], Value::Map(expected));
    }

    #[test]
    fn test_accessors_report_kind() {
        assert_eq!(Value::Int(3).as_float(), Ok(3.0));
        assert_eq!(
            Value::from("x").as_int(),
            Err(EngineError::TypeMismatch {
                expected: "int",
                found: "str".to_string(),
            })
        );
    }
}
