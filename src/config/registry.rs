// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::FunctionConfig;
use crate::engine::Bindings;
use crate::errors::{EngineError, Result};
use crate::value::Value;

/// A resolved function: reads its arguments from the bindings by name.
pub type Function = Box<dyn Fn(&Bindings<Value>) -> Result<Value>>;

/// The built-in functions a run definition may reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    Identity,
    Square,
    Cube,
    Negate,
    Add,
    Multiply,
    Pair,
    Ord,
    String,
    Even,
    Odd,
    Positive,
    Always,
}

/// How many arguments a builtin accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exactly(usize),
    AtLeast(usize),
}

impl Arity {
    pub fn accepts(&self, count: usize) -> bool {
        match *self {
            Arity::Exactly(n) => count == n,
            Arity::AtLeast(n) => count >= n,
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Arity::Exactly(n) => n.to_string(),
            Arity::AtLeast(n) => format!("at least {}", n),
        }
    }
}

impl Builtin {
    pub const ALL: [Builtin; 13] = [
        Builtin::Identity,
        Builtin::Square,
        Builtin::Cube,
        Builtin::Negate,
        Builtin::Add,
        Builtin::Multiply,
        Builtin::Pair,
        Builtin::Ord,
        Builtin::String,
        Builtin::Even,
        Builtin::Odd,
        Builtin::Positive,
        Builtin::Always,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|builtin| builtin.name() == name)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Builtin::Identity => "identity",
            Builtin::Square => "square",
            Builtin::Cube => "cube",
            Builtin::Negate => "negate",
            Builtin::Add => "add",
            Builtin::Multiply => "multiply",
            Builtin::Pair => "pair",
            Builtin::Ord => "ord",
            Builtin::String => "string",
            Builtin::Even => "even",
            Builtin::Odd => "odd",
            Builtin::Positive => "positive",
            Builtin::Always => "always",
        }
    }

    pub fn arity(&self) -> Arity {
        match self {
            Builtin::Always => Arity::Exactly(0),
            Builtin::Add | Builtin::Multiply | Builtin::Pair => Arity::AtLeast(1),
            _ => Arity::Exactly(1),
        }
    }

    /// Apply the builtin to already-resolved arguments.
    ///
    /// Argument counts are checked during validation; a short argument list
    /// here is reported as a type mismatch against `none`.
    pub fn call(&self, args: &[&Value]) -> Result<Value> {
        let first = || args.first().copied().ok_or_else(missing_argument);
        match self {
            Builtin::Identity => Ok(first()?.clone()),
            Builtin::Square => {
                let x = first()?;
                x.mul(x)
            }
            Builtin::Cube => {
                let x = first()?;
                x.mul(x)?.mul(x)
            }
            Builtin::Negate => match first()? {
                Value::Int(i) => i
                    .checked_neg()
                    .map(Value::Int)
                    .ok_or(EngineError::Overflow { op: "-" }),
                Value::Float(f) => Ok(Value::Float(-f)),
                other => Err(EngineError::TypeMismatch {
                    expected: "number",
                    found: other.kind().to_string(),
                }),
            },
            Builtin::Add => fold_args(args, Value::add),
            Builtin::Multiply => fold_args(args, Value::mul),
            Builtin::Pair => Ok(Value::tuple(args.iter().map(|arg| (*arg).clone()))),
            Builtin::Ord => {
                let text = first()?.as_str()?;
                let mut chars = text.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Ok(Value::Int(i64::from(u32::from(c)))),
                    _ => Err(EngineError::TypeMismatch {
                        expected: "single character",
                        found: format!("str of length {}", text.chars().count()),
                    }),
                }
            }
            Builtin::String => match first()? {
                Value::Str(s) => Ok(Value::Str(s.clone())),
                other => Ok(Value::Str(other.to_string())),
            },
            Builtin::Even => Ok(Value::Bool(first()?.as_int()? % 2 == 0)),
            Builtin::Odd => Ok(Value::Bool(first()?.as_int()? % 2 != 0)),
            Builtin::Positive => Ok(Value::Bool(first()?.as_float()? > 0.0)),
            Builtin::Always => Ok(Value::Bool(true)),
        }
    }
}

fn missing_argument() -> EngineError {
    EngineError::TypeMismatch {
        expected: "argument",
        found: Value::None.kind().to_string(),
    }
}

fn fold_args(args: &[&Value], op: fn(&Value, &Value) -> Result<Value>) -> Result<Value> {
    let (first, rest) = args.split_first().ok_or_else(missing_argument)?;
    rest.iter().try_fold((*first).clone(), |acc, arg| op(&acc, arg))
}

/// Resolves function references from run definitions into callable functions.
pub struct FunctionRegistry;

impl FunctionRegistry {
    /// Resolve a function reference.
    ///
    /// Returns `None` for a name that is not a builtin. Arguments are looked up
    /// by name on every call, so an argument that names no variable fails the
    /// run with [`EngineError::UnboundVariable`].
    pub fn create_function(config: &FunctionConfig) -> Option<Function> {
        let builtin = Builtin::from_name(&config.name)?;
        let args = config.args.clone();
        Some(Box::new(move |bindings: &Bindings<Value>| {
            let values = args
                .iter()
                .map(|arg| bindings.get(arg))
                .collect::<Result<Vec<_>>>()?;
            builtin.call(&values)
        }))
    }

    /// List all available builtin names
    pub fn list_available_functions() -> Vec<&'static str> {
        Builtin::ALL.iter().map(Builtin::name).collect()
    }

    pub fn is_function_available(name: &str) -> bool {
        Builtin::from_name(name).is_some()
    }
}
