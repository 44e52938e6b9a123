// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::{BTreeMap, BTreeSet};

use crate::comprehensions::For;
use crate::engine::Bindings;
use crate::errors::{EngineError, Result};
use crate::value::Value;

// Each step rebuilds the collection from the previous one, so building n
// items costs O(n^2) copies.
impl<'a> For<'a> {
    pub fn list<F>(self, body: F) -> Result<Value>
    where
        F: Fn(&Bindings<Value>) -> Result<Value> + 'a,
    {
        self.collect(Value::List(Vec::new()), move |items, b| {
            items.add(&Value::List(vec![body(b)?]))
        })
    }

    pub fn tuple<F>(self, body: F) -> Result<Value>
    where
        F: Fn(&Bindings<Value>) -> Result<Value> + 'a,
    {
        self.collect(Value::Tuple(Vec::new()), move |items, b| {
            items.add(&Value::tuple([body(b)?]))
        })
    }

    /// Distinct body results, in `Value` order.
    pub fn set<F>(self, body: F) -> Result<Value>
    where
        F: Fn(&Bindings<Value>) -> Result<Value> + 'a,
    {
        self.collect(Value::Set(BTreeSet::new()), move |items, b| match items {
            Value::Set(items) => {
                let mut items = items.clone();
                items.insert(body(b)?);
                Ok(Value::Set(items))
            }
            other => Err(EngineError::TypeMismatch {
                expected: "set",
                found: other.kind().to_string(),
            }),
        })
    }

    /// Map built from `(key, value)` body results. A repeated key keeps the
    /// value from its last passing step.
    pub fn map<F>(self, body: F) -> Result<Value>
    where
        F: Fn(&Bindings<Value>) -> Result<(Value, Value)> + 'a,
    {
        self.collect(Value::Map(BTreeMap::new()), move |entries, b| match entries {
            Value::Map(entries) => {
                let (key, value) = body(b)?;
                let mut entries = entries.clone();
                entries.insert(key, value);
                Ok(Value::Map(entries))
            }
            other => Err(EngineError::TypeMismatch {
                expected: "map",
                found: other.kind().to_string(),
            }),
        })
    }
}
