// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::comprehensions::For;
use crate::engine::Bindings;
use crate::errors::Result;
use crate::value::Value;

impl<'a> For<'a> {
    /// `0 + body(step) + ...` over the passing steps.
    pub fn sum<F>(self, body: F) -> Result<Value>
    where
        F: Fn(&Bindings<Value>) -> Result<Value> + 'a,
    {
        self.collect(Value::Int(0), move |total, b| total.add(&body(b)?))
    }

    /// `1 * body(step) * ...` over the passing steps.
    pub fn product<F>(self, body: F) -> Result<Value>
    where
        F: Fn(&Bindings<Value>) -> Result<Value> + 'a,
    {
        self.collect(Value::Int(1), move |total, b| total.mul(&body(b)?))
    }
}
