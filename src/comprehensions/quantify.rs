// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::ops::ControlFlow;

use crate::comprehensions::For;
use crate::engine::Bindings;
use crate::errors::Result;
use crate::value::Value;

impl<'a> For<'a> {
    /// Whether `predicate` holds on every passing step. Stops at the first
    /// step where it does not; `true` when no step passes.
    pub fn all<F>(self, predicate: F) -> Result<bool>
    where
        F: Fn(&Bindings<Value>) -> Result<bool>,
    {
        let counterexample = self.fold().search(|b| {
            Ok(if predicate(b)? {
                ControlFlow::Continue(())
            } else {
                ControlFlow::Break(())
            })
        })?;
        Ok(counterexample.is_none())
    }

    /// Whether `predicate` holds on some passing step. Stops at the first
    /// step where it does; `false` when no step passes.
    pub fn any<F>(self, predicate: F) -> Result<bool>
    where
        F: Fn(&Bindings<Value>) -> Result<bool>,
    {
        let witness = self.fold().search(|b| {
            Ok(if predicate(b)? {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            })
        })?;
        Ok(witness.is_some())
    }
}
