// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::ops::ControlFlow;

use crate::comprehensions::For;
use crate::engine::Bindings;
use crate::errors::{EngineError, Result};
use crate::value::Value;

impl<'a> For<'a> {
    /// Body of the first passing step; no later step is pulled.
    pub fn first<F>(self, body: F) -> Result<Value>
    where
        F: Fn(&Bindings<Value>) -> Result<Value>,
    {
        self.fold()
            .search(|b| body(b).map(ControlFlow::Break))?
            .ok_or(EngineError::NoContributingStep)
    }

    /// Body of the last passing step. Walks every step.
    pub fn last<F>(self, body: F) -> Result<Value>
    where
        F: Fn(&Bindings<Value>) -> Result<Value>,
    {
        let mut last = None;
        self.fold().search(|b| {
            last = Some(body(b)?);
            Ok(ControlFlow::<()>::Continue(()))
        })?;
        last.ok_or(EngineError::NoContributingStep)
    }
}
