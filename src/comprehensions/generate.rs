// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::comprehensions::For;
use crate::engine::{Bindings, Generator};
use crate::errors::Result;
use crate::value::Value;

impl<'a> For<'a> {
    /// Lazy sequence of body results. Sources are only pulled as items are requested.
    pub fn generate<F>(self, body: F) -> Result<Generator<'a, Value, Value>>
    where
        F: Fn(&Bindings<Value>) -> Result<Value> + 'a,
    {
        self.fold().generate(body)
    }
}
