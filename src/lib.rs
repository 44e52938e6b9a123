// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod comprehensions; // ready-made folds over Value
pub mod config;         // run definitions + registry
pub mod engine;         // bindings, traversals, driver
pub mod errors;         // error handling
pub mod observability;
pub mod traits;         // traversal abstraction
pub mod value;          // dynamic values

pub use value::Value;
