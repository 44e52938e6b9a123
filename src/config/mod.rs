// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod loader;
mod registry;
mod runtime;
mod validation;


pub use loader::{
    load_and_validate_config, load_config, AccumulatorConfig, Config, FunctionConfig, Kind,
    RangeConfig, SourceConfig,
};
pub use registry::{Arity, Builtin, Function, FunctionRegistry};
pub use runtime::Runtime;
pub use validation::validate_config;
