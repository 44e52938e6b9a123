pub mod bindings;
pub mod driver;
pub mod exhaustive;
pub mod factory;
pub mod filter;
pub mod generator;
pub mod projector;
mod stepper;
pub mod synchronized;
pub mod update;
#[cfg(test)]
mod integration_tests;

pub use bindings::Bindings;
pub use driver::{Comprehension, Operation};
pub use exhaustive::Exhaustive;
pub use factory::{Strategy, TraversalFactory};
pub use filter::{Filter, Predicate};
pub use generator::Generator;
pub use projector::Projector;
pub use synchronized::Synchronized;
pub use update::{transform, Body, Transform, Update, UpdateMode};
