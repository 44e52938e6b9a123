pub mod traversal;

pub use traversal::{Source, Step, Traversal};
