#![warn(clippy::disallowed_types)]

pub use canonical::{CanonicalForm, Classification, FunctionVector, NormalForm};
pub use processor::Processor;
pub use symbols::Operator;

pub mod canonical;
pub mod eval;
pub mod expr_io;
pub mod parser;
pub mod processor;
pub mod truth_table;

mod symbols;
