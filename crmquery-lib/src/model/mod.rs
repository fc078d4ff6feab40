//! Condition value model

pub mod types;
mod value;

pub use value::*;
