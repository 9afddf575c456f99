//! Value objects - immutable domain primitives

mod period;

pub use period::Period;
