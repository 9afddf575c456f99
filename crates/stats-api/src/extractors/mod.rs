//! Axum extractors for request handling
//!
//! Custom extractors for validated form bodies and period path parameters.

mod path;
mod validated;

pub use path::PeriodPath;
pub use validated::ValidatedForm;
