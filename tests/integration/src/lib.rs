//! Integration test utilities for the stats server
//!
//! Runs the full HTTP application against the in-memory member store and a
//! recording report publisher, so no external services are needed.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
