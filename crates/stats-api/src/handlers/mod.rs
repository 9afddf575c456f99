//! Route handlers
//!
//! All HTTP request handlers organized by concern.

pub mod health;
pub mod leaderboards;
pub mod slack;
