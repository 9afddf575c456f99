//! # stats-core
//!
//! Domain layer containing the period value object, member counter entities,
//! reaction notification types, and the member store port.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    CounterDelta, CounterPatch, Leaderboard, Member, ReactionEventKind, ReactionKind,
    ReactionNotification, DISLIKE_TOKEN, LIKE_TOKEN, SLACKBOT_IDENTITY,
};
pub use error::DomainError;
pub use traits::{MemberRepository, RepoResult};
pub use value_objects::Period;
