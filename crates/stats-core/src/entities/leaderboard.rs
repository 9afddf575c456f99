//! Leaderboard - period leaders by likes and dislikes received

use serde::Serialize;

use super::member::Member;
use crate::value_objects::Period;

/// Derived, never persisted. Both leaders may be the same member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Leaderboard {
    pub period: Period,
    pub most_likes: Member,
    pub most_dislikes: Member,
}
