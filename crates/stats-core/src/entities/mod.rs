//! Domain entities - core business objects

mod leaderboard;
mod member;
mod reaction;

pub use leaderboard::Leaderboard;
pub use member::{CounterDelta, CounterPatch, Member};
pub use reaction::{
    ReactionEventKind, ReactionKind, ReactionNotification, DISLIKE_TOKEN, LIKE_TOKEN,
    SLACKBOT_IDENTITY,
};
