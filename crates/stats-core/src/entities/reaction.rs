//! Reaction notification - a decoded reaction-added / reaction-removed event

use serde::{Deserialize, Serialize};

/// Platform token counted as a like
pub const LIKE_TOKEN: &str = "+1";

/// Platform token counted as a dislike
pub const DISLIKE_TOKEN: &str = "-1";

/// Slack's system account; items it posts never collect counts
pub const SLACKBOT_IDENTITY: &str = "USLACKBOT";

/// Which counter a reaction affects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReactionKind {
    Like,
    Dislike,
}

impl ReactionKind {
    /// Map a platform reaction token to a counted kind.
    ///
    /// Skin tone modifiers (`+1::skin-tone-3`) count as the base token.
    /// Unrecognized tokens yield `None` and must not change any counter.
    pub fn from_token(token: &str) -> Option<Self> {
        let base = token.split("::").next().unwrap_or(token);
        match base {
            LIKE_TOKEN => Some(Self::Like),
            DISLIKE_TOKEN => Some(Self::Dislike),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Like => "like",
            Self::Dislike => "dislike",
        }
    }
}

/// Whether the reaction was placed or withdrawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReactionEventKind {
    Added,
    Removed,
}

impl ReactionEventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Added => "added",
            Self::Removed => "removed",
        }
    }
}

/// A reaction notification as handed over by the transport layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionNotification {
    pub event: ReactionEventKind,
    /// Member who placed or removed the reaction
    pub reacting_identity: String,
    /// Author of the item being reacted to; the one whose counters change
    pub target_identity: String,
    pub reaction: ReactionKind,
}

impl ReactionNotification {
    pub fn added(
        reacting: impl Into<String>,
        target: impl Into<String>,
        reaction: ReactionKind,
    ) -> Self {
        Self {
            event: ReactionEventKind::Added,
            reacting_identity: reacting.into(),
            target_identity: target.into(),
            reaction,
        }
    }

    pub fn removed(
        reacting: impl Into<String>,
        target: impl Into<String>,
        reaction: ReactionKind,
    ) -> Self {
        Self {
            event: ReactionEventKind::Removed,
            reacting_identity: reacting.into(),
            target_identity: target.into(),
            reaction,
        }
    }

    #[inline]
    pub fn is_self_reaction(&self) -> bool {
        self.reacting_identity == self.target_identity
    }
}
