//! Slack Events API payloads
//!
//! Only the fields the reconciler needs are decoded; everything else in the
//! envelope is ignored.

use serde::Deserialize;

use stats_core::entities::{ReactionKind, ReactionNotification};

/// Outer Events API envelope
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventEnvelope {
    /// Endpoint ownership handshake; the challenge is echoed back verbatim
    UrlVerification { challenge: String },
    EventCallback { event: CallbackEvent },
    #[serde(other)]
    Other,
}

/// Inner event of an `event_callback`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CallbackEvent {
    ReactionAdded(ReactionEvent),
    ReactionRemoved(ReactionEvent),
    #[serde(other)]
    Other,
}

/// `reaction_added` / `reaction_removed` payload
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReactionEvent {
    /// Member who placed or removed the reaction
    pub user: String,
    /// Emoji name without colons, e.g. `+1` or `+1::skin-tone-2`
    pub reaction: String,
    /// Author of the reacted item; absent for some item types
    #[serde(default)]
    pub item_user: String,
}

impl CallbackEvent {
    /// Convert to a reconciler notification
    ///
    /// `None` for non-reaction events and for reactions that are neither a
    /// like nor a dislike.
    pub fn into_notification(self) -> Option<ReactionNotification> {
        match self {
            Self::ReactionAdded(ev) => {
                let kind = ReactionKind::from_token(&ev.reaction)?;
                Some(ReactionNotification::added(ev.user, ev.item_user, kind))
            }
            Self::ReactionRemoved(ev) => {
                let kind = ReactionKind::from_token(&ev.reaction)?;
                Some(ReactionNotification::removed(ev.user, ev.item_user, kind))
            }
            Self::Other => None,
        }
    }
}
