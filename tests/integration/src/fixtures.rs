//! Test fixtures and data generators
//!
//! Slack Events API payloads and the JSON shapes the server answers with.

use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// A Slack-style member ID unique to this test process
pub fn unique_member() -> String {
    format!("U{:08}", unique_suffix())
}

/// `url_verification` handshake payload
pub fn url_verification(challenge: &str) -> Value {
    json!({
        "token": "Jhj5dZrVaK7ZwHHjRyZWjbDl",
        "challenge": challenge,
        "type": "url_verification"
    })
}

fn reaction_event(kind: &str, user: &str, reaction: &str, item_user: &str) -> Value {
    json!({
        "token": "XXYYZZ",
        "team_id": "T123ABC456",
        "api_app_id": "A123ABC456",
        "event": {
            "type": kind,
            "user": user,
            "reaction": reaction,
            "item_user": item_user,
            "item": {
                "type": "message",
                "channel": "C123ABC456",
                "ts": "1360782400.498405"
            },
            "event_ts": "1360782804.083113"
        },
        "type": "event_callback",
        "event_id": format!("Ev{:010}", unique_suffix()),
        "event_time": 1_360_782_804
    })
}

/// `reaction_added` callback: `user` reacted to a message by `item_user`
pub fn reaction_added(user: &str, reaction: &str, item_user: &str) -> Value {
    reaction_event("reaction_added", user, reaction, item_user)
}

/// `reaction_removed` callback
pub fn reaction_removed(user: &str, reaction: &str, item_user: &str) -> Value {
    reaction_event("reaction_removed", user, reaction, item_user)
}

/// A callback for an event type the server does not handle
pub fn message_event() -> Value {
    json!({
        "type": "event_callback",
        "event": {
            "type": "message",
            "channel": "C123ABC456",
            "user": "U123ABC456",
            "text": "hello",
            "ts": "1355517523.000005"
        }
    })
}

/// Member summary as rendered on a leaderboard
#[derive(Debug, Deserialize)]
pub struct MemberSummary {
    pub id: i64,
    pub identity: String,
    pub received_likes: i64,
    pub received_dislikes: i64,
    pub updated_at: String,
}

/// Leaderboard response
#[derive(Debug, Deserialize)]
pub struct LeaderboardResponse {
    pub period: String,
    pub most_likes: MemberSummary,
    pub most_dislikes: MemberSummary,
}

/// Monthly update response
#[derive(Debug, Deserialize)]
pub struct MonthlyUpdateResponse {
    pub period: String,
    pub text: String,
}

/// Readiness response
#[derive(Debug, Deserialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub checks: ReadinessChecks,
}

#[derive(Debug, Deserialize)]
pub struct ReadinessChecks {
    pub database: String,
}

/// Error envelope
#[derive(Debug, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}
