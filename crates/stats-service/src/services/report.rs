//! Monthly report builder
//!
//! Turns a computed leaderboard into a human-readable summary. No I/O.

use serde::Serialize;
use serde_json::{json, Value};

use stats_core::entities::{Leaderboard, Member};
use stats_core::value_objects::Period;

/// Heading placed before the long period name
pub const REPORT_HEADING: &str = "Monthly Stats Update";

/// Rendered monthly summary, ready for delivery
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyReport {
    pub period: Period,
    pub title: String,
    pub lines: Vec<String>,
}

impl MonthlyReport {
    /// Plain text rendering: title, then one line per leader
    pub fn to_text(&self) -> String {
        std::iter::once(self.title.as_str())
            .chain(self.lines.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Slack Block Kit rendering: a header block and one mrkdwn section per line
    pub fn to_slack_blocks(&self) -> Value {
        let mut blocks = vec![json!({
            "type": "header",
            "text": { "type": "plain_text", "text": self.title },
        })];
        blocks.extend(self.lines.iter().map(|line| {
            json!({
                "type": "section",
                "text": { "type": "mrkdwn", "text": line },
            })
        }));
        Value::Array(blocks)
    }
}

/// Builds [`MonthlyReport`]s from leaderboards
pub struct ReportBuilder;

impl ReportBuilder {
    pub fn build(leaderboard: &Leaderboard) -> MonthlyReport {
        MonthlyReport {
            period: leaderboard.period,
            title: format!("{REPORT_HEADING}: {}", leaderboard.period.long_name()),
            lines: vec![
                format!(
                    "Most likes received this month: {} ({})",
                    mention(&leaderboard.most_likes),
                    leaderboard.most_likes.received_likes
                ),
                format!(
                    "Most dislikes received this month: {} ({})",
                    mention(&leaderboard.most_dislikes),
                    leaderboard.most_dislikes.received_dislikes
                ),
            ],
        }
    }
}

fn mention(member: &Member) -> String {
    format!("<@{}>", member.identity)
}
