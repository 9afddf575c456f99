//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use stats_core::entities::{Leaderboard, Member};

use super::responses::{LeaderboardResponse, MemberSummary, MonthlyUpdateResponse};
use crate::services::MonthlyReport;

impl From<&Member> for MemberSummary {
    fn from(member: &Member) -> Self {
        Self {
            id: member.id,
            identity: member.identity.clone(),
            received_likes: member.received_likes,
            received_dislikes: member.received_dislikes,
            updated_at: member.updated_at,
        }
    }
}

impl From<&Leaderboard> for LeaderboardResponse {
    fn from(board: &Leaderboard) -> Self {
        Self {
            period: board.period,
            most_likes: MemberSummary::from(&board.most_likes),
            most_dislikes: MemberSummary::from(&board.most_dislikes),
        }
    }
}

impl From<Leaderboard> for LeaderboardResponse {
    fn from(board: Leaderboard) -> Self {
        Self::from(&board)
    }
}

impl From<&MonthlyReport> for MonthlyUpdateResponse {
    fn from(report: &MonthlyReport) -> Self {
        Self {
            period: report.period,
            text: report.to_text(),
        }
    }
}
