//! Leaderboard service
//!
//! Read-only aggregation over the member store for one period.

use tracing::{debug, instrument};

use stats_core::entities::Leaderboard;
use stats_core::value_objects::Period;

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Leaderboard service
pub struct LeaderboardService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> LeaderboardService<'a> {
    /// Create a new LeaderboardService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Most-liked and most-disliked members of `period`
    ///
    /// Ties go to the lowest member ID. A period without records yields
    /// `DomainError::NoActivity`.
    #[instrument(skip(self))]
    pub async fn compute(&self, period: Period) -> ServiceResult<Leaderboard> {
        let repo = self.ctx.member_repo();
        let most_likes = repo.most_likes(period).await?;
        let most_dislikes = repo.most_dislikes(period).await?;

        debug!(
            most_likes = %most_likes.identity,
            most_dislikes = %most_dislikes.identity,
            "Leaderboard computed"
        );

        Ok(Leaderboard {
            period,
            most_likes,
            most_dislikes,
        })
    }
}
