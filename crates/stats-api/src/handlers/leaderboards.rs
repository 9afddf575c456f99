//! Leaderboard handlers

use axum::{extract::State, Json};
use stats_service::dto::LeaderboardResponse;
use stats_service::LeaderboardService;

use crate::extractors::PeriodPath;
use crate::response::ApiResult;
use crate::state::AppState;

/// Period leaders
///
/// GET /api/v1/leaderboards/{period}
pub async fn get_leaderboard(
    State(state): State<AppState>,
    PeriodPath(period): PeriodPath,
) -> ApiResult<Json<LeaderboardResponse>> {
    let service = LeaderboardService::new(state.service_context());
    let leaderboard = service.compute(period).await?;
    Ok(Json(LeaderboardResponse::from(leaderboard)))
}
