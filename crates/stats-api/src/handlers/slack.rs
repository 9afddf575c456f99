//! Slack handlers
//!
//! Events API intake and the monthly update trigger.

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use stats_service::dto::{MonthlyUpdateForm, MonthlyUpdateResponse};
use stats_service::{MonthlyReportService, ReactionReconciler};
use tracing::{debug, warn};

use crate::extractors::ValidatedForm;
use crate::response::{ApiError, ApiResult};
use crate::slack::EventEnvelope;
use crate::state::AppState;

/// Slack Events API endpoint
///
/// POST /slack/events
///
/// Answers the `url_verification` handshake and reconciles reaction events.
/// Any other event type is acknowledged and dropped. When a signing secret is
/// configured, requests must carry a valid `X-Slack-Signature` (401 otherwise).
pub async fn handle_events(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<Response> {
    if let Some(verifier) = state.verifier() {
        verifier.verify(&headers, &body, Utc::now()).map_err(|e| {
            warn!(error = %e, "Rejected Slack request");
            ApiError::Unauthorized(e)
        })?;
    }

    let envelope: EventEnvelope =
        serde_json::from_slice(&body).map_err(|e| ApiError::invalid_body(e.to_string()))?;

    match envelope {
        EventEnvelope::UrlVerification { challenge } => {
            Ok(([(header::CONTENT_TYPE, "text/plain")], challenge).into_response())
        }
        EventEnvelope::EventCallback { event } => {
            if let Some(notification) = event.into_notification() {
                let outcome = ReactionReconciler::new(state.service_context())
                    .reconcile(&notification, Utc::now())
                    .await?;
                debug!(?outcome, "Reaction event handled");
            }
            Ok(StatusCode::OK.into_response())
        }
        EventEnvelope::Other => Ok(StatusCode::OK.into_response()),
    }
}

/// Build and post the monthly report
///
/// POST /slack/monthly-update
///
/// Form field `date` (`YYYY-MM`) selects the period; the previous month when
/// omitted.
pub async fn monthly_update(
    State(state): State<AppState>,
    ValidatedForm(form): ValidatedForm<MonthlyUpdateForm>,
) -> ApiResult<Json<MonthlyUpdateResponse>> {
    let period = form.period(Utc::now())?;

    let service = MonthlyReportService::new(state.service_context());
    let report = service.publish_for(period).await?;

    Ok(Json(MonthlyUpdateResponse::from(&report)))
}
