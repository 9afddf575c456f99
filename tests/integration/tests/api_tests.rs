//! API Integration Tests
//!
//! Each test spawns the full application on an ephemeral port, backed by the
//! in-memory member store and a recording report publisher.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use chrono::Utc;
use integration_tests::{assert_json, assert_status, fixtures::*, TestServer};
use reqwest::StatusCode;
use stats_api::slack::SignatureVerifier;
use stats_core::{CounterPatch, MemberRepository, Period};
use stats_service::RecordingPublisher;

fn current_period() -> Period {
    Period::from_datetime(Utc::now())
}

async fn send(server: &TestServer, payload: &serde_json::Value) {
    let response = server.post_json("/slack/events", payload).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    let ready: ReadinessResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(ready.status, "ready");
    assert_eq!(ready.checks.database, "healthy");
}

// ============================================================================
// Events API Tests
// ============================================================================

#[tokio::test]
async fn test_url_verification_returns_challenge() {
    let server = TestServer::start().await.unwrap();

    let response = server
        .post_json(
            "/slack/events",
            &url_verification("3eZbrw1aBm2rZgRNFdxV2595E9CY3gmdALWMmHkvFXO7tYXAYM8P"),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.text().await.unwrap(),
        "3eZbrw1aBm2rZgRNFdxV2595E9CY3gmdALWMmHkvFXO7tYXAYM8P"
    );
}

#[tokio::test]
async fn test_reactions_are_counted_for_message_author() {
    let server = TestServer::start().await.unwrap();
    let author = unique_member();

    send(&server, &reaction_added("UREACTOR1", "+1", &author)).await;
    send(&server, &reaction_added("UREACTOR2", "+1", &author)).await;
    send(&server, &reaction_added("UREACTOR3", "-1", &author)).await;

    let member = server
        .store
        .find_by_identity(&author, current_period())
        .await
        .unwrap();
    assert_eq!(member.received_likes, 2);
    assert_eq!(member.received_dislikes, 1);

    // The reacting members get no record of their own
    assert!(server
        .store
        .find_by_identity("UREACTOR1", current_period())
        .await
        .unwrap_err()
        .is_not_found());
}

#[tokio::test]
async fn test_reaction_removed_decrements() {
    let server = TestServer::start().await.unwrap();
    let author = unique_member();

    send(&server, &reaction_added("UREACTOR1", "+1", &author)).await;
    send(&server, &reaction_removed("UREACTOR1", "+1", &author)).await;
    // Already at zero, stays at zero
    send(&server, &reaction_removed("UREACTOR1", "+1", &author)).await;

    let member = server
        .store
        .find_by_identity(&author, current_period())
        .await
        .unwrap();
    assert_eq!(member.received_likes, 0);
    assert_eq!(member.received_dislikes, 0);
}

#[tokio::test]
async fn test_skin_tone_variant_counts_as_like() {
    let server = TestServer::start().await.unwrap();
    let author = unique_member();

    send(&server, &reaction_added("UREACTOR1", "+1::skin-tone-3", &author)).await;

    let member = server
        .store
        .find_by_identity(&author, current_period())
        .await
        .unwrap();
    assert_eq!(member.received_likes, 1);
}

#[tokio::test]
async fn test_ignored_reactions_are_acknowledged() {
    let server = TestServer::start().await.unwrap();
    let author = unique_member();

    // Self reaction
    send(&server, &reaction_added(&author, "+1", &author)).await;
    // Reaction on a Slackbot message
    send(&server, &reaction_added("UREACTOR1", "+1", "USLACKBOT")).await;
    // Untracked emoji
    send(&server, &reaction_added("UREACTOR1", "heart", &author)).await;
    // Other event types
    send(&server, &message_event()).await;

    assert!(server.store.is_empty());
}

#[tokio::test]
async fn test_malformed_event_is_rejected() {
    let server = TestServer::start().await.unwrap();

    let response = server.post_raw("/slack/events", "{\"type\": ").await.unwrap();
    let body: ErrorEnvelope = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body.error.code, "INVALID_BODY");
}

#[tokio::test]
async fn test_concurrent_reactions_share_one_record() {
    let server = TestServer::start().await.unwrap();
    let author = unique_member();

    let url = format!("{}/slack/events", server.base_url());
    let handles: Vec<_> = (0..10)
        .map(|i| {
            let client = server.client.clone();
            let url = url.clone();
            let payload = reaction_added(&format!("UREACTOR{i}"), "+1", &author);
            tokio::spawn(async move { client.post(url).json(&payload).send().await })
        })
        .collect();
    for handle in handles {
        let response = handle.await.unwrap().unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let members = server.store.members_in(current_period());
    assert_eq!(members.len(), 1);
    assert_eq!(members[0].received_likes, 10);
}

#[tokio::test]
async fn test_signed_events_are_verified() {
    const SECRET: &str = "integration-signing-secret";
    let server = TestServer::start_signed(SECRET).await.unwrap();
    let signer = SignatureVerifier::new(SECRET).unwrap();
    let author = unique_member();
    let body = reaction_added("UREACTOR1", "+1", &author).to_string();
    let now = Utc::now().timestamp();

    // Valid signature
    let response = server
        .post_signed("/slack/events", &body, now, &signer.sign(now, body.as_bytes()))
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    // Body altered after signing
    let tampered = body.replace("+1", "-1");
    let response = server
        .post_signed("/slack/events", &tampered, now, &signer.sign(now, body.as_bytes()))
        .await
        .unwrap();
    let error: ErrorEnvelope = assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(error.error.code, "INVALID_SIGNATURE");

    // Replayed outside the window
    let stale = now - 600;
    let response = server
        .post_signed("/slack/events", &body, stale, &signer.sign(stale, body.as_bytes()))
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();

    // Unsigned
    let response = server.post_raw("/slack/events", body.clone()).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();

    // Only the first request was counted
    let member = server
        .store
        .find_by_identity(&author, current_period())
        .await
        .unwrap();
    assert_eq!(member.received_likes, 1);
    assert_eq!(member.received_dislikes, 0);
}

// ============================================================================
// Monthly Update Tests
// ============================================================================

#[tokio::test]
async fn test_monthly_update_posts_report() {
    let server = TestServer::start().await.unwrap();
    let period = Period::new(2024, 3).unwrap();
    let now = Utc::now();

    let liked = server.store.create("ULIKED", period, now).await.unwrap();
    let disliked = server.store.create("UDISLIKED", period, now).await.unwrap();
    server
        .store
        .update(liked.id, CounterPatch::likes(9), now)
        .await
        .unwrap();
    server
        .store
        .update(disliked.id, CounterPatch::dislikes(3), now)
        .await
        .unwrap();

    let response = server
        .post_form("/slack/monthly-update", &[("date", "2024-03")])
        .await
        .unwrap();
    let update: MonthlyUpdateResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(update.period, "2024-03");
    assert!(update.text.starts_with("Monthly Stats Update: March 2024"));
    assert!(update.text.contains("<@ULIKED> (9)"));
    assert!(update.text.contains("<@UDISLIKED> (3)"));

    let published = server.publisher.published();
    assert_eq!(published.len(), 1);
    assert_eq!(published[0].period, period);
}

#[tokio::test]
async fn test_monthly_update_defaults_to_previous_month() {
    let server = TestServer::start().await.unwrap();
    let previous = current_period().pred().unwrap();

    server
        .store
        .create("UEARLY", previous, Utc::now())
        .await
        .unwrap();

    let no_fields: [(&str, &str); 0] = [];
    let response = server
        .post_form("/slack/monthly-update", &no_fields)
        .await
        .unwrap();
    let update: MonthlyUpdateResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(update.period, previous.to_string());
    assert_eq!(server.publisher.published().len(), 1);
}

#[tokio::test]
async fn test_monthly_update_without_activity() {
    let server = TestServer::start().await.unwrap();

    let response = server
        .post_form("/slack/monthly-update", &[("date", "2019-06")])
        .await
        .unwrap();
    let body: ErrorEnvelope = assert_json(response, StatusCode::NOT_FOUND).await.unwrap();

    assert_eq!(body.error.code, "NO_ACTIVITY");
    assert!(server.publisher.published().is_empty());
}

#[tokio::test]
async fn test_monthly_update_rejects_bad_dates() {
    let server = TestServer::start().await.unwrap();

    for (date, code) in [
        ("03-2024", "INVALID_PERIOD"),
        ("2024-13", "INVALID_PERIOD"),
        ("2024-3", "VALIDATION_ERROR"),
        ("", "VALIDATION_ERROR"),
    ] {
        let response = server
            .post_form("/slack/monthly-update", &[("date", date)])
            .await
            .unwrap();
        let body: ErrorEnvelope = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
        assert_eq!(body.error.code, code, "date {date:?}");
    }

    assert!(server.publisher.published().is_empty());
}

#[tokio::test]
async fn test_monthly_update_delivery_failure() {
    let server = TestServer::start_with_publisher(RecordingPublisher::failing("channel_not_found"))
        .await
        .unwrap();
    let period = Period::new(2024, 3).unwrap();
    server.store.create("UONE", period, Utc::now()).await.unwrap();

    let response = server
        .post_form("/slack/monthly-update", &[("date", "2024-03")])
        .await
        .unwrap();
    let body: ErrorEnvelope = assert_json(response, StatusCode::BAD_GATEWAY).await.unwrap();

    assert_eq!(body.error.code, "EXTERNAL_SERVICE_ERROR");
    // Upstream detail stays in the logs
    assert!(!body.error.message.contains("channel_not_found"));
}

// ============================================================================
// Leaderboard Tests
// ============================================================================

#[tokio::test]
async fn test_leaderboard_after_reactions() {
    let server = TestServer::start().await.unwrap();
    let popular = unique_member();
    let unpopular = unique_member();

    send(&server, &reaction_added("UREACTOR1", "+1", &popular)).await;
    send(&server, &reaction_added("UREACTOR2", "+1", &popular)).await;
    send(&server, &reaction_added("UREACTOR1", "-1", &unpopular)).await;

    let period = current_period();
    let response = server
        .get(&format!("/api/v1/leaderboards/{period}"))
        .await
        .unwrap();
    let board: LeaderboardResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(board.period, period.to_string());
    assert_eq!(board.most_likes.identity, popular);
    assert_eq!(board.most_likes.received_likes, 2);
    assert_eq!(board.most_dislikes.identity, unpopular);
    assert_eq!(board.most_dislikes.received_dislikes, 1);
    assert!(board.most_likes.id < board.most_dislikes.id);
}

#[tokio::test]
async fn test_leaderboard_bad_period() {
    let server = TestServer::start().await.unwrap();

    let response = server.get("/api/v1/leaderboards/03-2024").await.unwrap();
    let body: ErrorEnvelope = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body.error.code, "INVALID_PERIOD");
}

#[tokio::test]
async fn test_leaderboard_empty_period() {
    let server = TestServer::start().await.unwrap();

    let response = server.get("/api/v1/leaderboards/2019-06").await.unwrap();
    let body: ErrorEnvelope = assert_json(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(body.error.code, "NO_ACTIVITY");
}
