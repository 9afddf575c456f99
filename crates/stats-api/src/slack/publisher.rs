//! Slack Web API report delivery
//!
//! Posts monthly reports with `chat.postMessage`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, instrument};

use stats_common::SlackConfig;
use stats_service::{MonthlyReport, ReportPublisher, ServiceError, ServiceResult};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Serialize)]
struct PostMessage<'a> {
    channel: &'a str,
    /// Fallback for notifications and clients without block support
    text: String,
    blocks: Value,
}

#[derive(Deserialize)]
struct ApiReply {
    ok: bool,
    #[serde(default)]
    error: Option<String>,
}

/// Delivers reports to one Slack channel
#[derive(Clone)]
pub struct SlackPublisher {
    client: Client,
    api_base: String,
    bot_token: String,
    channel_id: String,
}

impl SlackPublisher {
    /// Create a publisher from Slack configuration
    pub fn new(config: &SlackConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            bot_token: config.bot_token.clone(),
            channel_id: config.channel_id.clone(),
        })
    }

    fn post_message_url(&self) -> String {
        format!("{}/chat.postMessage", self.api_base)
    }
}

impl std::fmt::Debug for SlackPublisher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlackPublisher")
            .field("api_base", &self.api_base)
            .field("bot_token", &"***")
            .field("channel_id", &self.channel_id)
            .finish()
    }
}

#[async_trait]
impl ReportPublisher for SlackPublisher {
    #[instrument(skip(self, report), fields(period = %report.period, channel = %self.channel_id))]
    async fn publish(&self, report: &MonthlyReport) -> ServiceResult<()> {
        let message = PostMessage {
            channel: &self.channel_id,
            text: report.to_text(),
            blocks: report.to_slack_blocks(),
        };

        let response = self
            .client
            .post(self.post_message_url())
            .bearer_auth(&self.bot_token)
            .json(&message)
            .send()
            .await
            .map_err(|e| ServiceError::external(format!("chat.postMessage request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ServiceError::external(format!(
                "chat.postMessage returned {status}"
            )));
        }

        // Slack reports most failures as 200 with ok=false
        let reply: ApiReply = response
            .json()
            .await
            .map_err(|e| ServiceError::external(format!("chat.postMessage reply unreadable: {e}")))?;
        if !reply.ok {
            return Err(ServiceError::external(
                reply.error.unwrap_or_else(|| "unknown_error".to_string()),
            ));
        }

        info!("Report posted to Slack");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::{extract::State, http::HeaderMap, http::StatusCode, routing::post, Json, Router};
    use chrono::{TimeZone, Utc};
    use parking_lot::Mutex;
    use serde_json::json;
    use stats_core::entities::{Leaderboard, Member};
    use stats_core::value_objects::Period;
    use stats_service::ReportBuilder;
    use tokio::net::TcpListener;

    #[derive(Clone, Default)]
    struct FakeSlack {
        received: Arc<Mutex<Vec<(Option<String>, Value)>>>,
    }

    /// Serve a fake Web API answering every call with `reply`
    async fn fake_slack(status: StatusCode, reply: Value) -> (String, FakeSlack) {
        let fake = FakeSlack::default();
        let app = Router::new()
            .route(
                "/api/chat.postMessage",
                post(
                    move |State(fake): State<FakeSlack>, headers: HeaderMap, Json(body): Json<Value>| {
                        let reply = reply.clone();
                        async move {
                            let auth = headers
                                .get("authorization")
                                .and_then(|v| v.to_str().ok())
                                .map(String::from);
                            fake.received.lock().push((auth, body));
                            (status, Json(reply))
                        }
                    },
                ),
            )
            .with_state(fake.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        (format!("http://{addr}/api/"), fake)
    }

    fn publisher(api_base: String) -> SlackPublisher {
        SlackPublisher::new(&SlackConfig {
            signing_secret: None,
            bot_token: "xoxb-test".to_string(),
            channel_id: "C0STATS".to_string(),
            api_base,
        })
        .unwrap()
    }

    fn report() -> MonthlyReport {
        let period = Period::new(2024, 3).unwrap();
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        let mut member = Member::new(1, "U1", period, now);
        member.received_likes = 9;
        ReportBuilder::build(&Leaderboard {
            period,
            most_likes: member.clone(),
            most_dislikes: member,
        })
    }

    #[tokio::test]
    async fn test_publish_posts_blocks_with_bearer_token() {
        let (base, fake) = fake_slack(StatusCode::OK, json!({ "ok": true })).await;

        publisher(base).publish(&report()).await.unwrap();

        let received = fake.received.lock().clone();
        assert_eq!(received.len(), 1);
        let (auth, body) = &received[0];
        assert_eq!(auth.as_deref(), Some("Bearer xoxb-test"));
        assert_eq!(body["channel"], "C0STATS");
        assert!(body["text"]
            .as_str()
            .unwrap()
            .starts_with("Monthly Stats Update: March 2024"));
        assert_eq!(body["blocks"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_publish_reports_slack_error() {
        let (base, _fake) =
            fake_slack(StatusCode::OK, json!({ "ok": false, "error": "channel_not_found" })).await;

        let err = publisher(base).publish(&report()).await.unwrap_err();
        assert!(matches!(err, ServiceError::External(ref msg) if msg == "channel_not_found"));
    }

    #[tokio::test]
    async fn test_publish_reports_http_failure() {
        let (base, _fake) = fake_slack(StatusCode::INTERNAL_SERVER_ERROR, json!({})).await;

        let err = publisher(base).publish(&report()).await.unwrap_err();
        assert_eq!(err.status_code(), 502);
        assert!(err.to_string().contains("500"));
    }

    #[tokio::test]
    async fn test_publish_unreachable_host() {
        // Bind then drop to get a port nobody listens on
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = publisher(format!("http://{addr}"))
            .publish(&report())
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::External(_)));
    }

    #[test]
    fn test_debug_hides_token() {
        let debug = format!("{:?}", publisher("https://slack.com/api".to_string()));
        assert!(!debug.contains("xoxb-test"));
        assert!(debug.contains("C0STATS"));
    }
}
