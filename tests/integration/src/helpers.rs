//! Test helpers for integration tests
//!
//! Provides a server spawned on an ephemeral port plus request and
//! assertion utilities.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use reqwest::{Client, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use stats_api::slack::SignatureVerifier;
use stats_api::{create_app, AppState};
use stats_db::InMemoryMemberRepository;
use stats_service::{RecordingPublisher, ServiceContextBuilder};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    pub store: Arc<InMemoryMemberRepository>,
    pub publisher: Arc<RecordingPublisher>,
    handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a server whose report deliveries succeed
    pub async fn start() -> Result<Self> {
        Self::start_with_publisher(RecordingPublisher::new()).await
    }

    /// Start a server with a specific publisher
    pub async fn start_with_publisher(publisher: RecordingPublisher) -> Result<Self> {
        Self::spawn(publisher, None).await
    }

    /// Start a server that requires Slack-signed event requests
    pub async fn start_signed(secret: &str) -> Result<Self> {
        let verifier = SignatureVerifier::new(secret).map_err(|e| anyhow::anyhow!("{e}"))?;
        Self::spawn(RecordingPublisher::new(), Some(verifier)).await
    }

    async fn spawn(publisher: RecordingPublisher, verifier: Option<SignatureVerifier>) -> Result<Self> {
        let store = Arc::new(InMemoryMemberRepository::new());
        let publisher = Arc::new(publisher);

        let context = ServiceContextBuilder::new()
            .member_repo(store.clone())
            .publisher(publisher.clone())
            .build()?;
        let state = match verifier {
            Some(verifier) => AppState::new(context).with_verifier(verifier),
            None => AppState::new(context),
        };
        let app = create_app(state);

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;

        Ok(Self {
            addr,
            client,
            store,
            publisher,
            handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url(), path)
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> Result<Response> {
        Ok(self.client.get(self.url(path)).send().await?)
    }

    /// Make a POST request with JSON body
    pub async fn post_json<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        Ok(self.client.post(self.url(path)).json(body).send().await?)
    }

    /// Make a POST request with an arbitrary body
    pub async fn post_raw(&self, path: &str, body: impl Into<reqwest::Body>) -> Result<Response> {
        Ok(self
            .client
            .post(self.url(path))
            .header("content-type", "application/json")
            .body(body)
            .send()
            .await?)
    }

    /// POST an event body with Slack signing headers
    pub async fn post_signed(
        &self,
        path: &str,
        body: &str,
        timestamp: i64,
        signature: &str,
    ) -> Result<Response> {
        Ok(self
            .client
            .post(self.url(path))
            .header("content-type", "application/json")
            .header("x-slack-request-timestamp", timestamp.to_string())
            .header("x-slack-signature", signature)
            .body(body.to_string())
            .send()
            .await?)
    }

    /// Make a POST request with a urlencoded form body
    pub async fn post_form<T: Serialize + ?Sized>(&self, path: &str, form: &T) -> Result<Response> {
        Ok(self.client.post(self.url(path)).form(form).send().await?)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(
    response: Response,
    expected_status: StatusCode,
) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(response.json().await?)
}

/// Assert response status without parsing body
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(())
}
