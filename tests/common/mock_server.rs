//! Mock video rendering service.

use wiremock::{
    matchers::{header, method, path},
    Mock, MockServer, ResponseTemplate,
};

use statmap::services::{CONTRACT_HEADER, VIDEO_ENDPOINT};

/// Wrapper around wiremock MockServer standing in for the video service
pub struct MockVideoServer {
    pub server: MockServer,
}

impl MockVideoServer {
    /// Start a new mock video service
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        Self { server }
    }

    /// Base URL to configure the client with
    pub fn url(&self) -> String {
        self.server.uri()
    }

    /// Accept video requests of the given contract version with a JSON reply
    pub async fn mock_video_ok(&self, contract_version: &str, response: serde_json::Value) {
        Mock::given(method("POST"))
            .and(path(VIDEO_ENDPOINT))
            .and(header("content-type", "application/json"))
            .and(header(CONTRACT_HEADER, contract_version))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(response)
                    .insert_header("content-type", "application/json"),
            )
            .expect(1)
            .mount(&self.server)
            .await;
    }

    /// Answer video requests with a raw body and status
    pub async fn mock_video_raw(&self, status: u16, body: &str) {
        Mock::given(method("POST"))
            .and(path(VIDEO_ENDPOINT))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&self.server)
            .await;
    }

    /// Bodies of all video requests received so far, parsed as JSON
    pub async fn received_bodies(&self) -> Vec<serde_json::Value> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|r| r.url.path() == VIDEO_ENDPOINT)
            .map(|r| serde_json::from_slice(&r.body).expect("request body is JSON"))
            .collect()
    }
}
