//! Mock ingestion service

use ingest_console::HttpIngestClient;
use ingest_console::config::ServiceConfig;
use std::collections::HashMap;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

/// A wiremock server plus a client pointed at it
pub struct MockIngestService {
    pub server: MockServer,
    pub client: HttpIngestClient,
}

impl MockIngestService {
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        let config = ServiceConfig {
            base_url: server.uri(),
            timeout: 5,
            ..Default::default()
        };
        let client = HttpIngestClient::new(&config).expect("client for mock server");
        Self { server, client }
    }

    /// Answer GETs on `endpoint` with each body once, in order; the last repeats
    pub async fn mount_get_sequence(&self, endpoint: &str, bodies: Vec<serde_json::Value>) {
        let count = bodies.len();
        for (i, body) in bodies.into_iter().enumerate() {
            let mock = Mock::given(method("GET"))
                .and(path(endpoint))
                .respond_with(ResponseTemplate::new(200).set_body_json(body));
            let mock = if i + 1 < count {
                mock.up_to_n_times(1)
            } else {
                mock
            };
            mock.mount(&self.server).await;
        }
    }

    /// Requests received for one method and path
    pub async fn requests_to(&self, verb: &str, endpoint: &str) -> Vec<Request> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .filter(|r| r.method.as_str() == verb && r.url.path() == endpoint)
            .collect()
    }
}

/// Decode an urlencoded request body
pub fn form_fields(request: &Request) -> HashMap<String, String> {
    url::form_urlencoded::parse(&request.body)
        .into_owned()
        .collect()
}
