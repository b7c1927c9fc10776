//! Mock HTTP server setup for integration tests

use cloud_api_sdk::{setup_config, BoundClient, ClientConfig, ClientConfigBuilder};
use mockito::{Matcher, Mock, Server, ServerGuard};

/// Test fixture that owns a mock server for the lifetime of a test
pub struct MockServerFixture {
    pub server: ServerGuard,
    pub base_url: String,
}

impl MockServerFixture {
    pub async fn new() -> Self {
        let server = Server::new_async().await;
        let base_url = server.url();
        Self { server, base_url }
    }

    /// Config builder pointed at this server
    pub fn config_builder(&self) -> ClientConfigBuilder {
        ClientConfig::builder(&self.base_url)
    }

    pub fn config(&self) -> ClientConfig {
        self.config_builder().build().expect("mock config")
    }

    pub fn client(&self) -> BoundClient {
        setup_config(self.config())
    }

    /// JSON response for `method path`, any query; not yet registered
    pub fn json_mock(&mut self, method: &str, path: &str, status: usize, body: &str) -> Mock {
        self.server
            .mock(method, path)
            .match_query(Matcher::Any)
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(body)
    }

    pub async fn mock_json(&mut self, method: &str, path: &str, status: usize, body: &str) -> Mock {
        self.json_mock(method, path, status, body).create_async().await
    }

    /// Mock a response with an arbitrary content type
    pub async fn mock_raw(
        &mut self,
        method: &str,
        path: &str,
        content_type: &str,
        body: &[u8],
    ) -> Mock {
        self.server
            .mock(method, path)
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", content_type)
            .with_body(body)
            .create_async()
            .await
    }
}

pub const CLUSTER_LIST: &str = r#"{
    "items": [
        {"id": "c-1", "name": "alpha", "status": "RUNNING", "nodeCount": 3},
        {"id": "c-2", "name": "beta", "status": "PROVISIONING", "nodeCount": 1}
    ],
    "nextPageToken": "page-2"
}"#;
