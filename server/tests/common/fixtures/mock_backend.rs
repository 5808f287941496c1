//! Mock storage backend for testing
//!
//! Stands in for the storage-orchestration service the gateway forwards to.

use serde_json::{json, Value};
use std::time::Duration;
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

pub struct MockBackend {
    pub server: MockServer,
    pub base_url: String,
}

impl MockBackend {
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        let base_url = server.uri();
        Self { server, base_url }
    }

    /// Creation in `collection` succeeds and returns a resource with `id`
    pub async fn mock_create_success(&self, collection: &str, id: &str) {
        Mock::given(method("POST"))
            .and(path(format!("/{}", collection)))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": id,
                "name": format!("{}-{}", collection, id)
            })))
            .mount(&self.server)
            .await;
    }

    /// Creation succeeds but only after `delay`
    pub async fn mock_create_slow(&self, collection: &str, id: &str, delay: Duration) {
        Mock::given(method("POST"))
            .and(path(format!("/{}", collection)))
            .respond_with(
                ResponseTemplate::new(201)
                    .set_body_json(json!({ "id": id }))
                    .set_delay(delay),
            )
            .mount(&self.server)
            .await;
    }

    /// Creation succeeds without telling us what was created
    pub async fn mock_create_without_id(&self, collection: &str) {
        Mock::given(method("POST"))
            .and(path(format!("/{}", collection)))
            .respond_with(ResponseTemplate::new(200))
            .mount(&self.server)
            .await;
    }

    pub async fn mock_create_failure(&self, collection: &str, status: u16, message: &str) {
        Mock::given(method("POST"))
            .and(path(format!("/{}", collection)))
            .respond_with(ResponseTemplate::new(status).set_body_string(message))
            .mount(&self.server)
            .await;
    }

    pub async fn mock_delete_success(&self, collection: &str, id: &str) {
        Mock::given(method("DELETE"))
            .and(path(format!("/{}/{}", collection, id)))
            .respond_with(ResponseTemplate::new(204))
            .mount(&self.server)
            .await;
    }

    pub async fn mock_delete_failure(&self, collection: &str, id: &str, message: &str) {
        Mock::given(method("DELETE"))
            .and(path(format!("/{}/{}", collection, id)))
            .respond_with(ResponseTemplate::new(500).set_body_string(message))
            .mount(&self.server)
            .await;
    }

    pub async fn mock_get(&self, resource_path: &str, status: u16, body: Value) {
        Mock::given(method("GET"))
            .and(path(resource_path))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(&self.server)
            .await;
    }
}
