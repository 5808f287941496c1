//! Mock gateway for client tests

use cli::ClientConfig;
use serde_json::Value;
use std::time::Duration;
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

pub struct MockGateway {
    pub server: MockServer,
}

/// Client configuration that polls quickly against `url`
pub fn fast_config(url: &str) -> ClientConfig {
    ClientConfig::new(url).with_poll_interval(Duration::from_millis(5))
}

impl MockGateway {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn url(&self) -> String {
        self.server.uri()
    }

    /// `verb resource` is accepted and tracked at `location`
    pub async fn accept(&self, verb: &str, resource: &str, location: &str) {
        Mock::given(method(verb))
            .and(path(resource))
            .respond_with(ResponseTemplate::new(202).insert_header("location", location))
            .mount(&self.server)
            .await;
    }

    /// `location` reports pending for the next `times` polls
    pub async fn pending(&self, location: &str, times: u64) {
        Mock::given(method("GET"))
            .and(path(location))
            .respond_with(ResponseTemplate::new(200).insert_header("x-pending", "true"))
            .up_to_n_times(times)
            .mount(&self.server)
            .await;
    }

    pub async fn pending_forever(&self, location: &str) {
        Mock::given(method("GET"))
            .and(path(location))
            .respond_with(ResponseTemplate::new(200).insert_header("x-pending", "true"))
            .mount(&self.server)
            .await;
    }

    pub async fn redirect(&self, location: &str, target: &str) {
        Mock::given(method("GET"))
            .and(path(location))
            .respond_with(ResponseTemplate::new(303).insert_header("location", target))
            .mount(&self.server)
            .await;
    }

    pub async fn respond(&self, verb: &str, resource: &str, status: u16) {
        Mock::given(method(verb))
            .and(path(resource))
            .respond_with(ResponseTemplate::new(status))
            .mount(&self.server)
            .await;
    }

    pub async fn respond_text(&self, verb: &str, resource: &str, status: u16, text: &str) {
        Mock::given(method(verb))
            .and(path(resource))
            .respond_with(ResponseTemplate::new(status).set_body_string(text))
            .mount(&self.server)
            .await;
    }

    pub async fn respond_json(&self, verb: &str, resource: &str, status: u16, body: Value) {
        Mock::given(method(verb))
            .and(path(resource))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(&self.server)
            .await;
    }
}
