//! In-process HTTP helpers
//!
//! Requests go straight through the router with `tower::ServiceExt::oneshot`,
//! no listening socket involved.

use axum::{
    body::{to_bytes, Body},
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use std::time::Duration;
use tower::ServiceExt;

/// Response with the body already collected
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn location(&self) -> Option<&str> {
        self.header(header::LOCATION.as_str())
    }

    pub fn is_pending(&self) -> bool {
        self.status == StatusCode::OK && self.header("x-pending") == Some("true")
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).expect("Response body is not JSON")
    }
}

pub async fn send(
    router: &Router,
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
) -> TestResponse {
    send_with_token(router, method, uri, body, None).await
}

/// Like [`send`], presenting `token` as a bearer credential when given
pub async fn send_with_token(
    router: &Router,
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
    token: Option<&str>,
) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let request = builder.body(body).expect("Failed to build request");
    let response = router
        .clone()
        .oneshot(request)
        .await
        .expect("Router is infallible");

    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");

    TestResponse {
        status,
        headers,
        body: String::from_utf8_lossy(&bytes).to_string(),
    }
}

pub async fn get(router: &Router, uri: &str) -> TestResponse {
    send(router, Method::GET, uri, None).await
}

/// Poll `location` until it stops reporting pending, or panic after ~5s.
pub async fn poll_until_settled(router: &Router, location: &str) -> TestResponse {
    for _ in 0..1000 {
        let response = get(router, location).await;
        if !response.is_pending() {
            return response;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("Operation at {} never finished", location);
}
