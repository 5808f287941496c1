//! Bearer-token authentication for the gateway
//!
//! When `api_key` is configured, every request except the liveness route must
//! carry `Authorization: Bearer <api_key>`; anything else gets
//! `401 Unauthorized`. Status polls are guarded like the rest of the API.

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::warn;

use crate::constants::routes;
use crate::web::AppState;

pub async fn require_api_key(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let Some(expected) = state.config.api_key.as_deref() else {
        return next.run(request).await;
    };

    if request.uri().path() == routes::HELLO || bearer_token(request.headers()) == Some(expected) {
        return next.run(request).await;
    }

    warn!(
        "Rejecting unauthenticated {} {}",
        request.method(),
        request.uri().path()
    );
    (StatusCode::UNAUTHORIZED, "Unauthorized").into_response()
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
}
