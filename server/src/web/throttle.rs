//! Request throttling for the gateway
//!
//! New operations (POST and DELETE) are refused with `429 Too Many Requests`
//! once `max_in_flight` operations are still running. Reads and status polls
//! always go through. The count is taken before the handler runs, so a burst
//! of simultaneous requests can overshoot the limit by the size of the burst.

use axum::{
    extract::{Request, State},
    http::{Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::warn;

use crate::web::AppState;

pub async fn limit_in_flight(State(state): State<AppState>, request: Request, next: Next) -> Response {
    if let Some(max_in_flight) = state.config.max_in_flight {
        if starts_operation(request.method()) {
            let in_flight = state.async_manager.in_flight().await;
            if in_flight >= max_in_flight {
                warn!(
                    "Rejecting {} {}: {} operations in flight (limit {})",
                    request.method(),
                    request.uri().path(),
                    in_flight,
                    max_in_flight
                );
                return (StatusCode::TOO_MANY_REQUESTS, "Too Many Requests").into_response();
            }
        }
    }

    next.run(request).await
}

fn starts_operation(method: &Method) -> bool {
    matches!(*method, Method::POST | Method::DELETE)
}
