//! Operation tracking endpoints

use axum::{extract::State, response::Json};

use crate::async_http::OperationSummary;
use crate::web::AppState;

pub async fn hello() -> &'static str {
    "Hello from the storage gateway"
}

/// Counts of operations still tracked by the gateway
pub async fn get_operations_summary(State(state): State<AppState>) -> Json<OperationSummary> {
    Json(state.async_manager.summary().await)
}
